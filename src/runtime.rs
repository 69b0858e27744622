//! Host loop plumbing for the playground.
//!
//! Terminal input arrives on a channel. Between inputs the loop sleeps until
//! the earliest armed typewriter timer, capped at one frame, so a character
//! lands when it is due rather than on the next fixed poll.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::warn;

#[derive(Clone, Debug)]
pub enum PlaygroundEvent {
    Key(KeyEvent),
    Resize,
    /// A timer may be due, or a frame passed without input.
    Tick,
}

/// Forward crossterm key presses and resizes onto a channel from a reader
/// thread. The thread exits once the receiver is dropped.
pub fn terminal_events() -> Receiver<PlaygroundEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || loop {
        let forwarded = match event::read() {
            // releases would double every press where the terminal reports them
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => PlaygroundEvent::Key(key),
            Ok(Event::Resize(..)) => PlaygroundEvent::Resize,
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "terminal input closed");
                return;
            }
        };
        if tx.send(forwarded).is_err() {
            return;
        }
    });
    rx
}

/// Waits for the next input or timer deadline, whichever comes first.
pub struct Runner {
    events: Receiver<PlaygroundEvent>,
    frame: Duration,
}

impl Runner {
    /// `frame` bounds every wait, so the host redraws at least that often.
    pub fn new(events: Receiver<PlaygroundEvent>, frame: Duration) -> Self {
        Self { events, frame }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// How long `step` blocks given the time left until the next armed timer.
    pub fn timeout_for(&self, until_deadline: Option<Duration>) -> Duration {
        until_deadline.map_or(self.frame, |d| d.min(self.frame))
    }

    /// Next input, or `Tick` once the deadline (or a frame) has passed. A
    /// closed input channel degrades to a pure timer loop.
    pub fn step(&self, until_deadline: Option<Duration>) -> PlaygroundEvent {
        let timeout = self.timeout_for(until_deadline);
        match self.events.recv_timeout(timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => PlaygroundEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                PlaygroundEvent::Tick
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn timeout_is_capped_by_frame() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(rx, Duration::from_millis(250));

        assert_eq!(runner.timeout_for(None), Duration::from_millis(250));
        assert_eq!(
            runner.timeout_for(Some(Duration::from_millis(40))),
            Duration::from_millis(40)
        );
        assert_eq!(
            runner.timeout_for(Some(Duration::from_secs(3))),
            Duration::from_millis(250)
        );
        assert_eq!(runner.timeout_for(Some(Duration::ZERO)), Duration::ZERO);
    }

    #[test]
    fn step_wakes_at_deadline_not_frame() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(rx, Duration::from_secs(5));

        let started = Instant::now();
        assert!(matches!(
            runner.step(Some(Duration::from_millis(5))),
            PlaygroundEvent::Tick
        ));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(PlaygroundEvent::Resize).unwrap();
        let runner = Runner::new(rx, Duration::from_secs(5));

        assert!(matches!(runner.step(None), PlaygroundEvent::Resize));
    }

    #[test]
    fn closed_channel_still_ticks() {
        let (tx, rx) = mpsc::channel::<PlaygroundEvent>();
        drop(tx);
        let runner = Runner::new(rx, Duration::from_millis(1));
        assert!(matches!(runner.step(None), PlaygroundEvent::Tick));
    }
}
