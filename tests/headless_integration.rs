use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use glimmer::runtime::{PlaygroundEvent, Runner};
use glimmer::{Phase, Typewriter, TypewriterConfig};

// Headless integration using the runtime Runner + Typewriter without a TTY.
// Each Tick advances the session by exactly the wait the runner was given, so
// the virtual clock lands on every deadline.
fn drive(runner: &Runner, tw: &mut Typewriter) -> PlaygroundEvent {
    let wait = runner.timeout_for(tw.time_until_next());
    let event = runner.step(tw.time_until_next());
    if let PlaygroundEvent::Tick = event {
        tw.advance(wait);
    }
    event
}

#[test]
fn headless_typing_flow_completes() {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    let config = TypewriterConfig::default()
        .with_speed_ms(5)
        .with_on_complete(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
    let mut tw = Typewriter::new("hi", config).unwrap();

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(rx, Duration::from_millis(5));

    for _ in 0..100u32 {
        drive(&runner, &mut tw);
        if tw.is_complete() {
            break;
        }
    }

    assert!(tw.is_complete(), "typewriter should have finished");
    assert_eq!(tw.text(), "hi");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn headless_runner_wakes_on_deadlines_not_frames() {
    let mut tw = Typewriter::new("hi", TypewriterConfig::default().with_speed_ms(5)).unwrap();

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(rx, Duration::from_secs(10));

    let started = Instant::now();
    let mut steps = 0;
    while !tw.is_complete() && steps < 10 {
        drive(&runner, &mut tw);
        steps += 1;
    }

    // start delay, then one wake per character
    assert_eq!(steps, 3);
    assert_eq!(tw.now(), Duration::from_millis(10));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn headless_key_controls_pause_and_resume() {
    let config = TypewriterConfig::default()
        .with_speed_ms(5)
        .with_auto_start(false);
    let mut tw = Typewriter::new("abcdef", config).unwrap();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(rx, Duration::from_millis(5));

    let press = |c: char| PlaygroundEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    tx.send(press('s')).unwrap();

    let mut paused_at = None;
    for _ in 0..200u32 {
        match drive(&runner, &mut tw) {
            PlaygroundEvent::Tick | PlaygroundEvent::Resize => {}
            PlaygroundEvent::Key(key) => match key.code {
                KeyCode::Char('s') => tw.start(),
                KeyCode::Char('p') => tw.pause(),
                _ => {}
            },
        }

        if tw.cursor_index() == 3 && paused_at.is_none() {
            tx.send(press('p')).unwrap();
            paused_at = Some(3);
        }
        if tw.phase() == Phase::Paused {
            assert_eq!(tw.revealed(), "abc");
            tx.send(press('s')).unwrap();
        }
        if tw.is_complete() {
            break;
        }
    }

    assert!(tw.is_complete());
    assert_eq!(tw.revealed(), "abcdef");
}

#[test]
fn headless_loop_keeps_cycling() {
    let config = TypewriterConfig::default().with_speed_ms(1).with_loop(3);
    let mut tw = Typewriter::new("ab", config).unwrap();

    for _ in 0..40 {
        tw.advance(Duration::from_millis(1));
    }

    // each cycle: 2 chars + 3ms loop delay
    assert!(tw.passes_completed() >= 5);
}

#[test]
fn real_timer_host_discards_stale_deliveries() {
    // A host scheduling its own timers collects tokens, then the user resets
    // before they fire. Late deliveries must not move the session.
    let mut tw = Typewriter::new("stale", TypewriterConfig::default().with_cursor("|")).unwrap();
    let pending: Vec<_> = tw.armed_timers().into_iter().map(|(t, _)| t).collect();
    assert_eq!(pending.len(), 2);

    tw.reset();
    let phase = tw.phase();
    for token in pending {
        assert!(!tw.fire(token));
    }
    assert_eq!(tw.phase(), phase);
    assert_eq!(tw.cursor_index(), 0);
    assert!(tw.blink_on());
}
