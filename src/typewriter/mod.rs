//! Timed text reveal.
//!
//! A [`Typewriter`] reveals a string one character per `speed_ms`, optionally
//! after a start delay, optionally looping, with an independent blinking
//! cursor. It owns no rendering and no real timers: the host either advances
//! the session clock with [`Typewriter::advance`] or schedules its own timers
//! from [`Typewriter::armed_timers`] and delivers them with
//! [`Typewriter::fire`]. Every arming carries a fresh generation, so a timer
//! that outlives a pause, reset, or text change is dropped on delivery.

pub mod config;

pub use config::{OnComplete, TypewriterConfig};

use std::time::Duration;
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::timer::{Generation, TimerKind, TimerSlot, TimerToken};

/// Standard terminal cursor blink rate.
pub const CURSOR_BLINK_PERIOD: Duration = Duration::from_millis(530);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    /// Waiting for `start()` (auto start disabled).
    Idle,
    /// Waiting out the start delay of a pass.
    PendingDelay,
    /// Revealing one character per tick.
    Typing,
    /// Suspended by the host; progress kept.
    Paused,
    /// Every character revealed.
    Complete,
}

#[derive(Debug)]
pub struct Typewriter {
    text: String,
    len: usize,
    config: TypewriterConfig,
    phase: Phase,
    cursor_index: usize,
    blink_on: bool,
    passes_completed: u64,
    now: Duration,
    generation: Generation,
    typing_timer: TimerSlot,
    blink_timer: TimerSlot,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, config: TypewriterConfig) -> Result<Self> {
        config.validate()?;
        let text = text.into();
        let mut typewriter = Self {
            len: text.chars().count(),
            text,
            config,
            phase: Phase::Idle,
            cursor_index: 0,
            blink_on: true,
            passes_completed: 0,
            now: Duration::ZERO,
            generation: Generation::default(),
            typing_timer: TimerSlot::new(TimerKind::Typing),
            blink_timer: TimerSlot::new(TimerKind::Blink),
        };
        typewriter.begin_session();
        Ok(typewriter)
    }

    /// Replace the target text. The running session is torn down and a new
    /// one starts from the first character.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.len = self.text.chars().count();
        self.begin_session();
    }

    /// Replace the whole configuration, rebuilding the session. On error the
    /// current session is left untouched.
    pub fn set_config(&mut self, config: TypewriterConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.begin_session();
        Ok(())
    }

    /// Begin or resume typing.
    ///
    /// Running sessions are left alone. A completed session restarts from
    /// the first character; a paused one continues where it stopped.
    pub fn start(&mut self) {
        match self.phase {
            Phase::Idle => self.enter_pending_delay(),
            Phase::PendingDelay | Phase::Typing => {}
            Phase::Complete => {
                if self.len > 0 {
                    self.enter_pending_delay();
                }
            }
            Phase::Paused => {
                if self.cursor_index == 0 || self.cursor_index >= self.len {
                    self.enter_pending_delay();
                } else {
                    self.set_phase(Phase::Typing);
                    self.arm_typing(self.config.speed());
                }
            }
        }
    }

    /// Suspend typing, keeping revealed characters. On a completed session
    /// this only drops a pending loop restart.
    pub fn pause(&mut self) {
        match self.phase {
            Phase::Idle | Phase::Paused => {}
            Phase::Complete => self.typing_timer.cancel(),
            Phase::PendingDelay | Phase::Typing => {
                self.typing_timer.cancel();
                self.set_phase(Phase::Paused);
            }
        }
    }

    /// Back to the first character, re-entering the start delay when auto
    /// start is on and idling otherwise.
    pub fn reset(&mut self) {
        self.begin_session();
    }

    /// Move the session clock forward by `dt`, firing every timer that comes
    /// due on the way in deadline order.
    pub fn advance(&mut self, dt: Duration) {
        let target = self.now + dt;
        while let Some(token) = self.next_due(target) {
            self.fire(token);
        }
        self.now = target;
    }

    /// Deliver one timer. Returns false, changing nothing, when the token no
    /// longer names a live arming.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        let deadline = match token.kind {
            TimerKind::Typing => self.typing_timer.take(token),
            TimerKind::Blink => self.blink_timer.take(token),
        };
        let Some(deadline) = deadline else {
            trace!(kind = %token.kind, generation = token.generation, "dropping stale timer");
            return false;
        };
        self.now = self.now.max(deadline);
        match token.kind {
            TimerKind::Typing => self.on_typing_timer(),
            TimerKind::Blink => self.on_blink_timer(),
        }
        true
    }

    /// Live timers with their absolute deadlines on the session clock.
    pub fn armed_timers(&self) -> Vec<(TimerToken, Duration)> {
        [&self.typing_timer, &self.blink_timer]
            .into_iter()
            .filter(|slot| slot.is_armed())
            .filter_map(|slot| slot.token().zip(slot.deadline()))
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.armed_timers().into_iter().map(|(_, d)| d).min()
    }

    /// Session time left until the earliest armed timer; zero if overdue.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    /// What the host should display: the revealed prefix, followed by the
    /// cursor (or a space while it blinks off) until the pass completes.
    pub fn text(&self) -> String {
        let revealed = self.revealed();
        if !self.config.show_cursor || self.phase == Phase::Complete {
            return revealed.to_string();
        }
        let mut out = String::with_capacity(revealed.len() + self.config.cursor_char.len());
        out.push_str(revealed);
        if self.blink_on {
            out.push_str(&self.config.cursor_char);
        } else {
            out.push(' ');
        }
        out
    }

    pub fn revealed(&self) -> &str {
        match self.text.char_indices().nth(self.cursor_index) {
            Some((byte_idx, _)) => &self.text[..byte_idx],
            None => &self.text,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    /// Length of the target text in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.phase, Phase::Typing | Phase::PendingDelay)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn blink_on(&self) -> bool {
        self.blink_on
    }

    pub fn passes_completed(&self) -> u64 {
        self.passes_completed
    }

    /// Current position of the session clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    fn begin_session(&mut self) {
        self.typing_timer.cancel();
        self.blink_timer.cancel();
        self.cursor_index = 0;
        self.blink_on = true;

        if self.config.show_cursor {
            self.blink_timer
                .arm(self.now, CURSOR_BLINK_PERIOD, &mut self.generation);
        }

        if self.len == 0 {
            self.set_phase(Phase::Complete);
        } else if self.config.auto_start {
            self.enter_pending_delay();
        } else {
            self.set_phase(Phase::Idle);
        }
    }

    fn enter_pending_delay(&mut self) {
        self.cursor_index = 0;
        self.set_phase(Phase::PendingDelay);
        self.arm_typing(self.config.delay());
    }

    fn on_typing_timer(&mut self) {
        match self.phase {
            Phase::PendingDelay => {
                self.set_phase(Phase::Typing);
                self.arm_typing(self.config.speed());
            }
            Phase::Typing => {
                self.cursor_index += 1;
                if self.cursor_index >= self.len {
                    self.complete();
                } else {
                    self.arm_typing(self.config.speed());
                }
            }
            // loop restart
            Phase::Complete => self.enter_pending_delay(),
            Phase::Idle | Phase::Paused => {}
        }
    }

    fn on_blink_timer(&mut self) {
        self.blink_on = !self.blink_on;
        self.blink_timer
            .arm(self.now, CURSOR_BLINK_PERIOD, &mut self.generation);
    }

    fn complete(&mut self) {
        self.set_phase(Phase::Complete);
        self.passes_completed += 1;
        info!(
            chars = self.len,
            passes = self.passes_completed,
            "typewriter pass complete"
        );
        if let Some(on_complete) = &self.config.on_complete {
            on_complete.call();
        }
        if self.config.r#loop {
            self.arm_typing(self.config.loop_delay());
        }
    }

    fn arm_typing(&mut self, delay: Duration) {
        self.typing_timer.arm(self.now, delay, &mut self.generation);
    }

    fn next_due(&self, target: Duration) -> Option<TimerToken> {
        [&self.typing_timer, &self.blink_timer]
            .into_iter()
            .filter(|slot| slot.is_due(target))
            .min_by_key(|slot| slot.deadline())
            .and_then(|slot| slot.token())
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = %self.phase, to = %phase, cursor = self.cursor_index, "typewriter phase");
        }
        self.phase = phase;
    }
}
