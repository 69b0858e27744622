use std::time::Duration;

/// The two timers a typewriter session can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum TimerKind {
    /// Start delay, per-character tick, or loop restart. At most one is armed.
    Typing,
    /// Fixed-period cursor blink toggle.
    Blink,
}

/// Identifies a single arming of a timer slot.
///
/// Hosts that schedule real timers hold on to tokens and hand them back via
/// `Typewriter::fire`. A token only fires while its slot is still armed with
/// the same generation; anything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Monotonic counter handing out generations. Never rewinds, not even when a
/// session is torn down and rebuilt, so old tokens can never alias new ones.
#[derive(Debug, Default, Clone)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> u64 {
        self.current
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Armed {
    deadline: Duration,
    generation: u64,
}

/// One-shot timer slot measured against a session clock.
#[derive(Debug, Clone)]
pub struct TimerSlot {
    kind: TimerKind,
    armed: Option<Armed>,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self { kind, armed: None }
    }

    /// Arm the slot to fire `delay` after `now`, replacing any previous arming.
    pub fn arm(&mut self, now: Duration, delay: Duration, counter: &mut Generation) -> TimerToken {
        let generation = counter.next();
        self.armed = Some(Armed {
            deadline: now + delay,
            generation,
        });
        TimerToken {
            kind: self.kind,
            generation,
        }
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.armed.map(|a| a.deadline)
    }

    pub fn token(&self) -> Option<TimerToken> {
        self.armed.map(|a| TimerToken {
            kind: self.kind,
            generation: a.generation,
        })
    }

    pub fn is_due(&self, now: Duration) -> bool {
        matches!(self.armed, Some(a) if a.deadline <= now)
    }

    pub fn matches(&self, token: TimerToken) -> bool {
        token.kind == self.kind && matches!(self.armed, Some(a) if a.generation == token.generation)
    }

    /// Disarm and return the deadline if `token` is the live arming.
    pub fn take(&mut self, token: TimerToken) -> Option<Duration> {
        if self.matches(token) {
            self.armed.take().map(|a| a.deadline)
        } else {
            None
        }
    }
}
