use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_SPEED_MS: u64 = 50;
pub const DEFAULT_LOOP_DELAY_MS: u64 = 1000;
pub const DEFAULT_CURSOR_CHAR: &str = "|";

/// Callback run once each time a pass reveals the final character.
#[derive(Clone)]
pub struct OnComplete(Arc<dyn Fn() + Send + Sync>);

impl OnComplete {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for OnComplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnComplete(..)")
    }
}

impl PartialEq for OnComplete {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Options for one typewriter session. Resolved once when the session is
/// built; replacing it rebuilds the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypewriterConfig {
    /// milliseconds per revealed character
    pub speed_ms: u64,
    /// milliseconds before the first character of a pass
    pub delay_ms: u64,
    pub r#loop: bool,
    /// milliseconds between completion and the next pass when looping
    pub loop_delay_ms: u64,
    pub show_cursor: bool,
    pub cursor_char: String,
    pub auto_start: bool,
    #[serde(skip)]
    pub on_complete: Option<OnComplete>,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
            delay_ms: 0,
            r#loop: false,
            loop_delay_ms: DEFAULT_LOOP_DELAY_MS,
            show_cursor: false,
            cursor_char: DEFAULT_CURSOR_CHAR.to_string(),
            auto_start: true,
            on_complete: None,
        }
    }
}

impl TypewriterConfig {
    /// Zero speed is rejected rather than clamped or treated as instant.
    /// Delays are unsigned so they cannot go negative.
    pub fn validate(&self) -> Result<()> {
        if self.speed_ms == 0 {
            return Err(Error::InvalidSpeed);
        }
        Ok(())
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn loop_delay(&self) -> Duration {
        Duration::from_millis(self.loop_delay_ms)
    }

    pub fn with_speed_ms(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_loop(mut self, loop_delay_ms: u64) -> Self {
        self.r#loop = true;
        self.loop_delay_ms = loop_delay_ms;
        self
    }

    pub fn with_cursor(mut self, cursor_char: impl Into<String>) -> Self {
        self.show_cursor = true;
        self.cursor_char = cursor_char.into();
        self
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    pub fn with_on_complete<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(OnComplete::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = TypewriterConfig::default();
        assert_eq!(cfg.speed_ms, 50);
        assert_eq!(cfg.delay_ms, 0);
        assert!(!cfg.r#loop);
        assert_eq!(cfg.loop_delay_ms, 1000);
        assert!(!cfg.show_cursor);
        assert_eq!(cfg.cursor_char, "|");
        assert!(cfg.auto_start);
        assert!(cfg.on_complete.is_none());
    }

    #[test]
    fn zero_speed_is_rejected() {
        let cfg = TypewriterConfig::default().with_speed_ms(0);
        assert_matches!(cfg.validate(), Err(Error::InvalidSpeed));
        assert!(TypewriterConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg: TypewriterConfig =
            serde_json::from_str(r#"{"speed_ms": 80, "show_cursor": true}"#).unwrap();
        assert_eq!(cfg.speed_ms, 80);
        assert!(cfg.show_cursor);
        assert_eq!(cfg.loop_delay_ms, 1000);
        assert!(cfg.auto_start);
    }

    #[test]
    fn negative_delay_fails_to_parse() {
        let parsed = serde_json::from_str::<TypewriterConfig>(r#"{"delay_ms": -5}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn loop_field_serializes_without_raw_prefix() {
        let json = serde_json::to_string(&TypewriterConfig::default().with_loop(2000)).unwrap();
        assert!(json.contains(r#""loop":true"#));
        assert!(!json.contains("on_complete"));
    }

    #[test]
    fn callbacks_compare_by_identity() {
        let a = OnComplete::new(|| {});
        let b = OnComplete::new(|| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
