//! Debounce primitives for the feed triggers.
//!
//! Both take the current `Instant` as an argument instead of reading the
//! clock, so the windows are unit-testable without timers. The caller's
//! event loop owns the ticking.

use std::time::{Duration, Instant};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ScrollGate — coalesce scroll events
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// At most one load evaluation per window (~100 ms). Triggers landing
/// inside the window are dropped, not queued.
pub struct ScrollGate {
    window: Duration,
    last_fire: Option<Instant>,
}

impl ScrollGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fire: None,
        }
    }

    pub fn should_fire(&mut self, now: Instant) -> bool {
        match self.last_fire {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last_fire = Some(now);
                true
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SearchDebouncer — trailing quiet period for keystrokes
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Holds the latest text until no new input has arrived for the quiet
/// period (~300 ms); intermediate keystrokes never surface.
pub struct SearchDebouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record a keystroke. Restarts the quiet-period timer.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.to_string(), now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The settled search text, once the quiet period has elapsed.
    /// Consumes the pending value so each settle fires exactly once.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now.duration_since(*at) >= self.quiet => {
                self.pending.take().map(|(text, _)| text)
            }
            _ => None,
        }
    }
}
