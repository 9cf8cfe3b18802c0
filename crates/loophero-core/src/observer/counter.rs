//! Swipe counter state machine.
//!
//! ## Rules
//!
//! ```text
//! ContextReset   -> count = 0
//! CountableSwipe -> debounce gate -> noise gate -> count += 1
//! Ignore         -> no change
//! (every signal) -> count >= threshold ? reset, report threshold reached
//! ```
//!
//! The threshold re-check runs unconditionally after classification, so a
//! threshold lowered below the current count fires on the next event of any
//! kind, including ignored ones.

use serde::{Deserialize, Serialize};

use super::classifier::ScrollSignal;
use super::event::{ObservedEvent, ScrollDirection};

/// Minimum spacing between two swipes counted separately.
pub const DEBOUNCE_WINDOW_MS: i64 = 500;

/// Deltas with a magnitude at or below this are jitter.
pub const NOISE_FLOOR: i32 = 20;

/// Tuning for the debounce and noise gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    pub debounce_window_ms: i64,
    pub noise_floor: i32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: DEBOUNCE_WINDOW_MS,
            noise_floor: NOISE_FLOOR,
        }
    }
}

/// Mutable counter state. Owned exclusively by [`ScrollCounter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub count: u32,
    pub last_counted_timestamp_millis: i64,
}

/// What the counter did with one signal, before the threshold check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CounterOutcome {
    Counted { direction: ScrollDirection },
    /// Within the debounce window of the last counted swipe.
    Debounced { since_last_ms: i64 },
    /// Delta inside the noise floor.
    Noise { delta: i32 },
    ContextReset { previous_count: u32 },
    Ignored,
}

/// Result of feeding one signal through the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterUpdate {
    pub outcome: CounterOutcome,
    /// Count reached the threshold; the count has already been reset.
    pub threshold_reached: bool,
    /// Count at the moment of the threshold check.
    pub count_at_check: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollCounter {
    config: CounterConfig,
    state: CounterState,
}

impl ScrollCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CounterConfig) -> Self {
        Self {
            config,
            state: CounterState::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn count(&self) -> u32 {
        self.state.count
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn config(&self) -> CounterConfig {
        self.config
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply one classified event, then run the threshold check against
    /// `threshold`.
    pub fn on_signal(
        &mut self,
        signal: ScrollSignal,
        event: &ObservedEvent,
        threshold: u32,
    ) -> CounterUpdate {
        let outcome = match signal {
            ScrollSignal::ContextReset => {
                let previous_count = self.state.count;
                self.state.count = 0;
                CounterOutcome::ContextReset { previous_count }
            }
            ScrollSignal::CountableSwipe { .. } => self.count_swipe(event),
            ScrollSignal::Ignore => CounterOutcome::Ignored,
        };

        let count_at_check = self.state.count;
        let threshold_reached = count_at_check >= threshold;
        if threshold_reached {
            self.state.count = 0;
        }

        CounterUpdate {
            outcome,
            threshold_reached,
            count_at_check,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn count_swipe(&mut self, event: &ObservedEvent) -> CounterOutcome {
        let since_last_ms = event
            .timestamp_millis
            .saturating_sub(self.state.last_counted_timestamp_millis);
        if since_last_ms <= self.config.debounce_window_ms {
            return CounterOutcome::Debounced { since_last_ms };
        }

        let delta = event.vertical_delta;
        if delta.saturating_abs() <= self.config.noise_floor {
            return CounterOutcome::Noise { delta };
        }

        self.state.count += 1;
        self.state.last_counted_timestamp_millis = event.timestamp_millis;
        CounterOutcome::Counted {
            direction: ScrollDirection::from_delta(delta),
        }
    }
}
