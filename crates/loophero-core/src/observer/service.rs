//! Long-running observer driven by the platform event feed.
//!
//! ## Lifecycle
//!
//! ```text
//! start() -> status indicator posted -> handle_event()* -> stop()
//! ```
//!
//! An observer only exists after its status indicator has been posted, so no
//! event can be processed before the "active" notification is up. Counter
//! state lives and dies with the observer.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::classifier::classify;
use super::counter::{CounterOutcome, CounterState, ScrollCounter};
use super::event::ObservedEvent;
use crate::alerts::AlertDispatcher;
use crate::events::Event;
use crate::storage::SettingsStore;

/// Running totals for one observer lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverStats {
    pub events_seen: u64,
    /// Non-scroll events dropped before classification.
    pub non_scroll_events: u64,
    pub swipes_counted: u64,
    pub debounced: u64,
    pub noise: u64,
    pub ignored: u64,
    pub context_resets: u64,
    pub alerts_fired: u64,
}

pub struct ScrollObserver {
    settings: Arc<dyn SettingsStore>,
    dispatcher: AlertDispatcher,
    counter: ScrollCounter,
    stats: ObserverStats,
}

impl ScrollObserver {
    /// Bring the observer up and post its status indicator.
    ///
    /// Returns the observer together with its `ObserverStarted` event.
    pub fn start(settings: Arc<dyn SettingsStore>, dispatcher: AlertDispatcher) -> (Self, Event) {
        Self::start_with_counter(settings, dispatcher, ScrollCounter::new())
    }

    pub fn start_with_counter(
        settings: Arc<dyn SettingsStore>,
        mut dispatcher: AlertDispatcher,
        counter: ScrollCounter,
    ) -> (Self, Event) {
        dispatcher.show_status();
        let threshold = settings.swipe_threshold();
        tracing::info!(threshold, "scroll observer started");

        let observer = Self {
            settings,
            dispatcher,
            counter,
            stats: ObserverStats::default(),
        };
        let started = Event::ObserverStarted {
            threshold,
            at: Utc::now(),
        };
        (observer, started)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn count(&self) -> u32 {
        self.counter.count()
    }

    pub fn counter_state(&self) -> CounterState {
        self.counter.state()
    }

    pub fn stats(&self) -> ObserverStats {
        self.stats
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Process one platform event synchronously.
    pub fn handle_event(&mut self, event: ObservedEvent) -> Vec<Event> {
        self.stats.events_seen += 1;
        if !event.is_scroll() {
            self.stats.non_scroll_events += 1;
            return Vec::new();
        }

        let signal = classify(&event);
        let threshold = self.settings.swipe_threshold();
        let update = self.counter.on_signal(signal, &event, threshold);

        let mut events = Vec::new();
        match update.outcome {
            CounterOutcome::Counted { direction } => {
                self.stats.swipes_counted += 1;
                tracing::debug!(
                    app = %event.source_app,
                    ?direction,
                    count = update.count_at_check,
                    "swipe counted"
                );
                events.push(Event::SwipeCounted {
                    app: event.source_app.clone(),
                    direction,
                    count: update.count_at_check,
                    at: Utc::now(),
                });
            }
            CounterOutcome::Debounced { since_last_ms } => {
                self.stats.debounced += 1;
                events.push(Event::SwipeDebounced {
                    app: event.source_app.clone(),
                    since_last_ms,
                    at: Utc::now(),
                });
            }
            CounterOutcome::Noise { delta } => {
                self.stats.noise += 1;
                tracing::trace!(app = %event.source_app, delta, "scroll below noise floor");
            }
            CounterOutcome::ContextReset { previous_count } => {
                self.stats.context_resets += 1;
                if previous_count > 0 {
                    tracing::debug!(app = %event.source_app, previous_count, "swipe count reset");
                    events.push(Event::CounterReset {
                        app: event.source_app.clone(),
                        previous_count,
                        at: Utc::now(),
                    });
                }
            }
            CounterOutcome::Ignored => {
                self.stats.ignored += 1;
            }
        }

        if update.threshold_reached {
            events.push(Event::ThresholdReached {
                count: update.count_at_check,
                threshold,
                at: Utc::now(),
            });
            events.push(self.fire_alert());
        }
        events
    }

    /// Tear down: clear the status indicator and discard counter state.
    pub fn stop(mut self) -> (ObserverStats, Event) {
        self.dispatcher.clear_status();
        tracing::info!(
            swipes = self.stats.swipes_counted,
            alerts = self.stats.alerts_fired,
            "scroll observer stopped"
        );
        (self.stats, Event::ObserverStopped { at: Utc::now() })
    }

    fn fire_alert(&mut self) -> Event {
        match self.dispatcher.fire() {
            Some(fired) => {
                self.stats.alerts_fired += 1;
                Event::AlertPosted {
                    notification_id: fired.notification.id,
                    message_index: fired.message_index,
                    title: fired.notification.title,
                    at: Utc::now(),
                }
            }
            None => Event::AlertDropped { at: Utc::now() },
        }
    }
}
