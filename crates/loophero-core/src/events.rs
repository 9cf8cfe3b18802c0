use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::observer::ScrollDirection;

/// Every state change in the observer produces an Event.
/// The CLI prints them; embedders forward them to their UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Observer is live and its status indicator is showing.
    ObserverStarted {
        threshold: u32,
        at: DateTime<Utc>,
    },
    SwipeCounted {
        app: String,
        direction: ScrollDirection,
        count: u32,
        at: DateTime<Utc>,
    },
    /// Same gesture as the last counted swipe.
    SwipeDebounced {
        app: String,
        since_last_ms: i64,
        at: DateTime<Utc>,
    },
    /// The user left the monitored apps; the count was zeroed.
    CounterReset {
        app: String,
        previous_count: u32,
        at: DateTime<Utc>,
    },
    ThresholdReached {
        count: u32,
        threshold: u32,
        at: DateTime<Utc>,
    },
    AlertPosted {
        notification_id: i32,
        message_index: usize,
        title: String,
        at: DateTime<Utc>,
    },
    /// Threshold was reached but the alert surface rejected the post.
    AlertDropped {
        at: DateTime<Utc>,
    },
    ObserverStopped {
        at: DateTime<Utc>,
    },
}
