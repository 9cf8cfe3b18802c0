//! Raw platform notifications as the observer receives them.

use serde::{Deserialize, Serialize};

/// Platform event category. Only scroll changes are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[default]
    ViewScrolled,
    WindowStateChanged,
    #[serde(other)]
    Other,
}

/// One scroll-change notification delivered by the platform hook.
///
/// Transient: consumed synchronously by the observer and never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedEvent {
    #[serde(rename = "packageIdentifier", alias = "source_app")]
    pub source_app: String,
    #[serde(rename = "elementClassName", alias = "source_element_kind")]
    pub source_element_kind: String,
    #[serde(rename = "scrollDeltaY", alias = "vertical_delta", default)]
    pub vertical_delta: i32,
    /// Monotonic platform time in milliseconds.
    #[serde(rename = "eventTime", alias = "timestamp_millis")]
    pub timestamp_millis: i64,
    #[serde(rename = "eventType", alias = "event_type", default)]
    pub event_type: EventType,
}

impl ObservedEvent {
    /// Build a scroll event.
    pub fn scrolled(
        source_app: impl Into<String>,
        source_element_kind: impl Into<String>,
        vertical_delta: i32,
        timestamp_millis: i64,
    ) -> Self {
        Self {
            source_app: source_app.into(),
            source_element_kind: source_element_kind.into(),
            vertical_delta,
            timestamp_millis,
            event_type: EventType::ViewScrolled,
        }
    }

    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn is_scroll(&self) -> bool {
        self.event_type == EventType::ViewScrolled
    }

    pub fn direction(&self) -> ScrollDirection {
        ScrollDirection::from_delta(self.vertical_delta)
    }
}

/// Sign of a vertical scroll. Informational only: both directions count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Up,
    Down,
    Stationary,
}

impl ScrollDirection {
    pub fn from_delta(delta: i32) -> Self {
        match delta.signum() {
            1 => ScrollDirection::Up,
            -1 => ScrollDirection::Down,
            _ => ScrollDirection::Stationary,
        }
    }
}
