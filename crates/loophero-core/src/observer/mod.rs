mod classifier;
mod counter;
mod event;
mod service;

pub use classifier::{
    classify, is_monitored, rule_for, MonitoredAppRule, ScrollSignal, MONITORED_APPS,
};
pub use counter::{
    CounterConfig, CounterOutcome, CounterState, CounterUpdate, ScrollCounter, DEBOUNCE_WINDOW_MS,
    NOISE_FLOOR,
};
pub use event::{EventType, ObservedEvent, ScrollDirection};
pub use service::{ObserverStats, ScrollObserver};
