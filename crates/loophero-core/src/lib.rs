//! # LoopHero Core Library
//!
//! Counts vertical "reel swipes" inside short-video apps from a stream of
//! platform scroll notifications and raises a local alert once a configured
//! threshold is reached. The platform hook, UI, and permission flows live
//! outside this crate; they feed [`ObservedEvent`]s in and read/write
//! [`Settings`].
//!
//! ## Architecture
//!
//! - **Observer**: classifier, debounced counter, and the [`ScrollObserver`]
//!   that ties them to a lifecycle. Processing is synchronous, one event at
//!   a time, in delivery order.
//! - **Alerts**: random message selection and notification surfaces.
//! - **Storage**: TOML settings shared with the UI.
//!
//! ## Key Components
//!
//! - [`ScrollObserver`]: event pipeline entry point
//! - [`ScrollCounter`]: debounce/threshold state machine
//! - [`AlertDispatcher`]: one-shot alerts
//! - [`SettingsStore`]: persisted threshold and onboarding flag

pub mod alerts;
pub mod error;
pub mod events;
pub mod observer;
pub mod storage;

pub use alerts::{AlertDispatcher, AlertMessagePool, AlertSink, Notification};
pub use error::{AlertError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use observer::{
    classify, CounterState, ObservedEvent, ObserverStats, ScrollCounter, ScrollObserver,
    ScrollSignal,
};
pub use storage::{FileSettingsStore, MemorySettingsStore, Settings, SettingsStore};
