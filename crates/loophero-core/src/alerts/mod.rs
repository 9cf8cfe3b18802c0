//! Threshold alerts: message pool, dispatch, and notification surfaces.

mod dispatcher;
mod pool;
mod sink;

pub use dispatcher::{AlertDispatcher, FiredAlert, PoolSource};
pub use pool::{AlertMessage, AlertMessagePool};
pub use sink::{
    AlertSink, JsonLinesSink, LogSink, MemorySink, Notification, ALERT_CHANNEL_ID,
    ALERT_NOTIFICATION_ID, ALERT_VIBRATION_PATTERN, STATUS_CHANNEL_ID, STATUS_NOTIFICATION_ID,
};
