//! Notification surfaces.
//!
//! The platform alerting surface sits behind [`AlertSink`]. Posting with an
//! id that is already displayed replaces that notification.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::AlertError;

/// Channel for threshold alerts.
pub const ALERT_CHANNEL_ID: &str = "loophero_alerts";
/// Channel for the persistent "observer active" indicator.
pub const STATUS_CHANNEL_ID: &str = "loophero_status";
/// Every threshold alert uses this slot.
pub const ALERT_NOTIFICATION_ID: i32 = 0;
pub const STATUS_NOTIFICATION_ID: i32 = 33;
/// Off/on pairs in milliseconds.
pub const ALERT_VIBRATION_PATTERN: [u64; 4] = [0, 500, 200, 500];

/// A notification as handed to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i32,
    pub channel_id: String,
    pub title: String,
    pub body: String,
    pub auto_cancel: bool,
    /// Persistent, not user-dismissible.
    pub ongoing: bool,
    #[serde(default)]
    pub vibration_pattern: Vec<u64>,
}

impl Notification {
    /// A one-shot threshold alert.
    pub fn alert(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: ALERT_NOTIFICATION_ID,
            channel_id: ALERT_CHANNEL_ID.to_string(),
            title: title.into(),
            body: body.into(),
            auto_cancel: true,
            ongoing: false,
            vibration_pattern: ALERT_VIBRATION_PATTERN.to_vec(),
        }
    }

    /// The foreground status indicator shown while the observer runs.
    pub fn status() -> Self {
        Self {
            id: STATUS_NOTIFICATION_ID,
            channel_id: STATUS_CHANNEL_ID.to_string(),
            title: "LoopHero is watching".to_string(),
            body: "Counting reel swipes in the background.".to_string(),
            auto_cancel: false,
            ongoing: true,
            vibration_pattern: Vec::new(),
        }
    }
}

pub trait AlertSink: Send {
    fn post(&mut self, notification: &Notification) -> Result<(), AlertError>;

    /// Remove a displayed notification. Surfaces without dismissal ignore it.
    fn cancel(&mut self, _id: i32) -> Result<(), AlertError> {
        Ok(())
    }
}

/// Writes notifications to the log instead of a platform surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AlertSink for LogSink {
    fn post(&mut self, notification: &Notification) -> Result<(), AlertError> {
        tracing::info!(
            id = notification.id,
            channel = %notification.channel_id,
            title = %notification.title,
            "notification posted"
        );
        Ok(())
    }

    fn cancel(&mut self, id: i32) -> Result<(), AlertError> {
        tracing::info!(id, "notification cancelled");
        Ok(())
    }
}

/// Emits each notification as one JSON line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[derive(Serialize)]
struct NotificationLine<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    notification: &'a Notification,
}

impl<W: Write + Send> AlertSink for JsonLinesSink<W> {
    fn post(&mut self, notification: &Notification) -> Result<(), AlertError> {
        let line = NotificationLine {
            kind: "NotificationPosted",
            notification,
        };
        let json = serde_json::to_string(&line)
            .map_err(|e| AlertError::Unavailable(e.to_string()))?;
        writeln!(self.writer, "{json}").map_err(|source| AlertError::PostFailed {
            id: notification.id,
            source,
        })
    }

    fn cancel(&mut self, id: i32) -> Result<(), AlertError> {
        writeln!(self.writer, r#"{{"type":"NotificationCancelled","id":{id}}}"#)
            .map_err(|source| AlertError::PostFailed { id, source })
    }
}

#[derive(Debug, Default)]
struct Tray {
    active: BTreeMap<i32, Notification>,
    history: Vec<Notification>,
    unavailable: bool,
}

/// In-memory notification tray. Clones share the same tray.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    tray: Arc<Mutex<Tray>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent post fail, as if the surface went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.tray.lock().unavailable = unavailable;
    }

    /// Notifications currently displayed, ordered by id.
    pub fn active(&self) -> Vec<Notification> {
        self.tray.lock().active.values().cloned().collect()
    }

    pub fn active_by_id(&self, id: i32) -> Option<Notification> {
        self.tray.lock().active.get(&id).cloned()
    }

    /// Every notification ever posted, in order.
    pub fn history(&self) -> Vec<Notification> {
        self.tray.lock().history.clone()
    }

    pub fn alerts_posted(&self) -> usize {
        self.tray
            .lock()
            .history
            .iter()
            .filter(|n| n.channel_id == ALERT_CHANNEL_ID)
            .count()
    }
}

impl AlertSink for MemorySink {
    fn post(&mut self, notification: &Notification) -> Result<(), AlertError> {
        let mut tray = self.tray.lock();
        if tray.unavailable {
            return Err(AlertError::Unavailable("tray disabled".to_string()));
        }
        tray.active.insert(notification.id, notification.clone());
        tray.history.push(notification.clone());
        Ok(())
    }

    fn cancel(&mut self, id: i32) -> Result<(), AlertError> {
        self.tray.lock().active.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_uses_fixed_slot_and_pattern() {
        let n = Notification::alert("t", "b");
        assert_eq!(n.id, 0);
        assert_eq!(n.channel_id, ALERT_CHANNEL_ID);
        assert!(n.auto_cancel);
        assert!(!n.ongoing);
        assert_eq!(n.vibration_pattern, vec![0, 500, 200, 500]);
    }

    #[test]
    fn memory_sink_replaces_same_id() {
        let mut sink = MemorySink::new();
        sink.post(&Notification::alert("first", "a")).unwrap();
        sink.post(&Notification::alert("second", "b")).unwrap();
        sink.post(&Notification::status()).unwrap();

        let active = sink.active();
        assert_eq!(active.len(), 2);
        assert_eq!(sink.active_by_id(0).unwrap().title, "second");
        assert_eq!(sink.history().len(), 3);
        assert_eq!(sink.alerts_posted(), 2);

        sink.cancel(STATUS_NOTIFICATION_ID).unwrap();
        assert!(sink.active_by_id(STATUS_NOTIFICATION_ID).is_none());
    }

    #[test]
    fn memory_sink_can_fail() {
        let mut sink = MemorySink::new();
        sink.set_unavailable(true);
        assert!(sink.post(&Notification::alert("t", "b")).is_err());
        assert!(sink.history().is_empty());
    }

    #[test]
    fn json_lines_sink_writes_one_line_per_post() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.post(&Notification::alert("Hi", "There")).unwrap();
        sink.cancel(33).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let posted: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(posted["type"], "NotificationPosted");
        assert_eq!(posted["title"], "Hi");
        assert_eq!(posted["vibration_pattern"][1], 500);

        let cancelled: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(cancelled["id"], 33);
    }
}
