//! Threshold alert dispatch.
//!
//! The dispatcher owns the notification surface and the random source. The
//! message pool is loaded on the first [`AlertDispatcher::fire`] and kept for
//! the dispatcher's lifetime.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use rand::{RngCore, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use super::pool::{AlertMessage, AlertMessagePool};
use super::sink::{AlertSink, Notification, STATUS_NOTIFICATION_ID};

/// Where the message pool comes from.
#[derive(Debug, Clone)]
pub enum PoolSource {
    Builtin,
    /// TOML messages file; falls back to the built-in pool if unusable.
    File(PathBuf),
    Fixed(AlertMessagePool),
}

/// An alert that reached the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredAlert {
    pub message_index: usize,
    pub notification: Notification,
}

pub struct AlertDispatcher {
    sink: Box<dyn AlertSink>,
    rng: Box<dyn RngCore + Send>,
    source: PoolSource,
    pool: OnceCell<AlertMessagePool>,
}

impl AlertDispatcher {
    /// Dispatcher with the built-in pool and an entropy-seeded RNG.
    pub fn new(sink: impl AlertSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            rng: Box::new(Mcg128Xsl64::from_entropy()),
            source: PoolSource::Builtin,
            pool: OnceCell::new(),
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(Mcg128Xsl64::seed_from_u64(seed))
    }

    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_pool_source(mut self, source: PoolSource) -> Self {
        self.source = source;
        self.pool = OnceCell::new();
        self
    }

    /// Whether the pool has been loaded yet.
    pub fn pool_loaded(&self) -> bool {
        self.pool.get().is_some()
    }

    /// Post one randomly chosen alert.
    ///
    /// Never fails the caller. Returns `None` if the sink rejected the post.
    pub fn fire(&mut self) -> Option<FiredAlert> {
        let source = &self.source;
        let pool = self.pool.get_or_init(|| load_pool(source));
        let (message_index, AlertMessage { title, body }) = pool.pick(self.rng.as_mut())?;

        let notification = Notification::alert(title, body);
        match self.sink.post(&notification) {
            Ok(()) => {
                tracing::info!(message_index, title = %notification.title, "swipe alert posted");
                Some(FiredAlert {
                    message_index,
                    notification,
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "swipe alert dropped");
                None
            }
        }
    }

    /// Show the persistent "observer active" indicator.
    pub fn show_status(&mut self) -> Option<Notification> {
        let notification = Notification::status();
        match self.sink.post(&notification) {
            Ok(()) => Some(notification),
            Err(e) => {
                tracing::warn!(error = %e, "status indicator not shown");
                None
            }
        }
    }

    pub fn clear_status(&mut self) {
        if let Err(e) = self.sink.cancel(STATUS_NOTIFICATION_ID) {
            tracing::warn!(error = %e, "status indicator not cleared");
        }
    }
}

fn load_pool(source: &PoolSource) -> AlertMessagePool {
    match source {
        PoolSource::Builtin => AlertMessagePool::builtin(),
        PoolSource::Fixed(pool) => pool.clone(),
        PoolSource::File(path) => match AlertMessagePool::load(path) {
            Ok(pool) => {
                tracing::debug!(
                    path = %path.display(),
                    messages = pool.len(),
                    "loaded alert messages"
                );
                pool
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "using built-in alert messages");
                AlertMessagePool::builtin()
            }
        },
    }
}
