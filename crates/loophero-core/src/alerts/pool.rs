//! Alert message pool.
//!
//! Messages are stored as parallel title/body arrays, matching how the
//! platform resource bundles ship them. Custom pools are read from TOML:
//!
//! ```toml
//! [[messages]]
//! title = "Time to look up"
//! body = "That was a lot of reels."
//! ```

use std::path::Path;

use once_cell::sync::Lazy;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, ValidationError};

/// One title/body pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMessage {
    pub title: String,
    pub body: String,
}

static BUILTIN_MESSAGES: Lazy<AlertMessagePool> = Lazy::new(|| AlertMessagePool {
    titles: vec![
        "Loop detected".to_string(),
        "Still scrolling?".to_string(),
        "Hero check-in".to_string(),
        "Thumb break".to_string(),
        "Reel limit reached".to_string(),
    ],
    bodies: vec![
        "You just hit your swipe limit. Put the phone down for a minute.".to_string(),
        "That's a lot of reels in a row. Is this still fun?".to_string(),
        "Breaking the loop is the heroic move. Try it now.".to_string(),
        "Your thumb has earned a rest. Look at something far away.".to_string(),
        "You set this limit for a reason. Time to close the feed.".to_string(),
    ],
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessagePool {
    titles: Vec<String>,
    bodies: Vec<String>,
}

#[derive(Deserialize)]
struct PoolFile {
    #[serde(default)]
    messages: Vec<AlertMessage>,
}

impl AlertMessagePool {
    /// Build a pool from parallel arrays.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrays are empty or differ in length.
    pub fn from_parallel(titles: Vec<String>, bodies: Vec<String>) -> Result<Self> {
        if titles.len() != bodies.len() {
            return Err(ValidationError::MismatchedPairs {
                titles: titles.len(),
                bodies: bodies.len(),
            }
            .into());
        }
        if titles.is_empty() {
            return Err(ValidationError::EmptyCollection("alert messages".to_string()).into());
        }
        Ok(Self { titles, bodies })
    }

    pub fn from_messages(messages: Vec<AlertMessage>) -> Result<Self> {
        let (titles, bodies): (Vec<String>, Vec<String>) = messages
            .into_iter()
            .map(|m| (m.title, m.body))
            .unzip();
        Self::from_parallel(titles, bodies)
    }

    /// The pool bundled with the crate.
    pub fn builtin() -> Self {
        BUILTIN_MESSAGES.clone()
    }

    /// Parse a TOML messages document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: PoolFile = toml::from_str(content).map_err(ConfigError::from)?;
        Self::from_messages(file.messages)
    }

    /// Read a TOML messages file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// holds no messages.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<AlertMessage> {
        Some(AlertMessage {
            title: self.titles.get(index)?.clone(),
            body: self.bodies.get(index)?.clone(),
        })
    }

    /// Draw one pair uniformly at random by index.
    pub fn pick(&self, rng: &mut dyn RngCore) -> Option<(usize, AlertMessage)> {
        if self.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.len());
        self.get(index).map(|message| (index, message))
    }
}

impl Default for AlertMessagePool {
    fn default() -> Self {
        Self::builtin()
    }
}
