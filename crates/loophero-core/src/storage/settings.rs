//! TOML-based user settings.
//!
//! Stores:
//! - Swipe threshold (`numericInput`)
//! - Onboarding flag (`firstSetup`, true until setup completes)
//! - Dropdown selection (`dropdownValue`, kept for the UI only)
//!
//! Settings are stored at `~/.config/loophero/settings.toml`.

use std::path::{Path, PathBuf};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::data_dir;
use crate::error::{ConfigError, Result, ValidationError};

pub const MIN_SWIPE_THRESHOLD: u32 = 4;
pub const MAX_SWIPE_THRESHOLD: u32 = 40;
pub const DEFAULT_SWIPE_THRESHOLD: u32 = 10;

const SETTINGS_FILE: &str = "settings.toml";

/// Persisted settings shared by the UI and the observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "numericInput", default = "default_swipe_threshold")]
    pub swipe_threshold: u32,
    /// Onboarding still pending.
    #[serde(rename = "firstSetup", default = "default_true")]
    pub first_setup: bool,
    #[serde(rename = "dropdownValue", default)]
    pub dropdown_value: i32,
}

fn default_swipe_threshold() -> u32 {
    DEFAULT_SWIPE_THRESHOLD
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            first_setup: true,
            dropdown_value: 0,
        }
    }
}

/// Check a threshold against the range the UI slider allows.
pub fn validate_swipe_threshold(value: u32) -> Result<u32> {
    if (MIN_SWIPE_THRESHOLD..=MAX_SWIPE_THRESHOLD).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field: "numericInput".to_string(),
            value: value as i64,
            min: MIN_SWIPE_THRESHOLD as i64,
            max: MAX_SWIPE_THRESHOLD as i64,
        }
        .into())
    }
}

impl Settings {
    pub fn first_setup_done(&self) -> bool {
        !self.first_setup
    }

    /// Threshold clamped into the slider range. Hand-edited files can hold
    /// anything; a zero threshold would fire on every event.
    pub fn effective_swipe_threshold(&self) -> u32 {
        self.swipe_threshold
            .clamp(MIN_SWIPE_THRESHOLD, MAX_SWIPE_THRESHOLD)
    }

    /// Get a value as string by its stored key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        json.get(key).map(|v| v.to_string())
    }

    /// Set a value by its stored key, parsing `value` to the key's type.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not parse, or
    /// the threshold falls outside 4..=40.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<i64>()
                    .map_err(|e| invalid(e.to_string()))?
                    .into(),
            ),
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(key.to_string(), new_value);

        let updated: Settings =
            serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        validate_swipe_threshold(updated.swipe_threshold)?;
        *self = updated;
        Ok(())
    }

    /// Stored keys in file order.
    pub fn keys() -> [&'static str; 3] {
        ["numericInput", "firstSetup", "dropdownValue"]
    }

    /// Read from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content).map_err(|e| {
                    ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }
                })?;
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }
}

/// Key/value access shared between the UI side and the observer.
///
/// Reads are infallible: the observer treats the store as an always
/// available local service.
pub trait SettingsStore: Send + Sync {
    fn snapshot(&self) -> Settings;

    fn update(&self, apply: &mut dyn FnMut(&mut Settings) -> Result<()>) -> Result<()>;

    /// Current threshold, read fresh on every call.
    fn swipe_threshold(&self) -> u32 {
        self.snapshot().effective_swipe_threshold()
    }

    fn set_swipe_threshold(&self, value: u32) -> Result<()> {
        let value = validate_swipe_threshold(value)?;
        self.update(&mut |s: &mut Settings| {
            s.swipe_threshold = value;
            Ok(())
        })
    }

    fn first_setup_done(&self) -> bool {
        self.snapshot().first_setup_done()
    }

    fn set_first_setup_done(&self, done: bool) -> Result<()> {
        self.update(&mut |s: &mut Settings| {
            s.first_setup = !done;
            Ok(())
        })
    }
}

/// Settings held in memory only.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    pub fn with_threshold(threshold: u32) -> Self {
        Self::new(Settings {
            swipe_threshold: threshold,
            ..Settings::default()
        })
    }
}

impl SettingsStore for MemorySettingsStore {
    fn snapshot(&self) -> Settings {
        self.settings.read().clone()
    }

    fn update(&self, apply: &mut dyn FnMut(&mut Settings) -> Result<()>) -> Result<()> {
        let mut guard = self.settings.write();
        let mut next = guard.clone();
        apply(&mut next)?;
        *guard = next;
        Ok(())
    }
}

#[derive(Debug)]
struct Cached {
    settings: Settings,
    fingerprint: Option<String>,
}

/// Settings file with write-through caching.
///
/// Reads hash the file and reload it when another process changed it, so
/// a threshold saved by the UI reaches a running observer on its next event.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    cache: RwLock<Cached>,
}

impl FileSettingsStore {
    /// Open `settings.toml` in the data directory.
    pub fn open() -> Result<Self> {
        Self::open_at(data_dir()?.join(SETTINGS_FILE))
    }

    /// Open a settings file at an explicit path. A missing file yields
    /// defaults and is created on the first write.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = Settings::load_from(&path)?;
        let fingerprint = fingerprint(&path);
        Ok(Self {
            path,
            cache: RwLock::new(Cached {
                settings,
                fingerprint,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file contents with defaults.
    pub fn reset(&self) -> Result<()> {
        self.update(&mut |s: &mut Settings| {
            *s = Settings::default();
            Ok(())
        })
    }

    fn refresh(&self) {
        let on_disk = fingerprint(&self.path);
        if on_disk == self.cache.read().fingerprint {
            return;
        }
        match Settings::load_from(&self.path) {
            Ok(settings) => {
                let mut cache = self.cache.write();
                cache.settings = settings;
                cache.fingerprint = on_disk;
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "keeping last good settings"
                );
            }
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn snapshot(&self) -> Settings {
        self.refresh();
        self.cache.read().settings.clone()
    }

    fn update(&self, apply: &mut dyn FnMut(&mut Settings) -> Result<()>) -> Result<()> {
        self.refresh();
        let mut cache = self.cache.write();
        let mut next = cache.settings.clone();
        apply(&mut next)?;
        next.save_to(&self.path)?;
        cache.settings = next;
        cache.fingerprint = fingerprint(&self.path);
        Ok(())
    }
}

/// Content hash of the settings file. Timestamps are too coarse on some
/// filesystems to tell two quick writes apart.
fn fingerprint(path: &Path) -> Option<String> {
    let content = std::fs::read(path).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Some(format!("{:x}", hasher.finalize()))
}
