use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::warn;

use cashbook_core::prefs::{PreferenceStore, LAST_ENTRY_CATEGORY, LAST_ENTRY_MONTH};

use crate::{ConfigError, EntryDefaults};

const TMP_SUFFIX: &str = "tmp";

/// Handles persistence for [`EntryDefaults`] and adapts them to the core's
/// [`PreferenceStore`] contract.
///
/// Preference writes are fire-and-forget: a failed disk write is logged and
/// swallowed so the mutation that triggered it still succeeds.
#[derive(Debug)]
pub struct PreferencesManager {
    prefs_path: PathBuf,
    defaults: EntryDefaults,
}

impl PreferencesManager {
    pub fn new(prefs_path: PathBuf) -> Result<Self, ConfigError> {
        let defaults = load_defaults(&prefs_path)?;
        Ok(Self {
            prefs_path,
            defaults,
        })
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Self::new(base.join("preferences.json"))
    }

    /// The platform config directory for the cashbook
    /// (`~/.config/cashbook` or the OS equivalent).
    pub fn default_base_dir() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("cashbook")
    }

    pub fn prefs_path(&self) -> &Path {
        &self.prefs_path
    }

    pub fn defaults(&self) -> &EntryDefaults {
        &self.defaults
    }

    pub fn load(&self) -> Result<EntryDefaults, ConfigError> {
        load_defaults(&self.prefs_path)
    }

    pub fn save(&self, defaults: &EntryDefaults) -> Result<(), ConfigError> {
        if let Some(parent) = self.prefs_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(defaults)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.prefs_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.prefs_path)?;
        Ok(())
    }
}

impl PreferenceStore for PreferencesManager {
    fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            LAST_ENTRY_CATEGORY => &self.defaults.last_entry_category,
            LAST_ENTRY_MONTH => &self.defaults.last_entry_month,
            _ => return None,
        };
        if value.is_empty() {
            None
        } else {
            Some(value.clone())
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            LAST_ENTRY_CATEGORY => self.defaults.last_entry_category = value.to_string(),
            LAST_ENTRY_MONTH => self.defaults.last_entry_month = value.to_string(),
            _ => return,
        }
        if let Err(err) = self.save(&self.defaults) {
            warn!(key, error = %err, "failed to persist entry defaults");
        }
    }
}

fn load_defaults(path: &Path) -> Result<EntryDefaults, ConfigError> {
    if path.exists() {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
    } else {
        Ok(EntryDefaults::default())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
