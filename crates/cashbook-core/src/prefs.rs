//! Device-local persistence of small key→string preferences.

use std::collections::HashMap;

/// Preference key for the category used by the most recent entry.
pub const LAST_ENTRY_CATEGORY: &str = "lastEntryCategory";
/// Preference key for the month used by the most recent entry.
pub const LAST_ENTRY_MONTH: &str = "lastEntryMonth";

/// Simple key→string persistence scoped to the device. Values survive
/// sessions but are not shared across the user's account.
///
/// Writes are fire-and-forget; implementations that persist to disk handle
/// failures internally rather than failing the mutation that triggered the
/// write.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory preferences, for hosts without durable device storage.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    entries: HashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}
