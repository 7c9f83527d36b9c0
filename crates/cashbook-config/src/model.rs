use serde::{Deserialize, Serialize};

/// Last-used entry defaults remembered on this device.
///
/// These prepopulate the next entry form and are scoped to the device, not
/// the user account; signing in elsewhere starts from empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDefaults {
    #[serde(default)]
    pub last_entry_category: String,
    #[serde(default)]
    pub last_entry_month: String,
}

impl EntryDefaults {
    pub fn is_empty(&self) -> bool {
        self.last_entry_category.is_empty() && self.last_entry_month.is_empty()
    }
}
