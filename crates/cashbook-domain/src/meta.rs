//! Wire model for the per-user settings document.

use serde::{Deserialize, Serialize};

use crate::month::{opt_month, Month};

/// Category taxonomy seeded for first-time users.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Food", "Transport", "Salary"];

/// Per-user cross-year settings, stored as a single remote document.
///
/// The list fields are `Option` so an absent field (fall back to the seeded
/// defaults) stays distinguishable from a present-but-empty list, which is
/// kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_year: Option<i32>,
    #[serde(default, with = "opt_month")]
    pub current_month: Option<Month>,
    #[serde(default, with = "opt_month")]
    pub filter_month: Option<Month>,
    #[serde(default)]
    pub filter_category: String,
}

impl Meta {
    /// The document seeded on first access for a brand-new user.
    pub fn seeded(default_year: i32) -> Self {
        Self {
            years: Some(vec![default_year]),
            categories: Some(
                DEFAULT_CATEGORIES
                    .iter()
                    .map(|category| category.to_string())
                    .collect(),
            ),
            current_year: Some(default_year),
            ..Self::default()
        }
    }
}
