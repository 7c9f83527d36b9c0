//! Domain model for cashbook entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::month::{opt_month, Month};

/// Distinguishes money coming in from money going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// A single dated entry in the resident year's ledger.
///
/// Entries carry no stable identifier; they are addressed by position within
/// the resident year's list, so indexes shift on insert and delete. The serde
/// shape matches the stored year documents: the kind is stored under `type`,
/// an unset month is the empty string, and `edited` is omitted until the
/// entry is first modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub category: String,
    #[serde(default, with = "opt_month")]
    pub month: Option<Month>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub edited: bool,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: EntryKind,
        category: impl Into<String>,
        month: Option<Month>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            month,
            edited: false,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
