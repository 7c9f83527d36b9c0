//! Read-modify-write protocol against the remote document store.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use cashbook_domain::{Meta, Transaction};

use crate::error::{CoreResult, StoreError};
use crate::store::DocumentStore;

/// Loads and saves ledger state to the per-user remote documents.
///
/// One document holds the cross-year settings ([`Meta`]), one document per
/// year holds that year's transactions under the `transactions` field. Every
/// save is write-through and whole-document for the affected array; there is
/// no partial or append write. All operations are inert while no user is
/// signed in: saves succeed without touching the store, loads yield the
/// absent value.
pub struct DocumentSync {
    store: Arc<dyn DocumentStore>,
    user: Option<String>,
}

impl DocumentSync {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, user: None }
    }

    /// Switches the persistence namespace to `user`, or detaches it.
    pub fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    fn meta_path(uid: &str) -> String {
        format!("users/{uid}/cashbook-meta/meta")
    }

    fn year_path(uid: &str, year: i32) -> String {
        format!("users/{uid}/cashbook/{year}")
    }

    /// Reads the settings document, or `None` when it does not exist yet
    /// (or no user is signed in).
    pub fn load_meta(&self) -> CoreResult<Option<Meta>> {
        let Some(uid) = self.user.as_deref() else {
            return Ok(None);
        };
        let Some(value) = self.store.get(&Self::meta_path(uid))? else {
            return Ok(None);
        };
        let meta = serde_json::from_value(value)
            .map_err(|err| StoreError::Serde(err.to_string()))?;
        Ok(Some(meta))
    }

    /// Merge-writes the complete settings document.
    pub fn save_meta(&self, meta: &Meta) -> CoreResult<()> {
        let Some(uid) = self.user.as_deref() else {
            return Ok(());
        };
        let fields =
            serde_json::to_value(meta).map_err(|err| StoreError::Serde(err.to_string()))?;
        debug!(user = uid, "saving meta document");
        self.store.set_merge(&Self::meta_path(uid), fields)?;
        Ok(())
    }

    /// Reads the settings document, seeding and persisting the defaults when
    /// it does not exist yet. The first-ever read therefore triggers a write.
    pub fn load_meta_or_seed(&self, default_year: i32) -> CoreResult<Meta> {
        if let Some(meta) = self.load_meta()? {
            return Ok(meta);
        }
        let meta = Meta::seeded(default_year);
        if self.is_signed_in() {
            warn!(year = default_year, "meta document missing, seeding defaults");
            self.save_meta(&meta)?;
        }
        Ok(meta)
    }

    /// Reads the transactions for `year`, or `None` when that year's
    /// document does not exist (or no user is signed in). A document present
    /// without a `transactions` field yields an empty list.
    pub fn load_year(&self, year: i32) -> CoreResult<Option<Vec<Transaction>>> {
        let Some(uid) = self.user.as_deref() else {
            return Ok(None);
        };
        let Some(value) = self.store.get(&Self::year_path(uid, year))? else {
            return Ok(None);
        };
        let transactions = match value.get("transactions") {
            Some(field) => serde_json::from_value(field.clone())
                .map_err(|err| StoreError::Serde(err.to_string()))?,
            None => Vec::new(),
        };
        Ok(Some(transactions))
    }

    /// Merge-writes the whole transaction array for `year`.
    pub fn save_year(&self, year: i32, transactions: &[Transaction]) -> CoreResult<()> {
        let Some(uid) = self.user.as_deref() else {
            return Ok(());
        };
        let mut fields = Map::new();
        fields.insert(
            "transactions".to_string(),
            serde_json::to_value(transactions)
                .map_err(|err| StoreError::Serde(err.to_string()))?,
        );
        debug!(user = uid, year, count = transactions.len(), "saving year document");
        self.store
            .set_merge(&Self::year_path(uid, year), Value::Object(fields))?;
        Ok(())
    }

    /// Reads the transactions for `year`, materializing an empty year
    /// document when it does not exist yet.
    pub fn load_year_or_seed(&self, year: i32) -> CoreResult<Vec<Transaction>> {
        if let Some(transactions) = self.load_year(year)? {
            return Ok(transactions);
        }
        if self.is_signed_in() {
            self.save_year(year, &[])?;
        }
        Ok(Vec::new())
    }
}
