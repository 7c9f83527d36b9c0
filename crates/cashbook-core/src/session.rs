//! Session orchestration: the command surface a presentation adapter drives.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Datelike;

use cashbook_domain::{Cashbook, Month, Transaction};

use crate::category_service::CategoryService;
use crate::error::CoreResult;
use crate::prefs::{self, PreferenceStore};
use crate::projection::{self, PageView};
use crate::store::DocumentStore;
use crate::sync::DocumentSync;
use crate::time::{Clock, SystemClock};
use crate::transaction_service::{EntryDraft, TransactionService};
use crate::year_service::YearService;

/// Default values to prepopulate the next entry form with: the last-used
/// category and month remembered on this device.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryPrefill {
    pub category: Option<String>,
    pub month: Option<Month>,
}

/// One user's cashbook session.
///
/// Owns the in-memory [`Cashbook`], the sync layer, the device-local
/// preferences, the current page, and the row selection. Every mutation
/// follows the same shape: validate, mutate in memory, persist the affected
/// document. Mutations are atomic in memory but not transactional with
/// persistence; a failed save leaves memory ahead of the store until the
/// next successful save, and `reload` is the host's reconcile hook.
///
/// While signed out the session is inert: mutations return `Ok` without
/// doing anything, matching the remote store's behavior.
pub struct CashbookSession {
    sync: DocumentSync,
    prefs: Box<dyn PreferenceStore>,
    clock: Arc<dyn Clock>,
    cashbook: Cashbook,
    page: usize,
    selection: BTreeSet<usize>,
}

impl CashbookSession {
    pub fn new(store: Arc<dyn DocumentStore>, prefs: Box<dyn PreferenceStore>) -> Self {
        Self::with_clock(store, prefs, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn DocumentStore>,
        prefs: Box<dyn PreferenceStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sync: DocumentSync::new(store),
            prefs,
            clock,
            cashbook: Cashbook::new(),
            page: 1,
            selection: BTreeSet::new(),
        }
    }

    pub fn cashbook(&self) -> &Cashbook {
        &self.cashbook
    }

    pub fn is_signed_in(&self) -> bool {
        self.sync.is_signed_in()
    }

    pub fn user(&self) -> Option<&str> {
        self.sync.user()
    }

    // --- auth boundary ---

    /// Establishes the signed-in user and loads (or seeds) their documents.
    pub fn sign_in(&mut self, user_id: impl Into<String>) -> CoreResult<()> {
        self.sync.set_user(Some(user_id.into()));
        self.reload()
    }

    /// Clears all in-memory state. A hard boundary: nothing persists after
    /// this, and every operation stays inert until the next sign-in.
    pub fn sign_out(&mut self) {
        self.sync.set_user(None);
        self.cashbook.clear();
        self.page = 1;
        self.selection.clear();
    }

    /// Loads the settings document (seeding it on first access) and the
    /// current year's transactions (materializing that year's document when
    /// absent). The host's reconcile hook after a failed persist.
    pub fn reload(&mut self) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        let default_year = self.clock.today().year();
        let meta = self.sync.load_meta_or_seed(default_year)?;
        self.cashbook.apply_meta(meta, default_year);
        if let Some(year) = self.cashbook.current_year() {
            let transactions = self.sync.load_year_or_seed(year)?;
            self.cashbook.set_transactions(transactions);
        }
        self.page = 1;
        self.selection.clear();
        Ok(())
    }

    fn persist_meta(&self) -> CoreResult<()> {
        self.sync.save_meta(&self.cashbook.to_meta())
    }

    fn persist_transactions(&self) -> CoreResult<()> {
        match self.cashbook.current_year() {
            Some(year) => self.sync.save_year(year, self.cashbook.transactions()),
            None => Ok(()),
        }
    }

    // --- years ---

    /// Adds a 4-digit year, makes it current, and loads its (empty)
    /// transaction document.
    pub fn add_year(&mut self, year: i32) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        YearService::add(&mut self.cashbook, year)?;
        self.persist_meta()?;
        let transactions = self.sync.load_year_or_seed(year)?;
        self.cashbook.set_transactions(transactions);
        self.page = 1;
        self.selection.clear();
        Ok(())
    }

    /// Switches to another year, discarding the resident transactions (they
    /// were persisted by the mutation that created them) and loading the
    /// selected year's document.
    pub fn select_year(&mut self, year: i32) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        YearService::select(&mut self.cashbook, year)?;
        self.persist_meta()?;
        let transactions = self.sync.load_year_or_seed(year)?;
        self.cashbook.set_transactions(transactions);
        self.page = 1;
        self.selection.clear();
        Ok(())
    }

    // --- filters ---

    pub fn set_month_filter(&mut self, month: Option<Month>) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        self.cashbook.set_filter_month(month);
        self.selection.clear();
        self.persist_meta()
    }

    pub fn set_category_filter(&mut self, category: impl Into<String>) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        self.cashbook.set_filter_category(category);
        self.selection.clear();
        self.persist_meta()
    }

    pub fn clear_filters(&mut self) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        self.cashbook.clear_filters();
        self.selection.clear();
        self.persist_meta()
    }

    pub fn set_current_month(&mut self, month: Option<Month>) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        self.cashbook.set_current_month(month);
        self.persist_meta()
    }

    // --- categories ---

    pub fn add_category(&mut self, name: &str) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        CategoryService::add(&mut self.cashbook, name)?;
        self.persist_meta()
    }

    pub fn rename_category(&mut self, index: usize, new_name: &str) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        CategoryService::rename(&mut self.cashbook, index, new_name)?;
        self.persist_meta()
    }

    /// Deletes a category and blanks its resident references; persists both
    /// the settings document and the current year.
    pub fn delete_category(&mut self, index: usize) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        CategoryService::remove(&mut self.cashbook, index)?;
        self.persist_meta()?;
        self.persist_transactions()
    }

    // --- transactions ---

    /// Appends a new entry and remembers its category and resolved month as
    /// the device-local defaults for the next entry form.
    pub fn add_transaction(&mut self, draft: EntryDraft) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        let category = draft.category.clone();
        let month = TransactionService::add(&mut self.cashbook, draft)?;
        self.prefs.set(prefs::LAST_ENTRY_CATEGORY, &category);
        self.prefs.set(prefs::LAST_ENTRY_MONTH, month.name());
        self.persist_transactions()
    }

    pub fn edit_transaction(&mut self, index: usize, draft: EntryDraft) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        TransactionService::edit(&mut self.cashbook, index, draft)?;
        self.persist_transactions()
    }

    pub fn delete_transaction(&mut self, index: usize) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        TransactionService::remove(&mut self.cashbook, index)?;
        self.selection.clear();
        self.persist_transactions()
    }

    /// Bulk delete by pre-deletion indexes; unknown indexes are ignored.
    pub fn delete_transactions(&mut self, indexes: &[usize]) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        let indexes: BTreeSet<usize> = indexes.iter().copied().collect();
        TransactionService::remove_many(&mut self.cashbook, &indexes);
        self.selection.clear();
        self.persist_transactions()
    }

    pub fn delete_all_transactions(&mut self) -> CoreResult<()> {
        if !self.is_signed_in() {
            return Ok(());
        }
        TransactionService::remove_all(&mut self.cashbook);
        self.selection.clear();
        self.persist_transactions()
    }

    // --- entry defaults ---

    /// The last-used category (if it still names a known category) and month
    /// (falling back to the session's current month) for prepopulating the
    /// next entry form.
    pub fn entry_prefill(&self) -> EntryPrefill {
        let category = self
            .prefs
            .get(prefs::LAST_ENTRY_CATEGORY)
            .filter(|name| self.cashbook.categories().iter().any(|c| c == name));
        let month = self
            .prefs
            .get(prefs::LAST_ENTRY_MONTH)
            .and_then(|name| Month::from_name(&name))
            .or_else(|| self.cashbook.current_month());
        EntryPrefill { category, month }
    }

    // --- paging, selection, projection ---

    pub fn page(&self) -> usize {
        self.page
    }

    /// Moves to `page` (1-based; clamped to at least 1 here, to the last
    /// page at projection time) and drops the selection.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
        self.selection.clear();
    }

    /// Projects the current view. The stored page is updated to the clamped
    /// value so the indicator and subsequent mutations agree on the page.
    pub fn project(&mut self) -> PageView {
        let view = projection::project(&self.cashbook, self.page);
        self.page = view.page;
        view
    }

    pub fn selection(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    /// Replaces the selection with row indexes from the current projection.
    pub fn set_selection(&mut self, indexes: impl IntoIterator<Item = usize>) {
        self.selection = indexes.into_iter().collect();
    }

    pub fn toggle_selected(&mut self, index: usize) {
        if !self.selection.remove(&index) {
            self.selection.insert(index);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Rows for the export path: the selected entries when any are selected,
    /// else every resident entry.
    pub fn export_rows(&self) -> Vec<Transaction> {
        if self.selection.is_empty() {
            self.cashbook.transactions().to_vec()
        } else {
            self.selection
                .iter()
                .filter_map(|&index| self.cashbook.transaction_at(index))
                .cloned()
                .collect()
        }
    }
}
