//! The in-memory ledger state for one signed-in user.

use crate::meta::{Meta, DEFAULT_CATEGORIES};
use crate::month::Month;
use crate::transaction::Transaction;

/// Canonical in-memory state: the year/category taxonomy, the active filters,
/// and the resident year's transactions.
///
/// Only one year's transactions are resident at a time; loading another year
/// replaces them wholesale. Invariants held at every mutation boundary:
/// `years` is sorted ascending and duplicate-free, `categories` contains no
/// case-sensitive duplicates, and `current_year` is a member of `years` once
/// initialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cashbook {
    years: Vec<i32>,
    categories: Vec<String>,
    transactions: Vec<Transaction>,
    current_year: Option<i32>,
    current_month: Option<Month>,
    filter_month: Option<Month>,
    filter_category: String,
}

impl Cashbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn current_year(&self) -> Option<i32> {
        self.current_year
    }

    pub fn current_month(&self) -> Option<Month> {
        self.current_month
    }

    pub fn filter_month(&self) -> Option<Month> {
        self.filter_month
    }

    pub fn filter_category(&self) -> &str {
        &self.filter_category
    }

    /// Inserts a year keeping the list sorted. Returns `false` on duplicates.
    pub fn insert_year(&mut self, year: i32) -> bool {
        match self.years.binary_search(&year) {
            Ok(_) => false,
            Err(position) => {
                self.years.insert(position, year);
                true
            }
        }
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    pub fn set_current_year(&mut self, year: Option<i32>) {
        self.current_year = year;
    }

    pub fn set_current_month(&mut self, month: Option<Month>) {
        self.current_month = month;
    }

    pub fn set_filter_month(&mut self, month: Option<Month>) {
        self.filter_month = month;
    }

    pub fn set_filter_category(&mut self, category: impl Into<String>) {
        self.filter_category = category.into();
    }

    pub fn clear_filters(&mut self) {
        self.filter_month = None;
        self.filter_category.clear();
    }

    /// Appends a category. Returns `false` when the exact name already exists.
    pub fn push_category(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.categories.iter().any(|existing| *existing == name) {
            return false;
        }
        self.categories.push(name);
        true
    }

    pub fn category_at(&self, index: usize) -> Option<&str> {
        self.categories.get(index).map(String::as_str)
    }

    /// Replaces the category name at `index`. Returns `false` on a bad index.
    pub fn set_category_at(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.categories.get_mut(index) {
            Some(slot) => {
                *slot = name.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_category(&mut self, index: usize) -> Option<String> {
        if index < self.categories.len() {
            Some(self.categories.remove(index))
        } else {
            None
        }
    }

    /// Blanks the `category` field of every resident transaction tagged with
    /// `name`, returning how many were touched. Reaches the resident year
    /// only; other years' documents keep the old name until loaded.
    pub fn blank_category_references(&mut self, name: &str) -> usize {
        let mut touched = 0;
        for transaction in &mut self.transactions {
            if transaction.category == name {
                transaction.category.clear();
                touched += 1;
            }
        }
        touched
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn transaction_at(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Replaces the transaction at `index`. Returns `false` on a bad index.
    pub fn replace_transaction(&mut self, index: usize, transaction: Transaction) -> bool {
        match self.transactions.get_mut(index) {
            Some(slot) => {
                *slot = transaction;
                true
            }
            None => false,
        }
    }

    pub fn remove_transaction(&mut self, index: usize) -> Option<Transaction> {
        if index < self.transactions.len() {
            Some(self.transactions.remove(index))
        } else {
            None
        }
    }

    /// Removes every transaction whose pre-removal index satisfies `marked`,
    /// in one pass so surviving indexes never shift mid-removal.
    pub fn remove_transactions_where(&mut self, mut marked: impl FnMut(usize) -> bool) -> usize {
        let before = self.transactions.len();
        let mut index = 0;
        self.transactions.retain(|_| {
            let keep = !marked(index);
            index += 1;
            keep
        });
        before - self.transactions.len()
    }

    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Applies a loaded meta document, filling first-access defaults: absent
    /// `years` becomes `[default_year]`, absent `categories` becomes the
    /// seeded taxonomy, and an unset or unknown `current_year` falls back to
    /// the first year. Resident transactions are cleared; the caller loads
    /// the current year's document next.
    pub fn apply_meta(&mut self, meta: Meta, default_year: i32) {
        let mut years = meta.years.unwrap_or_else(|| vec![default_year]);
        years.sort_unstable();
        years.dedup();

        let mut categories = meta.categories.unwrap_or_else(|| {
            DEFAULT_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect()
        });
        dedup_preserving_order(&mut categories);

        let current_year = meta
            .current_year
            .filter(|year| years.binary_search(year).is_ok())
            .or_else(|| years.first().copied());

        self.years = years;
        self.categories = categories;
        self.current_year = current_year;
        self.current_month = meta.current_month;
        self.filter_month = meta.filter_month;
        self.filter_category = meta.filter_category;
        self.transactions.clear();
    }

    /// The complete settings document for persisting.
    pub fn to_meta(&self) -> Meta {
        Meta {
            years: Some(self.years.clone()),
            categories: Some(self.categories.clone()),
            current_year: self.current_year,
            current_month: self.current_month,
            filter_month: self.filter_month,
            filter_category: self.filter_category.clone(),
        }
    }

    /// Resets everything. Used at the logout boundary.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn dedup_preserving_order(values: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(values.len());
    values.retain(|value| {
        if seen.contains(value) {
            false
        } else {
            seen.push(value.clone());
            true
        }
    });
}
