//! Derived read model: filtering, pagination, and the page summary.

use cashbook_domain::{Cashbook, EntryKind, Transaction};

/// Fixed page size for the transaction table.
pub const ENTRIES_PER_PAGE: usize = 50;

/// One visible row plus its position in the resident transaction list.
///
/// The index addresses the row for edit/delete calls and is stable only for
/// the lifetime of this projection; any insert or delete shifts it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    pub index: usize,
    pub transaction: Transaction,
}

/// Totals over the rows of a single page. The balance may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageSummary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// A filtered, paginated view over the resident year.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// The page actually shown after clamping the request into range.
    pub page: usize,
    pub rows: Vec<ProjectedRow>,
    pub total_entries: usize,
    pub total_pages: usize,
    /// 1-based bounds for "Showing X - Y of N"; both zero when empty.
    pub page_start: usize,
    pub page_end: usize,
    /// Totals over this page's rows only, not the whole filtered set.
    pub summary: PageSummary,
}

fn matches_filters(cashbook: &Cashbook, transaction: &Transaction) -> bool {
    let category_ok = cashbook.filter_category().is_empty()
        || transaction.category == cashbook.filter_category();
    let month_ok = match cashbook.filter_month() {
        Some(month) => transaction.month == Some(month),
        None => true,
    };
    category_ok && month_ok
}

/// Projects the filtered, paginated, page-summarized view.
///
/// The requested page is clamped into `1..=total_pages` before slicing, and
/// the clamped value is returned so the caller's page indicator stays
/// consistent. An empty filtered set still projects as page 1 of 1.
pub fn project(cashbook: &Cashbook, page: usize) -> PageView {
    let filtered: Vec<ProjectedRow> = cashbook
        .transactions()
        .iter()
        .enumerate()
        .filter(|(_, transaction)| matches_filters(cashbook, transaction))
        .map(|(index, transaction)| ProjectedRow {
            index,
            transaction: transaction.clone(),
        })
        .collect();

    let total_entries = filtered.len();
    let total_pages = ((total_entries + ENTRIES_PER_PAGE - 1) / ENTRIES_PER_PAGE).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * ENTRIES_PER_PAGE;
    let end = (start + ENTRIES_PER_PAGE).min(total_entries);
    let rows: Vec<ProjectedRow> = filtered[start.min(total_entries)..end].to_vec();

    let summary = summarize(&rows);
    PageView {
        page,
        total_entries,
        total_pages,
        page_start: if total_entries == 0 { 0 } else { start + 1 },
        page_end: end,
        rows,
        summary,
    }
}

fn summarize(rows: &[ProjectedRow]) -> PageSummary {
    let mut income = 0.0;
    let mut expense = 0.0;
    for row in rows {
        match row.transaction.kind {
            EntryKind::Income => income += row.transaction.amount,
            EntryKind::Expense => expense += row.transaction.amount,
        }
    }
    PageSummary {
        income,
        expense,
        balance: income - expense,
    }
}

/// The "March | Food" label summarizing the active filters; empty when none.
pub fn filter_label(cashbook: &Cashbook) -> String {
    let mut label = String::new();
    if let Some(month) = cashbook.filter_month() {
        label.push_str(month.name());
    }
    if !cashbook.filter_category().is_empty() {
        if !label.is_empty() {
            label.push_str(" | ");
        }
        label.push_str(cashbook.filter_category());
    }
    label
}
