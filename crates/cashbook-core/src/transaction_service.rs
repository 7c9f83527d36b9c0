//! Validated operations on the resident year's transactions.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use cashbook_domain::{Cashbook, EntryKind, Month, Transaction};

use crate::error::{CoreError, CoreResult};

/// Caller-supplied fields for creating or editing an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub kind: EntryKind,
    pub category: String,
    pub month: Option<Month>,
}

/// Provides validated operations on [`Transaction`] entries.
///
/// Entries are addressed by position in the resident list; bulk removal
/// filters against pre-deletion indexes so surviving positions never shift
/// mid-removal.
pub struct TransactionService;

impl TransactionService {
    /// Resolves the month a new entry lands in: the explicit selection, else
    /// the session's current month, else the calendar month of the date.
    pub fn resolve_month(draft: &EntryDraft, current_month: Option<Month>) -> Month {
        draft
            .month
            .or(current_month)
            .unwrap_or_else(|| Month::from_date(draft.date))
    }

    fn validate(draft: &EntryDraft) -> CoreResult<()> {
        if draft.description.trim().is_empty() {
            return Err(CoreError::Validation("Description cannot be empty".into()));
        }
        if !draft.amount.is_finite() || draft.amount < 0.0 {
            return Err(CoreError::Validation(
                "Amount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    /// Appends a new entry, resolving its month against `current_month` on
    /// the cashbook. Returns the resolved month so the caller can remember
    /// it as the last-used value.
    pub fn add(cashbook: &mut Cashbook, draft: EntryDraft) -> CoreResult<Month> {
        Self::validate(&draft)?;
        let month = Self::resolve_month(&draft, cashbook.current_month());
        let transaction = Transaction::new(
            draft.date,
            draft.description.trim(),
            draft.amount,
            draft.kind,
            draft.category,
            Some(month),
        );
        cashbook.push_transaction(transaction);
        Ok(month)
    }

    /// Replaces the entry at `index` with the draft's fields and marks it
    /// edited. The month is taken verbatim; no fallback resolution applies
    /// to edits.
    pub fn edit(cashbook: &mut Cashbook, index: usize, draft: EntryDraft) -> CoreResult<()> {
        Self::validate(&draft)?;
        if cashbook.transaction_at(index).is_none() {
            return Err(CoreError::Validation("Entry not found".into()));
        }
        let mut transaction = Transaction::new(
            draft.date,
            draft.description.trim(),
            draft.amount,
            draft.kind,
            draft.category,
            draft.month,
        );
        transaction.edited = true;
        cashbook.replace_transaction(index, transaction);
        Ok(())
    }

    /// Removes the entry at `index`.
    pub fn remove(cashbook: &mut Cashbook, index: usize) -> CoreResult<()> {
        if cashbook.remove_transaction(index).is_none() {
            return Err(CoreError::Validation("Entry not found".into()));
        }
        Ok(())
    }

    /// Removes every entry whose pre-deletion index is in `indexes`,
    /// returning how many were removed. Unknown indexes are ignored.
    pub fn remove_many(cashbook: &mut Cashbook, indexes: &BTreeSet<usize>) -> usize {
        cashbook.remove_transactions_where(|index| indexes.contains(&index))
    }

    /// Drops every entry of the resident year.
    pub fn remove_all(cashbook: &mut Cashbook) {
        cashbook.clear_transactions();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(description: &str, amount: f64) -> EntryDraft {
        EntryDraft {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
            description: description.to_string(),
            amount,
            kind: EntryKind::Expense,
            category: "Food".to_string(),
            month: None,
        }
    }

    #[test]
    fn add_rejects_blank_description_and_bad_amounts() {
        let mut cashbook = Cashbook::new();
        let err = TransactionService::add(&mut cashbook, draft("   ", 5.0)).expect_err("blank");
        assert!(matches!(err, CoreError::Validation(_)));

        let err = TransactionService::add(&mut cashbook, draft("ok", -1.0)).expect_err("negative");
        assert!(matches!(err, CoreError::Validation(_)));

        let err =
            TransactionService::add(&mut cashbook, draft("ok", f64::NAN)).expect_err("non-finite");
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(cashbook.transactions().is_empty(), "state unchanged");
    }

    #[test]
    fn add_resolves_month_from_selection_then_current_then_date() {
        let mut cashbook = Cashbook::new();

        let mut explicit = draft("a", 1.0);
        explicit.month = Some(Month::June);
        assert_eq!(
            TransactionService::add(&mut cashbook, explicit).expect("add"),
            Month::June
        );

        cashbook.set_current_month(Some(Month::May));
        assert_eq!(
            TransactionService::add(&mut cashbook, draft("b", 1.0)).expect("add"),
            Month::May
        );

        cashbook.set_current_month(None);
        assert_eq!(
            TransactionService::add(&mut cashbook, draft("c", 1.0)).expect("add"),
            Month::March,
            "falls back to the calendar month of the date"
        );
    }

    #[test]
    fn edit_marks_the_entry_edited() {
        let mut cashbook = Cashbook::new();
        TransactionService::add(&mut cashbook, draft("before", 1.0)).expect("add");

        let mut changes = draft("after", 2.0);
        changes.month = Some(Month::July);
        TransactionService::edit(&mut cashbook, 0, changes).expect("edit");

        let entry = &cashbook.transactions()[0];
        assert_eq!(entry.description, "after");
        assert_eq!(entry.amount, 2.0);
        assert_eq!(entry.month, Some(Month::July));
        assert!(entry.edited);
    }

    #[test]
    fn edit_rejects_unknown_index_without_mutating() {
        let mut cashbook = Cashbook::new();
        let err = TransactionService::edit(&mut cashbook, 0, draft("x", 1.0)).expect_err("empty");
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn remove_many_filters_by_pre_deletion_membership() {
        let mut cashbook = Cashbook::new();
        TransactionService::add(&mut cashbook, draft("A", 1.0)).expect("add");
        TransactionService::add(&mut cashbook, draft("B", 1.0)).expect("add");
        TransactionService::add(&mut cashbook, draft("C", 1.0)).expect("add");

        let indexes: BTreeSet<usize> = [0, 2].into_iter().collect();
        assert_eq!(TransactionService::remove_many(&mut cashbook, &indexes), 2);
        assert_eq!(cashbook.transactions().len(), 1);
        assert_eq!(cashbook.transactions()[0].description, "B");
    }

    #[test]
    fn remove_many_ignores_out_of_range_indexes() {
        let mut cashbook = Cashbook::new();
        TransactionService::add(&mut cashbook, draft("A", 1.0)).expect("add");

        let indexes: BTreeSet<usize> = [0, 9].into_iter().collect();
        assert_eq!(TransactionService::remove_many(&mut cashbook, &indexes), 1);
        assert!(cashbook.transactions().is_empty());
    }
}
