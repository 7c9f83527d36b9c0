//! Validated operations on the category taxonomy.

use cashbook_domain::Cashbook;

use crate::error::{CoreError, CoreResult};

/// Provides validated operations on the cashbook's categories.
///
/// Category names are matched case-sensitively and exactly; transactions
/// reference categories by value, not by id.
pub struct CategoryService;

impl CategoryService {
    /// Appends a new category after trimming and duplicate checks.
    pub fn add(cashbook: &mut Cashbook, name: &str) -> CoreResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if !cashbook.push_category(name) {
            return Err(CoreError::Validation(format!(
                "Category `{name}` already exists"
            )));
        }
        Ok(())
    }

    /// Renames the category at `index` in place. Historic transactions keep
    /// the old string; only the taxonomy entry changes.
    pub fn rename(cashbook: &mut Cashbook, index: usize, new_name: &str) -> CoreResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CoreError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        let Some(current) = cashbook.category_at(index).map(str::to_string) else {
            return Err(CoreError::Validation("Category not found".into()));
        };
        let collides = current != new_name
            && cashbook.categories().iter().any(|existing| existing == new_name);
        if collides {
            return Err(CoreError::Validation(format!(
                "Category `{new_name}` already exists"
            )));
        }
        cashbook.set_category_at(index, new_name);
        Ok(())
    }

    /// Removes the category at `index` and blanks the `category` field of
    /// every resident transaction tagged with it, returning the removed
    /// name. The cascade reaches the resident year only; other years'
    /// persisted documents keep the old name until loaded.
    pub fn remove(cashbook: &mut Cashbook, index: usize) -> CoreResult<String> {
        let Some(name) = cashbook.remove_category(index) else {
            return Err(CoreError::Validation("Category not found".into()));
        };
        cashbook.blank_category_references(&name);
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashbook_domain::{EntryKind, Month, Transaction};
    use chrono::NaiveDate;

    fn entry(category: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 2, 3).expect("valid date"),
            "entry",
            4.0,
            EntryKind::Expense,
            category,
            Some(Month::February),
        )
    }

    #[test]
    fn add_trims_and_rejects_empty_or_duplicate() {
        let mut cashbook = Cashbook::new();
        CategoryService::add(&mut cashbook, "  Food  ").expect("first add");
        assert_eq!(cashbook.categories(), &["Food".to_string()]);

        let err = CategoryService::add(&mut cashbook, "   ").expect_err("empty");
        assert!(matches!(err, CoreError::Validation(_)));
        let err = CategoryService::add(&mut cashbook, "Food").expect_err("duplicate");
        assert!(
            matches!(err, CoreError::Validation(ref message) if message.contains("already exists")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn rename_rejects_collisions_with_a_different_category() {
        let mut cashbook = Cashbook::new();
        CategoryService::add(&mut cashbook, "Food").expect("add");
        CategoryService::add(&mut cashbook, "Transport").expect("add");

        let err = CategoryService::rename(&mut cashbook, 0, "Transport").expect_err("collision");
        assert!(matches!(err, CoreError::Validation(_)));

        CategoryService::rename(&mut cashbook, 0, "Food").expect("renaming to itself is allowed");
        CategoryService::rename(&mut cashbook, 0, "Groceries").expect("rename");
        assert_eq!(cashbook.category_at(0), Some("Groceries"));
    }

    #[test]
    fn rename_does_not_rewrite_historic_transactions() {
        let mut cashbook = Cashbook::new();
        CategoryService::add(&mut cashbook, "Food").expect("add");
        cashbook.push_transaction(entry("Food"));

        CategoryService::rename(&mut cashbook, 0, "Groceries").expect("rename");
        assert_eq!(cashbook.transactions()[0].category, "Food");
    }

    #[test]
    fn remove_cascades_by_blanking_resident_references() {
        let mut cashbook = Cashbook::new();
        CategoryService::add(&mut cashbook, "Food").expect("add");
        CategoryService::add(&mut cashbook, "Transport").expect("add");
        cashbook.push_transaction(entry("Food"));
        cashbook.push_transaction(entry("Transport"));

        let removed = CategoryService::remove(&mut cashbook, 0).expect("remove");
        assert_eq!(removed, "Food");
        assert!(!cashbook.categories().iter().any(|c| c == "Food"));
        assert_eq!(cashbook.transactions()[0].category, "");
        assert_eq!(cashbook.transactions()[1].category, "Transport");
    }

    #[test]
    fn remove_rejects_bad_indexes() {
        let mut cashbook = Cashbook::new();
        let err = CategoryService::remove(&mut cashbook, 3).expect_err("bad index");
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
