//! Validated operations on the year list.

use cashbook_domain::Cashbook;

use crate::error::{CoreError, CoreResult};

/// Provides validated operations on the cashbook's year taxonomy.
pub struct YearService;

impl YearService {
    /// Inserts a new 4-digit year, keeping the list sorted, and makes it
    /// current.
    pub fn add(cashbook: &mut Cashbook, year: i32) -> CoreResult<()> {
        if !(1000..=9999).contains(&year) {
            return Err(CoreError::Validation(format!(
                "`{year}` is not a valid 4-digit year"
            )));
        }
        if !cashbook.insert_year(year) {
            return Err(CoreError::Validation(format!("Year {year} already exists")));
        }
        cashbook.set_current_year(Some(year));
        Ok(())
    }

    /// Makes an existing year current.
    pub fn select(cashbook: &mut Cashbook, year: i32) -> CoreResult<()> {
        if !cashbook.contains_year(year) {
            return Err(CoreError::Validation(format!(
                "Year {year} is not in the cashbook"
            )));
        }
        cashbook.set_current_year(Some(year));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_non_four_digit_years() {
        let mut cashbook = Cashbook::new();
        let err = YearService::add(&mut cashbook, 99).expect_err("too short");
        assert!(matches!(err, CoreError::Validation(_)));
        let err = YearService::add(&mut cashbook, 12345).expect_err("too long");
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn add_rejects_duplicates_and_sorts() {
        let mut cashbook = Cashbook::new();
        YearService::add(&mut cashbook, 2025).expect("first add");
        YearService::add(&mut cashbook, 2023).expect("second add");
        assert_eq!(cashbook.years(), &[2023, 2025]);
        assert_eq!(cashbook.current_year(), Some(2023));

        let err = YearService::add(&mut cashbook, 2025).expect_err("duplicate");
        assert!(
            matches!(err, CoreError::Validation(ref message) if message.contains("already exists")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn select_rejects_unknown_years() {
        let mut cashbook = Cashbook::new();
        YearService::add(&mut cashbook, 2024).expect("add");
        let err = YearService::select(&mut cashbook, 2020).expect_err("unknown year");
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(cashbook.current_year(), Some(2024));
    }
}
