//! Canonical month names used to bucket cashbook entries.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The twelve canonical months an entry can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// All months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// Full English name, as stored in the remote documents.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Parses a canonical month name. Unknown names yield `None`.
    pub fn from_name(value: &str) -> Option<Month> {
        let trimmed = value.trim();
        MONTHS.iter().copied().find(|month| month.name() == trimmed)
    }

    /// The calendar month of `date`.
    pub fn from_date(date: NaiveDate) -> Month {
        MONTHS[date.month0() as usize]
    }

    /// 1-based calendar number (January = 1).
    pub fn number(self) -> u32 {
        MONTHS
            .iter()
            .position(|month| *month == self)
            .map(|index| index as u32 + 1)
            .unwrap_or(1)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serde adapter for `Option<Month>` fields whose stored form uses the empty
/// string for "unset". Unknown names deserialize tolerantly to unset.
pub mod opt_month {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Month;

    pub fn serialize<S>(value: &Option<Month>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(month) => serializer.serialize_str(month.name()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Month>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().and_then(Month::from_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_canonical_names_only() {
        assert_eq!(Month::from_name("March"), Some(Month::March));
        assert_eq!(Month::from_name("  March  "), Some(Month::March));
        assert_eq!(Month::from_name("march"), None);
        assert_eq!(Month::from_name(""), None);
    }

    #[test]
    fn from_date_maps_calendar_months() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        assert_eq!(Month::from_date(date), Month::March);
        let december = NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date");
        assert_eq!(Month::from_date(december), Month::December);
    }

    #[test]
    fn number_is_one_based() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::December.number(), 12);
    }
}
