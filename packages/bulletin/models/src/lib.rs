#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Exhibition record types shared across the cinedata toolchain.
//!
//! A [`Record`] is one per-year row recovered from a film-exhibition
//! bulletin. A [`GroupedRecord`] is the cumulative row for one film,
//! identified by its [`GroupKey`] (normalized title and nationality).

pub mod money;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use money::{Money, ParseMoneyError};

/// Production nationality of an exhibited film, as printed in the bulletin.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Nationality {
    /// The row carries the national marker text.
    Brazilian,
    /// The row is a foreign production.
    Foreign,
    /// Neither marker was found (only produced when the bulletin layout
    /// defines an explicit foreign marker).
    Unknown,
}

impl Nationality {
    /// Returns `true` for [`Nationality::Brazilian`].
    #[must_use]
    pub const fn is_brazilian(self) -> bool {
        matches!(self, Self::Brazilian)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Brazilian, Self::Foreign, Self::Unknown]
    }
}

/// One exhibition row: a film's audience and revenue for a single year.
///
/// Records are never mutated after construction and are kept in the order
/// they were scanned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Four-digit exhibition year as printed at the start of the row.
    pub exhibition_year: u16,
    /// Film title, trimmed and never empty.
    pub title: String,
    /// Production nationality.
    pub nationality: Nationality,
    /// Tickets sold.
    pub audience: u64,
    /// Box-office revenue in the bulletin's currency.
    pub revenue: Money,
}

/// Uppercases and trims a title so that casing and padding differences
/// between bulletins collapse onto the same film.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.trim().to_uppercase()
}

/// Identity of a film across bulletins.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    /// Title after [`normalize_title`].
    pub normalized_title: String,
    /// Production nationality.
    pub nationality: Nationality,
}

impl GroupKey {
    /// Builds the grouping key for a record.
    #[must_use]
    pub fn for_record(record: &Record) -> Self {
        Self {
            normalized_title: normalize_title(&record.title),
            nationality: record.nationality,
        }
    }
}

/// Cumulative totals for one film across every year it was exhibited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupedRecord {
    /// First raw-cased title seen for the film.
    pub title: String,
    /// Production nationality.
    pub nationality: Nationality,
    /// Sum of audience over all rows.
    pub total_audience: u64,
    /// Sum of revenue over all rows.
    pub total_revenue: Money,
    /// Earliest exhibition year seen.
    pub first_year: u16,
}

impl GroupedRecord {
    /// Creates an empty accumulator seeded from the first record of a film.
    ///
    /// Sums start at zero; call [`GroupedRecord::absorb`] to fold the record
    /// in.
    #[must_use]
    pub fn seed(record: &Record) -> Self {
        Self {
            title: record.title.clone(),
            nationality: record.nationality,
            total_audience: 0,
            total_revenue: Money::ZERO,
            first_year: record.exhibition_year,
        }
    }

    /// Folds one record into the running totals.
    pub fn absorb(&mut self, record: &Record) {
        self.total_audience = self.total_audience.saturating_add(record.audience);
        self.total_revenue += record.revenue;
        self.first_year = self.first_year.min(record.exhibition_year);
    }

    /// Grouping key of this row.
    #[must_use]
    pub fn key(&self) -> GroupKey {
        GroupKey {
            normalized_title: normalize_title(&self.title),
            nationality: self.nationality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u16, title: &str, audience: u64, cents: u64) -> Record {
        Record {
            exhibition_year: year,
            title: title.to_owned(),
            nationality: Nationality::Brazilian,
            audience,
            revenue: Money::from_cents(cents),
        }
    }

    #[test]
    fn titles_differing_in_case_and_padding_share_a_key() {
        let a = record(2010, "Filme X", 1, 1);
        let b = record(2011, "filme x ", 1, 1);
        assert_eq!(GroupKey::for_record(&a), GroupKey::for_record(&b));
    }

    #[test]
    fn nationality_is_part_of_the_key() {
        let a = record(2010, "Filme X", 1, 1);
        let mut b = a.clone();
        b.nationality = Nationality::Foreign;
        assert_ne!(GroupKey::for_record(&a), GroupKey::for_record(&b));
    }

    #[test]
    fn absorb_sums_and_keeps_earliest_year() {
        let first = record(2012, "Filme X", 100, 50_000);
        let mut group = GroupedRecord::seed(&first);
        group.absorb(&first);
        group.absorb(&record(2009, "FILME X", 20, 1_000));

        assert_eq!(group.title, "Filme X");
        assert_eq!(group.total_audience, 120);
        assert_eq!(group.total_revenue, Money::from_cents(51_000));
        assert_eq!(group.first_year, 2009);
    }

    #[test]
    fn nationality_round_trips_through_strum() {
        for n in Nationality::all() {
            let parsed: Nationality = n.as_ref().parse().unwrap();
            assert_eq!(parsed, *n);
        }
        assert_eq!(Nationality::Brazilian.to_string(), "BRAZILIAN");
    }
}
