//! Research views over the grouped table.
//!
//! These mirror the questions researchers ask of a bulletin batch: which
//! films drew the largest audiences, which had the smallest credible
//! box office, and how the market moved year to year.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use cinedata_bulletin_models::{GroupedRecord, Money, Record};
use serde::{Deserialize, Serialize};

/// Long-tail rows must earn more than this. Lower figures are usually
/// misread columns rather than real releases.
pub const LONG_TAIL_MIN_REVENUE: Money = Money::from_cents(10_000);

/// Long-tail rows must sell more than this many tickets.
pub const LONG_TAIL_MIN_AUDIENCE: u64 = 10;

/// Selection applied to grouped or raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    /// Inclusive year window. For grouped rows this is matched against the
    /// first exhibition year; for raw rows against the exhibition year.
    pub years: Option<RangeInclusive<u16>>,
    /// Keep only Brazilian productions.
    pub brazilian_only: bool,
}

impl GroupFilter {
    fn accepts(&self, year: u16, brazilian: bool) -> bool {
        if self.brazilian_only && !brazilian {
            return false;
        }
        self.years.as_ref().is_none_or(|years| years.contains(&year))
    }

    /// Returns `true` if the grouped row passes the filter.
    #[must_use]
    pub fn matches(&self, group: &GroupedRecord) -> bool {
        self.accepts(group.first_year, group.nationality.is_brazilian())
    }

    /// Returns `true` if the raw row passes the filter.
    #[must_use]
    pub fn matches_record(&self, record: &Record) -> bool {
        self.accepts(record.exhibition_year, record.nationality.is_brazilian())
    }

    /// Grouped rows passing the filter, in input order.
    #[must_use]
    pub fn apply(&self, groups: &[GroupedRecord]) -> Vec<GroupedRecord> {
        groups.iter().filter(|g| self.matches(g)).cloned().collect()
    }

    /// Raw rows passing the filter, in input order.
    #[must_use]
    pub fn apply_records(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|r| self.matches_record(r))
            .cloned()
            .collect()
    }
}

/// The `n` films with the largest total audience, largest first.
#[must_use]
pub fn top_by_audience(groups: &[GroupedRecord], n: usize) -> Vec<GroupedRecord> {
    let mut ranked = groups.to_vec();
    ranked.sort_by(|a, b| b.total_audience.cmp(&a.total_audience));
    ranked.truncate(n);
    ranked
}

/// The `n` films with the smallest total revenue, smallest first, among
/// those above [`LONG_TAIL_MIN_REVENUE`] and [`LONG_TAIL_MIN_AUDIENCE`].
#[must_use]
pub fn long_tail(groups: &[GroupedRecord], n: usize) -> Vec<GroupedRecord> {
    let mut ranked: Vec<GroupedRecord> = groups
        .iter()
        .filter(|g| {
            g.total_revenue > LONG_TAIL_MIN_REVENUE && g.total_audience > LONG_TAIL_MIN_AUDIENCE
        })
        .cloned()
        .collect();
    ranked.sort_by_key(|g| g.total_revenue);
    ranked.truncate(n);
    ranked
}

/// Market totals for films first exhibited in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotals {
    /// First exhibition year.
    pub year: u16,
    /// Number of films.
    pub films: u64,
    /// Summed audience.
    pub audience: u64,
    /// Summed revenue.
    pub revenue: Money,
}

/// Per-year totals of the grouped rows, ordered by year.
#[must_use]
pub fn totals_by_year(groups: &[GroupedRecord]) -> Vec<YearTotals> {
    let mut years: BTreeMap<u16, YearTotals> = BTreeMap::new();

    for g in groups {
        let totals = years.entry(g.first_year).or_insert(YearTotals {
            year: g.first_year,
            films: 0,
            audience: 0,
            revenue: Money::ZERO,
        });
        totals.films += 1;
        totals.audience = totals.audience.saturating_add(g.total_audience);
        totals.revenue += g.total_revenue;
    }

    years.into_values().collect()
}

/// Diagnostic counts for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Rows recovered from the bulletins.
    pub raw_rows: usize,
    /// Distinct films after grouping.
    pub unique_films: usize,
    /// Earliest exhibition year seen.
    pub first_year: Option<u16>,
    /// Latest exhibition year seen.
    pub last_year: Option<u16>,
    /// Audience over all rows.
    pub total_audience: u64,
    /// Revenue over all rows.
    pub total_revenue: Money,
}

/// Summarizes a raw table and its grouped counterpart.
#[must_use]
pub fn summarize(records: &[Record], groups: &[GroupedRecord]) -> Summary {
    Summary {
        raw_rows: records.len(),
        unique_films: groups.len(),
        first_year: records.iter().map(|r| r.exhibition_year).min(),
        last_year: records.iter().map(|r| r.exhibition_year).max(),
        total_audience: records.iter().map(|r| r.audience).sum(),
        total_revenue: records.iter().map(|r| r.revenue).sum(),
    }
}

#[cfg(test)]
mod tests {
    use cinedata_bulletin_models::Nationality;

    use super::*;

    fn grouped(
        title: &str,
        nationality: Nationality,
        first_year: u16,
        audience: u64,
        cents: u64,
    ) -> GroupedRecord {
        GroupedRecord {
            title: title.to_owned(),
            nationality,
            total_audience: audience,
            total_revenue: Money::from_cents(cents),
            first_year,
        }
    }

    fn sample() -> Vec<GroupedRecord> {
        vec![
            grouped("A", Nationality::Brazilian, 2009, 500, 900_000),
            grouped("B", Nationality::Foreign, 2010, 9_000, 5_000_000),
            grouped("C", Nationality::Brazilian, 2010, 11, 10_001),
            grouped("D", Nationality::Brazilian, 2011, 5, 50_000),
            grouped("E", Nationality::Brazilian, 2012, 300, 10_000),
            grouped("F", Nationality::Brazilian, 2012, 40, 20_000),
        ]
    }

    fn titles(groups: &[GroupedRecord]) -> Vec<&str> {
        groups.iter().map(|g| g.title.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        assert_eq!(GroupFilter::default().apply(&sample()).len(), 6);
    }

    #[test]
    fn filters_by_year_window_and_nationality() {
        let filter = GroupFilter {
            years: Some(2010..=2011),
            brazilian_only: true,
        };
        assert_eq!(titles(&filter.apply(&sample())), vec!["C", "D"]);
    }

    #[test]
    fn filters_raw_rows_by_exhibition_year() {
        let records = vec![
            Record {
                exhibition_year: 2008,
                title: "Old".to_owned(),
                nationality: Nationality::Brazilian,
                audience: 1,
                revenue: Money::ZERO,
            },
            Record {
                exhibition_year: 2015,
                title: "New".to_owned(),
                nationality: Nationality::Foreign,
                audience: 1,
                revenue: Money::ZERO,
            },
        ];
        let filter = GroupFilter {
            years: Some(2010..=2020),
            brazilian_only: false,
        };
        let kept = filter.apply_records(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "New");
    }

    #[test]
    fn ranks_by_audience_descending() {
        assert_eq!(titles(&top_by_audience(&sample(), 3)), vec!["B", "A", "E"]);
        assert_eq!(top_by_audience(&sample(), 100).len(), 6);
    }

    #[test]
    fn long_tail_applies_sanity_floor() {
        // C just clears both floors; D sells too few tickets; E earns
        // exactly the floor, which is not enough.
        assert_eq!(titles(&long_tail(&sample(), 10)), vec!["C", "F", "A", "B"]);
        assert_eq!(titles(&long_tail(&sample(), 2)), vec!["C", "F"]);
    }

    #[test]
    fn totals_group_by_first_year() {
        let totals = totals_by_year(&sample());
        let years: Vec<u16> = totals.iter().map(|t| t.year).collect();
        assert_eq!(years, vec![2009, 2010, 2011, 2012]);

        let y2010 = totals[1];
        assert_eq!(y2010.films, 2);
        assert_eq!(y2010.audience, 9_011);
        assert_eq!(y2010.revenue, Money::from_cents(5_010_001));
    }

    #[test]
    fn summary_counts_rows_and_films() {
        let records = vec![
            Record {
                exhibition_year: 2011,
                title: "X".to_owned(),
                nationality: Nationality::Brazilian,
                audience: 3,
                revenue: Money::from_cents(300),
            },
            Record {
                exhibition_year: 2009,
                title: "x".to_owned(),
                nationality: Nationality::Brazilian,
                audience: 2,
                revenue: Money::from_cents(200),
            },
        ];
        let groups = crate::group_table(&records);
        let summary = summarize(&records, &groups);

        assert_eq!(summary.raw_rows, 2);
        assert_eq!(summary.unique_films, 1);
        assert_eq!(summary.first_year, Some(2009));
        assert_eq!(summary.last_year, Some(2011));
        assert_eq!(summary.total_audience, 5);
        assert_eq!(summary.total_revenue, Money::from_cents(500));
    }

    #[test]
    fn summary_of_nothing() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.raw_rows, 0);
        assert_eq!(summary.first_year, None);
        assert_eq!(summary.total_revenue, Money::ZERO);
    }
}
