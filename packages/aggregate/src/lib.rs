#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reduction of per-year exhibition rows into per-film totals.
//!
//! [`group`] folds every [`Record`] into exactly one [`GroupedRecord`] per
//! [`GroupKey`]. Sums and the earliest year do not depend on the order the
//! records arrive in; only the displayed title (the first one seen) does.
//!
//! The [`views`] module holds the research views built on top of the
//! grouped table: filtering, rankings and yearly totals.

pub mod views;

use std::collections::BTreeMap;

use cinedata_bulletin_models::{GroupKey, GroupedRecord, Record};

pub use views::{
    GroupFilter, Summary, YearTotals, long_tail, summarize, top_by_audience, totals_by_year,
};

/// Folds `records` into one [`GroupedRecord`] per film.
#[must_use]
pub fn group<'a, I>(records: I) -> BTreeMap<GroupKey, GroupedRecord>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<GroupKey, GroupedRecord> = BTreeMap::new();

    for record in records {
        groups
            .entry(GroupKey::for_record(record))
            .or_insert_with(|| GroupedRecord::seed(record))
            .absorb(record);
    }

    log::debug!("Grouped records into {} films", groups.len());

    groups
}

/// [`group`], flattened into a table ordered by key.
#[must_use]
pub fn group_table<'a, I>(records: I) -> Vec<GroupedRecord>
where
    I: IntoIterator<Item = &'a Record>,
{
    group(records).into_values().collect()
}

#[cfg(test)]
mod tests {
    use cinedata_bulletin_models::{Money, Nationality};

    use super::*;

    fn record(
        year: u16,
        title: &str,
        nationality: Nationality,
        audience: u64,
        cents: u64,
    ) -> Record {
        Record {
            exhibition_year: year,
            title: title.to_owned(),
            nationality,
            audience,
            revenue: Money::from_cents(cents),
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record(2011, "Filme X", Nationality::Brazilian, 100, 1_000),
            record(2009, "filme x ", Nationality::Brazilian, 50, 500),
            record(2010, "Filme X", Nationality::Foreign, 7, 70),
            record(2012, "Outro", Nationality::Brazilian, 1, 1),
            record(2010, "FILME X", Nationality::Brazilian, 25, 250),
        ]
    }

    fn totals(groups: &BTreeMap<GroupKey, GroupedRecord>) -> Vec<(GroupKey, u64, Money, u16)> {
        groups
            .iter()
            .map(|(k, g)| (k.clone(), g.total_audience, g.total_revenue, g.first_year))
            .collect()
    }

    #[test]
    fn merges_titles_differing_in_case_and_padding() {
        let records = vec![
            record(2010, "Filme X", Nationality::Brazilian, 10, 100),
            record(2011, "filme x ", Nationality::Brazilian, 5, 50),
        ];
        let groups = group(&records);

        assert_eq!(groups.len(), 1);
        let g = groups.values().next().unwrap();
        assert_eq!(g.title, "Filme X");
        assert_eq!(g.total_audience, 15);
        assert_eq!(g.total_revenue, Money::from_cents(150));
        assert_eq!(g.first_year, 2010);
    }

    #[test]
    fn one_group_per_title_and_nationality() {
        let groups = group(&sample());
        assert_eq!(groups.len(), 3);

        let key = GroupKey {
            normalized_title: "FILME X".to_owned(),
            nationality: Nationality::Brazilian,
        };
        let g = &groups[&key];
        assert_eq!(g.total_audience, 175);
        assert_eq!(g.total_revenue, Money::from_cents(1_750));
        assert_eq!(g.first_year, 2009);
        assert_eq!(g.title, "Filme X");
    }

    #[test]
    fn totals_do_not_depend_on_arrival_order() {
        let records = sample();
        let expected = totals(&group(&records));

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(totals(&group(&reversed)), expected);

        for shift in 1..records.len() {
            let mut rotated = records.clone();
            rotated.rotate_left(shift);
            assert_eq!(totals(&group(&rotated)), expected);
        }
    }

    #[test]
    fn displayed_title_is_first_seen() {
        let mut records = sample();
        records.swap(0, 1);
        let groups = group(&records);
        let key = GroupKey {
            normalized_title: "FILME X".to_owned(),
            nationality: Nationality::Brazilian,
        };
        assert_eq!(groups[&key].title, "filme x ");
    }

    #[test]
    fn empty_input_groups_to_nothing() {
        assert!(group(&Vec::<Record>::new()).is_empty());
    }

    #[test]
    fn table_is_ordered_by_key() {
        let table = group_table(&sample());
        let keys: Vec<GroupKey> = table.iter().map(GroupedRecord::key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
