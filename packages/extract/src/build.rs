//! Record derivation from a split data row.
//!
//! Malformed rows are expected in extracted text. Instead of failing, the
//! builder returns a [`SkipReason`] so callers can drop the row and still
//! count how often each kind of skip happens.

use cinedata_bulletin_models::{Nationality, Record};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::classify::is_data_line;
use crate::config::BulletinLayout;
use crate::split::split;

/// Why a line produced no record.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// The line does not start with a four-digit year.
    NotDataLine,
    /// The line has no registration code.
    MissingAnchor,
    /// The first four characters of the title zone are not a year.
    InvalidYear,
    /// Nothing is left of the title zone after the year.
    EmptyTitle,
    /// The metadata zone has fewer than two tokens.
    MissingNumericColumns,
}

/// Classifies the metadata zone's nationality.
///
/// The national marker wins. Without a foreign marker in the layout every
/// other row is foreign; with one, rows carrying neither marker are
/// [`Nationality::Unknown`].
#[must_use]
pub fn classify_nationality(trailer: &str, layout: &BulletinLayout) -> Nationality {
    if trailer.contains(layout.national_marker.as_str()) {
        return Nationality::Brazilian;
    }

    match &layout.foreign_marker {
        Some(marker) if !trailer.contains(marker.as_str()) => Nationality::Unknown,
        _ => Nationality::Foreign,
    }
}

/// Builds a record from the zones either side of the registration code.
///
/// * `header` holds the year (first four characters) and the title.
/// * `trailer` ends with the audience and revenue columns.
///
/// # Errors
///
/// Returns the [`SkipReason`] describing why the zones do not form a row.
pub fn build_record(
    header: &str,
    trailer: &str,
    layout: &BulletinLayout,
) -> Result<Record, SkipReason> {
    let header = header.trim();
    let year_end = header
        .char_indices()
        .nth(4)
        .map_or(header.len(), |(idx, _)| idx);
    let (year, title) = header.split_at(year_end);

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SkipReason::InvalidYear);
    }
    let exhibition_year: u16 = year.parse().map_err(|_| SkipReason::InvalidYear)?;

    let title = title.trim();
    if title.is_empty() {
        return Err(SkipReason::EmptyTitle);
    }

    let trailer = trailer.trim();
    let tokens: Vec<&str> = trailer.split_whitespace().collect();
    let [.., audience, revenue] = tokens.as_slice() else {
        return Err(SkipReason::MissingNumericColumns);
    };

    Ok(Record {
        exhibition_year,
        title: title.to_owned(),
        nationality: classify_nationality(trailer, layout),
        audience: layout.numbers.parse_integer(audience),
        revenue: layout.numbers.parse_currency(revenue),
    })
}

/// Runs one raw line through classification, segmentation and building.
///
/// # Errors
///
/// Returns the [`SkipReason`] for any line that does not yield a record.
pub fn parse_line(line: &str, layout: &BulletinLayout) -> Result<Record, SkipReason> {
    let line = line.trim();

    if !is_data_line(line) {
        return Err(SkipReason::NotDataLine);
    }

    let segments = split(line, &layout.anchor).ok_or(SkipReason::MissingAnchor)?;

    build_record(segments.header, segments.trailer, layout)
}

#[cfg(test)]
mod tests {
    use cinedata_bulletin_models::Money;

    use super::*;

    #[test]
    fn parses_reference_row() {
        let layout = BulletinLayout::ancine();
        let record = parse_line(
            "2009 Filme Exemplo   B0901024500000   Ficção Brasileira 35mm 10.000 50.000,00",
            &layout,
        )
        .unwrap();

        assert_eq!(
            record,
            Record {
                exhibition_year: 2009,
                title: "Filme Exemplo".to_owned(),
                nationality: Nationality::Brazilian,
                audience: 10_000,
                revenue: Money::from_cents(5_000_000),
            }
        );
    }

    #[test]
    fn unmarked_rows_are_foreign_by_default() {
        let layout = BulletinLayout::ancine();
        let record = parse_line(
            "2014 Some Blockbuster E1402431200000 Ficção Estrangeira Digital 1.234.567 15.000.000,50",
            &layout,
        )
        .unwrap();

        assert_eq!(record.nationality, Nationality::Foreign);
        assert_eq!(record.audience, 1_234_567);
        assert_eq!(record.revenue, Money::from_cents(1_500_000_050));
    }

    #[test]
    fn foreign_marker_enables_unknown() {
        let mut layout = BulletinLayout::ancine();
        layout.foreign_marker = Some("Estrangeira".to_owned());

        assert_eq!(
            classify_nationality("Ficção Estrangeira 1 1,00", &layout),
            Nationality::Foreign
        );
        assert_eq!(
            classify_nationality("Ficção 1 1,00", &layout),
            Nationality::Unknown
        );
        assert_eq!(
            classify_nationality("Ficção Brasileira 1 1,00", &layout),
            Nationality::Brazilian
        );
    }

    #[test]
    fn missing_anchor_is_skipped() {
        let layout = BulletinLayout::ancine();
        assert_eq!(
            parse_line("2009 Filme Exemplo Ficção Brasileira 10.000 50.000,00", &layout),
            Err(SkipReason::MissingAnchor)
        );
    }

    #[test]
    fn non_data_lines_are_skipped() {
        let layout = BulletinLayout::ancine();
        assert_eq!(
            parse_line("Ano Título CPB Público Renda", &layout),
            Err(SkipReason::NotDataLine)
        );
    }

    #[test]
    fn empty_title_is_skipped() {
        let layout = BulletinLayout::ancine();
        assert_eq!(
            parse_line("2009    B0901024500000 Ficção Brasileira 1 1,00", &layout),
            Err(SkipReason::EmptyTitle)
        );
    }

    #[test]
    fn too_few_trailer_tokens_are_skipped() {
        let layout = BulletinLayout::ancine();
        assert_eq!(
            parse_line("2009 Filme B0901024500000 50.000,00", &layout),
            Err(SkipReason::MissingNumericColumns)
        );
        assert_eq!(
            parse_line("2009 Filme B0901024500000", &layout),
            Err(SkipReason::MissingNumericColumns)
        );
    }

    #[test]
    fn builder_rejects_bad_year_directly() {
        let layout = BulletinLayout::ancine();
        assert_eq!(
            build_record("20a9 Filme", "Ficção 1 1,00", &layout),
            Err(SkipReason::InvalidYear)
        );
        assert_eq!(
            build_record("20", "Ficção 1 1,00", &layout),
            Err(SkipReason::InvalidYear)
        );
    }

    #[test]
    fn garbled_numbers_degrade_to_zero() {
        let layout = BulletinLayout::ancine();
        let record = parse_line(
            "2012 Filme B1200000000000 Ficção Brasileira ??? n/d",
            &layout,
        )
        .unwrap();
        assert_eq!(record.audience, 0);
        assert_eq!(record.revenue, Money::ZERO);
    }

    #[test]
    fn skip_reasons_display_in_snake_case() {
        assert_eq!(SkipReason::MissingAnchor.to_string(), "missing_anchor");
    }
}
