//! Anchor-based segmentation of a data row.
//!
//! The registration code (a letter prefix followed by a fixed number of
//! digits) is the only fixed-format token present in every row. Everything
//! before it is the title zone; everything after it is the metadata zone.
//!
//! ```text
//! 2009 Filme Exemplo   B0901024500000   Ficção Brasileira 35mm 10.000 50.000,00
//! └──── header ────┘   └── anchor ──┘   └──────────── trailer ───────────────┘
//! ```

use std::ops::Range;

use crate::config::AnchorFormat;

/// A data row cut into its three zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Text before the first anchor (year and title).
    pub header: &'a str,
    /// The first anchor itself.
    pub anchor: &'a str,
    /// Text after the last anchor (genre, nationality, format, numbers).
    pub trailer: &'a str,
}

/// Returns the byte ranges of every non-overlapping anchor in `line`,
/// scanning left to right.
#[must_use]
pub fn find_anchors(line: &str, format: &AnchorFormat) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let width = format.width();
    let mut found = Vec::new();
    let mut i = 0;

    while i + width <= bytes.len() {
        if is_prefix(bytes[i], format) && bytes[i + 1..i + width].iter().all(u8::is_ascii_digit) {
            found.push(i..i + width);
            i += width;
        } else {
            i += 1;
        }
    }

    found
}

fn is_prefix(byte: u8, format: &AnchorFormat) -> bool {
    format
        .prefixes
        .iter()
        .any(|&p| u8::try_from(p).is_ok_and(|p| p == byte))
}

/// Splits `line` around its registration code.
///
/// Returns `None` if the line has no anchor; callers drop such lines without
/// error. When a line carries more than one anchor, the header ends at the
/// first and the trailer starts after the last.
#[must_use]
pub fn split<'a>(line: &'a str, format: &AnchorFormat) -> Option<Segments<'a>> {
    let anchors = find_anchors(line, format);
    let first = anchors.first()?;
    let last = anchors.last()?;

    // Anchors are pure ASCII, so their bounds are always char boundaries.
    Some(Segments {
        header: &line[..first.start],
        anchor: &line[first.clone()],
        trailer: &line[last.end..],
    })
}
