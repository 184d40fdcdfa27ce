//! Data-row detection.
//!
//! Extracted page text carries no markup. Rows of the exhibition table are
//! the only lines that open with a four-digit year, which separates them
//! from headers, footers and page furniture.

use std::sync::LazyLock;

use regex::Regex;

static DATA_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}\s").unwrap_or_else(|_| unreachable!()));

/// Returns `true` if the trimmed line starts with exactly four ASCII digits
/// followed by whitespace.
#[must_use]
pub fn is_data_line(line: &str) -> bool {
    DATA_LINE.is_match(line.trim())
}
