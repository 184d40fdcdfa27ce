//! Page, document and batch scanning.
//!
//! A batch is scanned one document at a time, each to completion. A
//! document that cannot be decoded is reported as a [`DocumentReadError`]
//! and the batch carries on; line-level problems never leave the document
//! and only show up in [`ScanStats`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use cinedata_bulletin_models::Record;
use cinedata_pdf::{Document, PageExtractor, PdfError};

use crate::build::{SkipReason, parse_line};
use crate::config::BulletinLayout;
use crate::progress::ProgressCallback;

/// Line and document counters for a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Documents that were decoded and scanned.
    pub documents_scanned: u64,
    /// Pages scanned.
    pub pages: u64,
    /// Non-blank lines examined.
    pub lines: u64,
    /// Records produced.
    pub records: u64,
    /// Lines dropped, by reason.
    pub skipped: BTreeMap<SkipReason, u64>,
}

impl ScanStats {
    fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    /// Number of lines dropped for `reason`.
    #[must_use]
    pub fn skipped_for(&self, reason: SkipReason) -> u64 {
        self.skipped.get(&reason).copied().unwrap_or_default()
    }

    /// Lines that looked like table rows (started with a year), whether or
    /// not they produced a record.
    #[must_use]
    pub fn data_lines(&self) -> u64 {
        self.lines - self.skipped_for(SkipReason::NotDataLine)
    }

    /// Adds another scan's counters to this one.
    pub fn merge(&mut self, other: &Self) {
        self.documents_scanned += other.documents_scanned;
        self.pages += other.pages;
        self.lines += other.lines;
        self.records += other.records;
        for (reason, count) in &other.skipped {
            *self.skipped.entry(*reason).or_default() += count;
        }
    }
}

/// Scans the lines of one page, appending counters to `stats`.
pub fn scan_text(text: &str, layout: &BulletinLayout, stats: &mut ScanStats) -> Vec<Record> {
    let mut records = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        match parse_line(line, layout) {
            Ok(record) => {
                stats.records += 1;
                records.push(record);
            }
            Err(reason) => {
                if reason != SkipReason::NotDataLine {
                    log::trace!("Skipped line ({reason}): {line}");
                }
                stats.skip(reason);
            }
        }
    }

    records
}

/// The records recovered from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentScan {
    /// Document name.
    pub document: String,
    /// Records in page and line order.
    pub records: Vec<Record>,
    /// Counters for this document alone.
    pub stats: ScanStats,
}

/// Scans every page of one document.
///
/// # Errors
///
/// Returns [`PdfError`] if the document cannot be decoded. No records from a
/// failed document are returned.
pub fn scan_document(
    document: &Document,
    extractor: &impl PageExtractor,
    layout: &BulletinLayout,
) -> Result<DocumentScan, PdfError> {
    let pages = extractor.extract_pages(document)?;

    let mut stats = ScanStats {
        documents_scanned: 1,
        ..ScanStats::default()
    };
    let mut records = Vec::new();

    for (page_num, text) in pages.iter().enumerate() {
        stats.pages += 1;
        let before = records.len();
        records.extend(scan_text(text, layout, &mut stats));
        log::debug!(
            "[{}] page {}: {} records",
            document.name,
            page_num + 1,
            records.len() - before
        );
    }

    Ok(DocumentScan {
        document: document.name.clone(),
        records,
        stats,
    })
}

/// A document that could not be read. Reported, never fatal to the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReadError {
    /// Document name.
    pub document: String,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for DocumentReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read {}: {}", self.document, self.message)
    }
}

impl std::error::Error for DocumentReadError {}

/// Whether a batch produced anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// At least one record was recovered.
    Records(usize),
    /// No record was recovered; the input is probably not a bulletin of the
    /// expected format.
    Empty,
}

/// Outcome of scanning a batch of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Every record recovered, in document, page and line order.
    pub records: Vec<Record>,
    /// Documents that could not be read.
    pub failures: Vec<DocumentReadError>,
    /// Counters across all scanned documents.
    pub stats: ScanStats,
}

impl ScanReport {
    /// Returns [`ScanStatus::Empty`] when no record was recovered.
    #[must_use]
    pub fn status(&self) -> ScanStatus {
        if self.records.is_empty() {
            ScanStatus::Empty
        } else {
            ScanStatus::Records(self.records.len())
        }
    }

    /// Returns `true` if no record was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scans a batch of documents in order.
///
/// Each document is scanned to completion before the next begins. A
/// document that fails to decode contributes a [`DocumentReadError`] and no
/// records; the remaining documents are scanned regardless.
pub fn scan_documents(
    documents: &[Document],
    extractor: &impl PageExtractor,
    layout: &BulletinLayout,
    progress: &Arc<dyn ProgressCallback>,
) -> ScanReport {
    let mut report = ScanReport::default();
    progress.set_total(documents.len() as u64);

    for document in documents {
        progress.set_message(format!("Scanning {}", document.name));

        match scan_document(document, extractor, layout) {
            Ok(scan) => {
                log::info!(
                    "[{}] {} records from {} page(s)",
                    scan.document,
                    scan.records.len(),
                    scan.stats.pages
                );
                report.stats.merge(&scan.stats);
                report.records.extend(scan.records);
            }
            Err(e) => {
                log::warn!("[{}] skipped: {e}", document.name);
                report.failures.push(DocumentReadError {
                    document: document.name.clone(),
                    message: e.to_string(),
                });
            }
        }

        progress.inc(1);
    }

    log::info!(
        "Scan complete: {} records from {}/{} document(s)",
        report.records.len(),
        report.stats.documents_scanned,
        documents.len()
    );
    progress.finish(format!(
        "Scanned {} document(s), {} records",
        documents.len(),
        report.records.len()
    ));

    report
}
