#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-page text extraction for film bulletin documents.
//!
//! Bulletins are published as PDF tables. This crate turns a named binary
//! [`Document`] into an ordered list of page strings using pure-Rust text
//! extraction ([`pdf_extract`]). Pre-extracted plain text (pages separated
//! by form feeds) is supported too, so bulletins that were converted
//! elsewhere can be scanned without re-decoding.
//!
//! Callers depend on the [`PageExtractor`] trait; [`AutoExtractor`] picks
//! the right backend from the document's leading bytes.

pub mod pdf_text;
pub mod plain_text;

use std::path::Path;

pub use pdf_text::PdfTextExtractor;
pub use plain_text::PlainTextExtractor;

/// Errors that can occur while reading a document.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// PDF decoding or text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// The document is neither a PDF nor UTF-8 text.
    #[error("Unsupported document: {0}")]
    Unsupported(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named binary input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Display name (usually the file name).
    pub name: String,
    /// Raw document bytes.
    pub bytes: Vec<u8>,
}

impl Document {
    /// Creates a document from a name and its bytes.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a document from disk, naming it after the file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::Io`] if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        log::debug!("Read {} bytes from {}", bytes.len(), path.display());

        Ok(Self { name, bytes })
    }

    /// Returns `true` if the bytes start with the PDF header magic.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.bytes.starts_with(b"%PDF")
    }
}

/// Source of page text for a document.
///
/// Implementations return one string per page, in page order. A page whose
/// text is unavailable is returned as an empty string rather than an error;
/// only a whole-document failure is reported as [`PdfError`].
pub trait PageExtractor {
    /// Extracts the text of every page of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the document as a whole cannot be decoded.
    fn extract_pages(&self, document: &Document) -> Result<Vec<String>, PdfError>;
}

impl<T: PageExtractor + ?Sized> PageExtractor for &T {
    fn extract_pages(&self, document: &Document) -> Result<Vec<String>, PdfError> {
        (**self).extract_pages(document)
    }
}

/// Dispatches to [`PdfTextExtractor`] for PDF bytes and to
/// [`PlainTextExtractor`] for everything else.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoExtractor;

impl PageExtractor for AutoExtractor {
    fn extract_pages(&self, document: &Document) -> Result<Vec<String>, PdfError> {
        if document.is_pdf() {
            PdfTextExtractor.extract_pages(document)
        } else {
            PlainTextExtractor.extract_pages(document)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_magic() {
        assert!(Document::new("a.pdf", b"%PDF-1.7\n...".to_vec()).is_pdf());
        assert!(!Document::new("a.txt", b"2009 Filme".to_vec()).is_pdf());
    }

    #[test]
    fn auto_extractor_reads_plain_text() {
        let doc = Document::new("bulletin.txt", "page one\x0cpage two");
        let pages = AutoExtractor.extract_pages(&doc).unwrap();
        assert_eq!(pages, vec!["page one", "page two"]);
    }

    #[test]
    fn auto_extractor_reports_corrupt_pdf() {
        let doc = Document::new("broken.pdf", b"%PDF-1.4 garbage with no xref".to_vec());
        assert!(matches!(
            AutoExtractor.extract_pages(&doc),
            Err(PdfError::Extraction(_))
        ));
    }
}
