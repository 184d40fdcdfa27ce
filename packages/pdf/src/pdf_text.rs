//! PDF page text via [`pdf_extract`].
//!
//! Malformed PDFs can make the decoder panic rather than return an error, so
//! extraction runs under [`std::panic::catch_unwind`] and a panic is reported
//! as [`PdfError::Extraction`] against the one document.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::{Document, PageExtractor, PdfError};

/// Extracts one string per PDF page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PageExtractor for PdfTextExtractor {
    fn extract_pages(&self, document: &Document) -> Result<Vec<String>, PdfError> {
        let result = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&document.bytes)
        }))
        .map_err(|_| {
            PdfError::Extraction(format!("PDF decoder panicked on {}", document.name))
        })?;

        let pages = result.map_err(|e| {
            PdfError::Extraction(format!("failed to extract text from {}: {e}", document.name))
        })?;

        log::debug!(
            "Extracted {} page(s), {} characters from {}",
            pages.len(),
            pages.iter().map(String::len).sum::<usize>(),
            document.name
        );

        Ok(pages)
    }
}
