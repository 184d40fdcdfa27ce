//! Pre-extracted bulletin text.
//!
//! Text converters such as `pdftotext` emit a form feed (`\x0c`) between
//! pages. Each form-feed-separated chunk becomes one page.

use crate::{Document, PageExtractor, PdfError};

const PAGE_BREAK: char = '\x0c';

/// Splits UTF-8 text into pages on form feeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl PageExtractor for PlainTextExtractor {
    fn extract_pages(&self, document: &Document) -> Result<Vec<String>, PdfError> {
        let text = std::str::from_utf8(&document.bytes).map_err(|e| {
            PdfError::Unsupported(format!("{} is not a PDF or UTF-8 text: {e}", document.name))
        })?;

        let pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_owned).collect();

        log::debug!("Split {} into {} page(s)", document.name, pages.len());

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_form_feed() {
        let doc = Document::new("b.txt", "a\nb\x0c\x0cc");
        let pages = PlainTextExtractor.extract_pages(&doc).unwrap();
        assert_eq!(pages, vec!["a\nb", "", "c"]);
    }

    #[test]
    fn rejects_non_utf8() {
        let doc = Document::new("b.bin", vec![0xff, 0xfe, 0x00]);
        assert!(matches!(
            PlainTextExtractor.extract_pages(&doc),
            Err(PdfError::Unsupported(_))
        ));
    }
}
