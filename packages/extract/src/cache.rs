//! Memoization of whole-batch scans.
//!
//! A scan is a pure function of the documents and the layout, so its result
//! can be reused whenever both are unchanged. The key is a SHA-256 digest of
//! the layout and of every document's bytes in order; document names do not
//! take part, so re-uploading the same file under another name still hits.

use std::collections::BTreeMap;
use std::sync::Arc;

use cinedata_pdf::{Document, PageExtractor};
use sha2::{Digest as _, Sha256};

use crate::config::BulletinLayout;
use crate::progress::ProgressCallback;
use crate::scan::{ScanReport, scan_documents};

/// Hex SHA-256 over the ordered contents of `documents`.
///
/// Each document contributes its length followed by its bytes, so
/// concatenation boundaries cannot collide.
#[must_use]
pub fn document_set_digest(documents: &[Document]) -> String {
    let mut hasher = Sha256::new();
    hash_documents(&mut hasher, documents);
    hex::encode(hasher.finalize())
}

/// Cache key for scanning `documents` with `layout`.
#[must_use]
pub fn cache_key(documents: &[Document], layout: &BulletinLayout) -> String {
    let mut hasher = Sha256::new();

    let layout_toml = toml::to_string(layout).unwrap_or_else(|_| layout.id.clone());
    hasher.update((layout_toml.len() as u64).to_le_bytes());
    hasher.update(layout_toml.as_bytes());

    hash_documents(&mut hasher, documents);
    hex::encode(hasher.finalize())
}

fn hash_documents(hasher: &mut Sha256, documents: &[Document]) {
    hasher.update((documents.len() as u64).to_le_bytes());
    for document in documents {
        hasher.update((document.bytes.len() as u64).to_le_bytes());
        hasher.update(&document.bytes);
    }
}

/// Caller-supplied storage for scan results.
pub trait ScanCache {
    /// Returns the cached report for `key`, if any.
    fn get(&self, key: &str) -> Option<ScanReport>;

    /// Stores `report` under `key`.
    fn insert(&mut self, key: String, report: ScanReport);
}

/// An in-process [`ScanCache`].
#[derive(Debug, Default)]
pub struct MemoryScanCache {
    entries: BTreeMap<String, ScanReport>,
}

impl MemoryScanCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached batches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScanCache for MemoryScanCache {
    fn get(&self, key: &str) -> Option<ScanReport> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: String, report: ScanReport) {
        self.entries.insert(key, report);
    }
}

/// [`scan_documents`], consulting `cache` first.
pub fn scan_documents_cached(
    documents: &[Document],
    extractor: &impl PageExtractor,
    layout: &BulletinLayout,
    cache: &mut dyn ScanCache,
    progress: &Arc<dyn ProgressCallback>,
) -> ScanReport {
    let key = cache_key(documents, layout);

    if let Some(report) = cache.get(&key) {
        log::debug!("Scan cache hit for {key}");
        progress.finish(format!(
            "Reused cached scan, {} records",
            report.records.len()
        ));
        return report;
    }

    log::debug!("Scan cache miss for {key}");
    let report = scan_documents(documents, extractor, layout, progress);
    cache.insert(key, report.clone());
    report
}
