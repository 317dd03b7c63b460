use std::path::Path;

use tracing::{info, warn};

/// Receives pipeline progress events. Extraction and reconciliation report
/// through this seam instead of writing to the console themselves.
pub trait Progress {
    fn phase(&self, step: usize, total: usize, message: &str);

    fn document_opened(&self, path: &Path, page_count: usize);

    /// Emitted every 10 pages while a document is being scanned.
    fn pages_processed(&self, processed: usize, total: usize);

    fn document_extracted(&self, path: &Path, record_count: usize);

    fn document_failed(&self, path: &Path, error: &anyhow::Error);
}

/// Logs progress through the tracing subscriber.
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn phase(&self, step: usize, total: usize, message: &str) {
        info!(step, total, "{message}");
    }

    fn document_opened(&self, path: &Path, page_count: usize) {
        info!(path = %path.display(), pages = page_count, "processing document");
    }

    fn pages_processed(&self, processed: usize, total: usize) {
        info!(processed, total, "pages processed");
    }

    fn document_extracted(&self, path: &Path, record_count: usize) {
        info!(path = %path.display(), products = record_count, "extraction complete");
    }

    fn document_failed(&self, path: &Path, error: &anyhow::Error) {
        warn!(path = %path.display(), error = %error, "could not process document");
    }
}
