//! Practice directory: ODS code lookup and name search over a reference dataset.
//!
//! The dataset is loaded lazily on first access and memoized for the life of
//! the directory. Loading is single-flight: concurrent first callers block on
//! the same load and share its result.
//!
//! A dataset that fails to load leaves the directory empty. The failure is
//! logged once and never retried, so every later lookup reports not-found
//! instead of erroring.

mod parser;
mod ranking;
mod source;

pub use parser::*;
pub use source::*;

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::PracticeRecord;

/// Shortest valid ODS code.
pub const MIN_CODE_LEN: usize = 5;

/// Longest valid ODS code.
pub const MAX_CODE_LEN: usize = 7;

/// Directory loading errors.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset header is missing required column: {0}")]
    MissingColumn(String),

    #[error("Dataset has no header row")]
    EmptyDataset,
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Trim and uppercase an ODS code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Check that a code is 5-7 ASCII alphanumeric characters after trimming.
pub fn validate_identifier_format(code: &str) -> bool {
    let trimmed = code.trim();
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&trimmed.len())
        && trimmed.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Memoized records plus a code index.
struct PracticeIndex {
    records: Vec<PracticeRecord>,
    by_code: HashMap<String, usize>,
}

impl PracticeIndex {
    fn build(loaded: Vec<PracticeRecord>) -> Self {
        let mut records = Vec::with_capacity(loaded.len());
        let mut by_code = HashMap::with_capacity(loaded.len());

        for record in loaded {
            if by_code.contains_key(&record.code) {
                warn!(code = %record.code, "duplicate practice code, keeping first occurrence");
                continue;
            }
            by_code.insert(record.code.clone(), records.len());
            records.push(record);
        }

        Self { records, by_code }
    }
}

/// Lazily loaded, read-only practice directory.
pub struct PracticeDirectory {
    source: Box<dyn PracticeSource>,
    index: OnceLock<PracticeIndex>,
}

impl PracticeDirectory {
    /// Create a directory over a source. Nothing is loaded until first use.
    pub fn new<S: PracticeSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
            index: OnceLock::new(),
        }
    }

    /// Directory over the bundled sample dataset.
    pub fn embedded() -> Self {
        Self::new(EmbeddedSource::default())
    }

    /// Directory over an in-memory record list.
    pub fn from_records(records: Vec<PracticeRecord>) -> Self {
        Self::new(StaticSource::new(records))
    }

    /// Whether the one-time load has completed.
    pub fn is_loaded(&self) -> bool {
        self.index.get().is_some()
    }

    fn index(&self) -> &PracticeIndex {
        self.index
            .get_or_init(|| PracticeIndex::build(self.load_or_empty()))
    }

    fn load_or_empty(&self) -> Vec<PracticeRecord> {
        let source = self.source.describe();
        debug!(%source, "loading practice dataset");

        match self.source.load() {
            Ok(records) => {
                info!(%source, count = records.len(), "practice dataset loaded");
                records
            }
            Err(e) => {
                error!(%source, error = %e, "practice dataset failed to load, directory will be empty");
                Vec::new()
            }
        }
    }

    /// Look up a practice by ODS code (case-insensitive, whitespace-trimmed).
    pub fn lookup(&self, code: &str) -> Option<PracticeRecord> {
        let index = self.index();
        index
            .by_code
            .get(&normalize_code(code))
            .map(|&i| index.records[i].clone())
    }

    /// Find practices whose code or name contains `query` (case-insensitive).
    ///
    /// The query is matched as given, whitespace included. Results follow
    /// dataset order and stop at `limit`. An empty query matches everything.
    pub fn search(&self, query: &str, limit: usize) -> Vec<PracticeRecord> {
        let query_lower = query.to_lowercase();
        self.index()
            .records
            .iter()
            .filter(|p| p.matches(&query_lower))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Suggest practices whose codes are close to a code that was not found.
    pub fn suggest(&self, code: &str, limit: usize) -> Vec<PracticeRecord> {
        ranking::closest_codes(&self.index().records, &normalize_code(code), limit)
    }

    /// All practices in dataset order.
    pub fn all(&self) -> &[PracticeRecord] {
        &self.index().records
    }

    pub fn len(&self) -> usize {
        self.index().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index().records.is_empty()
    }
}

static DEFAULT_DIRECTORY: OnceLock<PracticeDirectory> = OnceLock::new();

/// Process-wide directory over the bundled dataset.
pub fn default_directory() -> &'static PracticeDirectory {
    DEFAULT_DIRECTORY.get_or_init(PracticeDirectory::embedded)
}
