//! Backing datasets for the practice directory.

use std::path::PathBuf;

use super::{parse_practices, DirectoryResult};
use crate::models::PracticeRecord;

/// Bundled sample practices.
pub const EMBEDDED_PRACTICES_CSV: &str = include_str!("../../data/practices.csv");

/// Something that can produce the directory's records.
///
/// Called at most once per directory.
pub trait PracticeSource: Send + Sync {
    /// Load every practice record.
    fn load(&self) -> DirectoryResult<Vec<PracticeRecord>>;

    /// Short label for log output.
    fn describe(&self) -> String;
}

/// CSV text compiled into the binary.
pub struct EmbeddedSource {
    csv: &'static str,
}

impl EmbeddedSource {
    pub fn new(csv: &'static str) -> Self {
        Self { csv }
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::new(EMBEDDED_PRACTICES_CSV)
    }
}

impl PracticeSource for EmbeddedSource {
    fn load(&self) -> DirectoryResult<Vec<PracticeRecord>> {
        parse_practices(self.csv)
    }

    fn describe(&self) -> String {
        "embedded".into()
    }
}

/// CSV file read at load time.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PracticeSource for FileSource {
    fn load(&self) -> DirectoryResult<Vec<PracticeRecord>> {
        let text = std::fs::read_to_string(&self.path)?;
        parse_practices(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Owned CSV text, e.g. handed over by a host app.
pub struct CsvTextSource {
    csv: String,
}

impl CsvTextSource {
    pub fn new(csv: impl Into<String>) -> Self {
        Self { csv: csv.into() }
    }
}

impl PracticeSource for CsvTextSource {
    fn load(&self) -> DirectoryResult<Vec<PracticeRecord>> {
        parse_practices(&self.csv)
    }

    fn describe(&self) -> String {
        format!("csv text ({} bytes)", self.csv.len())
    }
}

/// Records already in memory.
pub struct StaticSource {
    records: Vec<PracticeRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<PracticeRecord>) -> Self {
        Self { records }
    }
}

impl PracticeSource for StaticSource {
    fn load(&self) -> DirectoryResult<Vec<PracticeRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_source_loads_sample_practices() {
        let records = EmbeddedSource::default().load().unwrap();
        assert_eq!(records.len(), 19);
        assert_eq!(records[0].code, "E87001");
        assert_eq!(records[0].address.as_deref(), Some("London"));
    }

    #[test]
    fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "code,name,list_size").unwrap();
        writeln!(file, "P12345,Harbour View Surgery,6400").unwrap();

        let records = FileSource::new(file.path()).load().unwrap();
        assert_eq!(records, vec![PracticeRecord::new("P12345", "Harbour View Surgery", 6400)]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileSource::new(dir.path().join("missing.csv")).load();
        assert!(matches!(result, Err(super::super::DirectoryError::Io(_))));
    }
}
