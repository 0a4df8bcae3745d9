use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::TableSource;
use crate::types::Record;

/// Parse a CSV stream with a header row into records.
///
/// Short rows are accepted; their missing columns are simply absent from the
/// record. Cells beyond the header width are dropped.
pub fn read_table<R: Read>(reader: R) -> std::result::Result<Vec<Record>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.to_string()
        })
        .collect();

    let mut rows = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        rows.push(record);
    }
    Ok(rows)
}

/// Knowledge tables stored as `<root>/<file>` CSV files.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }
}

impl TableSource for CsvDirectory {
    fn load(&self, file: &str) -> Result<Vec<Record>> {
        let path = self.path_of(file);
        if !path.exists() {
            debug!(path = %path.display(), "table file missing, treating as empty");
            return Ok(Vec::new());
        }
        let handle = File::open(&path)?;
        let rows = read_table(handle).map_err(|source| Error::Csv { path: path.clone(), source })?;
        debug!(path = %path.display(), rows = rows.len(), "loaded table");
        Ok(rows)
    }

    fn modified(&self, file: &str) -> Option<SystemTime> {
        fs::metadata(self.path_of(file)).and_then(|m| m.modified()).ok()
    }
}

/// In-memory tables keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    tables: HashMap<String, Vec<Record>>,
}

impl MemoryTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: impl Into<String>, rows: Vec<Record>) {
        self.tables.insert(file.into(), rows);
    }

    #[must_use]
    pub fn with_table(mut self, file: impl Into<String>, rows: Vec<Record>) -> Self {
        self.insert(file, rows);
        self
    }

    /// Add a table parsed from CSV text.
    pub fn with_csv(mut self, file: &str, text: &str) -> Result<Self> {
        let rows = read_table(text.as_bytes()).map_err(|source| Error::Csv { path: PathBuf::from(file), source })?;
        self.insert(file, rows);
        Ok(self)
    }
}

impl TableSource for MemoryTables {
    fn load(&self, file: &str) -> Result<Vec<Record>> {
        Ok(self.tables.get(file).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bom_is_stripped() {
        let rows = read_table("\u{feff}code,message\n1001,bad\n".as_bytes()).expect("parse");
        assert_eq!(rows[0].get("code").map(String::as_str), Some("1001"));
    }

    #[test]
    fn short_rows_are_kept() {
        let rows = read_table("a,b,c\n1,2\n".as_bytes()).expect("parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("b").map(String::as_str), Some("2"));
        assert!(rows[0].get("c").is_none());
    }

    #[test]
    fn memory_tables_unknown_file_is_empty() {
        let tables = MemoryTables::new();
        assert!(tables.load("nothing.csv").expect("load").is_empty());
    }
}
