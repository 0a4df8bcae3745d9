//! Domain types shared by the search and recommendation engines.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One row of a knowledge table: column name to cell value, in header order.
pub type Record = IndexMap<String, String>;

/// Look up a column, treating an absent column as an empty cell.
pub fn cell<'a>(record: &'a Record, column: &str) -> &'a str {
    record.get(column).map_or("", String::as_str)
}

/// A search hit as handed to renderers.
///
/// `fields` holds the domain's output columns in declared order. When
/// serialized, the two synthetic keys `_score` and `_domain` follow them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub fields: Record,
    #[serde(rename = "_score")]
    pub score: f64,
    #[serde(rename = "_domain")]
    pub domain: String,
}

impl ScoredResult {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Static description of a domain plus the size of its backing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInfo {
    pub domain: String,
    pub file: String,
    pub search_cols: Vec<String>,
    pub output_cols: Vec<String>,
    pub total_records: usize,
}
