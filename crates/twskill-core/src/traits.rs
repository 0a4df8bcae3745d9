use std::sync::Arc;
use std::time::SystemTime;

use indexmap::IndexMap;

use crate::error::Result;
use crate::types::{DomainInfo, Record, ScoredResult};

/// Where knowledge tables come from.
pub trait TableSource: Send + Sync {
    /// Load every row of `file`. A table that does not exist is empty, not an error.
    fn load(&self, file: &str) -> Result<Vec<Record>>;

    /// Last modification time of `file`, when the source can tell.
    fn modified(&self, _file: &str) -> Option<SystemTime> {
        None
    }
}

impl<T: TableSource + ?Sized> TableSource for Arc<T> {
    fn load(&self, file: &str) -> Result<Vec<Record>> {
        (**self).load(file)
    }

    fn modified(&self, file: &str) -> Option<SystemTime> {
        (**self).modified(file)
    }
}

/// The public search surface consumed by the CLI and by recommenders.
///
/// None of these calls fail: missing data degrades to empty results.
pub trait KnowledgeSearch: Send + Sync {
    fn search(&self, query: &str, domain: Option<&str>, max_results: usize) -> Vec<ScoredResult>;

    fn detect_domain(&self, query: &str) -> &str;

    fn available_domains(&self) -> Vec<&str>;

    fn domain_info(&self, domain: &str) -> Option<DomainInfo>;

    /// Search every domain, keeping only those with hits, in declaration order.
    fn search_all(&self, query: &str, max_per_domain: usize) -> IndexMap<String, Vec<ScoredResult>> {
        let mut all = IndexMap::new();
        for domain in self.available_domains() {
            let hits = self.search(query, Some(domain), max_per_domain);
            if !hits.is_empty() {
                all.insert(domain.to_string(), hits);
            }
        }
        all
    }
}
