use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use tracing::debug;
use twskill_core::Record;

use crate::index::CorpusIndex;

/// A loaded table together with its BM25 index.
#[derive(Debug, Default)]
pub struct LoadedTable {
	pub records: Vec<Record>,
	pub index: CorpusIndex,
}

impl LoadedTable {
	pub fn new(records: Vec<Record>, search_cols: &[String]) -> Self {
		let index = CorpusIndex::from_records(&records, search_cols);
		Self { records, index }
	}
}

struct Entry {
	modified: SystemTime,
	table: Arc<LoadedTable>,
}

/// Per-domain index cache, valid while the table file is unchanged.
#[derive(Default)]
pub struct IndexCache {
	entries: Mutex<HashMap<String, Entry>>,
}

impl IndexCache {
	pub fn new() -> Self { Self::default() }

	/// The cached table for `domain` if it was built from the same file version.
	pub fn get(&self, domain: &str, modified: SystemTime) -> Option<Arc<LoadedTable>> {
		let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
		match entries.get(domain) {
			Some(entry) if entry.modified == modified => {
				debug!(domain, "index cache hit");
				Some(Arc::clone(&entry.table))
			}
			Some(_) => {
				debug!(domain, "index cache stale");
				None
			}
			None => None,
		}
	}

	pub fn put(&self, domain: &str, modified: SystemTime, table: Arc<LoadedTable>) {
		let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
		entries.insert(domain.to_string(), Entry { modified, table });
	}

	pub fn invalidate(&self, domain: &str) {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(domain);
	}

	pub fn clear(&self) {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
	}

	pub fn len(&self) -> usize {
		self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
	}

	pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;

	#[test]
	fn entry_is_reused_only_for_same_mtime() {
		let cache = IndexCache::new();
		let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
		cache.put("tax", t0, Arc::new(LoadedTable::default()));

		assert!(cache.get("tax", t0).is_some());
		assert!(cache.get("tax", t0 + Duration::from_secs(1)).is_none());
		assert!(cache.get("error", t0).is_none());
	}

	#[test]
	fn invalidate_and_clear() {
		let cache = IndexCache::new();
		let t0 = SystemTime::UNIX_EPOCH;
		cache.put("a", t0, Arc::new(LoadedTable::default()));
		cache.put("b", t0, Arc::new(LoadedTable::default()));
		cache.invalidate("a");
		assert_eq!(cache.len(), 1);
		cache.clear();
		assert!(cache.is_empty());
	}
}
