use std::sync::Arc;

use tracing::{debug, warn};
use twskill_core::types::cell;
use twskill_core::{Catalog, DomainInfo, DomainSpec, KnowledgeSearch, Record, ScoredResult, TableSource};

use crate::cache::{IndexCache, LoadedTable};
use crate::detect::detect_domain;
use crate::tokenizer::tokenize;

/// BM25 search over the tables of one catalog.
pub struct SearchEngine<S> {
	catalog: Catalog,
	source: S,
	cache: Option<IndexCache>,
}

impl<S: TableSource> SearchEngine<S> {
	pub fn new(catalog: Catalog, source: S) -> Self {
		Self { catalog, source, cache: None }
	}

	/// Keep built indexes between calls. Only tables whose source reports a
	/// modification time are cached.
	#[must_use]
	pub fn with_cache(mut self) -> Self {
		self.cache = Some(IndexCache::new());
		self
	}

	pub fn catalog(&self) -> &Catalog { &self.catalog }

	pub fn source(&self) -> &S { &self.source }

	pub fn cache(&self) -> Option<&IndexCache> { self.cache.as_ref() }

	/// Rows of a domain's table. Unreadable tables are logged and read as empty.
	pub fn records(&self, spec: &DomainSpec) -> Vec<Record> {
		match self.source.load(&spec.file) {
			Ok(rows) => rows,
			Err(e) => {
				warn!(domain = %spec.name, file = %spec.file, error = %e, "failed to load table");
				Vec::new()
			}
		}
	}

	fn table(&self, spec: &DomainSpec) -> Arc<LoadedTable> {
		let Some(cache) = &self.cache else {
			return Arc::new(LoadedTable::new(self.records(spec), &spec.search_cols));
		};
		let Some(modified) = self.source.modified(&spec.file) else {
			return Arc::new(LoadedTable::new(self.records(spec), &spec.search_cols));
		};
		if let Some(table) = cache.get(&spec.name, modified) { return table; }
		let table = Arc::new(LoadedTable::new(self.records(spec), &spec.search_cols));
		cache.put(&spec.name, modified, Arc::clone(&table));
		table
	}

	fn search_domain(&self, query_tokens: &[String], spec: &DomainSpec, max_results: usize) -> Vec<ScoredResult> {
		let table = self.table(spec);
		if table.records.is_empty() { return Vec::new(); }

		let hits = rank(table.index.scores(query_tokens), max_results);
		debug!(domain = %spec.name, docs = table.records.len(), hits = hits.len(), "scored table");

		hits.into_iter()
			.map(|(i, score)| ScoredResult {
				fields: spec.output_cols.iter().map(|col| (col.clone(), cell(&table.records[i], col).to_string())).collect(),
				score,
				domain: spec.name.clone(),
			})
			.collect()
	}
}

fn round4(score: f64) -> f64 {
	(score * 10_000.0).round() / 10_000.0
}

/// Positive scores, rounded, best first. Equal rounded scores keep row order.
fn rank(scores: Vec<f64>, max_results: usize) -> Vec<(usize, f64)> {
	let mut hits: Vec<(usize, f64)> = scores
		.into_iter()
		.enumerate()
		.filter(|(_, score)| *score > 0.0)
		.map(|(i, score)| (i, round4(score)))
		.collect();
	hits.sort_by(|a, b| b.1.total_cmp(&a.1));
	hits.truncate(max_results);
	hits
}

impl<S: TableSource> KnowledgeSearch for SearchEngine<S> {
	fn search(&self, query: &str, domain: Option<&str>, max_results: usize) -> Vec<ScoredResult> {
		let query_tokens = tokenize(query);
		if query_tokens.is_empty() || max_results == 0 { return Vec::new(); }
		let name = match domain.filter(|d| !d.is_empty()) {
			Some(d) => d,
			None => self.detect_domain(query),
		};
		let Some(spec) = self.catalog.domain(name) else {
			debug!(domain = name, "unknown domain");
			return Vec::new();
		};
		self.search_domain(&query_tokens, spec, max_results)
	}

	fn detect_domain(&self, query: &str) -> &str {
		detect_domain(&self.catalog, query)
	}

	fn available_domains(&self) -> Vec<&str> {
		self.catalog.domain_names()
	}

	fn domain_info(&self, domain: &str) -> Option<DomainInfo> {
		let spec = self.catalog.domain(domain)?;
		Some(DomainInfo {
			domain: spec.name.clone(),
			file: spec.file.clone(),
			search_cols: spec.search_cols.clone(),
			output_cols: spec.output_cols.clone(),
			total_records: self.records(spec).len(),
		})
	}
}
