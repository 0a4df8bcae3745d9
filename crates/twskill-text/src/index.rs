use std::collections::{HashMap, HashSet};

use twskill_core::types::{cell, Record};

use crate::scoring::{bm25_with_tf, term_frequencies};
use crate::tokenizer::tokenize;

/// Inverse document frequency of every term in the corpus.
///
/// `idf(t) = ln((N - df + 0.5) / (df + 0.5) + 1)`, where `df` counts each
/// document at most once. Always non-negative.
pub fn compute_idf(documents: &[Vec<String>]) -> HashMap<String, f64> {
	let n = documents.len() as f64;
	let mut df: HashMap<&str, usize> = HashMap::new();
	for doc in documents {
		let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
		for term in unique { *df.entry(term).or_insert(0) += 1; }
	}
	df.into_iter()
		.map(|(term, freq)| {
			let freq = freq as f64;
			(term.to_string(), ((n - freq + 0.5) / (freq + 0.5) + 1.0).ln())
		})
		.collect()
}

/// Text of a record's search columns, joined by single spaces in declared order.
pub fn document_text(record: &Record, search_cols: &[String]) -> String {
	search_cols.iter().map(|col| cell(record, col)).collect::<Vec<_>>().join(" ")
}

/// Everything BM25 needs about one table, built once per load.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
	term_freqs: Vec<HashMap<String, usize>>,
	doc_lens: Vec<usize>,
	idf: HashMap<String, f64>,
	avg_doc_len: f64,
}

impl CorpusIndex {
	pub fn build(documents: &[Vec<String>]) -> Self {
		if documents.is_empty() { return Self::default(); }
		let idf = compute_idf(documents);
		let doc_lens: Vec<usize> = documents.iter().map(Vec::len).collect();
		let avg_doc_len = doc_lens.iter().sum::<usize>() as f64 / documents.len() as f64;
		let term_freqs = documents.iter().map(|d| term_frequencies(d)).collect();
		Self { term_freqs, doc_lens, idf, avg_doc_len }
	}

	/// Tokenize each record's search columns; documents align 1:1 with `records`.
	pub fn from_records(records: &[Record], search_cols: &[String]) -> Self {
		let documents: Vec<Vec<String>> = records.iter().map(|r| tokenize(&document_text(r, search_cols))).collect();
		Self::build(&documents)
	}

	pub fn len(&self) -> usize { self.doc_lens.len() }

	pub fn is_empty(&self) -> bool { self.doc_lens.is_empty() }

	pub fn avg_doc_len(&self) -> f64 { self.avg_doc_len }

	pub fn idf(&self, term: &str) -> f64 {
		self.idf.get(term).copied().unwrap_or(0.0)
	}

	/// BM25 score of every document, in document order.
	pub fn scores(&self, query_tokens: &[String]) -> Vec<f64> {
		if query_tokens.is_empty() { return vec![0.0; self.len()]; }
		self.term_freqs
			.iter()
			.zip(&self.doc_lens)
			.map(|(tf, &len)| bm25_with_tf(query_tokens, tf, len, &self.idf, self.avg_doc_len))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scoring::bm25_score;

	fn doc(text: &str) -> Vec<String> { tokenize(text) }

	#[test]
	fn idf_counts_each_document_once() {
		let docs = vec![doc("atm atm atm"), doc("credit card")];
		let idf = compute_idf(&docs);
		// N=2, df=1
		let expected = (1.5f64 / 1.5 + 1.0).ln();
		assert!((idf["atm"] - expected).abs() < 1e-12);
		assert!((idf["credit"] - expected).abs() < 1e-12);
	}

	#[test]
	fn idf_stays_positive_for_ubiquitous_terms() {
		let docs = vec![doc("ecpay"), doc("ecpay"), doc("ecpay")];
		let idf = compute_idf(&docs);
		assert!(idf["ecpay"] > 0.0);
		assert!(compute_idf(&[]).is_empty());
	}

	#[test]
	fn index_scores_match_direct_scoring() {
		let docs = vec![doc("ECPay B2C 開立發票"), doc("SmilePay 作廢"), doc("")];
		let index = CorpusIndex::build(&docs);
		let query = tokenize("ecpay 發票");
		let idf = compute_idf(&docs);
		let scores = index.scores(&query);
		assert_eq!(scores.len(), 3);
		for (i, d) in docs.iter().enumerate() {
			let direct = bm25_score(&query, d, &idf, index.avg_doc_len());
			assert!((scores[i] - direct).abs() < 1e-12);
		}
		assert!(scores[0] > 0.0);
		assert_eq!(scores[2], 0.0);
	}

	#[test]
	fn document_text_follows_declared_columns() {
		let mut record = Record::new();
		record.insert("b".into(), "second".into());
		record.insert("a".into(), "first".into());
		let cols = vec!["a".to_string(), "missing".to_string(), "b".to_string()];
		assert_eq!(document_text(&record, &cols), "first  second");
	}

	#[test]
	fn empty_corpus_has_no_documents() {
		let index = CorpusIndex::from_records(&[], &["name".to_string()]);
		assert!(index.is_empty());
		assert!(index.scores(&tokenize("anything")).is_empty());
	}
}
