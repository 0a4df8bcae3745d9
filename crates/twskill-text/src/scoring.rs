use std::collections::HashMap;

/// Term frequency saturation.
pub const K1: f64 = 1.5;
/// Length normalization strength.
pub const B: f64 = 0.75;

/// Okapi BM25 of one document against a query.
///
/// Every query token contributes, so a term repeated in the query counts once
/// per occurrence. Terms missing from `idf` contribute zero.
pub fn bm25_score(query_tokens: &[String], doc_tokens: &[String], idf: &HashMap<String, f64>, avg_doc_len: f64) -> f64 {
	if query_tokens.is_empty() || doc_tokens.is_empty() { return 0.0; }
	let tf = term_frequencies(doc_tokens);
	bm25_with_tf(query_tokens, &tf, doc_tokens.len(), idf, avg_doc_len)
}

pub(crate) fn term_frequencies(tokens: &[String]) -> HashMap<String, usize> {
	let mut tf = HashMap::new();
	for token in tokens { *tf.entry(token.clone()).or_insert(0) += 1; }
	tf
}

pub(crate) fn bm25_with_tf(
	query_tokens: &[String],
	tf: &HashMap<String, usize>,
	doc_len: usize,
	idf: &HashMap<String, f64>,
	avg_doc_len: f64,
) -> f64 {
	// avg_doc_len is zero only when every document is empty
	let norm = if avg_doc_len > 0.0 { 1.0 - B + B * (doc_len as f64 / avg_doc_len) } else { 1.0 - B };
	let mut score = 0.0;
	for term in query_tokens {
		let Some(&freq) = tf.get(term) else { continue };
		let freq = freq as f64;
		let term_idf = idf.get(term).copied().unwrap_or(0.0);
		score += term_idf * (freq * (K1 + 1.0)) / (freq + K1 * norm);
	}
	score
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toks(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| (*w).to_string()).collect()
	}

	#[test]
	fn single_match_at_average_length() {
		let idf = HashMap::from([("ecpay".to_string(), 2.0)]);
		let doc = toks(&["ecpay", "b2c"]);
		// tf=1, dl=avgdl: idf * 2.5 / (1 + 1.5)
		let score = bm25_score(&toks(&["ecpay"]), &doc, &idf, 2.0);
		assert!((score - 2.0).abs() < 1e-12);
	}

	#[test]
	fn repeated_query_terms_accumulate() {
		let idf = HashMap::from([("void".to_string(), 1.0)]);
		let doc = toks(&["void", "invoice"]);
		let once = bm25_score(&toks(&["void"]), &doc, &idf, 2.0);
		let twice = bm25_score(&toks(&["void", "void"]), &doc, &idf, 2.0);
		assert!((twice - 2.0 * once).abs() < 1e-12);
	}

	#[test]
	fn unknown_terms_and_empty_inputs_score_zero() {
		let idf = HashMap::new();
		assert_eq!(bm25_score(&toks(&["tax"]), &toks(&["tax"]), &idf, 1.0), 0.0);
		assert_eq!(bm25_score(&[], &toks(&["tax"]), &idf, 1.0), 0.0);
		assert_eq!(bm25_score(&toks(&["tax"]), &[], &idf, 1.0), 0.0);
	}

	#[test]
	fn longer_documents_score_lower() {
		let idf = HashMap::from([("atm".to_string(), 1.0)]);
		let short = bm25_score(&toks(&["atm"]), &toks(&["atm"]), &idf, 3.0);
		let long = bm25_score(&toks(&["atm"]), &toks(&["atm", "x", "y", "z", "w"]), &idf, 3.0);
		assert!(short > long);
	}

	#[test]
	fn zero_average_length_skips_ratio() {
		let idf = HashMap::from([("a".to_string(), 1.0)]);
		let tf = term_frequencies(&toks(&["a"]));
		let score = bm25_with_tf(&toks(&["a"]), &tf, 1, &idf, 0.0);
		let expected = (K1 + 1.0) / (1.0 + K1 * (1.0 - B));
		assert!((score - expected).abs() < 1e-12);
	}
}
