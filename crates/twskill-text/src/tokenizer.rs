/// Split mixed Latin/CJK text into index terms.
///
/// Terms come out in three groups: lowercase `[a-z0-9]+` runs in text order,
/// then every CJK ideograph as a unigram, then each adjacent pair of the
/// collected ideographs as a bigram. Pairs are taken over the collected
/// ideographs, so two characters separated by Latin text still form a bigram.
/// Duplicates are kept; term frequency matters to BM25.
pub fn tokenize(text: &str) -> Vec<String> {
	if text.is_empty() { return Vec::new(); }
	let lower = text.to_lowercase();

	let mut tokens = Vec::new();
	let mut run = String::new();
	for c in lower.chars() {
		if c.is_ascii_lowercase() || c.is_ascii_digit() {
			run.push(c);
		} else if !run.is_empty() {
			tokens.push(std::mem::take(&mut run));
		}
	}
	if !run.is_empty() { tokens.push(run); }

	let ideographs: Vec<char> = lower.chars().filter(|c| is_cjk(*c)).collect();
	tokens.extend(ideographs.iter().map(char::to_string));
	tokens.extend(ideographs.windows(2).map(|pair| pair.iter().collect::<String>()));
	tokens
}

/// CJK Unified Ideographs block.
pub fn is_cjk(c: char) -> bool {
	('\u{4e00}'..='\u{9fff}').contains(&c)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mixed_text_yields_runs_then_unigrams_then_bigrams() {
		assert_eq!(tokenize("ECPay B2C 退款"), vec!["ecpay", "b2c", "退", "款", "退款"]);
	}

	#[test]
	fn empty_and_punctuation_only() {
		assert!(tokenize("").is_empty());
		assert!(tokenize(" -,.;!? ").is_empty());
	}

	#[test]
	fn bigrams_span_non_cjk_gaps() {
		assert_eq!(tokenize("發 abc 票"), vec!["abc", "發", "票", "發票"]);
	}

	#[test]
	fn punctuation_splits_runs() {
		assert_eq!(tokenize("MerchantID=3002607, TRA-10100058"), vec!["merchantid", "3002607", "tra", "10100058"]);
	}

	#[test]
	fn duplicates_are_kept() {
		assert_eq!(tokenize("api API"), vec!["api", "api"]);
		assert_eq!(tokenize("稅稅"), vec!["稅", "稅", "稅稅"]);
	}

	#[test]
	fn fullwidth_and_kana_are_dropped() {
		// Fullwidth Latin and kana are outside both token classes.
		assert!(tokenize("ＡＢＣ カナ").is_empty());
	}
}
