use twskill_core::Catalog;

/// Pick the domain whose keywords occur most often in `query`.
///
/// Keywords match as plain substrings of the lowercased query. The earliest
/// declared domain wins a tie; when nothing matches the catalog default is used.
pub fn detect_domain<'c>(catalog: &'c Catalog, query: &str) -> &'c str {
	let query = query.to_lowercase();
	let mut best: Option<(&str, usize)> = None;
	for domain in &catalog.domains {
		let hits = domain.keywords.iter().filter(|k| query.contains(k.to_lowercase().as_str())).count();
		if hits > best.map_or(0, |(_, n)| n) {
			best = Some((domain.name.as_str(), hits));
		}
	}
	best.map_or(catalog.default_domain.as_str(), |(name, _)| name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use twskill_core::Package;

	#[test]
	fn no_keyword_falls_back_to_default() {
		assert_eq!(detect_domain(&Catalog::builtin(Package::Invoice), "hello world"), "troubleshoot");
		assert_eq!(detect_domain(&Catalog::builtin(Package::Logistics), "hello world"), "provider");
		assert_eq!(detect_domain(&Catalog::builtin(Package::Payment), ""), "provider");
	}

	#[test]
	fn single_domain_keyword_wins() {
		assert_eq!(detect_domain(&Catalog::builtin(Package::Invoice), "零稅率"), "tax");
		assert_eq!(detect_domain(&Catalog::builtin(Package::Logistics), "黑貓"), "logistics_type");
	}

	#[test]
	fn ties_go_to_first_declared_domain() {
		// "issue" is both an operation and a troubleshoot keyword
		assert_eq!(detect_domain(&Catalog::builtin(Package::Invoice), "issue"), "operation");
	}

	#[test]
	fn keywords_are_case_insensitive() {
		assert_eq!(detect_domain(&Catalog::builtin(Package::Payment), "tra10100058"), "error");
		assert_eq!(detect_domain(&Catalog::builtin(Package::Invoice), "ECPAY"), "provider");
	}

	#[test]
	fn substring_matches_count() {
		// "-" and "10000" are invoice error keywords too
		assert_eq!(detect_domain(&Catalog::builtin(Package::Invoice), "MerchantID-10000016 error code"), "error");
	}
}
