use serde::Serialize;
use tracing::{debug, warn};
use twskill_core::types::cell;
use twskill_core::{Catalog, Error, Package, Record, Result, TableSource};

use crate::rules::{ReasoningMatch, RuleBook, WarningMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternative {
    pub provider: String,
    pub score: u32,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub query: String,
    pub recommended: String,
    pub display_name: String,
    pub score: u32,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub alternatives: Vec<Alternative>,
    /// The recommended provider's row of the provider table.
    pub provider_info: Option<Record>,
}

#[derive(Debug, Default, Clone)]
struct Tally {
    score: u32,
    reasons: Vec<String>,
}

impl Tally {
    fn add(&mut self, weight: u32, reason: &str, dedup: bool) {
        if dedup && (reason.is_empty() || self.reasons.iter().any(|r| r == reason)) {
            return;
        }
        self.score += weight;
        if !reason.is_empty() {
            self.reasons.push(reason.to_string());
        }
    }
}

fn confidence_weight(confidence: &str) -> u32 {
    match confidence.trim().to_ascii_uppercase().as_str() {
        "HIGH" => 3,
        "MEDIUM" => 2,
        _ => 1,
    }
}

/// Keyword-weighted provider recommendation for one package.
pub struct Recommender<S> {
    catalog: Catalog,
    rules: &'static RuleBook,
    source: S,
}

impl<S: TableSource> Recommender<S> {
    pub fn new(catalog: Catalog, rules: &'static RuleBook, source: S) -> Self {
        Self { catalog, rules, source }
    }

    /// Recommender over the built-in catalog of `package`.
    pub fn for_package(package: Package, source: S) -> Result<Self> {
        let rules = RuleBook::builtin(package)
            .ok_or_else(|| Error::NotFound(format!("recommendation rules for package '{package}'")))?;
        Ok(Self::new(Catalog::builtin(package), rules, source))
    }

    pub fn rules(&self) -> &RuleBook {
        self.rules
    }

    fn table(&self, domain: &str) -> Vec<Record> {
        let Some(spec) = self.catalog.domain(domain) else { return Vec::new() };
        match self.source.load(&spec.file) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(domain, file = %spec.file, error = %e, "failed to load table");
                Vec::new()
            }
        }
    }

    fn score(&self, query: &str) -> Vec<Tally> {
        let mut tallies = vec![Tally::default(); self.rules.providers.len()];
        let query_words: Vec<&str> = query.split_whitespace().collect();

        for row in self.table("reasoning") {
            let scenario = cell(&row, "scenario").to_lowercase();
            let use_cases = cell(&row, "use_cases").to_lowercase();
            let in_scenario = query_words.iter().any(|w| scenario.contains(w));
            let matched = match self.rules.reasoning_match {
                ReasoningMatch::Scenario => in_scenario,
                ReasoningMatch::Broad => {
                    in_scenario
                        || scenario.split_whitespace().any(|w| query.contains(w))
                        || use_cases.split_whitespace().any(|w| query.contains(w))
                }
            };
            if !matched {
                continue;
            }
            let Some(i) = self.rules.provider_index(cell(&row, "recommended_provider")) else { continue };
            tallies[i].add(confidence_weight(cell(&row, "confidence")), cell(&row, "reason"), self.rules.dedup_reasons);
        }

        for rule in self.rules.keyword_rules {
            if !query.contains(rule.keyword) {
                continue;
            }
            for vote in rule.votes {
                if let Some(i) = self.rules.provider_index(vote.provider) {
                    tallies[i].add(vote.weight, vote.reason, self.rules.dedup_reasons);
                }
            }
        }
        tallies
    }

    /// `None` when nothing in the query scores and the rule book has no fallback.
    pub fn recommend(&self, query: &str) -> Option<Recommendation> {
        let lowered = query.to_lowercase();
        let tallies = self.score(&lowered);

        let mut ranked: Vec<usize> = (0..tallies.len()).collect();
        ranked.sort_by(|&a, &b| tallies[b].score.cmp(&tallies[a].score));

        let (pick, score, reasons) = match ranked.first() {
            Some(&best) if tallies[best].score > 0 => (best, tallies[best].score, tallies[best].reasons.clone()),
            _ => {
                let Some(fallback) = self.rules.fallback else {
                    debug!("no provider scored");
                    return None;
                };
                let pick = self.rules.provider_index(fallback.provider).unwrap_or(0);
                (pick, 1, fallback.reasons.iter().map(|r| (*r).to_string()).collect())
            }
        };
        let provider = self.rules.providers[pick];
        debug!(recommended = provider.id, score, "ranked providers");

        let caveats = self.rules.anti_patterns.iter().filter(|a| a.provider.eq_ignore_ascii_case(provider.id));
        let warnings = match self.rules.warnings {
            WarningMode::Triggered => caveats
                .filter(|a| lowered.contains(&a.trigger.to_lowercase()))
                .map(|a| a.warning.to_string())
                .collect(),
            WarningMode::Always => caveats.map(|a| format!("{}: {}", a.trigger, a.warning)).collect(),
        };

        let alternatives = ranked
            .iter()
            .filter(|&&i| i != pick && tallies[i].score > 0)
            .map(|&i| Alternative {
                provider: self.rules.providers[i].id.to_string(),
                score: tallies[i].score,
                reasons: tallies[i].reasons.clone(),
            })
            .collect();

        let provider_info = self
            .table("provider")
            .into_iter()
            .find(|row| cell(row, "provider").trim().eq_ignore_ascii_case(provider.id));

        Some(Recommendation {
            query: query.to_string(),
            recommended: provider.id.to_string(),
            display_name: provider.display_name.to_string(),
            score,
            reasons,
            warnings,
            alternatives,
            provider_info,
        })
    }
}
