//! Text renderers for search hits, domain listings and recommendations.

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::Serialize;
use twskill_core::{DomainInfo, ScoredResult};
use twskill_recommend::Recommendation;

const BOX_WIDTH: usize = 60;
const RECOMMEND_WIDTH: usize = 70;
const MAX_VALUE_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Ascii,
    Simple,
    Json,
    #[value(alias = "md")]
    Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecommendFormat {
    Ascii,
    Simple,
    Json,
}

/// Pretty JSON, non-ASCII text kept as is.
pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Cut `value` to at most `max` characters, marking the cut with `...`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = value.chars().take(keep).collect();
    out.push_str("...");
    out
}

fn pad(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width { line.to_string() } else { format!("{line}{}", " ".repeat(width - len)) }
}

fn ascii_box(title: &str, content: &[String], width: usize) -> String {
    let rule = "═".repeat(width - 2);
    let mut lines = Vec::with_capacity(content.len() + 4);
    lines.push(format!("╔{rule}╗"));
    lines.push(format!("║{}║", pad(&format!(" {title}"), width - 2)));
    lines.push(format!("╠{rule}╣"));
    for line in content {
        let line = truncate(line, width - 4);
        lines.push(format!("║ {} ║", pad(&line, width - 4)));
    }
    lines.push(format!("╚{rule}╝"));
    lines.join("\n")
}

/// Output columns that carry a value, in declared order.
fn filled(result: &ScoredResult) -> impl Iterator<Item = (&String, &String)> {
    result.fields.iter().filter(|(_, v)| !v.is_empty())
}

pub fn ascii_domain(results: &[ScoredResult], domain: &str, query: &str) -> String {
    if results.is_empty() {
        return format!("No results found in '{domain}' for query: {query}");
    }
    let bar = "=".repeat(BOX_WIDTH);
    let mut out = vec![
        String::new(),
        bar.clone(),
        format!("Domain: {} | Query: {query} | Results: {}", domain.to_uppercase(), results.len()),
        bar,
    ];
    for (i, result) in results.iter().enumerate() {
        let mut lines = vec![format!("Score: {}", result.score), String::new()];
        lines.extend(filled(result).map(|(k, v)| format!("{k}: {}", truncate(v, MAX_VALUE_CHARS))));
        out.push(ascii_box(&format!("Result {}", i + 1), &lines, BOX_WIDTH));
        out.push(String::new());
    }
    out.join("\n")
}

pub fn ascii_all(results: &IndexMap<String, Vec<ScoredResult>>, query: &str) -> String {
    if results.is_empty() {
        return format!("No results found for query: {query}");
    }
    let bar = "#".repeat(BOX_WIDTH);
    let mut out = vec![String::new(), bar.clone(), format!("# SEARCH ALL DOMAINS: {query}"), bar];
    out.extend(results.iter().map(|(domain, hits)| ascii_domain(hits, domain, query)));
    out.join("\n")
}

pub fn simple(results: &[ScoredResult], query: &str) -> String {
    if results.is_empty() {
        return format!("No results found for query: {query}");
    }
    let mut out = Vec::new();
    for (i, result) in results.iter().enumerate() {
        out.push(String::new());
        out.push(format!("[{}] Score: {}", i + 1, result.score));
        out.extend(filled(result).map(|(k, v)| format!("  {k}: {v}")));
    }
    out.join("\n")
}

pub fn simple_all(results: &IndexMap<String, Vec<ScoredResult>>, query: &str) -> String {
    if results.is_empty() {
        return format!("No results found for query: {query}");
    }
    results
        .iter()
        .map(|(domain, hits)| format!("[{domain}]{}", simple(hits, query)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn markdown_domain(results: &[ScoredResult], domain: &str, query: &str) -> String {
    if results.is_empty() {
        return format!("No results found in '{domain}' for query: {query}\n");
    }
    let mut out = vec![
        format!("## {}", domain.to_uppercase()),
        String::new(),
        format!("> Query: `{query}` | Results: {}", results.len()),
        String::new(),
    ];
    for (i, result) in results.iter().enumerate() {
        out.push(format!("### Result {} (Score: {})", i + 1, result.score));
        out.push(String::new());
        out.extend(filled(result).map(|(k, v)| format!("- **{k}**: {v}")));
        out.push(String::new());
    }
    out.join("\n")
}

pub fn markdown_all(results: &IndexMap<String, Vec<ScoredResult>>, query: &str, title: &str) -> String {
    if results.is_empty() {
        return format!("# No results found for query: {query}\n");
    }
    let mut out = vec![
        format!("# {title} Search Results"),
        String::new(),
        format!("**Query**: `{query}`"),
        String::new(),
        "---".to_string(),
        String::new(),
    ];
    for (domain, hits) in results {
        out.push(markdown_domain(hits, domain, query));
        out.push("---".to_string());
        out.push(String::new());
    }
    out.join("\n")
}

pub fn domain_list(infos: &[DomainInfo], title: &str) -> String {
    let mut out = vec![String::new(), format!("{title}: available domains"), "=".repeat(50)];
    for info in infos {
        out.push(String::new());
        out.push(format!("  {}", info.domain));
        out.push(format!("    file: {}", info.file));
        out.push(format!("    records: {}", info.total_records));
        out.push(format!("    search columns: {}", info.search_cols.join(", ")));
    }
    out.push(String::new());
    out.join("\n")
}

fn boxed_line(text: &str, width: usize) -> String {
    format!("║{}║", pad(&truncate(text, width - 4), width - 2))
}

pub fn recommendation_ascii(rec: &Recommendation) -> String {
    let w = RECOMMEND_WIDTH;
    let heavy = "═".repeat(w - 2);
    let light = "─".repeat(w - 2);
    let blank = boxed_line("", w);

    let mut lines = vec![
        format!("╔{heavy}╗"),
        boxed_line(" Provider recommendation", w),
        format!("╠{heavy}╣"),
        boxed_line(&format!(" Query: {}", rec.query), w),
        format!("╠{light}╣"),
        boxed_line(&format!(" Recommended: {} {} (score: {})", rec.recommended, rec.display_name, rec.score), w),
        blank.clone(),
        boxed_line(" Reasons:", w),
    ];
    lines.extend(rec.reasons.iter().map(|r| boxed_line(&format!("    • {r}"), w)));

    if !rec.warnings.is_empty() {
        lines.push(blank.clone());
        lines.push(boxed_line(" Caveats:", w));
        lines.extend(rec.warnings.iter().map(|r| boxed_line(&format!("    • {r}"), w)));
    }

    if !rec.alternatives.is_empty() {
        lines.push(blank.clone());
        lines.push(format!("╠{light}╣"));
        lines.push(boxed_line(" Alternatives:", w));
        for alt in &rec.alternatives {
            lines.push(boxed_line(&format!("    • {} (score: {})", alt.provider, alt.score), w));
            lines.extend(alt.reasons.iter().take(2).map(|r| boxed_line(&format!("      - {r}"), w)));
        }
    }

    if let Some(info) = &rec.provider_info {
        let get = |key: &str| info.get(key).map(String::as_str).filter(|v| !v.is_empty());
        lines.push(blank);
        lines.push(format!("╠{light}╣"));
        lines.push(boxed_line(&format!(" {}:", get("display_name").unwrap_or(&rec.recommended)), w));
        lines.push(boxed_line(&format!("    auth: {}", get("auth_method").unwrap_or("N/A")), w));
        if let Some(features) = get("features") {
            lines.push(boxed_line(&format!("    features: {features}"), w));
        }
    }

    lines.push(format!("╚{heavy}╝"));
    lines.join("\n")
}

pub fn no_recommendation(query: &str) -> String {
    format!("No provider matched: {query}")
}

pub fn recommendation_simple(rec: &Recommendation) -> String {
    let mut out = vec![
        format!("Recommended: {}", rec.recommended),
        format!("Score: {}", rec.score),
        String::new(),
        "Reasons:".to_string(),
    ];
    out.extend(rec.reasons.iter().map(|r| format!("  - {r}")));
    if !rec.warnings.is_empty() {
        out.push(String::new());
        out.push("Caveats:".to_string());
        out.extend(rec.warnings.iter().map(|w| format!("  - {w}")));
    }
    if !rec.alternatives.is_empty() {
        out.push(String::new());
        out.push("Alternatives:".to_string());
        out.extend(rec.alternatives.iter().map(|a| format!("  - {} (score: {})", a.provider, a.score)));
    }
    out.join("\n")
}
