//! twskill-text
//!
//! In-process BM25 over CSV knowledge tables: the mixed Latin/CJK tokenizer,
//! IDF index, scorer, keyword domain detection and the [`SearchEngine`]
//! orchestrator, with an optional modification-time keyed index cache.

pub mod cache;
pub mod detect;
pub mod index;
pub mod scoring;
pub mod search;
pub mod tokenizer;

pub use cache::{IndexCache, LoadedTable};
pub use detect::detect_domain;
pub use index::{compute_idf, CorpusIndex};
pub use scoring::bm25_score;
pub use search::SearchEngine;
pub use tokenizer::tokenize;
