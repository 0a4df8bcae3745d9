pub mod recommender;
pub mod rules;

pub use recommender::{Alternative, Recommendation, Recommender};
pub use rules::{Fallback, ReasoningMatch, RuleBook, WarningMode};
