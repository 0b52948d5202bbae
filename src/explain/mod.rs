//! Explain Module - Feature Attribution & Ranking
//!
//! Answers "why was this score produced" for a single prediction. The
//! decomposition is consistent and reproducible, not a causal claim.

pub mod attribution;
pub mod ranking;

// Re-export common types
pub use attribution::{
    attribute_exact, attribute_heuristic, normalized_importances, AttributionMethod,
    AttributionResult, EXACT_TOLERANCE,
};
pub use ranking::{rank_contributions, Direction, Impact, RankedContribution};
