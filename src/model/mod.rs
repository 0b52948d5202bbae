//! Model Module - Classifier Capability, Risk Tiers, Tree Structure
//!
//! The oracle boundary: everything the engine knows about the pretrained
//! model lives behind the `Classifier` trait.

pub mod classifier;
pub mod risk;
pub mod trees;

// Re-export common types
pub use classifier::{infer, predict_probability, Classifier, PredictionResult};
pub use risk::RiskLevel;
pub use trees::{DecisionTree, TreeEnsemble, TreeNode};
