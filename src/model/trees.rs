//! Decision Tree Structure
//!
//! Optional internal structure a classifier may expose for exact
//! attribution. The engine never builds or trains these; it only walks them.
//!
//! Nodes live in an indexed arena per tree (node 0 is the root). Every node,
//! split or leaf, carries the expected model output at that node over the
//! training population, per class. That per-node expectation is what makes
//! additive path attribution possible.

use serde::{Deserialize, Serialize};

use crate::features::FEATURE_COUNT;

// ============================================================================
// TREE NODES
// ============================================================================

/// One node of a decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal split: `feature <= threshold` routes left, else right.
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        /// Expected output at this node, one entry per class.
        expected: Vec<f32>,
    },
    /// Terminal node.
    Leaf {
        /// Expected output at this node, one entry per class.
        expected: Vec<f32>,
    },
}

impl TreeNode {
    pub fn expected(&self) -> &[f32] {
        match self {
            TreeNode::Split { expected, .. } => expected,
            TreeNode::Leaf { expected } => expected,
        }
    }
}

/// A single decision tree as an indexed node arena, root at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }
}

// ============================================================================
// ENSEMBLE
// ============================================================================

/// Tree ensemble whose per-tree outputs are averaged into a probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub trees: Vec<DecisionTree>,
    /// Number of output classes each node reports (1 for scalar trees,
    /// 2 for binary per-class trees).
    pub n_classes: usize,
}

impl TreeEnsemble {
    /// Output channel used for attribution: the positive class when the
    /// ensemble is binary and reports per-class structure, else channel 0.
    pub fn positive_class(&self) -> usize {
        if self.n_classes >= 2 {
            1
        } else {
            0
        }
    }

    /// Structural validation: node references in range, feature indices
    /// within the 9-feature layout, expected vectors covering the declared
    /// class count.
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        if self.n_classes == 0 {
            return Err("ensemble reports zero classes".to_string());
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {} has no nodes", t));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if node.expected().len() < self.n_classes {
                    return Err(format!(
                        "tree {} node {} reports {} class values, expected {}",
                        t,
                        n,
                        node.expected().len(),
                        self.n_classes
                    ));
                }
                if let TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!(
                            "tree {} node {} splits on feature {} (layout has {})",
                            t, n, feature, FEATURE_COUNT
                        ));
                    }
                    if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                        return Err(format!("tree {} node {} child index out of range", t, n));
                    }
                    // Children must sit deeper in the arena or a walk could loop
                    if *left <= n || *right <= n {
                        return Err(format!(
                            "tree {} node {} references a non-descendant child",
                            t, n
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
