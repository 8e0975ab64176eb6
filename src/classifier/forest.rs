use super::CropClassifier;
use crate::error::{AdvisoryError, Result};
use crate::reference::Feature;
use serde::Deserialize;
use std::path::Path;

/// A frozen random-forest export: an ordered class list plus a set of
/// binary decision trees voting over it.
///
/// The artifact is produced offline by the training pipeline and serialized
/// as JSON. It is loaded once at startup, validated structurally, and never
/// modified during serving, so it may be shared across requests without
/// synchronization.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionForest {
    pub classes: Vec<String>,
    trees: Vec<Tree>,
}

#[derive(Debug, Clone, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: usize,
    },
}

impl DecisionForest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AdvisoryError::InvalidData(format!(
                "cannot read classifier artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        let forest: DecisionForest = serde_json::from_str(&text).map_err(|e| {
            AdvisoryError::InvalidData(format!(
                "malformed classifier artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        forest.validate()?;
        tracing::info!(
            "Loaded classifier artifact: {} trees over {} classes",
            forest.trees.len(),
            forest.classes.len()
        );
        Ok(forest)
    }

    /// Structural validation at load time. A broken artifact is a fatal
    /// startup condition, so everything checkable up front is checked here.
    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(AdvisoryError::InvalidData(
                "classifier artifact has no classes".into(),
            ));
        }
        if self.trees.is_empty() {
            return Err(AdvisoryError::InvalidData(
                "classifier artifact has no trees".into(),
            ));
        }

        for (i, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(AdvisoryError::InvalidData(format!(
                    "classifier tree {} has no nodes",
                    i
                )));
            }
            for node in &tree.nodes {
                match node {
                    Node::Split {
                        feature,
                        left,
                        right,
                        ..
                    } => {
                        if *feature >= Feature::COUNT {
                            return Err(AdvisoryError::InvalidData(format!(
                                "classifier tree {} splits on feature index {}",
                                i, feature
                            )));
                        }
                        if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                            return Err(AdvisoryError::InvalidData(format!(
                                "classifier tree {} has an out-of-range child index",
                                i
                            )));
                        }
                    }
                    Node::Leaf { leaf } => {
                        if *leaf >= self.classes.len() {
                            return Err(AdvisoryError::InvalidData(format!(
                                "classifier tree {} has a leaf outside the class list",
                                i
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn walk(&self, tree: &Tree, features: &[f64]) -> Result<usize> {
        let mut index = 0;
        // An acyclic tree terminates within nodes.len() steps; anything
        // longer means a cycle in the artifact.
        for _ in 0..tree.nodes.len() {
            match &tree.nodes[index] {
                Node::Leaf { leaf } => return Ok(*leaf),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
        Err(AdvisoryError::Inference(
            "classifier tree walk did not reach a leaf".into(),
        ))
    }
}

impl CropClassifier for DecisionForest {
    fn predict(&self, features: &[f64]) -> Result<String> {
        if features.len() != Feature::COUNT {
            return Err(AdvisoryError::Inference(format!(
                "expected {} features, got {}",
                Feature::COUNT,
                features.len()
            )));
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(AdvisoryError::Inference(
                "feature vector contains a non-finite value".into(),
            ));
        }

        let mut votes = vec![0u32; self.classes.len()];
        for tree in &self.trees {
            let class = self.walk(tree, features)?;
            votes[class] += 1;
        }

        // Argmax with lowest-index tie-break, matching the frozen export.
        let winner = votes
            .iter()
            .enumerate()
            .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
            .map(|(i, _)| i)
            .ok_or_else(|| AdvisoryError::Inference("empty vote tally".into()))?;

        Ok(self.classes[winner].clone())
    }
}
