//! Gradient-boosted tree ensemble
//!
//! Scores rows with a regression tree ensemble exported in the XGBoost JSON
//! dump layout (one nested object per tree):
//!
//! ```text
//! {"nodeid": 0, "split": "Orders", "split_condition": 60.5,
//!  "yes": 1, "no": 2, "missing": 1, "children": [
//!     {"nodeid": 1, "leaf": -12.5},
//!     {"nodeid": 2, "leaf": 40.0}]}
//! ```
//!
//! A row goes to `yes` when `value < split_condition` and to `missing` when
//! the value is NaN. The prediction is `base_score + Σ leaf` over all trees.

use predictor_spi::{FeatureFrame, PredictorError, Regressor, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

fn default_base_score() -> f64 {
    0.5
}

/// On-disk model document
#[derive(Debug, Deserialize)]
struct EnsembleArtifact {
    #[serde(default = "default_base_score")]
    base_score: f64,
    /// Training-time column order; `f<N>` split names index into it
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    trees: Vec<DumpNode>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DumpNode {
    Split {
        nodeid: usize,
        split: String,
        split_condition: f64,
        yes: usize,
        no: usize,
        #[serde(default)]
        missing: Option<usize>,
        children: Vec<DumpNode>,
    },
    Leaf {
        nodeid: usize,
        leaf: f64,
    },
}

/// Flattened tree node; children are indices into [`Tree::nodes`]
#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Children always have larger ids than their parent, so the walk ends.
    fn score(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let x = row[feature];
                    idx = if x.is_nan() {
                        missing
                    } else if x < threshold {
                        yes
                    } else {
                        no
                    };
                }
            }
        }
    }
}

/// Regression tree ensemble bound to a fixed feature layout
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    feature_names: Vec<String>,
    base_score: f64,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Parse a model document and resolve its splits against `schema`
    pub fn from_json(json: &str, schema: &[String]) -> Result<Self> {
        let artifact: EnsembleArtifact =
            serde_json::from_str(json).map_err(|e| PredictorError::InvalidModel(e.to_string()))?;

        if let Some(names) = &artifact.feature_names {
            if names.as_slice() != schema {
                return Err(PredictorError::SchemaMismatch {
                    expected: schema.len(),
                    actual: names.len(),
                });
            }
        }

        let trees = artifact
            .trees
            .iter()
            .map(|root| flatten(root, schema))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            feature_names: schema.to_vec(),
            base_score: artifact.base_score,
            trees,
        })
    }

    /// Read a model document from disk
    pub fn load(path: impl AsRef<Path>, schema: &[String]) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let model = Self::from_json(&json, schema)?;
        info!(
            path = %path.display(),
            trees = model.n_trees(),
            "loaded regressor"
        );
        Ok(model)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn base_score(&self) -> f64 {
        self.base_score
    }

    /// Score one aligned row
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.score(row)).sum::<f64>()
    }
}

impl Regressor for TreeEnsemble {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<f64>> {
        if frame.columns() != self.feature_names.as_slice() {
            return Err(PredictorError::SchemaMismatch {
                expected: self.feature_names.len(),
                actual: frame.n_columns(),
            });
        }
        if let Some(short) = frame.rows().iter().find(|r| r.len() != self.feature_names.len()) {
            return Err(PredictorError::SchemaMismatch {
                expected: self.feature_names.len(),
                actual: short.len(),
            });
        }
        Ok(frame.rows().iter().map(|r| self.predict_row(r)).collect())
    }
}

fn resolve_feature(name: &str, schema: &[String]) -> Result<usize> {
    if let Some(idx) = schema.iter().position(|c| c == name) {
        return Ok(idx);
    }
    name.strip_prefix('f')
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|&idx| idx < schema.len())
        .ok_or_else(|| PredictorError::UnknownFeature(name.to_string()))
}

/// Lay a nested dump tree out by node id
fn flatten(root: &DumpNode, schema: &[String]) -> Result<Tree> {
    let mut slots: Vec<Option<Node>> = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let (id, flat) = match node {
            DumpNode::Leaf { nodeid, leaf } => (*nodeid, Node::Leaf(*leaf)),
            DumpNode::Split {
                nodeid,
                split,
                split_condition,
                yes,
                no,
                missing,
                children,
            } => {
                let missing = missing.unwrap_or(*yes);
                if [*yes, *no, missing].iter().any(|&child| child <= *nodeid) {
                    return Err(PredictorError::InvalidModel(format!(
                        "node {nodeid} points back to an ancestor"
                    )));
                }
                stack.extend(children.iter());
                (
                    *nodeid,
                    Node::Split {
                        feature: resolve_feature(split, schema)?,
                        threshold: *split_condition,
                        yes: *yes,
                        no: *no,
                        missing,
                    },
                )
            }
        };

        if slots.len() <= id {
            slots.resize(id + 1, None);
        }
        if slots[id].replace(flat).is_some() {
            return Err(PredictorError::InvalidModel(format!("duplicate node id {id}")));
        }
    }

    let nodes = slots
        .into_iter()
        .enumerate()
        .map(|(id, slot)| {
            slot.ok_or_else(|| PredictorError::InvalidModel(format!("missing node id {id}")))
        })
        .collect::<Result<Vec<_>>>()?;

    // every referenced child must exist
    for node in &nodes {
        if let Node::Split { yes, no, missing, .. } = *node {
            if [yes, no, missing].iter().any(|&c| c >= nodes.len()) {
                return Err(PredictorError::InvalidModel(
                    "split refers to a node outside the tree".to_string(),
                ));
            }
        }
    }

    Ok(Tree { nodes })
}
