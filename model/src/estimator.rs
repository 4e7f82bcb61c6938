use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{ModelErr, Result};

/// A node of a fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Goes to `left` when `x[feature] <= threshold`, to `right` otherwise.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// The fitted regressor at the end of a pipeline, working on encoded features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    /// A regression tree stored as a flat node array rooted at index 0.
    DecisionTree { nodes: Vec<Node> },
    /// An ordinary linear model.
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
}

impl Estimator {
    /// Checks that the estimator is consistent with `width` encoded features.
    ///
    /// A tree must be acyclic and every node must be reachable from the root at index 0,
    /// which keeps every walk finite.
    ///
    /// # Errors
    /// Returns `ModelErr::Corrupt` describing the first inconsistency found.
    pub fn validate(&self, width: usize) -> Result<()> {
        match self {
            Estimator::DecisionTree { nodes } => validate_tree(nodes, width),
            Estimator::Linear { coefficients, .. } => {
                if coefficients.len() != width {
                    return corrupt(format!(
                        "linear model has {} coefficients for {width} encoded features",
                        coefficients.len()
                    ));
                }
                Ok(())
            }
        }
    }

    /// Predicts one value per row of `x`.
    ///
    /// The estimator must have been validated against `x.ncols()`.
    pub fn predict(&self, x: ArrayView2<f64>) -> Array1<f64> {
        match self {
            Estimator::DecisionTree { nodes } => {
                Array1::from_iter(x.outer_iter().map(|row| walk(nodes, row)))
            }
            Estimator::Linear {
                intercept,
                coefficients,
            } => x.dot(&ArrayView1::from(coefficients.as_slice())) + *intercept,
        }
    }
}

fn corrupt(reason: String) -> Result<()> {
    Err(ModelErr::Corrupt { reason })
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Open,
    Done,
}

fn validate_tree(nodes: &[Node], width: usize) -> Result<()> {
    if nodes.is_empty() {
        return corrupt("decision tree has no nodes".into());
    }

    for (idx, node) in nodes.iter().enumerate() {
        let Node::Split {
            feature,
            threshold,
            left,
            right,
        } = *node
        else {
            continue;
        };

        if feature >= width {
            return corrupt(format!(
                "node {idx} splits on feature {feature} but only {width} features are encoded"
            ));
        }
        if threshold.is_nan() {
            return corrupt(format!("node {idx} has a NaN threshold"));
        }
        for child in [left, right] {
            if child >= nodes.len() {
                return corrupt(format!("node {idx} has invalid child {child}"));
            }
        }
    }

    // Depth first from the root; meeting an open node again means a cycle.
    let mut state = vec![Visit::New; nodes.len()];
    let mut stack = vec![(0, false)];

    while let Some((idx, finished)) = stack.pop() {
        if finished {
            state[idx] = Visit::Done;
            continue;
        }
        if state[idx] != Visit::New {
            continue;
        }

        state[idx] = Visit::Open;
        stack.push((idx, true));

        if let Node::Split { left, right, .. } = nodes[idx] {
            for child in [left, right] {
                match state[child] {
                    Visit::Open => {
                        return corrupt(format!("node {idx} loops back to node {child}"));
                    }
                    Visit::New => stack.push((child, false)),
                    Visit::Done => {}
                }
            }
        }
    }

    match state.iter().position(|s| *s == Visit::New) {
        Some(idx) => corrupt(format!("node {idx} is unreachable from the root")),
        None => Ok(()),
    }
}

fn walk(nodes: &[Node], row: ArrayView1<f64>) -> f64 {
    let mut idx = 0;
    loop {
        match nodes[idx] {
            Node::Leaf { value } => return value,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => idx = if row[feature] <= threshold { left } else { right },
        }
    }
}
