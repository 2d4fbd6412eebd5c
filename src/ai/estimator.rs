use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::game::Cell;

/// Read-only value estimator: one score per board cell for a given state.
///
/// Any `Fn(&[Cell]) -> Vec<f32>` closure is an estimator, so trained models
/// from outside this crate can be plugged in without a wrapper type.
pub trait Estimator {
    fn evaluate(&self, state: &[Cell]) -> Vec<f32>;
}

impl<F> Estimator for F
where
    F: Fn(&[Cell]) -> Vec<f32>,
{
    fn evaluate(&self, state: &[Cell]) -> Vec<f32> {
        self(state)
    }
}

/// Number of input features per cell (black plane, white plane).
const PLANES: usize = 2;

/// Single dense layer over a one-hot board encoding.
///
/// `weights` is row-major `[cells][cells * 2]`: row `a` scores action `a`,
/// and its columns hold the black plane followed by the white plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearEstimator {
    scale: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl LinearEstimator {
    /// All-zero parameters for a board of the given scale
    pub fn zeros(scale: usize) -> Self {
        let cells = scale * scale;
        LinearEstimator {
            scale,
            weights: vec![0.0; cells * cells * PLANES],
            bias: vec![0.0; cells],
        }
    }

    /// Small uniform parameters in [-0.1, 0.1)
    pub fn random<R: Rng>(scale: usize, rng: &mut R) -> Self {
        let mut estimator = Self::zeros(scale);
        for w in estimator
            .weights
            .iter_mut()
            .chain(estimator.bias.iter_mut())
        {
            *w = rng.random_range(-0.1..0.1);
        }
        estimator
    }

    /// Build from explicit parameters, checking their shape.
    pub fn from_parts(
        scale: usize,
        weights: Vec<f32>,
        bias: Vec<f32>,
    ) -> Result<Self, PersistenceError> {
        let estimator = LinearEstimator {
            scale,
            weights,
            bias,
        };
        estimator.validate()?;
        Ok(estimator)
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    fn validate(&self) -> Result<(), PersistenceError> {
        let cells = self.scale * self.scale;
        if self.bias.len() != cells {
            return Err(PersistenceError::Shape {
                scale: self.scale,
                reason: format!("expected {cells} biases, found {}", self.bias.len()),
            });
        }
        let expected = cells * cells * PLANES;
        if self.weights.len() != expected {
            return Err(PersistenceError::Shape {
                scale: self.scale,
                reason: format!("expected {expected} weights, found {}", self.weights.len()),
            });
        }
        Ok(())
    }

    /// Load parameters from a JSON weights file.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let content = fs::read_to_string(path).map_err(|e| PersistenceError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let estimator: LinearEstimator =
            serde_json::from_str(&content).map_err(|e| PersistenceError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        estimator.validate()?;
        Ok(estimator)
    }

    /// Save parameters to a JSON weights file.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json).map_err(|e| PersistenceError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl Estimator for LinearEstimator {
    fn evaluate(&self, state: &[Cell]) -> Vec<f32> {
        let cells = self.bias.len();
        let active: Vec<usize> = state
            .iter()
            .take(cells)
            .enumerate()
            .filter_map(|(index, cell)| match cell {
                Cell::Empty => None,
                Cell::Black => Some(index),
                Cell::White => Some(cells + index),
            })
            .collect();

        let row_len = cells * PLANES;
        self.bias
            .iter()
            .enumerate()
            .map(|(action, bias)| {
                let row = &self.weights[action * row_len..(action + 1) * row_len];
                bias + active.iter().map(|&feature| row[feature]).sum::<f32>()
            })
            .collect()
    }
}
