//! Dense Network - in-process feed-forward classifier
//!
//! Evaluates a stack of fully-connected layers exported from the trained
//! model (`weights` is `[inputs][units]`, as Keras stores kernels).

use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::inference::Classifier;
use crate::error::{ChurnError, Result};
use crate::logic::artifacts::read_json;

/// Activation function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Sigmoid,
    Tanh,
    Linear,
}

impl Activation {
    fn apply(self, z: Array1<f32>) -> Array1<f32> {
        match self {
            // f32::max would turn NaN into 0.0
            Activation::Relu => z.mapv(|v| if v.is_nan() || v > 0.0 { v } else { 0.0 }),
            Activation::Sigmoid => z.mapv(|v| 1.0 / (1.0 + (-v).exp())),
            Activation::Tanh => z.mapv(|v| v.tanh()),
            Activation::Linear => z,
        }
    }
}

/// Serialized layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayerExport {
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
    pub activation: Activation,
}

/// Serialized network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseNetworkExport {
    pub layers: Vec<DenseLayerExport>,
}

#[derive(Debug, Clone)]
struct DenseLayer {
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

/// Feed-forward network with a single sigmoid-style output unit
#[derive(Debug, Clone)]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Build from an export, checking that layer shapes chain and end in one unit
    pub fn from_export(export: DenseNetworkExport) -> std::result::Result<Self, String> {
        if export.layers.is_empty() {
            return Err("network has no layers".to_string());
        }

        let mut layers = Vec::with_capacity(export.layers.len());
        let mut previous_units: Option<usize> = None;

        for (i, layer) in export.layers.into_iter().enumerate() {
            let inputs = layer.weights.len();
            let units = layer.weights.first().map(|r| r.len()).unwrap_or(0);

            if inputs == 0 || units == 0 {
                return Err(format!("layer {} has an empty weight matrix", i));
            }
            if layer.weights.iter().any(|r| r.len() != units) {
                return Err(format!("layer {} has ragged weight rows", i));
            }
            if layer.bias.len() != units {
                return Err(format!(
                    "layer {} has {} units but {} biases",
                    i,
                    units,
                    layer.bias.len()
                ));
            }
            if let Some(prev) = previous_units {
                if prev != inputs {
                    return Err(format!(
                        "layer {} takes {} inputs but previous layer has {} units",
                        i, inputs, prev
                    ));
                }
            }

            let flat: Vec<f32> = layer.weights.into_iter().flatten().collect();
            let weights = Array2::from_shape_vec((inputs, units), flat)
                .map_err(|e| format!("layer {}: {}", i, e))?;

            layers.push(DenseLayer {
                weights,
                bias: Array1::from(layer.bias),
                activation: layer.activation,
            });
            previous_units = Some(units);
        }

        if previous_units != Some(1) {
            return Err(format!(
                "output layer must have 1 unit, has {}",
                previous_units.unwrap_or(0)
            ));
        }

        Ok(Self { layers })
    }

    /// Load a `{"layers": [...]}` export
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading dense network from: {}", path.display());
        let export: DenseNetworkExport = read_json(path)?;
        let network = Self::from_export(export).map_err(|reason| ChurnError::artifact(path, reason))?;

        log::info!(
            "Dense network: {} layers, {} inputs",
            network.layer_count(),
            network.input_width()
        );
        Ok(network)
    }

    pub fn input_width(&self) -> usize {
        self.layers[0].weights.nrows()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn forward(&self, features: &[f32]) -> Array1<f32> {
        let mut activation = Array1::from(features.to_vec());
        for layer in &self.layers {
            let z = activation.dot(&layer.weights) + &layer.bias;
            activation = layer.activation.apply(z);
        }
        activation
    }
}

impl Classifier for DenseNetwork {
    fn name(&self) -> &str {
        "dense"
    }

    fn input_width(&self) -> Option<usize> {
        Some(DenseNetwork::input_width(self))
    }

    fn predict_proba(&self, features: &[f32]) -> Result<f32> {
        if features.len() != DenseNetwork::input_width(self) {
            return Err(ChurnError::ModelInvocation(format!(
                "network takes {} inputs, got {}",
                DenseNetwork::input_width(self),
                features.len()
            )));
        }

        self.forward(features)
            .first()
            .copied()
            .ok_or_else(|| ChurnError::ModelInvocation("Empty output".to_string()))
    }
}
