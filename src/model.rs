use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path, sync::Arc};

use crate::error::ModelError;
use crate::features::{FeatureVector, FEATURES, FEATURE_COUNT};

/// A trained price model: one scalar per input row.
pub trait Regressor: Send + Sync {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>, ModelError>;
}

/// Feeds a single house through the model as a batch of one.
pub fn predict_one(model: &dyn Regressor, x: &FeatureVector) -> Result<f64, ModelError> {
    model
        .predict(std::slice::from_ref(x))?
        .first()
        .copied()
        .ok_or(ModelError::Empty)
}

#[derive(Deserialize)]
struct LinearJson {
    features: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Ordinary least-squares regressor exported as JSON.
#[derive(Debug, Clone)]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        let meta: LinearJson =
            serde_json::from_str(txt).with_context(|| "failed to parse linear model json")?;

        if meta.features.len() != FEATURE_COUNT
            || meta.features.iter().zip(FEATURES).any(|(a, b)| a != b)
        {
            bail!(
                "model feature order {:?} does not match expected {:?}",
                meta.features,
                FEATURES
            );
        }
        let coefficients: [f64; FEATURE_COUNT] =
            meta.coefficients.as_slice().try_into().map_err(|_| {
                anyhow::anyhow!(
                    "expected {} coefficients, got {}",
                    FEATURE_COUNT,
                    meta.coefficients.len()
                )
            })?;

        Ok(Self::new(coefficients, meta.intercept))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read model at {}", path.display()))?;
        Self::from_json(&txt)
    }
}

impl Regressor for LinearModel {
    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        Ok(batch
            .iter()
            .map(|row| {
                self.intercept
                    + row
                        .as_slice()
                        .iter()
                        .zip(self.coefficients.iter())
                        .map(|(x, w)| x * w)
                        .sum::<f64>()
            })
            .collect())
    }
}

#[cfg(feature = "torch")]
pub use torch::TorchModel;

#[cfg(feature = "torch")]
mod torch {
    use super::*;
    use tch::{kind::Kind, CModule, Device, Tensor};

    /// TorchScript export of the regressor.
    pub struct TorchModel {
        model: CModule,
        device: Device,
    }

    impl TorchModel {
        pub fn load(path: &Path) -> Result<Self> {
            let device = Device::Cpu;
            let model = CModule::load_on_device(path, device)
                .with_context(|| format!("failed to load TorchScript {}", path.display()))?;

            // Check output shape with a dummy forward: expect [1] or [1, 1]
            let dummy = Tensor::zeros([1, FEATURE_COUNT as i64], (Kind::Float, device));
            let sz = model.forward_ts(&[dummy])?.size();
            if sz.first() != Some(&1) || sz.iter().skip(1).any(|d| *d != 1) {
                bail!("unexpected model output size: {:?}", sz);
            }

            Ok(Self { model, device })
        }
    }

    impl Regressor for TorchModel {
        fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
            let flat: Vec<f32> = batch
                .iter()
                .flat_map(|row| row.as_slice().iter().map(|v| *v as f32))
                .collect();
            let input = Tensor::from_slice(&flat)
                .reshape([batch.len() as i64, FEATURE_COUNT as i64])
                .to_device(self.device);

            let out = self
                .model
                .forward_ts(&[input])
                .map_err(|e| ModelError::Backend(e.to_string()))?
                .reshape([-1]);
            let got = out.size()[0] as usize;
            if got != batch.len() {
                return Err(ModelError::Shape {
                    got,
                    expected: batch.len(),
                });
            }
            Ok((0..got as i64).map(|i| out.double_value(&[i])).collect())
        }
    }
}

/// Loads the serialized model; a missing file is fatal for the caller.
pub fn load_model(path: &Path) -> Result<Arc<dyn Regressor>> {
    if !path.exists() {
        bail!("Model file not found at: {}", path.display());
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext {
        "pt" | "ts" => load_torchscript(path),
        _ => Ok(Arc::new(LinearModel::load(path)?)),
    }
}

#[cfg(feature = "torch")]
fn load_torchscript(path: &Path) -> Result<Arc<dyn Regressor>> {
    Ok(Arc::new(TorchModel::load(path)?))
}

#[cfg(not(feature = "torch"))]
fn load_torchscript(path: &Path) -> Result<Arc<dyn Regressor>> {
    bail!(
        "{} is a TorchScript model; rebuild with the `torch` feature",
        path.display()
    )
}
