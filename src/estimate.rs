use std::collections::HashMap;

use crate::error::AppError;
use crate::features::FeatureVector;
use crate::model::{predict_one, Regressor};

const LAKH: f64 = 100_000.0;

/// What the estimate page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub prediction: String,
    /// Echo of the submitted `area`, used to seed the split page.
    pub total_area: Option<f64>,
}

/// Renders the raw model output in lakhs, or as a bare number when it cannot be scaled.
pub fn format_prediction(raw: f64) -> String {
    let lakhs = raw / LAKH;
    if lakhs.is_finite() {
        format!("{:.2} L", lakhs)
    } else {
        format!("{:.2}", raw)
    }
}

pub fn estimate(
    model: &dyn Regressor,
    form: &HashMap<String, String>,
    log_features: bool,
) -> Result<Estimate, AppError> {
    let x = FeatureVector::from_form(form)?;
    if log_features {
        log_feature_summary(&x);
    }

    let raw = predict_one(model, &x)?;
    let total_area = form
        .get("area")
        .and_then(|s| s.trim().parse::<f64>().ok());

    Ok(Estimate {
        prediction: format_prediction(raw),
        total_area,
    })
}

// Debug signal so we can confirm the form is not arriving as all-zeros
fn log_feature_summary(x: &FeatureVector) {
    let v = x.as_slice();
    let nz = v.iter().filter(|x| **x != 0.0).count();
    let mean = v.iter().sum::<f64>() / (v.len() as f64);
    let std = (v.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (v.len() as f64)).sqrt();
    let sample: Vec<String> = x
        .named()
        .take(6)
        .map(|(name, val)| format!("{}={:.3}", name, val))
        .collect();
    tracing::info!(
        "recv in_dim={} nonzero={} mean={:.3} std={:.3} sample=[{}]",
        v.len(),
        nz,
        mean,
        std,
        sample.join(", ")
    );
}
