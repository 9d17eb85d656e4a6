use std::collections::HashMap;

use crate::error::InputError;

pub const FEATURE_COUNT: usize = 12;

/// Input order expected by the trained model.
pub const FEATURES: [&str; FEATURE_COUNT] = [
    "area",
    "bedrooms",
    "bathrooms",
    "stories",
    "mainroad",
    "guestroom",
    "basement",
    "hotwaterheating",
    "airconditioning",
    "parking",
    "prefarea",
    "furnishingstatus",
];

const FURNISHING: [(&str, f64); 3] = [
    ("unfurnished", 0.0),
    ("semi-furnished", 1.0),
    ("furnished", 2.0),
];

/// One house, encoded in [`FEATURES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    /// Parses every feature out of a submitted form, stopping at the first bad field.
    pub fn from_form(form: &HashMap<String, String>) -> Result<Self, InputError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURES) {
            *slot = parse_value(name, form.get(name).map(String::as_str))?;
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURES.iter().copied().zip(self.0.iter().copied())
    }
}

/// Converts one raw form value into the float the model was trained on.
pub fn parse_value(name: &str, raw: Option<&str>) -> Result<f64, InputError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(InputError::MissingInput(name.to_string()));
    }

    if name == "furnishingstatus" {
        if let Ok(v) = raw.parse::<f64>() {
            return Ok(v);
        }
        let key = raw.to_lowercase();
        return FURNISHING
            .iter()
            .find(|(label, _)| *label == key)
            .map(|(_, code)| *code)
            .ok_or_else(|| InputError::UnrecognizedCategory(raw.to_string()));
    }

    raw.parse::<f64>().map_err(|_| InputError::InvalidNumeric {
        field: name.to_string(),
        raw: raw.to_string(),
    })
}
