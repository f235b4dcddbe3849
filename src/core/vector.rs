//! The fixed-length numeric vector handed to a classifier.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::error::UrlLexError;

/// Exactly [`FEATURE_COUNT`] values in [`FEATURE_LAYOUT`] order.
///
/// The length is part of the type, so a vector can never be partially
/// filled; it is built once per URL and not modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Wrap values already in layout order.
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Build from a slice, rejecting any length other than [`FEATURE_COUNT`].
    pub fn try_from_slice(values: &[f64]) -> Result<Self, UrlLexError> {
        let values: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
            UrlLexError::ContractViolation(format!(
                "feature vector must have {} values, got {}",
                FEATURE_COUNT,
                values.len()
            ))
        })?;
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    /// Value at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Value of the named feature.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// `(name, value)` pairs in layout order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// JSON object keyed by feature name.
    pub fn to_named_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .named()
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Values joined by commas.
    pub fn to_csv(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = UrlLexError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from_slice(&values)
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        self.as_slice()
    }
}
