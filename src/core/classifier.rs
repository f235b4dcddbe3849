//! Classification boundary.
//!
//! A [`Classifier`] is any artifact that turns a [`FeatureVector`] into a
//! [`Label`]. Its layout is checked against [`FEATURE_LAYOUT`] once, when it
//! is attached to a [`UrlClassifier`], so an artifact trained on a different
//! vector never reaches inference.
//!
//! [`FEATURE_LAYOUT`]: super::layout::FEATURE_LAYOUT

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::assembler::FeatureExtractor;
use super::layout::LayoutInfo;
use super::vector::FeatureVector;
use crate::error::UrlLexError;

/// Classifier verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Benign,
    Malicious,
}

impl Label {
    /// Map a raw class index: 0 is benign, anything else malicious.
    pub fn from_class(class: i64) -> Self {
        if class == 0 {
            Label::Benign
        } else {
            Label::Malicious
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Benign => "Benign",
            Label::Malicious => "Malicious",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded, read-only classification artifact.
pub trait Classifier: Send + Sync {
    /// Feature layout the artifact was trained on.
    fn layout(&self) -> LayoutInfo;

    /// Classify one vector.
    fn predict(&self, features: &FeatureVector) -> Result<Label, UrlLexError>;

    /// Check the artifact can run against this crate's vectors.
    fn validate(&self) -> Result<(), UrlLexError> {
        self.layout().ensure_compatible()
    }
}

/// Logistic model stored as JSON.
///
/// ```json
/// { "version": 1, "feature_names": ["url_length", ...],
///   "weights": [0.01, ...], "bias": -1.5, "threshold": 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub version: u8,
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub bias: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

impl LinearModel {
    /// Parse and validate a JSON artifact.
    pub fn from_json(text: &str) -> Result<Self, UrlLexError> {
        let model: LinearModel = serde_json::from_str(text)?;
        model.validate()?;
        Ok(model)
    }

    /// Read, parse and validate a JSON artifact from disk.
    pub fn load(path: &Path) -> Result<Self, UrlLexError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| UrlLexError::Io(format!("{}: {}", path.display(), e)))?;
        let model = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), features = model.weights.len(), "loaded linear model");
        Ok(model)
    }

    /// Check the artifact is internally consistent and matches the layout.
    pub fn validate(&self) -> Result<(), UrlLexError> {
        if self.weights.len() != self.feature_names.len() {
            return Err(UrlLexError::Model(format!(
                "{} weights for {} feature names",
                self.weights.len(),
                self.feature_names.len()
            )));
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(UrlLexError::Model("non-finite weight or bias".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(UrlLexError::Model(format!(
                "threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        self.layout().ensure_compatible()
    }

    /// Probability-like score in [0, 1].
    ///
    /// Fails when the weight count differs from the vector length.
    pub fn score(&self, features: &FeatureVector) -> Result<f64, UrlLexError> {
        if self.weights.len() != features.len() {
            return Err(UrlLexError::Boundary(format!(
                "model has {} weights for a {}-value vector",
                self.weights.len(),
                features.len()
            )));
        }
        let z = self
            .weights
            .iter()
            .zip(features.as_slice())
            .fold(self.bias, |acc, (w, x)| acc + w * x);
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

impl Classifier for LinearModel {
    fn layout(&self) -> LayoutInfo {
        LayoutInfo::from_names(self.version, self.feature_names.clone())
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label, UrlLexError> {
        let score = self.score(features)?;
        if score.is_nan() {
            return Err(UrlLexError::Boundary("model produced a NaN score".to_string()));
        }
        Ok(Label::from_class(i64::from(score >= self.threshold)))
    }

    fn validate(&self) -> Result<(), UrlLexError> {
        LinearModel::validate(self)
    }
}

/// Feature extraction wired to a layout-checked classifier.
pub struct UrlClassifier {
    extractor: FeatureExtractor,
    model: Box<dyn Classifier>,
}

impl UrlClassifier {
    /// Attach a classifier, rejecting it if it fails its own validation or
    /// its layout differs from ours.
    pub fn new(extractor: FeatureExtractor, model: Box<dyn Classifier>) -> Result<Self, UrlLexError> {
        if let Err(err) = model.validate() {
            tracing::error!(error = %err, "classifier artifact rejected");
            return Err(err);
        }
        Ok(Self { extractor, model })
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Extract features from `url` and classify them.
    pub fn predict_url(&self, url: &str) -> Result<Label, UrlLexError> {
        let features = self.extractor.extract(url);
        let label = self.model.predict(&features)?;
        tracing::debug!(url, %label, "classified url");
        Ok(label)
    }

    /// Classify a raw value slice, enforcing the vector length first.
    pub fn predict_values(&self, values: &[f64]) -> Result<Label, UrlLexError> {
        let features = FeatureVector::try_from_slice(values)?;
        self.model.predict(&features)
    }
}

impl fmt::Debug for UrlClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlClassifier")
            .field("extractor", &self.extractor)
            .field("layout", &self.model.layout().fingerprint)
            .finish()
    }
}
