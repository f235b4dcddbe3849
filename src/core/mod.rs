//! Core feature pipeline.
//!
//! This module contains the measurement and vector operations:
//! - Character statistics and entropy over raw URL text
//! - The fixed feature layout and its fingerprint
//! - Vector assembly from the leaf readers
//! - The classification boundary

pub mod assembler;
pub mod classifier;
pub mod layout;
pub mod structural;
pub mod vector;

// Re-export main functionality
pub use assembler::{assemble, FeatureExtractor, FeatureVectorBuilder, UrlAnalysis};
pub use classifier::{Classifier, Label, LinearModel, UrlClassifier};
pub use layout::{
    feature_index, layout_fingerprint, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION,
};
pub use structural::{
    shannon_entropy, suspicious_word_count, CharacterCounts, StructuralFeatures, SUSPICIOUS_TOKENS,
};
pub use vector::FeatureVector;
