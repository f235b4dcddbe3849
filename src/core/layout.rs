//! Feature layout: names and positions of every value in the vector.
//!
//! The order below is a compatibility contract with trained classifier
//! artifacts. Adding, removing or reordering a name changes the fingerprint,
//! and artifacts built for the old layout are rejected before inference.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::UrlLexError;

/// Layout version, bumped whenever [`FEATURE_LAYOUT`] changes.
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in vector order.
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    "url_length",                // 0
    "dot_count",                 // 1
    "slash_count",               // 2
    "hyphen_count",              // 3
    "underscore_count",          // 4
    "question_mark_count",       // 5
    "ampersand_count",           // 6
    "equals_count",              // 7
    "at_symbol_count",           // 8
    "hash_count",                // 9
    "percent_count",             // 10
    "tilde_count",               // 11
    "plus_count",                // 12
    "dollar_count",              // 13
    "exclamation_count",         // 14
    "comma_count",               // 15
    "apostrophe_count",          // 16
    "parenthesis_count",         // 17
    "suspicious_word_count",     // 18
    "domain_length",             // 19
    "tld_length",                // 20
    "path_segment_count",        // 21
    "query_param_count",         // 22
    "query_length",              // 23
    "first_path_segment_length", // 24
    "proportion_numeric",        // 25
    "proportion_alphabetic",     // 26
    "proportion_special",        // 27
];

/// Number of values in every feature vector.
pub const FEATURE_COUNT: usize = 28;

/// Position of a feature by name.
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|n| *n == name)
}

/// Fingerprint of a layout: lower 64 bits of SHA-256 over the version byte
/// and each name followed by a 0x00 separator.
pub fn fingerprint<S: AsRef<str>>(version: u8, names: &[S]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update([version]);
    for name in names {
        hasher.update(name.as_ref().as_bytes());
        hasher.update([0x00]);
    }
    let digest = hasher.finalize();

    let mut tail = [0u8; 8];
    tail.copy_from_slice(&digest[digest.len() - 8..]);
    u64::from_le_bytes(tail)
}

/// Fingerprint of the current [`FEATURE_LAYOUT`].
pub fn layout_fingerprint() -> u64 {
    fingerprint(FEATURE_VERSION, &FEATURE_LAYOUT)
}

/// Serializable description of a feature layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub fingerprint: u64,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    /// The layout this crate produces.
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            fingerprint: layout_fingerprint(),
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Layout described by an arbitrary name list.
    pub fn from_names(version: u8, feature_names: Vec<String>) -> Self {
        Self {
            version,
            fingerprint: fingerprint(version, &feature_names),
            feature_names,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Check that this layout is exactly the one produced here.
    ///
    /// Count, names, order and version must all agree.
    pub fn ensure_compatible(&self) -> Result<(), UrlLexError> {
        let current = Self::current();
        if self.feature_count() != FEATURE_COUNT {
            return Err(UrlLexError::LayoutMismatch {
                expected: format!("{} features", FEATURE_COUNT),
                actual: format!("{} features", self.feature_count()),
            });
        }
        if let Some(index) = (0..FEATURE_COUNT).find(|&i| self.feature_names[i] != FEATURE_LAYOUT[i]) {
            return Err(UrlLexError::LayoutMismatch {
                expected: format!("{:?} at index {}", FEATURE_LAYOUT[index], index),
                actual: format!("{:?}", self.feature_names[index]),
            });
        }
        if self.version != current.version || self.fingerprint != current.fingerprint {
            return Err(UrlLexError::LayoutMismatch {
                expected: format!("v{} ({:016x})", current.version, current.fingerprint),
                actual: format!("v{} ({:016x})", self.version, self.fingerprint),
            });
        }
        Ok(())
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}
