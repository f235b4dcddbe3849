//! urllex - lexical feature extraction for URL classifiers
//!
//! This crate turns arbitrary URL text into a fixed-length numeric vector for a
//! benign/malicious URL classifier. It never fetches or strictly parses a URL:
//! every measurement is taken from the text itself.
//!
//! # Features
//!
//! - **Fixed layout**: every vector has exactly 28 values in a fixed order
//! - **Total**: any input, including the empty string, produces a vector
//! - **Deterministic**: same input always produces a bit-identical vector
//! - **Public Suffix List aware**: hosts split by longest-match PSL rules,
//!   wildcard and exception rules included
//! - **Shareable**: the rule set is loaded once and read concurrently without locks
//!
//! # Quick Start
//!
//! ```
//! use urllex::{FeatureExtractor, FEATURE_COUNT};
//!
//! // Load the bundled suffix rules once and reuse the extractor
//! let extractor = FeatureExtractor::with_bundled_rules()?;
//!
//! let vector = extractor.extract("http://secure-login-update.example.com/a/b?x=1");
//! assert_eq!(vector.len(), FEATURE_COUNT);
//! assert_eq!(vector.get_by_name("suspicious_word_count"), Some(3.0));
//!
//! // Inspect the intermediate measurements
//! let analysis = extractor.analyze("https://www.example.co.uk/");
//! assert_eq!(analysis.domain.suffix, "co.uk");
//! assert!(analysis.structural.uses_https);
//! # Ok::<(), urllex::UrlLexError>(())
//! ```
//!
//! # Vector Layout
//!
//! | Index  | Feature |
//! |--------|---------|
//! | 0      | url_length |
//! | 1..=17 | counts of `. / - _ ? & = @ # % ~ + $ ! , '` and `( )` |
//! | 18     | suspicious_word_count |
//! | 19     | domain_length |
//! | 20     | tld_length |
//! | 21     | path_segment_count |
//! | 22     | query_param_count |
//! | 23     | query_length |
//! | 24     | first_path_segment_length |
//! | 25     | proportion_numeric |
//! | 26     | proportion_alphabetic |
//! | 27     | proportion_special |
//!
//! # Error Handling
//!
//! Feature extraction itself cannot fail. Fallible operations return
//! `Result<T, UrlLexError>`:
//!
//! - Loading suffix rules, configuration or model artifacts
//! - Assembling a vector from incomplete records or a wrong-length slice
//! - Attaching a classifier trained on a different feature layout

// Re-export main extraction API
pub use self::core::{assemble, FeatureExtractor, FeatureVectorBuilder, UrlAnalysis};

// Re-export classification boundary
pub use self::core::{Classifier, Label, LinearModel, UrlClassifier};

// Re-export layout and vector types
pub use self::core::{
    feature_index, layout_fingerprint, FeatureVector, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};
pub use self::core::{
    shannon_entropy, suspicious_word_count, CharacterCounts, StructuralFeatures, SUSPICIOUS_TOKENS,
};

// Re-export URL readers
pub use self::url::{extract_host, is_ip_literal, normalize_host, strip_scheme};
pub use self::url::{parse_uri, path_segments, query_params, split_uri, UriStructure};
pub use self::url::{PublicSuffixResolver, RuleKind, RuleSet, SuffixRule, BUNDLED_RULES};

// Re-export public types
pub use config::UrlLexConfig;
pub use error::UrlLexError;
pub use types::{DomainDecomposition, UriComponents};

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod types;
pub mod url;
