//! URL text readers.
//!
//! This module contains everything that looks at raw URL text:
//! - Lexical host extraction and normalization
//! - Best-effort scheme/authority/path/query/fragment splitting
//! - Public Suffix List (PSL) rules and host splitting

pub mod normalizer;
pub mod parser;
pub mod psl;

// Re-export main functionality
pub use normalizer::{extract_host, is_ip_literal, normalize_host, strip_scheme};
pub use parser::{parse_uri, path_segments, query_params, split_uri, UriStructure};
pub use psl::{PublicSuffixResolver, RuleKind, RuleSet, SuffixRule, BUNDLED_RULES};
