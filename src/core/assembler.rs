//! Feature vector assembly.
//!
//! This module provides the main API for turning URL text into a
//! [`FeatureVector`]: run the three leaf readers, then map their records
//! field by field into layout order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;
use super::structural::StructuralFeatures;
use super::vector::FeatureVector;
use crate::error::UrlLexError;
use crate::types::{DomainDecomposition, UriComponents};
use crate::url::normalizer::extract_host;
use crate::url::parser::{split_uri, UriStructure};
use crate::url::psl::{PublicSuffixResolver, RuleSet};

/// Map the three leaf records into a vector.
///
/// Proportions are passed through as computed; counts and lengths are
/// converted to `f64`. Entropy and the https flag are not part of the layout.
pub fn assemble(
    structural: &StructuralFeatures,
    structure: &UriStructure,
    domain: &DomainDecomposition,
) -> FeatureVector {
    let c = &structural.chars;
    let values: [f64; FEATURE_COUNT] = [
        structural.url_length as f64,
        c.dot as f64,
        c.slash as f64,
        c.hyphen as f64,
        c.underscore as f64,
        c.question_mark as f64,
        c.ampersand as f64,
        c.equals as f64,
        c.at_symbol as f64,
        c.hash as f64,
        c.percent as f64,
        c.tilde as f64,
        c.plus as f64,
        c.dollar as f64,
        c.exclamation as f64,
        c.comma as f64,
        c.apostrophe as f64,
        c.parenthesis as f64,
        structural.suspicious_word_count as f64,
        domain.domain.chars().count() as f64,
        domain.suffix.chars().count() as f64,
        structure.path_segment_count as f64,
        structure.query_param_count as f64,
        structure.query_length as f64,
        structure.first_path_segment_length as f64,
        structural.proportion_numeric,
        structural.proportion_alphabetic,
        structural.proportion_special,
    ];
    FeatureVector::from_values(values)
}

/// Collects leaf records from separate sources before assembly.
///
/// Building with any record missing is a contract violation.
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder {
    structural: Option<StructuralFeatures>,
    structure: Option<UriStructure>,
    domain: Option<DomainDecomposition>,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structural(mut self, structural: StructuralFeatures) -> Self {
        self.structural = Some(structural);
        self
    }

    pub fn structure(mut self, structure: UriStructure) -> Self {
        self.structure = Some(structure);
        self
    }

    pub fn domain(mut self, domain: DomainDecomposition) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Assemble the vector, failing if a record was never supplied.
    pub fn build(self) -> Result<FeatureVector, UrlLexError> {
        let structural = self.structural.ok_or_else(|| missing("structural features"))?;
        let structure = self.structure.ok_or_else(|| missing("URI structure"))?;
        let domain = self.domain.ok_or_else(|| missing("domain decomposition"))?;
        Ok(assemble(&structural, &structure, &domain))
    }
}

fn missing(what: &str) -> UrlLexError {
    UrlLexError::ContractViolation(format!("missing {} for feature assembly", what))
}

/// Every intermediate record produced for one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlAnalysis {
    pub url: String,
    pub structural: StructuralFeatures,
    pub components: UriComponents,
    pub structure: UriStructure,
    /// Host as extracted for suffix matching
    pub host: String,
    pub domain: DomainDecomposition,
}

impl UrlAnalysis {
    /// The classifier input for this URL.
    pub fn vector(&self) -> FeatureVector {
        assemble(&self.structural, &self.structure, &self.domain)
    }
}

/// Turns URL text into feature vectors.
///
/// Holds only a shared, read-only rule set, so one extractor can be cloned
/// or shared across threads freely.
///
/// # Examples
///
/// ```
/// use urllex::{FeatureExtractor, FEATURE_COUNT};
///
/// let extractor = FeatureExtractor::with_bundled_rules()?;
/// let vector = extractor.extract("https://www.example.co.uk/login?a=1&b=2");
/// assert_eq!(vector.len(), FEATURE_COUNT);
/// assert_eq!(vector.get_by_name("domain_length"), Some(7.0));
/// assert_eq!(vector.get_by_name("tld_length"), Some(5.0));
/// assert_eq!(vector.get_by_name("query_param_count"), Some(2.0));
/// # Ok::<(), urllex::UrlLexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    resolver: PublicSuffixResolver,
}

impl FeatureExtractor {
    /// Create an extractor over an already-loaded rule set.
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            resolver: PublicSuffixResolver::new(rules),
        }
    }

    /// Create an extractor over the bundled rule list.
    pub fn with_bundled_rules() -> Result<Self, UrlLexError> {
        Ok(Self::new(Arc::new(RuleSet::bundled()?)))
    }

    pub fn resolver(&self) -> &PublicSuffixResolver {
        &self.resolver
    }

    /// Run every leaf reader over `url`.
    pub fn analyze(&self, url: &str) -> UrlAnalysis {
        let structural = StructuralFeatures::extract(url);
        let components = split_uri(url);
        let structure = UriStructure::measure(&components);
        let host = extract_host(url);
        let domain = self.resolver.resolve(&host);

        tracing::trace!(
            url_length = structural.url_length,
            host = %host,
            suffix = %domain.suffix,
            "analyzed url"
        );

        UrlAnalysis {
            url: url.to_string(),
            structural,
            components,
            structure,
            host,
            domain,
        }
    }

    /// The classifier input for `url`.
    pub fn extract(&self, url: &str) -> FeatureVector {
        self.analyze(url).vector()
    }
}
