//! Core data records shared between the URL readers and the vector assembler.

use serde::{Deserialize, Serialize};

/// Best-effort split of raw URL text. Absent components are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriComponents {
    /// Scheme without the trailing ':', lower-cased (e.g. "https")
    pub scheme: String,
    /// Authority without the leading "//" (e.g. "user@api.example.com:8443")
    pub authority: String,
    /// Path as written, including any leading slash
    pub path: String,
    /// `;params` cut from the last path segment, without the ';'
    #[serde(default)]
    pub params: String,
    /// Query string without the leading '?'
    pub query: String,
    /// Fragment without the leading '#'
    pub fragment: String,
}

impl UriComponents {
    /// Create new URI components.
    pub fn new(
        scheme: String,
        authority: String,
        path: String,
        query: String,
        fragment: String,
    ) -> Self {
        Self {
            scheme,
            authority,
            path,
            params: String::new(),
            query,
            fragment,
        }
    }

    /// Set the path parameters.
    pub fn with_params(mut self, params: String) -> Self {
        self.params = params;
        self
    }

    /// Check if an authority ("//host") section was present.
    pub fn has_authority(&self) -> bool {
        !self.authority.is_empty()
    }

    /// Check if path parameters were present.
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// Check if a query string was present.
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Check if a fragment was present.
    pub fn has_fragment(&self) -> bool {
        !self.fragment.is_empty()
    }
}

/// A hostname split at its public suffix boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainDecomposition {
    /// Labels left of the registrable domain, joined with dots (e.g. "www")
    pub subdomain: String,
    /// Registrable label immediately left of the suffix (e.g. "example")
    pub domain: String,
    /// Public suffix, possibly multi-label (e.g. "co.uk")
    pub suffix: String,
}

impl DomainDecomposition {
    /// Create a new decomposition.
    pub fn new(subdomain: String, domain: String, suffix: String) -> Self {
        Self {
            subdomain,
            domain,
            suffix,
        }
    }

    /// The decomposition of a host that could not be split.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when all three parts are empty.
    pub fn is_empty(&self) -> bool {
        self.subdomain.is_empty() && self.domain.is_empty() && self.suffix.is_empty()
    }

    /// Domain and suffix joined (e.g. "example.co.uk"), or empty if either is missing.
    pub fn registered_domain(&self) -> String {
        if self.domain.is_empty() || self.suffix.is_empty() {
            return String::new();
        }
        format!("{}.{}", self.domain, self.suffix)
    }

    /// All non-empty parts joined back into a hostname.
    pub fn fqdn(&self) -> String {
        [&self.subdomain, &self.domain, &self.suffix]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_components() {
        let components = UriComponents::new(
            "https".to_string(),
            "example.com".to_string(),
            "/search".to_string(),
            "q=test".to_string(),
            "results".to_string(),
        );

        assert!(components.has_authority());
        assert!(components.has_query());
        assert!(components.has_fragment());
    }

    #[test]
    fn test_uri_components_empty() {
        let components = UriComponents::default();

        assert!(!components.has_authority());
        assert!(!components.has_query());
        assert!(!components.has_fragment());
        assert_eq!(components.path, "");
    }

    #[test]
    fn test_registered_domain() {
        let parts = DomainDecomposition::new(
            "www".to_string(),
            "example".to_string(),
            "co.uk".to_string(),
        );
        assert_eq!(parts.registered_domain(), "example.co.uk");
        assert_eq!(parts.fqdn(), "www.example.co.uk");
    }

    #[test]
    fn test_registered_domain_without_domain() {
        let parts = DomainDecomposition::new(String::new(), String::new(), "co.uk".to_string());
        assert_eq!(parts.registered_domain(), "");
        assert_eq!(parts.fqdn(), "co.uk");
        assert!(!parts.is_empty());
        assert!(DomainDecomposition::empty().is_empty());
    }
}
