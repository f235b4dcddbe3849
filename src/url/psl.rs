//! Public Suffix List rules and longest-match host splitting.
//!
//! A [`RuleSet`] is parsed once from PSL-format text and never changes
//! afterwards; a [`PublicSuffixResolver`] holds it behind an `Arc` so any
//! number of threads can resolve hosts against the same rules without locking.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::UrlLexError;
use crate::types::DomainDecomposition;
use crate::url::normalizer::{extract_host, is_ip_literal, lookup_label, normalize_host};

/// The rule list compiled into the crate.
pub const BUNDLED_RULES: &str = include_str!("../../data/public_suffix_list.dat");

const WILDCARD_LABEL: &str = "*";
const PRIVATE_BEGIN: &str = "===BEGIN PRIVATE DOMAINS===";
const PRIVATE_END: &str = "===END PRIVATE DOMAINS===";

/// How a rule claims labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Literal labels, e.g. `co.uk`
    Normal,
    /// At least one `*` label matching any single label, e.g. `*.ck`
    Wildcard,
    /// A carve-out from a wildcard, e.g. `!www.ck`
    Exception,
}

/// A single public suffix rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuffixRule {
    /// Labels ordered right-to-left ("co.uk" is `["uk", "co"]`)
    labels: Vec<String>,
    kind: RuleKind,
}

impl SuffixRule {
    /// Parse one rule in PSL notation (`com`, `*.ck`, `!www.ck`).
    ///
    /// Returns the reason as a string on failure; [`RuleSet::parse`] wraps it
    /// with the line it came from.
    pub fn parse(text: &str) -> Result<Self, String> {
        let (exception, body) = match text.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        if body.is_empty() {
            return Err("empty rule".to_string());
        }

        let mut labels = Vec::new();
        for label in body.split('.').rev() {
            if label.is_empty() {
                return Err("empty label".to_string());
            }
            labels.push(lookup_label(&label.to_lowercase()).into_owned());
        }

        let has_wildcard = labels.iter().any(|l| l == WILDCARD_LABEL);
        let kind = match (exception, has_wildcard) {
            (true, true) => return Err("exception rule cannot contain a wildcard".to_string()),
            (true, false) if labels.len() < 2 => {
                return Err("exception rule needs at least two labels".to_string())
            }
            (true, false) => RuleKind::Exception,
            (false, true) => RuleKind::Wildcard,
            (false, false) => RuleKind::Normal,
        };

        Ok(Self { labels, kind })
    }

    /// Labels ordered right-to-left.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Rule kind.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Rightmost label, used as the rule-set bucket key.
    pub fn rightmost(&self) -> &str {
        &self.labels[0]
    }

    /// Number of host labels this rule claims as suffix when it matches.
    ///
    /// An exception gives back its leftmost label to the registrable domain.
    pub fn suffix_len(&self) -> usize {
        match self.kind {
            RuleKind::Exception => self.labels.len() - 1,
            RuleKind::Normal | RuleKind::Wildcard => self.labels.len(),
        }
    }

    /// Check the rule against host labels ordered right-to-left.
    fn matches<S: AsRef<str>>(&self, reversed: &[S]) -> bool {
        self.labels.len() <= reversed.len()
            && self
                .labels
                .iter()
                .zip(reversed)
                .all(|(rule, host)| rule == WILDCARD_LABEL || rule == host.as_ref())
    }
}

/// Immutable set of suffix rules keyed by rightmost label.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    buckets: HashMap<String, Vec<SuffixRule>>,
    len: usize,
}

impl RuleSet {
    /// Build a rule set from the bundled list (ICANN section only).
    pub fn bundled() -> Result<Self, UrlLexError> {
        Self::parse(BUNDLED_RULES)
    }

    /// Parse PSL-format text, keeping only the ICANN section.
    pub fn parse(text: &str) -> Result<Self, UrlLexError> {
        Self::parse_with_private(text, false)
    }

    /// Parse PSL-format text.
    ///
    /// Rules between the `===BEGIN PRIVATE DOMAINS===` and
    /// `===END PRIVATE DOMAINS===` markers are kept only when
    /// `include_private` is set.
    pub fn parse_with_private(text: &str, include_private: bool) -> Result<Self, UrlLexError> {
        let mut rules = Vec::new();
        let mut in_private = false;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if let Some(comment) = line.strip_prefix("//") {
                if comment.contains(PRIVATE_BEGIN) {
                    in_private = true;
                } else if comment.contains(PRIVATE_END) {
                    in_private = false;
                }
                continue;
            }
            if line.is_empty() || (in_private && !include_private) {
                continue;
            }

            // Only the first whitespace-delimited token is the rule
            let token = line.split_whitespace().next().unwrap_or(line);
            let rule = SuffixRule::parse(token).map_err(|reason| UrlLexError::RuleSyntax {
                line: index + 1,
                rule: token.to_string(),
                reason,
            })?;
            rules.push(rule);
        }

        let set = Self::from_rules(rules);
        tracing::info!(rules = set.len(), include_private, "loaded public suffix rules");
        Ok(set)
    }

    /// Read and parse a rule file from disk.
    pub fn load(path: &Path, include_private: bool) -> Result<Self, UrlLexError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| UrlLexError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse_with_private(&text, include_private)
    }

    /// Build a rule set from already-parsed rules. Duplicates are dropped.
    pub fn from_rules<I: IntoIterator<Item = SuffixRule>>(rules: I) -> Self {
        let mut buckets: HashMap<String, Vec<SuffixRule>> = HashMap::new();
        let mut len = 0;

        for rule in rules {
            let bucket = buckets.entry(rule.rightmost().to_string()).or_default();
            if !bucket.contains(&rule) {
                bucket.push(rule);
                len += 1;
            }
        }

        // Most specific first
        for bucket in buckets.values_mut() {
            bucket.sort_by(|a, b| b.labels.len().cmp(&a.labels.len()));
        }

        Self { buckets, len }
    }

    /// Number of distinct rules.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no rules were loaded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rules whose rightmost label is `label`, longest first.
    pub fn candidates(&self, label: &str) -> &[SuffixRule] {
        self.buckets.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of rightmost labels forming the public suffix.
    ///
    /// `labels` are ordered left-to-right as in the hostname. A matching
    /// exception rule wins over any wildcard; otherwise the longest match
    /// wins; with no match the rightmost label alone is the suffix.
    pub fn suffix_len(&self, labels: &[&str]) -> usize {
        let reversed: Vec<Cow<'_, str>> = labels.iter().rev().map(|l| lookup_label(l)).collect();
        let Some(rightmost) = reversed.first() else {
            return 0;
        };

        let mut best: Option<usize> = None;
        let buckets = [self.candidates(rightmost), self.candidates(WILDCARD_LABEL)];
        for rule in buckets.iter().flat_map(|bucket| bucket.iter()) {
            if !rule.matches(&reversed) {
                continue;
            }
            if rule.kind == RuleKind::Exception {
                return rule.suffix_len();
            }
            best = Some(best.map_or(rule.suffix_len(), |len| len.max(rule.suffix_len())));
        }

        best.unwrap_or_else(|| {
            tracing::trace!(tld = %rightmost, "no suffix rule matched, using rightmost label");
            1
        })
    }
}

/// Splits hostnames into subdomain, registrable domain and public suffix.
#[derive(Debug, Clone)]
pub struct PublicSuffixResolver {
    rules: Arc<RuleSet>,
}

impl PublicSuffixResolver {
    /// Create a resolver over a shared rule set.
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// The rule set this resolver matches against.
    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }

    /// Split a hostname.
    ///
    /// Never fails: an empty host or one with an empty label gives an empty
    /// decomposition, and an IP literal comes back whole as `domain`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use urllex::{PublicSuffixResolver, RuleSet};
    ///
    /// let resolver = PublicSuffixResolver::new(Arc::new(RuleSet::bundled()?));
    /// let parts = resolver.resolve("www.example.co.uk");
    /// assert_eq!(parts.subdomain, "www");
    /// assert_eq!(parts.domain, "example");
    /// assert_eq!(parts.suffix, "co.uk");
    /// # Ok::<(), urllex::UrlLexError>(())
    /// ```
    pub fn resolve(&self, host: &str) -> DomainDecomposition {
        let host = normalize_host(host);
        if host.is_empty() {
            return DomainDecomposition::empty();
        }
        if is_ip_literal(&host) {
            return DomainDecomposition::new(String::new(), host, String::new());
        }

        let labels: Vec<&str> = host.split('.').collect();
        if labels.iter().any(|label| label.is_empty()) {
            return DomainDecomposition::empty();
        }

        let suffix_len = self.rules.suffix_len(&labels).min(labels.len());
        let split = labels.len() - suffix_len;
        let suffix = labels[split..].join(".");

        if split == 0 {
            return DomainDecomposition::new(String::new(), String::new(), suffix);
        }

        let domain = labels[split - 1].to_string();
        let subdomain = labels[..split - 1].join(".");
        DomainDecomposition::new(subdomain, domain, suffix)
    }

    /// Extract the host from raw URL text and split it.
    pub fn resolve_url(&self, url: &str) -> DomainDecomposition {
        self.resolve(&extract_host(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(rules: &str) -> PublicSuffixResolver {
        PublicSuffixResolver::new(Arc::new(RuleSet::parse(rules).unwrap()))
    }

    fn split(resolver: &PublicSuffixResolver, host: &str) -> (String, String, String) {
        let parts = resolver.resolve(host);
        (parts.subdomain, parts.domain, parts.suffix)
    }

    fn owned(sub: &str, domain: &str, suffix: &str) -> (String, String, String) {
        (sub.to_string(), domain.to_string(), suffix.to_string())
    }

    #[test]
    fn test_rule_parse_kinds() {
        let normal = SuffixRule::parse("co.uk").unwrap();
        assert_eq!(normal.kind(), RuleKind::Normal);
        assert_eq!(normal.labels(), &["uk".to_string(), "co".to_string()]);
        assert_eq!(normal.suffix_len(), 2);

        let wildcard = SuffixRule::parse("*.ck").unwrap();
        assert_eq!(wildcard.kind(), RuleKind::Wildcard);
        assert_eq!(wildcard.rightmost(), "ck");

        let exception = SuffixRule::parse("!www.ck").unwrap();
        assert_eq!(exception.kind(), RuleKind::Exception);
        assert_eq!(exception.suffix_len(), 1);
    }

    #[test]
    fn test_rule_parse_errors() {
        assert!(SuffixRule::parse("").is_err());
        assert!(SuffixRule::parse("!").is_err());
        assert!(SuffixRule::parse("a..b").is_err());
        assert!(SuffixRule::parse(".com").is_err());
        assert!(SuffixRule::parse("!com").is_err());
        assert!(SuffixRule::parse("!*.ck").is_err());
    }

    #[test]
    fn test_rule_set_reports_line() {
        let err = RuleSet::parse("com\n// comment\nbad..rule\n").unwrap_err();
        match err {
            UrlLexError::RuleSyntax { line, rule, .. } => {
                assert_eq!(line, 3);
                assert_eq!(rule, "bad..rule");
            }
            other => panic!("Expected RuleSyntax, got {:?}", other),
        }
    }

    #[test]
    fn test_rule_set_ignores_trailing_text_and_duplicates() {
        let set = RuleSet::parse("com  trailing words\ncom\nCO.UK\n").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.candidates("uk").len(), 1);
        assert!(set.candidates("org").is_empty());
    }

    #[test]
    fn test_private_section() {
        let text = "com\n// ===BEGIN PRIVATE DOMAINS===\ngithub.io\n// ===END PRIVATE DOMAINS===\nio\n";

        let icann = RuleSet::parse_with_private(text, false).unwrap();
        assert_eq!(icann.len(), 2);

        let all = RuleSet::parse_with_private(text, true).unwrap();
        assert_eq!(all.len(), 3);

        let r = PublicSuffixResolver::new(Arc::new(all));
        assert_eq!(split(&r, "me.github.io"), owned("", "me", "github.io"));
    }

    #[test]
    fn test_simple_domain_splitting() {
        let r = resolver("com\nuk\nco.uk\n");
        assert_eq!(split(&r, "example.com"), owned("", "example", "com"));
        assert_eq!(split(&r, "api.example.com"), owned("api", "example", "com"));
        assert_eq!(split(&r, "v2.api.example.com"), owned("v2.api", "example", "com"));
    }

    #[test]
    fn test_longest_match_wins() {
        let r = resolver("uk\nco.uk\n");
        assert_eq!(split(&r, "www.example.co.uk"), owned("www", "example", "co.uk"));
        assert_eq!(split(&r, "example.uk"), owned("", "example", "uk"));
    }

    #[test]
    fn test_wildcard_rule() {
        let r = resolver("*.ck\n!www.ck\n");
        assert_eq!(split(&r, "shop.foo.ck"), owned("", "shop", "foo.ck"));
        assert_eq!(split(&r, "a.shop.foo.ck"), owned("a", "shop", "foo.ck"));
    }

    #[test]
    fn test_exception_rule_overrides_wildcard() {
        let r = resolver("*.ck\n!www.ck\n");
        assert_eq!(split(&r, "www.ck"), owned("", "www", "ck"));
        assert_eq!(split(&r, "mail.www.ck"), owned("mail", "www", "ck"));
    }

    #[test]
    fn test_exception_rule_nested() {
        let r = resolver("jp\n*.kawasaki.jp\n!city.kawasaki.jp\n");
        assert_eq!(split(&r, "city.kawasaki.jp"), owned("", "city", "kawasaki.jp"));
        assert_eq!(split(&r, "www.city.kawasaki.jp"), owned("www", "city", "kawasaki.jp"));
        assert_eq!(split(&r, "foo.bar.kawasaki.jp"), owned("", "foo", "bar.kawasaki.jp"));
    }

    #[test]
    fn test_default_rule() {
        let r = resolver("com\n");
        assert_eq!(split(&r, "example.unknowntld"), owned("", "example", "unknowntld"));
        assert_eq!(split(&r, "localhost"), owned("", "", "localhost"));
    }

    #[test]
    fn test_host_equal_to_suffix() {
        let r = resolver("uk\nco.uk\n");
        assert_eq!(split(&r, "co.uk"), owned("", "", "co.uk"));
    }

    #[test]
    fn test_malformed_hosts() {
        let r = resolver("com\n");
        assert!(r.resolve("").is_empty());
        assert!(r.resolve("a..com").is_empty());
        assert!(r.resolve(".com").is_empty());
        assert!(r.resolve("...").is_empty());
    }

    #[test]
    fn test_ip_literal() {
        let r = resolver("com\n");
        assert_eq!(split(&r, "192.168.1.10"), owned("", "192.168.1.10", ""));
        assert_eq!(split(&r, "::1"), owned("", "::1", ""));
    }

    #[test]
    fn test_case_and_trailing_dot() {
        let r = resolver("com\n");
        assert_eq!(split(&r, "WWW.Example.COM."), owned("www", "example", "com"));
    }

    #[test]
    fn test_punycode_matches_unicode_rule() {
        let r = resolver("рф\n");
        assert_eq!(split(&r, "example.xn--p1ai"), owned("", "example", "xn--p1ai"));
    }

    #[test]
    fn test_resolve_url() {
        let r = resolver("com\nuk\nco.uk\n");
        let parts = r.resolve_url("https://user@login.bank.co.uk:8443/x?y#z");
        assert_eq!(parts.subdomain, "login");
        assert_eq!(parts.domain, "bank");
        assert_eq!(parts.suffix, "co.uk");
    }

    #[test]
    fn test_bundled_rules_load() {
        let set = RuleSet::bundled().unwrap();
        assert!(set.len() > 5000);
        // ICANN rules only: com.io is listed, github.io is private
        let io: Vec<String> = set
            .candidates("io")
            .iter()
            .map(|rule| rule.labels().iter().rev().cloned().collect::<Vec<_>>().join("."))
            .collect();
        assert!(io.contains(&"com.io".to_string()));
        assert!(!io.contains(&"github.io".to_string()));
    }
}
