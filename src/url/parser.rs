//! Best-effort URL structure parsing.
//!
//! Splits raw text into scheme, authority, path, query and fragment the way a
//! lenient `scheme://authority/path?query#fragment` splitter does: nothing is
//! validated, nothing is decoded, and malformed input simply leaves the
//! missing components empty.

use serde::{Deserialize, Serialize};

use crate::types::UriComponents;

/// Characters silently removed from URL text before splitting.
const UNSAFE_CHARS: [char; 3] = ['\t', '\r', '\n'];

/// Schemes whose last path segment may carry `;params`. The empty scheme
/// is included so schemeless text is treated like http.
const USES_PARAMS: [&str; 15] = [
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtspu", "sip",
    "sips", "mms", "sftp", "tel",
];

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.'
}

/// Split URL text into its five components.
///
/// A scheme is recognised only when the text starts with an ASCII letter and
/// every character up to the first ':' is a scheme character. An authority
/// is recognised only after a literal `//`. For http-like schemes a `;params`
/// suffix on the last path segment is moved out of the path.
///
/// # Examples
///
/// ```
/// use urllex::split_uri;
///
/// let parts = split_uri("https://api.github.com/repos?page=1#readme");
/// assert_eq!(parts.scheme, "https");
/// assert_eq!(parts.authority, "api.github.com");
/// assert_eq!(parts.path, "/repos");
/// assert_eq!(parts.query, "page=1");
/// assert_eq!(parts.fragment, "readme");
///
/// let bare = split_uri("example.com/abc/def");
/// assert_eq!(bare.scheme, "");
/// assert_eq!(bare.path, "example.com/abc/def");
/// ```
pub fn split_uri(url: &str) -> UriComponents {
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !UNSAFE_CHARS.contains(c))
        .collect();
    let mut rest = cleaned.as_str();

    let mut scheme = String::new();
    if let Some(colon) = rest.find(':') {
        let candidate = &rest[..colon];
        let starts_alpha = candidate.starts_with(|c: char| c.is_ascii_alphabetic());
        if starts_alpha && candidate.chars().all(is_scheme_char) {
            scheme = candidate.to_ascii_lowercase();
            rest = &rest[colon + 1..];
        }
    }

    let mut authority = String::new();
    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(|c: char| matches!(c, '/' | '?' | '#')).unwrap_or(after.len());
        authority = after[..end].to_string();
        rest = &after[end..];
    }

    let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let (path, params) = if USES_PARAMS.contains(&scheme.as_str()) {
        split_params(path)
    } else {
        (path, "")
    };

    UriComponents::new(
        scheme,
        authority,
        path.to_string(),
        query.to_string(),
        fragment.to_string(),
    )
    .with_params(params.to_string())
}

/// Cut `;params` from the last segment of `path`.
fn split_params(path: &str) -> (&str, &str) {
    let last_segment = path.rfind('/').unwrap_or(0);
    match path[last_segment..].find(';') {
        Some(offset) => {
            let at = last_segment + offset;
            (&path[..at], &path[at + 1..])
        }
        None => (path, ""),
    }
}

/// Split a path on '/', keeping every segment including empty ones.
///
/// # Examples
///
/// ```
/// use urllex::path_segments;
///
/// assert_eq!(path_segments("/api/v1/"), vec!["", "api", "v1", ""]);
/// assert_eq!(path_segments(""), vec![""]);
/// ```
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

/// Split a query string on '&'. An empty query has no parameters.
pub fn query_params(query: &str) -> Vec<&str> {
    if query.is_empty() {
        return Vec::new();
    }
    query.split('&').collect()
}

/// Structural measurements taken from [`UriComponents`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriStructure {
    /// Number of '/'-separated path segments, empty ones included
    pub path_segment_count: usize,
    /// Length of the segment after a leading '/', or 0
    pub first_path_segment_length: usize,
    /// Number of '&'-separated query tokens, 0 for an empty query
    pub query_param_count: usize,
    /// Query length in characters
    pub query_length: usize,
}

impl UriStructure {
    /// Measure already-split components.
    ///
    /// The first path segment is the one at index 1 of the split and only
    /// counts when index 0 is the empty text before a leading '/': "/abc/def"
    /// gives 3, "abc/def" gives 0.
    pub fn measure(components: &UriComponents) -> Self {
        let segments = path_segments(&components.path);
        let first_path_segment_length = if segments.len() > 1 && segments[0].is_empty() {
            segments[1].chars().count()
        } else {
            0
        };

        Self {
            path_segment_count: segments.len(),
            first_path_segment_length,
            query_param_count: query_params(&components.query).len(),
            query_length: components.query.chars().count(),
        }
    }
}

/// Split URL text and measure it in one step.
pub fn parse_uri(url: &str) -> (UriComponents, UriStructure) {
    let components = split_uri(url);
    let structure = UriStructure::measure(&components);
    (components, structure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_only(path: &str) -> UriComponents {
        UriComponents {
            path: path.to_string(),
            ..UriComponents::default()
        }
    }

    #[test]
    fn test_split_full_url() {
        let parts = split_uri("HTTP://user@Example.com:8080/a/b?x=1&y=2#frag");
        assert_eq!(parts.scheme, "http");
        assert_eq!(parts.authority, "user@Example.com:8080");
        assert_eq!(parts.path, "/a/b");
        assert_eq!(parts.query, "x=1&y=2");
        assert_eq!(parts.fragment, "frag");
    }

    #[test]
    fn test_split_without_scheme() {
        let parts = split_uri("www.example.com/login.php?id=7");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "www.example.com/login.php");
        assert_eq!(parts.query, "id=7");
    }

    #[test]
    fn test_split_scheme_without_authority() {
        let parts = split_uri("mailto:someone@example.com");
        assert_eq!(parts.scheme, "mailto");
        assert_eq!(parts.authority, "");
        assert_eq!(parts.path, "someone@example.com");
    }

    #[test]
    fn test_split_host_port_is_scheme_like() {
        // "example.com" is made of scheme characters, so it is read as a scheme
        let parts = split_uri("example.com:80/path");
        assert_eq!(parts.scheme, "example.com");
        assert_eq!(parts.path, "80/path");
    }

    #[test]
    fn test_split_invalid_scheme_kept_in_path() {
        let parts = split_uri("1http://x");
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.path, "1http://x");
    }

    #[test]
    fn test_split_params_from_last_segment() {
        let parts = split_uri("http://h/abc;x=1?q=2");
        assert_eq!(parts.path, "/abc");
        assert_eq!(parts.params, "x=1");
        assert_eq!(parts.query, "q=2");
        assert_eq!(UriStructure::measure(&parts).first_path_segment_length, 3);

        // only the last segment carries params
        let parts = split_uri("https://h/a;b/c");
        assert_eq!(parts.path, "/a;b/c");
        assert!(!parts.has_params());

        let parts = split_uri("https://h/a;b/c;d;e");
        assert_eq!(parts.path, "/a;b/c");
        assert_eq!(parts.params, "d;e");
    }

    #[test]
    fn test_split_params_kept_for_other_schemes() {
        let parts = split_uri("mailto:a;b@example.com");
        assert_eq!(parts.path, "a;b@example.com");
        assert_eq!(parts.params, "");

        let parts = split_uri("abc;x");
        assert_eq!(parts.path, "abc");
        assert_eq!(parts.params, "x");
    }

    #[test]
    fn test_split_fragment_before_query() {
        let parts = split_uri("https://h/p#frag?notquery");
        assert_eq!(parts.path, "/p");
        assert_eq!(parts.query, "");
        assert_eq!(parts.fragment, "frag?notquery");
    }

    #[test]
    fn test_split_removes_unsafe_chars() {
        let parts = split_uri("  https://exa\tmple.com/pa\nth");
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.authority, "example.com");
        assert_eq!(parts.path, "/path");
    }

    #[test]
    fn test_split_empty() {
        assert_eq!(split_uri(""), UriComponents::default());
    }

    #[test]
    fn test_path_segment_count() {
        assert_eq!(UriStructure::measure(&path_only("")).path_segment_count, 1);
        assert_eq!(UriStructure::measure(&path_only("/")).path_segment_count, 2);
        assert_eq!(UriStructure::measure(&path_only("/a//b/")).path_segment_count, 5);
    }

    #[test]
    fn test_first_path_segment_length() {
        assert_eq!(UriStructure::measure(&path_only("/abc/def")).first_path_segment_length, 3);
        assert_eq!(UriStructure::measure(&path_only("abc/def")).first_path_segment_length, 0);
        assert_eq!(UriStructure::measure(&path_only("//x")).first_path_segment_length, 0);
        assert_eq!(UriStructure::measure(&path_only("abc")).first_path_segment_length, 0);
        assert_eq!(UriStructure::measure(&path_only("/")).first_path_segment_length, 0);
    }

    #[test]
    fn test_query_measurements() {
        let (_, structure) = parse_uri("https://h/?a=1&b=2");
        assert_eq!(structure.query_param_count, 2);
        assert_eq!(structure.query_length, 7);

        let (_, structure) = parse_uri("https://h/");
        assert_eq!(structure.query_param_count, 0);
        assert_eq!(structure.query_length, 0);

        let (_, structure) = parse_uri("https://h/?&&");
        assert_eq!(structure.query_param_count, 3);
    }

    #[test]
    fn test_query_length_counts_characters() {
        let (_, structure) = parse_uri("https://h/?q=é");
        assert_eq!(structure.query_length, 3);
    }
}
