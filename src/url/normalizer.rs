//! Lexical host extraction and normalization.
//!
//! Nothing here parses a URL strictly: the input is arbitrary text and every
//! function returns a (possibly empty) string instead of failing.

use std::borrow::Cow;
use std::net::IpAddr;

/// Full stops other than '.' that browsers treat as label separators.
const ALT_DOTS: [char; 3] = ['\u{3002}', '\u{ff0e}', '\u{ff61}'];

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.'
}

/// Drop a leading `scheme://` or `//` from URL text, if there is one.
///
/// A scheme is only recognised when every character before `://` is a valid
/// scheme character; otherwise the text is returned untouched.
pub fn strip_scheme(url: &str) -> &str {
    let Some(start) = url.find("//") else {
        return url;
    };
    if start == 0 {
        return &url[2..];
    }
    if start < 2 || !url[..start].ends_with(':') {
        return url;
    }
    if !url[..start - 1].chars().all(is_scheme_char) {
        return url;
    }
    &url[start + 2..]
}

/// Extract the hostname from raw URL text.
///
/// This:
/// 1. Drops the scheme and `//`
/// 2. Cuts the authority at the first `/`, `?`, `#` or `\`
/// 3. Drops userinfo (up to the last `@`) and any `:port`
/// 4. Unwraps bracketed IPv6 literals
/// 5. Normalizes the result with [`normalize_host`]
///
/// # Examples
///
/// ```
/// use urllex::extract_host;
///
/// assert_eq!(extract_host("https://user:pw@WWW.Example.co.uk:8443/a?b#c"), "www.example.co.uk");
/// assert_eq!(extract_host("example.com/path"), "example.com");
/// assert_eq!(extract_host("http://[::1]:8080/"), "::1");
/// ```
pub fn extract_host(url: &str) -> String {
    let rest = strip_scheme(url.trim());
    let authority = rest
        .split(|c: char| matches!(c, '/' | '?' | '#' | '\\'))
        .next()
        .unwrap_or("");
    let after_userinfo = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    if let Some(inner) = after_userinfo.strip_prefix('[') {
        if let Some(end) = inner.find(']') {
            return inner[..end].to_ascii_lowercase();
        }
    }

    let hostname = after_userinfo.split(':').next().unwrap_or("").trim();
    normalize_host(hostname)
}

/// Normalize a hostname for suffix matching.
///
/// Alternate full stops become '.', trailing root dots are removed and the
/// result is lower-cased.
pub fn normalize_host(host: &str) -> String {
    host.replace(&ALT_DOTS[..], ".")
        .trim_end_matches('.')
        .to_lowercase()
}

/// Check whether a hostname is an IPv4 or IPv6 literal.
pub fn is_ip_literal(host: &str) -> bool {
    host.parse::<IpAddr>().is_ok()
}

/// The form of a label used for rule lookup.
///
/// Punycode labels (`xn--`) are decoded so they match rules written in
/// Unicode; anything that fails to decode is used as written.
pub fn lookup_label(label: &str) -> Cow<'_, str> {
    if !label.starts_with("xn--") {
        return Cow::Borrowed(label);
    }
    match idna::domain_to_unicode(label) {
        (decoded, Ok(())) if !decoded.is_empty() => Cow::Owned(decoded),
        _ => Cow::Borrowed(label),
    }
}
