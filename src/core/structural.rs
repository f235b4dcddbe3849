//! Character-level statistics over raw URL text.
//!
//! Every function here is total: empty text gives zero counts, zero
//! proportions and zero entropy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tokens whose presence (case-insensitive) is counted as suspicious.
pub const SUSPICIOUS_TOKENS: [&str; 6] = ["login", "secure", "update", "bank", "free", "win"];

/// Occurrences of each punctuation character the classifier looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCounts {
    pub dot: usize,
    pub slash: usize,
    pub hyphen: usize,
    pub underscore: usize,
    pub question_mark: usize,
    pub ampersand: usize,
    pub equals: usize,
    pub at_symbol: usize,
    pub hash: usize,
    pub percent: usize,
    pub tilde: usize,
    pub plus: usize,
    pub dollar: usize,
    pub exclamation: usize,
    pub comma: usize,
    pub apostrophe: usize,
    /// '(' and ')' together
    pub parenthesis: usize,
}

impl CharacterCounts {
    /// Count punctuation in one pass.
    pub fn count(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            match c {
                '.' => counts.dot += 1,
                '/' => counts.slash += 1,
                '-' => counts.hyphen += 1,
                '_' => counts.underscore += 1,
                '?' => counts.question_mark += 1,
                '&' => counts.ampersand += 1,
                '=' => counts.equals += 1,
                '@' => counts.at_symbol += 1,
                '#' => counts.hash += 1,
                '%' => counts.percent += 1,
                '~' => counts.tilde += 1,
                '+' => counts.plus += 1,
                '$' => counts.dollar += 1,
                '!' => counts.exclamation += 1,
                ',' => counts.comma += 1,
                '\'' => counts.apostrophe += 1,
                '(' | ')' => counts.parenthesis += 1,
                _ => {}
            }
        }
        counts
    }
}

/// Statistics computed directly from URL text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralFeatures {
    /// Length in characters
    pub url_length: usize,
    pub chars: CharacterCounts,
    /// Number of [`SUSPICIOUS_TOKENS`] contained in the text
    pub suspicious_word_count: usize,
    /// Text begins with the literal prefix "https"
    pub uses_https: bool,
    /// Shannon entropy of the character distribution, in bits
    pub entropy: f64,
    /// Characters with `char::is_numeric` (Unicode Nd, Nl and No, so '½'
    /// and 'Ⅻ' count as well as ASCII digits)
    pub digit_count: usize,
    /// Characters with the Unicode Alphabetic property (letter numbers included)
    pub alphabetic_count: usize,
    /// Characters that are neither alphabetic nor numeric
    pub special_count: usize,
    pub proportion_numeric: f64,
    pub proportion_alphabetic: f64,
    pub proportion_special: f64,
}

impl StructuralFeatures {
    /// Compute all statistics for `url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use urllex::StructuralFeatures;
    ///
    /// let stats = StructuralFeatures::extract("https://secure-login.example.com/a?b=1");
    /// assert_eq!(stats.chars.dot, 2);
    /// assert_eq!(stats.suspicious_word_count, 2);
    /// assert!(stats.uses_https);
    /// ```
    pub fn extract(url: &str) -> Self {
        let mut url_length = 0;
        let mut digit_count = 0;
        let mut alphabetic_count = 0;
        let mut special_count = 0;

        for c in url.chars() {
            url_length += 1;
            if c.is_numeric() {
                digit_count += 1;
            }
            if c.is_alphabetic() {
                alphabetic_count += 1;
            }
            if !c.is_alphanumeric() {
                special_count += 1;
            }
        }

        Self {
            url_length,
            chars: CharacterCounts::count(url),
            suspicious_word_count: suspicious_word_count(url),
            uses_https: url.starts_with("https"),
            entropy: shannon_entropy(url),
            digit_count,
            alphabetic_count,
            special_count,
            proportion_numeric: proportion(digit_count, url_length),
            proportion_alphabetic: proportion(alphabetic_count, url_length),
            proportion_special: proportion(special_count, url_length),
        }
    }
}

/// `count / total`, or 0.0 for empty text.
fn proportion(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Number of suspicious tokens contained in `text`, ignoring case.
///
/// Each token counts once no matter how often it appears, and tokens are
/// checked independently, so "winwin" counts 1 and "secure-login-update" 3.
pub fn suspicious_word_count(text: &str) -> usize {
    let lowered = text.to_lowercase();
    SUSPICIOUS_TOKENS
        .iter()
        .filter(|token| lowered.contains(*token))
        .count()
}

/// Shannon entropy (base 2) of the character distribution of `text`.
///
/// Returns 0.0 for empty text. Characters are tallied in a sorted map so the
/// summation order, and therefore the exact result, is stable across calls.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut frequencies: BTreeMap<char, usize> = BTreeMap::new();
    let mut total = 0usize;
    for c in text.chars() {
        *frequencies.entry(c).or_insert(0) += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let len = total as f64;
    frequencies.values().fold(0.0, |entropy, &count| {
        let p = count as f64 / len;
        entropy - p * p.log2()
    })
}
