//! End-to-end tests for the feature pipeline.
//!
//! These tests pin the behaviour a trained classifier depends on: vector
//! length, value order, and the edge-case policies of each measurement.

use std::sync::Arc;
use std::thread;

use urllex::*;

fn extractor() -> FeatureExtractor {
    FeatureExtractor::with_bundled_rules().unwrap()
}

#[test]
fn test_vector_length_for_any_input() {
    let ex = extractor();
    let inputs = [
        "",
        " ",
        "https://example.com",
        "http://user:pass@[::1]:8080/a?b#c",
        "not a url at all",
        "////",
        "?&&&=",
        "https://пример.рф/путь?ключ=значение",
        "javascript:alert('x')",
        "\t\r\n",
    ];
    for url in inputs {
        let vector = ex.extract(url);
        assert_eq!(vector.len(), FEATURE_COUNT, "Wrong length for: {:?}", url);
        assert_eq!(vector.as_slice().len(), 28);
    }
}

#[test]
fn test_extraction_is_idempotent() {
    let ex = extractor();
    let url = "http://secure.bank-login.example.co.uk/~user/update.php?id=1&next=%2F#x";
    let first = ex.extract(url);
    let second = ex.extract(url);
    let bits = |v: &FeatureVector| v.as_slice().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn test_full_vector_for_known_url() {
    let url = "http://secure-login-update.example.com/abc/def?a=1&b=2";
    let vector = extractor().extract(url);

    let expected: [f64; FEATURE_COUNT] = [
        54.0, // url_length
        2.0,  // dots
        4.0,  // slashes
        2.0,  // hyphens
        0.0, 1.0, 1.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        3.0, // suspicious words
        7.0, // "example"
        3.0, // "com"
        3.0, // "", "abc", "def"
        2.0, // query params
        7.0, // "a=1&b=2"
        3.0, // "abc"
        2.0 / 54.0,
        39.0 / 54.0,
        13.0 / 54.0,
    ];

    for (index, (actual, expected)) in vector.as_slice().iter().zip(expected.iter()).enumerate() {
        assert!(
            (actual - expected).abs() < 1e-12,
            "{} (index {}): expected {}, got {}",
            FEATURE_LAYOUT[index],
            index,
            expected,
            actual
        );
    }
}

#[test]
fn test_entropy_and_https_are_computed_but_not_in_vector() {
    let analysis = extractor().analyze("https://ab");
    assert!(analysis.structural.uses_https);
    assert!(analysis.structural.entropy > 0.0);
    assert_eq!(feature_index("entropy"), None);
    assert_eq!(feature_index("uses_https"), None);
}

#[test]
fn test_proportion_special_is_last() {
    let vector = extractor().extract("a-b");
    assert_eq!(FEATURE_LAYOUT[27], "proportion_special");
    assert!((vector.get(27).unwrap() - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_proportions_in_unit_interval() {
    let ex = extractor();
    for url in ["", "1234", "abcd", "!!!!", "https://a1.b2/c3?d=4"] {
        let vector = ex.extract(url);
        for name in ["proportion_numeric", "proportion_alphabetic", "proportion_special"] {
            let value = vector.get_by_name(name).unwrap();
            assert!((0.0..=1.0).contains(&value), "{} = {} for {:?}", name, value, url);
        }
    }
}

#[test]
fn test_empty_url_policy() {
    let vector = extractor().extract("");
    assert_eq!(vector.get_by_name("proportion_numeric"), Some(0.0));
    assert_eq!(vector.get_by_name("proportion_alphabetic"), Some(0.0));
    assert_eq!(vector.get_by_name("proportion_special"), Some(0.0));
    assert_eq!(shannon_entropy(""), 0.0);
}

#[test]
fn test_entropy_values() {
    assert_eq!(shannon_entropy(""), 0.0);
    assert_eq!(shannon_entropy("zzzzzzzzzz"), 0.0);
    assert_eq!(shannon_entropy("ab"), 1.0);
}

#[test]
fn test_first_path_segment_length_convention() {
    let ex = extractor();
    assert_eq!(ex.extract("https://h.com/abc/def").get(24), Some(3.0));
    // schemeless text: the whole thing is the path, no leading slash
    assert_eq!(ex.extract("abc/def").get(24), Some(0.0));
    assert_eq!(ex.extract("https://h.com").get(24), Some(0.0));
    // ";params" on the last segment is not part of the path
    assert_eq!(ex.extract("http://h.com/abc;x=1").get(24), Some(3.0));
    assert_eq!(ex.extract("http://h.com/abc;x=1").get(21), Some(2.0));
}

#[test]
fn test_query_param_count() {
    let ex = extractor();
    assert_eq!(ex.extract("https://h.com/?a=1&b=2").get_by_name("query_param_count"), Some(2.0));
    assert_eq!(ex.extract("https://h.com/").get_by_name("query_param_count"), Some(0.0));
}

#[test]
fn test_concurrent_extraction_shares_rules() {
    let rules = Arc::new(RuleSet::bundled().unwrap());
    let ex = FeatureExtractor::new(Arc::clone(&rules));
    let url = "https://mail.www.ck/path?x=1";
    let reference = ex.extract(url);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ex = ex.clone();
            thread::spawn(move || ex.extract(url))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), reference);
    }
    // extractor clones plus the local handle
    assert!(Arc::strong_count(&rules) >= 2);
}

#[test]
fn test_builder_requires_all_records() {
    let result = FeatureVectorBuilder::new()
        .structure(UriStructure::default())
        .domain(DomainDecomposition::empty())
        .build();
    assert!(matches!(result, Err(UrlLexError::ContractViolation(_))));
}
