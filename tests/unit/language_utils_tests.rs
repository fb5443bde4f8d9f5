/*!
 * Tests for language code utilities
 */

use subalign::errors::ConfigurationError;
use subalign::language_utils::{
    base_language_code, ensure_supported_target, get_language_name, language_codes_match,
    normalize_to_part1_or_part2t,
};

/// Test normalization of two- and three-letter codes
#[test]
fn test_normalize_withPart1AndPart2Codes_shouldReturnPart1() {
    assert_eq!(normalize_to_part1_or_part2t("es").unwrap(), "es");
    assert_eq!(normalize_to_part1_or_part2t("spa").unwrap(), "es");
    assert_eq!(normalize_to_part1_or_part2t("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1_or_part2t("EN").unwrap(), "en");
}

/// Test that unknown codes are rejected
#[test]
fn test_normalize_withUnknownCode_shouldFail() {
    assert!(matches!(
        normalize_to_part1_or_part2t("xx"),
        Err(ConfigurationError::InvalidLanguageCode(_))
    ));
    assert!(get_language_name("xyz").is_err());
}

/// Test region suffix stripping
#[test]
fn test_base_language_code_withRegion_shouldStripIt() {
    assert_eq!(base_language_code("es-MX"), "es");
    assert_eq!(base_language_code("pt_BR"), "pt");
    assert_eq!(base_language_code("en"), "en");
}

/// Test matching across code formats
#[test]
fn test_language_codes_match_acrossFormats_shouldMatch() {
    assert!(language_codes_match("de", "ger"));
    assert!(language_codes_match("en-US", "eng"));
    assert!(!language_codes_match("es", "en"));
    assert!(!language_codes_match("xx", "xx"));
}

/// Test that English is the only accepted destination
#[test]
fn test_ensure_supported_target_shouldOnlyAcceptEnglish() {
    assert!(ensure_supported_target("en").is_ok());
    assert!(ensure_supported_target("eng").is_ok());
    assert!(matches!(
        ensure_supported_target("fr"),
        Err(ConfigurationError::UnsupportedTargetLanguage { .. })
    ));
}

/// Test language names
#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("fre").unwrap(), "French");
}
