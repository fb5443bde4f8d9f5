use isolang::Language;

use crate::errors::ConfigurationError;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating and normalizing ISO 639-1
/// (2-letter) and ISO 639-2 (3-letter) language codes, as used for dictionary
/// file names, word-vector file names and provider requests.

/// The only destination language the alignment resources exist for
pub const SUPPORTED_TARGET_LANGUAGE: &str = "en";

/// Strip a region or script suffix: `es-MX` -> `es`, `pt_BR` -> `pt`
pub fn base_language_code(code: &str) -> &str {
    let code = code.trim();
    code.split(['-', '_']).next().unwrap_or(code)
}

/// Map an ISO 639-2/B code onto its ISO 639-2/T counterpart
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    let part2t = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(part2t)
}

fn resolve(code: &str) -> Option<Language> {
    let normalized = base_language_code(code).to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = bibliographic_to_terminology(&normalized).unwrap_or(&normalized);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Normalize a language code to ISO 639-1 (2-letter) format if possible.
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists.
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String, ConfigurationError> {
    let lang = resolve(code).ok_or_else(|| ConfigurationError::InvalidLanguageCode(code.to_string()))?;
    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve(code1), resolve(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String, ConfigurationError> {
    resolve(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| ConfigurationError::InvalidLanguageCode(code.to_string()))
}

/// Reject any destination language other than the supported one
pub fn ensure_supported_target(code: &str) -> Result<(), ConfigurationError> {
    if language_codes_match(code, SUPPORTED_TARGET_LANGUAGE) {
        Ok(())
    } else {
        Err(ConfigurationError::UnsupportedTargetLanguage {
            requested: code.to_string(),
            supported: SUPPORTED_TARGET_LANGUAGE,
        })
    }
}
