// 🔤 Code Normalizer - single source of truth for code format rules
//
// Pure functions shared by the bulk importer and the request service.
// Nothing here touches the store.

use crate::error::{Result, SwiftError};
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Branch suffix that marks a bank's primary office
pub const HEADQUARTER_SUFFIX: &str = "XXX";

/// Length of a bank-level (BIC8) code
pub const BASE_CODE_LEN: usize = 8;

/// Length of a branch-level (BIC11) code
pub const FULL_CODE_LEN: usize = 11;

static SWIFT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$").expect("valid SWIFT regex"));

static COUNTRY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid country regex"));

// ============================================================================
// SWIFT CODES
// ============================================================================

/// Canonical 11-character form of a SWIFT code
///
/// Uppercases, pads a BIC8 with `XXX`, then checks the BIC pattern.
///
/// # Examples:
/// ```
/// use swift_codes::normalizer::normalize_swift_code;
/// assert_eq!(normalize_swift_code("citius33").unwrap(), "CITIUS33XXX");
/// assert_eq!(normalize_swift_code("CITIUS33LAX").unwrap(), "CITIUS33LAX");
/// assert!(normalize_swift_code("CITI").is_err());
/// ```
pub fn normalize_swift_code(raw: &str) -> Result<String> {
    // ASCII-only case folding: 'ß' must not grow into "SS"
    if !raw.is_ascii() {
        return Err(invalid_swift_code(raw));
    }

    let mut code = raw.to_ascii_uppercase();

    if code.len() == BASE_CODE_LEN {
        code.push_str(HEADQUARTER_SUFFIX);
    }

    if code.len() != FULL_CODE_LEN || !SWIFT_CODE_RE.is_match(&code) {
        return Err(invalid_swift_code(raw));
    }

    Ok(code)
}

fn invalid_swift_code(raw: &str) -> SwiftError {
    SwiftError::Format(format!(
        "Invalid SWIFT code format: '{}' (expected BIC8 or BIC11)",
        raw
    ))
}

/// True iff the code denotes a headquarters record
pub fn is_headquarter_code(code: &str) -> bool {
    code.ends_with(HEADQUARTER_SUFFIX)
}

/// Bank-level part of a normalized code (first 8 characters)
pub fn base_code(code: &str) -> &str {
    code.get(..BASE_CODE_LEN).unwrap_or(code)
}

// ============================================================================
// COUNTRIES
// ============================================================================

/// Uppercase ISO2 code, exactly two letters
pub fn normalize_country_code(raw: &str) -> Result<String> {
    let code = raw.to_ascii_uppercase();

    if !raw.is_ascii() || !COUNTRY_CODE_RE.is_match(&code) {
        return Err(SwiftError::Format(format!(
            "Invalid country code format: '{}'. Must be exactly 2 letters.",
            raw
        )));
    }

    Ok(code)
}

// ============================================================================
// ADDRESSES
// ============================================================================

/// Address with fallbacks: address, then "town, country", then country
pub fn resolve_address(address: &str, town: &str, country: &str) -> String {
    if !address.is_empty() {
        return address.to_string();
    }

    if !town.is_empty() {
        return format!("{}, {}", town, country);
    }

    country.to_string()
}

// ============================================================================
// TESTS
// ============================================================================
