// 🔖 SwiftCode Entity - canonical BIC11 record
//
// Invariants:
// - swift_code is always the 11-character normalized form
// - is_headquarter == swift_code ends with "XXX"
// - swift_code[0..8] == owning bank's base_swift_code

use crate::normalizer::is_headquarter_code;
use serde::{Deserialize, Serialize};

// ============================================================================
// STORED ROW
// ============================================================================

/// Row as stored: foreign keys, no joined data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiftCode {
    pub swift_code: String,
    pub address: String,
    pub is_headquarter: bool,
    pub bank_id: i64,
    pub country_iso2_code: String,
}

impl SwiftCode {
    /// Build a row from a normalized code; the headquarters flag is derived
    pub fn new(swift_code: String, address: String, bank_id: i64, country_iso2_code: String) -> Self {
        let is_headquarter = is_headquarter_code(&swift_code);

        SwiftCode {
            swift_code,
            address,
            is_headquarter,
            bank_id,
            country_iso2_code,
        }
    }
}

// ============================================================================
// JOINED VIEW
// ============================================================================

/// SWIFT code joined with its bank and country, as read back by queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiftCodeRecord {
    pub swift_code: String,
    pub address: String,
    pub is_headquarter: bool,
    pub bank_name: String,
    pub country_iso2_code: String,
    pub country_name: String,
}
