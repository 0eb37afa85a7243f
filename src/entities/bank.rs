// 🏦 Bank Entity - identity is the base (BIC8) code
//
// A bank lives exactly as long as at least one SWIFT code references it:
// created with its first code, deleted with its last.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// Surrogate key assigned by the store (None until persisted)
    pub id: Option<i64>,

    pub bank_name: String,

    /// First 8 characters of every SWIFT code owned by this bank
    pub base_swift_code: String,
}

impl Bank {
    /// New, not yet persisted bank
    pub fn new(bank_name: &str, base_swift_code: &str) -> Self {
        Bank {
            id: None,
            bank_name: bank_name.to_string(),
            base_swift_code: base_swift_code.to_string(),
        }
    }

    /// Check that a caller-supplied name matches the stored one exactly
    pub fn name_matches(&self, bank_name: &str) -> bool {
        self.bank_name == bank_name
    }
}
