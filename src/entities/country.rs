// 🌍 Country Entity - ISO2 identity, uppercase display name

use serde::{Deserialize, Serialize};

/// Country referenced by SWIFT codes
///
/// Never updated in place and never deleted by normal operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, uppercase
    pub iso2_code: String,

    /// Display name, uppercase
    pub name: String,
}

impl Country {
    /// Build a country; the caller passes an already-normalized ISO2 code
    pub fn new(iso2_code: String, name: &str) -> Self {
        Country {
            iso2_code,
            name: name.trim().to_uppercase(),
        }
    }
}
