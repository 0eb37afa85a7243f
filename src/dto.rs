// Request/response shapes for the lookup service
//
// Field names follow the public JSON contract (camelCase, "countryISO2").

use crate::entities::SwiftCodeRecord;
use serde::{Deserialize, Serialize};

// ============================================================================
// RESPONSES
// ============================================================================

/// Details of one SWIFT code
///
/// `branches` is present only when the code is a headquarters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftCodeDetails {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<BranchSummary>>,
}

impl SwiftCodeDetails {
    /// Attach the branch list (headquarters only)
    pub fn with_branches(mut self, branches: Vec<SwiftCodeRecord>) -> Self {
        self.branches = Some(branches.into_iter().map(BranchSummary::from).collect());
        self
    }
}

impl From<SwiftCodeRecord> for SwiftCodeDetails {
    fn from(record: SwiftCodeRecord) -> Self {
        Self {
            address: record.address,
            bank_name: record.bank_name,
            country_iso2: record.country_iso2_code,
            country_name: record.country_name,
            is_headquarter: record.is_headquarter,
            swift_code: record.swift_code,
            branches: None,
        }
    }
}

/// Entry of a headquarters' branch list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSummary {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

impl From<SwiftCodeRecord> for BranchSummary {
    fn from(record: SwiftCodeRecord) -> Self {
        Self {
            address: record.address,
            bank_name: record.bank_name,
            country_iso2: record.country_iso2_code,
            is_headquarter: record.is_headquarter,
            swift_code: record.swift_code,
        }
    }
}

/// All SWIFT codes of one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySwiftCodesResponse {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub swift_codes: Vec<SwiftCodeDetails>,
}

/// Confirmation for mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// ============================================================================
// REQUESTS
// ============================================================================

/// Body of the add endpoint
///
/// Required fields are optional here so a missing field becomes a
/// "... is required" validation message instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSwiftCodeRequest {
    #[serde(default, alias = "code")]
    pub swift_code: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default, rename = "countryISO2")]
    pub country_iso2: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub is_headquarter: bool,
}
