// 🔎 Query/Mutation Service - lookups, add, delete
//
// All validation runs before the first store call. Mutations run in an
// IMMEDIATE transaction so check-then-write is a single atomic unit.

use crate::db;
use crate::dto::{AddSwiftCodeRequest, CountrySwiftCodesResponse, SwiftCodeDetails};
use crate::entities::{Bank, Country, SwiftCode};
use crate::error::{is_constraint_violation, Result, SwiftError};
use crate::normalizer::{
    base_code, is_headquarter_code, normalize_country_code, normalize_swift_code, BASE_CODE_LEN,
    FULL_CODE_LEN,
};
use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info};

pub const ADDED_MESSAGE: &str = "SWIFT code added successfully";
pub const DELETED_MESSAGE: &str = "SWIFT code deleted successfully";

// ============================================================================
// INPUT CHECKS
// ============================================================================

/// Path-style SWIFT code input → canonical 11-character code
fn require_swift_code(input: &str) -> Result<String> {
    let input = input.trim();

    if input.is_empty() {
        return Err(SwiftError::Validation("SWIFT code cannot be null or empty".to_string()));
    }

    let len = input.chars().count();
    if len != BASE_CODE_LEN && len != FULL_CODE_LEN {
        return Err(SwiftError::Validation(format!(
            "Invalid SWIFT code length: expected 8 or 11 characters, got {}",
            len
        )));
    }

    normalize_swift_code(input)
}

fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SwiftError::Validation(format!("{} is required", what))),
    }
}

/// Add-request fields after validation
#[derive(Debug)]
struct ValidatedRequest<'a> {
    swift_code: String,
    bank_name: &'a str,
    country_iso2: String,
    country_name: &'a str,
    address: String,
}

/// Every failure here is a Validation error, whatever field caused it
fn validate_add_request(request: &AddSwiftCodeRequest) -> Result<ValidatedRequest<'_>> {
    let as_validation = |e: SwiftError| SwiftError::Validation(e.to_string());

    let raw_code = required(&request.swift_code, "SWIFT code")?;
    let swift_code = normalize_swift_code(raw_code.trim()).map_err(as_validation)?;
    let bank_name = required(&request.bank_name, "Bank name")?;
    let raw_iso2 = required(&request.country_iso2, "Country ISO2 code")?;
    let country_iso2 = normalize_country_code(raw_iso2.trim()).map_err(as_validation)?;
    let country_name = required(&request.country_name, "Country name")?;

    if is_headquarter_code(&swift_code) != request.is_headquarter {
        return Err(SwiftError::Validation(
            "Inconsistent headquarters flag: SWIFT codes ending with 'XXX' must be marked as \
             headquarters, and codes not ending with 'XXX' must not be"
                .to_string(),
        ));
    }

    Ok(ValidatedRequest {
        swift_code,
        bank_name,
        country_iso2,
        country_name,
        address: request.address.clone().unwrap_or_default(),
    })
}

// ============================================================================
// QUERIES
// ============================================================================

/// Details of one code; headquarters also list their branches
pub fn get_details(conn: &Connection, input: &str) -> Result<SwiftCodeDetails> {
    let swift_code = require_swift_code(input)?;

    let record = db::find_swift_code(conn, &swift_code)?
        .ok_or_else(|| SwiftError::NotFound(format!("SWIFT code {} not found", swift_code)))?;

    let details = SwiftCodeDetails::from(record);
    if !details.is_headquarter {
        return Ok(details);
    }

    let branches = db::find_by_base_code(conn, base_code(&swift_code))?
        .into_iter()
        .filter(|r| r.swift_code != swift_code)
        .collect();

    Ok(details.with_branches(branches))
}

/// Every code of a country, sorted by code
pub fn get_by_country(conn: &Connection, input: &str) -> Result<CountrySwiftCodesResponse> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SwiftError::Validation(
            "Country ISO2 code cannot be null or empty".to_string(),
        ));
    }

    let iso2 = normalize_country_code(input).map_err(|_| {
        SwiftError::Validation("Invalid country code format. Must be exactly 2 letters.".to_string())
    })?;

    let country = db::find_country(conn, &iso2)?.ok_or_else(|| {
        SwiftError::NotFound(format!("Country with ISO2 code {} not found", iso2))
    })?;

    let records = db::find_by_country(conn, &iso2)?;
    if records.is_empty() {
        return Err(SwiftError::NotFound(format!("No SWIFT codes found for country {}", iso2)));
    }

    Ok(CountrySwiftCodesResponse {
        country_iso2: country.iso2_code,
        country_name: country.name,
        swift_codes: records.into_iter().map(SwiftCodeDetails::from).collect(),
    })
}

// ============================================================================
// MUTATIONS
// ============================================================================

/// Existing bank (names must match exactly) or a freshly inserted one
fn resolve_bank(conn: &Connection, base_swift_code: &str, bank_name: &str) -> Result<i64> {
    match db::find_bank_by_base_code(conn, base_swift_code)? {
        Some(existing) => {
            if !existing.name_matches(bank_name) {
                return Err(SwiftError::Validation(format!(
                    "Bank name mismatch. Existing bank name: {}, Provided bank name: {}",
                    existing.bank_name, bank_name
                )));
            }
            existing.id.ok_or_else(|| {
                SwiftError::Internal(format!("Stored bank {} has no id", base_swift_code))
            })
        }
        None => db::insert_bank(conn, &Bank::new(bank_name, base_swift_code)),
    }
}

/// Create a new SWIFT code record
pub fn add_record(conn: &mut Connection, request: &AddSwiftCodeRequest) -> Result<String> {
    let validated = validate_add_request(request).map_err(|e| {
        debug!("Rejected add request: {}", e);
        e
    })?;
    let swift_code = validated.swift_code.clone();

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if db::swift_code_exists(&tx, &swift_code)? {
        return Err(SwiftError::Conflict(format!("SWIFT code {} already exists", swift_code)));
    }

    let country = match db::find_country(&tx, &validated.country_iso2)? {
        Some(country) => country,
        None => {
            let country = Country::new(validated.country_iso2.clone(), validated.country_name);
            db::insert_country(&tx, &country)?;
            info!("Created country {} ({})", country.iso2_code, country.name);
            country
        }
    };

    let bank_id = resolve_bank(&tx, base_code(&swift_code), validated.bank_name)?;

    let row = SwiftCode::new(swift_code.clone(), validated.address, bank_id, country.iso2_code);
    db::insert_swift_code(&tx, &row).map_err(|e| match e {
        SwiftError::Database(ref db_err) if is_constraint_violation(db_err) => {
            SwiftError::Conflict(format!("SWIFT code {} already exists", swift_code))
        }
        other => other,
    })?;

    tx.commit()?;
    info!("Added SWIFT code {}", swift_code);

    Ok(ADDED_MESSAGE.to_string())
}

/// Delete a SWIFT code; its bank goes too when this was the bank's last code
pub fn delete_record(conn: &mut Connection, input: &str) -> Result<String> {
    let swift_code = require_swift_code(input)?;
    let base = base_code(&swift_code).to_string();

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    if !db::swift_code_exists(&tx, &swift_code)? {
        return Err(SwiftError::NotFound(format!("SWIFT code {} not found", swift_code)));
    }

    // Count includes the record being deleted
    let siblings = db::count_by_base_code(&tx, &base)?;

    db::delete_swift_code(&tx, &swift_code)?;
    if siblings == 1 {
        db::delete_bank_by_base_code(&tx, &base)?;
        info!("Deleted bank {} together with its last SWIFT code", base);
    }

    tx.commit()?;
    info!("Deleted SWIFT code {}", swift_code);

    Ok(DELETED_MESSAGE.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
