// 📥 Bulk Importer - CSV → Country / Bank / SwiftCode
//
// Pipeline:
// 1. Preload existing countries and banks into a per-run cache
// 2. Stream and stage every row (no writes yet)
// 3. Persist countries, then banks, then SWIFT codes in batches
//
// The whole run is one transaction: a bad row aborts everything.

use crate::db;
use crate::entities::{Bank, Country, SwiftCode};
use crate::error::{Result, SwiftError};
use crate::normalizer::{base_code, normalize_country_code, normalize_swift_code, resolve_address};
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// SOURCE FORMAT
// ============================================================================

/// SWIFT code rows written per batch
pub const BATCH_SIZE: usize = 1000;

/// Logical column order of the source file
pub const HEADERS: [&str; 8] = [
    "COUNTRY ISO2 CODE",
    "SWIFT CODE",
    "CODE TYPE",
    "NAME",
    "ADDRESS",
    "TOWN NAME",
    "COUNTRY NAME",
    "TIME ZONE",
];

const COL_COUNTRY_ISO2: usize = 0;
const COL_SWIFT_CODE: usize = 1;
const COL_NAME: usize = 3;
const COL_ADDRESS: usize = 4;
const COL_TOWN: usize = 5;
const COL_COUNTRY_NAME: usize = 6;

// ============================================================================
// REPORT
// ============================================================================

/// Outcome of one import run
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// Data rows read from the source (header excluded)
    pub records_processed: usize,
    pub countries_created: usize,
    pub banks_created: usize,
    /// Rows inserted or overwritten
    pub swift_codes_written: usize,
    pub batches: usize,
    pub completed_at: DateTime<Utc>,
}

// ============================================================================
// PER-RUN STATE
// ============================================================================

/// Dedup cache: lives for exactly one import run
struct ImportCache {
    countries: HashMap<String, Country>,
    /// Keyed by base code; staged banks have id == None until persisted
    banks: HashMap<String, Bank>,
}

impl ImportCache {
    fn preload(conn: &Connection) -> Result<Self> {
        let countries = db::all_countries(conn)?
            .into_iter()
            .map(|c| (c.iso2_code.clone(), c))
            .collect();

        let banks = db::all_banks(conn)?
            .into_iter()
            .map(|b| (b.base_swift_code.clone(), b))
            .collect();

        Ok(ImportCache { countries, banks })
    }

    fn bank_id(&self, base_swift_code: &str) -> Result<i64> {
        self.banks
            .get(base_swift_code)
            .and_then(|b| b.id)
            .ok_or_else(|| {
                SwiftError::Internal(format!("Bank {} was not persisted", base_swift_code))
            })
    }
}

/// A parsed row waiting for its bank id
#[derive(Debug)]
struct StagedSwiftCode {
    swift_code: String,
    address: String,
    country_iso2_code: String,
}

/// Everything collected from the source before the first write
#[derive(Debug, Default)]
struct Staging {
    new_countries: Vec<Country>,
    /// Base codes of banks first seen in this run
    new_banks: Vec<String>,
    rows: Vec<StagedSwiftCode>,
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Import a CSV file of SWIFT codes
pub fn import_file(conn: &mut Connection, path: &Path) -> Result<ImportReport> {
    info!("Importing SWIFT codes from {}", path.display());

    let file = File::open(path)?;
    import_reader(conn, file)
}

/// Import CSV data from any reader
pub fn import_reader<R: Read>(conn: &mut Connection, source: R) -> Result<ImportReport> {
    let tx = conn.transaction()?;

    let mut cache = ImportCache::preload(&tx)?;
    debug!(
        "Preloaded {} countries and {} banks",
        cache.countries.len(),
        cache.banks.len()
    );

    let staging = stage_records(source, &mut cache)?;
    info!(
        "Staged {} rows ({} new countries, {} new banks)",
        staging.rows.len(),
        staging.new_countries.len(),
        staging.new_banks.len()
    );

    let report = persist(&tx, &mut cache, staging)?;
    tx.commit()?;

    info!(
        "Import complete: {} rows, {} SWIFT codes written in {} batches",
        report.records_processed, report.swift_codes_written, report.batches
    );

    Ok(report)
}

// ============================================================================
// PARSING
// ============================================================================

fn check_headers(headers: &StringRecord) -> Result<()> {
    if headers.is_empty() {
        return Err(SwiftError::Malformed {
            line: 1,
            reason: "source is empty".to_string(),
        });
    }

    let matches = headers.len() == HEADERS.len()
        && headers
            .iter()
            .zip(HEADERS.iter())
            .all(|(found, expected)| found.eq_ignore_ascii_case(expected));

    if !matches {
        return Err(SwiftError::Malformed {
            line: 1,
            reason: format!(
                "unexpected header {:?}, expected {:?}",
                headers.iter().collect::<Vec<_>>(),
                HEADERS
            ),
        });
    }

    Ok(())
}

fn stage_records<R: Read>(source: R, cache: &mut ImportCache) -> Result<Staging> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .quote(b'"')
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    check_headers(&headers)?;

    let mut staging = Staging::default();

    for result in reader.records() {
        let record = result.map_err(|e| SwiftError::Malformed {
            line: e.position().map(|p| p.line()).unwrap_or(0),
            reason: e.to_string(),
        })?;

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        stage_record(&record, cache, &mut staging)
            .map_err(|e| SwiftError::Malformed { line, reason: e.to_string() })?;
    }

    Ok(staging)
}

fn stage_record(record: &StringRecord, cache: &mut ImportCache, staging: &mut Staging) -> Result<()> {
    let field = |idx: usize| record.get(idx).unwrap_or("");

    let iso2_code = normalize_country_code(field(COL_COUNTRY_ISO2))?;
    let swift_code = normalize_swift_code(field(COL_SWIFT_CODE))?;
    let bank_name = field(COL_NAME);
    let country_name = field(COL_COUNTRY_NAME);
    let address = resolve_address(field(COL_ADDRESS), field(COL_TOWN), country_name);

    // Country: cache hit or stage a new one
    if !cache.countries.contains_key(&iso2_code) {
        let country = Country::new(iso2_code.clone(), country_name);
        staging.new_countries.push(country.clone());
        cache.countries.insert(iso2_code.clone(), country);
    }

    // Bank: keyed by base code, first name seen wins
    let base = base_code(&swift_code);
    if !cache.banks.contains_key(base) {
        cache.banks.insert(base.to_string(), Bank::new(bank_name, base));
        staging.new_banks.push(base.to_string());
    }

    staging.rows.push(StagedSwiftCode {
        swift_code,
        address,
        country_iso2_code: iso2_code,
    });

    Ok(())
}

// ============================================================================
// PERSISTENCE
// ============================================================================

fn persist(conn: &Connection, cache: &mut ImportCache, staging: Staging) -> Result<ImportReport> {
    // Parents first: SWIFT codes reference both by foreign key
    for country in &staging.new_countries {
        db::insert_country(conn, country)?;
    }

    for base in &staging.new_banks {
        if let Some(bank) = cache.banks.get_mut(base) {
            bank.id = Some(db::insert_bank(conn, bank)?);
        }
    }

    let records_processed = staging.rows.len();
    let codes = staging
        .rows
        .into_iter()
        .map(|row| -> Result<SwiftCode> {
            let bank_id = cache.bank_id(base_code(&row.swift_code))?;
            Ok(SwiftCode::new(row.swift_code, row.address, bank_id, row.country_iso2_code))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut swift_codes_written = 0;
    let mut batches = 0;
    for chunk in codes.chunks(BATCH_SIZE) {
        swift_codes_written += db::upsert_swift_codes(conn, chunk)?;
        batches += 1;
        debug!("Wrote batch {} ({} rows)", batches, chunk.len());
    }

    Ok(ImportReport {
        records_processed,
        countries_created: staging.new_countries.len(),
        banks_created: staging.new_banks.len(),
        swift_codes_written,
        batches,
        completed_at: Utc::now(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
