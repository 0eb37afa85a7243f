// 🗄️ Entity Store - SQLite schema and queries
//
// Every function takes a plain &Connection so it can run either directly
// or inside a rusqlite::Transaction (which derefs to Connection).

use crate::entities::{Bank, Country, SwiftCode, SwiftCodeRecord};
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// Open (or create) the database file and make sure the schema exists
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    setup_database(&conn)?;
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery (in-memory databases report "memory")
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // ==========================================================================
    // Countries
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS countries (
            iso2_code TEXT PRIMARY KEY CHECK (length(iso2_code) = 2),
            name TEXT NOT NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Banks (one row per base code)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS banks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bank_name TEXT NOT NULL,
            base_swift_code TEXT NOT NULL UNIQUE CHECK (length(base_swift_code) = 8)
        )",
        [],
    )?;

    // ==========================================================================
    // SWIFT codes (canonical 11-character form)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS swift_codes (
            swift_code TEXT PRIMARY KEY CHECK (length(swift_code) = 11),
            address TEXT NOT NULL,
            is_headquarter INTEGER NOT NULL,
            bank_id INTEGER NOT NULL REFERENCES banks(id),
            country_iso2_code TEXT NOT NULL REFERENCES countries(iso2_code)
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_swift_codes_country ON swift_codes(country_iso2_code)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_swift_codes_bank ON swift_codes(bank_id)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// COUNTRIES
// ============================================================================

pub fn all_countries(conn: &Connection) -> Result<Vec<Country>> {
    let mut stmt = conn.prepare("SELECT iso2_code, name FROM countries ORDER BY iso2_code")?;

    let countries = stmt
        .query_map([], |row| {
            Ok(Country {
                iso2_code: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(countries)
}

pub fn find_country(conn: &Connection, iso2_code: &str) -> Result<Option<Country>> {
    let country = conn
        .query_row(
            "SELECT iso2_code, name FROM countries WHERE iso2_code = ?1",
            [iso2_code],
            |row| {
                Ok(Country {
                    iso2_code: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()?;

    Ok(country)
}

pub fn insert_country(conn: &Connection, country: &Country) -> Result<()> {
    conn.execute(
        "INSERT INTO countries (iso2_code, name) VALUES (?1, ?2)",
        params![country.iso2_code, country.name],
    )?;

    Ok(())
}

pub fn count_countries(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM countries", [], |row| row.get(0))?;
    Ok(count)
}

// ============================================================================
// BANKS
// ============================================================================

fn bank_from_row(row: &Row<'_>) -> rusqlite::Result<Bank> {
    Ok(Bank {
        id: Some(row.get(0)?),
        bank_name: row.get(1)?,
        base_swift_code: row.get(2)?,
    })
}

pub fn all_banks(conn: &Connection) -> Result<Vec<Bank>> {
    let mut stmt =
        conn.prepare("SELECT id, bank_name, base_swift_code FROM banks ORDER BY base_swift_code")?;

    let banks = stmt
        .query_map([], bank_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(banks)
}

pub fn find_bank_by_base_code(conn: &Connection, base_swift_code: &str) -> Result<Option<Bank>> {
    let bank = conn
        .query_row(
            "SELECT id, bank_name, base_swift_code FROM banks WHERE base_swift_code = ?1",
            [base_swift_code],
            bank_from_row,
        )
        .optional()?;

    Ok(bank)
}

/// Insert a bank and return its assigned id
pub fn insert_bank(conn: &Connection, bank: &Bank) -> Result<i64> {
    conn.execute(
        "INSERT INTO banks (bank_name, base_swift_code) VALUES (?1, ?2)",
        params![bank.bank_name, bank.base_swift_code],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn delete_bank_by_base_code(conn: &Connection, base_swift_code: &str) -> Result<usize> {
    let deleted = conn.execute(
        "DELETE FROM banks WHERE base_swift_code = ?1",
        [base_swift_code],
    )?;

    Ok(deleted)
}

pub fn count_banks(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM banks", [], |row| row.get(0))?;
    Ok(count)
}

// ============================================================================
// SWIFT CODES
// ============================================================================

const RECORD_SELECT: &str = "SELECT s.swift_code, s.address, s.is_headquarter,
            b.bank_name, c.iso2_code, c.name
     FROM swift_codes s
     JOIN banks b ON b.id = s.bank_id
     JOIN countries c ON c.iso2_code = s.country_iso2_code";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<SwiftCodeRecord> {
    Ok(SwiftCodeRecord {
        swift_code: row.get(0)?,
        address: row.get(1)?,
        is_headquarter: row.get(2)?,
        bank_name: row.get(3)?,
        country_iso2_code: row.get(4)?,
        country_name: row.get(5)?,
    })
}

pub fn swift_code_exists(conn: &Connection, swift_code: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM swift_codes WHERE swift_code = ?1)",
        [swift_code],
        |row| row.get(0),
    )?;

    Ok(exists)
}

pub fn find_swift_code(conn: &Connection, swift_code: &str) -> Result<Option<SwiftCodeRecord>> {
    let sql = format!("{} WHERE s.swift_code = ?1", RECORD_SELECT);
    let record = conn.query_row(&sql, [swift_code], record_from_row).optional()?;

    Ok(record)
}

/// All codes sharing a base code, sorted by code
pub fn find_by_base_code(conn: &Connection, base_swift_code: &str) -> Result<Vec<SwiftCodeRecord>> {
    let sql = format!(
        "{} WHERE substr(s.swift_code, 1, 8) = ?1 ORDER BY s.swift_code",
        RECORD_SELECT
    );
    let mut stmt = conn.prepare(&sql)?;

    let records = stmt
        .query_map([base_swift_code], record_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(records)
}

/// All codes of a country, sorted by code
pub fn find_by_country(conn: &Connection, iso2_code: &str) -> Result<Vec<SwiftCodeRecord>> {
    let sql = format!(
        "{} WHERE s.country_iso2_code = ?1 ORDER BY s.swift_code",
        RECORD_SELECT
    );
    let mut stmt = conn.prepare(&sql)?;

    let records = stmt
        .query_map([iso2_code], record_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(records)
}

pub fn count_by_base_code(conn: &Connection, base_swift_code: &str) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM swift_codes WHERE substr(swift_code, 1, 8) = ?1",
        [base_swift_code],
        |row| row.get(0),
    )?;

    Ok(count)
}

pub fn insert_swift_code(conn: &Connection, code: &SwiftCode) -> Result<()> {
    conn.execute(
        "INSERT INTO swift_codes (swift_code, address, is_headquarter, bank_id, country_iso2_code)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            code.swift_code,
            code.address,
            code.is_headquarter,
            code.bank_id,
            code.country_iso2_code,
        ],
    )?;

    Ok(())
}

/// Insert or overwrite by primary key; returns rows written
pub fn upsert_swift_codes(conn: &Connection, codes: &[SwiftCode]) -> Result<usize> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO swift_codes (swift_code, address, is_headquarter, bank_id, country_iso2_code)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(swift_code) DO UPDATE SET
            address = excluded.address,
            is_headquarter = excluded.is_headquarter,
            bank_id = excluded.bank_id,
            country_iso2_code = excluded.country_iso2_code",
    )?;

    let mut written = 0;
    for code in codes {
        written += stmt.execute(params![
            code.swift_code,
            code.address,
            code.is_headquarter,
            code.bank_id,
            code.country_iso2_code,
        ])?;
    }

    Ok(written)
}

pub fn delete_swift_code(conn: &Connection, swift_code: &str) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM swift_codes WHERE swift_code = ?1", [swift_code])?;
    Ok(deleted)
}

pub fn count_swift_codes(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM swift_codes", [], |row| row.get(0))?;
    Ok(count)
}
