// SWIFT Codes - Core Library
// Exposes all modules for use in the server binary and tests

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod importer;
pub mod logging;
pub mod normalizer;
pub mod service;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use db::{open_database, setup_database};
pub use dto::{
    AddSwiftCodeRequest, BranchSummary, CountrySwiftCodesResponse, MessageResponse,
    SwiftCodeDetails,
};
pub use entities::{Bank, Country, SwiftCode, SwiftCodeRecord};
pub use error::{ErrorKind, Result, SwiftError};
pub use importer::{import_file, import_reader, ImportReport};
pub use normalizer::{
    base_code, is_headquarter_code, normalize_country_code, normalize_swift_code, resolve_address,
};
pub use service::{add_record, delete_record, get_by_country, get_details};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
