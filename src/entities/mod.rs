// Entity Models
//
// Three-entity relational model:
// - Country: keyed by ISO2 code
// - Bank: keyed by base (BIC8) code, surrogate id for foreign keys
// - SwiftCode: keyed by canonical BIC11 code, references Bank and Country

pub mod bank;
pub mod country;
pub mod swift_code;

pub use bank::Bank;
pub use country::Country;
pub use swift_code::{SwiftCode, SwiftCodeRecord};
