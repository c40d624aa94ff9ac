//! Classification engine for candidate compound rows.
//!
//! Pure engine crate: receives a parsed candidate table, the authoritative
//! table, and pre-built reference lookups, and returns classified results.
//! No network or file IO happens here; the caller resolves references first.
//!
//! Each candidate row lands in exactly one bucket:
//!
//! - `Duplicate`: its CAS number already exists in the authoritative table.
//! - `Valid`: every resolved reference agrees with the row.
//! - `MissingReference`: no KEGG record, but PubChem agrees.
//! - `Mismatch`: at least one resolved reference disagrees.
//!
//! Rows classified `Valid` survive in the merge-ready table; everything else
//! is removed and reported.

pub mod engine;
pub mod error;
pub mod model;
pub mod oracle;
mod report;

pub use engine::run;
pub use error::CurateError;
pub use model::{CurationResult, CurationSummary, RowBucket};
