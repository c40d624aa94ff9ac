//! `ccstab-table`: delimited compound table model.
//!
//! Pure data crate: parses and serializes tab-delimited text with
//! header-aware row storage plus a reverse (column-wise) index that stays
//! in sync through add/remove/rename/concat. No I/O dependencies.

pub mod agilent;
pub mod error;
pub mod schema;
pub mod table;

pub use agilent::to_agilent;
pub use error::{ParseWarning, TableError};
pub use schema::TableSchema;
pub use table::Table;
