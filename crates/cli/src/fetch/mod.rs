//! Clients for the external reference and validation services.

mod common;
mod goodtables;
mod kegg;
mod pubchem;

pub use common::parse_base_url;
pub use goodtables::{validate_table, Verdict, DEFAULT_GOODTABLES_BASE, DEFAULT_SCHEMA_URL};
pub use kegg::{fetch_kegg, DEFAULT_KEGG_BASE};
pub use pubchem::{fetch_pubchem, DEFAULT_PUBCHEM_BASE};
