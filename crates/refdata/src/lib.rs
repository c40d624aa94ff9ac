//! `ccstab-refdata`: reference records from the two external compound
//! databases, plus the keyed lookup maps the curation engine consumes.
//!
//! Pure data crate: decodes already-fetched response text/JSON. The HTTP
//! layer lives with the CLI fetch adapters.

pub mod kegg;
pub mod lookup;
pub mod pubchem;

pub use kegg::{parse_flat_records, KeggRecord};
pub use lookup::{ReferenceLookup, KEGG_CHUNK, PUBCHEM_CHUNK};
pub use pubchem::{PubchemCompound, PugResponse};
