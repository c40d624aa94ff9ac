//! Fixed-width comparison blocks for mismatched rows.

use std::fmt::Write;

use ccstab_refdata::{KeggRecord, PubchemCompound};

use crate::oracle::{truncate_mass, RowFacts};

const NO_KEGG: &str = "No Kegg";
const NO_PUBCHEM: &str = "No PubChem";
const NO_CAS: &str = "No Cas Information";

/// Append one comparison block for a mismatched row.
///
/// Four lines per block: a header carrying the row label, the row's own
/// values, then one line per reference source. References that did not
/// resolve get a short placeholder line instead of columns. A blank line
/// closes the block.
pub(crate) fn write_block(
    out: &mut String,
    row_label: usize,
    row: &RowFacts,
    kegg: Option<&KeggRecord>,
    pubchem: Option<&PubchemCompound>,
) {
    let _ = writeln!(
        out,
        "{:>10}{:>10}{:>20}{:>20}{:>20}",
        format!("Row {row_label}"),
        "ID",
        "Mass",
        "Formula",
        "CAS"
    );
    let _ = writeln!(
        out,
        "{:>10}{:>10}{:>20}{:>20}{:>20}",
        "Actual", "", row.mass_trunc, row.formula, row.cas
    );
    match kegg {
        Some(record) => {
            let _ = writeln!(
                out,
                "{:>10}{:>10}{:>20}{:>20}{:>20}",
                "KEGG",
                record.id,
                truncate_mass(record.exact_mass),
                record.formula,
                record.cas()
            );
        }
        None => {
            out.push_str(NO_KEGG);
            out.push('\n');
        }
    }
    match pubchem {
        Some(compound) => {
            let _ = writeln!(
                out,
                "{:>10}{:>10}{:>20}{:>20}{:>20}",
                "PubChem",
                compound.cid().unwrap_or_default(),
                truncate_mass(compound.monoisotopic_mass()),
                compound.formula(),
                NO_CAS
            );
        }
        None => {
            out.push_str(NO_PUBCHEM);
            out.push('\n');
        }
    }
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
