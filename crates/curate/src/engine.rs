//! The classification pass over a candidate table.

use std::collections::HashSet;

use ccstab_refdata::ReferenceLookup;
use ccstab_table::Table;

use crate::error::CurateError;
use crate::model::{CurationResult, CurationSummary};
use crate::oracle::{self, RowFacts};
use crate::report;

// Canonical column names the engine reads. Callers normalize headers
// before the run; `PubChem CID` and `pubchem cid` are the same column.
const COL_CID: &str = "pubchem cid";
const COL_KEGG: &str = "kegg";
const COL_CAS: &str = "cas";
const COL_FORMULA: &str = "formula";
const COL_MASS: &str = "mass";

const CANDIDATE_COLUMNS: [&str; 5] = [COL_CID, COL_KEGG, COL_CAS, COL_FORMULA, COL_MASS];

/// Classify every candidate row and partition the table.
///
/// The candidate table is consumed; it comes back as `merge_ready` with
/// every non-valid row removed and the survivors in their original order.
/// Rows are visited from the bottom up so removals never shift an index
/// that is still pending.
///
/// Row-level problems that cannot be classified are fatal: an unparseable
/// CID or mass, and a CID the caller failed to resolve into the lookup.
/// Errors carry the 1-based source line of the offending row, counting
/// the header line.
pub fn run(
    mut candidate: Table,
    authoritative: &Table,
    lookup: &ReferenceLookup,
) -> Result<CurationResult, CurateError> {
    for column in CANDIDATE_COLUMNS {
        if !candidate.schema().contains(column) {
            return Err(CurateError::MissingColumn {
                table: "candidate",
                column: column.to_string(),
            });
        }
    }
    if !authoritative.schema().contains(COL_CAS) {
        return Err(CurateError::MissingColumn {
            table: "authoritative",
            column: COL_CAS.to_string(),
        });
    }

    let known_cas: HashSet<&str> = authoritative
        .column(COL_CAS)?
        .iter()
        .filter(|value| !value.is_empty())
        .map(String::as_str)
        .collect();

    let mut duplicates = candidate.empty_like();
    let mut mismatches = candidate.empty_like();
    let mut missing_reference = candidate.empty_like();
    let mut diagnostics = String::new();
    let mut removals: Vec<usize> = Vec::new();

    let total = candidate.len();
    for index in (0..total).rev() {
        let row = &candidate.rows()[index];
        let line = index + 2;

        let cid_text = cell(row, COL_CID);
        let pubchem = if cid_text.is_empty() {
            None
        } else {
            let cid: u64 = cid_text
                .parse()
                .map_err(|_| CurateError::InvalidPubchemId {
                    line,
                    value: cid_text.to_string(),
                })?;
            let compound = lookup
                .pubchem(cid)
                .ok_or(CurateError::MissingReferenceLookup { line, cid })?;
            Some(compound)
        };

        let kegg_text = cell(row, COL_KEGG);
        let kegg = if kegg_text.is_empty() {
            None
        } else {
            lookup.kegg(kegg_text)
        };

        // Duplicates are settled on the CAS number alone, before the mass
        // cell is even parsed.
        let cas = cell(row, COL_CAS);
        if known_cas.contains(cas) {
            duplicates.add_row(row.clone());
            removals.push(index);
            continue;
        }

        let mass_text = cell(row, COL_MASS);
        let mass: f64 = mass_text.parse().map_err(|_| CurateError::InvalidMass {
            line,
            value: mass_text.to_string(),
        })?;
        let facts = RowFacts {
            formula: cell(row, COL_FORMULA).to_string(),
            cas: cas.to_string(),
            mass_trunc: oracle::truncate_mass(mass),
        };

        if kegg.is_none() && oracle::matches(&facts, pubchem, None) {
            // PubChem vouches for the row but KEGG has never heard of it.
            // It is held out of the merge until a KEGG entry exists.
            missing_reference.add_row(row.clone());
            removals.push(index);
        } else if oracle::matches(&facts, pubchem, kegg) {
            // Survives into the merge-ready table.
        } else {
            report::write_block(&mut diagnostics, mismatches.len() + 2, &facts, kegg, pubchem);
            mismatches.add_row(row.clone());
            removals.push(index);
        }
    }

    // Collected bottom-up, so each removal leaves the remaining indices valid.
    for index in removals {
        candidate.remove_row(index);
    }

    let summary = CurationSummary {
        candidate_rows: total,
        duplicates: duplicates.len(),
        valid: candidate.len(),
        missing_reference: missing_reference.len(),
        mismatches: mismatches.len(),
    };
    Ok(CurationResult {
        merge_ready: candidate,
        duplicates,
        mismatches,
        missing_reference,
        diagnostics,
        summary,
    })
}

fn cell<'a>(row: &'a std::collections::HashMap<String, String>, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
