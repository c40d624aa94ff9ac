use serde::Serialize;

use ccstab_table::Table;

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Classification outcome for a single candidate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowBucket {
    /// CAS number already present in the authoritative table.
    Duplicate,
    /// Every resolved reference agrees; the row is merged.
    Valid,
    /// No KEGG record exists for the row, but PubChem agrees with it.
    MissingReference,
    /// A resolved reference disagrees with the row.
    Mismatch,
}

impl std::fmt::Display for RowBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RowBucket::Duplicate => "duplicate",
            RowBucket::Valid => "valid",
            RowBucket::MissingReference => "missing_reference",
            RowBucket::Mismatch => "mismatch",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Row counts for one curation run, one per bucket plus the input total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurationSummary {
    pub candidate_rows: usize,
    pub duplicates: usize,
    pub valid: usize,
    pub missing_reference: usize,
    pub mismatches: usize,
}

/// Everything a curation run produces.
///
/// `merge_ready` is the candidate table with every non-valid row removed,
/// surviving rows in their original order. The three side tables share the
/// candidate's schema. `diagnostics` holds the fixed-width comparison blocks
/// for mismatched rows, empty when nothing mismatched.
#[derive(Debug)]
pub struct CurationResult {
    pub merge_ready: Table,
    pub duplicates: Table,
    pub mismatches: Table,
    pub missing_reference: Table,
    pub diagnostics: String,
    pub summary: CurationSummary,
}

impl CurationResult {
    /// True when every candidate row survived into the merge-ready table.
    pub fn is_clean(&self) -> bool {
        self.summary.valid == self.summary.candidate_rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
