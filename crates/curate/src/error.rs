use ccstab_table::TableError;

/// Errors that abort a curation run.
///
/// Per-row disagreements are not errors; they land in the mismatch bucket.
/// These variants cover broken inputs the engine cannot classify around:
/// a missing column, an unparseable cell, or a reference lookup that does
/// not honor its contract.
#[derive(Debug)]
pub enum CurateError {
    /// A required column is absent from one of the input tables.
    MissingColumn { table: &'static str, column: String },
    /// A PubChem CID cell did not parse as an unsigned integer.
    InvalidPubchemId { line: usize, value: String },
    /// A row names a CID that the pre-built lookup does not contain.
    /// The caller was supposed to fetch every CID before running the engine.
    MissingReferenceLookup { line: usize, cid: u64 },
    /// A mass cell did not parse as a float.
    InvalidMass { line: usize, value: String },
    /// A table operation failed.
    Table(TableError),
}

impl std::fmt::Display for CurateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurateError::MissingColumn { table, column } => {
                write!(f, "{table} table is missing required column '{column}'")
            }
            CurateError::InvalidPubchemId { line, value } => {
                write!(f, "line {line}: cannot parse PubChem CID '{value}'")
            }
            CurateError::MissingReferenceLookup { line, cid } => {
                write!(f, "line {line}: CID {cid} was not resolved into the PubChem lookup")
            }
            CurateError::InvalidMass { line, value } => {
                write!(f, "line {line}: cannot parse mass '{value}'")
            }
            CurateError::Table(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CurateError {}

impl From<TableError> for CurateError {
    fn from(err: TableError) -> Self {
        CurateError::Table(err)
    }
}
