use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Headers may only be set on a table with no schema and no rows.
    SchemaAlreadyPopulated,
    /// Column name not present in the schema.
    UnknownColumn { name: String },
    /// Concat refused: canonical headers differ. Carries both lists.
    HeaderMismatch { ours: Vec<String>, theirs: Vec<String> },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaAlreadyPopulated => {
                write!(f, "headers already set; use a rename map to change them")
            }
            Self::UnknownColumn { name } => write!(f, "unknown column '{name}'"),
            Self::HeaderMismatch { ours, theirs } => {
                write!(
                    f,
                    "header name mismatch; existing: [{}], new: [{}]",
                    ours.join(", "),
                    theirs.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Non-fatal diagnostic recorded while parsing: a data line carried fewer
/// fields than the header declared and was padded with empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based line number in the source text, counting the header line.
    pub line: usize,
    pub found: usize,
    pub expected: usize,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} has fewer columns than expected: {} vs. {}",
            self.line, self.found, self.expected
        )
    }
}
