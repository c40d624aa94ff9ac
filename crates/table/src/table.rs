use std::collections::HashMap;

use crate::error::{ParseWarning, TableError};
use crate::schema::{canonicalize, TableSchema};

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A delimited table with dual storage: row-major maps keyed by canonical
/// column name, and a reverse index (column name → ordered values). Both
/// views observe the same row order and every row carries a value for every
/// declared column.
#[derive(Debug, Clone)]
pub struct Table {
    schema: TableSchema,
    delimiter: char,
    rows: Vec<HashMap<String, String>>,
    reverse: HashMap<String, Vec<String>>,
    warnings: Vec<ParseWarning>,
}

impl Table {
    pub fn new(delimiter: char) -> Self {
        Table {
            schema: TableSchema::default(),
            delimiter,
            rows: Vec::new(),
            reverse: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// An empty table sharing this table's columns and delimiter. The new
    /// schema is built from the canonical names, so original-case headers
    /// are not carried over.
    pub fn empty_like(&self) -> Self {
        let mut table = Table::new(self.delimiter);
        // Cannot fail: the new table has no schema yet.
        let _ = table.set_headers(self.schema.canonical());
        table
    }

    // -----------------------------------------------------------------------
    // Parse / serialize
    // -----------------------------------------------------------------------

    /// Parse delimited text. The first line becomes the schema when
    /// `has_header` is set. Short rows are padded with empty strings and
    /// recorded as warnings; values are trimmed and stripped of U+FFFD
    /// artifacts at either edge; one trailing empty line is dropped.
    pub fn parse(content: &str, delimiter: char, has_header: bool) -> Self {
        let mut table = Table::new(delimiter);
        let mut lines: Vec<&str> = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        if has_header {
            if lines.len() == 1 && lines[0].is_empty() {
                return table; // nothing at all, not even a header
            }
            let headers: Vec<&str> = lines[0].split(delimiter).collect();
            let _ = table.set_headers(&headers);
            lines.remove(0);
        }
        if lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let expected = table.schema.len();
        // 1-based source line numbers, counting the header line.
        let mut line_no = 1;
        for line in lines {
            line_no += 1;
            if line.is_empty() {
                continue;
            }
            let mut fields: Vec<String> = line
                .split(delimiter)
                .map(|v| v.trim().trim_matches('\u{FFFD}').to_string())
                .collect();
            if fields.len() < expected {
                table.warnings.push(ParseWarning {
                    line: line_no,
                    found: fields.len(),
                    expected,
                });
                fields.resize(expected, String::new());
            }
            let mut row = HashMap::with_capacity(expected);
            for (name, value) in table.schema.canonical().iter().zip(fields) {
                // Duplicate canonical headers: last column wins.
                row.insert(name.clone(), value);
            }
            table.add_row(row);
        }
        table
    }

    /// Header line then one line per row, values joined in header order.
    /// No trailing newline.
    pub fn serialize(&self, use_original_case: bool) -> String {
        let delim = self.delimiter.to_string();
        let headers = if use_original_case {
            self.schema.original()
        } else {
            self.schema.canonical()
        };
        let mut out = headers.join(&delim);
        for row in &self.rows {
            out.push('\n');
            let values: Vec<&str> = self
                .schema
                .canonical()
                .iter()
                .map(|name| row.get(name).map(String::as_str).unwrap_or(""))
                .collect();
            out.push_str(&values.join(&delim));
        }
        out
    }

    // -----------------------------------------------------------------------
    // Schema operations
    // -----------------------------------------------------------------------

    /// Install the schema on an empty table. Once any header or row data
    /// exists this fails; renames go through `update_headers`.
    pub fn set_headers<S: AsRef<str>>(&mut self, headers: &[S]) -> Result<(), TableError> {
        if !self.schema.is_empty() || !self.rows.is_empty() {
            return Err(TableError::SchemaAlreadyPopulated);
        }
        self.schema = TableSchema::from_headers(headers);
        for name in self.schema.canonical() {
            self.reverse.insert(name.clone(), Vec::new());
        }
        Ok(())
    }

    /// Apply a rename map (old canonical name → new name). For each entry
    /// that matches a current header, the canonical name is rewritten and
    /// the reverse-index bucket and row keys are relocated; absent old
    /// names are a no-op (an absent old bucket installs an empty one).
    pub fn update_headers(&mut self, renames: &HashMap<String, String>) {
        for (old, new) in renames {
            let Some(new_canon) = self.schema.rename(old, new) else {
                continue;
            };
            let old_canon = canonicalize(old);
            let bucket = self.reverse.remove(&old_canon).unwrap_or_default();
            self.reverse.insert(new_canon.clone(), bucket);
            for row in &mut self.rows {
                if let Some(value) = row.remove(&old_canon) {
                    row.insert(new_canon.clone(), value);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Row operations
    // -----------------------------------------------------------------------

    /// Append a row. Values are taken per declared column (missing keys
    /// become empty strings) so both views stay in sync.
    pub fn add_row(&mut self, row: HashMap<String, String>) {
        self.append_to_reverse(&row);
        self.rows.push(row);
    }

    /// Remove and return the row at `index`, keeping every reverse-index
    /// bucket aligned. Panics if `index` is out of bounds, like
    /// `Vec::remove`.
    pub fn remove_row(&mut self, index: usize) -> HashMap<String, String> {
        let row = self.rows.remove(index);
        for bucket in self.reverse.values_mut() {
            bucket.remove(index);
        }
        row
    }

    /// The ordered values of one column (case-insensitive name).
    pub fn column(&self, name: &str) -> Result<&[String], TableError> {
        self.reverse
            .get(&canonicalize(name))
            .map(Vec::as_slice)
            .ok_or_else(|| TableError::UnknownColumn { name: name.to_string() })
    }

    /// Append all of `other`'s rows. Succeeds iff the canonical headers
    /// are equal in order; on mismatch self is left unmodified and the
    /// error carries both header lists.
    pub fn concat(&mut self, other: Table) -> Result<(), TableError> {
        if self.schema.canonical() != other.schema.canonical() {
            return Err(TableError::HeaderMismatch {
                ours: self.schema.canonical().to_vec(),
                theirs: other.schema.canonical().to_vec(),
            });
        }
        for (name, bucket) in other.reverse {
            self.reverse.entry(name).or_default().extend(bucket);
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn rows(&self) -> &[HashMap<String, String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&HashMap<String, String>> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Non-fatal diagnostics recorded during `parse`.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    fn append_to_reverse(&mut self, row: &HashMap<String, String>) {
        let names = self.schema.canonical();
        for (i, name) in names.iter().enumerate() {
            if names[i + 1..].contains(name) {
                continue; // duplicate header: the last occurrence owns the bucket
            }
            let value = row.get(name).cloned().unwrap_or_default();
            self.reverse.entry(name.clone()).or_default().push(value);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
