//! Header identity for a table: canonical (lower-cased, trimmed) names used
//! for every lookup, plus the original-case names kept for output.

/// Lower-cased, trimmed form of a column name.
pub fn canonicalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Owned schema value attached to each `Table`. Duplicate canonical names
/// are kept in declaration order; lookups resolve to the last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    canonical: Vec<String>,
    original: Vec<String>,
}

impl TableSchema {
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut schema = TableSchema::default();
        for header in headers {
            schema.canonical.push(canonicalize(header.as_ref()));
            schema.original.push(header.as_ref().to_string());
        }
        schema
    }

    pub fn canonical(&self) -> &[String] {
        &self.canonical
    }

    pub fn original(&self) -> &[String] {
        &self.original
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        let canon = canonicalize(name);
        self.canonical.iter().any(|h| *h == canon)
    }

    /// Rewrite the first occurrence of `old` (canonical) to the canonical
    /// form of `new`. Original-case names are left as parsed. Returns the
    /// new canonical name if a header changed.
    pub(crate) fn rename(&mut self, old: &str, new: &str) -> Option<String> {
        let old_canon = canonicalize(old);
        let new_canon = canonicalize(new);
        for slot in self.canonical.iter_mut() {
            if *slot == old_canon {
                *slot = new_canon.clone();
                return Some(new_canon);
            }
        }
        None
    }
}
