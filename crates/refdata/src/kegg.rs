//! Decoder for the KEGG flat-file format: records separated by `///`
//! lines, one tag per field, whitespace-led continuation lines.

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One compound entry from the KEGG REST `get` endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeggRecord {
    pub id: String,
    pub kind: String,
    pub names: Vec<String>,
    pub formula: String,
    pub exact_mass: f64,
    pub molecular_weight: f64,
    pub comment: String,
    pub pathways: Vec<String>,
    /// Cross-references as (database, id) pairs, in file order.
    pub cross_refs: Vec<(String, String)>,
}

impl KeggRecord {
    /// First cross-reference id for `database`, empty string if absent.
    pub fn cross_ref(&self, database: &str) -> &str {
        self.cross_refs
            .iter()
            .find(|(db, _)| db == database)
            .map(|(_, id)| id.as_str())
            .unwrap_or("")
    }

    pub fn cas(&self) -> &str {
        self.cross_ref("CAS")
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

const RECORD_SEPARATOR: &str = "///";

/// Which multi-line field the parser is currently inside.
#[derive(Clone, Copy)]
enum Field {
    None,
    Name,
    Pathway,
    DbLinks,
}

/// Parse a blob of zero or more flat records. Malformed pieces degrade to
/// field defaults; nothing here fails the whole batch.
pub fn parse_flat_records(text: &str) -> Vec<KeggRecord> {
    let mut records = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line == RECORD_SEPARATOR {
            if !current.is_empty() {
                records.push(parse_record(&current));
                current.clear();
            }
            continue;
        }
        current.push(line);
    }
    if current.iter().any(|l| !l.trim().is_empty()) {
        records.push(parse_record(&current));
    }
    records
}

fn parse_record(lines: &[&str]) -> KeggRecord {
    let mut record = KeggRecord::default();
    let mut field = Field::None;

    for line in lines {
        if line.is_empty() {
            continue;
        }
        if line.starts_with(char::is_whitespace) {
            continuation(&mut record, field, line);
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else { continue };
        let remainder = &line[tag.len()..];

        match tag.to_ascii_uppercase().as_str() {
            "ENTRY" => {
                record.id = tokens.next().unwrap_or_default().to_string();
                record.kind = tokens.next().unwrap_or_default().to_string();
                field = Field::None;
            }
            "NAME" => {
                if let Some(first) = tokens.next() {
                    record.names.push(first.to_string());
                }
                field = Field::Name;
            }
            "FORMULA" => {
                record.formula = tokens.next().unwrap_or_default().to_string();
                field = Field::None;
            }
            "EXACT_MASS" => {
                record.exact_mass = parse_float(tokens.next());
                field = Field::None;
            }
            "MOL_WEIGHT" => {
                record.molecular_weight = parse_float(tokens.next());
                field = Field::None;
            }
            "COMMENT" => {
                record.comment = remainder.trim().to_string();
                field = Field::None;
            }
            "PATHWAY" => {
                push_pathway(&mut record, remainder);
                field = Field::Pathway;
            }
            "DBLINKS" => {
                push_db_links(&mut record, remainder);
                field = Field::DbLinks;
            }
            _ => field = Field::None,
        }
    }
    record
}

fn continuation(record: &mut KeggRecord, field: Field, line: &str) {
    match field {
        Field::Name => {
            let name = line.trim();
            if !name.is_empty() {
                record.names.push(name.to_string());
            }
        }
        Field::Pathway => push_pathway(record, line),
        Field::DbLinks => push_db_links(record, line),
        Field::None => {}
    }
}

/// Malformed numeric text keeps the 0.0 default; it never fails the batch.
fn parse_float(token: Option<&str>) -> f64 {
    token.and_then(|v| v.parse().ok()).unwrap_or(0.0)
}

fn push_pathway(record: &mut KeggRecord, line: &str) {
    if let Some(first) = line.split_whitespace().next() {
        record.pathways.push(first.to_string());
    }
}

/// `<database>: <id1> <id2> ...`; every id pairs with the database name.
fn push_db_links(record: &mut KeggRecord, line: &str) {
    let parts: Vec<&str> = line.trim().split(": ").collect();
    if parts.len() < 2 {
        return;
    }
    for id in parts[1].split_whitespace() {
        record.cross_refs.push((parts[0].to_string(), id.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_record() {
        let text = "ENTRY C00001 Compound\nNAME Water\nFORMULA H2O\nEXACT_MASS 18.0106\n///\n";
        let records = parse_flat_records(text);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "C00001");
        assert_eq!(r.kind, "Compound");
        assert_eq!(r.names, vec!["Water"]);
        assert_eq!(r.formula, "H2O");
        assert_eq!(r.exact_mass, 18.0106);
    }

    #[test]
    fn column_aligned_record_with_continuations() {
        let text = "\
ENTRY       C01157                      Compound
NAME        Hydroxyproline;
            trans-4-Hydroxy-L-proline
FORMULA     C5H9NO3
EXACT_MASS  131.0582
MOL_WEIGHT  131.1299
COMMENT     A proline derivative
PATHWAY     map00330  Arginine and proline metabolism
            map01100  Metabolic pathways
DBLINKS     CAS: 51-35-4
            PubChem: 7311 443
///
";
        let records = parse_flat_records(text);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "C01157");
        assert_eq!(r.names, vec!["Hydroxyproline;", "trans-4-Hydroxy-L-proline"]);
        assert_eq!(r.formula, "C5H9NO3");
        assert_eq!(r.exact_mass, 131.0582);
        assert_eq!(r.molecular_weight, 131.1299);
        assert_eq!(r.comment, "A proline derivative");
        assert_eq!(r.pathways, vec!["map00330", "map01100"]);
        assert_eq!(
            r.cross_refs,
            vec![
                ("CAS".to_string(), "51-35-4".to_string()),
                ("PubChem".to_string(), "7311".to_string()),
                ("PubChem".to_string(), "443".to_string()),
            ]
        );
        assert_eq!(r.cas(), "51-35-4");
        assert_eq!(r.cross_ref("ChEBI"), "");
    }

    #[test]
    fn two_records_split_on_separator() {
        let text = "ENTRY A Compound\nFORMULA H2O\n///\nENTRY B Compound\nFORMULA CO2\n///\n";
        let records = parse_flat_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "A");
        assert_eq!(records[1].id, "B");
    }

    #[test]
    fn trailing_record_without_separator_is_kept() {
        let text = "ENTRY A Compound\n///\nENTRY B Compound";
        let records = parse_flat_records(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, "B");
    }

    #[test]
    fn malformed_mass_keeps_default() {
        let text = "ENTRY X Compound\nEXACT_MASS n/a\nMOL_WEIGHT 12.0\n///\n";
        let r = &parse_flat_records(text)[0];
        assert_eq!(r.exact_mass, 0.0);
        assert_eq!(r.molecular_weight, 12.0);
    }

    #[test]
    fn record_without_entry_keeps_defaults() {
        let text = "FORMULA H2O\n///\n";
        let r = &parse_flat_records(text)[0];
        assert_eq!(r.id, "");
        assert_eq!(r.kind, "");
        assert_eq!(r.formula, "H2O");
    }

    #[test]
    fn tags_match_case_insensitively() {
        let text = "entry C1 Compound\nformula H2O\n///\n";
        let r = &parse_flat_records(text)[0];
        assert_eq!(r.id, "C1");
        assert_eq!(r.formula, "H2O");
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_flat_records("").is_empty());
        assert!(parse_flat_records("///\n").is_empty());
        assert!(parse_flat_records("\n\n").is_empty());
    }
}
