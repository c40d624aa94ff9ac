//! Derived export layout consumed by downstream mass-spectrometry tooling.
//!
//! One output line per populated adduct column per row, under two fixed
//! header lines. Adduct values that are empty or the literal `N/A` emit
//! nothing.

use crate::error::TableError;
use crate::table::Table;

const HEADER: &str = "###Formula\tMass\tCompound name\tKEGG\tCAS\tPolarity\tIon Species\tCCS\tZ\tGas\tCCS Standard\tNotes\n\
                      #Formula\tMass\tCpd\tKEGG\tCAS\tPolarity\tIon Species\tCCS\tZ\tGas\tCCS Standard\tNotes\n";

/// Adduct CCS columns in emission order: (canonical column, polarity, ion species).
const ADDUCTS: [(&str, &str, &str); 3] = [
    ("mplushccs", "positive", "(M+H)+"),
    ("mplusnaccs", "positive", "(M+Na)+"),
    ("mminushccs", "negative", "(M-H)-"),
];

const BASE_COLUMNS: [&str; 5] = ["formula", "mass", "neutral name", "kegg", "cas"];

/// Render the Agilent-format text for `table`. Fails with `UnknownColumn`
/// if a populated table lacks one of the source columns.
pub fn to_agilent(table: &Table) -> Result<String, TableError> {
    let mut out = String::from(HEADER);
    if table.is_empty() {
        return Ok(out);
    }

    for name in BASE_COLUMNS.iter().chain(ADDUCTS.iter().map(|(c, _, _)| c)) {
        if !table.schema().contains(name) {
            return Err(TableError::UnknownColumn { name: name.to_string() });
        }
    }

    for row in table.rows() {
        let value = |name: &str| row.get(name).map(String::as_str).unwrap_or("");
        let base = format!(
            "{}\t{}\t{}\t{}\t{}",
            value("formula"),
            value("mass"),
            value("neutral name"),
            value("kegg"),
            value("cas")
        );
        for (column, polarity, species) in ADDUCTS {
            let ccs = value(column);
            if ccs.is_empty() || ccs == "N/A" {
                continue;
            }
            out.push_str(&format!("{base}\t{polarity}\t{species}\t{ccs}\t\tN2\t\t\n"));
        }
    }
    Ok(out)
}
