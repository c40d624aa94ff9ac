//! Row-versus-reference agreement checks.

use ccstab_refdata::{KeggRecord, PubchemCompound};

/// The fields of a candidate row that references are compared against.
/// Mass is carried pre-truncated so every comparison uses the same value.
#[derive(Debug, Clone)]
pub struct RowFacts {
    pub formula: String,
    pub cas: String,
    pub mass_trunc: i64,
}

/// Integer part of a mass, truncated toward zero.
///
/// Reference masses differ from measured ones after the decimal point, so
/// agreement is decided on the integer part only. 131.99 and 131.05 agree;
/// 131.99 and 132.05 do not.
pub fn truncate_mass(mass: f64) -> i64 {
    mass as i64
}

/// Decide whether the resolved references agree with a candidate row.
///
/// With both references, formula must match both, CAS must match KEGG, and
/// the truncated mass must match both. With only PubChem, formula and
/// truncated mass must match it. Without PubChem nothing can agree, so the
/// answer is false regardless of KEGG.
pub fn matches(
    row: &RowFacts,
    pubchem: Option<&PubchemCompound>,
    kegg: Option<&KeggRecord>,
) -> bool {
    let Some(pubchem) = pubchem else {
        return false;
    };
    let formula_ok = row.formula == pubchem.formula();
    let mass_ok = row.mass_trunc == truncate_mass(pubchem.monoisotopic_mass());
    match kegg {
        Some(kegg) => {
            formula_ok
                && mass_ok
                && row.formula == kegg.formula
                && row.cas == kegg.cas()
                && row.mass_trunc == truncate_mass(kegg.exact_mass)
        }
        None => formula_ok && mass_ok,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn kegg(formula: &str, mass: f64, cas: &str) -> KeggRecord {
        let cross_refs = if cas.is_empty() {
            Vec::new()
        } else {
            vec![("CAS".to_string(), cas.to_string())]
        };
        KeggRecord {
            id: "C01157".to_string(),
            formula: formula.to_string(),
            exact_mass: mass,
            cross_refs,
            ..KeggRecord::default()
        }
    }

    fn pubchem(formula: &str, mass: f64) -> PubchemCompound {
        let json = format!(
            r#"{{
                "id": {{ "id": {{ "cid": 5810 }} }},
                "props": [
                    {{ "urn": {{ "label": "Molecular Formula" }},
                       "value": {{ "sval": "{formula}" }} }},
                    {{ "urn": {{ "label": "Weight", "name": "MonoIsotopic" }},
                       "value": {{ "fval": {mass} }} }}
                ]
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn facts(formula: &str, cas: &str, mass: f64) -> RowFacts {
        RowFacts {
            formula: formula.to_string(),
            cas: cas.to_string(),
            mass_trunc: truncate_mass(mass),
        }
    }

    #[test]
    fn truncation_is_toward_zero() {
        assert_eq!(truncate_mass(131.99), 131);
        assert_eq!(truncate_mass(131.05), 131);
        assert_eq!(truncate_mass(132.0), 132);
        assert_eq!(truncate_mass(-1.9), -1);
        assert_eq!(truncate_mass(0.0), 0);
    }

    #[test]
    fn full_agreement_matches() {
        let row = facts("C5H9NO3", "51-35-4", 131.99);
        let k = kegg("C5H9NO3", 131.0582, "51-35-4");
        let p = pubchem("C5H9NO3", 131.0582);
        assert!(matches(&row, Some(&p), Some(&k)));
    }

    #[test]
    fn mass_differs_before_the_decimal_point() {
        let row = facts("C5H9NO3", "51-35-4", 131.99);
        let k = kegg("C5H9NO3", 132.05, "51-35-4");
        let p = pubchem("C5H9NO3", 132.05);
        assert!(!matches(&row, Some(&p), Some(&k)));
    }

    #[test]
    fn formula_mismatch_fails() {
        let row = facts("C5H9NO3", "51-35-4", 131.05);
        let k = kegg("C5H9NO3", 131.0582, "51-35-4");
        let p = pubchem("C6H9NO3", 131.0582);
        assert!(!matches(&row, Some(&p), Some(&k)));
    }

    #[test]
    fn cas_is_only_checked_against_kegg() {
        let row = facts("C5H9NO3", "99-99-9", 131.05);
        let k = kegg("C5H9NO3", 131.0582, "51-35-4");
        let p = pubchem("C5H9NO3", 131.0582);
        assert!(!matches(&row, Some(&p), Some(&k)));
        // Without KEGG the CAS number is not consulted at all.
        assert!(matches(&row, Some(&p), None));
    }

    #[test]
    fn kegg_without_cas_entry_compares_against_empty() {
        let row = facts("C5H9NO3", "", 131.05);
        let k = kegg("C5H9NO3", 131.0582, "");
        let p = pubchem("C5H9NO3", 131.0582);
        assert!(matches(&row, Some(&p), Some(&k)));
    }

    #[test]
    fn no_pubchem_never_matches() {
        let row = facts("C5H9NO3", "51-35-4", 131.05);
        let k = kegg("C5H9NO3", 131.0582, "51-35-4");
        assert!(!matches(&row, None, Some(&k)));
        assert!(!matches(&row, None, None));
    }
}
