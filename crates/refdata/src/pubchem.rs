//! Serde model of the PubChem PUG `compound/cid/{ids}/JSON` response,
//! trimmed to the pieces the pipeline reads: the numeric cid and the
//! nested property list formula/mass live in.

use std::collections::HashMap;

use serde::Deserialize;

pub const PROP_FORMULA: &str = "Molecular Formula";
pub const PROP_MONOISOTOPIC: &str = "MonoIsotopic";

#[derive(Debug, Clone, Deserialize)]
pub struct PugResponse {
    #[serde(rename = "PC_Compounds", default)]
    pub compounds: Vec<PubchemCompound>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PubchemCompound {
    pub id: CompoundId,
    #[serde(default)]
    pub props: Vec<CompoundProp>,
}

/// `{"id": {"cid": 5810}}` in the wire format.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompoundId {
    #[serde(default)]
    pub id: HashMap<String, u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompoundProp {
    #[serde(default)]
    pub urn: PropUrn,
    #[serde(default)]
    pub value: PropValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropUrn {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropValue {
    #[serde(default)]
    pub sval: Option<String>,
    #[serde(default)]
    pub fval: Option<f64>,
    #[serde(default)]
    pub ival: Option<i64>,
    #[serde(default)]
    pub binary: Option<String>,
}

impl PubchemCompound {
    pub fn cid(&self) -> Option<u64> {
        self.id.id.get("cid").copied()
    }

    /// First property whose urn label or name equals `query`.
    pub fn property(&self, query: &str) -> Option<&PropValue> {
        self.props
            .iter()
            .find(|p| {
                p.urn.label.as_deref() == Some(query) || p.urn.name.as_deref() == Some(query)
            })
            .map(|p| &p.value)
    }

    pub fn formula(&self) -> &str {
        self.property(PROP_FORMULA)
            .and_then(|v| v.sval.as_deref())
            .unwrap_or("")
    }

    pub fn monoisotopic_mass(&self) -> f64 {
        self.property(PROP_MONOISOTOPIC)
            .and_then(|v| v.fval)
            .unwrap_or(0.0)
    }
}
