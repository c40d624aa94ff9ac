//! Keyed lookup maps over the two reference sources, built once per run
//! from chunked batch responses and merged first-seen-id-wins.

use std::collections::HashMap;

use crate::kegg::KeggRecord;
use crate::pubchem::PubchemCompound;

/// Ids per PubChem batch request.
pub const PUBCHEM_CHUNK: usize = 100;
/// Ids per KEGG batch request.
pub const KEGG_CHUNK: usize = 10;

/// Pre-built reference maps handed to the curation engine. The engine
/// never fetches; collaborators populate this and pass it in.
#[derive(Debug, Default)]
pub struct ReferenceLookup {
    pubchem: HashMap<u64, PubchemCompound>,
    kegg: HashMap<String, KeggRecord>,
}

impl ReferenceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a batch of PubChem compounds. The first record seen for a cid
    /// wins; records without a cid are dropped.
    pub fn add_pubchem(&mut self, compounds: Vec<PubchemCompound>) {
        for compound in compounds {
            let Some(cid) = compound.cid() else { continue };
            self.pubchem.entry(cid).or_insert(compound);
        }
    }

    /// Merge a batch of KEGG records, first-seen-id-wins.
    pub fn add_kegg(&mut self, records: Vec<KeggRecord>) {
        for record in records {
            self.kegg.entry(record.id.clone()).or_insert(record);
        }
    }

    pub fn pubchem(&self, cid: u64) -> Option<&PubchemCompound> {
        self.pubchem.get(&cid)
    }

    pub fn kegg(&self, id: &str) -> Option<&KeggRecord> {
        self.kegg.get(id)
    }

    pub fn pubchem_len(&self) -> usize {
        self.pubchem.len()
    }

    pub fn kegg_len(&self) -> usize {
        self.kegg.len()
    }
}
