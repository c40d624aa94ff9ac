//! PubChem PUG REST fetcher: compound records by CID, in batches.

use ccstab_refdata::{PugResponse, ReferenceLookup, PUBCHEM_CHUNK};

use crate::exit_codes;
use crate::CliError;

use super::common::FetchClient;

/// Production PUG REST endpoint.
pub const DEFAULT_PUBCHEM_BASE: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

// ── Error extraction ────────────────────────────────────────────────

/// PUG wraps errors as `{"Fault": {"Code": ..., "Message": ...}}`.
fn extract_pubchem_error(body: &serde_json::Value, status: u16) -> String {
    body["Fault"]["Message"]
        .as_str()
        .or_else(|| body["Fault"]["Code"].as_str())
        .unwrap_or(&format!("HTTP {}", status))
        .to_string()
}

// ── Entry point ─────────────────────────────────────────────────────

/// Fetch compound records for `cids` and merge them into `lookup`.
///
/// Requests [`PUBCHEM_CHUNK`] ids at a time. A failed batch is skipped
/// with a warning so one bad range cannot sink the whole run; if every
/// batch fails the source is treated as down and the run aborts.
pub fn fetch_pubchem(
    base: &str,
    cids: &[u64],
    lookup: &mut ReferenceLookup,
) -> Result<(), CliError> {
    if cids.is_empty() {
        return Ok(());
    }

    let client = FetchClient::new("PubChem", extract_pubchem_error);
    let mut attempted = 0usize;
    let mut failed = 0usize;

    for chunk in cids.chunks(PUBCHEM_CHUNK) {
        let ids = chunk
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/compound/cid/{}/JSON", base, ids);
        attempted += 1;

        match client.request_with_retry(|http| http.get(&url)) {
            Ok(Some(body)) => match serde_json::from_value::<PugResponse>(body) {
                Ok(response) => lookup.add_pubchem(response.compounds),
                Err(e) => {
                    failed += 1;
                    eprintln!("warning: PubChem batch response did not parse: {}", e);
                }
            },
            Ok(None) => {
                // 404: PUG holds none of the ids in this batch
                eprintln!(
                    "warning: PubChem has no records for a batch of {} ids",
                    chunk.len(),
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("warning: PubChem batch skipped: {}", e.message);
            }
        }
    }

    if failed == attempted {
        return Err(CliError {
            code: exit_codes::EXIT_FETCH,
            message: format!("PubChem: all {} batches failed", attempted),
            hint: None,
        });
    }

    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────
