//! KEGG REST fetcher: flat-file compound entries, ten ids joined with `+`.

use ccstab_refdata::{parse_flat_records, ReferenceLookup, KEGG_CHUNK};

use crate::exit_codes;
use crate::CliError;

use super::common::FetchClient;

/// Production KEGG REST endpoint.
pub const DEFAULT_KEGG_BASE: &str = "https://rest.kegg.jp";

// ── Error extraction ────────────────────────────────────────────────

/// KEGG error bodies are plain text, never JSON; the status is all we get.
fn extract_kegg_error(_body: &serde_json::Value, status: u16) -> String {
    format!("HTTP {}", status)
}

// ── Entry point ─────────────────────────────────────────────────────

/// Fetch flat-file entries for `ids` and merge them into `lookup`.
///
/// Requests [`KEGG_CHUNK`] ids at a time. A 404 means KEGG holds none of
/// the ids in that batch, which is an answer, not a failure; rows naming
/// those ids will classify as missing their KEGG reference. A failed
/// batch is skipped with a warning; if every batch fails the source is
/// treated as down and the run aborts.
pub fn fetch_kegg(
    base: &str,
    ids: &[String],
    lookup: &mut ReferenceLookup,
) -> Result<(), CliError> {
    if ids.is_empty() {
        return Ok(());
    }

    let client = FetchClient::new("KEGG", extract_kegg_error);
    let mut attempted = 0usize;
    let mut failed = 0usize;

    for chunk in ids.chunks(KEGG_CHUNK) {
        let url = format!("{}/get/{}", base, chunk.join("+"));
        attempted += 1;

        match client.request_with_retry_text(|http| http.get(&url)) {
            Ok(Some(text)) => lookup.add_kegg(parse_flat_records(&text)),
            Ok(None) => {}
            Err(e) => {
                failed += 1;
                eprintln!("warning: KEGG batch skipped: {}", e.message);
            }
        }
    }

    if failed == attempted {
        return Err(CliError {
            code: exit_codes::EXIT_FETCH,
            message: format!("KEGG: all {} batches failed", attempted),
            hint: None,
        });
    }

    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────
