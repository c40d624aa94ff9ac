//! Table-schema validation via the GoodTables web service.
//!
//! Advisory: the pipeline reports what the service says and keeps going.
//! Transport failures still carry their own exit code so callers that do
//! want to hard-fail on them can.

use crate::exit_codes;
use crate::CliError;

use super::common::FetchClient;

/// Public GoodTables instance.
pub const DEFAULT_GOODTABLES_BASE: &str = "http://goodtables.okfnlabs.org";

/// Published schema the hosted table is validated against.
pub const DEFAULT_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/PNNL-Comp-Mass-Spec/MetabolomicsCCS/master/metabolitedata-schema.json";

/// What the service said about a table. `raw` is the whole response,
/// written out verbatim when the verdict is a failure.
#[derive(Debug)]
pub struct Verdict {
    pub success: bool,
    pub raw: serde_json::Value,
}

// ── Error extraction ────────────────────────────────────────────────

fn extract_goodtables_error(body: &serde_json::Value, status: u16) -> String {
    body["message"]
        .as_str()
        .unwrap_or(&format!("HTTP {}", status))
        .to_string()
}

// ── Entry point ─────────────────────────────────────────────────────

/// Ask the service to validate `data` (a serialized table) against the
/// schema published at `schema_url`.
pub fn validate_table(base: &str, schema_url: &str, data: &str) -> Result<Verdict, CliError> {
    let client = FetchClient::new("GoodTables", extract_goodtables_error);
    let url = format!("{}/api/run", base);
    let payload = serde_json::json!({ "data": data, "schema": schema_url });

    let body = client
        .request_with_retry(|http| http.post(&url).json(&payload))
        .map_err(|e| CliError {
            code: exit_codes::EXIT_VALIDATION_SERVICE,
            message: e.message,
            hint: e.hint,
        })?
        .ok_or_else(|| CliError {
            code: exit_codes::EXIT_VALIDATION_SERVICE,
            message: "GoodTables endpoint not found (404)".to_string(),
            hint: None,
        })?;

    let success = body["success"].as_bool().unwrap_or(false);
    Ok(Verdict { success, raw: body })
}

// ── Tests ───────────────────────────────────────────────────────────
