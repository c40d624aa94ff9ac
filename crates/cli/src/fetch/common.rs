//! Shared infrastructure for the reference fetchers.
//!
//! Each fetcher (pubchem, kegg, goodtables) reuses:
//! - `FetchClient`: HTTP client with retry / backoff / error classification
//! - `parse_base_url`: validate a `--*-base` override before any request
//!
//! A 404 is not an error here. The reference databases legitimately answer
//! 404 for id batches they do not hold, so requests return `Ok(None)` and
//! the caller decides what an absent resource means.

use std::thread;
use std::time::Duration;

use crate::exit_codes;
use crate::CliError;

// ── Constants ───────────────────────────────────────────────────────

pub(super) const MAX_RETRIES: u32 = 3;
pub(super) const USER_AGENT: &str = concat!("ccstab/", env!("CARGO_PKG_VERSION"));

// ── FetchClient ─────────────────────────────────────────────────────

/// Shared HTTP client that handles retry, backoff, and error classification.
///
/// Fetchers own their base URL and request shape. They pass a
/// request-building closure to [`FetchClient::request_with_retry`] which
/// runs the retry loop and maps HTTP status codes to the standard exit
/// codes.
pub(super) struct FetchClient {
    pub(super) http: reqwest::blocking::Client,
    source_name: String,
    error_extractor: fn(&serde_json::Value, u16) -> String,
}

impl FetchClient {
    pub(super) fn new(
        source_name: &str,
        error_extractor: fn(&serde_json::Value, u16) -> String,
    ) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            source_name: source_name.to_string(),
            error_extractor,
        }
    }

    /// Make a request with retry + exponential backoff, expecting JSON back.
    ///
    /// `build_request` is called once per attempt. It receives the
    /// underlying `reqwest::blocking::Client` and must return a fully
    /// configured `RequestBuilder` (URL, method, headers, body).
    /// Returns `Ok(None)` on HTTP 404.
    pub(super) fn request_with_retry(
        &self,
        build_request: impl Fn(&reqwest::blocking::Client) -> reqwest::blocking::RequestBuilder,
    ) -> Result<Option<serde_json::Value>, CliError> {
        let Some(text) = self.request_with_retry_text(build_request)? else {
            return Ok(None);
        };
        // Read as text first to handle BOM-prefixed responses
        let trimmed = text.trim_start_matches('\u{feff}');
        let body: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| CliError {
            code: exit_codes::EXIT_FETCH,
            message: format!(
                "failed to parse {} JSON response: {} (body: {})",
                self.source_name,
                e,
                trimmed.chars().take(200).collect::<String>(),
            ),
            hint: None,
        })?;
        Ok(Some(body))
    }

    /// Same retry loop, returning the raw body text. KEGG speaks a flat
    /// text format, not JSON. Returns `Ok(None)` on HTTP 404.
    pub(super) fn request_with_retry_text(
        &self,
        build_request: impl Fn(&reqwest::blocking::Client) -> reqwest::blocking::RequestBuilder,
    ) -> Result<Option<String>, CliError> {
        let mut backoff_secs = 1u64;

        for attempt in 0..=MAX_RETRIES {
            let req = build_request(&self.http);

            match req.send() {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    if status == 404 {
                        return Ok(None);
                    }

                    // Non-retryable 4xx: fail immediately
                    if status >= 400 && status < 500 && status != 429 {
                        let body: serde_json::Value =
                            resp.json().unwrap_or(serde_json::Value::Null);
                        let msg = (self.error_extractor)(&body, status);
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH,
                            message: format!(
                                "{} rejected the request ({}): {}",
                                self.source_name, status, msg,
                            ),
                            hint: None,
                        });
                    }

                    // Retryable: 429, 5xx
                    if status == 429 || status >= 500 {
                        if attempt == MAX_RETRIES {
                            return Err(CliError {
                                code: exit_codes::EXIT_FETCH,
                                message: format!(
                                    "{} {} after {} attempts ({})",
                                    self.source_name,
                                    if status == 429 {
                                        "rate limited"
                                    } else {
                                        "upstream error"
                                    },
                                    MAX_RETRIES,
                                    status,
                                ),
                                hint: None,
                            });
                        }

                        // Respect Retry-After header for 429
                        let wait = if status == 429 {
                            resp.headers()
                                .get("retry-after")
                                .and_then(|v| v.to_str().ok())
                                .and_then(|v| v.parse::<u64>().ok())
                                .unwrap_or(backoff_secs)
                        } else {
                            backoff_secs
                        };

                        eprintln!(
                            "warning: retry {}/{} in {}s (HTTP {})",
                            attempt + 1,
                            MAX_RETRIES,
                            wait,
                            status,
                        );
                        thread::sleep(Duration::from_secs(wait));
                        backoff_secs *= 2;
                        continue;
                    }

                    let text = resp.text().map_err(|e| CliError {
                        code: exit_codes::EXIT_FETCH,
                        message: format!(
                            "failed to read {} response body: {}",
                            self.source_name, e,
                        ),
                        hint: None,
                    })?;
                    return Ok(Some(text));
                }
                Err(e) => {
                    // Network/timeout errors: retry
                    if attempt == MAX_RETRIES {
                        return Err(CliError {
                            code: exit_codes::EXIT_FETCH,
                            message: format!(
                                "{} unreachable after {} attempts: {}",
                                self.source_name, MAX_RETRIES, e,
                            ),
                            hint: None,
                        });
                    }

                    eprintln!(
                        "warning: retry {}/{} in {}s ({})",
                        attempt + 1,
                        MAX_RETRIES,
                        backoff_secs,
                        e,
                    );
                    thread::sleep(Duration::from_secs(backoff_secs));
                    backoff_secs *= 2;
                }
            }
        }

        unreachable!("retry loop returns on the final attempt");
    }
}

// ── Base URL overrides ──────────────────────────────────────────────

/// Validate a service base URL override and strip any trailing slash.
pub fn parse_base_url(flag: &str, value: &str) -> Result<String, CliError> {
    url::Url::parse(value)
        .map_err(|e| CliError::args(format!("{} is not a valid URL ({}): {}", flag, value, e)))?;
    Ok(value.trim_end_matches('/').to_string())
}
