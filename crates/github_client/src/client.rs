//! GitHub REST v3 client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Covers the repository flow: fetch file → probe tree sha → PUT upload.

use std::fmt::Write as _;
use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::auth::StoredCredentials;

const GITHUB_API_BASE: &str = "https://api.github.com";
const PREVIEW_ROWS: usize = 5;

/// GitHub API client (blocking).
///
/// Reads work anonymously; `upload` requires credentials.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::blocking::Client,
    api_base: String,
    owner: String,
    repo: String,
    branch: String,
    credentials: Option<StoredCredentials>,
}

/// Error type for GitHub operations.
#[derive(Debug)]
pub enum GithubError {
    /// Upload attempted without credentials
    NotAuthenticated,
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON or base64 decoding error
    Parse(String),
    /// Local file I/O error (credential storage)
    Io(String),
}

impl std::fmt::Display for GithubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GithubError::NotAuthenticated => {
                write!(f, "not authenticated; run `ccstab auth set` first")
            }
            GithubError::Network(msg) => write!(f, "network error: {}", msg),
            GithubError::Http(code, msg) => write!(f, "GitHub HTTP {}: {}", code, msg),
            GithubError::Parse(msg) => write!(f, "parse error: {}", msg),
            GithubError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for GithubError {}

/// A file fetched from the contents endpoint, already decoded.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub content: String,
    pub sha: String,
}

/// Whether an upload created the file or updated an existing blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Created,
    Updated,
}

impl std::fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadOutcome::Created => f.write_str("created"),
            UploadOutcome::Updated => f.write_str("updated"),
        }
    }
}

/// PUT body for the contents endpoint. `Update` carries the sha of the
/// blob being replaced; GitHub rejects an update without it and a create
/// with it.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UploadRequest {
    Create {
        message: String,
        branch: String,
        content: String,
    },
    Update {
        message: String,
        branch: String,
        content: String,
        sha: String,
    },
}

impl UploadRequest {
    /// Build the right variant from an optional existing-blob sha.
    /// `content` is encoded to base64 here.
    pub fn new(message: &str, branch: &str, content: &str, sha: Option<String>) -> Self {
        let content = encode_content(content);
        match sha {
            Some(sha) => UploadRequest::Update {
                message: message.to_string(),
                branch: branch.to_string(),
                content,
                sha,
            },
            None => UploadRequest::Create {
                message: message.to_string(),
                branch: branch.to_string(),
                content,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Wire models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    sha: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl GithubClient {
    /// Create an anonymous client for `owner/repo` on branch `master`.
    pub fn new(owner: &str, repo: &str) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("ccstab/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            api_base: GITHUB_API_BASE.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: "master".to_string(),
            credentials: None,
        }
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    /// Point the client at a different API host (tests, GitHub Enterprise).
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_credentials(mut self, creds: StoredCredentials) -> Self {
        self.credentials = Some(creds);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Fetch and decode a file via the contents endpoint.
    /// Returns `Ok(None)` when the file does not exist.
    pub fn get_file(&self, path: &str) -> Result<Option<RemoteFile>, GithubError> {
        let url = self.contents_url(path);
        let Some(response) = self.get(&url)? else {
            return Ok(None);
        };
        let parsed: ContentResponse = response
            .json()
            .map_err(|e| GithubError::Parse(e.to_string()))?;
        let content = decode_content(&parsed.content)?;
        Ok(Some(RemoteFile {
            content,
            sha: parsed.sha,
        }))
    }

    /// Look up the blob sha of a file via the recursive tree endpoint.
    /// Returns `Ok(None)` when the path is absent (or the branch is empty).
    pub fn file_sha(&self, path: &str) -> Result<Option<String>, GithubError> {
        let url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, self.owner, self.repo, self.branch
        );
        let Some(response) = self.get(&url)? else {
            return Ok(None);
        };
        let parsed: TreeResponse = response
            .json()
            .map_err(|e| GithubError::Parse(e.to_string()))?;
        Ok(parsed
            .tree
            .into_iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.sha))
    }

    /// Create or update a file. The tree is probed first so the request
    /// carries the existing blob sha when the file is already there.
    pub fn upload(
        &self,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<UploadOutcome, GithubError> {
        let Some(creds) = &self.credentials else {
            return Err(GithubError::NotAuthenticated);
        };

        let sha = self.file_sha(path)?;
        let outcome = match sha {
            Some(_) => UploadOutcome::Updated,
            None => UploadOutcome::Created,
        };
        let request = UploadRequest::new(message, &self.branch, content, sha);

        let url = self.contents_url(path);
        let response = self
            .http
            .put(&url)
            .basic_auth(&creds.username, Some(&creds.token))
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .map_err(|e| GithubError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GithubError::Http(status, body));
        }

        Ok(outcome)
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// GET with optional basic auth. 404 maps to `Ok(None)`.
    fn get(&self, url: &str) -> Result<Option<reqwest::blocking::Response>, GithubError> {
        let mut request = self.http.get(url).header("Accept", "application/json");
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.token));
        }
        let response = request
            .send()
            .map_err(|e| GithubError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Ok(None);
        }
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GithubError::Http(status, body));
        }

        Ok(Some(response))
    }
}

// ---------------------------------------------------------------------------
// Content encoding
// ---------------------------------------------------------------------------

/// Decode contents-endpoint base64, which arrives chunked with embedded
/// newlines.
fn decode_content(encoded: &str) -> Result<String, GithubError> {
    let b64 = base64::engine::general_purpose::STANDARD;
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = b64
        .decode(compact)
        .map_err(|e| GithubError::Parse(format!("invalid base64 content: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| GithubError::Parse(format!("file content is not UTF-8: {}", e)))
}

fn encode_content(content: &str) -> String {
    let b64 = base64::engine::general_purpose::STANDARD;
    b64.encode(content.as_bytes())
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Human-readable preview of an upload: the first few non-blank lines,
/// long lines cut at 77 chars. Used by `--preview` instead of a PUT.
pub fn preview_text(path: &str, content: &str) -> String {
    let rows: Vec<&str> = content.split(['\r', '\n']).collect();
    let mut shown: Vec<String> = Vec::new();
    for row in &rows {
        if row.trim().is_empty() {
            continue;
        }
        if row.chars().count() < 80 {
            shown.push(row.to_string());
        } else {
            let cut: String = row.chars().take(77).collect();
            shown.push(format!("{} ...", cut));
        }
        if shown.len() == PREVIEW_ROWS {
            break;
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "Preview of data to push to {} on GitHub", path);
    let _ = writeln!(out, "Displaying {} / {} total rows", shown.len(), rows.len());
    for line in shown {
        let _ = writeln!(out, "{}", line);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> GithubClient {
        GithubClient::new("acme", "compounds").with_api_base(&server.base_url())
    }

    fn authed_client(server: &MockServer) -> GithubClient {
        client(server).with_credentials(StoredCredentials::new("alice", "tok"))
    }

    #[test]
    fn test_decode_content_with_embedded_newlines() {
        // The contents endpoint chunks base64 with embedded newlines.
        let plain = "kegg\tcas\nC00001\t51-35-4\n";
        let b64 = base64::engine::general_purpose::STANDARD;
        let raw = b64.encode(plain.as_bytes());
        let wrapped: String = raw
            .as_bytes()
            .chunks(8)
            .map(|c| std::str::from_utf8(c).unwrap())
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(decode_content(&wrapped).unwrap(), plain);
    }

    #[test]
    fn test_decode_content_rejects_garbage() {
        assert!(matches!(
            decode_content("!!not-base64!!"),
            Err(GithubError::Parse(_))
        ));
    }

    #[test]
    fn test_upload_request_create_has_no_sha() {
        let request = UploadRequest::new("Updated data", "master", "a\tb\n1\t2", None);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "Updated data");
        assert_eq!(json["branch"], "master");
        assert!(json.get("sha").is_none());

        let b64 = base64::engine::general_purpose::STANDARD;
        let decoded = b64.decode(json["content"].as_str().unwrap()).unwrap();
        assert_eq!(decoded, b"a\tb\n1\t2");
    }

    #[test]
    fn test_upload_request_update_carries_sha() {
        let request = UploadRequest::new("Updated data", "master", "x", Some("abc123".into()));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["sha"], "abc123");
    }

    #[test]
    fn test_get_file_decodes_and_returns_sha() {
        let server = MockServer::start();
        let plain = "Neutral Name\tcas\nProline\t147-85-3\n";
        let b64 = base64::engine::general_purpose::STANDARD;
        let encoded = format!("{}\n", b64.encode(plain.as_bytes()));

        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/compounds/contents/data/metabolitedata.tsv");
            then.status(200).json_body(serde_json::json!({
                "name": "metabolitedata.tsv",
                "path": "data/metabolitedata.tsv",
                "sha": "f00dfeed",
                "encoding": "base64",
                "content": encoded,
            }));
        });

        let file = client(&server)
            .get_file("data/metabolitedata.tsv")
            .unwrap()
            .unwrap();
        assert_eq!(file.content, plain);
        assert_eq!(file.sha, "f00dfeed");
    }

    #[test]
    fn test_get_file_missing_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/compounds/contents/data/missing.tsv");
            then.status(404)
                .json_body(serde_json::json!({ "message": "Not Found" }));
        });

        let file = client(&server).get_file("data/missing.tsv").unwrap();
        assert!(file.is_none());
    }

    #[test]
    fn test_get_file_server_error_is_http() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET);
            then.status(500).body("boom");
        });

        let err = client(&server).get_file("data/x.tsv").unwrap_err();
        assert!(matches!(err, GithubError::Http(500, _)));
    }

    #[test]
    fn test_file_sha_finds_path_in_tree() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/compounds/git/trees/master")
                .query_param("recursive", "1");
            then.status(200).json_body(serde_json::json!({
                "sha": "root",
                "tree": [
                    { "path": "README.md", "mode": "100644", "type": "blob", "sha": "aaa" },
                    { "path": "data/metabolitedata.tsv", "mode": "100644", "type": "blob", "sha": "bbb" }
                ]
            }));
        });

        let c = client(&server);
        assert_eq!(
            c.file_sha("data/metabolitedata.tsv").unwrap().as_deref(),
            Some("bbb")
        );
        assert_eq!(c.file_sha("data/other.tsv").unwrap(), None);
    }

    #[test]
    fn test_upload_without_credentials_fails() {
        let server = MockServer::start();
        let err = client(&server).upload("data/x.tsv", "a", "msg").unwrap_err();
        assert!(matches!(err, GithubError::NotAuthenticated));
    }

    #[test]
    fn test_upload_creates_when_tree_lacks_path() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/compounds/git/trees/master");
            then.status(200)
                .json_body(serde_json::json!({ "sha": "root", "tree": [] }));
        });
        let put = server.mock(|when, then| {
            when.method(PUT)
                .path("/repos/acme/compounds/contents/data/new.tsv")
                .json_body_partial(r#"{ "message": "Updated data", "branch": "master" }"#);
            then.status(201).json_body(serde_json::json!({
                "content": { "sha": "new" }
            }));
        });

        let outcome = authed_client(&server)
            .upload("data/new.tsv", "a\tb\n", "Updated data")
            .unwrap();
        assert_eq!(outcome, UploadOutcome::Created);
        put.assert();
    }

    #[test]
    fn test_upload_updates_when_tree_has_path() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/compounds/git/trees/master");
            then.status(200).json_body(serde_json::json!({
                "sha": "root",
                "tree": [
                    { "path": "data/existing.tsv", "mode": "100644", "type": "blob", "sha": "oldsha" }
                ]
            }));
        });
        let put = server.mock(|when, then| {
            when.method(PUT)
                .path("/repos/acme/compounds/contents/data/existing.tsv")
                .json_body_partial(r#"{ "sha": "oldsha" }"#);
            then.status(200).json_body(serde_json::json!({
                "content": { "sha": "newsha" }
            }));
        });

        let outcome = authed_client(&server)
            .upload("data/existing.tsv", "a\tb\n", "Updated data")
            .unwrap();
        assert_eq!(outcome, UploadOutcome::Updated);
        put.assert();
    }

    #[test]
    fn test_upload_unauthorized_surfaces_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/compounds/git/trees/master");
            then.status(200)
                .json_body(serde_json::json!({ "sha": "root", "tree": [] }));
        });
        server.mock(|when, then| {
            when.method(PUT);
            then.status(401)
                .json_body(serde_json::json!({ "message": "Bad credentials" }));
        });

        let err = authed_client(&server)
            .upload("data/x.tsv", "a", "msg")
            .unwrap_err();
        assert!(matches!(err, GithubError::Http(401, _)));
    }

    #[test]
    fn test_preview_shows_first_five_nonblank_rows() {
        let content = "h1\th2\n\nrow1\nrow2\nrow3\nrow4\nrow5\nrow6\n";
        let text = preview_text("data/metabolitedata.tsv", content);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Preview of data to push to data/metabolitedata.tsv on GitHub"
        );
        assert_eq!(lines[1], "Displaying 5 / 9 total rows");
        assert_eq!(&lines[2..], &["h1\th2", "row1", "row2", "row3", "row4"]);
    }

    #[test]
    fn test_preview_truncates_long_rows() {
        let long = "x".repeat(100);
        let text = preview_text("p", &format!("{}\nshort\n", long));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[2].chars().count(), 81);
        assert!(lines[2].ends_with(" ..."));
        assert_eq!(lines[3], "short");
    }

    #[test]
    fn test_preview_of_short_content() {
        let text = preview_text("p", "only\n");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Displaying 1 / 2 total rows");
        assert_eq!(lines[2], "only");
    }
}
