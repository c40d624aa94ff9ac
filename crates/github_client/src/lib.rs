//! GitHub contents API client for the curated reference repository.
//!
//! This crate is the single source of truth for the GitHub wire contract:
//! fetch file, tree sha lookup, create-or-update upload, credential storage.
//!
//! No terminal prompts. No retries. Callers decide preview vs. push.

mod auth;
mod client;

pub use auth::{auth_file_path, delete_auth, load_auth, save_auth, StoredCredentials};
pub use client::{
    preview_text, GithubClient, GithubError, RemoteFile, UploadOutcome, UploadRequest,
};
