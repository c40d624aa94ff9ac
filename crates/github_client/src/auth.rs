//! Credential storage.
//!
//! Reads/writes ~/.config/ccstab/auth.json (0600 on Unix). A credential
//! saved with `ccstab auth set` is picked up by later runs automatically.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::client::GithubError;

/// GitHub credentials stored locally.
///
/// `token` is whatever GitHub accepts as the basic-auth secret for this
/// account, normally a personal access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub username: String,
    pub token: String,
}

impl StoredCredentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

/// Returns the path to the credentials file.
pub fn auth_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("ccstab/auth.json"))
}

/// Load saved credentials from disk.
/// Returns None if nothing is saved or the file is invalid.
pub fn load_auth() -> Option<StoredCredentials> {
    let path = auth_file_path()?;
    let contents = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save credentials to disk.
/// Creates the parent directory if it doesn't exist.
/// Sets 0600 permissions on Unix.
pub fn save_auth(creds: &StoredCredentials) -> Result<(), GithubError> {
    let path = auth_file_path()
        .ok_or_else(|| GithubError::Io("could not determine config directory".into()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| GithubError::Io(format!("failed to create config directory: {}", e)))?;
    }

    let contents = serde_json::to_string_pretty(creds)
        .map_err(|e| GithubError::Parse(format!("failed to serialize credentials: {}", e)))?;

    std::fs::write(&path, &contents)
        .map_err(|e| GithubError::Io(format!("failed to write auth file: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, permissions)
            .map_err(|e| GithubError::Io(format!("failed to set file permissions: {}", e)))?;
    }

    Ok(())
}

/// Delete saved credentials.
pub fn delete_auth() -> Result<(), GithubError> {
    let Some(path) = auth_file_path() else {
        return Ok(());
    };
    if path.exists() {
        std::fs::remove_file(&path)
            .map_err(|e| GithubError::Io(format!("failed to delete auth file: {}", e)))?;
    }
    Ok(())
}
