//! GitHub credential resolution and the password scramble.
//!
//! Precedence: explicit flags (or their environment variables, which clap
//! folds into the flags) beat the stored auth file. A password prefixed
//! with `*` is treated as scrambled and decoded first.

use ccstab_github_client::{load_auth, StoredCredentials};

use crate::CliError;

/// Resolve the credentials for a run. `None` means anonymous: reads still
/// work against public repositories, uploads will be refused downstream.
pub fn resolve(
    user: Option<String>,
    password: Option<String>,
) -> Result<Option<StoredCredentials>, CliError> {
    match (user, password) {
        (Some(user), Some(password)) => {
            let token = match password.strip_prefix('*') {
                Some(scrambled) => decode_password(scrambled)?,
                None => password,
            };
            Ok(Some(StoredCredentials::new(user, token)))
        }
        (Some(_), None) => Err(CliError::args("--user requires --password").with_hint(
            "pass --password (prefix with * if scrambled) or store credentials with `ccstab auth set`",
        )),
        (None, Some(_)) => Err(CliError::args("--password requires --user")),
        (None, None) => Ok(load_auth()),
    }
}

/// Undo [`encode_password`]: shift bytes at even positions up by one and
/// bytes at odd positions down by one.
pub fn decode_password(scrambled: &str) -> Result<String, CliError> {
    shift(scrambled, 1)
}

/// Scramble a password so it can sit in scripts and shell history without
/// being directly readable. Not encryption.
pub fn encode_password(plain: &str) -> Result<String, CliError> {
    shift(plain, -1)
}

fn shift(text: &str, even_delta: i8) -> Result<String, CliError> {
    if !text.is_ascii() {
        return Err(CliError::args("password scramble only supports ASCII"));
    }
    let shifted: Vec<u8> = text
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let delta = if i % 2 == 0 { even_delta } else { -even_delta };
            b.wrapping_add(delta as u8)
        })
        .collect();
    String::from_utf8(shifted)
        .map_err(|_| CliError::args("password scramble left the ASCII range"))
}
