//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (reserved, unused)         |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 10-19   | input            | Local table reading and schema codes     |
//! | 20-29   | reference        | PubChem / KEGG fetch and lookup codes    |
//! | 30-39   | github           | GitHub download and upload codes         |
//! | 40-49   | validation       | GoodTables validation service codes      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Input (10-19)
// =============================================================================

/// Cannot read or write a local file.
pub const EXIT_IO: u8 = 10;

/// Input exists but a value in it cannot be parsed (bad CID, bad mass).
pub const EXIT_PARSE: u8 = 11;

/// Table schema problem: a required column is missing, or headers
/// disagree at merge time.
pub const EXIT_SCHEMA: u8 = 12;

// =============================================================================
// Reference databases (20-29)
// =============================================================================

/// A reference database could not be reached at all.
pub const EXIT_FETCH: u8 = 20;

/// A row names a PubChem CID the fetched lookup does not hold.
pub const EXIT_LOOKUP: u8 = 21;

// =============================================================================
// GitHub (30-39)
// =============================================================================

/// GitHub rejected the credentials, or an upload was attempted without any.
pub const EXIT_GITHUB_AUTH: u8 = 30;

/// GitHub operation failed (network, HTTP error, malformed response).
pub const EXIT_GITHUB: u8 = 31;

// =============================================================================
// Validation service (40-49)
// =============================================================================

/// GoodTables service unreachable or returned an unusable response.
pub const EXIT_VALIDATION_SERVICE: u8 = 40;
