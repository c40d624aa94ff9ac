//! `ccstab process`: validate a submission against the reference databases
//! and merge the surviving rows into the hosted table on GitHub.
//!
//! Stream discipline: progress and warnings go to stderr; stdout carries
//! the preview text (with `--preview`) and the final JSON run summary.

use std::collections::HashMap;
use std::path::PathBuf;

use ccstab_curate::{CurateError, CurationSummary};
use ccstab_github_client::{preview_text, GithubClient, GithubError};
use ccstab_refdata::ReferenceLookup;
use ccstab_table::{to_agilent, Table, TableError};

use crate::credentials;
use crate::exit_codes;
use crate::fetch;
use crate::util;
use crate::CliError;

// ── Constants ───────────────────────────────────────────────────────

/// Hosted table path inside the repository.
const MASTER_TSV_PATH: &str = "data/metabolitedata.tsv";
/// Derived Agilent export path inside the repository.
const AGILENT_TSV_PATH: &str = "data/metabolitedataAgilent.tsv";

const DUPLICATE_ROWS_FILE: &str = "DuplicateRows.tsv";
const WARNING_ROWS_FILE: &str = "WarningFile.tsv";
const MISSING_KEGG_FILE: &str = "NoKeggFile.tsv";
const VALIDATION_REPORT_FILE: &str = "ValidationApi.txt";
const GOODTABLES_OUTPUT_FILE: &str = "GoodTablesApiOutput.txt";

// ── Options ─────────────────────────────────────────────────────────

/// Everything `ccstab process` needs, resolved from flags and environment
/// by `main`.
pub struct ProcessOptions {
    pub input: PathBuf,
    pub ignore_validation: bool,
    pub preview: bool,
    pub user: Option<String>,
    pub password: Option<String>,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub out_dir: PathBuf,
    pub message: String,
    pub pubchem_base: String,
    pub kegg_base: String,
    pub goodtables_base: String,
    pub schema_url: String,
    pub github_api_base: Option<String>,
}

// ── Entry point ─────────────────────────────────────────────────────

pub fn cmd_process(opts: ProcessOptions) -> Result<(), CliError> {
    let content = util::read_file_as_utf8(&opts.input)?;
    let mut candidate = Table::parse(&content, '\t', true);
    for warning in candidate.warnings() {
        eprintln!("warning: {}: {}", opts.input.display(), warning);
    }
    eprintln!(
        "Found {} records in local file {}",
        candidate.len(),
        opts.input.display(),
    );
    let submitted = candidate.len();

    let renames = header_renames();
    candidate.update_headers(&renames);

    let github = build_github(&opts)?;
    let mut main_table = match github.get_file(MASTER_TSV_PATH).map_err(github_error)? {
        Some(remote) => {
            let table = Table::parse(&remote.content, '\t', true);
            eprintln!(
                "Found {} records in {} retrieved from GitHub",
                table.len(),
                MASTER_TSV_PATH,
            );
            table
        }
        // First run against an empty repository: adopt the submission's schema
        None => candidate.empty_like(),
    };
    main_table.update_headers(&renames);

    let mut validation = "skipped";
    let mut reports: Vec<String> = Vec::new();
    let mut engine_summary: Option<CurationSummary> = None;

    let duplicate_count;
    let merge_ready;

    if !opts.ignore_validation {
        let lookup = build_lookup(&opts, &candidate)?;
        let result = ccstab_curate::run(candidate, &main_table, &lookup).map_err(curate_error)?;

        if !result.merge_ready.is_empty() {
            eprintln!("Validating data file with GoodTables");
            match fetch::validate_table(
                &opts.goodtables_base,
                &opts.schema_url,
                &result.merge_ready.serialize(true),
            ) {
                Ok(verdict) if verdict.success => validation = "passed",
                Ok(verdict) => {
                    validation = "failed";
                    let path = opts.out_dir.join(GOODTABLES_OUTPUT_FILE);
                    let pretty = serde_json::to_string_pretty(&verdict.raw)
                        .unwrap_or_else(|_| verdict.raw.to_string());
                    util::write_file(&path, &pretty)?;
                    reports.push(path.display().to_string());
                    eprintln!("GoodTables reports errors; see {}", GOODTABLES_OUTPUT_FILE);
                    eprintln!(
                        "Note that data with N/A in columns that expect a number will be \
                         flagged as an error by GoodTables; those errors can be ignored",
                    );
                }
                Err(e) => {
                    validation = "unavailable";
                    eprintln!("warning: table validation skipped: {}", e.message);
                }
            }
        }

        for (name, content) in [
            (VALIDATION_REPORT_FILE, result.diagnostics.clone()),
            (DUPLICATE_ROWS_FILE, result.duplicates.serialize(true)),
            (WARNING_ROWS_FILE, result.mismatches.serialize(true)),
            (MISSING_KEGG_FILE, result.missing_reference.serialize(true)),
        ] {
            let path = opts.out_dir.join(name);
            util::write_file(&path, &content)?;
            reports.push(path.display().to_string());
        }

        if result.summary.mismatches > 0 {
            eprintln!("Warnings were encountered; see file {}", WARNING_ROWS_FILE);
        }
        if result.summary.missing_reference > 0 {
            eprintln!("Warnings were encountered; see file {}", MISSING_KEGG_FILE);
        }

        duplicate_count = result.summary.duplicates;
        engine_summary = Some(result.summary);
        merge_ready = result.merge_ready;
    } else {
        eprintln!("Ignoring validation, skipping to file upload.");
        duplicate_count = 0;
        merge_ready = candidate;
    }

    let mut disposition = "none";
    let mut pushed: Vec<serde_json::Value> = Vec::new();

    if merge_ready.is_empty() {
        eprintln!(
            "No new compounds were found; see {} for the {} skipped compounds",
            DUPLICATE_ROWS_FILE, duplicate_count,
        );
    } else {
        main_table.concat(merge_ready).map_err(schema_error)?;

        let main_text = main_table.serialize(true);
        let agilent_text = to_agilent(&main_table).map_err(schema_error)?;

        if opts.preview {
            disposition = "preview";
            println!("{}", preview_text(MASTER_TSV_PATH, &main_text));
            println!("{}", preview_text(AGILENT_TSV_PATH, &agilent_text));
        } else {
            disposition = "uploaded";
            for (path, text) in [(MASTER_TSV_PATH, &main_text), (AGILENT_TSV_PATH, &agilent_text)] {
                let outcome = github.upload(path, text, &opts.message).map_err(github_error)?;
                eprintln!("{} {}", path, outcome);
                pushed.push(serde_json::json!({
                    "path": path,
                    "outcome": outcome.to_string(),
                }));
            }
        }
    }

    let summary = serde_json::json!({
        "input": opts.input.display().to_string(),
        "submitted_rows": submitted,
        "duplicates": engine_summary.map(|s| s.duplicates),
        "valid": engine_summary.map(|s| s.valid),
        "missing_reference": engine_summary.map(|s| s.missing_reference),
        "mismatches": engine_summary.map(|s| s.mismatches),
        "validation": validation,
        "reports": reports,
        "upload": { "disposition": disposition, "files": pushed },
        "finished_at": chrono::Utc::now().to_rfc3339(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).unwrap_or_else(|_| summary.to_string()),
    );

    Ok(())
}

/// `ccstab agilent`: render the Agilent layout for a local table.
pub fn cmd_agilent(input: PathBuf, output: Option<PathBuf>) -> Result<(), CliError> {
    let content = util::read_file_as_utf8(&input)?;
    let mut table = Table::parse(&content, '\t', true);
    table.update_headers(&header_renames());

    let rendered = to_agilent(&table).map_err(schema_error)?;
    match output {
        Some(path) => util::write_file(&path, &rendered)?,
        None => print!("{}", rendered),
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Legacy submissions name the CID column `cid`.
fn header_renames() -> HashMap<String, String> {
    HashMap::from([("cid".to_string(), "PubChem CID".to_string())])
}

fn build_github(opts: &ProcessOptions) -> Result<GithubClient, CliError> {
    let creds = credentials::resolve(opts.user.clone(), opts.password.clone())?;
    let mut github = GithubClient::new(&opts.owner, &opts.repo).with_branch(&opts.branch);
    if let Some(base) = &opts.github_api_base {
        github = github.with_api_base(base);
    }
    if let Some(creds) = creds {
        github = github.with_credentials(creds);
    }
    Ok(github)
}

/// Collect ids from the candidate and fetch both reference sources.
/// Unparseable CID cells are left for the curation engine, which reports
/// them with their source line.
fn build_lookup(opts: &ProcessOptions, candidate: &Table) -> Result<ReferenceLookup, CliError> {
    let cids: Vec<u64> = candidate
        .column("pubchem cid")
        .map_err(schema_error)?
        .iter()
        .filter(|v| !v.is_empty())
        .filter_map(|v| v.parse().ok())
        .collect();
    let kegg_ids: Vec<String> = candidate
        .column("kegg")
        .map_err(schema_error)?
        .iter()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect();

    let mut lookup = ReferenceLookup::new();
    eprintln!("Fetching {} compounds from PubChem", cids.len());
    fetch::fetch_pubchem(&opts.pubchem_base, &cids, &mut lookup)?;
    eprintln!("Fetching {} entries from KEGG", kegg_ids.len());
    fetch::fetch_kegg(&opts.kegg_base, &kegg_ids, &mut lookup)?;
    Ok(lookup)
}

// ── Error mapping ───────────────────────────────────────────────────

fn curate_error(err: CurateError) -> CliError {
    let code = match &err {
        CurateError::MissingColumn { .. } | CurateError::Table(_) => exit_codes::EXIT_SCHEMA,
        CurateError::InvalidPubchemId { .. } | CurateError::InvalidMass { .. } => {
            exit_codes::EXIT_PARSE
        }
        CurateError::MissingReferenceLookup { .. } => exit_codes::EXIT_LOOKUP,
    };
    let hint = match &err {
        CurateError::MissingReferenceLookup { .. } => Some(
            "the reference fetch may have skipped a failing batch; rerun or check the CID"
                .to_string(),
        ),
        _ => None,
    };
    CliError { code, message: err.to_string(), hint }
}

fn schema_error(err: TableError) -> CliError {
    CliError { code: exit_codes::EXIT_SCHEMA, message: err.to_string(), hint: None }
}

fn github_error(err: GithubError) -> CliError {
    let code = match &err {
        GithubError::NotAuthenticated | GithubError::Http(401, _) | GithubError::Http(403, _) => {
            exit_codes::EXIT_GITHUB_AUTH
        }
        _ => exit_codes::EXIT_GITHUB,
    };
    let hint = match &err {
        GithubError::NotAuthenticated => Some(
            "store credentials with `ccstab auth set` or pass --user and --password".to_string(),
        ),
        _ => None,
    };
    CliError { code, message: err.to_string(), hint }
}

// ── Tests ───────────────────────────────────────────────────────────
