// ccstab CLI - curated compound reference table maintenance

mod credentials;
mod exit_codes;
mod fetch;
mod process;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ccstab_github_client::{auth_file_path, delete_auth, load_auth, save_auth, StoredCredentials};

// Exit codes come from the registry module; never hardcode one here
use exit_codes::{EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "ccstab")]
#[command(about = "Curated compound reference table maintenance")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submission against the reference databases and merge it
    /// into the hosted table
    #[command(after_help = "\
Examples:
  ccstab process NewMetabolites.tsv
  ccstab process NewMetabolites.tsv -i
  ccstab process NewMetabolites.tsv --preview
  ccstab process NewMetabolites.tsv --user MyUsername --password '*Dfw3gf'")]
    Process {
        /// Tab-delimited submission with the compounds to add
        input: PathBuf,

        /// Skip reference validation and merge everything
        #[arg(long, short = 'i')]
        ignore_validation: bool,

        /// Print what would be pushed instead of pushing it
        #[arg(long)]
        preview: bool,

        /// GitHub username
        #[arg(long, env = "CCSTAB_GITHUB_USER")]
        user: Option<String>,

        /// GitHub token or password; prefix with * if scrambled
        #[arg(long, env = "CCSTAB_GITHUB_TOKEN")]
        password: Option<String>,

        /// Repository owner
        #[arg(long, default_value = "PNNL-Comp-Mass-Spec")]
        owner: String,

        /// Repository name
        #[arg(long, default_value = "MetabolomicsCCS")]
        repo: String,

        /// Branch to read from and push to
        #[arg(long, default_value = "master")]
        branch: String,

        /// Directory the report files are written into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Commit message for the pushed files
        #[arg(long, default_value = "Updated data")]
        message: String,

        /// PubChem PUG REST base URL
        #[arg(long, env = "CCSTAB_PUBCHEM_BASE", default_value = fetch::DEFAULT_PUBCHEM_BASE)]
        pubchem_base: String,

        /// KEGG REST base URL
        #[arg(long, env = "CCSTAB_KEGG_BASE", default_value = fetch::DEFAULT_KEGG_BASE)]
        kegg_base: String,

        /// GoodTables service base URL
        #[arg(long, env = "CCSTAB_GOODTABLES_BASE", default_value = fetch::DEFAULT_GOODTABLES_BASE)]
        goodtables_base: String,

        /// Table schema the validation service checks against
        #[arg(long, env = "CCSTAB_SCHEMA_URL", default_value = fetch::DEFAULT_SCHEMA_URL)]
        schema_url: String,

        /// GitHub API base URL (for GitHub Enterprise)
        #[arg(long, env = "CCSTAB_GITHUB_API_BASE")]
        github_api_base: Option<String>,
    },

    /// Render a local table in the Agilent CCS layout
    #[command(after_help = "\
Examples:
  ccstab agilent metabolitedata.tsv
  ccstab agilent metabolitedata.tsv -o metabolitedataAgilent.tsv")]
    Agilent {
        /// Tab-delimited table to render
        input: PathBuf,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Scramble a password; the output is ready for --password
    Scramble {
        /// Plain-text password to scramble
        password: String,
    },

    /// Manage stored GitHub credentials
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Store credentials in the user config directory
    Set {
        /// GitHub username
        #[arg(long)]
        user: String,

        /// GitHub token or password; prefix with * if scrambled
        #[arg(long)]
        token: String,
    },

    /// Show whether credentials are stored and for which user
    Status,

    /// Delete the stored credentials
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            input,
            ignore_validation,
            preview,
            user,
            password,
            owner,
            repo,
            branch,
            out_dir,
            message,
            pubchem_base,
            kegg_base,
            goodtables_base,
            schema_url,
            github_api_base,
        } => run_process(
            input,
            ignore_validation,
            preview,
            user,
            password,
            owner,
            repo,
            branch,
            out_dir,
            message,
            pubchem_base,
            kegg_base,
            goodtables_base,
            schema_url,
            github_api_base,
        ),
        Commands::Agilent { input, output } => process::cmd_agilent(input, output),
        Commands::Scramble { password } => cmd_scramble(&password),
        Commands::Auth { command } => cmd_auth(command),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_process(
    input: PathBuf,
    ignore_validation: bool,
    preview: bool,
    user: Option<String>,
    password: Option<String>,
    owner: String,
    repo: String,
    branch: String,
    out_dir: PathBuf,
    message: String,
    pubchem_base: String,
    kegg_base: String,
    goodtables_base: String,
    schema_url: String,
    github_api_base: Option<String>,
) -> Result<(), CliError> {
    let pubchem_base = fetch::parse_base_url("--pubchem-base", &pubchem_base)?;
    let kegg_base = fetch::parse_base_url("--kegg-base", &kegg_base)?;
    let goodtables_base = fetch::parse_base_url("--goodtables-base", &goodtables_base)?;
    let github_api_base = match github_api_base {
        Some(base) => Some(fetch::parse_base_url("--github-api-base", &base)?),
        None => None,
    };

    process::cmd_process(process::ProcessOptions {
        input,
        ignore_validation,
        preview,
        user,
        password,
        owner,
        repo,
        branch,
        out_dir,
        message,
        pubchem_base,
        kegg_base,
        goodtables_base,
        schema_url,
        github_api_base,
    })
}

// ============================================================================
// scramble
// ============================================================================

fn cmd_scramble(password: &str) -> Result<(), CliError> {
    let scrambled = credentials::encode_password(password)?;
    println!("*{}", scrambled);
    Ok(())
}

// ============================================================================
// auth
// ============================================================================

fn cmd_auth(command: AuthCommands) -> Result<(), CliError> {
    match command {
        AuthCommands::Set { user, token } => {
            let token = match token.strip_prefix('*') {
                Some(scrambled) => credentials::decode_password(scrambled)?,
                None => token,
            };
            save_auth(&StoredCredentials::new(user, token))
                .map_err(|e| CliError::io(e.to_string()))?;
            if let Some(path) = auth_file_path() {
                eprintln!("stored credentials in {}", path.display());
            }
            Ok(())
        }
        AuthCommands::Status => {
            match load_auth() {
                Some(creds) => println!("authenticated as {}", creds.username),
                None => println!("no stored credentials"),
            }
            Ok(())
        }
        AuthCommands::Clear => {
            delete_auth().map_err(|e| CliError::io(e.to_string()))?;
            println!("cleared stored credentials");
            Ok(())
        }
    }
}

// ============================================================================
// Error plumbing
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
