//! Istimara CLI
//!
//! Command-line interface for the Istimara forms platform.
//!
//! # Usage
//!
//! ```bash
//! istimara forms list
//! istimara forms create -f survey.json
//! istimara forms export 7 --format excel
//! istimara submit 7 --answers answers.json --name "Ali Kareem"
//! istimara intake feedback -f complaint.json
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use istimara_client::{Credential, HttpFormsApi};

const DEFAULT_API_URL: &str = "https://forms.cabinet.gov.iq";

#[derive(Parser)]
#[command(name = "istimara")]
#[command(version)]
#[command(about = "Istimara forms platform CLI", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "ISTIMARA_API_URL")]
    api_url: Option<String>,

    /// Bearer token for authenticated operations
    #[arg(long, env = "ISTIMARA_TOKEN")]
    token: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    format: output::OutputFormat,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage custom forms
    Forms {
        #[command(subcommand)]
        action: FormCommands,
    },
    /// Submit answers to a published form
    Submit {
        /// Form id
        form_id: u64,
        /// JSON file mapping field ids (or labels) to answers
        #[arg(long)]
        answers: PathBuf,
        /// Submitter name; omitted means anonymous
        #[arg(long)]
        name: Option<String>,
        /// Submitter email
        #[arg(long)]
        email: Option<String>,
    },
    /// Submit one of the fixed intake forms
    Intake {
        #[command(subcommand)]
        action: IntakeCommands,
    },
    /// Configure the CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum FormCommands {
    /// List forms (public by default, owned with --managed)
    List {
        #[arg(long)]
        managed: bool,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },
    /// Create a form from a JSON definition file
    Create {
        #[arg(long, short)]
        file: PathBuf,
    },
    /// Open a form for responses
    Activate { id: u64 },
    /// Stop accepting responses
    Deactivate { id: u64 },
    /// Delete a form and its responses
    Delete { id: u64 },
    /// Duplicate a form (copy starts inactive)
    Duplicate { id: u64 },
    /// List a form's responses
    Responses { id: u64 },
    /// Download rendered responses
    Export {
        id: u64,
        #[arg(long, value_enum, default_value = "excel")]
        format: commands::forms::ExportArg,
        /// Output file; defaults to form_responses_<id>.<ext>
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum IntakeCommands {
    /// Government-entity registration from a JSON file
    Entity {
        #[arg(long, short)]
        file: PathBuf,
    },
    /// Citizen feedback from a JSON file
    Feedback {
        #[arg(long, short)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the active configuration
    Show,
    /// Persist endpoint and credential defaults
    Set {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::Config::load(cli.profile.as_deref())?;

    if let Commands::Config { action } = &cli.command {
        return commands::config::handle(action, cli.profile.as_deref(), config);
    }

    let api_url = cli
        .api_url
        .clone()
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let token = cli.token.clone().or_else(|| config.token.clone());
    let api = HttpFormsApi::new(api_url, token.map(Credential::new));

    match cli.command {
        Commands::Forms { action } => commands::forms::handle(action, &api, cli.format).await,
        Commands::Submit {
            form_id,
            answers,
            name,
            email,
        } => commands::submit::handle(&api, form_id, &answers, name, email).await,
        Commands::Intake { action } => commands::intake::handle(action, &api).await,
        Commands::Config { .. } => Ok(()),
    }
}
