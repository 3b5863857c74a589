//! # tvname - Release Name Parser
//!
//! Extracts show name, season, episode numbers, air date, release group and
//! quality from TV and anime release names and media file paths.
//!
//! ## Usage
//!
//! ```bash
//! # Parse bare release names
//! tvname parse "Show.Name.S01E02.720p.HDTV.x264-GRP"
//!
//! # Parse file paths, using the parent directory for missing details
//! tvname parse-file "/tv/Show Name/Season 1/s01e02.mkv"
//!
//! # Parse every episode file under a library
//! tvname scan /path/to/media --json --output report.json
//!
//! # List and verify the active naming rules
//! tvname rules --verify
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tvname::commands::{
    parse::{ParseCommand, ParseTarget},
    rules::RulesCommand,
    sanitize::{SanitizeCommand, SanitizeMode},
    scan::ScanCommand,
};
use tvname::config::Config;
use tvname::RuleSet;

/// tvname - Parse TV and anime release names
#[derive(Parser)]
#[command(
    name = "tvname",
    about = "Parse TV and anime release names",
    long_about = "Extracts series, season, episode, air date, release group and quality from release names and media file paths.",
    version
)]
struct Cli {
    /// Embedded rule set to use (overrides TVNAME_RULE_SET)
    #[arg(long, global = true, value_enum)]
    rule_set: Option<RuleSet>,
    /// JSON rule catalog replacing the embedded rules (overrides TVNAME_RULES_FILE)
    #[arg(long = "rules", global = true)]
    rules_file: Option<PathBuf>,
    /// Fail when any rule fails its self-tests instead of disabling it
    #[arg(long, global = true)]
    strict: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Parse bare release names
    Parse {
        /// Release names to parse
        #[arg(required = true)]
        names: Vec<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse media file paths, combining file and directory names
    ParseFile {
        /// File paths to parse
        #[arg(required = true)]
        paths: Vec<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scan a directory and parse every episode file
    Scan {
        /// Path to the media directory to scan
        path: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Also write the JSON report to this file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// List the active naming rules
    Rules {
        /// Re-run every rule's self-tests
        #[arg(long)]
        verify: bool,
    },
    /// Normalize a show name
    Sanitize {
        /// Name to normalize
        name: String,
        #[arg(long, short = 'm', value_enum, default_value_t = SanitizeMode::Clean)]
        mode: SanitizeMode,
    },
}

impl Cli {
    /// Environment configuration with command line overrides applied
    fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;
        if let Some(rule_set) = self.rule_set {
            config.rule_set = rule_set;
        }
        if let Some(rules_file) = &self.rules_file {
            config.rules_file = Some(rules_file.clone());
        }
        if self.strict {
            config.strict_rules = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tvname=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;

    match cli.command {
        Commands::Parse { names, json } => {
            info!("Starting parse command for {} names", names.len());
            let parse_cmd = ParseCommand::new(config.build_parser()?, names, ParseTarget::Name, json);
            let outcome = parse_cmd.execute();
            parse_cmd.print_outcome(&outcome)?;
            if outcome.failures.is_empty() {
                Ok(())
            } else {
                Err(anyhow!("{} names did not match any rule", outcome.failures.len()))
            }
        }
        Commands::ParseFile { paths, json } => {
            info!("Starting parse-file command for {} paths", paths.len());
            let parse_cmd = ParseCommand::new(config.build_parser()?, paths, ParseTarget::File, json);
            let outcome = parse_cmd.execute();
            parse_cmd.print_outcome(&outcome)
        }
        Commands::Scan { path, json, output } => {
            info!("Starting scan command for path: {:?}, output: {:?}", path, output);
            let scan_cmd = ScanCommand::new(path, config.build_parser()?, json, output);
            let report = scan_cmd.execute().await?;
            scan_cmd.print_report(&report)
        }
        Commands::Rules { verify } => {
            let catalog = config.load_catalog().context("Failed to load naming rules")?;
            RulesCommand::new(&catalog, verify).execute()
        }
        Commands::Sanitize { name, mode } => {
            println!("{}", SanitizeCommand::new(name, mode).execute());
            Ok(())
        }
    }
}
