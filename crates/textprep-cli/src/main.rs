//! textprep CLI - plain-text summaries of security advisories
//!
//! Commands: errata, affects-rhel, sections, links

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use textprep_errata::{affects_rhel_with, load_errata, parse_with, ErrataConfig, LinkCleaner};

#[derive(Parser)]
#[command(name = "textprep")]
#[command(version)]
#[command(about = "Turn security advisories into plain-text summaries")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// TOML file overriding field names and cleaning switches
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the plain-text summary of an advisory
    Errata { path: PathBuf },
    /// Exit 0 if the advisory lists a Red Hat Enterprise Linux product, 1 otherwise
    AffectsRhel { path: PathBuf },
    /// Print the frontmatter and sections of an advisory as JSON
    Sections {
        path: PathBuf,
        /// Keep empty and "(none)" sections
        #[arg(long)]
        keep_empty: bool,
    },
    /// Flatten markdown links read from stdin
    Links {
        /// Leave <https://...> URLs wrapped in angle brackets
        #[arg(long)]
        keep_angle_brackets: bool,
    },
}

/// Install the global subscriber. `RUST_LOG` wins over the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ErrataConfig> {
    let Some(path) = path else {
        return Ok(ErrataConfig::default());
    };
    match ErrataConfig::load_from_path(path)? {
        Some(config) => {
            tracing::debug!(path = %path.display(), "using config file");
            Ok(config)
        }
        None => bail!("config file not found: {}", path.display()),
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Errata { path } => {
            let summary = parse_with(&path, &config)
                .with_context(|| format!("failed to summarise {}", path.display()))?;
            println!("{summary}");
        }
        Commands::AffectsRhel { path } => {
            let affected = affects_rhel_with(&path, &config)
                .with_context(|| format!("failed to read {}", path.display()))?;
            println!("{affected}");
            if !affected {
                return Ok(ExitCode::from(1));
            }
        }
        Commands::Sections { path, keep_empty } => {
            let mut doc = load_errata(&path)
                .with_context(|| format!("failed to split {}", path.display()))?;
            if !keep_empty {
                doc = doc.without_empty_sections();
            }
            doc.sections
                .retain(|s| !s.name().is_some_and(|name| config.is_excluded(name)));
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Commands::Links {
            keep_angle_brackets,
        } => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            let cleaner = if keep_angle_brackets {
                LinkCleaner::new(false)
            } else {
                config.link_cleaner()
            };
            println!("{}", cleaner.clean(&input));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
