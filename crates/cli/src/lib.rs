//! # CodeVision CLI
//!
//! `codevision` drives the import pipeline from a terminal and persists the
//! results in the keyed project store.
//!
//! ```text
//! codevision import remote <URL> [--offline]
//! codevision import local [PATH]      # prompts when PATH is omitted
//! codevision list
//! codevision show <ID>
//! codevision validate <LOCATOR>
//! ```
//!
//! Every command accepts `--json`; failures are translated by the domain
//! error handler before they reach the user.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use codevision_domain::{report, ErrorReport, ErrorState, ImportError, Project};
use codevision_import::{
    parse_remote_locator, DirectoryHost, FsDirectoryHost, GitHubApiSource, ImportService,
    Importer, RemoteSource, SyntheticSource,
};
use codevision_store::{FileKeyValueStore, KeyedProjectRepository, ProjectRepository};
use console::style;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

pub mod config;
pub mod prompt;
mod render;

use config::CliConfig;
use prompt::PromptDirectoryHost;

type Repository = KeyedProjectRepository<FileKeyValueStore>;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "codevision")]
#[command(about = "Import repositories and local directories as CodeVision projects", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Print machine-readable JSON on stdout (implies --quiet)
    #[arg(long, global = true)]
    json: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Project store directory (overrides config and CODEVISION_STORE_DIR)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a project and save it
    Import(ImportArgs),

    /// List saved projects
    List,

    /// Show one saved project with its tree
    Show(ShowArgs),

    /// Check whether a repository URL is importable
    Validate(ValidateArgs),
}

#[derive(Args)]
struct ImportArgs {
    #[command(subcommand)]
    command: ImportCommand,
}

#[derive(Subcommand)]
enum ImportCommand {
    /// Import a GitHub repository by URL
    Remote(RemoteArgs),

    /// Import a directory on this machine
    Local(LocalArgs),
}

#[derive(Args)]
struct RemoteArgs {
    /// Repository URL, e.g. https://github.com/owner/repo
    url: String,

    /// Use the built-in synthetic listing instead of the GitHub API
    #[arg(long)]
    offline: bool,
}

#[derive(Args)]
struct LocalArgs {
    /// Directory to import; asks interactively when omitted
    path: Option<PathBuf>,
}

#[derive(Args)]
struct ShowArgs {
    /// Project id
    id: String,
}

#[derive(Args)]
struct ValidateArgs {
    /// Repository URL to check
    locator: String,
}

pub async fn main_entry() -> Result<ExitCode> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let json = cli.json;
    match run(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => present_failure(&err, json),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.store_dir {
        config.store.dir = dir;
    }
    log::debug!("Project store at {}", config.store.dir.display());

    let repo = KeyedProjectRepository::with_key(
        FileKeyValueStore::new(&config.store.dir),
        config.store.key.clone(),
    );

    match cli.command {
        Commands::Import(args) => run_import(args.command, &config, &repo, cli.json).await,
        Commands::List => run_list(&repo, cli.json).await,
        Commands::Show(args) => run_show(args, &repo, cli.json).await,
        Commands::Validate(args) => run_validate(args, cli.json),
    }
}

async fn run_import(
    command: ImportCommand,
    config: &CliConfig,
    repo: &Repository,
    json: bool,
) -> Result<()> {
    let (importer, locator) = match command {
        ImportCommand::Remote(args) => {
            let source: Arc<dyn RemoteSource> = if args.offline || config.offline {
                log::info!("Offline mode: using the synthetic listing");
                Arc::new(SyntheticSource)
            } else {
                Arc::new(GitHubApiSource::new(&config.import)?)
            };
            (Importer::remote(source, config.import.clone()), Some(args.url))
        }
        ImportCommand::Local(args) => {
            let host: Arc<dyn DirectoryHost> = match args.path {
                Some(path) => Arc::new(FsDirectoryHost::new(path)),
                None => Arc::new(PromptDirectoryHost::new()),
            };
            (Importer::local(host, config.import.clone()), None)
        }
    };

    log::debug!("Running {} import", importer.kind());
    let project = match locator {
        Some(url) => importer.import_from_remote(&url).await?,
        None => importer.import_from_local_tree().await?,
    };

    let project = repo
        .save(project)
        .await
        .context("Failed to save project")?;

    if json {
        print_json(&project)
    } else {
        print_stdout(&render::render_summary(&project))
    }
}

async fn run_list(repo: &Repository, json: bool) -> Result<()> {
    let projects = repo.find_all().await.context("Failed to load projects")?;
    if json {
        print_json(&projects)
    } else {
        print_stdout(&render::render_list(&projects))
    }
}

async fn run_show(args: ShowArgs, repo: &Repository, json: bool) -> Result<()> {
    let project: Project = repo
        .find_by_id(&args.id)
        .await
        .context("Failed to load projects")?
        .with_context(|| format!("Project {} not found", args.id))?;
    if json {
        print_json(&project)
    } else {
        print_stdout(&render::render_project(&project))
    }
}

fn run_validate(args: ValidateArgs, json: bool) -> Result<()> {
    let locator = parse_remote_locator(&args.locator)
        .ok_or_else(|| ImportError::invalid_locator(args.locator.clone()))?;
    if json {
        print_json(&serde_json::json!({
            "locator": args.locator,
            "valid": true,
            "owner": locator.owner,
            "repo": locator.repo,
        }))
    } else {
        print_stdout(&format!(
            "{} {}/{}",
            style("valid").green().bold(),
            locator.owner,
            locator.repo
        ))
    }
}

/// How a failed command ends for the user
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// The user backed out; not an error
    Cancelled,
    Failed(ErrorState),
}

impl Outcome {
    fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Cancelled => ExitCode::SUCCESS,
            Outcome::Failed(_) => ExitCode::FAILURE,
        }
    }
}

/// Route a failure through the error handler; cancellation is not a failure.
fn failure_outcome(err: &anyhow::Error) -> Outcome {
    let import = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ImportError>());

    if import.is_some_and(|e| e.is_cancelled()) {
        return Outcome::Cancelled;
    }

    let failure = match import {
        Some(import) => ErrorReport::from(import),
        None => ErrorReport::new(None, Some(&format!("{err:#}"))),
    };
    Outcome::Failed(report(&failure))
}

fn present_failure(err: &anyhow::Error, json: bool) -> Result<ExitCode> {
    let outcome = failure_outcome(err);
    match &outcome {
        Outcome::Cancelled if json => print_json(&serde_json::json!({ "cancelled": true }))?,
        Outcome::Cancelled => eprintln!("{}", style("Importación cancelada").yellow()),
        Outcome::Failed(state) if json => print_json(state)?,
        Outcome::Failed(state) => {
            eprintln!("{} {}", style("error:").red().bold(), state.message)
        }
    }
    Ok(outcome.exit_code())
}
