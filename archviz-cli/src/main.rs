//! Archviz CLI - Command-line interface for Archviz
//!
//! Analyzes a local git repository and prints the report as JSON

use anyhow::{bail, Context};
use archviz_core::{
    init_logging, log_operation_error, log_operation_start, log_operation_success,
    ArchvizConfig, ArchvizResult, DiagramProvider,
};
use archviz_repo::{FileFilter, RepositoryAnalyzer};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "archviz")]
#[command(about = "Repository structure, data model and history analysis")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a local repository and print the report as JSON
    Analyze {
        /// Path to the repository root
        repo: PathBuf,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,

        /// Skip diagram generation
        #[arg(long)]
        no_diagram: bool,
    },

    /// Manage configuration
    Config {
        /// Write a default configuration file (to PATH, or the user config directory)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        init: Option<Option<PathBuf>>,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,

        /// Show the effective configuration
        #[arg(long)]
        show: bool,

        /// Validate the effective configuration
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = load_config(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
        config.logging.filter_directives.clear();
    }

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Archviz CLI v{}", env!("CARGO_PKG_VERSION"));
    match &source {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("No configuration file found, using defaults"),
    }

    match cli.command {
        Commands::Analyze {
            repo,
            output,
            pretty,
            no_diagram,
        } => {
            handle_analyze(&repo, output.as_deref(), pretty, no_diagram, &config)
                .await
                .with_context(|| format!("Failed to analyze {}", repo.display()))?;
        }
        Commands::Config {
            init,
            force,
            show,
            validate,
        } => {
            handle_config(init, force, show, validate, &config)?;
        }
    }

    Ok(())
}

/// Load the file named by `--config`, or the first default location that exists
fn load_config(config_path: Option<&Path>) -> ArchvizResult<(ArchvizConfig, Option<PathBuf>)> {
    if let Some(path) = config_path {
        return Ok((ArchvizConfig::from_file(path)?, Some(path.to_path_buf())));
    }

    for path in default_config_paths() {
        if path.exists() {
            return Ok((ArchvizConfig::from_file(&path)?, Some(path)));
        }
    }

    Ok((ArchvizConfig::default(), None))
}

fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|d| d.join("archviz").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".archviz").join("config.toml")),
        Some(PathBuf::from("archviz.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Get the default configuration file path
fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
        .map(|d| d.join("archviz").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("archviz.toml"))
}

async fn handle_analyze(
    repo: &Path,
    output: Option<&Path>,
    pretty: bool,
    no_diagram: bool,
    config: &ArchvizConfig,
) -> ArchvizResult<()> {
    log_operation_start!("analyze_repository", repo = %repo.display());

    let mut config = config.clone();
    if no_diagram {
        config.diagram.provider = DiagramProvider::Disabled;
    }

    let analyzer = RepositoryAnalyzer::from_config(&config)?;
    let report = analyzer.analyze(repo).await.map_err(|e| {
        log_operation_error!("analyze_repository", e, repo = %repo.display());
        e
    })?;

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            eprintln!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    log_operation_success!("analyze_repository",
        repo = %repo.display(),
        files = report.file_count,
        lines = report.total_line_count,
        commits = report.git_commits.len()
    );
    Ok(())
}

fn handle_config(
    init: Option<Option<PathBuf>>,
    force: bool,
    show: bool,
    validate: bool,
    config: &ArchvizConfig,
) -> anyhow::Result<()> {
    if let Some(target) = init {
        let path = target.unwrap_or_else(get_config_path);
        init_config_file(&path, force)?;
        println!("Configuration initialized at: {}", path.display());
        println!("Edit the file to change exclusions or the diagram command.");
    }

    if show {
        let rendered =
            toml::to_string_pretty(config).context("Failed to render configuration")?;
        println!("{}", rendered);
    }

    if validate {
        config.validate()?;
        // Patterns only fail when compiled
        FileFilter::from_config(&config.analysis)?;
        println!("Configuration is valid");
    }

    Ok(())
}

fn init_config_file(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    ArchvizConfig::default().save_to_file(path)?;
    Ok(())
}
