//! Tabbed note editor with a countdown timer, random quotes, Hemingway mode
//! and haiku-gated file deletion.
//!
//! Notes live as plain `.md` files in the data directory (`data/` by
//! default). `notator shell` is the interactive editor.

use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notator::app::Notator;
use notator::exit_codes;
use notator::io::config::{CONFIG_FILE, NotatorConfig, load_config, write_config};
use notator::io::persistence::FsPersistence;
use notator::io::prompts::{SAMPLE_HAIKU, SAMPLE_QUOTES, load_quote_provider};
use notator::logging;
use notator::shell::run_shell;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "notator",
    version,
    about = "Tabbed note editor with timer, quotes and haiku-gated delete"
)]
struct Cli {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Data directory, overriding the config value.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed for quote and haiku selection.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Run the interactive editor (default).
    Shell,
    /// Create the config file, data directory and sample quote/haiku lists.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Print a random quote and exit.
    Quote,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => cmd_shell(config, cli.seed),
        Command::Init { force } => cmd_init(&cli.config, &config, force),
        Command::Quote => cmd_quote(&config, cli.seed),
    }
}

fn cmd_shell(config: NotatorConfig, seed: Option<u64>) -> Result<()> {
    let quotes = load_quote_provider(&config, seed)?;
    let persistence = FsPersistence::new(config.data_dir.clone());
    let mut app = Notator::new(config, persistence, quotes);
    app.restore_session();

    let outcome = run_shell(&mut app, BufReader::new(io::stdin()), io::stdout().lock());
    app.shutdown().context("save session")?;
    outcome
}

fn cmd_init(config_path: &Path, config: &NotatorConfig, force: bool) -> Result<()> {
    if force || !config_path.exists() {
        write_config(config_path, config)
            .with_context(|| format!("write {}", config_path.display()))?;
    }
    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("create data directory {}", config.data_dir.display()))?;
    write_if_missing_or_force(&config.quotes_path(), SAMPLE_QUOTES, force)?;
    write_if_missing_or_force(&config.haiku_path(), SAMPLE_HAIKU, force)?;
    info!(data_dir = %config.data_dir.display(), "initialized");
    println!("initialized {}", config.data_dir.display());
    Ok(())
}

fn cmd_quote(config: &NotatorConfig, seed: Option<u64>) -> Result<()> {
    let mut quotes = load_quote_provider(config, seed)?;
    println!("{}", quotes.random_quote());
    Ok(())
}

fn write_if_missing_or_force(path: &Path, contents: &str, force: bool) -> Result<()> {
    if !force && path.exists() {
        return Ok(());
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
