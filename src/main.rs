//! Glyph Recognizer - drawn-shape identification from sensor traces
//!
//! Stores reference glyphs, identifies new drawings against them, and plays
//! tic-tac-toe with drawings as the input modality.

use glyph_recognizer::app::cli::{Cli, Commands};
use glyph_recognizer::app::config::Config;
use glyph_recognizer::game::GameSession;
use glyph_recognizer::store::{JsonPatternStore, PatternStore};
use glyph_recognizer::trace::{PromptSource, RawTrace};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Store { label, trace } => {
            run_store(&label, &trace, &config)?;
        }
        Commands::Check { trace } => {
            run_check(&trace, &config)?;
        }
        Commands::List { detailed } => {
            run_list(detailed, &config)?;
        }
        Commands::Play => {
            run_play(&config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
    }

    Ok(())
}

fn run_store(label: &str, trace_path: &Path, config: &Config) -> anyhow::Result<()> {
    info!(label, trace = %trace_path.display(), "Recording reference pattern");

    if !trace_path.exists() {
        anyhow::bail!("Trace file not found: {:?}", trace_path);
    }

    let raw = RawTrace::load(trace_path)?;
    if raw.is_empty() {
        anyhow::bail!("No coordinates in {:?}. Check if the sensor captured anything.", trace_path);
    }

    let store = JsonPatternStore::new(config.store.resolved_library_path());
    let classifier = config.classifier();

    let shape = classifier.store_pattern(&store, label, &raw)?;
    println!(
        "Pattern '{}' saved successfully ({} points, library: {}).",
        label,
        shape.len(),
        store.path().display()
    );
    Ok(())
}

fn run_check(trace_path: &Path, config: &Config) -> anyhow::Result<()> {
    info!(trace = %trace_path.display(), "Classifying trace");

    if !trace_path.exists() {
        anyhow::bail!("Trace file not found: {:?}", trace_path);
    }

    let raw = RawTrace::load(trace_path)?;
    let store = JsonPatternStore::new(config.store.resolved_library_path());
    let classifier = config.classifier();

    match classifier.classify_pattern(&store, &raw) {
        Ok(Some(m)) => {
            println!("Matched '{}' (similarity {:.4})", m.label, m.similarity);
        }
        Ok(None) => {
            println!("No reliable match found.");
        }
        Err(e) if e.is_retryable() => {
            // Bad input is a retry condition, not a failure of the tool.
            println!("No reliable match found: {e}. Please redraw and try again.");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn run_list(detailed: bool, config: &Config) -> anyhow::Result<()> {
    let store = JsonPatternStore::new(config.store.resolved_library_path());
    let library = store.load();

    if library.is_empty() {
        println!("No reference patterns found.");
        println!("Record one with: glyph-rec store --label <name> --trace <file>");
        return Ok(());
    }

    println!("Reference patterns in {}:", store.path().display());
    for (label, shape) in library.iter() {
        if detailed {
            println!("  {}  ({} points)", label, shape.len());
        } else {
            println!("  {label}");
        }
    }
    Ok(())
}

fn run_play(config: &Config) -> anyhow::Result<()> {
    let store = JsonPatternStore::new(config.store.resolved_library_path());
    let library = store.load();

    if library.is_empty() {
        anyhow::bail!(
            "The reference library is empty. Record 'X', 'O' and digits 1-9 with \
             'glyph-rec store' before playing."
        );
    }
    for required in ["X", "O"] {
        if !library.contains(required) {
            anyhow::bail!("Missing reference pattern '{}' needed for symbol choice.", required);
        }
    }

    let timeout = Duration::from_secs(config.sensor.timeout_secs);
    let source = PromptSource::stdio();
    let mut session = GameSession::new(source, config.classifier(), library, timeout);
    session.play()?;
    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    let library_path = config.store.resolved_library_path();
    if let Some(parent) = library_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    println!("Reference library location: {:?}", library_path);

    Ok(())
}
