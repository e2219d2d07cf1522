//! # liqhl-cli
//!
//! Command-line front end for the Liquidsoap highlighter.
//!
//! Dumps the token stream of a script, renders it highlighted for the
//! terminal or as HTML markup, or prints its detection relevance.

mod config;
mod errors;
mod render;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use config::{Config, OutputFormat};
use liqhl::{ALIASES, LANGUAGE_ID, Language, MIN_RELEVANCE, Scanner, is_liquidsoap};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, warn};

#[derive(Parser)]
#[command(name = "liqhl")]
#[command(about = "Liquidsoap syntax highlighter", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log config and scanner details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Read settings from this file instead of .liqhlrc
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one line per token
    Tokens {
        /// Script to scan, `-` for stdin
        file: PathBuf,
        /// Show uncoalesced pieces and the mode after each one
        #[arg(long)]
        raw: bool,
    },
    /// Print the script highlighted
    Highlight {
        /// Script to highlight, `-` for stdin
        file: PathBuf,
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Prefix for class names in markup output
        #[arg(long)]
        class_prefix: Option<String>,
        /// Language id or alias
        #[arg(short, long, default_value = liqhl::LANGUAGE_ID)]
        language: String,
    },
    /// Print the detection relevance of a script
    Score {
        /// Script to score, `-` for stdin
        file: PathBuf,
    },
    /// Write a default .liqhlrc in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        errors::report(&err).display();
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (mut config, config_path) = match &cli.config {
        Some(path) => (Config::load_from_file(path)?, Some(path.clone())),
        None => Config::load_in(Path::new("."))?,
    };

    let (format, class_prefix) = match &cli.command {
        Commands::Highlight {
            format,
            class_prefix,
            ..
        } => (*format, class_prefix.clone()),
        _ => (None, None),
    };
    config.merge_cli_args(cli.no_color.then_some(false), cli.verbose, format, class_prefix);

    init_logging(config.verbose);
    if !config.colored {
        colored::control::set_override(false);
    }
    match &config_path {
        Some(path) => debug!(path = %path.display(), "loaded config"),
        None => debug!("no config file, using defaults"),
    }

    match cli.command {
        Commands::Tokens { file, raw } => print_tokens(&file, raw),
        Commands::Highlight { file, language, .. } => highlight(&file, &language, &config),
        Commands::Score { file } => print_score(&file),
        Commands::Init => init_config(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Reads a script from a file or, for `-`, from stdin. Invalid UTF-8 is
/// replaced rather than rejected.
fn read_source(path: &Path) -> Result<String> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read script from stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            warn!(file = %path.display(), "script is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    debug!(file = %path.display(), bytes = source.len(), "read script");
    Ok(source)
}

fn print_tokens(path: &Path, raw: bool) -> Result<()> {
    let source = read_source(path)?;
    let mut out = io::stdout().lock();

    if raw {
        let mut scanner = Scanner::new(&source);
        while let Some(token) = scanner.next_raw() {
            writeln!(
                out,
                "{} {}",
                render::token_line(&token),
                format!("[{} {}]", scanner.mode(), scanner.depth()).dimmed()
            )?;
        }
    } else {
        let tokens = liqhl::scan(&source);
        debug!(tokens = tokens.len(), "scanned");
        for token in &tokens {
            writeln!(out, "{}", render::token_line(token))?;
        }
    }

    Ok(())
}

fn highlight(path: &Path, language: &str, config: &Config) -> Result<()> {
    let Some(language) = liqhl::language(language) else {
        bail!(
            "Unknown language '{}' (known: {}, {})",
            language,
            LANGUAGE_ID,
            ALIASES.join(", ")
        );
    };

    let source = read_source(path)?;
    let highlight = language.highlight(&source);
    debug!(
        language = highlight.language,
        tokens = highlight.tokens.len(),
        relevance = highlight.relevance,
        "highlighted"
    );

    let rendered = match config.format {
        OutputFormat::Ansi => render::ansi(&highlight.tokens),
        OutputFormat::Markup => highlight.to_markup(&config.class_prefix),
    };

    let mut out = io::stdout().lock();
    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn print_score(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let relevance = Language::liquidsoap().highlight(&source).relevance;

    let verdict = if is_liquidsoap(relevance) {
        "liquidsoap".green().bold()
    } else {
        format!("not liquidsoap (below {})", MIN_RELEVANCE).yellow()
    };
    println!("{} {}", relevance.to_string().bold(), verdict);
    Ok(())
}

fn init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILES[0]);
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    Config::create_default(path)?;
    println!("{} {}", "Created".green().bold(), path.display());
    Ok(())
}
