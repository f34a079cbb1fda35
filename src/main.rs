//! textdiff - Compare two texts character by character.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use textdiff::cli::{run_compare, Outcome, Request, Source, EXIT_TROUBLE};
use textdiff::config::{default_config_path, Config, ConfigOverrides};
use textdiff::core::Granularity;
use textdiff::render::{ColorMode, OutputFormat};

/// Show the minimal edit between two texts.
#[derive(Parser, Debug)]
#[command(name = "textdiff", version, about)]
struct Cli {
    /// Baseline text: a file path, or `-` for stdin
    #[arg(value_name = "OLD")]
    old: String,

    /// Revised text: a file path, or `-` for stdin
    #[arg(value_name = "NEW")]
    new: String,

    /// Treat OLD and NEW as literal strings instead of paths
    #[arg(long = "text")]
    text: bool,

    /// Comparison unit (char, word, line)
    #[arg(short = 'g', long = "granularity", value_name = "UNIT")]
    granularity: Option<Granularity>,

    /// Output format (ansi, markup, json)
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// When to colour output (auto, always, never)
    #[arg(long = "color", value_name = "WHEN")]
    color: Option<ColorMode>,

    /// Largest edit graph to search before degrading
    #[arg(long = "max-cells", value_name = "N")]
    max_cells: Option<usize>,

    /// Fail on oversized input instead of degrading to a line diff
    #[arg(long = "strict")]
    strict: bool,

    /// Append a change summary
    #[arg(long = "stat")]
    stat: bool,

    /// Report differences through the exit status only
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Store the effective settings in the config file, then compare
    #[arg(long = "save-config")]
    save_config: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    textdiff::metrics::init();

    match run(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_TROUBLE)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Merge config file and flags, then compare.
fn run(cli: Cli) -> Result<Outcome> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_default(),
    };
    config.apply(&ConfigOverrides {
        granularity: cli.granularity,
        format: cli.format,
        color: cli.color,
        max_cells: cli.max_cells,
        strict: cli.strict,
    });

    if cli.save_config {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        config.save_to(&path)?;
        log::info!("saved settings to {}", path.display());
    }

    let request = Request {
        old: Source::from_arg(&cli.old, cli.text),
        new: Source::from_arg(&cli.new, cli.text),
        options: config.diff_options(),
        format: config.format,
        color: config.color.enabled(io::stdout().is_terminal()),
        stat: cli.stat,
        quiet: cli.quiet,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_compare(&request, stdin.lock(), &mut stdout.lock())
}
