//! Command-line comparison: load two texts, diff, render.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::{DiffOptions, Differ, EditScript};
use crate::render::{
    render_ansi, render_json, render_json_report, render_markup, render_stat, OutputFormat,
    Palette,
};

/// Errors loading comparison input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The content is not UTF-8 text.
    #[error("{0} is not valid UTF-8 text")]
    NotUtf8(String),
    /// Both sides asked for stdin.
    #[error("stdin can only be used for one side of the comparison")]
    StdinTwice,
}

/// Where one side of the comparison comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on disk.
    File(PathBuf),
    /// Standard input (`-`).
    Stdin,
    /// The argument itself.
    Literal(String),
}

impl Source {
    /// Interpret a positional argument.
    pub fn from_arg(arg: &str, literal: bool) -> Self {
        if literal {
            Source::Literal(arg.to_string())
        } else if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Load the text.
    pub fn read<R: Read>(&self, stdin: &mut R) -> Result<String, InputError> {
        match self {
            Source::Literal(text) => Ok(text.clone()),
            Source::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| InputError::Io {
                    path: path.clone(),
                    source,
                })?;
                decode(bytes, path)
            }
            Source::Stdin => {
                let mut bytes = Vec::new();
                stdin
                    .read_to_end(&mut bytes)
                    .map_err(|source| InputError::Io {
                        path: PathBuf::from("<stdin>"),
                        source,
                    })?;
                decode(bytes, Path::new("<stdin>"))
            }
        }
    }
}

fn decode(bytes: Vec<u8>, path: &Path) -> Result<String, InputError> {
    String::from_utf8(bytes).map_err(|_| InputError::NotUtf8(path.display().to_string()))
}

/// A fully resolved comparison.
#[derive(Debug, Clone)]
pub struct Request {
    /// Baseline text source.
    pub old: Source,
    /// Revised text source.
    pub new: Source,
    /// Engine settings.
    pub options: DiffOptions,
    /// Output format.
    pub format: OutputFormat,
    /// Emit ANSI colour (only used by [`OutputFormat::Ansi`]).
    pub color: bool,
    /// Append a summary.
    pub stat: bool,
    /// Print nothing; report through the exit status only.
    pub quiet: bool,
}

/// Result of a comparison, mapped to `diff(1)` exit statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No differences.
    Identical,
    /// At least one insert or delete.
    Different,
}

impl Outcome {
    /// Process exit code.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Identical => ExitCode::SUCCESS,
            Outcome::Different => ExitCode::from(1),
        }
    }
}

/// Exit code for a failed comparison.
pub const EXIT_TROUBLE: u8 = 2;

/// Run a comparison, writing the rendered script to `out`.
pub fn run_compare<R: Read, W: Write>(
    request: &Request,
    mut stdin: R,
    out: &mut W,
) -> Result<Outcome> {
    if request.old == Source::Stdin && request.new == Source::Stdin {
        return Err(InputError::StdinTwice.into());
    }

    let old = request.old.read(&mut stdin)?;
    let new = request.new.read(&mut stdin)?;
    log::debug!(
        "comparing {} and {} bytes at {} granularity",
        old.len(),
        new.len(),
        request.options.granularity
    );

    let script = Differ::new(request.options)
        .diff(&old, &new)
        .context("diff failed")?;
    let outcome = if script.has_changes() {
        Outcome::Different
    } else {
        Outcome::Identical
    };

    if !request.quiet {
        write_script(request, &script, out).context("failed to write output")?;
    }
    Ok(outcome)
}

fn write_script<W: Write>(request: &Request, script: &EditScript, out: &mut W) -> Result<()> {
    match request.format {
        OutputFormat::Json => {
            let json = if request.stat {
                render_json_report(script)?
            } else {
                render_json(script)?
            };
            writeln!(out, "{}", json)?;
            return Ok(());
        }
        OutputFormat::Ansi if request.color => {
            render_ansi(script, out, &Palette::default())?;
        }
        OutputFormat::Ansi | OutputFormat::Markup => {
            out.write_all(render_markup(script).as_bytes())?;
        }
    }

    let ends_with_newline = script
        .segments()
        .last()
        .map_or(true, |s| s.value.ends_with('\n'));
    if !ends_with_newline {
        writeln!(out)?;
    }
    if request.stat {
        writeln!(out, "{}", render_stat(script))?;
    }
    out.flush()?;
    Ok(())
}
