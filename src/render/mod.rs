//! Presentation of edit scripts.
//!
//! Every renderer walks the script in order: inserts get the added
//! treatment, deletes the removed treatment, equal runs stay neutral.

mod ansi;
mod markup;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use ansi::*;
pub use markup::*;

/// Output format for a rendered script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Coloured terminal output.
    #[default]
    Ansi,
    /// `[-removed-]{+added+}` inline markers.
    Markup,
    /// JSON array of segments.
    Json,
}

impl OutputFormat {
    /// Lowercase name used by the CLI and config file.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Ansi => "ansi",
            OutputFormat::Markup => "markup",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" => Ok(OutputFormat::Ansi),
            "markup" | "plain" => Ok(OutputFormat::Markup),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format: {} (expected ansi, markup or json)",
                other
            )),
        }
    }
}

/// When to emit colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour only when stdout is a terminal.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl ColorMode {
    /// Resolve against whether the output is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!(
                "unknown color mode: {} (expected auto, always or never)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_formats() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("plain".parse::<OutputFormat>(), Ok(OutputFormat::Markup));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn color_mode_resolution() {
        assert!(ColorMode::Auto.enabled(true));
        assert!(!ColorMode::Auto.enabled(false));
        assert!(ColorMode::Always.enabled(false));
        assert!(!ColorMode::Never.enabled(true));
    }
}
