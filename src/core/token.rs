//! Splitting text into alignment tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit of comparison for the diff engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One token per Unicode scalar value.
    #[default]
    Char,
    /// Runs of word characters; every other character stands alone.
    Word,
    /// Lines, each including its trailing `\n`.
    Line,
}

impl Granularity {
    /// All granularities, finest first.
    pub const ALL: [Granularity; 3] = [Granularity::Char, Granularity::Word, Granularity::Line];

    /// Lowercase name used by the CLI and config file.
    pub fn name(self) -> &'static str {
        match self {
            Granularity::Char => "char",
            Granularity::Word => "word",
            Granularity::Line => "line",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown granularity: {} (expected char, word or line)", s))
    }
}

/// Split `text` into contiguous tokens. Concatenating the result yields `text`.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Char => split_chars(text),
        Granularity::Word => split_words(text),
        Granularity::Line => split_lines(text),
    }
}

fn split_chars(text: &str) -> Vec<&str> {
    text.char_indices()
        .map(|(i, ch)| &text[i..i + ch.len_utf8()])
        .collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn split_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, ch) in text.char_indices() {
        if is_word_char(ch) {
            if start.is_none() {
                start = Some(i);
            }
        } else {
            if let Some(s) = start.take() {
                tokens.push(&text[s..i]);
            }
            tokens.push(&text[i..i + ch.len_utf8()]);
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }

    tokens
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_keep_multibyte_intact() {
        assert_eq!(tokenize("aé😀", Granularity::Char), vec!["a", "é", "😀"]);
    }

    #[test]
    fn empty_input_has_no_tokens() {
        for g in Granularity::ALL {
            assert!(tokenize("", g).is_empty());
        }
    }

    #[test]
    fn words_split_on_punctuation() {
        assert_eq!(
            tokenize("foo_bar, baz!", Granularity::Word),
            vec!["foo_bar", ",", " ", "baz", "!"]
        );
    }

    #[test]
    fn lines_keep_newlines() {
        assert_eq!(tokenize("a\nb\n", Granularity::Line), vec!["a\n", "b\n"]);
        assert_eq!(tokenize("a\nb", Granularity::Line), vec!["a\n", "b"]);
        assert_eq!(tokenize("\n\n", Granularity::Line), vec!["\n", "\n"]);
    }

    #[test]
    fn tokens_concatenate_to_input() {
        let text = "one two\r\nthree, four\n\nfünf";
        for g in Granularity::ALL {
            assert_eq!(tokenize(text, g).concat(), text);
        }
    }

    #[test]
    fn parse_granularity() {
        assert_eq!("Word".parse::<Granularity>(), Ok(Granularity::Word));
        assert!("byte".parse::<Granularity>().is_err());
    }
}
