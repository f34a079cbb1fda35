//! Coloured terminal rendering via crossterm.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, ContentStyle, PrintStyledContent, StyledContent};

use crate::core::{EditScript, SegmentTag};

/// Colours for changed runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Foreground for inserted text.
    pub inserted: Color,
    /// Foreground for deleted text.
    pub deleted: Color,
    /// Strike through deleted text.
    pub strike_deleted: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            inserted: Color::Green,
            deleted: Color::Red,
            strike_deleted: true,
        }
    }
}

impl Palette {
    /// Style for a tag. Equal text gets the default style.
    pub fn style(&self, tag: SegmentTag) -> ContentStyle {
        let mut style = ContentStyle::new();
        match tag {
            SegmentTag::Equal => {}
            SegmentTag::Insert => {
                style.foreground_color = Some(self.inserted);
                style.attributes.set(Attribute::Bold);
            }
            SegmentTag::Delete => {
                style.foreground_color = Some(self.deleted);
                if self.strike_deleted {
                    style.attributes.set(Attribute::CrossedOut);
                }
            }
        }
        style
    }
}

/// Write the script with ANSI colours to `out`.
pub fn render_ansi<W: Write>(
    script: &EditScript,
    out: &mut W,
    palette: &Palette,
) -> io::Result<()> {
    for segment in script {
        if segment.tag == SegmentTag::Equal {
            out.write_all(segment.value.as_bytes())?;
        } else {
            let styled = StyledContent::new(palette.style(segment.tag), segment.value.as_str());
            queue!(out, PrintStyledContent(styled))?;
        }
    }
    out.flush()
}
