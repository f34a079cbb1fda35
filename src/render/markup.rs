//! Plain-text, JSON and summary renderers.

use serde::Serialize;

use crate::core::{DiffStats, EditScript, Segment, SegmentTag};

/// Render with `[-removed-]` and `{+added+}` markers.
///
/// Marker sequences already present in the text are emitted as-is, the way
/// `git diff --word-diff=plain` does, so the output is not always reversible.
/// Use [`render_json`] when the segments must be recovered exactly.
pub fn render_markup(script: &EditScript) -> String {
    let mut out = String::new();
    for segment in script {
        match segment.tag {
            SegmentTag::Equal => out.push_str(&segment.value),
            SegmentTag::Delete => {
                out.push_str("[-");
                out.push_str(&segment.value);
                out.push_str("-]");
            }
            SegmentTag::Insert => {
                out.push_str("{+");
                out.push_str(&segment.value);
                out.push_str("+}");
            }
        }
    }
    out
}

/// Render the script as a JSON array of `{tag, value}` objects.
pub fn render_json(script: &EditScript) -> serde_json::Result<String> {
    serde_json::to_string_pretty(script)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    identical: bool,
    stats: DiffStats,
    ratio: f64,
    segments: &'a [Segment],
}

/// Render the script together with its statistics as one JSON object.
pub fn render_json_report(script: &EditScript) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        identical: !script.has_changes(),
        stats: script.stats(),
        ratio: script.ratio(),
        segments: script.segments(),
    })
}

/// One-line summary of a script.
pub fn render_stat(script: &EditScript) -> String {
    let stats = script.stats();
    format!(
        "{} {}(+), {} {}(-), {} unchanged, {:.1}% similar",
        stats.inserted,
        plural(stats.inserted, "insertion"),
        stats.deleted,
        plural(stats.deleted, "deletion"),
        stats.equal,
        script.ratio() * 100.0
    )
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
