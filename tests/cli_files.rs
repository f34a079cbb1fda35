//! File-based comparisons through the CLI entry point.

use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use textdiff::cli::{run_compare, Outcome, Request, Source};
use textdiff::config::Config;
use textdiff::core::{DiffOptions, Granularity, OversizePolicy};
use textdiff::render::OutputFormat;

fn write(dir: &Path, name: &str, content: &str) -> Source {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    Source::File(path)
}

fn request(old: Source, new: Source, format: OutputFormat) -> Request {
    Request {
        old,
        new,
        options: DiffOptions::default(),
        format,
        color: false,
        stat: false,
        quiet: false,
    }
}

fn run(request: &Request) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = run_compare(request, std::io::empty(), &mut out).unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn json_output_for_files() {
    let dir = TempDir::new().unwrap();
    let old = write(dir.path(), "old.txt", "kitten");
    let new = write(dir.path(), "new.txt", "sitting");

    let (outcome, out) = run(&request(old, new, OutputFormat::Json));
    assert_eq!(outcome, Outcome::Different);

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        json!([
            { "tag": "delete", "value": "k" },
            { "tag": "insert", "value": "s" },
            { "tag": "equal", "value": "itt" },
            { "tag": "delete", "value": "e" },
            { "tag": "insert", "value": "i" },
            { "tag": "equal", "value": "n" },
            { "tag": "insert", "value": "g" },
        ])
    );
}

#[test]
fn json_report_with_stat() {
    let dir = TempDir::new().unwrap();
    let old = write(dir.path(), "old.txt", "same\n");
    let new = write(dir.path(), "new.txt", "same\n");

    let mut req = request(old, new, OutputFormat::Json);
    req.stat = true;
    let (outcome, out) = run(&req);
    assert_eq!(outcome, Outcome::Identical);

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["identical"], true);
    assert_eq!(value["ratio"], 1.0);
    assert_eq!(value["stats"]["equal"], 5);
}

#[test]
fn word_mode_markup_with_stat() {
    let dir = TempDir::new().unwrap();
    let old = write(dir.path(), "old.txt", "the cat sat\n");
    let new = write(dir.path(), "new.txt", "the dog sat\n");

    let mut req = request(old, new, OutputFormat::Markup);
    req.options = req.options.with_granularity(Granularity::Word);
    req.stat = true;
    let (_, out) = run(&req);
    assert_eq!(
        out,
        "the [-cat-]{+dog+} sat\n3 insertions(+), 3 deletions(-), 9 unchanged, 75.0% similar\n"
    );
}

#[test]
fn ansi_without_color_falls_back_to_markup() {
    let (_, out) = run(&request(
        Source::Literal("abc".into()),
        Source::Literal("abd".into()),
        OutputFormat::Ansi,
    ));
    assert_eq!(out, "ab[-c-]{+d+}\n");
}

#[test]
fn strict_config_surfaces_oversize_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, r#"{"max_cells": 4, "strict": true}"#).unwrap();
    let config = Config::load_from(&config_path).unwrap();
    assert_eq!(config.diff_options().oversize, OversizePolicy::Fail);

    let old = write(dir.path(), "old.txt", "abcdef");
    let new = write(dir.path(), "new.txt", "fedcba");
    let mut req = request(old, new, OutputFormat::Markup);
    req.options = config.diff_options();

    let err = run_compare(&req, std::io::empty(), &mut Vec::new()).unwrap_err();
    assert!(format!("{:#}", err).contains("input too large"));
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let req = request(
        Source::File(missing.clone()),
        Source::Literal(String::new()),
        OutputFormat::Markup,
    );
    let err = run_compare(&req, std::io::empty(), &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains(&missing.display().to_string()));
}
