//! Output formatting for search results.

use std::io::{self, Write};

use clap::ValueEnum;
use huefind_core::api::SearchState;
use huefind_core::{MatchResult, Rgb};
use serde::Serialize;

/// Output format for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Ranked table (default)
    #[default]
    Text,
    /// JSON document; one object per line in interactive mode
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    query: &'a str,
    hex: String,
    rgb: Rgb,
    matches: &'a [MatchResult],
}

/// Truecolor background block, or nothing when swatches are off.
fn swatch(rgb: Rgb, enabled: bool) -> String {
    if enabled {
        format!(
            "\x1b[48;2;{};{};{}m    \x1b[0m ",
            rgb.red, rgb.green, rgb.blue
        )
    } else {
        String::new()
    }
}

pub fn render_text<W: Write>(
    out: &mut W,
    query: Rgb,
    matches: &[MatchResult],
    swatches: bool,
) -> io::Result<()> {
    writeln!(
        out,
        "{}{} ({}, {}, {})",
        swatch(query, swatches),
        query,
        query.red,
        query.green,
        query.blue
    )?;
    for (idx, m) in matches.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {}{}  {:>7.2}  {}",
            idx + 1,
            swatch(m.rgb, swatches),
            m.id,
            m.distance,
            m.name
        )?;
    }
    Ok(())
}

pub fn render_json<W: Write>(
    out: &mut W,
    query: &str,
    rgb: Rgb,
    matches: &[MatchResult],
    pretty: bool,
) -> io::Result<()> {
    let report = Report {
        query,
        hex: rgb.to_hex(),
        rgb,
        matches,
    };
    if pretty {
        serde_json::to_writer_pretty(&mut *out, &report)?;
    } else {
        serde_json::to_writer(&mut *out, &report)?;
    }
    writeln!(out)
}

/// Render the state left behind by a successful search.
///
/// Does nothing if the state holds no parsed query.
pub fn render_state<W: Write>(
    out: &mut W,
    state: &SearchState,
    format: OutputFormat,
    swatches: bool,
    pretty: bool,
) -> io::Result<()> {
    let Some(rgb) = state.swatch else {
        return Ok(());
    };
    match format {
        OutputFormat::Text => render_text(out, rgb, &state.results, swatches),
        OutputFormat::Json => render_json(out, &state.query, rgb, &state.results, pretty),
    }
}
