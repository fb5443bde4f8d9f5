/*!
 * Console rendering and JSON export of an alignment.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::captions::{AlignedToken, Caption, Token};
use crate::file_utils::FileManager;

// @const: ANSI colors cycled over aligned source tokens (red, blue, green, yellow, cyan, magenta)
const ALIGNMENT_COLORS: [&str; 6] = ["31", "34", "32", "33", "36", "35"];

const RESET: &str = "\x1B[0m";

/// `HH:MM:SS.mmm`
pub fn format_ms(ms: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        (ms / 60_000) % 60,
        (ms / 1_000) % 60,
        ms % 1_000
    )
}

fn paint(text: &str, color: Option<&str>) -> String {
    match color {
        Some(code) => format!("\x1B[{}m{}{}", code, text, RESET),
        None => text.to_string(),
    }
}

fn join_surfaces(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.surface.as_str()).collect::<Vec<_>>().join(" ")
}

/// Render every source caption with its aligned words, followed by the
/// destination captions that strictly overlap it.
///
/// Each aligned source token gets the next color of the cycle, shared by its
/// bracketed destination words. `colored = false` renders plain text.
pub fn render_alignment(aligned: &[Caption<AlignedToken>], destination: &[Caption<Token>], colored: bool) -> String {
    let mut out = String::new();
    let mut color_index = 0;

    for caption in aligned {
        let _ = writeln!(out, "{} --> {}", format_ms(caption.start_ms), format_ms(caption.end_ms));

        let mut parts = Vec::new();
        for token in &caption.payload {
            if token.aligned.is_empty() {
                parts.push(token.token.surface.clone());
                continue;
            }

            let color = colored.then(|| ALIGNMENT_COLORS[color_index % ALIGNMENT_COLORS.len()]);
            parts.push(paint(&token.token.surface, color));
            parts.push(paint("[", color));
            parts.extend(token.aligned.iter().map(|t| paint(&t.surface, color)));
            parts.push(paint("]", color));
            color_index += 1;
        }
        let _ = writeln!(out, "{}", parts.join(" "));

        for line in destination.iter().filter(|d| caption.overlap(d) > 0) {
            let _ = writeln!(out, "{}", join_surfaces(&line.payload));
        }
        out.push('\n');
    }

    out
}

/// A tagged caption in the output document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionRecord {
    pub start: u64,
    pub end: u64,
    pub tokens: Vec<String>,
}

/// A source token and the destination words assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTokenRecord {
    pub src: String,
    pub dst: Vec<String>,
}

/// An aligned caption in the output document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedCaptionRecord {
    pub start: u64,
    pub end: u64,
    pub tokens: Vec<AlignedTokenRecord>,
}

/// The output document: both tagged streams and the alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentDocument {
    pub src: Vec<CaptionRecord>,
    pub dst: Vec<CaptionRecord>,
    pub align: Vec<AlignedCaptionRecord>,
}

impl CaptionRecord {
    fn from_caption(caption: &Caption<Token>) -> Self {
        Self {
            start: caption.start_ms,
            end: caption.end_ms,
            tokens: caption.payload.iter().map(|t| t.surface.clone()).collect(),
        }
    }
}

impl AlignedCaptionRecord {
    fn from_caption(caption: &Caption<AlignedToken>) -> Self {
        Self {
            start: caption.start_ms,
            end: caption.end_ms,
            tokens: caption
                .payload
                .iter()
                .map(|t| AlignedTokenRecord {
                    src: t.token.surface.clone(),
                    dst: t.aligned.iter().map(|a| a.surface.clone()).collect(),
                })
                .collect(),
        }
    }
}

impl AlignmentDocument {
    pub fn new(source: &[Caption<Token>], destination: &[Caption<Token>], aligned: &[Caption<AlignedToken>]) -> Self {
        Self {
            src: source.iter().map(CaptionRecord::from_caption).collect(),
            dst: destination.iter().map(CaptionRecord::from_caption).collect(),
            align: aligned.iter().map(AlignedCaptionRecord::from_caption).collect(),
        }
    }

    /// Write the document as JSON
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        FileManager::ensure_parent_dir(path)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        Ok(())
    }
}
