//! Result persistence for embeddings
//!
//! Output is comma-separated text with no header: one `x,y` row per
//! observation, in input order, with an optional trailing class-label
//! column. A failed write at the requested path falls back to a fixed
//! default filename instead of aborting the run.

use crate::engine::Embedding;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Render the embedding as CSV rows.
fn render(embedding: &Embedding, classes: Option<&[f32]>) -> String {
    let mut output = String::new();
    for (i, point) in embedding.points().iter().enumerate() {
        output.push_str(&point[0].to_string());
        output.push(',');
        output.push_str(&point[1].to_string());
        if let Some(labels) = classes {
            output.push(',');
            output.push_str(&labels[i].to_string());
        }
        output.push('\n');
    }
    output
}

/// Write the embedding to `path`, one row per observation.
pub fn write_embedding(
    path: &Path,
    embedding: &Embedding,
    classes: Option<&[f32]>,
) -> std::io::Result<()> {
    fs::write(path, render(embedding, classes))
}

/// Write to `outfile`, falling back to `fallback` when the requested
/// path is not writable. Returns the path the results actually landed
/// at; a failure at the fallback path propagates.
pub fn write_with_fallback(
    outfile: &Path,
    fallback: &Path,
    embedding: &Embedding,
    classes: Option<&[f32]>,
    verbose: bool,
) -> Result<PathBuf> {
    match write_embedding(outfile, embedding, classes) {
        Ok(()) => {
            if verbose {
                println!("Results saved as {}", outfile.display());
            }
            Ok(outfile.to_path_buf())
        }
        Err(err) => {
            debug!(error = %err, "write failed, using fallback path");
            eprintln!("can't write to {}. Is path valid?", outfile.display());
            write_embedding(fallback, embedding, classes).with_context(|| {
                format!("Failed to write results to fallback path {}", fallback.display())
            })?;
            if verbose {
                println!("Results saved as {}", fallback.display());
            }
            Ok(fallback.to_path_buf())
        }
    }
}
