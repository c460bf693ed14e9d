//! Persistence boundary: reading sources and snapshots, writing snapshots
//!
//! Each load is one whole-file read; each snapshot write is one whole-file
//! write. A failed load yields the empty corpus, never partial data.

use crate::config::{ExtractConfig, SourcePaths};
use crate::error::{ExtractError, Result};
use crate::pipeline::{extract_blocks, extract_markup};
use crate::types::Corpus;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Run the block pipeline over a block-stream JSON file
pub fn load_blocks_file(path: &Path, config: &ExtractConfig) -> Result<Corpus> {
    let raw = fs::read_to_string(path)?;
    extract_blocks(&raw, config)
}

/// Run the markup pipeline over a markup release file
pub fn load_markup_file(path: &Path, config: &ExtractConfig) -> Result<Corpus> {
    let raw = fs::read_to_string(path)?;
    extract_markup(&raw, config)
}

pub fn read_snapshot(path: &Path) -> Result<Corpus> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write the corpus as a snapshot, creating parent directories as needed
pub fn write_snapshot(path: &Path, corpus: &Corpus) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string(corpus)?)?;
    info!(
        "Wrote {} messages, {} contacts to {}",
        corpus.messages.len(),
        corpus.contacts.len(),
        path.display()
    );
    Ok(())
}

/// Parse a markup release and persist the result as a snapshot
pub fn build_snapshot(markup: &Path, out: &Path, config: &ExtractConfig) -> Result<Corpus> {
    info!("Parsing markup from {}", markup.display());
    let corpus = load_markup_file(markup, config)?;
    write_snapshot(out, &corpus)?;
    Ok(corpus)
}

/// Load from the block-stream source when it exists, else from the snapshot
pub fn try_load(paths: &SourcePaths, config: &ExtractConfig) -> Result<Corpus> {
    if let Some(blocks) = existing(paths.blocks.as_ref()) {
        let corpus = load_blocks_file(blocks, config)?;
        info!(
            "Loaded {} messages, {} contacts from {}",
            corpus.messages.len(),
            corpus.contacts.len(),
            blocks.display()
        );
        return Ok(corpus);
    }

    if let Some(snapshot) = existing(paths.snapshot.as_ref()) {
        if paths.blocks.is_some() {
            warn!("Block source missing, falling back to snapshot");
        }
        let corpus = read_snapshot(snapshot)?;
        info!(
            "Loaded {} messages, {} contacts from snapshot {}",
            corpus.messages.len(),
            corpus.contacts.len(),
            snapshot.display()
        );
        return Ok(corpus);
    }

    Err(ExtractError::NoSource(describe(paths)))
}

/// Like [`try_load`], but any failure is logged and yields the empty corpus
#[must_use]
pub fn load_corpus(paths: &SourcePaths, config: &ExtractConfig) -> Corpus {
    try_load(paths, config).unwrap_or_else(|e| {
        error!("Failed to load data: {e}");
        Corpus::default()
    })
}

fn existing(path: Option<&PathBuf>) -> Option<&Path> {
    path.map(PathBuf::as_path).filter(|p| p.exists())
}

fn describe(paths: &SourcePaths) -> String {
    let names: Vec<String> = [&paths.blocks, &paths.snapshot]
        .into_iter()
        .flatten()
        .map(|p| p.display().to_string())
        .collect();

    if names.is_empty() {
        "no block source or snapshot configured".into()
    } else {
        format!("none of {} exist", names.join(", "))
    }
}
