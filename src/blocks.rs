//! Block-stream document model and normalization
//!
//! The upstream layout classifier emits `{ "result": { "chunks": [...] } }`,
//! each chunk holding its blocks keyed by position. Normalization flattens a
//! chunk into `(kind, content)` pairs in ascending position order.

use crate::error::{ExtractError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Coarse block type assigned by the layout classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Header,
    Footer,
    KeyValue,
    Table,
    Text,
    Other,
}

impl BlockKind {
    /// Map a classifier label to a kind; unknown labels become `Other`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Header" => Self::Header,
            "Footer" => Self::Footer,
            "Key Value" => Self::KeyValue,
            "Table" => Self::Table,
            "Text" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// A normalized block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub content: String,
}

impl Block {
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Top-level block-stream document as produced by the classifier
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockDocument {
    #[serde(default)]
    pub result: Option<BlockResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockResult {
    #[serde(default)]
    pub chunks: Option<Vec<RawChunk>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChunk {
    #[serde(default)]
    pub blocks: Option<RawBlockSet>,
}

/// Blocks of one chunk: normally a position-keyed map, occasionally a list
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawBlockSet {
    Keyed(BTreeMap<String, Option<RawBlock>>),
    Listed(Vec<Option<RawBlock>>),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlock {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

impl BlockDocument {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Normalize every chunk into its ordered block list
    pub fn normalize(&self) -> Result<Vec<Vec<Block>>> {
        let chunks = self
            .result
            .as_ref()
            .and_then(|r| r.chunks.as_ref())
            .ok_or_else(|| ExtractError::Structure("missing result.chunks".into()))?;

        let normalized: Vec<Vec<Block>> = chunks.iter().map(normalize_chunk).collect();
        debug!(
            "Normalized {} chunks, {} blocks",
            normalized.len(),
            normalized.iter().map(Vec::len).sum::<usize>()
        );
        Ok(normalized)
    }
}

/// Visit a chunk's blocks in ascending numeric position. Keys that are not
/// numbers and null blocks are skipped.
#[must_use]
pub fn normalize_chunk(chunk: &RawChunk) -> Vec<Block> {
    let Some(set) = &chunk.blocks else {
        return Vec::new();
    };

    let ordered: Vec<&RawBlock> = match set {
        RawBlockSet::Keyed(map) => {
            let mut positioned: Vec<(u64, &RawBlock)> = map
                .iter()
                .filter_map(|(key, block)| {
                    let position = key.trim().parse::<u64>().ok()?;
                    block.as_ref().map(|b| (position, b))
                })
                .collect();
            positioned.sort_by_key(|(position, _)| *position);
            positioned.into_iter().map(|(_, b)| b).collect()
        }
        RawBlockSet::Listed(list) => list.iter().flatten().collect(),
    };

    ordered
        .into_iter()
        .map(|raw| {
            Block::new(
                BlockKind::from_label(raw.kind.as_deref().unwrap_or_default()),
                raw.content.clone().unwrap_or_default(),
            )
        })
        .collect()
}
