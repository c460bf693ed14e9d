//! Segment scanning: grouping the raw streams into per-message chunks
//!
//! Both encodings are scanned by small explicit state machines. The scanner
//! owns the set of document identifiers already emitted, so two scans with
//! separate scanners never share dedup state.

use crate::blocks::{Block, BlockKind};
use crate::headers::{self, HeaderFields};
use crate::types::ReleaseType;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*RELEASE\s+IN\s+(FULL|PART\s+[A-Z0-9]+)").unwrap());

static DOC_NO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Doc\s?No\.\s*(C05\d+)\s+Date:").unwrap());

// OCR splits or drops letters of the preamble ("UNCLASSIFIE D", "U. S.") and
// sometimes mangles the "Doc No." label that follows it.
static PREAMBLE_DOC_NO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)UNCLASSIFIE\s*D?[\s.US]*Department.*?\b(C05\d+)\s+Date:")
        .unwrap()
});

static BLOCK_DOC_NO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Doc No\.\s+(C\d+)").unwrap());

/// Release type announced by a boundary marker line, if the line is one
#[must_use]
pub fn match_boundary(line: &str) -> Option<ReleaseType> {
    BOUNDARY_REGEX
        .captures(line)
        .map(|caps| ReleaseType::from_marker(&caps[1]))
}

#[must_use]
pub fn is_boundary(line: &str) -> bool {
    BOUNDARY_REGEX.is_match(line)
}

/// Document identifier carried by a page footer line of the markup release
#[must_use]
pub fn match_document_id(line: &str) -> Option<&str> {
    DOC_NO_REGEX
        .captures(line)
        .or_else(|| PREAMBLE_DOC_NO_REGEX.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Document identifier carried by a `Header` block of the block stream
#[must_use]
pub fn match_block_document_id(content: &str) -> Option<&str> {
    BLOCK_DOC_NO_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Boundary marker or identifier line; never header or body material
#[must_use]
pub fn is_marker_line(line: &str) -> bool {
    is_boundary(line) || match_document_id(line).is_some()
}

/// A raw span of paragraphs believed to be one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub id: String,
    pub release_type: ReleaseType,
    pub lines: Vec<String>,
}

/// A message recovered from the block stream before body assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    pub id: String,
    pub fields: HeaderFields,
    pub body_parts: Vec<String>,
}

impl BlockRecord {
    fn open(id: &str) -> Self {
        Self {
            id: id.to_string(),
            fields: HeaderFields::default(),
            body_parts: Vec::new(),
        }
    }
}

/// Counters describing what a scan kept and what it discarded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Boundary markers (markup) or identifier headers (blocks) encountered
    pub boundaries: usize,

    /// Chunks dropped because no identifier was recovered
    pub dropped: usize,

    /// Chunks or headers skipped because their identifier was already seen
    pub duplicates: usize,

    /// Chunks or records handed on for assembly
    pub emitted: usize,
}

enum ParagraphState {
    Idle,
    Accumulating {
        release_type: ReleaseType,
        lines: Vec<String>,
    },
    /// Chunk already emitted; lines are skipped until the next boundary
    HeaderCaptured,
}

enum BlockState {
    Idle,
    Accumulating(BlockRecord),
    HeaderCaptured(BlockRecord),
}

impl BlockState {
    fn into_record(self) -> Option<BlockRecord> {
        match self {
            Self::Idle => None,
            Self::Accumulating(record) | Self::HeaderCaptured(record) => Some(record),
        }
    }
}

/// Scanner over one corpus load
#[derive(Debug, Default)]
pub struct SegmentScanner {
    seen: HashSet<String>,
    stats: ScanStats,
}

impl SegmentScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Whether an identifier has already been emitted by this scanner
    #[must_use]
    pub fn has_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Group a paragraph stream into identified chunks.
    ///
    /// A boundary marker opens a chunk and the first identifier line after
    /// it closes the chunk. Lines after the identifier are skipped until the
    /// next boundary marker, so a message whose marker was mangled by OCR is
    /// lost rather than merged into its neighbour. A chunk that meets another
    /// boundary before any identifier is discarded.
    pub fn scan_paragraphs(&mut self, paragraphs: &[String]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut state = ParagraphState::Idle;

        for line in paragraphs {
            state = self.step_paragraph(state, line, &mut chunks);
        }

        if matches!(state, ParagraphState::Accumulating { .. }) {
            self.drop_unidentified();
        }

        chunks
    }

    fn step_paragraph(
        &mut self,
        state: ParagraphState,
        line: &str,
        chunks: &mut Vec<Chunk>,
    ) -> ParagraphState {
        if let Some(release_type) = match_boundary(line) {
            self.stats.boundaries += 1;
            if matches!(state, ParagraphState::Accumulating { .. }) {
                self.drop_unidentified();
            }
            return ParagraphState::Accumulating {
                release_type,
                lines: Vec::new(),
            };
        }

        match state {
            idle @ (ParagraphState::Idle | ParagraphState::HeaderCaptured) => idle,
            ParagraphState::Accumulating {
                release_type,
                mut lines,
            } => match match_document_id(line) {
                Some(id) => {
                    let chunk = Chunk {
                        id: id.to_string(),
                        release_type,
                        lines,
                    };
                    self.emit_chunk(chunk, chunks);
                    ParagraphState::HeaderCaptured
                }
                None => {
                    lines.push(line.to_string());
                    ParagraphState::Accumulating {
                        release_type,
                        lines,
                    }
                }
            },
        }
    }

    fn emit_chunk(&mut self, chunk: Chunk, chunks: &mut Vec<Chunk>) {
        if self.seen.insert(chunk.id.clone()) {
            debug!("Chunk {} closed with {} lines", chunk.id, chunk.lines.len());
            self.stats.emitted += 1;
            chunks.push(chunk);
        } else {
            debug!("Skipping duplicate chunk {}", chunk.id);
            self.stats.duplicates += 1;
        }
    }

    fn drop_unidentified(&mut self) {
        debug!("Dropping chunk without document identifier");
        self.stats.dropped += 1;
    }

    /// Accumulate the block stream into records.
    ///
    /// A `Header` block with an unseen identifier opens a record, emitting
    /// any record still open. A `Footer` closes the open record. Records left
    /// open when their source chunk ends are emitted as well.
    pub fn scan_blocks(&mut self, chunks: &[Vec<Block>]) -> Vec<BlockRecord> {
        let mut records = Vec::new();

        for blocks in chunks {
            let mut state = BlockState::Idle;
            for block in blocks {
                state = self.step_block(state, block, &mut records);
            }
            if let Some(record) = state.into_record() {
                self.emit_record(record, &mut records);
            }
        }

        records
    }

    fn step_block(
        &mut self,
        state: BlockState,
        block: &Block,
        records: &mut Vec<BlockRecord>,
    ) -> BlockState {
        let content = block.content.as_str();

        match block.kind {
            BlockKind::Header => {
                let Some(id) = match_block_document_id(content) else {
                    return state;
                };
                self.stats.boundaries += 1;
                if self.seen.contains(id) {
                    debug!("Ignoring repeated header for {id}");
                    self.stats.duplicates += 1;
                    return state;
                }
                if let Some(record) = state.into_record() {
                    self.emit_record(record, records);
                }
                self.seen.insert(id.to_string());
                BlockState::Accumulating(BlockRecord::open(id))
            }
            BlockKind::Footer => {
                if let Some(record) = state.into_record() {
                    self.emit_record(record, records);
                }
                BlockState::Idle
            }
            _ => {
                let (mut record, captured) = match state {
                    BlockState::Idle => return BlockState::Idle,
                    BlockState::Accumulating(record) => (record, false),
                    BlockState::HeaderCaptured(record) => (record, true),
                };
                match classify_block(block) {
                    BlockRole::Metadata(fields) => {
                        // First-wins: fields set by an earlier metadata block are never overwritten
                        record.fields.fill_from(&fields);
                        BlockState::HeaderCaptured(record)
                    }
                    BlockRole::Body => {
                        record.body_parts.push(block.content.clone());
                        resume(record, captured)
                    }
                    BlockRole::Ignored => resume(record, captured),
                }
            }
        }
    }

    fn emit_record(&mut self, record: BlockRecord, records: &mut Vec<BlockRecord>) {
        debug!(
            "Record {} closed with {} body parts",
            record.id,
            record.body_parts.len()
        );
        self.stats.emitted += 1;
        records.push(record);
    }
}

enum BlockRole {
    Metadata(HeaderFields),
    Body,
    Ignored,
}

fn classify_block(block: &Block) -> BlockRole {
    let content = block.content.as_str();
    if content.is_empty() {
        return BlockRole::Ignored;
    }

    match block.kind {
        BlockKind::KeyValue => {
            if headers::is_key_value_header(content) {
                let fields = headers::parse_key_value_metadata(content);
                if !fields.is_empty() {
                    return BlockRole::Metadata(fields);
                }
            }
            BlockRole::Body
        }
        BlockKind::Text => BlockRole::Body,
        BlockKind::Table if headers::is_table_header(content) => {
            BlockRole::Metadata(headers::parse_table_metadata(content))
        }
        _ => BlockRole::Ignored,
    }
}

const fn resume(record: BlockRecord, captured: bool) -> BlockState {
    if captured {
        BlockState::HeaderCaptured(record)
    } else {
        BlockState::Accumulating(record)
    }
}
