//! End-to-end extraction: raw input to the message/contact pair

use crate::blocks::{Block, BlockDocument};
use crate::body::{assemble_body, join_parts, make_snippet};
use crate::config::ExtractConfig;
use crate::contacts::build_contact_index;
use crate::error::Result;
use crate::headers::resolve_header;
use crate::paragraphs::extract_paragraphs;
use crate::scanner::{BlockRecord, Chunk, ScanStats, SegmentScanner};
use crate::types::{Corpus, Encoding, Message, ReleaseType};
use tracing::{debug, info};

/// Run the markup pipeline over a whole markup document
pub fn extract_markup(markup: &str, config: &ExtractConfig) -> Result<Corpus> {
    let paragraphs = extract_paragraphs(markup)?;
    Ok(corpus_from(messages_from_paragraphs(&paragraphs, config)))
}

/// Run the block pipeline over a whole block-stream JSON document
pub fn extract_blocks(json: &str, config: &ExtractConfig) -> Result<Corpus> {
    let chunks = BlockDocument::from_json(json)?.normalize()?;
    Ok(corpus_from(messages_from_blocks(&chunks, config)))
}

/// Scan, resolve and assemble messages from a paragraph stream
#[must_use]
pub fn messages_from_paragraphs(paragraphs: &[String], config: &ExtractConfig) -> Vec<Message> {
    let mut scanner = SegmentScanner::new();
    let messages: Vec<Message> = scanner
        .scan_paragraphs(paragraphs)
        .into_iter()
        .map(|chunk| assemble_chunk(chunk, config))
        .collect();

    log_scan(Encoding::Markup, scanner.stats());
    messages
}

/// Accumulate and assemble messages from normalized block chunks
#[must_use]
pub fn messages_from_blocks(chunks: &[Vec<Block>], config: &ExtractConfig) -> Vec<Message> {
    let mut scanner = SegmentScanner::new();
    let messages: Vec<Message> = scanner
        .scan_blocks(chunks)
        .into_iter()
        .map(|record| assemble_record(record, config))
        .collect();

    log_scan(Encoding::Blocks, scanner.stats());
    messages
}

/// Attach the contact index to a message sequence
#[must_use]
pub fn corpus_from(messages: Vec<Message>) -> Corpus {
    let contacts = build_contact_index(&messages);
    info!(
        "Built corpus: {} messages, {} contacts",
        messages.len(),
        contacts.len()
    );
    Corpus { messages, contacts }
}

/// Turn one identified markup chunk into a message
#[must_use]
pub fn assemble_chunk(chunk: Chunk, config: &ExtractConfig) -> Message {
    let encoding = Encoding::Markup;
    let header = resolve_header(&chunk.lines, config);
    let body = assemble_body(chunk.lines.get(header.body_start..).unwrap_or_default());
    let fields = header.fields;

    debug!(
        "Resolved {}: from={:?} sent={:?} body starts at line {}",
        chunk.id, fields.from, fields.sent, header.body_start
    );

    Message {
        snippet: make_snippet(&body, encoding.snippet_budget()),
        is_sent: config.self_identity.matches(&fields.from),
        subject: non_empty_or(fields.subject, encoding.subject_placeholder()),
        id: chunk.id,
        release_type: chunk.release_type,
        from: fields.from,
        to: fields.to,
        sent: fields.sent,
        body,
    }
}

/// Turn one block-stream record into a message
#[must_use]
pub fn assemble_record(record: BlockRecord, config: &ExtractConfig) -> Message {
    let encoding = Encoding::Blocks;
    let body = join_parts(&record.body_parts);
    let fields = record.fields;

    Message {
        snippet: make_snippet(&body, encoding.snippet_budget()),
        is_sent: config.self_identity.matches(&fields.from),
        subject: non_empty_or(fields.subject, encoding.subject_placeholder()),
        id: record.id,
        release_type: ReleaseType::Full,
        from: fields.from,
        to: fields.to,
        sent: fields.sent,
        body,
    }
}

fn non_empty_or(value: String, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

fn log_scan(encoding: Encoding, stats: ScanStats) {
    info!(
        "{:?} scan: {} boundaries, {} emitted, {} dropped without id, {} duplicates",
        encoding, stats.boundaries, stats.emitted, stats.dropped, stats.duplicates
    );
}
