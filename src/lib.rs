// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

//! Released Correspondence Extractor
//!
//! Turns a scanned and OCR'd correspondence release into discrete message
//! records plus a frequency-ranked contact index.
//!
//! # Inputs
//!
//! - A markup release: paragraphs inside `bodymatter`, message boundaries and
//!   header fields inferred from text markers.
//! - A block stream: chunks of blocks already typed as `Header`, `Footer`,
//!   `Key Value`, `Table` or `Text` by an upstream layout classifier.
//!
//! Both paths are deterministic: the same input always yields the same
//! messages, in the same order, with the same contacts.
//!
//! # Example
//!
//! ```rust
//! use release_mail_extract::{ExtractConfig, messages_from_paragraphs};
//!
//! let paragraphs: Vec<String> = [
//!     "RELEASE IN FULL",
//!     "From: Jane Doe <jane@x.gov> To: John Roe Sent: Monday, June 1, 2009 Subject: Travel",
//!     "Please see attached.",
//!     "UNCLASSIFIED U.S. Department of State Case No. F-2014-20439 Doc No. C0500001 Date: 05/13/2015",
//! ]
//! .iter()
//! .map(ToString::to_string)
//! .collect();
//!
//! let messages = messages_from_paragraphs(&paragraphs, &ExtractConfig::default());
//! assert_eq!(messages[0].id, "C0500001");
//! assert_eq!(messages[0].subject, "Travel");
//! ```

mod blocks;
mod body;
mod config;
mod contacts;
mod error;
mod headers;
mod loader;
mod paragraphs;
mod pipeline;
mod scanner;
mod store;
mod types;

pub use blocks::{Block, BlockDocument, BlockKind, normalize_chunk};
pub use body::{ELLIPSIS, assemble_body, join_parts, make_snippet};
pub use config::{ExtractConfig, SelfIdentity, SourcePaths};
pub use contacts::build_contact_index;
pub use error::{ExtractError, Result};
pub use headers::{
    HeaderFields, Label, ResolvedHeader, is_key_value_header, is_separator, is_table_header,
    leading_label, parse_key_value_metadata, parse_table_metadata, resolve_header,
    split_inline_labels, split_name_and_timestamp,
};
pub use loader::{
    build_snapshot, load_blocks_file, load_corpus, load_markup_file, read_snapshot, try_load,
    write_snapshot,
};
pub use paragraphs::{decode_entities, extract_paragraphs};
pub use pipeline::{
    assemble_chunk, assemble_record, corpus_from, extract_blocks, extract_markup,
    messages_from_blocks, messages_from_paragraphs,
};
pub use scanner::{
    BlockRecord, Chunk, ScanStats, SegmentScanner, is_boundary, is_marker_line,
    match_block_document_id, match_boundary, match_document_id,
};
pub use store::{
    Activity, DEFAULT_LIMIT, Folder, ListEntry, ListQuery, MAX_LIMIT, MailStore, Page, Paging,
    SortOrder, parse_sent_date,
};
pub use types::*;
