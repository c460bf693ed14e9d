//! Configuration for the extraction pipeline and its inputs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tunables for header recovery and sender classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Only this many leading chunk lines are inspected for header fields
    pub header_line_cap: usize,

    /// Longest line accepted as a sniffed subject, in characters
    pub subject_max_chars: usize,

    /// Longer lines are never treated as header material
    pub header_line_max_chars: usize,

    /// Indicators that mark a message as sent by the archive owner
    pub self_identity: SelfIdentity,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            header_line_cap: 25,
            subject_max_chars: 250,
            header_line_max_chars: 400,
            self_identity: SelfIdentity::default(),
        }
    }
}

/// Fixed set of indicators identifying the archive owner as sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfIdentity {
    /// Whole `from` values that are a bare signature (compared trimmed)
    pub bare_signatures: Vec<String>,

    /// Prefixes of `from` that are a signature followed by an address
    pub signature_prefixes: Vec<String>,

    /// Display names, matched case-sensitively anywhere in `from`
    pub display_names: Vec<String>,

    /// Address fragments, matched case-insensitively anywhere in `from`
    pub address_tokens: Vec<String>,
}

impl Default for SelfIdentity {
    fn default() -> Self {
        Self {
            bare_signatures: vec!["H".into()],
            signature_prefixes: vec!["H <".into(), "H<".into(), "'H ".into()],
            display_names: vec!["Hillary Clinton".into()],
            address_tokens: vec!["hdr22@".into(), "clintonemail.com".into()],
        }
    }
}

impl SelfIdentity {
    /// Check whether a raw `from` value identifies the archive owner
    #[must_use]
    pub fn matches(&self, from: &str) -> bool {
        let trimmed = from.trim();
        if trimmed.is_empty() {
            return false;
        }

        if self.bare_signatures.iter().any(|s| s == trimmed) {
            return true;
        }

        if self
            .signature_prefixes
            .iter()
            .any(|p| trimmed.starts_with(p.as_str()))
        {
            return true;
        }

        if self
            .display_names
            .iter()
            .any(|n| trimmed.contains(n.as_str()))
        {
            return true;
        }

        let lower = trimmed.to_lowercase();
        self.address_tokens
            .iter()
            .any(|t| lower.contains(&t.to_lowercase()))
    }
}

/// Locations of the raw inputs and the persisted snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePaths {
    /// Block-stream JSON document, preferred when present
    pub blocks: Option<PathBuf>,

    /// Previously written snapshot of the output pair
    pub snapshot: Option<PathBuf>,

    /// Markup release used to build a snapshot
    pub markup: Option<PathBuf>,
}
