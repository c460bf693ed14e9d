//! Core types for extracted messages and contacts

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Subject used when no subject could be recovered from a markup chunk
pub const NO_SUBJECT: &str = "(No subject)";

/// A message record recovered from one chunk of the corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Release-control document number (e.g. `C05739545`)
    pub id: String,

    /// Redaction status announced by the boundary marker
    #[serde(default)]
    pub release_type: ReleaseType,

    /// Raw sender text, display name and address as printed
    #[serde(default)]
    pub from: String,

    /// Raw recipient text
    #[serde(default)]
    pub to: String,

    /// Raw timestamp text, not guaranteed to parse as a date
    #[serde(default)]
    pub sent: String,

    #[serde(default)]
    pub subject: String,

    /// Free text after the header block, paragraphs separated by blank lines
    #[serde(default)]
    pub body: String,

    /// Whitespace-collapsed prefix of the body
    #[serde(default)]
    pub snippet: String,

    /// Whether the sender matched the self-identity indicators
    #[serde(default)]
    pub is_sent: bool,
}

/// Redaction status of a released document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ReleaseType {
    /// Released without redactions
    #[default]
    Full,

    /// Released with redactions under the given exemption code (e.g. `B6`)
    Part(String),
}

impl ReleaseType {
    /// Build from the capture of a boundary marker (`FULL` or `PART B6`)
    #[must_use]
    pub fn from_marker(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();
        upper
            .strip_prefix("PART")
            .map_or(Self::Full, |code| Self::Part(code.trim().to_string()))
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "FULL"),
            Self::Part(code) => write!(f, "PART {code}"),
        }
    }
}

impl FromStr for ReleaseType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_marker(s))
    }
}

impl Serialize for ReleaseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReleaseType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_marker(&raw))
    }
}

/// A participant aggregated over all messages' `from` and `to` values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Raw participant text as first seen
    pub name: String,

    /// Display text, identical to `name` for extracted corpora
    pub display: String,

    /// Number of `from`/`to` occurrences matching this contact's key
    pub count: usize,
}

impl Contact {
    /// Case-insensitive, trimmed key used to merge occurrences
    #[must_use]
    pub fn key_of(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    #[must_use]
    pub fn key(&self) -> String {
        Self::key_of(&self.name)
    }
}

/// The output pair of one corpus load: messages in corpus order plus the
/// frequency-ranked contact index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(rename = "emails", default)]
    pub messages: Vec<Message>,

    #[serde(rename = "people", default)]
    pub contacts: Vec<Contact>,
}

impl Corpus {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Which raw encoding a message was recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Paragraph stream pulled out of the markup release
    Markup,

    /// Pre-segmented, type-tagged block stream
    Blocks,
}

impl Encoding {
    /// Snippet length in characters before the ellipsis marker
    #[must_use]
    pub const fn snippet_budget(self) -> usize {
        match self {
            Self::Markup => 80,
            Self::Blocks => 120,
        }
    }

    /// Subject stored when none was recovered
    #[must_use]
    pub const fn subject_placeholder(self) -> &'static str {
        match self {
            Self::Markup => NO_SUBJECT,
            Self::Blocks => "",
        }
    }
}
