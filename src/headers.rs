//! Header field recovery
//!
//! Markup chunks carry their From/To/Sent/Subject header in a handful of
//! layouts mangled by OCR. Recovery runs an ordered list of strategies over
//! the leading lines of a chunk. Each strategy only fills fields that are
//! still empty, so an earlier strategy always wins.
//!
//! Block-stream metadata arrives in `Key Value` or `Table` blocks and is
//! parsed by [`parse_key_value_metadata`] and [`parse_table_metadata`].

use crate::config::ExtractConfig;
use crate::scanner::is_marker_line;
use regex::Regex;
use std::sync::LazyLock;

/// The inline header must sit on one of the first three lines
const INLINE_HEADER_LINES: usize = 3;

static INLINE_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)From:\s*.+\s+(?:To:\s*.+\s+Sent:|Sent:\s*.+\s+To:)").unwrap()
});

// Mid-line labels need their colon; a bare `Subject` only counts at line
// start, through `LEADING_LABEL_REGEX`.
static LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(From|To|Sent|Cc|Subject)\s*:").unwrap());

static LEADING_LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(?:(From|Sent|To)\s*:|(Subject)\b\s*:?|(Cc)\b\s*:?)\s*(.*)$").unwrap()
});

static EMBEDDED_INLINE_FROM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Sent:\s*.+To:\s").unwrap());

static EMBEDDED_INLINE_SENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)To:\s*.+Subject:").unwrap());

static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)original\s+message").unwrap());

// Optional weekday, month name, day, year, optional clock time.
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?\s*,?\s*)?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s*\d{4}(?:\s+\d{1,2}:\d{2}(?::\d{2})?(?:\s*[ap]\.?m\.?)?)?",
    )
    .unwrap()
});

static BRACKETED_ADDRESS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]+)>").unwrap());

static NUMERIC_DATE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{2,4}").unwrap());

static CLOCK_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d{1,2}:\d{2}\s*[AP]M").unwrap());

static KEY_VALUE_INLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)From:\s*.+(?:\n|Sent:)").unwrap());

static KEY_VALUE_LEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*From:\s*").unwrap());

static TABLE_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)From:\s*\|").unwrap());

static TABLE_CELL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\|\s*(From|To|Sent|Subject):\s*\|\s*([^|]+)").unwrap()
});

/// Header label recognised at the start of a line or inside an inline header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    From,
    To,
    Sent,
    Subject,
    Cc,
}

impl Label {
    fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "from" => Self::From,
            "to" => Self::To,
            "sent" => Self::Sent,
            "subject" => Self::Subject,
            _ => Self::Cc,
        }
    }
}

/// Recovered header values, raw and trimmed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    pub from: String,
    pub to: String,
    pub sent: String,
    pub subject: String,
}

impl HeaderFields {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from.is_empty() && self.to.is_empty() && self.sent.is_empty() && self.subject.is_empty()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty() && !self.sent.is_empty() && !self.subject.is_empty()
    }

    /// Set a field only if it is still empty. Returns whether it was set.
    /// `Cc` has no field and is never set.
    pub fn set_if_empty(&mut self, label: Label, value: &str) -> bool {
        let value = value.trim();
        let slot = match label {
            Label::From => &mut self.from,
            Label::To => &mut self.to,
            Label::Sent => &mut self.sent,
            Label::Subject => &mut self.subject,
            Label::Cc => return false,
        };
        if !slot.is_empty() || value.is_empty() {
            return false;
        }
        *slot = value.to_string();
        true
    }

    /// Fill the empty fields from another set of fields. Fields already set
    /// are kept, so an earlier metadata block wins over a later quoted one.
    pub fn fill_from(&mut self, other: &Self) {
        self.set_if_empty(Label::From, &other.from);
        self.set_if_empty(Label::To, &other.to);
        self.set_if_empty(Label::Sent, &other.sent);
        self.set_if_empty(Label::Subject, &other.subject);
    }
}

/// Working state threaded through the strategies
#[derive(Debug, Clone)]
pub struct HeaderScan {
    pub fields: HeaderFields,

    /// Window lines consumed as header material
    claimed: Vec<bool>,

    /// Set once a strategy has recognised the whole header block
    complete: bool,
}

impl HeaderScan {
    fn new(window: usize) -> Self {
        Self {
            fields: HeaderFields::default(),
            claimed: vec![false; window],
            complete: false,
        }
    }

    fn claim(&mut self, idx: usize) {
        if let Some(slot) = self.claimed.get_mut(idx) {
            *slot = true;
        }
    }

    fn is_claimed(&self, idx: usize) -> bool {
        self.claimed.get(idx).copied().unwrap_or(false)
    }

    /// Index of the first line after the last claimed header line
    #[must_use]
    pub fn body_start(&self) -> usize {
        self.claimed.iter().rposition(|&c| c).map_or(0, |idx| idx + 1)
    }
}

/// Outcome of header recovery for one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
    pub fields: HeaderFields,

    /// Chunk line index where the body begins
    pub body_start: usize,
}

type Strategy = fn(&[String], &ExtractConfig, HeaderScan) -> HeaderScan;

/// Strategies in precedence order
const STRATEGIES: [Strategy; 4] = [
    inline_header,
    labeled_lines,
    name_and_timestamp,
    subject_sniff,
];

/// Recover header fields from the leading lines of a chunk
#[must_use]
pub fn resolve_header(lines: &[String], config: &ExtractConfig) -> ResolvedHeader {
    let window = &lines[..lines.len().min(config.header_line_cap)];

    let scan = STRATEGIES
        .iter()
        .fold(HeaderScan::new(window.len()), |scan, strategy| {
            strategy(window, config, scan)
        });

    ResolvedHeader {
        body_start: scan.body_start(),
        fields: scan.fields,
    }
}

/// `From: … To: … Sent: … Subject: …` on a single line near the top. When
/// found, that line is the whole header block.
fn inline_header(lines: &[String], _config: &ExtractConfig, mut scan: HeaderScan) -> HeaderScan {
    let Some(idx) = lines
        .iter()
        .take(INLINE_HEADER_LINES)
        .position(|line| INLINE_HEADER_REGEX.is_match(line))
    else {
        return scan;
    };

    for (label, value) in split_inline_labels(&lines[idx]) {
        scan.fields.set_if_empty(label, value);
    }
    scan.claim(idx);
    scan.complete = true;
    scan
}

/// `From:`/`Sent:`/`To:`/`Subject:`/`Cc:` lines in any order. A label alone
/// on its line takes the following line as its value.
fn labeled_lines(lines: &[String], config: &ExtractConfig, mut scan: HeaderScan) -> HeaderScan {
    if scan.complete {
        return scan;
    }

    let mut pending: Option<Label> = None;

    for (idx, line) in lines.iter().enumerate() {
        if scan.fields.is_complete() {
            break;
        }

        let t = line.trim();
        if is_marker_line(t) {
            break;
        }
        if scan.is_claimed(idx) || is_separator(t) || too_long(t, config.header_line_max_chars) {
            pending = None;
            continue;
        }

        if let Some((label, value)) = leading_label(t) {
            if value.is_empty() {
                pending = Some(label);
                scan.claim(idx);
                continue;
            }
            pending = None;

            let accepted = match label {
                Label::From => !EMBEDDED_INLINE_FROM_REGEX.is_match(value),
                Label::Sent => !EMBEDDED_INLINE_SENT_REGEX.is_match(value),
                Label::To | Label::Subject => true,
                Label::Cc => idx > 0 && scan.is_claimed(idx - 1),
            };
            if accepted && (label == Label::Cc || scan.fields.set_if_empty(label, value)) {
                scan.claim(idx);
            }
            continue;
        }

        let Some(label) = pending.take() else {
            continue;
        };
        if t.is_empty() {
            pending = Some(label);
            continue;
        }
        if split_name_and_timestamp(t).is_some() {
            continue;
        }
        if label == Label::Cc || scan.fields.set_if_empty(label, t) {
            scan.claim(idx);
        }
    }

    scan
}

/// A line holding an address and a `Month Day, Year` timestamp is the sender
/// plus sent time. Only used when no `From:` label supplied the sender.
fn name_and_timestamp(
    lines: &[String],
    config: &ExtractConfig,
    mut scan: HeaderScan,
) -> HeaderScan {
    if scan.complete || !scan.fields.from.is_empty() {
        return scan;
    }

    for (idx, line) in lines.iter().enumerate() {
        let t = line.trim();
        if is_marker_line(t) {
            break;
        }
        if scan.is_claimed(idx) || is_separator(t) || too_long(t, config.header_line_max_chars) {
            continue;
        }
        if let Some((from, sent)) = split_name_and_timestamp(t) {
            scan.fields.set_if_empty(Label::From, &from);
            scan.fields.set_if_empty(Label::Sent, sent);
            scan.claim(idx);
            break;
        }
    }

    scan
}

/// The first remaining short, plain line becomes the subject
fn subject_sniff(lines: &[String], config: &ExtractConfig, mut scan: HeaderScan) -> HeaderScan {
    if scan.complete || !scan.fields.subject.is_empty() {
        return scan;
    }

    for (idx, line) in lines.iter().enumerate() {
        let t = line.trim();
        if is_marker_line(t) {
            break;
        }
        if t.is_empty() || scan.is_claimed(idx) {
            continue;
        }
        if looks_like_subject(t, config.subject_max_chars) {
            scan.fields.set_if_empty(Label::Subject, t);
            scan.claim(idx);
            break;
        }
    }

    scan
}

fn looks_like_subject(t: &str, max_chars: usize) -> bool {
    t.chars().count() < max_chars
        && leading_label(t).is_none()
        && !is_separator(t)
        && !t.starts_with('-')
        && !t.starts_with('—')
        && !NUMERIC_DATE_PREFIX_REGEX.is_match(t)
        && !CLOCK_TIME_REGEX.is_match(t)
        && split_name_and_timestamp(t).is_none()
}

/// "Original Message" and forwarding separators
#[must_use]
pub fn is_separator(line: &str) -> bool {
    SEPARATOR_REGEX.is_match(line)
}

fn too_long(t: &str, max_chars: usize) -> bool {
    t.chars().count() > max_chars
}

/// Label at the start of a line and the (possibly empty) value after it
#[must_use]
pub fn leading_label(line: &str) -> Option<(Label, &str)> {
    let caps = LEADING_LABEL_REGEX.captures(line)?;
    let name = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
    let value = caps.get(4).map_or("", |m| m.as_str().trim());
    Some((Label::parse(name.as_str()), value))
}

/// Split a line with several labels into `(label, value)` pairs, each value
/// running up to the next label. A subject runs to the end of the line. Later
/// repeats of a label are kept in order; callers decide which occurrence wins.
#[must_use]
pub fn split_inline_labels(line: &str) -> Vec<(Label, &str)> {
    let mut labels: Vec<(Label, usize, usize)> = LABEL_REGEX
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some((Label::parse(&caps[1]), whole.start(), whole.end()))
        })
        .collect();
    if let Some(subject) = labels.iter().position(|&(label, _, _)| label == Label::Subject) {
        labels.truncate(subject + 1);
    }

    labels
        .iter()
        .enumerate()
        .map(|(i, &(label, _, value_start))| {
            let value_end = labels.get(i + 1).map_or(line.len(), |&(_, start, _)| start);
            (label, line[value_start..value_end].trim())
        })
        .collect()
}

/// Split `Name <address> Monday, June 1, 2009 1:09 PM` into sender and
/// timestamp. Requires an `@` and a month-name date.
#[must_use]
pub fn split_name_and_timestamp(line: &str) -> Option<(String, &str)> {
    if !line.contains('@') {
        return None;
    }
    let stamp = TIMESTAMP_REGEX.find(line)?;

    let from = match BRACKETED_ADDRESS_REGEX.captures(line) {
        Some(caps) => {
            let whole = caps.get(0)?;
            let name = line[..whole.start()].trim();
            let address = caps[1].trim();
            if name.is_empty() {
                format!("<{address}>")
            } else {
                format!("{name} <{address}>")
            }
        }
        None => line[..stamp.start()]
            .trim()
            .trim_end_matches(',')
            .trim()
            .to_string(),
    };

    if from.is_empty() {
        return None;
    }
    Some((from, stamp.as_str().trim()))
}

/// Whether a `Key Value` block carries message metadata
#[must_use]
pub fn is_key_value_header(content: &str) -> bool {
    KEY_VALUE_INLINE_REGEX.is_match(content) || KEY_VALUE_LEADING_REGEX.is_match(content)
}

/// Parse `Label: value` metadata out of a `Key Value` block. A labelled
/// line's value is the rest of the line; only a line shaped like an inline
/// header is split on its labels. The first occurrence of each label wins.
#[must_use]
pub fn parse_key_value_metadata(content: &str) -> HeaderFields {
    let mut fields = HeaderFields::default();
    for line in content.lines().map(str::trim) {
        if INLINE_HEADER_REGEX.is_match(line) {
            for (label, value) in split_inline_labels(line) {
                fields.set_if_empty(label, value);
            }
        } else if let Some((label, value)) = leading_label(line) {
            fields.set_if_empty(label, value);
        }
    }
    fields
}

/// Whether a `Table` block is a `| From: | … |` metadata table
#[must_use]
pub fn is_table_header(content: &str) -> bool {
    TABLE_HEADER_REGEX.is_match(content)
}

/// Parse `| Label: | value |` rows out of a metadata table
#[must_use]
pub fn parse_table_metadata(content: &str) -> HeaderFields {
    let mut fields = HeaderFields::default();
    for caps in TABLE_CELL_REGEX.captures_iter(content) {
        fields.set_if_empty(Label::parse(&caps[1]), &caps[2]);
    }
    fields
}
