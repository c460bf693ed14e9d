//! Read-only queries over an extracted corpus
//!
//! The store takes ownership of a [`Corpus`] snapshot and never mutates it;
//! a reload builds a new store.

use crate::error::{ExtractError, Result};
use crate::types::{Contact, Corpus, Message};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 100;

const ACTIVITY_YEARS: std::ops::RangeInclusive<i32> = 1990..=2030;

static MONTH_NAME_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2}),?\s*(\d{4})\b",
    )
    .unwrap()
});

static NUMERIC_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b").unwrap());

/// Which side of the mailbox to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Folder {
    #[default]
    Inbox,
    Sent,
}

impl FromStr for Folder {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "inbox" | "" => Ok(Self::Inbox),
            "sent" => Ok(Self::Sent),
            other => Err(ExtractError::InvalidQuery(format!("unknown folder: {other}"))),
        }
    }
}

/// Listing order. Dates compare as raw `sent` strings; subjects compare
/// case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Date,
    DateAsc,
    Subject,
}

impl FromStr for SortOrder {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" | "" => Ok(Self::Date),
            "date_asc" => Ok(Self::DateAsc),
            "subject" => Ok(Self::Subject),
            other => Err(ExtractError::InvalidQuery(format!("unknown sort: {other}"))),
        }
    }
}

/// Page number and size; out-of-range values are clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: usize,
    pub limit: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Paging {
    #[must_use]
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub folder: Folder,

    /// Case-insensitive substring of `from` or `to`
    pub person: Option<String>,

    pub sort: SortOrder,
    pub paging: Paging,
}

/// Message summary without the body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub id: String,
    pub from: String,
    pub to: String,
    pub sent: String,
    pub subject: String,
    pub snippet: String,
}

impl From<&Message> for ListEntry {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id.clone(),
            from: m.from.clone(),
            to: m.to.clone(),
            sent: m.sent.clone(),
            subject: m.subject.clone(),
            snippet: m.snippet.clone(),
        }
    }
}

/// One page of listing results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "emails")]
    pub entries: Vec<ListEntry>,
}

/// Per-day message counts for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub year: i32,

    /// `YYYY-MM-DD` to message count
    pub counts: BTreeMap<String, usize>,
    pub total: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MailStore {
    corpus: Corpus,
}

impl MailStore {
    #[must_use]
    pub const fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    #[must_use]
    pub const fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Message> {
        self.corpus.messages.iter().find(|m| m.id == id)
    }

    /// Folder, participant filter, sort and pagination
    #[must_use]
    pub fn list(&self, query: &ListQuery) -> Page {
        let person = query.person.as_deref().map(str::trim).unwrap_or_default();

        let mut list: Vec<&Message> = self
            .corpus
            .messages
            .iter()
            .filter(|m| query.folder == Folder::Inbox || m.is_sent)
            .filter(|m| matches_person(m, person))
            .collect();

        sort_messages(&mut list, query.sort);
        paginate(&list, query.paging)
    }

    /// Substring search across subject, participants, body and snippet,
    /// newest `sent` first
    #[must_use]
    pub fn search(&self, q: &str, paging: Paging) -> Page {
        let needle = q.trim().to_lowercase();

        let mut list: Vec<&Message> = self
            .corpus
            .messages
            .iter()
            .filter(|m| matches_search(m, &needle))
            .collect();

        sort_messages(&mut list, SortOrder::Date);
        paginate(&list, paging)
    }

    /// Contacts whose name or display text contains the filter
    #[must_use]
    pub fn contacts(&self, filter: Option<&str>) -> Vec<&Contact> {
        let needle = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();

        self.corpus
            .contacts
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.display.to_lowercase().contains(&needle)
                    || c.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Messages per day for a year. Messages whose `sent` does not parse as
    /// a date are not counted.
    pub fn activity(&self, year: i32) -> Result<Activity> {
        if !ACTIVITY_YEARS.contains(&year) {
            return Err(ExtractError::InvalidQuery(format!("year out of range: {year}")));
        }

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for date in self
            .corpus
            .messages
            .iter()
            .filter_map(|m| parse_sent_date(&m.sent))
            .filter(|d| d.year() == year)
        {
            *counts.entry(date.format("%Y-%m-%d").to_string()).or_default() += 1;
        }

        let total = counts.values().sum();
        Ok(Activity {
            year,
            counts,
            total,
        })
    }

    /// Messages sent on a `YYYY-MM-DD` day, newest `sent` first
    pub fn by_date(&self, day: &str, paging: Paging) -> Result<Page> {
        let day = NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d")
            .map_err(|_| ExtractError::InvalidQuery(format!("invalid date: {day}")))?;

        let mut list: Vec<&Message> = self
            .corpus
            .messages
            .iter()
            .filter(|m| parse_sent_date(&m.sent) == Some(day))
            .collect();

        sort_messages(&mut list, SortOrder::Date);
        Ok(paginate(&list, paging))
    }
}

/// Recover a calendar date from raw `sent` text: `Month D, YYYY` or
/// `M/D/YYYY` (two-digit years are taken as 20xx)
#[must_use]
pub fn parse_sent_date(sent: &str) -> Option<NaiveDate> {
    if let Some(caps) = MONTH_NAME_DATE_REGEX.captures(sent) {
        let month = month_number(&caps[1])?;
        let day = caps[2].parse().ok()?;
        let year = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let caps = NUMERIC_DATE_REGEX.captures(sent)?;
    let month = caps[1].parse().ok()?;
    let day = caps[2].parse().ok()?;
    let mut year: i32 = caps[3].parse().ok()?;
    if caps[3].len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn matches_person(m: &Message, person: &str) -> bool {
    if person.is_empty() {
        return true;
    }
    let p = person.to_lowercase();
    m.from.to_lowercase().contains(&p) || m.to.to_lowercase().contains(&p)
}

fn matches_search(m: &Message, needle: &str) -> bool {
    needle.is_empty()
        || [&m.subject, &m.from, &m.to, &m.body, &m.snippet]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

fn sort_messages(list: &mut [&Message], order: SortOrder) {
    match order {
        SortOrder::Date => list.sort_by(|a, b| b.sent.cmp(&a.sent)),
        SortOrder::DateAsc => list.sort_by(|a, b| a.sent.cmp(&b.sent)),
        SortOrder::Subject => list.sort_by_cached_key(|m| m.subject.to_lowercase()),
    }
}

fn paginate(list: &[&Message], paging: Paging) -> Page {
    let paging = Paging::new(paging.page, paging.limit);
    let start = (paging.page - 1).saturating_mul(paging.limit);

    Page {
        total: list.len(),
        page: paging.page,
        limit: paging.limit,
        entries: list
            .iter()
            .skip(start)
            .take(paging.limit)
            .map(|m| ListEntry::from(*m))
            .collect(),
    }
}
