//! Contact index built from message participants

use crate::types::{Contact, Message};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Aggregate every non-empty `from` and `to` value into contacts ranked by
/// occurrence count.
///
/// Values are merged on their trimmed, lower-cased form only; the first
/// spelling seen is kept for display. Ties keep first-seen order, so the
/// result is reproducible for a given message sequence.
#[must_use]
pub fn build_contact_index(messages: &[Message]) -> Vec<Contact> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut contacts: Vec<Contact> = Vec::new();

    let participants = messages
        .iter()
        .flat_map(|m| [m.from.as_str(), m.to.as_str()])
        .map(str::trim)
        .filter(|raw| !raw.is_empty());

    for raw in participants {
        match positions.entry(Contact::key_of(raw)) {
            Entry::Occupied(entry) => contacts[*entry.get()].count += 1,
            Entry::Vacant(entry) => {
                entry.insert(contacts.len());
                contacts.push(Contact {
                    name: raw.to_string(),
                    display: raw.to_string(),
                    count: 1,
                });
            }
        }
    }

    contacts.sort_by(|a, b| b.count.cmp(&a.count));
    contacts
}
