//! Body assembly and snippet derivation

use crate::scanner::is_marker_line;

/// Appended to a snippet whose body was longer than the budget
pub const ELLIPSIS: char = '…';

/// Join the lines after the header block into a body.
///
/// Residual boundary and identifier lines are dropped. Blank lines are
/// dropped too, so paragraphs end up separated by exactly one blank line.
#[must_use]
pub fn assemble_body(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !is_marker_line(line))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Join block-stream body parts the same way
#[must_use]
pub fn join_parts(parts: &[String]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First `budget` characters of the body with whitespace runs collapsed to
/// single spaces, plus [`ELLIPSIS`] when the body was longer.
#[must_use]
pub fn make_snippet(body: &str, budget: usize) -> String {
    let prefix: String = body.chars().take(budget).collect();
    let mut snippet = prefix.split_whitespace().collect::<Vec<_>>().join(" ");

    if body.chars().count() > budget {
        snippet.push(ELLIPSIS);
    }
    snippet
}
