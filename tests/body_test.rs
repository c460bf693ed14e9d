use release_mail_extract::*;

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(ToString::to_string).collect()
}

#[test]
fn test_assemble_body_joins_paragraphs() {
    let body = assemble_body(&lines(&["  Please see attached. ", "", "Thanks, J"]));

    assert_eq!(body, "Please see attached.\n\nThanks, J");
}

#[test]
fn test_assemble_body_drops_marker_lines() {
    let body = assemble_body(&lines(&[
        "page one",
        "UNCLASSIFIED U.S. Department of State Case No. F-2014-20439 Doc No. C05739545 Date: 05/13/2015",
        "RELEASE IN PART B6",
        "page two",
    ]));

    assert_eq!(body, "page one\n\npage two");
}

#[test]
fn test_assemble_body_empty() {
    assert_eq!(assemble_body(&[]), "");
    assert_eq!(assemble_body(&lines(&["", "  "])), "");
}

#[test]
fn test_join_parts() {
    let body = join_parts(&lines(&["First part", " ", "Second part\nwith a break"]));

    assert_eq!(body, "First part\n\nSecond part\nwith a break");
}

// --- Snippets ---

#[test]
fn test_snippet_collapses_whitespace() {
    assert_eq!(
        make_snippet("Please see attached.\n\nThanks, J", 80),
        "Please see attached. Thanks, J"
    );
}

#[test]
fn test_snippet_within_budget_has_no_ellipsis() {
    let body = "a".repeat(80);

    assert_eq!(make_snippet(&body, 80), body);
}

#[test]
fn test_snippet_over_budget_gets_ellipsis() {
    let body = "b".repeat(81);

    let snippet = make_snippet(&body, 80);

    assert_eq!(snippet.chars().count(), 81);
    assert!(snippet.ends_with(ELLIPSIS));
    assert!(snippet.starts_with(&"b".repeat(80)));
}

#[test]
fn test_snippet_counts_characters_not_bytes() {
    let body = "é".repeat(120);

    let snippet = make_snippet(&body, 120);

    assert_eq!(snippet, body);
}

#[test]
fn test_snippet_of_empty_body() {
    assert_eq!(make_snippet("", 80), "");
}
