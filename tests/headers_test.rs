use release_mail_extract::*;

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(ToString::to_string).collect()
}

fn resolve(raw: &[&str]) -> ResolvedHeader {
    resolve_header(&lines(raw), &ExtractConfig::default())
}

// --- Inline header ---

#[test]
fn test_inline_header() {
    let header = resolve(&[
        "From: Jane Doe <jane@x.gov> To: John Roe Sent: Monday, June 1, 2009 Subject: Travel",
        "Please see attached.",
        "Thanks, J",
    ]);

    assert_eq!(header.fields.from, "Jane Doe <jane@x.gov>");
    assert_eq!(header.fields.to, "John Roe");
    assert_eq!(header.fields.sent, "Monday, June 1, 2009");
    assert_eq!(header.fields.subject, "Travel");
    assert_eq!(header.body_start, 1);
}

#[test]
fn test_inline_header_sent_before_to() {
    let header = resolve(&[
        "From: Mills, Cheryl D Sent: Friday, March 5, 2010 7:15 AM To: H Subject: Update",
        "Body",
    ]);

    assert_eq!(header.fields.from, "Mills, Cheryl D");
    assert_eq!(header.fields.sent, "Friday, March 5, 2010 7:15 AM");
    assert_eq!(header.fields.to, "H");
    assert_eq!(header.fields.subject, "Update");
}

#[test]
fn test_inline_header_wins_over_labeled_lines() {
    let header = resolve(&[
        "From: Jane Doe To: John Roe Sent: Monday, June 1, 2009 Subject: Travel",
        "From: Someone Else",
        "Subject: Other",
    ]);

    assert_eq!(header.fields.from, "Jane Doe");
    assert_eq!(header.fields.subject, "Travel");
    assert_eq!(header.body_start, 1);
}

#[test]
fn test_inline_header_only_near_top() {
    let header = resolve(&[
        "Notes",
        "More notes",
        "Still notes",
        "From: Jane Doe To: John Roe Sent: Monday, June 1, 2009 Subject: Travel",
    ]);

    assert_eq!(header.fields.subject, "Notes");
    assert!(header.fields.from.starts_with("Jane Doe"));
    assert!(header.fields.to.is_empty());
}

// --- Labeled lines ---

#[test]
fn test_labeled_lines() {
    let header = resolve(&[
        "From: Mills, Cheryl D <MillsCD@state.gov>",
        "Sent: Friday, March 5, 2010 7:15 AM",
        "To: H",
        "Subject: Update",
        "Body here",
    ]);

    assert_eq!(header.fields.from, "Mills, Cheryl D <MillsCD@state.gov>");
    assert_eq!(header.fields.sent, "Friday, March 5, 2010 7:15 AM");
    assert_eq!(header.fields.to, "H");
    assert_eq!(header.fields.subject, "Update");
    assert_eq!(header.body_start, 4);
}

#[test]
fn test_label_alone_takes_next_line() {
    let header = resolve(&["From:", "Jane Doe", "Subject:", "Lunch", "See you"]);

    assert_eq!(header.fields.from, "Jane Doe");
    assert_eq!(header.fields.subject, "Lunch");
    assert!(header.fields.to.is_empty());
    assert_eq!(header.body_start, 4);
}

#[test]
fn test_cc_adjacent_to_header_is_claimed() {
    let header = resolve(&["From: A", "To: B", "Cc: C", "Subject: S", "Body"]);

    assert_eq!(header.fields.to, "B");
    assert_eq!(header.fields.subject, "S");
    assert_eq!(header.body_start, 4);
}

#[test]
fn test_rejects_from_holding_inline_header() {
    let header = resolve(&[
        "Re: notes",
        "x",
        "y",
        "From: Jane Sent: Monday To: John",
    ]);

    assert!(header.fields.from.is_empty());
    assert_eq!(header.fields.subject, "Re: notes");
}

#[test]
fn test_first_label_occurrence_wins() {
    let header = resolve(&["From: First", "From: Second", "Subject: S"]);

    assert_eq!(header.fields.from, "First");
}

// --- Name and timestamp ---

#[test]
fn test_name_and_timestamp_line() {
    let header = resolve(&[
        "Abedin, Huma <AbedinH@state.gov> Monday, December 7, 2009 1:09 PM",
        "To: H",
        "Re: schedule",
        "Call me",
    ]);

    assert_eq!(header.fields.from, "Abedin, Huma <AbedinH@state.gov>");
    assert_eq!(header.fields.sent, "Monday, December 7, 2009 1:09 PM");
    assert_eq!(header.fields.to, "H");
    assert_eq!(header.fields.subject, "Re: schedule");
    assert_eq!(header.body_start, 3);
}

#[test]
fn test_name_and_timestamp_not_used_when_from_labeled() {
    let header = resolve(&[
        "From: Jane Doe",
        "Abedin, Huma <AbedinH@state.gov> Monday, December 7, 2009 1:09 PM",
    ]);

    assert_eq!(header.fields.from, "Jane Doe");
    assert!(header.fields.sent.is_empty());
}

#[test]
fn test_split_name_and_timestamp() {
    let (from, sent) =
        split_name_and_timestamp("<jake@state.gov> Tue, Feb 2, 2010 8:01 am").unwrap();
    assert_eq!(from, "<jake@state.gov>");
    assert_eq!(sent, "Tue, Feb 2, 2010 8:01 am");

    let (from, sent) = split_name_and_timestamp("jane@x.gov Monday, June 1, 2009").unwrap();
    assert_eq!(from, "jane@x.gov");
    assert_eq!(sent, "Monday, June 1, 2009");

    assert!(split_name_and_timestamp("Jane Doe Monday, June 1, 2009").is_none());
    assert!(split_name_and_timestamp("jane@x.gov tomorrow").is_none());
}

// --- Subject sniffing ---

#[test]
fn test_subject_sniff_skips_dates_times_and_dashes() {
    let header = resolve(&[
        "5/13/2015 memo",
        "Meeting at 10:30 AM",
        "- forwarded",
        "Budget talks",
        "text",
    ]);

    assert_eq!(header.fields.subject, "Budget talks");
    assert_eq!(header.body_start, 4);
}

#[test]
fn test_subject_sniff_skips_separator() {
    let header = resolve(&["Original Message", "Lunch plans", "See you there"]);

    assert_eq!(header.fields.subject, "Lunch plans");
    assert!(is_separator("-----Original Message-----"));
    assert!(!is_separator("Message received"));
}

#[test]
fn test_subject_sniff_respects_length_limit() {
    let long = "word ".repeat(60);
    let config = ExtractConfig::default();
    let header = resolve_header(&lines(&[long.trim(), "Short one"]), &config);

    assert_eq!(header.fields.subject, "Short one");
}

#[test]
fn test_no_header_recovered() {
    let header = resolve(&["", "   "]);

    assert!(header.fields.is_empty());
    assert_eq!(header.body_start, 0);

    let header = resolve(&[]);
    assert_eq!(header.body_start, 0);
}

#[test]
fn test_header_window_cap() {
    let raw = lines(&["", "", "From: A", "Body"]);

    let capped = ExtractConfig {
        header_line_cap: 2,
        ..ExtractConfig::default()
    };
    let header = resolve_header(&raw, &capped);
    assert!(header.fields.from.is_empty());
    assert_eq!(header.body_start, 0);

    let header = resolve_header(&raw, &ExtractConfig::default());
    assert_eq!(header.fields.from, "A");
}

#[test]
fn test_resolution_stops_at_marker_line() {
    let header = resolve(&[
        "UNCLASSIFIED U.S. Department of State Case No. F-2014-20439 Doc No. C05739545 Date: 05/13/2015",
        "From: Late Header",
    ]);

    assert!(header.fields.from.is_empty());
    assert!(header.fields.subject.is_empty());
}

// --- Label helpers ---

#[test]
fn test_leading_label() {
    assert_eq!(leading_label("From: Jane"), Some((Label::From, "Jane")));
    assert_eq!(leading_label("Subject Re: budget"), Some((Label::Subject, "Re: budget")));
    assert_eq!(leading_label("cc: John"), Some((Label::Cc, "John")));
    assert_eq!(leading_label("To:"), Some((Label::To, "")));
    assert_eq!(leading_label("Tomorrow: lunch"), None);
}

#[test]
fn test_split_inline_labels() {
    let pairs = split_inline_labels("From: A To: B Cc: C Subject: D");

    assert_eq!(
        pairs,
        vec![
            (Label::From, "A"),
            (Label::To, "B"),
            (Label::Cc, "C"),
            (Label::Subject, "D"),
        ]
    );
}

#[test]
fn test_split_inline_labels_needs_colon_mid_line() {
    let pairs = split_inline_labels("From: A To: B Sent: C Subject: subject matter experts");

    assert_eq!(pairs[3], (Label::Subject, "subject matter experts"));
    assert_eq!(pairs.len(), 4);
}

#[test]
fn test_split_inline_labels_subject_runs_to_end() {
    let pairs = split_inline_labels("From: A Sent: B To: C Subject: Reply to: Cheryl's note");

    assert_eq!(pairs.last(), Some(&(Label::Subject, "Reply to: Cheryl's note")));
    assert_eq!(pairs[2], (Label::To, "C"));
}

#[test]
fn test_inline_header_subject_with_label_words() {
    let header = resolve(&[
        "From: Jane To: John Sent: Monday, June 1, 2009 Subject: Subject matter experts",
        "Body",
    ]);

    assert_eq!(header.fields.to, "John");
    assert_eq!(header.fields.subject, "Subject matter experts");
}

#[test]
fn test_header_fields_set_if_empty() {
    let mut fields = HeaderFields::default();

    assert!(fields.set_if_empty(Label::From, "  Jane  "));
    assert!(!fields.set_if_empty(Label::From, "John"));
    assert!(!fields.set_if_empty(Label::To, "   "));
    assert!(!fields.set_if_empty(Label::Cc, "Copy"));
    assert_eq!(fields.from, "Jane");
    assert!(fields.to.is_empty());
    assert!(!fields.is_complete());
}

// --- Block metadata ---

#[test]
fn test_key_value_metadata() {
    let content = "From: Jane\nTo: John\nSent: Tuesday, June 2, 2009\nSubject: Hi\nFrom: Other";

    assert!(is_key_value_header(content));
    let fields = parse_key_value_metadata(content);

    assert_eq!(fields.from, "Jane");
    assert_eq!(fields.to, "John");
    assert_eq!(fields.sent, "Tuesday, June 2, 2009");
    assert_eq!(fields.subject, "Hi");
    assert!(fields.is_complete());
}

#[test]
fn test_key_value_value_is_rest_of_line() {
    let fields = parse_key_value_metadata("From: Jane Doe\nSubject: Re: The subject of the memo");
    assert_eq!(fields.from, "Jane Doe");
    assert_eq!(fields.subject, "Re: The subject of the memo");

    let fields = parse_key_value_metadata("From: Jane Doe\nSubject: Reply to: Cheryl's note");
    assert_eq!(fields.subject, "Reply to: Cheryl's note");
    assert!(fields.to.is_empty());
}

#[test]
fn test_key_value_header_detection() {
    assert!(is_key_value_header("From: Jane Sent: Monday"));
    assert!(is_key_value_header("Notes\nFrom: Jane"));
    assert!(!is_key_value_header("Location: Room 7"));
}

#[test]
fn test_table_metadata() {
    let content = "| From: | Jane Doe |\n| Sent: | Monday, June 1, 2009 |\n| Subject: | Plans |";

    assert!(is_table_header(content));
    assert!(!is_table_header("| Name | Room |"));

    let fields = parse_table_metadata(content);
    assert_eq!(fields.from, "Jane Doe");
    assert_eq!(fields.sent, "Monday, June 1, 2009");
    assert_eq!(fields.subject, "Plans");
    assert!(fields.to.is_empty());
}
