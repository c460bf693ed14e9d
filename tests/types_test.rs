use release_mail_extract::*;

// --- Release type ---

#[test]
fn test_release_type_from_marker() {
    assert_eq!(ReleaseType::from_marker("FULL"), ReleaseType::Full);
    assert_eq!(
        ReleaseType::from_marker("part b6"),
        ReleaseType::Part("B6".into())
    );
    assert_eq!(
        "PART  B5".parse::<ReleaseType>(),
        Ok(ReleaseType::Part("B5".into()))
    );
}

#[test]
fn test_release_type_display() {
    assert_eq!(ReleaseType::Full.to_string(), "FULL");
    assert_eq!(ReleaseType::Part("B6".into()).to_string(), "PART B6");
}

#[test]
fn test_release_type_serde_as_string() {
    let json = serde_json::to_string(&ReleaseType::Part("B6".into())).unwrap();
    assert_eq!(json, "\"PART B6\"");

    let parsed: ReleaseType = serde_json::from_str("\"FULL\"").unwrap();
    assert_eq!(parsed, ReleaseType::Full);
}

// --- Message ---

#[test]
fn test_message_camel_case_fields() {
    let message = Message {
        id: "C05000001".into(),
        is_sent: true,
        ..Message::default()
    };

    let json = serde_json::to_value(&message).unwrap();

    assert_eq!(json["id"], "C05000001");
    assert_eq!(json["releaseType"], "FULL");
    assert_eq!(json["isSent"], true);
    assert!(json.get("is_sent").is_none());
}

#[test]
fn test_message_missing_fields_default() {
    let message: Message = serde_json::from_str(r#"{"id": "C05000002"}"#).unwrap();

    assert_eq!(message.id, "C05000002");
    assert_eq!(message.release_type, ReleaseType::Full);
    assert!(message.subject.is_empty());
    assert!(!message.is_sent);
}

#[test]
fn test_corpus_json_keys() {
    let corpus: Corpus = serde_json::from_str(
        r#"{"emails": [{"id": "C1", "from": "Jane"}], "people": [{"name": "Jane", "display": "Jane", "count": 1}]}"#,
    )
    .unwrap();

    assert_eq!(corpus.messages.len(), 1);
    assert_eq!(corpus.contacts[0].count, 1);
    assert!(!corpus.is_empty());
    assert!(Corpus::default().is_empty());
}

// --- Contact ---

#[test]
fn test_contact_key() {
    assert_eq!(Contact::key_of("  Jane DOE "), "jane doe");

    let contact = Contact {
        name: "Jane Doe".into(),
        display: "Jane Doe".into(),
        count: 1,
    };
    assert_eq!(contact.key(), "jane doe");
}

// --- Encoding ---

#[test]
fn test_encoding_constants() {
    assert_eq!(Encoding::Markup.snippet_budget(), 80);
    assert_eq!(Encoding::Blocks.snippet_budget(), 120);
    assert_eq!(Encoding::Markup.subject_placeholder(), NO_SUBJECT);
    assert_eq!(Encoding::Blocks.subject_placeholder(), "");
}
