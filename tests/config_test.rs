use release_mail_extract::*;

#[test]
fn test_default_config() {
    let config = ExtractConfig::default();

    assert_eq!(config.header_line_cap, 25);
    assert_eq!(config.subject_max_chars, 250);
    assert_eq!(config.header_line_max_chars, 400);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config: ExtractConfig = serde_json::from_str(r#"{"header_line_cap": 10}"#).unwrap();

    assert_eq!(config.header_line_cap, 10);
    assert_eq!(config.subject_max_chars, 250);
    assert_eq!(config.self_identity, SelfIdentity::default());
}

// --- Self identity ---

#[test]
fn test_self_identity_matches() {
    let identity = SelfIdentity::default();

    assert!(identity.matches("H"));
    assert!(identity.matches("  H "));
    assert!(identity.matches("H <hrod17@clintonemail.com>"));
    assert!(identity.matches("'H 'hrod17@clintonemail.com'"));
    assert!(identity.matches("Hillary Clinton"));
    assert!(identity.matches("HDR22@CLINTONEMAIL.COM"));
}

#[test]
fn test_self_identity_rejects_others() {
    let identity = SelfIdentity::default();

    assert!(!identity.matches(""));
    assert!(!identity.matches("Huma Abedin"));
    assert!(!identity.matches("Jake Sullivan <SullivanJJ@state.gov>"));
    assert!(!identity.matches("HR15@att.blackberry.net"));
}

#[test]
fn test_custom_self_identity() {
    let identity = SelfIdentity {
        bare_signatures: vec!["JS".into()],
        signature_prefixes: Vec::new(),
        display_names: vec!["Jake Sullivan".into()],
        address_tokens: vec!["@state.gov".into()],
    };

    assert!(identity.matches("JS"));
    assert!(identity.matches("SullivanJJ@State.gov"));
    assert!(!identity.matches("H"));
}
