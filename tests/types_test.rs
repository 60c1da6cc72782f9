use email_synth::*;

// --- Participant ---

#[test]
fn test_participant_display_bare() {
    assert_eq!(Participant::new("alice@test.com").to_string(), "alice@test.com");
}

#[test]
fn test_participant_display_with_name() {
    let p = Participant::new("test2@test.com").with_name("Red Rover");
    assert_eq!(p.to_string(), "test2@test.com \"Red Rover\"");
}

#[test]
fn test_participant_from_str() {
    let p: Participant = "bob@test.com".into();
    assert_eq!(p.address, "bob@test.com");
    assert!(p.display_name.is_none());
}

#[test]
fn test_participant_parse_rendered_form() {
    let p = Participant::parse("test3@test.com \"Humpty Dumpty\"").unwrap();
    assert_eq!(p.address, "test3@test.com");
    assert_eq!(p.display_name.as_deref(), Some("Humpty Dumpty"));
}

#[test]
fn test_participant_parse_angle_form() {
    let p = Participant::parse("John Doe <john@example.com>").unwrap();
    assert_eq!(p.address, "john@example.com");
    assert_eq!(p.display_name.as_deref(), Some("John Doe"));

    let p = Participant::parse("\"Jane Smith\" <jane@mail.com>").unwrap();
    assert_eq!(p.display_name.as_deref(), Some("Jane Smith"));

    let p = Participant::parse("<bob@test.io>").unwrap();
    assert_eq!(p.address, "bob@test.io");
    assert!(p.display_name.is_none());
}

#[test]
fn test_participant_parse_bare() {
    let p = Participant::parse("  alice@company.org ").unwrap();
    assert_eq!(p.address, "alice@company.org");
    assert!(p.display_name.is_none());
}

#[test]
fn test_participant_parse_empty() {
    assert!(Participant::parse("").is_none());
    assert!(Participant::parse("   ").is_none());
}

#[test]
fn test_participant_round_trips_through_display() {
    let cases = [
        Participant::new("a@test.com"),
        Participant::new("b@test.com").with_name("Bee"),
        Participant::new("c@test.com").with_name("Smith, Carol"),
        Participant::new("d@test.com").with_name("Bob <boss>"),
        Participant::new("e@test.com").with_name("Bob \"The Boss\""),
        Participant::new("f@test.com").with_name("Back\\slash"),
        Participant::new("g@test.com").with_name(" spaced "),
    ];
    for p in &cases {
        assert_eq!(Participant::parse(&p.to_string()).as_ref(), Some(p));
    }
}

#[test]
fn test_participant_parse_list() {
    let list = Participant::parse_list(
        "a@test.com, b@test.com \"Smith, Bob\", Carol <c@test.com>",
    );
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].address, "a@test.com");
    assert_eq!(list[1].display_name.as_deref(), Some("Smith, Bob"));
    assert_eq!(list[2].address, "c@test.com");
}

#[test]
fn test_participant_display_escapes_name() {
    let p = Participant::new("a@test.com").with_name("Bob \"The Boss\" \\o/");
    assert_eq!(p.to_string(), r#"a@test.com "Bob \"The Boss\" \\o/""#);
}

#[test]
fn test_participant_parse_quoted_name_with_brackets() {
    let p = Participant::parse("\"Bob <boss>\" <bob@test.com>").unwrap();
    assert_eq!(p.address, "bob@test.com");
    assert_eq!(p.display_name.as_deref(), Some("Bob <boss>"));

    let p = Participant::parse("a@test.com \"Bob <boss>\"").unwrap();
    assert_eq!(p.address, "a@test.com");
    assert_eq!(p.display_name.as_deref(), Some("Bob <boss>"));
}

#[test]
fn test_participant_parse_list_with_escaped_quotes() {
    let list = Participant::parse_list(
        r#"a@test.com "Say \"hi, there\"", b@test.com "C:\\dir", c@test.com"#,
    );
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].display_name.as_deref(), Some("Say \"hi, there\""));
    assert_eq!(list[1].display_name.as_deref(), Some("C:\\dir"));
    assert_eq!(list[2].address, "c@test.com");
}

#[test]
fn test_participant_parse_list_empty() {
    assert!(Participant::parse_list("").is_empty());
}

#[test]
fn test_join_participants() {
    let list = [
        Participant::new("a@test.com"),
        Participant::new("b@test.com").with_name("Bee"),
    ];
    assert_eq!(join_participants(&list), "a@test.com, b@test.com \"Bee\"");
    assert_eq!(join_participants(&[]), "");
}

// --- Classification ---

#[test]
fn test_classify_parts() {
    assert_eq!(classify(&Part::PlainText(String::new())), PartKind::PlainText);
    assert_eq!(classify(&Part::Markup(String::new())), PartKind::Markup);
    assert_eq!(
        classify(&Part::Attachment(Attachment::octet_stream("a", vec![]))),
        PartKind::Other
    );
    assert_eq!(
        classify(&Part::Container(Container::new("mixed", vec![]))),
        PartKind::Other
    );
}

#[test]
fn test_part_kind_from_mime_type() {
    assert_eq!(PartKind::from_mime_type("text/plain"), PartKind::PlainText);
    assert_eq!(
        PartKind::from_mime_type("TEXT/HTML; charset=utf-8"),
        PartKind::Markup
    );
    assert_eq!(PartKind::from_mime_type("text/calendar"), PartKind::Other);
    assert_eq!(PartKind::from_mime_type("multipart/mixed"), PartKind::Other);
    assert_eq!(PartKind::from_mime_type(""), PartKind::Other);
}

// --- Message accessors ---

#[test]
fn test_preferred_body_order() {
    let message = MessageBuilder::new("a@test.com")
        .text("plain")
        .markup("<p>markup</p>")
        .to(["b@test.com"])
        .build()
        .unwrap();

    assert_eq!(
        message.preferred_body(RenditionPreference::PlainFirst),
        Some((PartKind::PlainText, "plain"))
    );
    assert_eq!(
        message.preferred_body(RenditionPreference::MarkupFirst),
        Some((PartKind::Markup, "<p>markup</p>"))
    );
}

#[test]
fn test_preferred_body_falls_back() {
    let message = MessageBuilder::new("a@test.com")
        .markup("<p>only</p>")
        .to(["b@test.com"])
        .build()
        .unwrap();

    assert_eq!(
        message.preferred_body(RenditionPreference::PlainFirst),
        Some((PartKind::Markup, "<p>only</p>"))
    );
}

#[test]
fn test_recipients_order() {
    let message = MessageBuilder::new("a@test.com")
        .text("x")
        .bcc(["bcc@test.com"])
        .cc(["cc@test.com"])
        .to(["to@test.com"])
        .build()
        .unwrap();

    let addresses: Vec<&str> = message.recipients().map(|p| p.address.as_str()).collect();
    assert_eq!(addresses, ["to@test.com", "cc@test.com", "bcc@test.com"]);
}

#[test]
fn test_part_mime_types() {
    assert_eq!(Part::PlainText(String::new()).mime_type(), "text/plain");
    assert_eq!(Part::Markup(String::new()).mime_type(), "text/html");
    assert_eq!(
        Part::Container(Container::new("alternative", vec![])).mime_type(),
        "multipart/alternative"
    );
}
