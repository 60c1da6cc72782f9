use email_synth::*;

#[test]
fn test_strip_outer_tag() {
    assert_eq!(strip_outer_tag("<body>hello</body>", "body"), "hello");
}

#[test]
fn test_strip_outer_tag_without_tags() {
    assert_eq!(strip_outer_tag("no tags here", "body"), "no tags here");
}

#[test]
fn test_strip_outer_tag_drops_surroundings() {
    let document = "<html><head></head><body><p>inner</p></body></html>";
    assert_eq!(strip_outer_tag(document, "body"), "<p>inner</p>");
    assert_eq!(
        strip_outer_tag(document, "html"),
        "<head></head><body><p>inner</p></body>"
    );
}

#[test]
fn test_strip_outer_tag_one_side_missing() {
    assert_eq!(strip_outer_tag("<body>open only", "body"), "open only");
    assert_eq!(strip_outer_tag("close only</body>tail", "body"), "close only");
}

#[test]
fn test_strip_outer_tag_uses_first_occurrences() {
    assert_eq!(
        strip_outer_tag("<b>one</b><b>two</b>", "b"),
        "one"
    );
}

#[test]
fn test_strip_open_and_close_separately() {
    assert_eq!(strip_open_tag("<html><body>x</body></html>", "html"), "<body>x</body></html>");
    assert_eq!(strip_close_tag("<body>x</body></html>", "body"), "<body>x");
    assert_eq!(strip_open_tag("plain", "html"), "plain");
    assert_eq!(strip_close_tag("plain", "html"), "plain");
}

#[test]
fn test_wrap_document() {
    assert_eq!(
        wrap_document("hi"),
        "<html><head><meta></meta></head><body>hi</body></html>"
    );
    assert_eq!(strip_outer_tag(&wrap_document("hi"), "body"), "hi");
}

#[test]
fn test_emphasize_alternate_words() {
    assert_eq!(
        emphasize_alternate_words("one two three four five"),
        "one <em>two</em> three <em>four</em> five"
    );
    assert_eq!(emphasize_alternate_words(""), "");
}
