//! Markup tag stripping and small markup helpers

/// Drop everything up to and including the first `<tag>`.
///
/// Returns the input unchanged when the tag does not occur.
#[must_use]
pub fn strip_open_tag<'a>(fragment: &'a str, tag: &str) -> &'a str {
    let open_tag = format!("<{tag}>");
    fragment
        .find(&open_tag)
        .map_or(fragment, |offset| &fragment[offset + open_tag.len()..])
}

/// Drop everything from the first `</tag>` onward.
///
/// Returns the input unchanged when the tag does not occur.
#[must_use]
pub fn strip_close_tag<'a>(fragment: &'a str, tag: &str) -> &'a str {
    let close_tag = format!("</{tag}>");
    fragment
        .find(&close_tag)
        .map_or(fragment, |offset| &fragment[..offset])
}

/// Unwrap a markup document down to the content inside `<tag>...</tag>`
/// so it can be nested inside another document.
///
/// Each side is stripped independently; a missing tag leaves that side as is.
///
/// ```
/// use email_synth::strip_outer_tag;
///
/// assert_eq!(strip_outer_tag("<body>hello</body>", "body"), "hello");
/// assert_eq!(strip_outer_tag("no tags here", "body"), "no tags here");
/// ```
#[must_use]
pub fn strip_outer_tag<'a>(fragment: &'a str, tag: &str) -> &'a str {
    strip_close_tag(strip_open_tag(fragment, tag), tag)
}

/// Wrap text in a minimal markup document
#[must_use]
pub fn wrap_document(text: &str) -> String {
    format!("<html><head><meta></meta></head><body>{text}</body></html>")
}

/// Emphasize every second word, giving plain text some inline markup
#[must_use]
pub fn emphasize_alternate_words(text: &str) -> String {
    text.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            if i % 2 == 0 {
                word.to_string()
            } else {
                format!("<em>{word}</em>")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
