//! Rendering messages to internet mail wire format

use crate::types::{Attachment, Message, Part, Participant};
use base64::{Engine, engine::general_purpose::STANDARD};

const CRLF: &str = "\r\n";
const BASE64_LINE_LENGTH: usize = 76;
const FOLD_WIDTH: usize = 78;
// 39 bytes encode to 52 base64 characters, so each encoded word is 64
// characters and the first line stays under FOLD_WIDTH after any header name
const ENCODED_CHUNK_BYTES: usize = 39;

/// Render a message as headers, a blank line and its MIME body.
///
/// Output is a pure function of the message: multipart boundaries are
/// numbered in document order and every leaf is base64 encoded.
#[must_use]
pub fn serialize(message: &Message) -> Vec<u8> {
    let mut out = String::with_capacity(1024);

    write_header(&mut out, "From", &message.from.to_string());
    write_address_header(&mut out, "To", &message.to);
    write_address_header(&mut out, "Cc", &message.cc);
    write_address_header(&mut out, "Bcc", &message.bcc);
    write_header(&mut out, "Subject", &message.subject);
    if let Some(date) = message.date {
        write_header(&mut out, "Date", &date.to_rfc2822());
    }
    write_header(&mut out, "Language", &message.language);
    write_header(&mut out, "Charset", &message.charset);
    write_header(&mut out, "MIME-Version", "1.0");

    let mut boundaries = 0;
    write_part(&mut out, &message.body, &mut boundaries);

    out.into_bytes()
}

fn write_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    if needs_encoding(value) {
        out.push_str(&encode_words(value));
    } else {
        out.push_str(value);
    }
    out.push_str(CRLF);
}

// Folds between addresses so long recipient lists stay under the line limit.
fn write_address_header(out: &mut String, name: &str, participants: &[Participant]) {
    if participants.is_empty() {
        return;
    }

    let rendered: Vec<String> = participants.iter().map(ToString::to_string).collect();
    if rendered.iter().any(|p| needs_encoding(p)) {
        write_header(out, name, &rendered.join(", "));
        return;
    }

    out.push_str(name);
    out.push(':');
    let mut line_length = name.len() + 1;
    for (i, participant) in rendered.iter().enumerate() {
        if i > 0 {
            out.push(',');
            line_length += 1;
            if line_length + participant.len() + 1 > FOLD_WIDTH {
                out.push_str(CRLF);
                line_length = 0;
            }
        }
        out.push(' ');
        out.push_str(participant);
        line_length += participant.len() + 1;
    }
    out.push_str(CRLF);
}

fn write_part(out: &mut String, part: &Part, boundaries: &mut usize) {
    match part {
        Part::PlainText(text) => {
            write_leaf(out, "text/plain; charset=\"utf-8\"", None, text.as_bytes());
        }
        Part::Markup(markup) => {
            write_leaf(out, "text/html; charset=\"utf-8\"", None, markup.as_bytes());
        }
        Part::Attachment(attachment) => {
            let disposition = attachment_disposition(attachment);
            write_leaf(
                out,
                &attachment.mime_type,
                Some(disposition.as_str()),
                &attachment.data,
            );
        }
        Part::Container(container) => {
            *boundaries += 1;
            let boundary = format!("=_part_{boundaries}_=");

            out.push_str(&format!(
                "Content-Type: multipart/{}; boundary=\"{boundary}\"{CRLF}{CRLF}",
                container.subtype
            ));
            for child in &container.parts {
                out.push_str(&format!("--{boundary}{CRLF}"));
                write_part(out, child, boundaries);
            }
            out.push_str(&format!("--{boundary}--{CRLF}"));
        }
    }
}

fn write_leaf(out: &mut String, content_type: &str, disposition: Option<&str>, data: &[u8]) {
    out.push_str(&format!("Content-Type: {content_type}{CRLF}"));
    out.push_str(&format!("Content-Transfer-Encoding: base64{CRLF}"));
    if let Some(disposition) = disposition {
        out.push_str(&format!("Content-Disposition: {disposition}{CRLF}"));
    }
    out.push_str(CRLF);

    let encoded = STANDARD.encode(data);
    if encoded.is_empty() {
        out.push_str(CRLF);
        return;
    }
    // base64 output is ASCII, so byte chunks are valid str slices
    for line in encoded.as_bytes().chunks(BASE64_LINE_LENGTH) {
        out.push_str(std::str::from_utf8(line).unwrap_or_default());
        out.push_str(CRLF);
    }
}

fn attachment_disposition(attachment: &Attachment) -> String {
    match &attachment.filename {
        None => "attachment".to_string(),
        Some(name) if name.chars().all(is_plain_param_char) => {
            format!("attachment; filename=\"{name}\"")
        }
        // RFC 2231 extended parameter
        Some(name) => format!("attachment; filename*=utf-8''{}", percent_encode(name)),
    }
}

const fn is_plain_param_char(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\'
}

fn percent_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&b) {
                char::from(b).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect()
}

/// Values the parser would not read back verbatim: non-ASCII or control
/// characters, surrounding whitespace, and text that looks like an encoded word.
fn needs_encoding(value: &str) -> bool {
    value.chars().any(|c| !c.is_ascii() || c.is_ascii_control())
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains("=?")
}

/// RFC 2047 encoded words, split on character boundaries and folded one
/// word per line
fn encode_words(value: &str) -> String {
    let mut words = Vec::new();
    let mut chunk_start = 0;
    for (i, c) in value.char_indices() {
        if i + c.len_utf8() - chunk_start > ENCODED_CHUNK_BYTES {
            words.push(encode_word(&value[chunk_start..i]));
            chunk_start = i;
        }
    }
    words.push(encode_word(&value[chunk_start..]));

    words.join(&format!("{CRLF} "))
}

fn encode_word(chunk: &str) -> String {
    format!("=?UTF-8?B?{}?=", STANDARD.encode(chunk.as_bytes()))
}
