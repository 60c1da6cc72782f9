//! Reading wire format back into a [`Message`]

use crate::builder::{DEFAULT_CHARSET, DEFAULT_LANGUAGE};
use crate::classify::PartKind;
use crate::error::{ComposeError, Result};
use crate::types::{Attachment, Container, Message, Part, Participant};
use chrono::DateTime;
use mailparse::{DispositionType, MailHeader, ParsedMail};
use tracing::debug;

/// Parse raw message bytes
pub fn parse(raw: &[u8]) -> Result<Message> {
    let parsed =
        mailparse::parse_mail(raw).map_err(|e| ComposeError::MalformedInput(e.to_string()))?;

    let from = header_value(&parsed.headers, "from")
        .and_then(|value| Participant::parse(&value))
        .ok_or_else(|| ComposeError::MalformedInput("missing or empty From header".into()))?;

    let body = convert_part(&parsed)?;

    let message = Message {
        from,
        to: extract_participants(&parsed.headers, "to"),
        cc: extract_participants(&parsed.headers, "cc"),
        bcc: extract_participants(&parsed.headers, "bcc"),
        subject: header_text(&parsed.headers, "subject").unwrap_or_default(),
        date: extract_date(&parsed.headers),
        language: header_text(&parsed.headers, "language")
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        charset: header_text(&parsed.headers, "charset")
            .unwrap_or_else(|| DEFAULT_CHARSET.to_string()),
        body,
    };

    if message.text().is_none() && message.markup().is_none() {
        return Err(ComposeError::MalformedInput(
            "message has no text or markup body".into(),
        ));
    }

    debug!("Parsed message: {} from {}", message.subject, message.from);

    Ok(message)
}

/// Decoded header value exactly as written after the colon and its spaces
fn header_text(headers: &[MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().to_lowercase() == name)
        .map(MailHeader::get_value)
}

fn header_value(headers: &[MailHeader], name: &str) -> Option<String> {
    header_text(headers, name).map(|value| value.trim().to_string())
}

fn extract_participants(headers: &[MailHeader], name: &str) -> Vec<Participant> {
    header_value(headers, name)
        .map(|value| Participant::parse_list(&value))
        .unwrap_or_default()
}

fn extract_date(headers: &[MailHeader]) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    let value = header_value(headers, "date")?;
    match DateTime::parse_from_rfc2822(&value) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!("Ignoring unparseable Date header {value:?}: {err}");
            None
        }
    }
}

fn convert_part(parsed: &ParsedMail) -> Result<Part> {
    let mime_type = parsed.ctype.mimetype.to_lowercase();

    if let Some(subtype) = mime_type.strip_prefix("multipart/") {
        let parts = parsed
            .subparts
            .iter()
            .map(convert_part)
            .collect::<Result<Vec<_>>>()?;
        return Ok(Part::Container(Container::new(subtype, parts)));
    }

    let disposition = parsed.get_content_disposition();
    let is_attachment = matches!(disposition.disposition, DispositionType::Attachment);

    if !is_attachment {
        match PartKind::from_mime_type(&mime_type) {
            PartKind::PlainText => return Ok(Part::PlainText(decode_text(parsed)?)),
            PartKind::Markup => return Ok(Part::Markup(decode_text(parsed)?)),
            PartKind::Other => {}
        }
    }

    let data = parsed
        .get_body_raw()
        .map_err(|e| ComposeError::MalformedInput(e.to_string()))?;
    let filename = disposition
        .params
        .get("filename")
        .or_else(|| parsed.ctype.params.get("name"))
        .cloned();

    Ok(Part::Attachment(Attachment {
        filename,
        mime_type,
        data,
    }))
}

fn decode_text(parsed: &ParsedMail) -> Result<String> {
    parsed
        .get_body()
        .map_err(|e| ComposeError::MalformedInput(e.to_string()))
}
