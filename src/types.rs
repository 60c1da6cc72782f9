//! Core types for generated messages

use crate::classify::{PartKind, classify};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// A message built by [`crate::MessageBuilder`] or read back by [`crate::parse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender
    pub from: Participant,

    /// Primary recipients
    pub to: Vec<Participant>,

    /// CC recipients
    pub cc: Vec<Participant>,

    /// BCC recipients
    pub bcc: Vec<Participant>,

    /// Subject line, possibly empty
    pub subject: String,

    /// Date header. Always set on built messages, may be absent on parsed ones
    pub date: Option<DateTime<FixedOffset>>,

    /// Value of the custom `Language` header
    pub language: String,

    /// Value of the custom `Charset` header
    pub charset: String,

    /// Root of the body tree
    pub body: Part,
}

impl Message {
    /// First plain text part, depth-first, ignoring attachments
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.body.find(PartKind::PlainText)
    }

    /// First markup part, depth-first, ignoring attachments
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        self.body.find(PartKind::Markup)
    }

    /// The body rendition to quote, following the given preference
    #[must_use]
    pub fn preferred_body(&self, preference: RenditionPreference) -> Option<(PartKind, &str)> {
        preference
            .order()
            .into_iter()
            .find_map(|kind| self.body.find(kind).map(|content| (kind, content)))
    }

    /// All attachment parts in body order
    #[must_use]
    pub fn attachments(&self) -> Vec<&Attachment> {
        let mut found = Vec::new();
        self.body.collect_attachments(&mut found);
        found
    }

    /// Everyone the message is addressed to: To, then Cc, then Bcc
    pub fn recipients(&self) -> impl Iterator<Item = &Participant> {
        self.to.iter().chain(&self.cc).chain(&self.bcc)
    }

    /// Indented outline of the body's content types
    #[must_use]
    pub fn structure(&self) -> String {
        let mut out = String::new();
        self.body.outline(0, &mut out);
        out
    }
}

/// A named mailbox
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// Mailbox address (e.g. "alice@example.com")
    pub address: String,

    /// Display name (e.g. "Alice Liddell")
    pub display_name: Option<String>,
}

impl Participant {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            display_name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Parse a single rendered participant.
    ///
    /// Accepts the form this crate writes (`address "Name"`, with `"` and `\`
    /// escaped inside the name), the common `Name <address>` form and a bare
    /// address.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(quote) = s.find('"') {
            let address = s[..quote].trim();
            if !address.is_empty()
                && !address.contains('<')
                && let Some(name) = unquote(&s[quote..])
            {
                return Self::from_parts(address, &name);
            }
        }

        // the last angle pair, so a quoted name may itself contain brackets
        if let Some(start) = s.rfind('<')
            && let Some(end) = s.rfind('>')
            && start < end
        {
            let name = s[..start].trim();
            let name = unquote(name).unwrap_or_else(|| name.trim_matches('"').trim().to_string());
            let address = s[start + 1..end].trim();
            return Self::from_parts(address, &name);
        }

        Self::from_parts(s, "")
    }

    /// Parse a comma separated address header value
    #[must_use]
    pub fn parse_list(value: &str) -> Vec<Self> {
        let mut participants = Vec::new();
        let mut in_quotes = false;
        let mut escaped = false;
        let mut start = 0;

        for (i, c) in value.char_indices() {
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' if in_quotes => escaped = true,
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    participants.extend(Self::parse(&value[start..i]));
                    start = i + 1;
                }
                _ => {}
            }
        }
        participants.extend(Self::parse(&value[start..]));

        participants
    }

    fn from_parts(address: &str, name: &str) -> Option<Self> {
        if address.is_empty() {
            return None;
        }
        Some(Self {
            address: address.to_string(),
            display_name: (!name.is_empty()).then(|| name.to_string()),
        })
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => {
                write!(f, "{} \"", self.address)?;
                for c in name.chars() {
                    if matches!(c, '"' | '\\') {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                f.write_char('"')
            }
            None => write!(f, "{}", self.address),
        }
    }
}

/// Contents of a quoted string, with backslash escapes resolved. `None` unless
/// `s` is exactly one quoted string.
fn unquote(s: &str) -> Option<String> {
    let mut chars = s.strip_prefix('"')?.chars();
    let mut out = String::with_capacity(s.len());
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '"' => return chars.as_str().trim().is_empty().then_some(out),
            _ => out.push(c),
        }
    }
    None
}

impl From<&str> for Participant {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for Participant {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

/// Join participants the way address headers carry them
#[must_use]
pub fn join_participants(participants: &[Participant]) -> String {
    participants
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One node of a message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Part {
    /// `text/plain` content
    PlainText(String),

    /// `text/html` content
    Markup(String),

    /// Binary attachment, or any leaf that is neither plain text nor markup
    Attachment(Attachment),

    /// `multipart/*` container
    Container(Container),
}

impl Part {
    /// Full MIME type of this part
    #[must_use]
    pub fn mime_type(&self) -> String {
        match self {
            Self::PlainText(_) => "text/plain".to_string(),
            Self::Markup(_) => "text/html".to_string(),
            Self::Attachment(attachment) => attachment.mime_type.clone(),
            Self::Container(container) => format!("multipart/{}", container.subtype),
        }
    }

    #[must_use]
    pub const fn is_attachment(&self) -> bool {
        matches!(self, Self::Attachment(_))
    }

    fn find(&self, kind: PartKind) -> Option<&str> {
        match self {
            Self::Container(container) => container.parts.iter().find_map(|p| p.find(kind)),
            Self::PlainText(content) | Self::Markup(content) if classify(self) == kind => {
                Some(content.as_str())
            }
            _ => None,
        }
    }

    fn collect_attachments<'a>(&'a self, found: &mut Vec<&'a Attachment>) {
        match self {
            Self::Attachment(attachment) => found.push(attachment),
            Self::Container(container) => {
                for part in &container.parts {
                    part.collect_attachments(found);
                }
            }
            Self::PlainText(_) | Self::Markup(_) => {}
        }
    }

    fn outline(&self, depth: usize, out: &mut String) {
        out.push_str(&"    ".repeat(depth));
        out.push_str(&self.mime_type());
        out.push('\n');
        if let Self::Container(container) = self {
            for part in &container.parts {
                part.outline(depth + 1, out);
            }
        }
    }
}

/// A leaf part carried as opaque bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Suggested file name from `Content-Disposition`
    pub filename: Option<String>,

    /// Declared MIME type
    pub mime_type: String,

    /// Decoded content
    pub data: Vec<u8>,
}

impl Attachment {
    /// Generic `application/octet-stream` attachment
    pub fn octet_stream(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: Some(filename.into()),
            mime_type: "application/octet-stream".to_string(),
            data,
        }
    }
}

/// A `multipart/<subtype>` node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Multipart subtype, e.g. "alternative" or "mixed"
    pub subtype: String,

    /// Children in order
    pub parts: Vec<Part>,
}

impl Container {
    pub fn new(subtype: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            subtype: subtype.into(),
            parts,
        }
    }
}

/// Which prior-message rendition to quote first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenditionPreference {
    /// Plain text, falling back to markup
    #[default]
    PlainFirst,

    /// Markup, falling back to plain text
    MarkupFirst,
}

impl RenditionPreference {
    #[must_use]
    pub const fn order(self) -> [PartKind; 2] {
        match self {
            Self::PlainFirst => [PartKind::PlainText, PartKind::Markup],
            Self::MarkupFirst => [PartKind::Markup, PartKind::PlainText],
        }
    }
}
