//! Message construction from a validated set of fields

use crate::error::{ComposeError, Result};
use crate::types::{Attachment, Container, Message, Part, Participant};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default value of the `Language` header
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default value of the `Charset` header
pub const DEFAULT_CHARSET: &str = "utf-8";

/// Every field a message can be built from.
///
/// Empty `text` or `markup` strings count as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFields {
    pub from: Participant,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub markup: Option<String>,

    /// Defaults to the time of the build
    #[serde(default)]
    pub date: Option<DateTime<FixedOffset>>,

    #[serde(default)]
    pub to: Vec<Participant>,

    #[serde(default)]
    pub cc: Vec<Participant>,

    #[serde(default)]
    pub bcc: Vec<Participant>,

    #[serde(default)]
    pub attachments: Vec<AttachmentSource>,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_charset")]
    pub charset: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

impl MessageFields {
    /// Fields with every optional value at its default
    pub fn new(from: impl Into<Participant>) -> Self {
        Self {
            from: from.into(),
            subject: None,
            text: None,
            markup: None,
            date: None,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            attachments: Vec::new(),
            language: default_language(),
            charset: default_charset(),
        }
    }

    /// Load fields from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the fields and build the message.
    ///
    /// Unreadable attachments are logged and skipped.
    pub fn build(self) -> Result<Message> {
        let text = self.text.filter(|t| !t.is_empty());
        let markup = self.markup.filter(|m| !m.is_empty());

        let content = match (text, markup) {
            (Some(text), Some(markup)) => Part::Container(Container::new(
                "alternative",
                vec![Part::PlainText(text), Part::Markup(markup)],
            )),
            (Some(text), None) => Part::PlainText(text),
            (None, Some(markup)) => Part::Markup(markup),
            (None, None) => return Err(ComposeError::ContentMissing),
        };

        if self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty() {
            return Err(ComposeError::NoRecipients);
        }

        check_addresses("from", std::slice::from_ref(&self.from))?;
        check_addresses("to", &self.to)?;
        check_addresses("cc", &self.cc)?;
        check_addresses("bcc", &self.bcc)?;

        let attachments: Vec<Part> = self
            .attachments
            .iter()
            .filter_map(|source| match source.load() {
                Ok(attachment) => Some(Part::Attachment(attachment)),
                Err(err) => {
                    warn!(error = %err, "Skipping attachment");
                    None
                }
            })
            .collect();

        let body = if attachments.is_empty() {
            content
        } else {
            let mut parts = Vec::with_capacity(attachments.len() + 1);
            parts.push(content);
            parts.extend(attachments);
            Part::Container(Container::new("mixed", parts))
        };

        let message = Message {
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject: self.subject.unwrap_or_default(),
            date: Some(self.date.unwrap_or_else(|| Utc::now().fixed_offset())),
            language: self.language,
            charset: self.charset,
            body,
        };

        debug!("Built message: {} from {}", message.subject, message.from);

        Ok(message)
    }
}

fn check_addresses(field: &'static str, participants: &[Participant]) -> Result<()> {
    if participants.iter().any(|p| p.address.trim().is_empty()) {
        return Err(ComposeError::EmptyAddress { field });
    }
    Ok(())
}

/// Where an attachment's bytes come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentSource {
    /// Read from a local file; the file name becomes the attachment name
    File(PathBuf),

    /// Already in memory
    Inline { filename: String, data: Vec<u8> },
}

impl AttachmentSource {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn inline(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Inline {
            filename: filename.into(),
            data: data.into(),
        }
    }

    /// Read the source fully into memory
    pub fn load(&self) -> Result<Attachment> {
        match self {
            Self::File(path) => {
                let data = fs::read(path).map_err(|source| ComposeError::AttachmentUnreadable {
                    path: path.clone(),
                    source,
                })?;
                let filename = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |name| name.to_string_lossy().into_owned(),
                );
                Ok(Attachment::octet_stream(filename, data))
            }
            Self::Inline { filename, data } => {
                Ok(Attachment::octet_stream(filename.clone(), data.clone()))
            }
        }
    }
}

/// Fluent construction of [`MessageFields`]
#[must_use]
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    fields: MessageFields,
}

impl MessageBuilder {
    pub fn new(from: impl Into<Participant>) -> Self {
        Self {
            fields: MessageFields::new(from),
        }
    }

    pub const fn from_fields(fields: MessageFields) -> Self {
        Self { fields }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.fields.subject = Some(subject.into());
        self
    }

    /// Plain text rendition
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.fields.text = Some(text.into());
        self
    }

    /// Markup rendition
    pub fn markup(mut self, markup: impl Into<String>) -> Self {
        self.fields.markup = Some(markup.into());
        self
    }

    pub fn date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.fields.date = Some(date);
        self
    }

    pub fn to<P: Into<Participant>>(mut self, recipients: impl IntoIterator<Item = P>) -> Self {
        self.fields.to.extend(recipients.into_iter().map(Into::into));
        self
    }

    pub fn cc<P: Into<Participant>>(mut self, recipients: impl IntoIterator<Item = P>) -> Self {
        self.fields.cc.extend(recipients.into_iter().map(Into::into));
        self
    }

    pub fn bcc<P: Into<Participant>>(mut self, recipients: impl IntoIterator<Item = P>) -> Self {
        self.fields.bcc.extend(recipients.into_iter().map(Into::into));
        self
    }

    pub fn attachment(mut self, source: AttachmentSource) -> Self {
        self.fields.attachments.push(source);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.fields.language = language.into();
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.fields.charset = charset.into();
        self
    }

    /// Borrow the fields collected so far
    #[must_use]
    pub const fn fields(&self) -> &MessageFields {
        &self.fields
    }

    pub fn build(self) -> Result<Message> {
        self.fields.build()
    }
}

/// Build a message from a complete set of fields
pub fn build_message(fields: MessageFields) -> Result<Message> {
    fields.build()
}
