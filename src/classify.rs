//! Body part classification for choosing a quoting strategy

use crate::types::Part;
use serde::{Deserialize, Serialize};

/// How a body part takes part in reply quoting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    /// `text/plain`
    PlainText,
    /// `text/html`
    Markup,
    /// Attachments, containers and any other content type. Never quoted into.
    Other,
}

impl PartKind {
    /// Classify a declared MIME type such as `text/html; charset=utf-8`
    #[must_use]
    pub fn from_mime_type(mime_type: &str) -> Self {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match essence.split_once('/') {
            Some(("text", "plain")) => Self::PlainText,
            Some(("text", "html")) => Self::Markup,
            _ => Self::Other,
        }
    }
}

/// Classify one body part
#[must_use]
pub const fn classify(part: &Part) -> PartKind {
    match part {
        Part::PlainText(_) => PartKind::PlainText,
        Part::Markup(_) => PartKind::Markup,
        Part::Attachment(_) | Part::Container(_) => PartKind::Other,
    }
}
