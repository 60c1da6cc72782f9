//! Reply synthesis: quoting a prior message into a new one

use crate::classify::{PartKind, classify};
use crate::error::{ComposeError, Result};
use crate::tags::{strip_close_tag, strip_open_tag, strip_outer_tag};
use crate::types::{Message, Part, RenditionPreference, join_participants};
use tracing::{debug, warn};

/// Width of the dashed line that opens a quoted plain text block
pub const SEPARATOR_WIDTH: usize = 40;

const MARKUP_HEADER_OPEN: &str = "<p><div><div style=\"border:none;border-top:solid #E1E1E1 1.0pt;\
                                  padding:3.0pt 0in 0in 0in\"><p class=\"MsoNormal\">";
const MARKUP_HEADER_CLOSE: &str = "</p></div></div>";

/// Rewrites a message into a reply to a prior message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyComposer {
    preference: RenditionPreference,
    separator_width: usize,
}

impl Default for ReplyComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyComposer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            preference: RenditionPreference::PlainFirst,
            separator_width: SEPARATOR_WIDTH,
        }
    }

    /// Which rendition of the prior message gets quoted, for every part kind
    #[must_use]
    pub const fn with_preference(mut self, preference: RenditionPreference) -> Self {
        self.preference = preference;
        self
    }

    #[must_use]
    pub const fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    #[must_use]
    pub const fn preference(&self) -> RenditionPreference {
        self.preference
    }

    /// Turn `message` into a reply to `prior`.
    ///
    /// An empty subject is derived from the prior subject. Every plain text
    /// and markup part gets the prior message quoted into it; parts that
    /// cannot be quoted are logged and left as they were.
    #[must_use]
    pub fn make_reply(&self, mut message: Message, prior: &Message) -> Message {
        if message.subject.is_empty() {
            message.subject = reply_subject(&prior.subject);
        }

        let mut quoted = 0;
        self.walk(&mut message.body, prior, &mut quoted);

        debug!(
            quoted,
            "Composed reply: {} from {} to {}", message.subject, message.from, prior.from
        );

        message
    }

    /// Chain messages into a thread where each one replies to the one before
    #[must_use]
    pub fn thread(&self, messages: Vec<Message>) -> Vec<Message> {
        let mut thread: Vec<Message> = Vec::with_capacity(messages.len());
        for message in messages {
            let message = match thread.last() {
                Some(prior) => self.make_reply(message, prior),
                None => message,
            };
            thread.push(message);
        }
        thread
    }

    fn walk(&self, part: &mut Part, prior: &Message, quoted: &mut usize) {
        if part.is_attachment() {
            return;
        }

        match self.quote_part(part, prior) {
            Ok(true) => *quoted += 1,
            Ok(false) => {
                if let Part::Container(container) = part {
                    for child in &mut container.parts {
                        self.walk(child, prior, quoted);
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, part = %part.mime_type(), "Leaving part unquoted");
            }
        }
    }

    /// Quote `prior` into a single leaf part.
    ///
    /// Returns `Ok(false)` when the part is not plain text or markup.
    pub fn quote_part(&self, part: &mut Part, prior: &Message) -> Result<bool> {
        let kind = classify(part);
        let (Part::PlainText(content) | Part::Markup(content)) = part else {
            return Ok(false);
        };

        let rewritten = match kind {
            PartKind::Markup => self.quote_markup(content, prior)?,
            PartKind::PlainText => self.quote_plain(content, prior)?,
            PartKind::Other => return Ok(false),
        };
        *content = rewritten;

        Ok(true)
    }

    fn quote_markup(&self, current: &str, prior: &Message) -> Result<String> {
        let (kind, prior_body) = prior
            .preferred_body(self.preference)
            .ok_or(ComposeError::NoQuotableBody)?;

        let header: String = quoted_fields(prior)
            .into_iter()
            .map(|(label, value)| format!("<b>{label}:</b> {}<br>", escape_markup(&value)))
            .collect();

        let quoted_body = match kind {
            PartKind::PlainText => format!("<pre>{}</pre>", escape_markup(prior_body)),
            PartKind::Markup | PartKind::Other => strip_outer_tag(prior_body, "body").to_string(),
        };

        let inner = strip_close_tag(
            strip_close_tag(strip_open_tag(current, "html"), "html"),
            "body",
        );

        Ok(format!(
            "<html>{inner}{MARKUP_HEADER_OPEN}{header}{MARKUP_HEADER_CLOSE}<p/>{quoted_body}</body></html>"
        ))
    }

    fn quote_plain(&self, current: &str, prior: &Message) -> Result<String> {
        let (_, prior_body) = prior
            .preferred_body(self.preference)
            .ok_or(ComposeError::NoQuotableBody)?;

        let header: String = quoted_fields(prior)
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}\n"))
            .collect();

        Ok(format!(
            "{}\n\n{}\n{header}\n{prior_body}",
            current.trim_end_matches(['\r', '\n']),
            "-".repeat(self.separator_width),
        ))
    }
}

/// Reply subject for a prior subject; never stacks a second `Re:`
#[must_use]
pub fn reply_subject(prior_subject: &str) -> String {
    if prior_subject.to_lowercase().starts_with("re:") {
        prior_subject.to_string()
    } else {
        format!("Re: {prior_subject}")
    }
}

/// Turn `message` into a reply to `prior` with the default composer
#[must_use]
pub fn make_reply(message: Message, prior: &Message) -> Message {
    ReplyComposer::new().make_reply(message, prior)
}

// Date, Cc and Bcc are omitted when absent; the rest always appear.
fn quoted_fields(prior: &Message) -> Vec<(&'static str, String)> {
    let mut fields = Vec::with_capacity(6);

    if let Some(date) = prior.date {
        fields.push(("Date", date.to_rfc2822()));
    }
    fields.push(("From", prior.from.to_string()));
    fields.push(("To", join_participants(&prior.to)));
    if !prior.cc.is_empty() {
        fields.push(("Cc", join_participants(&prior.cc)));
    }
    if !prior.bcc.is_empty() {
        fields.push(("Bcc", join_participants(&prior.bcc)));
    }
    fields.push(("Subject", prior.subject.clone()));

    fields
}

fn escape_markup(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
