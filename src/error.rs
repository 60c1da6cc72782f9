//! Error types for message generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, quoting or parsing messages
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Neither a text nor a markup body was supplied
    #[error("At least one of text and markup content needs to be provided")]
    ContentMissing,

    /// To, Cc and Bcc are all empty
    #[error("At least one of to, cc or bcc recipients needs to be provided")]
    NoRecipients,

    /// A participant was given with an empty address
    #[error("Empty address in {field}")]
    EmptyAddress { field: &'static str },

    /// An attachment source could not be read
    #[error("Attachment {} is not accessible or readable: {source}", path.display())]
    AttachmentUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The prior message has neither a plain text nor a markup body
    #[error("Prior message has no quotable body")]
    NoQuotableBody,

    /// Message fields could not be deserialized
    #[error("Invalid message fields: {0}")]
    InvalidFields(#[from] serde_json::Error),

    /// Raw bytes could not be turned back into a message
    #[error("Malformed message input: {0}")]
    MalformedInput(String),
}

/// Result type for message generation operations
pub type Result<T> = std::result::Result<T, ComposeError>;
