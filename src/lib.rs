// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Synthetic Email Generator
//!
//! Builds structurally valid email messages and synthesizes plausible replies
//! by quoting a prior message into a new one.
//!
//! # Features
//!
//! - Plain text, markup or alternative-pair bodies with attachments
//! - Reply quoting into every plain text and markup part
//! - Idempotent `Re:` subject handling
//! - Deterministic wire rendering and parsing back
//! - Content-derived `.eml` file names
//!
//! # Example
//!
//! ```rust
//! use email_synth::{MessageBuilder, Participant, make_reply, parse, serialize};
//!
//! let original = MessageBuilder::new("alice@example.com")
//!     .subject("Lunch")
//!     .text("Are we still on for noon?")
//!     .to(["bob@example.com"])
//!     .build()
//!     .unwrap();
//!
//! let answer = MessageBuilder::new(Participant::new("bob@example.com").with_name("Bob"))
//!     .text("Yes, see you there.")
//!     .to(["alice@example.com"])
//!     .build()
//!     .unwrap();
//!
//! let reply = make_reply(answer, &original);
//! assert_eq!(reply.subject, "Re: Lunch");
//!
//! let bytes = serialize(&reply);
//! let read_back = parse(&bytes).unwrap();
//! assert_eq!(read_back.text(), reply.text());
//! ```

mod builder;
mod classify;
mod error;
mod naming;
mod parser;
mod reply;
mod serializer;
mod tags;
mod types;

pub use builder::{
    AttachmentSource, DEFAULT_CHARSET, DEFAULT_LANGUAGE, MessageBuilder, MessageFields,
    build_message,
};
pub use classify::{PartKind, classify};
pub use error::{ComposeError, Result};
pub use naming::output_file_name;
pub use parser::parse;
pub use reply::{ReplyComposer, SEPARATOR_WIDTH, make_reply, reply_subject};
pub use serializer::serialize;
pub use tags::{
    emphasize_alternate_words, strip_close_tag, strip_open_tag, strip_outer_tag, wrap_document,
};
pub use types::*;
