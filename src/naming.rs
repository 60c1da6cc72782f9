//! Content-derived output file names

use crate::types::Message;
use chrono::{DateTime, SecondsFormat, Utc};
use md5::{Digest, Md5};

/// File name for storing a generated message: the hex MD5 of subject,
/// sender, recipients and generation time, with an `.eml` suffix.
///
/// Only meant to be unique enough to scan a directory by eye. Collisions
/// are not detected.
#[must_use]
pub fn output_file_name(message: &Message, generated_at: DateTime<Utc>) -> String {
    let mut hasher = Md5::new();

    hasher.update(message.subject.as_bytes());
    hasher.update([0u8]);
    hasher.update(message.from.to_string().as_bytes());
    for recipient in message.recipients() {
        hasher.update([0u8]);
        hasher.update(recipient.to_string().as_bytes());
    }
    hasher.update([0u8]);
    hasher.update(
        generated_at
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
            .as_bytes(),
    );

    format!("{:x}.eml", hasher.finalize())
}
