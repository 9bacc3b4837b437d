//! Log-line field redaction.
//!
//! Log lines of the form `field=value<sep>field=value<sep>...` carry
//! credentials during authentication flows. [`filter_fields`] obfuscates
//! the values of the named fields with a single regex substitution so that
//! log output never contains them in the clear.

use regex::Regex;

/// Precompiled redaction for a fixed field set.
///
/// Prefer this over [`filter_fields`] when redacting repeatedly, e.g. on
/// every emitted log line.
pub struct Redactor {
    pattern: Option<Regex>,
    redaction: String,
}

impl Redactor {
    /// Build a redactor for `fields`, replacing each matched value with
    /// `redaction` in `separator`-delimited messages.
    pub fn new(fields: &[&str], redaction: &str, separator: char) -> Self {
        // Field names and the separator are escaped, so the pattern always
        // compiles; an empty field set means nothing to redact.
        let pattern = if fields.is_empty() {
            None
        } else {
            let alternation = fields
                .iter()
                .map(|f| regex::escape(f))
                .collect::<Vec<_>>()
                .join("|");
            let sep = regex::escape(&separator.to_string());
            Some(
                Regex::new(&format!("({alternation})=[^{sep}]+"))
                    .expect("escaped field pattern compiles"),
            )
        };

        Self {
            pattern,
            redaction: redaction.to_string(),
        }
    }

    /// Return `message` with every configured field's value obfuscated.
    pub fn redact(&self, message: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(message, |caps: &regex::Captures<'_>| {
                    format!("{}={}", &caps[1], self.redaction)
                })
                .into_owned(),
            None => message.to_string(),
        }
    }
}

/// One-shot form of [`Redactor`]: obfuscate the values of `fields` in a
/// `separator`-delimited `message`.
pub fn filter_fields(fields: &[&str], redaction: &str, message: &str, separator: char) -> String {
    Redactor::new(fields, redaction, separator).redact(message)
}
