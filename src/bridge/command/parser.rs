//! Defines the parser for commands embedded in comment text.

use regex::Regex;

/// Job token that can leak out of comment templates when no job was
/// interpolated; never a real job name.
const RESERVED_JOB_TOKEN: &str = "undefined";

/// A command recognized in comment text, before it is tied to a pull request.
#[derive(Debug, PartialEq, Eq)]
pub enum CommentCommand {
    /// Trigger a CI build of the given job.
    Trigger { job: String },
    /// Print help.
    Help,
}

pub struct CommandParser {
    trigger_word: String,
    pattern: Regex,
}

impl CommandParser {
    pub fn new(trigger_word: String) -> Self {
        // The trigger word is configured free-form, so it is escaped before it
        // is embedded into the pattern.
        let pattern = Regex::new(&format!(
            r"(?m)^\s*{}\s+(?:trigger\s+([a-zA-Z_-]+)|help\b)",
            regex::escape(&trigger_word)
        ))
        .expect("Cannot build comment pattern");
        Self {
            trigger_word,
            pattern,
        }
    }

    /// Word used to invoke the bot from comments.
    /// For example `@ci-bot`.
    pub fn trigger_word(&self) -> &str {
        &self.trigger_word
    }

    /// Parses the first command found in `text`.
    ///
    /// A command starts at the beginning of some line (not necessarily the
    /// first one) and matching is case-sensitive. Text without a command
    /// returns `None`.
    pub fn parse_comment(&self, text: &str) -> Option<CommentCommand> {
        let captures = self.pattern.captures(text)?;
        match captures.get(1) {
            Some(job) if job.as_str() == RESERVED_JOB_TOKEN => None,
            Some(job) => Some(CommentCommand::Trigger {
                job: job.as_str().to_string(),
            }),
            None => Some(CommentCommand::Help),
        }
    }
}
