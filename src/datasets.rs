use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sieve_core::{Float, Label, Result, SieveError};
use tracing::debug;

pub const SPAM: Label = 0;
pub const HAM: Label = 1;

/// Parses a dataset label: `spam`/`ham` (any case) or a class id.
pub fn parse_label(raw: &str) -> Option<Label> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("spam") {
        Some(SPAM)
    } else if raw.eq_ignore_ascii_case("ham") {
        Some(HAM)
    } else {
        raw.parse().ok()
    }
}

/// Inverse of [`parse_label`] for the two named classes.
pub fn label_name(label: Label) -> String {
    match label {
        SPAM => "spam".to_string(),
        HAM => "ham".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub label: Label,
    pub text: String,
}

/// Labelled messages in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    messages: Vec<Message>,
}

impl Dataset {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Reads `label\ttext` lines. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// - [`SieveError::Io`] if reading fails
    /// - [`SieveError::Parse`] for a line without a tab or with an unknown label
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut messages = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let (raw_label, text) = line.split_once('\t').ok_or_else(|| SieveError::Parse {
                line: i + 1,
                message: "expected `label<TAB>text`".into(),
            })?;

            let label = parse_label(raw_label).ok_or_else(|| SieveError::Parse {
                line: i + 1,
                message: format!("unknown label `{raw_label}`"),
            })?;

            messages.push(Message {
                label,
                text: text.to_string(),
            });
        }

        debug!(messages = messages.len(), "read dataset");
        Ok(Self { messages })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn labels(&self) -> Vec<Label> {
        self.messages.iter().map(|m| m.label).collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Splits into `(train, test)`, keeping order: the last
    /// `round(len * test_ratio)` messages form the test set.
    ///
    /// # Errors
    ///
    /// - [`SieveError::InvalidHyperparameter`] if `test_ratio` is not in `(0, 1)`
    /// - [`SieveError::EmptyInput`] if either side would be empty
    pub fn split(&self, test_ratio: Float) -> Result<(Dataset, Dataset)> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(SieveError::InvalidHyperparameter {
                name: "test_ratio".into(),
                value: test_ratio.to_string(),
            });
        }

        let n_test = (self.len() as Float * test_ratio).round() as usize;
        if n_test == 0 || n_test >= self.len() {
            return Err(SieveError::EmptyInput);
        }

        let (train, test) = self.messages.split_at(self.len() - n_test);
        Ok((Dataset::new(train.to_vec()), Dataset::new(test.to_vec())))
    }
}
