use regex::Regex;
use sieve_core::{Result, SieveError};

/// Splits text into lowercase ASCII words.
///
/// The text is lowercased and every run of at least `min_len` characters from
/// `[a-z0-9]` becomes a token. Anything else, including non-ASCII letters, is
/// a separator.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_len: usize,
    word: Regex,
}

impl Tokenizer {
    pub const DEFAULT_MIN_LEN: usize = 2;

    /// A `min_len` of `0` behaves like `1`.
    pub fn new(min_len: usize) -> Result<Self> {
        let min_len = min_len.max(1);
        let word = Regex::new(&format!("[a-z0-9]{{{min_len},}}")).map_err(|e| {
            SieveError::InvalidHyperparameter {
                name: "min_len".into(),
                value: e.to_string(),
            }
        })?;
        Ok(Self { min_len, word })
    }

    /// Tokenizer with [`DEFAULT_MIN_LEN`](Tokenizer::DEFAULT_MIN_LEN).
    pub fn standard() -> Result<Self> {
        Self::new(Self::DEFAULT_MIN_LEN)
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.word
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl PartialEq for Tokenizer {
    fn eq(&self, other: &Self) -> bool {
        self.min_len == other.min_len
    }
}
