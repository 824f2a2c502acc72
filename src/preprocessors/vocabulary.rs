use std::collections::BTreeMap;

use sieve_core::{FeatureMatrix, FeatureVector, Result, SieveError};
use tracing::debug;

use super::Tokenizer;

/// A fixed, ordered word list that maps texts to bag-of-words vectors.
///
/// Feature `i` of a vectorised text is `1.0` if the `i`-th vocabulary word
/// (in lexicographic order) occurs in it, `0.0` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    index: BTreeMap<String, usize>,
    tokenizer: Tokenizer,
}

impl Vocabulary {
    /// Collects every token whose total number of occurrences across `corpus`
    /// is at least `cutoff`. A cutoff of `0` or `1` keeps every token seen.
    pub fn fit<S: AsRef<str>>(corpus: &[S], cutoff: usize) -> Result<Self> {
        Ok(Self::fit_with(Tokenizer::standard()?, corpus, cutoff))
    }

    pub fn fit_with<S: AsRef<str>>(tokenizer: Tokenizer, corpus: &[S], cutoff: usize) -> Self {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for text in corpus {
            for token in tokenizer.tokenize(text.as_ref()) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let seen = counts.len();
        let index: BTreeMap<String, usize> = counts
            .into_iter()
            .filter(|&(_, n)| n >= cutoff)
            .map(|(token, _)| token)
            .enumerate()
            .map(|(i, token)| (token, i))
            .collect();

        debug!(seen, kept = index.len(), cutoff, "built vocabulary");

        Self { index, tokenizer }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Feature position of `token`.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Vocabulary words in feature order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Presence vector of length [`len`](Vocabulary::len) for `text`.
    pub fn vectorize(&self, text: &str) -> FeatureVector {
        let mut values = vec![0.0; self.len()];
        for token in self.tokenizer.tokenize(text) {
            if let Some(&i) = self.index.get(&token) {
                values[i] = 1.0;
            }
        }
        FeatureVector::new(values)
    }

    /// Vectorises every text into one matrix.
    ///
    /// # Errors
    ///
    /// [`SieveError::EmptyInput`] if `texts` or the vocabulary is empty.
    pub fn vectorize_all<S: AsRef<str>>(&self, texts: &[S]) -> Result<FeatureMatrix> {
        if self.is_empty() {
            return Err(SieveError::EmptyInput);
        }
        let vectors: Vec<FeatureVector> = texts.iter().map(|t| self.vectorize(t.as_ref())).collect();
        FeatureMatrix::new(&vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_cutoff_zero_keeps_everything() {
        let vocab = Vocabulary::fit(&["buy now", "hello friend", "buy cheap now"], 0).unwrap();
        let words: Vec<&str> = vocab.iter().collect();
        assert_eq!(words, vec!["buy", "cheap", "friend", "hello", "now"]);
    }

    #[test]
    fn test_vocabulary_cutoff_counts_occurrences() {
        let vocab = Vocabulary::fit(&["buy buy now", "hello friend", "now"], 2).unwrap();
        assert!(vocab.contains("buy"));
        assert!(vocab.contains("now"));
        assert!(!vocab.contains("hello"));
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_vocabulary_vectorize() {
        let vocab = Vocabulary::fit(&["Buy now", "hello friend"], 0).unwrap();
        // [buy, friend, hello, now]
        assert_eq!(vocab.index_of("now"), Some(3));
        let v = vocab.vectorize("NOW, buy! unknown");
        assert_eq!(v.as_slice(), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_vocabulary_vectorize_all() {
        let vocab = Vocabulary::fit(&["spam spam", "ham"], 0).unwrap();
        let m = vocab.vectorize_all(&["spam", "ham", "eggs"]).unwrap();
        assert_eq!(m.row_count(), 3);
        assert_eq!(m.column_count(), 2);
        assert_eq!(m.row(2).unwrap().as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_vocabulary_empty() {
        let vocab = Vocabulary::fit(&["a b c"], 0).unwrap();
        assert!(vocab.is_empty());
        assert!(matches!(
            vocab.vectorize_all(&["x"]),
            Err(SieveError::EmptyInput)
        ));
    }

    #[test]
    fn test_vocabulary_custom_tokenizer() {
        let vocab = Vocabulary::fit_with(Tokenizer::new(4).unwrap(), &["win the cash"], 0);
        let words: Vec<&str> = vocab.iter().collect();
        assert_eq!(words, vec!["cash"]);
    }
}
