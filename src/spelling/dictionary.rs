//! Word-frequency dictionary for spelling correction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;

use crate::error::{ClinormError, Result};

/// A dictionary that stores words and their frequencies for spelling correction.
#[derive(Debug, Clone, Default)]
pub struct SpellingDictionary {
    /// Words and their frequencies
    words: AHashMap<String, u32>,
    /// Total word count
    total_count: u64,
}

impl SpellingDictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        SpellingDictionary::default()
    }

    /// Build a dictionary where every word has frequency 1.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = SpellingDictionary::new();
        for word in words {
            dictionary.increment_word(word.as_ref());
        }
        dictionary
    }

    /// Add a word to the dictionary with the given frequency.
    pub fn add_word(&mut self, word: &str, frequency: u32) {
        let old_freq = self
            .words
            .insert(word.to_lowercase(), frequency)
            .unwrap_or(0);
        self.total_count = self.total_count - old_freq as u64 + frequency as u64;
    }

    /// Increment the frequency of a word by 1.
    pub fn increment_word(&mut self, word: &str) {
        let current = self.frequency(word);
        self.add_word(word, current.saturating_add(1));
    }

    /// Check if a word exists in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Get the frequency of a word.
    pub fn frequency(&self, word: &str) -> u32 {
        self.words.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Iterate over words and their frequencies.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.words.iter().map(|(word, freq)| (word.as_str(), *freq))
    }

    /// Get the total number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total frequency count.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// Load a dictionary file.
    ///
    /// Each non-empty line holds either a single word or `word frequency`.
    /// Lines starting with `#` are comments.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut dictionary = SpellingDictionary::new();
        let reader = BufReader::new(File::open(path)?);

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts.as_slice() {
                [word] => dictionary.increment_word(word),
                [word, frequency] => {
                    let frequency = frequency.parse::<u32>().map_err(|e| {
                        ClinormError::invalid_argument(format!(
                            "dictionary line {}: bad frequency `{frequency}`: {e}",
                            line_no + 1
                        ))
                    })?;
                    dictionary.add_word(word, frequency);
                }
                _ => {
                    return Err(ClinormError::invalid_argument(format!(
                        "dictionary line {}: expected `word [frequency]`",
                        line_no + 1
                    )));
                }
            }
        }

        Ok(dictionary)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut dictionary = SpellingDictionary::new();
        dictionary.add_word("Fever", 10);
        dictionary.increment_word("fever");
        dictionary.increment_word("cough");

        assert!(dictionary.contains("FEVER"));
        assert_eq!(dictionary.frequency("fever"), 11);
        assert_eq!(dictionary.word_count(), 2);
        assert_eq!(dictionary.total_frequency(), 12);
        assert!(!dictionary.contains("rash"));
    }

    #[test]
    fn test_from_words() {
        let dictionary = SpellingDictionary::from_words(["pain", "pain", "edema"]);
        assert_eq!(dictionary.frequency("pain"), 2);
        assert_eq!(dictionary.frequency("edema"), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# clinical words").unwrap();
        writeln!(file, "diabetes 120").unwrap();
        writeln!(file, "hypertension").unwrap();
        writeln!(file).unwrap();

        let dictionary = SpellingDictionary::load_from_file(file.path()).unwrap();
        assert_eq!(dictionary.word_count(), 2);
        assert_eq!(dictionary.frequency("diabetes"), 120);
        assert_eq!(dictionary.frequency("hypertension"), 1);
    }

    #[test]
    fn test_load_rejects_bad_frequency() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "diabetes lots").unwrap();

        let err = SpellingDictionary::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("dictionary line 1"));
    }
}
