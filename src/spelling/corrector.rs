//! Edit-distance spell checker over a [`SpellingDictionary`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spelling::checker::SpellChecker;
use crate::spelling::dictionary::SpellingDictionary;
use crate::spelling::levenshtein::bounded_distance;

/// Configuration for the dictionary corrector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Maximum edit distance for a correction.
    pub max_distance: usize,
    /// Count adjacent transpositions as one edit.
    pub transpositions: bool,
    /// Ignore dictionary words below this frequency when correcting.
    pub min_frequency: u32,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_distance: 2,
            transpositions: true,
            min_frequency: 1,
        }
    }
}

/// Spell checker returning the closest dictionary word.
///
/// Candidates are ranked by edit distance, then by higher frequency, then
/// alphabetically, so the result is deterministic.
#[derive(Debug, Clone)]
pub struct DictionaryCorrector {
    dictionary: SpellingDictionary,
    config: CorrectorConfig,
}

impl DictionaryCorrector {
    /// Create a corrector with the default configuration.
    pub fn new(dictionary: SpellingDictionary) -> Self {
        Self::with_config(dictionary, CorrectorConfig::default())
    }

    /// Create a corrector with a custom configuration.
    pub fn with_config(dictionary: SpellingDictionary, config: CorrectorConfig) -> Self {
        DictionaryCorrector { dictionary, config }
    }

    pub fn dictionary(&self) -> &SpellingDictionary {
        &self.dictionary
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Best dictionary word within `max_distance` edits of `word`.
    pub fn best_candidate(&self, word: &str) -> Option<String> {
        let word = word.to_lowercase();
        let mut best: Option<(usize, u32, &str)> = None;

        for (candidate, frequency) in self.dictionary.iter() {
            if frequency < self.config.min_frequency || candidate == word {
                continue;
            }
            let Some(distance) = bounded_distance(
                &word,
                candidate,
                self.config.transpositions,
                self.config.max_distance,
            ) else {
                continue;
            };

            let better = match best {
                None => true,
                Some((best_distance, best_frequency, best_word)) => {
                    (distance, std::cmp::Reverse(frequency), candidate)
                        < (best_distance, std::cmp::Reverse(best_frequency), best_word)
                }
            };
            if better {
                best = Some((distance, frequency, candidate));
            }
        }

        best.map(|(_, _, candidate)| candidate.to_string())
    }
}

impl SpellChecker for DictionaryCorrector {
    fn contains(&self, word: &str) -> Result<bool> {
        Ok(self.dictionary.contains(word))
    }

    fn fix(&self, word: &str) -> Result<Option<String>> {
        Ok(self.best_candidate(word))
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
