use std::collections::HashSet;

use bookrev_core::config_file::VocabularyConfig;
use once_cell::sync::Lazy;

use crate::ParsingError;
use crate::noise::ImprintPatterns;
use crate::vocabulary::{
    DEFAULT_CITIES, DEFAULT_EXCLUSION_MARKERS, DEFAULT_PUBLISHERS, DEFAULT_STOPWORDS,
    DEFAULT_TOPIC_NOUNS,
};

/// Shared default configuration used by the free-function entry points.
pub(crate) static DEFAULT_CONFIG: Lazy<ParsingConfig> = Lazy::new(ParsingConfig::default);

/// Controls how a list of values is overridden from its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }

    fn push(&mut self, value: T) {
        match self {
            ListOverride::Default => *self = ListOverride::Extend(vec![value]),
            ListOverride::Replace(v) | ListOverride::Extend(v) => v.push(value),
        }
    }
}

fn owned(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}

fn lowercase_set(values: Vec<String>) -> HashSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Immutable configuration for classification and extraction.
///
/// Word lists are resolved and lowercased once at build time. Imprint
/// patterns are `None` unless publishers or cities were overridden, in which
/// case the compiled replacement is stored.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    /// Words that count against a span being a personal name.
    pub(crate) stopwords: HashSet<String>,
    /// Subject nouns that disqualify a span unless it carries an initial.
    pub(crate) topic_nouns: HashSet<String>,
    /// Lowercased substrings that veto the review classifier.
    pub(crate) exclusion_markers: Vec<String>,
    /// Compiled publisher/city patterns (`None` = built-in defaults).
    pub(crate) imprint: Option<ImprintPatterns>,
    /// Shortest acceptable book title after noise stripping (default: 4).
    pub(crate) min_title_chars: usize,
    /// Longest span, in words, that can still be a name (default: 6).
    pub(crate) max_name_words: usize,
    /// Shortest emphasis span counted as classifier evidence (default: 15).
    pub(crate) min_emphasis_chars: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            stopwords: lowercase_set(owned(DEFAULT_STOPWORDS)),
            topic_nouns: lowercase_set(owned(DEFAULT_TOPIC_NOUNS)),
            exclusion_markers: owned(DEFAULT_EXCLUSION_MARKERS),
            imprint: None,
            min_title_chars: 4,
            max_name_words: 6,
            min_emphasis_chars: 15,
        }
    }
}

impl ParsingConfig {
    pub fn min_title_chars(&self) -> usize {
        self.min_title_chars
    }

    pub fn max_name_words(&self) -> usize {
        self.max_name_words
    }

    pub fn min_emphasis_chars(&self) -> usize {
        self.min_emphasis_chars
    }

    pub(crate) fn imprint(&self) -> &ImprintPatterns {
        self.imprint
            .as_ref()
            .unwrap_or_else(|| ImprintPatterns::defaults())
    }
}

/// Builder for [`ParsingConfig`].
///
/// Publisher and city lists are compiled into regexes in [`build()`](Self::build),
/// which fails fast if a resulting pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    stopwords: ListOverride<String>,
    topic_nouns: ListOverride<String>,
    exclusion_markers: ListOverride<String>,
    publishers: ListOverride<String>,
    cities: ListOverride<String>,
    min_title_chars: Option<usize>,
    max_name_words: Option<usize>,
    min_emphasis_chars: Option<usize>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Name vocabulary ──

    pub fn set_stopwords(mut self, words: Vec<String>) -> Self {
        self.stopwords = ListOverride::Replace(words);
        self
    }

    pub fn add_stopword(mut self, word: String) -> Self {
        self.stopwords.push(word);
        self
    }

    pub fn set_topic_nouns(mut self, words: Vec<String>) -> Self {
        self.topic_nouns = ListOverride::Replace(words);
        self
    }

    pub fn add_topic_noun(mut self, word: String) -> Self {
        self.topic_nouns.push(word);
        self
    }

    // ── Classifier ──

    pub fn set_exclusion_markers(mut self, markers: Vec<String>) -> Self {
        self.exclusion_markers = ListOverride::Replace(markers);
        self
    }

    pub fn add_exclusion_marker(mut self, marker: String) -> Self {
        self.exclusion_markers.push(marker);
        self
    }

    // ── Imprint noise ──

    pub fn set_publishers(mut self, publishers: Vec<String>) -> Self {
        self.publishers = ListOverride::Replace(publishers);
        self
    }

    pub fn add_publisher(mut self, publisher: String) -> Self {
        self.publishers.push(publisher);
        self
    }

    pub fn set_cities(mut self, cities: Vec<String>) -> Self {
        self.cities = ListOverride::Replace(cities);
        self
    }

    pub fn add_city(mut self, city: String) -> Self {
        self.cities.push(city);
        self
    }

    /// Apply the `[vocabulary]` section of a config file (extends defaults).
    pub fn vocabulary(mut self, vocab: &VocabularyConfig) -> Self {
        for w in vocab.extra_stopwords.iter().flatten() {
            self.stopwords.push(w.clone());
        }
        for w in vocab.extra_topic_nouns.iter().flatten() {
            self.topic_nouns.push(w.clone());
        }
        for m in vocab.extra_exclusions.iter().flatten() {
            self.exclusion_markers.push(m.clone());
        }
        self
    }

    // ── Scalars ──

    pub fn min_title_chars(mut self, n: usize) -> Self {
        self.min_title_chars = Some(n);
        self
    }

    pub fn max_name_words(mut self, n: usize) -> Self {
        self.max_name_words = Some(n);
        self
    }

    pub fn min_emphasis_chars(mut self, n: usize) -> Self {
        self.min_emphasis_chars = Some(n);
        self
    }

    /// Resolve all lists and compile imprint patterns into a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, ParsingError> {
        let max_name_words = self.max_name_words.unwrap_or(6);
        if max_name_words == 0 {
            return Err(ParsingError::InvalidSetting(
                "max_name_words must be at least 1".to_string(),
            ));
        }

        let imprint = match (&self.publishers, &self.cities) {
            (ListOverride::Default, ListOverride::Default) => None,
            (publishers, cities) => Some(ImprintPatterns::compile(
                &publishers.resolve(&owned(DEFAULT_PUBLISHERS)),
                &cities.resolve(&owned(DEFAULT_CITIES)),
            )?),
        };

        Ok(ParsingConfig {
            stopwords: lowercase_set(self.stopwords.resolve(&owned(DEFAULT_STOPWORDS))),
            topic_nouns: lowercase_set(self.topic_nouns.resolve(&owned(DEFAULT_TOPIC_NOUNS))),
            exclusion_markers: self
                .exclusion_markers
                .resolve(&owned(DEFAULT_EXCLUSION_MARKERS))
                .into_iter()
                .map(|m| m.to_lowercase())
                .filter(|m| !m.trim().is_empty())
                .collect(),
            imprint,
            min_title_chars: self.min_title_chars.unwrap_or(4),
            max_name_words,
            min_emphasis_chars: self.min_emphasis_chars.unwrap_or(15),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParsingConfig::default();
        assert_eq!(config.min_title_chars, 4);
        assert_eq!(config.max_name_words, 6);
        assert_eq!(config.min_emphasis_chars, 15);
        assert!(config.stopwords.contains("review"));
        assert!(config.topic_nouns.contains("ethics"));
        assert!(config.imprint.is_none());
    }

    #[test]
    fn test_builder_basic() {
        let config = ParsingConfigBuilder::new()
            .min_title_chars(6)
            .max_name_words(4)
            .build()
            .unwrap();
        assert_eq!(config.min_title_chars, 6);
        assert_eq!(config.max_name_words, 4);
    }

    #[test]
    fn test_builder_extends_vocabulary() {
        let config = ParsingConfigBuilder::new()
            .add_topic_noun("Aesthetics".to_string())
            .add_exclusion_marker("Obituary".to_string())
            .build()
            .unwrap();
        assert!(config.topic_nouns.contains("aesthetics"));
        assert!(config.topic_nouns.contains("ethics"));
        assert!(config.exclusion_markers.contains(&"obituary".to_string()));
    }

    #[test]
    fn test_builder_replaces_stopwords() {
        let config = ParsingConfigBuilder::new()
            .set_stopwords(vec!["zzz".to_string()])
            .build()
            .unwrap();
        assert_eq!(config.stopwords.len(), 1);
    }

    #[test]
    fn test_builder_compiles_imprint_override() {
        let config = ParsingConfigBuilder::new()
            .add_publisher("Acme (Books)".to_string())
            .build()
            .unwrap();
        assert!(config.imprint.is_some());
    }

    #[test]
    fn test_builder_rejects_zero_name_words() {
        assert!(ParsingConfigBuilder::new().max_name_words(0).build().is_err());
    }

    #[test]
    fn test_vocabulary_from_config_file() {
        let vocab = VocabularyConfig {
            extra_stopwords: Some(vec!["Festschrift".to_string()]),
            ..Default::default()
        };
        let config = ParsingConfigBuilder::new().vocabulary(&vocab).build().unwrap();
        assert!(config.stopwords.contains("festschrift"));
        assert!(config.stopwords.contains("the"));
    }

    #[test]
    fn test_list_override_resolve() {
        let defaults = vec!["a".to_string(), "b".to_string()];

        let d: ListOverride<String> = ListOverride::Default;
        assert_eq!(d.resolve(&defaults), defaults);

        let r: ListOverride<String> = ListOverride::Replace(vec!["x".to_string()]);
        assert_eq!(r.resolve(&defaults), vec!["x".to_string()]);

        let e: ListOverride<String> = ListOverride::Extend(vec!["c".to_string()]);
        assert_eq!(
            e.resolve(&defaults),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
