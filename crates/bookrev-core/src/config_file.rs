use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Strictness;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub lookup: Option<LookupConfig>,
    pub pipeline: Option<PipelineConfig>,
    pub vocabulary: Option<VocabularyConfig>,
    /// Per-venue overrides keyed by venue name.
    pub venues: Option<BTreeMap<String, VenueConfig>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupConfig {
    pub catalog_path: Option<String>,
    pub max_candidates: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub concurrency: Option<usize>,
    pub lookup_enabled: Option<bool>,
    pub min_title_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub extra_stopwords: Option<Vec<String>>,
    pub extra_topic_nouns: Option<Vec<String>>,
    pub extra_exclusions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    pub strictness: Option<Strictness>,
    /// Every item in this venue is a review; skip the classifier.
    pub all_reviews: Option<bool>,
}

/// Platform config directory path: `<config_dir>/bookrev/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bookrev").join("config.toml"))
}

/// Load config by cascading CWD `.bookrev.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".bookrev.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    match try_load_from_path(path) {
        Ok(config) => Some(config),
        Err(ConfigError::Io(_)) => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            None
        }
    }
}

/// Like [`load_from_path`], but reports why the file could not be used.
pub fn try_load_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_lookup = base.lookup.unwrap_or_default();
    let over_lookup = overlay.lookup.unwrap_or_default();
    let base_pipeline = base.pipeline.unwrap_or_default();
    let over_pipeline = overlay.pipeline.unwrap_or_default();
    let base_vocab = base.vocabulary.unwrap_or_default();
    let over_vocab = overlay.vocabulary.unwrap_or_default();

    let venues = match (base.venues, overlay.venues) {
        (None, None) => None,
        (Some(v), None) | (None, Some(v)) => Some(v),
        (Some(mut merged), Some(over)) => {
            for (name, venue) in over {
                let entry = merged.entry(name).or_default();
                entry.strictness = venue.strictness.or(entry.strictness);
                entry.all_reviews = venue.all_reviews.or(entry.all_reviews);
            }
            Some(merged)
        }
    };

    ConfigFile {
        lookup: Some(LookupConfig {
            catalog_path: over_lookup.catalog_path.or(base_lookup.catalog_path),
            max_candidates: over_lookup.max_candidates.or(base_lookup.max_candidates),
        }),
        pipeline: Some(PipelineConfig {
            concurrency: over_pipeline.concurrency.or(base_pipeline.concurrency),
            lookup_enabled: over_pipeline.lookup_enabled.or(base_pipeline.lookup_enabled),
            min_title_chars: over_pipeline.min_title_chars.or(base_pipeline.min_title_chars),
        }),
        vocabulary: Some(VocabularyConfig {
            extra_stopwords: over_vocab.extra_stopwords.or(base_vocab.extra_stopwords),
            extra_topic_nouns: over_vocab.extra_topic_nouns.or(base_vocab.extra_topic_nouns),
            extra_exclusions: over_vocab.extra_exclusions.or(base_vocab.extra_exclusions),
        }),
        venues,
    }
}
