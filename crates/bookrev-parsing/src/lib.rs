use thiserror::Error;

pub mod alternate;
pub mod authors;
pub mod classifier;
pub mod config;
pub mod extractor;
pub mod markup;
pub mod names;
pub mod noise;
pub mod rules;
pub mod text_processing;
pub mod vocabulary;

pub use alternate::parse_alternate_title;
pub use authors::{NameSplit, split_authors};
pub use classifier::{ReviewClassifier, Verdict, is_review};
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::{FormatExtractor, extract};
pub use names::{looks_like_name, looks_like_name_with_config};
pub use rules::{FormatRule, RuleContext, TitleView, default_rules};
pub use text_processing::normalize;
// Re-export domain types from core (canonical definitions live there)
pub use bookrev_core::{MatchedFormat, ParseResult, Strictness};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}
