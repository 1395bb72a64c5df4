//! Per-item orchestration: classify, extract, reparse, enrich.
//!
//! The pipeline owns no parsing logic of its own. It decides which component
//! runs next for an item and turns the result into a [`ReviewRecord`]. The
//! works lookup is the only suspension point; everything else is synchronous.

use std::sync::Arc;

use bookrev_core::config_file::ConfigFile;
use bookrev_core::lookup::DEFAULT_MAX_CANDIDATES;
use bookrev_core::matching::main_title;
use bookrev_core::{
    AuthorSource, CitationItem, ParseResult, ReviewRecord, WorksLookup, best_match,
};
use bookrev_parsing::{FormatExtractor, ParsingConfig, ReviewClassifier, split_authors};
use futures_util::StreamExt;

use crate::stats::PipelineStats;
use crate::venues::VenueProfiles;

/// Default number of items processed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Items in flight at once (at least 1).
    pub concurrency: usize,
    /// Candidates requested from the works lookup per query.
    pub max_candidates: usize,
    /// Query the works lookup for title-only parses.
    pub lookup_enabled: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            lookup_enabled: true,
        }
    }
}

impl PipelineOptions {
    /// Defaults overlaid with the `[pipeline]` and `[lookup]` sections.
    pub fn from_config(config: &ConfigFile) -> Self {
        let mut options = Self::default();
        if let Some(pipeline) = &config.pipeline {
            if let Some(c) = pipeline.concurrency {
                options.concurrency = c.max(1);
            }
            if let Some(enabled) = pipeline.lookup_enabled {
                options.lookup_enabled = enabled;
            }
        }
        if let Some(m) = config.lookup.as_ref().and_then(|l| l.max_candidates) {
            options.max_candidates = m.max(1);
        }
        options
    }
}

/// An item that made it through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted {
    pub record: ReviewRecord,
    /// The works lookup was queried for this item.
    pub looked_up: bool,
    /// The parse came from the item's alternate title.
    pub from_alternate: bool,
}

/// What happened to one [`CitationItem`].
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Accepted(Box<Accepted>),
    /// Rejected by the review classifier.
    NotAReview,
    /// No format rule produced a parse.
    Unparsed,
    /// The recovered book author is the reviewer.
    SelfAuthored,
}

impl ItemOutcome {
    pub fn record(&self) -> Option<&ReviewRecord> {
        match self {
            ItemOutcome::Accepted(a) => Some(&a.record),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<ReviewRecord> {
        match self {
            ItemOutcome::Accepted(a) => Some(a.record),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemOutcome::Accepted(_) => "accepted",
            ItemOutcome::NotAReview => "not_a_review",
            ItemOutcome::Unparsed => "unparsed",
            ItemOutcome::SelfAuthored => "self_authored",
        }
    }
}

/// Wires classifier, extractor and the optional works lookup together.
pub struct Pipeline {
    extractor: FormatExtractor,
    classifier: ReviewClassifier,
    profiles: VenueProfiles,
    lookup: Option<Arc<dyn WorksLookup>>,
    options: PipelineOptions,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(ParsingConfig::default())
    }
}

impl Pipeline {
    /// A pipeline over `config` with built-in venue profiles and no lookup.
    pub fn new(config: ParsingConfig) -> Self {
        Self {
            classifier: ReviewClassifier::with_config(config.clone()),
            extractor: FormatExtractor::with_config(config),
            profiles: VenueProfiles::builtin(),
            lookup: None,
            options: PipelineOptions::default(),
        }
    }

    /// Replace the extractor, e.g. one carrying venue-specific rules.
    pub fn with_extractor(mut self, extractor: FormatExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_profiles(mut self, profiles: VenueProfiles) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_lookup(mut self, lookup: Arc<dyn WorksLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn profiles(&self) -> &VenueProfiles {
        &self.profiles
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run one item through the whole pipeline.
    pub async fn process(&self, item: &CitationItem) -> ItemOutcome {
        let profile = self.profiles.get(&item.venue);
        if !profile.all_reviews {
            let verdict = self.classifier.classify(&item.title, item.strictness);
            if !verdict.is_review() {
                tracing::debug!(
                    title = %item.title,
                    venue = %item.venue,
                    ?verdict,
                    "not a book review"
                );
                return ItemOutcome::NotAReview;
            }
        }

        let Some((parse, from_alternate)) = self.parse(item) else {
            tracing::debug!(title = %item.title, "no parse");
            return ItemOutcome::Unparsed;
        };

        // Checked before enrichment: lookup authors are never compared with the reviewer.
        if let Some(reviewer) = &item.reviewer
            && parse.is_self_authored(reviewer)
        {
            tracing::debug!(
                title = %item.title,
                reviewer = %reviewer.display_name(),
                "reviewer wrote the reviewed book"
            );
            return ItemOutcome::SelfAuthored;
        }

        let (parse, source, looked_up) = if parse.needs_external_lookup {
            self.enrich(item, parse).await
        } else {
            (parse, AuthorSource::Citation, false)
        };

        ItemOutcome::Accepted(Box::new(Accepted {
            record: ReviewRecord::new(item, parse, source),
            looked_up,
            from_alternate,
        }))
    }

    /// Process `items` with bounded concurrency. Outcomes keep input order.
    pub async fn process_all(&self, items: &[CitationItem]) -> (Vec<ItemOutcome>, PipelineStats) {
        let outcomes: Vec<ItemOutcome> = futures_util::stream::iter(items)
            .map(|item| self.process(item))
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        let mut stats = PipelineStats::default();
        for outcome in &outcomes {
            stats.record(outcome);
        }
        tracing::info!(
            seen = stats.seen,
            accepted = stats.accepted,
            looked_up = stats.looked_up,
            recovered = stats.lookup_recovered,
            "pipeline run complete"
        );
        (outcomes, stats)
    }

    /// Primary parse, with the alternate title as a second chance when the
    /// primary yields nothing or no author.
    fn parse(&self, item: &CitationItem) -> Option<(ParseResult, bool)> {
        let primary = self.extractor.extract(&item.title, &item.subtitle);
        if primary.as_ref().is_some_and(ParseResult::has_author) {
            return primary.map(|p| (p, false));
        }

        let alternate = item
            .alternate_title
            .as_deref()
            .and_then(|alt| self.extractor.extract_alternate(alt));
        match (primary, alternate) {
            (_, Some(alt)) if alt.has_author() => {
                tracing::debug!(alternate = %alt.book_title, "using alternate title parse");
                Some((alt, true))
            }
            (Some(primary), _) => Some((primary, false)),
            (None, Some(alt)) => Some((alt, true)),
            (None, None) => None,
        }
    }

    async fn enrich(
        &self,
        item: &CitationItem,
        parse: ParseResult,
    ) -> (ParseResult, AuthorSource, bool) {
        let Some(lookup) = self.lookup.as_ref().filter(|_| self.options.lookup_enabled) else {
            return (parse, AuthorSource::Missing, false);
        };

        let query = main_title(&parse.book_title);
        if query.chars().count() < self.extractor.config().min_title_chars() {
            tracing::debug!(query, "lookup query too short");
            return (parse, AuthorSource::Missing, false);
        }

        let candidates = match lookup.search(query, self.options.max_candidates).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(backend = lookup.name(), query, error = %e, "works lookup failed");
                Vec::new()
            }
        };

        let Some(winner) = best_match(&parse.book_title, &candidates, item.publication_year())
        else {
            tracing::debug!(
                query,
                candidates = candidates.len(),
                "no candidate cleared the match threshold"
            );
            return (parse, AuthorSource::Missing, true);
        };

        let author = split_authors(&winner.author_display_name);
        if author.is_empty() {
            return (parse, AuthorSource::Missing, true);
        }
        tracing::debug!(
            query,
            matched = %winner.title,
            author = %winner.author_display_name,
            "author recovered from works lookup"
        );
        let merged = parse
            .with_author(author.given, author.family)
            .multiple(author.multiple);
        (merged, AuthorSource::Lookup, true)
    }
}
