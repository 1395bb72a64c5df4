//! Integration tests for the [`Pipeline`] against a mock works lookup.
//!
//! No real catalog is involved: every lookup goes to a [`MockLookup`] whose
//! responses, call count and received queries are inspected directly.

use std::sync::Arc;
use std::time::Duration;

use bookrev_core::lookup::{MockLookup, MockResponse};
use bookrev_core::{Reviewer, WorkCandidate};
use bookrev_ingest::{AuthorSource, CitationItem, ItemOutcome, Pipeline, PipelineOptions};

/// A dedicated review venue, so the classifier never gets in the way.
const REVIEW_VENUE: &str = "Philosophy in Review";

fn review_item(title: &str) -> CitationItem {
    CitationItem {
        title: title.to_string(),
        venue: REVIEW_VENUE.to_string(),
        ..Default::default()
    }
}

fn works(list: &[(&str, &str, Option<i32>)]) -> MockResponse {
    MockResponse::Works(
        list.iter()
            .map(|(t, a, y)| WorkCandidate::new(*t, *a, *y))
            .collect(),
    )
}

fn pipeline_with(mock: &Arc<MockLookup>) -> Pipeline {
    Pipeline::default().with_lookup(mock.clone())
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lookup_recovers_author_for_title_only_parse() {
    let mock = Arc::new(MockLookup::new(
        "mock",
        works(&[
            ("The Republic of Plato", "Allan Bloom", Some(1968)),
            ("Plato", "Julia Annas", Some(2003)),
        ]),
    ));
    let pipeline = pipeline_with(&mock);

    let record = pipeline
        .process(&review_item("<i>Plato</i>"))
        .await
        .into_record()
        .unwrap();

    assert_eq!(record.parse.book_title, "Plato");
    assert_eq!(record.parse.author_given, "Julia");
    assert_eq!(record.parse.author_family, "Annas");
    assert!(!record.parse.needs_external_lookup);
    assert_eq!(record.author_source, AuthorSource::Lookup);
    assert_eq!(mock.queries(), vec!["Plato".to_string()]);
}

#[tokio::test]
async fn query_uses_main_title_only() {
    let mock = Arc::new(MockLookup::new("mock", MockResponse::Empty));
    let pipeline = pipeline_with(&mock);

    let record = pipeline
        .process(&review_item("<i>Climate Matters: Ethics in a Warming World</i>"))
        .await
        .into_record()
        .unwrap();

    assert_eq!(mock.queries(), vec!["Climate Matters".to_string()]);
    assert_eq!(record.author_source, AuthorSource::Missing);
    assert!(record.parse.needs_external_lookup);
}

#[tokio::test]
async fn year_proximity_breaks_title_ties() {
    let mock = Arc::new(MockLookup::new(
        "mock",
        works(&[
            ("Plato", "Richard Kraut", Some(2016)),
            ("Plato", "Gail Fine", Some(2010)),
        ]),
    ));
    let pipeline = pipeline_with(&mock);
    let mut item = review_item("<i>Plato</i>");
    item.published = Some("2015-06".into());

    let record = pipeline.process(&item).await.into_record().unwrap();
    assert_eq!(record.parse.author_given, "Gail");
    assert_eq!(record.parse.author_family, "Fine");
}

#[tokio::test]
async fn weak_candidates_are_ignored() {
    let mock = Arc::new(MockLookup::new(
        "mock",
        works(&[("A History of Western Philosophy", "Bertrand Russell", Some(1945))]),
    ));
    let pipeline = pipeline_with(&mock);

    let outcome = pipeline.process(&review_item("<i>Plato</i>")).await;
    let ItemOutcome::Accepted(accepted) = outcome else {
        panic!("expected acceptance");
    };
    assert!(accepted.looked_up);
    assert_eq!(accepted.record.author_source, AuthorSource::Missing);
    assert!(accepted.record.parse.author_family.is_empty());
}

#[tokio::test]
async fn lookup_failure_degrades_to_missing_author() {
    let mock = Arc::new(MockLookup::new("mock", MockResponse::Error("down".into())));
    let pipeline = pipeline_with(&mock);

    let record = pipeline
        .process(&review_item("<i>Plato</i>"))
        .await
        .into_record()
        .unwrap();
    assert_eq!(record.author_source, AuthorSource::Missing);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn short_main_title_is_not_queried() {
    let mock = Arc::new(MockLookup::new("mock", works(&[("Ion", "Plato", None)])));
    let pipeline = pipeline_with(&mock);

    let record = pipeline
        .process(&review_item("<i>Ion: A Dialogue</i>"))
        .await
        .into_record()
        .unwrap();
    assert_eq!(mock.call_count(), 0);
    assert_eq!(record.author_source, AuthorSource::Missing);
}

#[tokio::test]
async fn authored_parse_never_queries() {
    let mock = Arc::new(MockLookup::new("mock", MockResponse::Empty));
    let pipeline = pipeline_with(&mock);

    let record = pipeline
        .process(&review_item("Beast and Man by Mary Midgley (review)"))
        .await
        .into_record()
        .unwrap();
    assert_eq!(record.author_source, AuthorSource::Citation);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn disabled_lookup_is_skipped() {
    let mock = Arc::new(MockLookup::new("mock", works(&[("Plato", "Julia Annas", None)])));
    let pipeline = pipeline_with(&mock).with_options(PipelineOptions {
        lookup_enabled: false,
        ..PipelineOptions::default()
    });

    let record = pipeline
        .process(&review_item("<i>Plato</i>"))
        .await
        .into_record()
        .unwrap();
    assert_eq!(mock.call_count(), 0);
    assert_eq!(record.author_source, AuthorSource::Missing);
}

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

#[tokio::test]
async fn review_venue_bypasses_classifier() {
    let pipeline = Pipeline::default();
    let title = "Peter Singer, Animal Liberation";

    let mut strict = review_item(title);
    strict.venue = "Ethics".into();
    strict.strictness = bookrev_core::Strictness::ItalicOnly;
    assert_eq!(pipeline.process(&strict).await, ItemOutcome::NotAReview);

    let record = pipeline
        .process(&review_item(title))
        .await
        .into_record()
        .unwrap();
    assert_eq!(record.parse.author_family, "Singer");
}

#[tokio::test]
async fn self_authorship_uses_citation_author_only() {
    let mock = Arc::new(MockLookup::new("mock", works(&[("Plato", "Julia Annas", None)])));
    let pipeline = pipeline_with(&mock);

    let mut cited = review_item("Plato, by Julia Annas");
    cited.reviewer = Some(Reviewer::new("Julia", "Annas"));
    assert_eq!(pipeline.process(&cited).await, ItemOutcome::SelfAuthored);

    let mut looked_up = review_item("<i>Plato</i>");
    looked_up.reviewer = Some(Reviewer::new("Julia", "Annas"));
    let record = pipeline.process(&looked_up).await.into_record().unwrap();
    assert_eq!(record.author_source, AuthorSource::Lookup);
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn process_all_keeps_input_order_and_counts() {
    let mock = Arc::new(
        MockLookup::new("mock", works(&[("Plato", "Julia Annas", Some(2003))]))
            .with_delay(Duration::from_millis(20)),
    );
    let pipeline = pipeline_with(&mock).with_options(PipelineOptions {
        concurrency: 3,
        ..PipelineOptions::default()
    });

    let items = vec![
        review_item("<i>Plato</i>"),
        CitationItem::new("Correction to: a prior review"),
        review_item("Reasons and Persons - Derek Parfit"),
        review_item("Book Review"),
        review_item("<i>Plato</i>"),
    ];
    let (outcomes, stats) = pipeline.process_all(&items).await;

    let labels: Vec<&str> = outcomes.iter().map(ItemOutcome::label).collect();
    assert_eq!(
        labels,
        vec!["accepted", "not_a_review", "accepted", "unparsed", "accepted"]
    );
    assert_eq!(outcomes[2].record().unwrap().parse.author_family, "Parfit");

    assert_eq!(stats.seen, 5);
    assert_eq!(stats.accepted, 3);
    assert_eq!(stats.not_a_review, 1);
    assert_eq!(stats.unparsed, 1);
    assert_eq!(stats.looked_up, 2);
    assert_eq!(stats.lookup_recovered, 2);
    assert_eq!(stats.missing_author, 0);
    assert_eq!(mock.call_count(), 2);
}
