use thiserror::Error;

pub mod pipeline;
pub mod record;
pub mod stats;
pub mod venues;

// Re-export domain types for convenience
pub use bookrev_core::{AuthorSource, CitationItem, ReviewRecord};
pub use pipeline::{Accepted, ItemOutcome, Pipeline, PipelineOptions};
pub use record::{CitationRecord, read_items, read_items_from_path, write_jsonl};
pub use stats::PipelineStats;
pub use venues::{VenueProfile, VenueProfiles};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid citation record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize output: {0}")]
    Serialize(serde_json::Error),
}
