use std::fmt;

use serde::Serialize;

use crate::pipeline::ItemOutcome;

/// Counters for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub seen: usize,
    pub not_a_review: usize,
    pub unparsed: usize,
    pub self_authored: usize,
    pub accepted: usize,
    /// Accepted items that went to the works lookup.
    pub looked_up: usize,
    /// Looked-up items whose author was recovered.
    pub lookup_recovered: usize,
    /// Items parsed from their alternate title.
    pub alternate_parsed: usize,
    /// Accepted items that still lack a book author.
    pub missing_author: usize,
}

impl PipelineStats {
    pub fn record(&mut self, outcome: &ItemOutcome) {
        self.seen += 1;
        match outcome {
            ItemOutcome::NotAReview => self.not_a_review += 1,
            ItemOutcome::Unparsed => self.unparsed += 1,
            ItemOutcome::SelfAuthored => self.self_authored += 1,
            ItemOutcome::Accepted(accepted) => {
                self.accepted += 1;
                if accepted.looked_up {
                    self.looked_up += 1;
                }
                if accepted.looked_up && accepted.record.parse.has_author() {
                    self.lookup_recovered += 1;
                }
                if accepted.from_alternate {
                    self.alternate_parsed += 1;
                }
                if !accepted.record.parse.has_author() {
                    self.missing_author += 1;
                }
            }
        }
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} seen, {} accepted ({} via lookup, {} from alternate titles, {} without author), \
             {} not reviews, {} unparsed, {} self-authored",
            self.seen,
            self.accepted,
            self.lookup_recovered,
            self.alternate_parsed,
            self.missing_author,
            self.not_a_review,
            self.unparsed,
            self.self_authored
        )
    }
}
