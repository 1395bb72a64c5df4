//! JSON-lines citation input and output.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use bookrev_core::{CitationItem, Reviewer, Strictness};
use serde::{Deserialize, Serialize};

use crate::IngestError;
use crate::venues::VenueProfiles;

/// One input line as supplied by the citation-metadata collaborator.
///
/// `strictness` is optional; when absent the venue profile decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default, alias = "journal")]
    pub venue: String,
    #[serde(default)]
    pub strictness: Option<Strictness>,
    #[serde(default, alias = "author")]
    pub reviewer: Option<Reviewer>,
    #[serde(default, alias = "date")]
    pub published: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub alternate_title: Option<String>,
}

impl CitationRecord {
    /// Resolve the venue strictness and build the pipeline input.
    pub fn into_item(self, profiles: &VenueProfiles) -> CitationItem {
        let strictness = self
            .strictness
            .unwrap_or_else(|| profiles.get(&self.venue).strictness);
        CitationItem {
            title: self.title,
            subtitle: self.subtitle.unwrap_or_default(),
            venue: self.venue,
            strictness,
            reviewer: self.reviewer.filter(|r| !r.family.trim().is_empty()),
            published: self.published.filter(|p| !p.trim().is_empty()),
            doi: self.doi,
            alternate_title: self.alternate_title.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Read JSON-lines citations. Blank lines and `#` comments are skipped.
pub fn read_items<R: BufRead>(
    reader: R,
    profiles: &VenueProfiles,
) -> Result<Vec<CitationItem>, IngestError> {
    let mut items = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: CitationRecord =
            serde_json::from_str(trimmed).map_err(|source| IngestError::Record {
                line: idx + 1,
                source,
            })?;
        items.push(record.into_item(profiles));
    }
    tracing::debug!(count = items.len(), "read citation records");
    Ok(items)
}

pub fn read_items_from_path(
    path: &Path,
    profiles: &VenueProfiles,
) -> Result<Vec<CitationItem>, IngestError> {
    let file = File::open(path)?;
    read_items(BufReader::new(file), profiles)
}

/// Write each value as one JSON line.
pub fn write_jsonl<W: Write, T: Serialize>(
    mut writer: W,
    values: impl IntoIterator<Item = T>,
) -> Result<usize, IngestError> {
    let mut count = 0;
    for value in values {
        serde_json::to_writer(&mut writer, &value).map_err(IngestError::Serialize)?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
