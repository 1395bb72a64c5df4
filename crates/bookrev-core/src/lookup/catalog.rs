//! Offline works catalog loaded from a local JSON file.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use once_cell::sync::Lazy;

use super::{LookupError, WorksLookup};
use crate::WorkCandidate;
use crate::matching::normalize_for_comparison;

/// Words too common to discriminate between titles.
static INDEX_STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "from", "with", "into", "its", "his", "her", "their", "our", "new",
    ]
    .into_iter()
    .collect()
});

fn index_words(title: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    normalize_for_comparison(title)
        .split_whitespace()
        .filter(|w| w.len() >= 3 && !INDEX_STOP_WORDS.contains(w))
        .filter(|w| seen.insert(w.to_string()))
        .map(str::to_string)
        .collect()
}

/// An in-memory inverted index over a list of works.
///
/// The file format is a JSON array of objects with `title`, `author` (or
/// `author_display_name`) and optional `year` (or `publication_year`).
#[derive(Debug, Default)]
pub struct WorksCatalog {
    works: Vec<WorkCandidate>,
    index: HashMap<String, Vec<usize>>,
}

impl WorksCatalog {
    pub fn new(works: Vec<WorkCandidate>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, work) in works.iter().enumerate() {
            for word in index_words(&work.title) {
                index.entry(word).or_default().push(i);
            }
        }
        Self { works, index }
    }

    pub fn from_path(path: &Path) -> Result<Self, LookupError> {
        let content = std::fs::read_to_string(path)?;
        let works: Vec<WorkCandidate> = serde_json::from_str(&content)?;
        tracing::info!(path = %path.display(), works = works.len(), "loaded works catalog");
        Ok(Self::new(works))
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    /// Works sharing at least half of the query's significant words, best first.
    pub fn search_sync(&self, query: &str, limit: usize) -> Vec<WorkCandidate> {
        let words = index_words(query);
        if words.is_empty() {
            return Vec::new();
        }
        let needed = words.len().div_ceil(2);

        let mut hits: HashMap<usize, usize> = HashMap::new();
        for word in &words {
            if let Some(postings) = self.index.get(word) {
                for &i in postings {
                    *hits.entry(i).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(usize, usize)> =
            hits.into_iter().filter(|&(_, n)| n >= needed).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(i, _)| self.works[i].clone())
            .collect()
    }
}

impl WorksLookup for WorksCatalog {
    fn name(&self) -> &str {
        "catalog"
    }

    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<WorkCandidate>, LookupError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.search_sync(query, limit)) })
    }
}
