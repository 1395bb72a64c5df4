//! Candidate matching: pick the work that is actually the reviewed book.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::WorkCandidate;

/// Candidates scoring below this are never returned.
pub const MIN_MATCH_SCORE: f64 = 0.5;

/// Penalty for a candidate whose year (or the target year) is unknown.
pub const UNKNOWN_YEAR_PENALTY: i32 = 50;

/// Penalty for a candidate published after the review appeared.
pub const FUTURE_YEAR_PENALTY: i32 = 100;

/// Normalize a title for comparison.
///
/// 1. Strip markup tags and decode `&amp;`
/// 2. Unicode NFKD normalization, strip to ASCII (folds accents)
/// 3. Lowercase
/// 4. Keep only `[a-z0-9 ]`
/// 5. Collapse whitespace
pub fn normalize_for_comparison(title: &str) -> String {
    static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
    let title = TAG_RE.replace_all(title, "").replace("&amp;", "&");

    let folded: String = title.nfkd().filter(|c| c.is_ascii()).collect();
    let kept: String = folded
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The main title: everything before the first colon.
pub fn main_title(title: &str) -> &str {
    title.split(':').next().unwrap_or(title).trim()
}

/// Length ratio when one normalized title is a word-aligned prefix of the other.
fn prefix_ratio(a: &str, b: &str) -> Option<f64> {
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() || !longer.starts_with(shorter) {
        return None;
    }
    // "plato" must not count as a prefix of "platonism"
    if longer.len() > shorter.len() && longer.as_bytes()[shorter.len()] != b' ' {
        return None;
    }
    Some(shorter.len() as f64 / longer.len() as f64)
}

/// Token-set Jaccard overlap of two normalized titles.
fn jaccard(a: &str, b: &str) -> f64 {
    let a: HashSet<&str> = a.split_whitespace().collect();
    let b: HashSet<&str> = b.split_whitespace().collect();
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// Similarity between a locally extracted title and a candidate's title, in `[0, 1]`.
///
/// Full titles (subtitle included) are compared first; only when that is
/// inconclusive does the main-title comparison apply, at lower weights.
pub fn title_match_score(local_title: &str, candidate_title: &str) -> f64 {
    let full_local = normalize_for_comparison(local_title);
    let full_cand = normalize_for_comparison(candidate_title);
    if full_local.is_empty() || full_cand.is_empty() {
        return 0.0;
    }

    if full_local == full_cand {
        return 1.0;
    }
    if let Some(ratio) = prefix_ratio(&full_local, &full_cand) {
        return 0.95 * ratio;
    }
    let overlap = jaccard(&full_local, &full_cand);
    if overlap >= 0.8 {
        return overlap * 0.95;
    }

    let main_local = normalize_for_comparison(main_title(local_title));
    let main_cand = normalize_for_comparison(main_title(candidate_title));
    if main_local.is_empty() || main_cand.is_empty() {
        return 0.0;
    }
    if main_local == main_cand {
        return 0.8;
    }
    if let Some(ratio) = prefix_ratio(&main_local, &main_cand) {
        return 0.7 * ratio;
    }
    jaccard(&main_local, &main_cand) * 0.6
}

/// Year-proximity penalty: lower is better.
///
/// A candidate published after the target year counts as a century away.
pub fn year_penalty(candidate_year: Option<i32>, target_year: Option<i32>) -> i32 {
    match (candidate_year, target_year) {
        (Some(cand), Some(target)) => {
            let diff = target.saturating_sub(cand);
            if diff >= 0 { diff } else { FUTURE_YEAR_PENALTY }
        }
        _ => UNKNOWN_YEAR_PENALTY,
    }
}

/// A candidate together with the numbers that ranked it.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a WorkCandidate,
    pub score: f64,
    pub year_penalty: i32,
}

/// Rank `candidates` against `local_title` and return the winner with its score.
pub fn best_match_scored<'a>(
    local_title: &str,
    candidates: &'a [WorkCandidate],
    target_year: Option<i32>,
) -> Option<ScoredCandidate<'a>> {
    let mut best: Option<ScoredCandidate<'a>> = None;

    for candidate in candidates {
        if candidate.author_display_name.trim().is_empty() {
            continue;
        }
        let score = title_match_score(local_title, &candidate.title);
        if score < MIN_MATCH_SCORE {
            continue;
        }
        let penalty = year_penalty(candidate.publication_year, target_year);

        let better = match &best {
            None => true,
            Some(b) => {
                score > b.score + f64::EPSILON
                    || ((score - b.score).abs() <= f64::EPSILON && penalty < b.year_penalty)
            }
        };
        if better {
            best = Some(ScoredCandidate {
                candidate,
                score,
                year_penalty: penalty,
            });
        }
    }

    best
}

/// The candidate that is most plausibly the reviewed book, or `None` when
/// nothing clears [`MIN_MATCH_SCORE`].
pub fn best_match<'a>(
    local_title: &str,
    candidates: &'a [WorkCandidate],
    target_year: Option<i32>,
) -> Option<&'a WorkCandidate> {
    best_match_scored(local_title, candidates, target_year).map(|s| s.candidate)
}
