//! Combining raw detector output into one ordered, non-overlapping list.
//!
//! The stages run in a fixed order: clean titles, drop malformed titles,
//! drop low-confidence candidates, deduplicate by normalized title, sort by
//! offset, resolve overlapping spans, then merge adjacent fragments of the
//! same headline.

use std::collections::HashMap;

use regex::Regex;

use super::byline::BylinePattern;
use super::metrics::{clean_title, normalize_title, LineMetrics};
use super::options::{HeadlineThresholds, SegmentOptions};
use crate::error::Result;
use crate::model::HeadlineCandidate;

/// Captions, credits, copyright lines, navigation and contact details.
const MALFORMED: &str = r"(?i)^(?:photos?\b|courtesy\b|continued\b|see\b.*\bpage\s*\d+|page\s*\d+\s*$)|©|\(c\)|\bcopyright\b|all rights reserved|https?://|\bwww\.|[\w.+-]+@[\w-]+\.[\w.]+";

/// Merges, deduplicates and orders headline candidates.
#[derive(Debug, Clone)]
pub struct CandidateMerger {
    malformed: Regex,
    bylines: BylinePattern,
    thresholds: HeadlineThresholds,
    min_confidence: f32,
    max_gap: usize,
    max_words: usize,
}

impl CandidateMerger {
    /// Create a merger.
    pub fn new(options: &SegmentOptions) -> Result<Self> {
        Ok(Self {
            malformed: Regex::new(MALFORMED)?,
            bylines: BylinePattern::new()?,
            thresholds: options.thresholds.clone(),
            min_confidence: options.min_confidence,
            max_gap: options.merge_max_gap,
            max_words: options.merge_max_words,
        })
    }

    /// Check whether a cleaned title cannot be a headline.
    pub fn is_malformed(&self, title: &str) -> bool {
        if title.is_empty() || self.malformed.is_match(title) || self.bylines.is_byline(title) {
            return true;
        }
        let digits = title.chars().filter(char::is_ascii_digit).count();
        let letters = title.chars().filter(|c| c.is_alphabetic()).count();
        digits > letters
    }

    /// Run every stage over `candidates` found in `text`.
    pub fn merge(&self, text: &str, candidates: Vec<HeadlineCandidate>) -> Vec<HeadlineCandidate> {
        let filtered = candidates
            .into_iter()
            .filter_map(|mut candidate| {
                candidate.title = clean_title(&candidate.title);
                if !has_valid_span(text, &candidate) {
                    log::debug!("Dropping candidate with invalid span: {:?}", candidate.title);
                    return None;
                }
                if self.is_malformed(&candidate.title) {
                    log::debug!("Dropping malformed candidate: {:?}", candidate.title);
                    return None;
                }
                if candidate.confidence < self.min_confidence {
                    log::debug!(
                        "Dropping low-confidence candidate {:?} ({:.2})",
                        candidate.title,
                        candidate.confidence
                    );
                    return None;
                }
                Some(candidate)
            })
            .collect();

        let mut unique = dedup_by_title(filtered);
        unique.sort_by(|a, b| {
            a.start_offset
                .cmp(&b.start_offset)
                .then(a.end_offset.cmp(&b.end_offset))
        });

        let separated = resolve_overlaps(unique);
        self.merge_adjacent(text, separated)
    }

    fn merge_adjacent(
        &self,
        text: &str,
        candidates: Vec<HeadlineCandidate>,
    ) -> Vec<HeadlineCandidate> {
        let mut merged: Vec<HeadlineCandidate> = Vec::with_capacity(candidates.len());

        for next in candidates {
            if let Some(current) = merged.last_mut() {
                if let Some(combined) = self.try_merge(text, current, &next) {
                    log::debug!("Merged {:?} + {:?}", current.title, next.title);
                    *current = combined;
                    continue;
                }
            }
            merged.push(next);
        }

        merged
    }

    fn try_merge(
        &self,
        text: &str,
        current: &HeadlineCandidate,
        next: &HeadlineCandidate,
    ) -> Option<HeadlineCandidate> {
        if current.author.is_some() || next.start_offset < current.end_offset {
            return None;
        }

        let gap = &text[current.end_offset..next.start_offset];
        if gap.chars().count() > self.max_gap || self.bylines.contains(gap) {
            return None;
        }

        let title = clean_title(&text[current.start_offset..next.end_offset]);
        let metrics = LineMetrics::of(&title);
        if metrics.word_count > self.max_words || !metrics.is_strong(&self.thresholds) {
            return None;
        }

        Some(HeadlineCandidate {
            title,
            start_offset: current.start_offset,
            end_offset: next.end_offset,
            confidence: current.confidence.max(next.confidence),
            author: next.author.clone().or_else(|| current.author.clone()),
            page: current.page,
            detector: current.detector.clone(),
        })
    }
}

fn has_valid_span(text: &str, candidate: &HeadlineCandidate) -> bool {
    candidate.is_valid_span()
        && candidate.end_offset <= text.len()
        && text.is_char_boundary(candidate.start_offset)
        && text.is_char_boundary(candidate.end_offset)
}

/// Keep the highest-confidence candidate per normalized title.
///
/// The kept candidate inherits an author from a dropped duplicate.
fn dedup_by_title(candidates: Vec<HeadlineCandidate>) -> Vec<HeadlineCandidate> {
    let mut kept: Vec<HeadlineCandidate> = Vec::with_capacity(candidates.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        let key = normalize_title(&candidate.title);
        match index.get(&key) {
            Some(&i) => {
                let existing = &mut kept[i];
                if candidate.confidence > existing.confidence {
                    let author = existing.author.take();
                    *existing = candidate;
                    if existing.author.is_none() {
                        existing.author = author;
                    }
                } else if existing.author.is_none() {
                    existing.author = candidate.author;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}

/// Drop candidates whose span overlaps a higher-confidence one.
///
/// Input must be sorted by start offset; the output keeps that order.
fn resolve_overlaps(candidates: Vec<HeadlineCandidate>) -> Vec<HeadlineCandidate> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    // Stable: equal confidence keeps the earlier candidate.
    order.sort_by(|&a, &b| {
        candidates[b]
            .confidence
            .partial_cmp(&candidates[a].confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut accepted: Vec<usize> = Vec::new();
    let mut inherited: HashMap<usize, String> = HashMap::new();

    for i in order {
        match accepted
            .iter()
            .copied()
            .find(|&k| candidates[k].overlaps(&candidates[i]))
        {
            Some(k) => {
                if candidates[k].author.is_none() {
                    if let Some(author) = &candidates[i].author {
                        inherited.entry(k).or_insert_with(|| author.clone());
                    }
                }
            }
            None => accepted.push(i),
        }
    }

    accepted.sort_unstable();
    let mut slots: Vec<Option<HeadlineCandidate>> = candidates.into_iter().map(Some).collect();
    accepted
        .into_iter()
        .filter_map(|i| {
            let mut candidate = slots[i].take()?;
            if let Some(author) = inherited.remove(&i) {
                candidate.author = Some(author);
            }
            Some(candidate)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merger() -> CandidateMerger {
        CandidateMerger::new(&SegmentOptions::default()).unwrap()
    }

    #[test]
    fn test_malformed_titles() {
        let m = merger();
        for title in [
            "",
            "Photo by Jane Smith",
            "Courtesy of the Township",
            "© 2024 Gazette Media",
            "Copyright Gazette Media",
            "All Rights Reserved",
            "Continued on Page 4",
            "See Budget, Page 6",
            "Page 12",
            "Visit www.example.com",
            "Email news@example.com",
            "2024-06-06 10:30",
            "By Dana Lee",
        ] {
            assert!(m.is_malformed(title), "{title:?} should be malformed");
        }
        assert!(!m.is_malformed("Local Pool Reopens After Repairs"));
        assert!(!m.is_malformed("Photographers Club Wins Award"));
    }

    #[test]
    fn test_drops_low_confidence() {
        let text = "Pool Reopens Today";
        let merged = merger().merge(
            text,
            vec![HeadlineCandidate::new("Pool Reopens Today", 0, 18, 1.9, "x")],
        );
        assert!(merged.is_empty());
    }

    #[test]
    fn test_dedup_keeps_max_confidence_and_author() {
        let text = "Pool Reopens Today\nBy Dana Lee\nBody";
        let merged = merger().merge(
            text,
            vec![
                HeadlineCandidate::new("Pool Reopens Today", 0, 18, 3.0, "byline")
                    .with_author("Dana Lee"),
                HeadlineCandidate::new("POOL REOPENS TODAY!", 0, 18, 4.2, "bold_cluster"),
            ],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].confidence, 4.2);
        assert_eq!(merged[0].detector, "bold_cluster");
        assert_eq!(merged[0].author.as_deref(), Some("Dana Lee"));
    }

    #[test]
    fn test_overlap_keeps_higher_confidence() {
        let text = "Council Approves\nNew Library Wing";
        let merged = merger().merge(
            text,
            vec![
                HeadlineCandidate::new("New Library Wing", 17, 33, 3.0, "byline")
                    .with_author("Sam Ortiz"),
                HeadlineCandidate::new("Council Approves New Library Wing", 0, 33, 4.0, "bold_cluster"),
            ],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start_offset, 0);
        assert_eq!(merged[0].author.as_deref(), Some("Sam Ortiz"));
    }

    #[test]
    fn test_adjacent_fragments_merge() {
        let text = "Storm Damages\nRiverside Homes\nResidents returned.";
        let merged = merger().merge(
            text,
            vec![
                HeadlineCandidate::new("Storm Damages", 0, 13, 3.0, "line_metrics"),
                HeadlineCandidate::new("Riverside Homes", 14, 29, 3.4, "line_metrics"),
            ],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "Storm Damages Riverside Homes");
        assert_eq!(merged[0].end_offset, 29);
        assert_eq!(merged[0].confidence, 3.4);
    }

    #[test]
    fn test_authored_candidate_never_merges() {
        let text = "Storm Damages Homes\nRiverside Cleanup Begins";
        let merged = merger().merge(
            text,
            vec![
                HeadlineCandidate::new("Storm Damages Homes", 0, 19, 3.0, "byline")
                    .with_author("Dana Lee"),
                HeadlineCandidate::new("Riverside Cleanup Begins", 20, 44, 3.0, "line_metrics"),
            ],
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_distant_candidates_stay_apart() {
        let body = "x".repeat(100);
        let text = format!("Storm Damages Homes\n{body}\nRiverside Cleanup Begins");
        let second = text.len() - "Riverside Cleanup Begins".len();
        let merged = merger().merge(
            &text,
            vec![
                HeadlineCandidate::new("Storm Damages Homes", 0, 19, 3.0, "x"),
                HeadlineCandidate::new("Riverside Cleanup Begins", second, text.len(), 3.0, "x"),
            ],
        );
        assert_eq!(merged.len(), 2);
        assert!(merged[0].start_offset < merged[1].start_offset);
    }

    #[test]
    fn test_invalid_span_dropped() {
        let merged = merger().merge(
            "short",
            vec![HeadlineCandidate::new("Pool Reopens Today", 0, 50, 3.0, "x")],
        );
        assert!(merged.is_empty());
    }
}
