//! Greedy clustering of consecutive bold or headline-cased lines.

use super::HeadlineDetector;
use crate::error::Result;
use crate::model::HeadlineCandidate;
use crate::segment::byline::BylinePattern;
use crate::segment::metrics::{clean_title, LineMetrics};
use crate::segment::options::{DetectorWeights, HeadlineThresholds, SegmentOptions};
use crate::segment::source::{LocatedLine, SourceDocument};

/// Groups adjacent headline-looking lines into multi-line headlines.
pub struct BoldClusterDetector {
    bylines: BylinePattern,
    thresholds: HeadlineThresholds,
    weights: DetectorWeights,
}

impl BoldClusterDetector {
    /// Create a cluster detector.
    pub fn new(options: &SegmentOptions) -> Result<Self> {
        Ok(Self {
            bylines: BylinePattern::new()?,
            thresholds: options.thresholds.clone(),
            weights: options.weights.clone(),
        })
    }

    fn can_start(&self, text: &str, line: &LocatedLine<'_>) -> bool {
        let Some(span) = &line.span else {
            return false;
        };
        (line.bold || line.metrics.is_strong(&self.thresholds))
            && !self.bylines.follows_byline(text, span.start)
    }

    fn can_join(&self, cluster: &[&LocatedLine<'_>], words: usize, line: &LocatedLine<'_>) -> bool {
        let Some(last) = cluster.last() else {
            return false;
        };
        let (Some(prev), Some(next)) = (&last.span, &line.span) else {
            return false;
        };
        last.page() == line.page()
            && next.start >= prev.end
            && !last.metrics.ends_with_period()
            && words + line.metrics.word_count <= self.thresholds.max_words
            && (line.bold || line.metrics.can_extend(&self.thresholds))
    }

    fn finish(&self, cluster: &[&LocatedLine<'_>]) -> Option<HeadlineCandidate> {
        let first = cluster.first()?;
        let last = cluster.last()?;
        let start = first.span.as_ref()?.start;
        let end = last.span.as_ref()?.end;

        let joined = cluster.iter().map(|l| l.text()).collect::<Vec<_>>().join(" ");
        let title = clean_title(&joined);
        let metrics = LineMetrics::of(&title);

        if metrics.word_count < self.thresholds.min_words
            || metrics.word_count > self.thresholds.max_words
            || metrics.char_count < self.thresholds.min_title_chars
        {
            return None;
        }

        let bold_share = cluster.iter().filter(|l| l.bold).count() as f32 / cluster.len() as f32;
        if bold_share == 0.0 && !metrics.is_strong(&self.thresholds) {
            return None;
        }

        let cap = self.weights.ratio_bonus_cap;
        let confidence = self.weights.cluster_base
            + self.weights.cluster_bold * bold_share
            + (cap * metrics.uppercase_ratio).min(cap)
            + (cap * metrics.title_case_ratio).min(cap);

        Some(
            HeadlineCandidate::new(title, start, end, confidence, self.name())
                .with_page(first.page()),
        )
    }
}

impl HeadlineDetector for BoldClusterDetector {
    fn name(&self) -> &str {
        "bold_cluster"
    }

    fn requires_lines(&self) -> bool {
        true
    }

    fn detect(&self, doc: &SourceDocument<'_>) -> Vec<HeadlineCandidate> {
        let mut candidates = Vec::new();
        let mut cluster: Vec<&LocatedLine<'_>> = Vec::new();
        let mut words = 0;

        for line in doc.lines() {
            if line.is_blank() || line.span.is_none() || self.bylines.is_byline(line.text()) {
                candidates.extend(self.finish(&cluster));
                cluster.clear();
                words = 0;
                continue;
            }

            if self.can_join(&cluster, words, line) {
                words += line.metrics.word_count;
                cluster.push(line);
                continue;
            }

            candidates.extend(self.finish(&cluster));
            cluster.clear();
            words = 0;

            if self.can_start(doc.text(), line) {
                words = line.metrics.word_count;
                cluster.push(line);
            }
        }
        candidates.extend(self.finish(&cluster));

        candidates
    }
}
