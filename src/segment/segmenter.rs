//! The end-to-end segmentation pipeline.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::assemble::ArticleAssembler;
use super::chunk::FallbackChunker;
use super::detect::{DetectorSet, HeadlineDetector};
use super::merge::CandidateMerger;
use super::options::SegmentOptions;
use super::source::SourceDocument;
use crate::error::{Error, Result};
use crate::model::{Article, HeadlineCandidate, PageLine, SegmentInput};
use crate::normalize::{NormalizePreset, TextNormalizer};

/// Statistics collected during one segmentation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentStats {
    /// Number of input lines
    pub line_count: usize,

    /// Lines that could not be located in the full text
    pub unlocated_lines: usize,

    /// Share of lines set in bold
    pub bold_fraction: f32,

    /// Candidates produced by each detector that ran
    pub detector_counts: BTreeMap<String, usize>,

    /// Candidates left after merging and deduplication
    pub candidates_accepted: usize,

    /// Accepted candidates dropped by the body gate or as repeats
    pub candidates_discarded: usize,

    /// Whether the articles came from fallback chunking
    pub used_fallback: bool,
}

impl SegmentStats {
    /// Total candidates produced across all detectors.
    pub fn candidates_detected(&self) -> usize {
        self.detector_counts.values().sum()
    }
}

/// Articles recovered from one input, plus run statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    /// Articles in source order
    pub articles: Vec<Article>,

    /// Run statistics
    pub stats: SegmentStats,
}

impl Segmentation {
    /// Number of articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Check whether no articles were recovered.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Splits document text into articles.
///
/// A `Segmenter` compiles its patterns once and is immutable afterwards, so
/// it can be shared across threads and reused for any number of inputs.
///
/// # Example
///
/// ```
/// use newsprint::{SegmentInput, SegmentOptions, Segmenter};
///
/// let segmenter = Segmenter::new(SegmentOptions::default())?;
/// let text = "Local Pool Reopens After Repairs\nBy Dana Lee\n\
///     The township pool reopened Saturday after a six-week repair to its \
///     filtration system. Officials said attendance exceeded expectations.";
/// let result = segmenter.segment(&SegmentInput::from_text(text))?;
/// assert_eq!(result.articles[0].author, "Dana Lee");
/// # Ok::<(), newsprint::Error>(())
/// ```
pub struct Segmenter {
    options: SegmentOptions,
    detectors: DetectorSet,
    merger: CandidateMerger,
    assembler: ArticleAssembler,
    chunker: FallbackChunker,
    normalizer: TextNormalizer,
}

impl Segmenter {
    /// Create a segmenter with the default detectors.
    pub fn new(options: SegmentOptions) -> Result<Self> {
        let detectors = DetectorSet::with_defaults(&options)?;
        Self::with_detectors(options, detectors)
    }

    /// Create a segmenter with a custom detector set.
    pub fn with_detectors(options: SegmentOptions, detectors: DetectorSet) -> Result<Self> {
        Ok(Self {
            merger: CandidateMerger::new(&options)?,
            assembler: ArticleAssembler::new(&options)?,
            chunker: FallbackChunker::new(&options),
            normalizer: TextNormalizer::from_preset(NormalizePreset::Minimal)?,
            detectors,
            options,
        })
    }

    /// Get the options.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Get the detector set.
    pub fn detectors(&self) -> &DetectorSet {
        &self.detectors
    }

    /// Register an additional detector.
    pub fn register_detector(&mut self, detector: Arc<dyn HeadlineDetector>) {
        self.detectors.register(detector);
    }

    /// Segment a plain text without line metadata.
    pub fn segment_text(&self, text: &str) -> Result<Segmentation> {
        self.segment(&SegmentInput::from_text(text))
    }

    /// Segment one input into articles.
    ///
    /// Falls back to fixed-size chunking when no headline structure can be
    /// recovered. Empty input yields no articles.
    pub fn segment(&self, input: &SegmentInput) -> Result<Segmentation> {
        validate(input)?;

        let mut stats = SegmentStats {
            line_count: input.lines.len(),
            ..Default::default()
        };

        if input.is_empty() {
            return Ok(Segmentation {
                articles: Vec::new(),
                stats,
            });
        }

        let (text, lines) = self.prepare(input);
        let doc = SourceDocument::new(&text, &lines, self.options.y_axis);
        stats.unlocated_lines = doc
            .lines()
            .iter()
            .filter(|l| !l.is_blank() && l.span.is_none())
            .count();
        stats.bold_fraction = doc.bold_fraction();

        let (raw, counts) = self.detectors.detect_with_counts(&doc);
        stats.detector_counts = counts;

        let candidates = self.merger.merge(&text, raw);
        stats.candidates_accepted = candidates.len();

        if candidates.is_empty() {
            log::info!("No headline candidates found, chunking text");
            return Ok(self.fallback(&text, stats));
        }

        match self.assembler.assemble(&text, &candidates) {
            Ok(articles) => {
                stats.candidates_discarded = candidates.len() - articles.len();
                log::debug!(
                    "Assembled {} articles from {} candidates",
                    articles.len(),
                    candidates.len()
                );
                Ok(Segmentation { articles, stats })
            }
            Err(Error::InsufficientStructure { found, required }) => {
                log::info!(
                    "Only {} of {} required articles recovered, chunking text",
                    found,
                    required
                );
                stats.candidates_discarded = candidates.len() - found;
                Ok(self.fallback(&text, stats))
            }
            Err(e) => Err(e),
        }
    }

    /// Segment many inputs in parallel. Results keep the input order.
    pub fn segment_batch(&self, inputs: &[SegmentInput]) -> Vec<Result<Segmentation>> {
        inputs.par_iter().map(|input| self.segment(input)).collect()
    }

    /// Merged, ordered headline candidates for an input, before assembly.
    pub fn candidates(&self, input: &SegmentInput) -> Result<Vec<HeadlineCandidate>> {
        validate(input)?;
        let (text, lines) = self.prepare(input);
        let doc = SourceDocument::new(&text, &lines, self.options.y_axis);
        Ok(self.merger.merge(&text, self.detectors.detect_all(&doc)))
    }

    /// Chunk text without attempting headline detection.
    pub fn chunk(&self, text: &str) -> Vec<Article> {
        let text = if self.options.normalize_text {
            Cow::Owned(self.normalizer.process(text))
        } else {
            Cow::Borrowed(text)
        };
        self.chunker.chunk(&text)
    }

    fn fallback(&self, text: &str, mut stats: SegmentStats) -> Segmentation {
        stats.used_fallback = true;
        Segmentation {
            articles: self.chunker.chunk(text),
            stats,
        }
    }

    fn prepare<'a>(&self, input: &'a SegmentInput) -> (Cow<'a, str>, Cow<'a, [PageLine]>) {
        if !self.options.normalize_text {
            return (
                Cow::Borrowed(input.full_text.as_str()),
                Cow::Borrowed(input.lines.as_slice()),
            );
        }

        let text = self.normalizer.process(&input.full_text);
        let lines = input
            .lines
            .iter()
            .map(|line| PageLine {
                text: self.normalizer.process(&line.text),
                ..line.clone()
            })
            .collect();
        (Cow::Owned(text), Cow::Owned(lines))
    }
}

fn validate(input: &SegmentInput) -> Result<()> {
    for (i, line) in input.lines.iter().enumerate() {
        if line.page == 0 {
            return Err(Error::InvalidInput(format!(
                "line {} has page 0 (pages are 1-based)",
                i
            )));
        }
        if !line.vertical_position.is_finite() {
            return Err(Error::InvalidInput(format!(
                "line {} has a non-finite y coordinate",
                i
            )));
        }
    }
    Ok(())
}
