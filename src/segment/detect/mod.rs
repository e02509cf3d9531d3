//! Headline detectors.
//!
//! Each heuristic is an independent [`HeadlineDetector`] that reads the shared
//! [`SourceDocument`] and returns scored candidates with absolute offsets.
//! Detectors never see each other's output; combining them is the job of the
//! merge stage.
//!
//! # Example
//!
//! ```
//! use newsprint::segment::{DetectorSet, SegmentOptions, SourceDocument};
//!
//! let options = SegmentOptions::default();
//! let detectors = DetectorSet::with_defaults(&options)?;
//! let doc = SourceDocument::from_text("Pool Reopens Downtown\nBy Dana Lee\nBody.");
//! let candidates = detectors.detect_all(&doc);
//! assert_eq!(candidates[0].title, "Pool Reopens Downtown");
//! # Ok::<(), newsprint::Error>(())
//! ```

mod byline;
mod cluster;
mod dateline;
mod line_scan;
mod section;

pub use byline::BylineDetector;
pub use cluster::BoldClusterDetector;
pub use dateline::DatelineDetector;
pub use line_scan::LineMetricDetector;
pub use section::SectionDetector;

use std::collections::BTreeMap;
use std::sync::Arc;

use super::options::SegmentOptions;
use super::source::SourceDocument;
use crate::error::Result;
use crate::model::HeadlineCandidate;

/// Trait for headline detectors.
///
/// Implement this trait to add a new headline heuristic.
pub trait HeadlineDetector: Send + Sync {
    /// Name recorded on every candidate this detector produces.
    fn name(&self) -> &str;

    /// Produce candidates for `doc`.
    fn detect(&self, doc: &SourceDocument<'_>) -> Vec<HeadlineCandidate>;

    /// Whether the detector needs line metadata to run.
    fn requires_lines(&self) -> bool {
        false
    }
}

/// Ordered collection of detectors.
pub struct DetectorSet {
    detectors: Vec<Arc<dyn HeadlineDetector>>,
}

impl DetectorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Create a set with the five built-in detectors.
    pub fn with_defaults(options: &SegmentOptions) -> Result<Self> {
        let mut set = Self::new();
        set.register(Arc::new(BylineDetector::new(options)?));
        set.register(Arc::new(DatelineDetector::new(options)?));
        set.register(Arc::new(BoldClusterDetector::new(options)?));
        set.register(Arc::new(LineMetricDetector::new(options)?));
        set.register(Arc::new(SectionDetector::new(options)?));
        Ok(set)
    }

    /// Register a detector.
    ///
    /// A detector with the same name (case-insensitive) is replaced in place.
    pub fn register(&mut self, detector: Arc<dyn HeadlineDetector>) {
        let name = detector.name().to_lowercase();
        match self
            .detectors
            .iter()
            .position(|d| d.name().to_lowercase() == name)
        {
            Some(i) => self.detectors[i] = detector,
            None => self.detectors.push(detector),
        }
    }

    /// Get a detector by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Arc<dyn HeadlineDetector>> {
        let name = name.to_lowercase();
        self.detectors
            .iter()
            .find(|d| d.name().to_lowercase() == name)
            .cloned()
    }

    /// Remove a detector by name. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = name.to_lowercase();
        let before = self.detectors.len();
        self.detectors.retain(|d| d.name().to_lowercase() != name);
        self.detectors.len() != before
    }

    /// Names of the registered detectors, in run order.
    pub fn names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Number of registered detectors.
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Check whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Run every applicable detector and concatenate their candidates.
    pub fn detect_all(&self, doc: &SourceDocument<'_>) -> Vec<HeadlineCandidate> {
        self.detect_with_counts(doc).0
    }

    /// Run every applicable detector, also reporting per-detector counts.
    pub fn detect_with_counts(
        &self,
        doc: &SourceDocument<'_>,
    ) -> (Vec<HeadlineCandidate>, BTreeMap<String, usize>) {
        let mut candidates = Vec::new();
        let mut counts = BTreeMap::new();

        for detector in &self.detectors {
            if detector.requires_lines() && !doc.has_lines() {
                continue;
            }
            let found = detector.detect(doc);
            log::debug!("Detector {} produced {} candidates", detector.name(), found.len());
            counts.insert(detector.name().to_string(), found.len());
            candidates.extend(found);
        }

        (candidates, counts)
    }
}

impl Default for DetectorSet {
    fn default() -> Self {
        Self::new()
    }
}
