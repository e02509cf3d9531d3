//! # newsprint
//!
//! Heuristic article segmentation for community-newspaper PDF text.
//!
//! This library takes the text layer of a newspaper PDF (full text plus
//! optional per-line bold/page/position metadata) and splits it into
//! discrete articles with titles, authors, bodies and categories.
//!
//! ## Quick Start
//!
//! ```
//! use newsprint::segment_text;
//!
//! fn main() -> newsprint::Result<()> {
//!     let text = "Local Pool Reopens After Repairs\nBy Dana Lee\n\
//!         The township pool reopened Saturday after a six-week repair to its \
//!         filtration system. Officials said attendance exceeded expectations.";
//!
//!     let articles = segment_text(text)?;
//!     assert_eq!(articles[0].title, "Local Pool Reopens After Repairs");
//!     assert_eq!(articles[0].author, "Dana Lee");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Independent detectors**: byline, dateline, bold clusters, line metrics
//!   and configured sections, combined by an explicit merge stage
//! - **Extensible**: register custom [`HeadlineDetector`]s
//! - **Graceful fallback**: fixed-size chunking when no structure is found
//! - **Parallel batches**: Uses Rayon for many documents
//! - **Export**: site-ready JSON records and an article store (publish, list,
//!   update, delete)

pub mod error;
pub mod export;
pub mod model;
pub mod normalize;
pub mod segment;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    delete_article, list_articles, publish_articles, update_article, ArticleRecord, ExportOptions,
    JsonFormat, PublishReport, StoredArticle,
};
pub use model::{Article, Category, HeadlineCandidate, PageLine, SegmentInput};
pub use normalize::{NormalizeOptions, NormalizePreset, TextNormalizer};
pub use segment::{
    DetectorSet, HeadlineDetector, SegmentOptions, SegmentStats, Segmentation, Segmenter,
    SourceDocument, YAxis,
};

use std::path::Path;
use std::sync::Arc;

/// Segment plain text with default options.
///
/// # Example
///
/// ```
/// use newsprint::segment_text;
///
/// let articles = segment_text("").unwrap();
/// assert!(articles.is_empty());
/// ```
pub fn segment_text(text: &str) -> Result<Vec<Article>> {
    Ok(Segmenter::new(SegmentOptions::default())?
        .segment_text(text)?
        .articles)
}

/// Segment an input (text plus optional line metadata) with default options.
pub fn segment(input: &SegmentInput) -> Result<Segmentation> {
    Segmenter::new(SegmentOptions::default())?.segment(input)
}

/// Segment an input with custom options.
///
/// # Example
///
/// ```
/// use newsprint::{segment_with_options, SegmentInput, SegmentOptions};
///
/// let options = SegmentOptions::new()
///     .with_default_author("Staff Writer")
///     .with_section_hint("Police Blotter");
/// let result = segment_with_options(&SegmentInput::from_text("police blotter"), options)?;
/// # Ok::<(), newsprint::Error>(())
/// ```
pub fn segment_with_options(input: &SegmentInput, options: SegmentOptions) -> Result<Segmentation> {
    Segmenter::new(options)?.segment(input)
}

/// Split text into fixed-size chunks without headline detection.
pub fn chunk_text(text: &str) -> Result<Vec<Article>> {
    Ok(Segmenter::new(SegmentOptions::default())?.chunk(text))
}

/// Segment text and render the articles as JSON.
///
/// # Example
///
/// ```
/// use newsprint::{to_json, JsonFormat};
///
/// let json = to_json("", JsonFormat::Compact).unwrap();
/// assert_eq!(json, "[]");
/// ```
pub fn to_json(text: &str, format: JsonFormat) -> Result<String> {
    let articles = segment_text(text)?;
    export::to_json(&articles, format)
}

/// Builder for segmenting and exporting newspaper text.
///
/// # Example
///
/// ```no_run
/// use newsprint::{ExportOptions, Newsprint, SegmentInput};
///
/// let result = Newsprint::new()
///     .with_author("Staff Writer")
///     .with_section("Mayor's Corner")
///     .segment(&SegmentInput::from_text("..."))?;
/// let report = result.publish("./articles", &ExportOptions::default())?;
/// # Ok::<(), newsprint::Error>(())
/// ```
pub struct Newsprint {
    options: SegmentOptions,
    detectors: Vec<Arc<dyn HeadlineDetector>>,
}

impl Newsprint {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: SegmentOptions::default(),
            detectors: Vec::new(),
        }
    }

    /// Replace all options.
    pub fn with_options(mut self, options: SegmentOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the fallback author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.options = self.options.with_default_author(author);
        self
    }

    /// Add a recurring section name.
    pub fn with_section(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_section_hint(name);
        self
    }

    /// Set the minimum body length.
    pub fn with_min_body_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_min_body_chars(chars);
        self
    }

    /// Disable input normalization.
    pub fn without_normalization(mut self) -> Self {
        self.options = self.options.with_normalization(false);
        self
    }

    /// Add a custom detector alongside the defaults.
    pub fn with_detector(mut self, detector: Arc<dyn HeadlineDetector>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Build the segmenter.
    pub fn build(self) -> Result<Segmenter> {
        let mut segmenter = Segmenter::new(self.options)?;
        for detector in self.detectors {
            segmenter.register_detector(detector);
        }
        Ok(segmenter)
    }

    /// Segment an input.
    pub fn segment(self, input: &SegmentInput) -> Result<NewsprintResult> {
        let segmentation = self.build()?.segment(input)?;
        Ok(NewsprintResult { segmentation })
    }

    /// Segment plain text.
    pub fn segment_text(self, text: &str) -> Result<NewsprintResult> {
        self.segment(&SegmentInput::from_text(text))
    }
}

impl Default for Newsprint {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of segmenting one input.
pub struct NewsprintResult {
    /// Articles and statistics
    pub segmentation: Segmentation,
}

impl NewsprintResult {
    /// Get the articles.
    pub fn articles(&self) -> &[Article] {
        &self.segmentation.articles
    }

    /// Get the run statistics.
    pub fn stats(&self) -> &SegmentStats {
        &self.segmentation.stats
    }

    /// Convert the articles to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        export::to_json(self.articles(), format)
    }

    /// Build site records for the articles.
    pub fn records(&self, options: &ExportOptions) -> Vec<ArticleRecord> {
        ArticleRecord::from_articles(self.articles(), options)
    }

    /// Write the records to `dir`.
    pub fn publish(&self, dir: impl AsRef<Path>, options: &ExportOptions) -> Result<PublishReport> {
        publish_articles(dir, &self.records(options))
    }
}
