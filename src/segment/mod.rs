//! Article segmentation.
//!
//! The pipeline runs in stages over one immutable [`SourceDocument`]:
//!
//! 1. independent [`HeadlineDetector`]s propose scored candidates;
//! 2. the [`CandidateMerger`] cleans, filters, deduplicates and merges them;
//! 3. the [`ArticleAssembler`] cuts the text between headlines into articles;
//! 4. when no structure survives, the [`FallbackChunker`] splits the raw text.
//!
//! [`Segmenter`] wires the stages together.

mod assemble;
mod byline;
mod category;
mod chunk;
pub mod detect;
mod merge;
mod metrics;
mod options;
mod segmenter;
mod source;

pub use assemble::ArticleAssembler;
pub use byline::{BylineMatch, BylinePattern};
pub use category::{infer_category, matched_keywords};
pub use chunk::FallbackChunker;
pub use detect::{
    BoldClusterDetector, BylineDetector, DatelineDetector, DetectorSet, HeadlineDetector,
    LineMetricDetector, SectionDetector,
};
pub use merge::CandidateMerger;
pub use metrics::{
    all_caps_ratio, clean_title, normalize_title, title_case_ratio, uppercase_ratio, LineMetrics,
};
pub use options::{ChunkOptions, DetectorWeights, HeadlineThresholds, SegmentOptions, YAxis};
pub use segmenter::{SegmentStats, Segmentation, Segmenter};
pub use source::{LocatedLine, SourceDocument};
