//! Segmentation options and tunable thresholds.
//!
//! The defaults were tuned against a single newspaper issue. They are
//! starting points, not proven constants; re-tune them for other layouts.

use serde::{Deserialize, Serialize};

/// Direction of the vertical coordinate in [`PageLine`](crate::PageLine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YAxis {
    /// PDF user space: larger `y` is higher on the page
    #[default]
    BottomUp,
    /// Screen space: larger `y` is lower on the page
    TopDown,
}

/// Ratio thresholds that decide whether text looks like a headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadlineThresholds {
    /// Uppercase-letter ratio that seeds a headline
    pub strong_uppercase: f32,
    /// Title-case-word ratio that seeds a headline
    pub strong_title_case: f32,
    /// Uppercase ratio that extends an existing headline
    pub extend_uppercase: f32,
    /// Title-case ratio that extends an existing headline
    pub extend_title_case: f32,
    /// Softer uppercase admission for the line-metric scan
    pub soft_uppercase: f32,
    /// Softer title-case admission for the line-metric scan
    pub soft_title_case: f32,
    /// Minimum words in a headline
    pub min_words: usize,
    /// Maximum words in a single detected headline
    pub max_words: usize,
    /// Minimum headline length in characters
    pub min_title_chars: usize,
    /// Maximum headline length in characters
    pub max_title_chars: usize,
    /// Below this share of bold lines the line-metric scan runs
    pub sparse_bold_fraction: f32,
    /// Maximum words in a line absorbed by a line-metric seed
    pub absorb_max_words: usize,
    /// Maximum lines absorbed by a line-metric seed
    pub absorb_max_lines: usize,
    /// Minimum length of a date-anchored headline
    pub dateline_min_chars: usize,
}

impl Default for HeadlineThresholds {
    fn default() -> Self {
        Self {
            strong_uppercase: 0.65,
            strong_title_case: 0.75,
            extend_uppercase: 0.5,
            extend_title_case: 0.6,
            soft_uppercase: 0.55,
            soft_title_case: 0.65,
            min_words: 2,
            max_words: 14,
            min_title_chars: 8,
            max_title_chars: 120,
            sparse_bold_fraction: 0.05,
            absorb_max_words: 8,
            absorb_max_lines: 2,
            dateline_min_chars: 10,
        }
    }
}

/// Confidence weights contributed by each detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectorWeights {
    /// Byline-anchored headline
    pub byline: f32,
    /// Date-anchored headline
    pub dateline: f32,
    /// Configured recurring section
    pub section: f32,
    /// Base confidence of a bold/ratio cluster
    pub cluster_base: f32,
    /// Bonus for an all-bold cluster (scaled by the bold share)
    pub cluster_bold: f32,
    /// Cap on each ratio bonus
    pub ratio_bonus_cap: f32,
    /// Base confidence of a line-metric seed
    pub metric_base: f32,
    /// Line-metric weight of the uppercase ratio
    pub metric_uppercase: f32,
    /// Line-metric weight of the title-case ratio
    pub metric_title_case: f32,
    /// Line-metric weight of the all-caps-word ratio
    pub metric_all_caps: f32,
    /// Bonus for a bold line-metric seed
    pub metric_bold: f32,
    /// Score a softly admitted line must reach
    pub metric_pass: f32,
}

impl Default for DetectorWeights {
    fn default() -> Self {
        Self {
            byline: 3.0,
            dateline: 3.5,
            section: 3.5,
            cluster_base: 2.1,
            cluster_bold: 1.1,
            ratio_bonus_cap: 0.7,
            metric_base: 0.8,
            metric_uppercase: 1.8,
            metric_title_case: 1.2,
            metric_all_caps: 0.8,
            metric_bold: 0.5,
            metric_pass: 1.3,
        }
    }
}

/// Options for the fallback chunker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChunkOptions {
    /// Words per chunk
    pub words_per_chunk: usize,
    /// Maximum number of chunks
    pub max_chunks: usize,
    /// A sentence boundary must fall past this share of the chunk to trim at it
    pub sentence_cut_ratio: f32,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            words_per_chunk: 500,
            max_chunks: 10,
            sentence_cut_ratio: 0.7,
        }
    }
}

/// Options for segmenting a document into articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmentOptions {
    /// Author used when no byline is found
    pub default_author: String,

    /// Known recurring section names (searched literally)
    pub section_hints: Vec<String>,

    /// Candidates below this confidence are discarded
    pub min_confidence: f32,

    /// Minimum body length in characters (hard gate)
    pub min_body_chars: usize,

    /// Fewer surviving articles than this triggers fallback chunking
    pub min_articles: usize,

    /// Characters scanned backward from a byline for its headline
    pub byline_lookback_chars: usize,

    /// Characters at the start of a body searched for a byline
    pub author_search_chars: usize,

    /// Words kept in an article description
    pub description_words: usize,

    /// Maximum gap (characters) between candidates that may merge
    pub merge_max_gap: usize,

    /// Maximum word count of a merged headline
    pub merge_max_words: usize,

    /// Orientation of line `y` coordinates
    pub y_axis: YAxis,

    /// Normalize text and line metadata before detection
    pub normalize_text: bool,

    /// Headline-likeness thresholds
    pub thresholds: HeadlineThresholds,

    /// Detector confidence weights
    pub weights: DetectorWeights,

    /// Fallback chunking options
    pub chunking: ChunkOptions,
}

impl SegmentOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default author.
    pub fn with_default_author(mut self, author: impl Into<String>) -> Self {
        self.default_author = author.into();
        self
    }

    /// Add a recurring section name.
    pub fn with_section_hint(mut self, hint: impl Into<String>) -> Self {
        self.section_hints.push(hint.into());
        self
    }

    /// Replace the recurring section names.
    pub fn with_section_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the confidence cutoff.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence.max(0.0);
        self
    }

    /// Set the minimum body length.
    pub fn with_min_body_chars(mut self, chars: usize) -> Self {
        self.min_body_chars = chars;
        self
    }

    /// Set the minimum number of articles before falling back.
    pub fn with_min_articles(mut self, count: usize) -> Self {
        self.min_articles = count.max(1);
        self
    }

    /// Set the vertical axis orientation.
    pub fn with_y_axis(mut self, axis: YAxis) -> Self {
        self.y_axis = axis;
        self
    }

    /// Enable or disable input normalization.
    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize_text = enabled;
        self
    }

    /// Set headline thresholds.
    pub fn with_thresholds(mut self, thresholds: HeadlineThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set detector weights.
    pub fn with_weights(mut self, weights: DetectorWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set chunking options.
    pub fn with_chunking(mut self, chunking: ChunkOptions) -> Self {
        self.chunking = chunking;
        self
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            default_author: "Community Reporter".to_string(),
            section_hints: Vec::new(),
            min_confidence: 2.0,
            min_body_chars: 120,
            min_articles: 1,
            byline_lookback_chars: 240,
            author_search_chars: 200,
            description_words: 30,
            merge_max_gap: 80,
            merge_max_words: 18,
            y_axis: YAxis::BottomUp,
            normalize_text: true,
            thresholds: HeadlineThresholds::default(),
            weights: DetectorWeights::default(),
            chunking: ChunkOptions::default(),
        }
    }
}
