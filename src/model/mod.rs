//! Value types shared by the segmenter and the export layer.
//!
//! Every value here is owned by a single extraction call; nothing is shared
//! or mutated across calls.

mod article;
mod candidate;
mod input;
mod line;

pub use article::{describe, Article, Category};
pub use candidate::HeadlineCandidate;
pub use input::SegmentInput;
pub use line::{is_bold_font_name, PageLine};
