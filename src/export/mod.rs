//! Exporting articles: JSON rendering, site records and the article store.
//!
//! The segmenter never touches the filesystem; everything that reads or
//! writes files lives here.

mod json;
mod record;
mod store;

pub use json::{to_json, JsonFormat};
pub use record::{
    content_blocks, slugify, ArticleRecord, BlockKind, ContentBlock, ExportOptions, DEFAULT_IMAGE,
};
pub use store::{
    delete_article, list_articles, publish_articles, update_article, PublishFailure,
    PublishReport, PublishedArticle, StoredArticle,
};
