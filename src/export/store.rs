//! Publishing records as JSON files and listing what has been published.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::json::{to_json, JsonFormat};
use super::record::{ArticleRecord, ContentBlock};
use crate::error::{Error, Result};

/// A record written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedArticle {
    /// Record slug
    pub slug: String,
    /// Record title
    pub title: String,
    /// Path of the written file
    pub path: PathBuf,
}

/// A record that could not be written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishFailure {
    /// Record title
    pub title: String,
    /// Error message
    pub error: String,
}

/// Outcome of a publish run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublishReport {
    /// Records written
    pub published: Vec<PublishedArticle>,
    /// Records that failed
    pub errors: Vec<PublishFailure>,
}

impl PublishReport {
    /// Check whether every record was written.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A record read back from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredArticle {
    /// The record
    #[serde(flatten)]
    pub record: ArticleRecord,
    /// File name within the store directory
    pub filename: String,
}

/// Write each record to `<dir>/<slug>.json`, creating `dir` if needed.
///
/// Failures are collected per record; the call only fails when no record
/// could be written.
pub fn publish_articles(dir: impl AsRef<Path>, records: &[ArticleRecord]) -> Result<PublishReport> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut report = PublishReport::default();
    for record in records {
        match write_record(dir, record) {
            Ok(path) => {
                log::debug!("Published {} to {}", record.slug, path.display());
                report.published.push(PublishedArticle {
                    slug: record.slug.clone(),
                    title: record.title.clone(),
                    path,
                });
            }
            Err(e) => {
                log::warn!("Failed to publish {:?}: {}", record.title, e);
                report.errors.push(PublishFailure {
                    title: record.title.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if report.published.is_empty() && !report.errors.is_empty() {
        let reasons: Vec<&str> = report.errors.iter().map(|f| f.error.as_str()).collect();
        return Err(Error::Export(format!(
            "Failed to publish {} article(s): {}",
            report.errors.len(),
            reasons.join("; ")
        )));
    }

    Ok(report)
}

fn write_record(dir: &Path, record: &ArticleRecord) -> Result<PathBuf> {
    let valid = !record.slug.is_empty()
        && record
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(Error::Export(format!("Invalid slug: {:?}", record.slug)));
    }

    let path = dir.join(record.file_name());
    fs::write(&path, to_json(record, JsonFormat::Pretty)?)?;
    Ok(path)
}

/// Read every `*.json` record in `dir`, newest first.
///
/// Files that cannot be read or parsed are skipped with a warning.
pub fn list_articles(dir: impl AsRef<Path>) -> Result<Vec<StoredArticle>> {
    let mut articles = Vec::new();

    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(filename) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
            continue;
        };

        match read_record(&path) {
            Ok(record) => articles.push(StoredArticle { record, filename }),
            Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    articles.sort_by(|a, b| {
        b.record
            .date
            .cmp(&a.record.date)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    Ok(articles)
}

fn read_record(path: &Path) -> Result<ArticleRecord> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Merge `patch` over the stored record `<dir>/<filename>` and write it back.
///
/// `patch` must be a JSON object. Its top-level fields replace the stored
/// ones and fields it omits are kept. Plain strings in `content` become
/// paragraph blocks. When the file does not exist yet the patch alone must
/// form a complete record.
pub fn update_article(dir: impl AsRef<Path>, filename: &str, patch: &Value) -> Result<ArticleRecord> {
    let path = store_path(dir.as_ref(), filename)?;
    let Value::Object(fields) = patch else {
        return Err(Error::InvalidInput(
            "Article update must be a JSON object".to_string(),
        ));
    };

    let mut merged = match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str(&content)? {
            Value::Object(existing) => existing,
            _ => Map::new(),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No stored article {}, creating it", filename);
            Map::new()
        }
        Err(e) => return Err(e.into()),
    };
    for (key, value) in fields {
        merged.insert(key.clone(), value.clone());
    }

    if let Some(Value::Array(blocks)) = merged.get_mut("content") {
        for block in blocks.iter_mut() {
            if let Value::String(text) = block {
                let text = std::mem::take(text);
                *block = serde_json::to_value(ContentBlock::paragraph(text))?;
            }
        }
    }

    let merged = Value::Object(merged);
    let record = ArticleRecord::deserialize(&merged)?;
    fs::write(&path, to_json(&merged, JsonFormat::Pretty)?)?;
    log::debug!("Updated {}", path.display());
    Ok(record)
}

/// Delete the stored record `<dir>/<filename>`.
pub fn delete_article(dir: impl AsRef<Path>, filename: &str) -> Result<()> {
    let path = store_path(dir.as_ref(), filename)?;
    fs::remove_file(&path)?;
    log::debug!("Deleted {}", path.display());
    Ok(())
}

/// Resolve a bare file name inside the store directory.
///
/// Names that could leave the directory (`..`, path separators) are rejected.
fn store_path(dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains(|c: char| c == '/' || c == '\\')
    {
        return Err(Error::InvalidInput(format!("Invalid filename: {:?}", filename)));
    }
    Ok(dir.join(filename))
}
