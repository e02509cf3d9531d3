//! Integration tests for record building, publishing and listing.

use chrono::NaiveDate;
use newsprint::export::{BlockKind, DEFAULT_IMAGE};
use newsprint::{
    delete_article, list_articles, publish_articles, update_article, ArticleRecord, Category,
    Error, ExportOptions, JsonFormat, Newsprint,
};
use serde_json::json;
use tempfile::TempDir;

const FRONT_PAGE: &str = "Local Pool Reopens After Repairs\nBy Dana Lee\nThe township pool \
    reopened Saturday after a six-week repair to its filtration system. Officials said \
    attendance exceeded expectations on opening day. Many residents expressed relief at the \
    timely fix. Lifeguards will stay on duty through Labor Day.\n\nEagles Win Regional Title\n\
    By Sam Ortiz\nThe varsity basketball team beat Riverside 54-48 on Friday night to claim its \
    first regional title in a decade. Fans filled the gym and stayed long after the final \
    buzzer to cheer.";

fn options() -> ExportOptions {
    ExportOptions::new().with_date(NaiveDate::from_ymd_opt(2024, 6, 6).unwrap())
}

fn records() -> Vec<ArticleRecord> {
    Newsprint::new()
        .segment_text(FRONT_PAGE)
        .unwrap()
        .records(&options())
}

#[test]
fn test_records_from_segmentation() {
    let records = records();
    assert_eq!(records.len(), 2);

    let pool = &records[0];
    assert_eq!(pool.slug, "local-pool-reopens-after-repairs");
    assert_eq!(pool.id, pool.slug);
    assert_eq!(pool.author, "Dana Lee");
    assert_eq!(pool.image, DEFAULT_IMAGE);
    assert!(pool.featured);
    assert!(!records[1].featured);

    let eagles = &records[1];
    assert_eq!(eagles.category, Category::Sports);
    assert_eq!(eagles.tags[0], "sports");
    assert!(eagles.tags.iter().any(|t| t == "basketball"));
    assert!(eagles.tags.len() <= 5);
}

#[test]
fn test_lead_block_and_paragraphs() {
    let records = records();
    let content = &records[0].content;
    assert_eq!(content.len(), 2);
    assert_eq!(content[0].class.as_deref(), Some("lead"));
    assert!(content[0].text.starts_with("The township pool reopened"));
    assert!(content.iter().all(|b| b.kind == BlockKind::Paragraph));
    assert_eq!(content[1].class, None);
    assert_eq!(content[1].text, "Lifeguards will stay on duty through Labor Day.");
}

#[test]
fn test_record_json_shape() {
    let json = newsprint::export::to_json(&records()[0], JsonFormat::Compact).unwrap();
    assert!(json.contains(r#""date":"2024-06-06""#));
    assert!(json.contains(r#""wordCount":"#));
    assert!(json.contains(r#""type":"paragraph","class":"lead""#));
    assert!(json.contains(r#""category":"community""#));
}

#[test]
fn test_publish_and_list_round_trip() {
    let dir = TempDir::new().unwrap();
    let records = records();

    let report = publish_articles(dir.path(), &records).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.published.len(), 2);
    assert!(dir.path().join("eagles-win-regional-title.json").exists());

    let listed = list_articles(dir.path()).unwrap();
    assert_eq!(listed.len(), 2);
    let filenames: Vec<&str> = listed.iter().map(|a| a.filename.as_str()).collect();
    assert_eq!(
        filenames,
        vec![
            "eagles-win-regional-title.json",
            "local-pool-reopens-after-repairs.json"
        ]
    );
    let pool = listed
        .iter()
        .find(|a| a.record.slug == "local-pool-reopens-after-repairs")
        .unwrap();
    assert_eq!(pool.record, records[0]);
}

#[test]
fn test_publish_via_builder_result() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("content").join("articles");

    let result = Newsprint::new().segment_text(FRONT_PAGE).unwrap();
    let report = result.publish(&out, &options()).unwrap();
    assert_eq!(report.published.len(), 2);
    assert!(out.is_dir());
}

#[test]
fn test_list_newest_first_and_skips_junk() {
    let dir = TempDir::new().unwrap();
    let mut older = records().remove(0);
    older.slug = "older-story".to_string();
    older.date = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
    let newer = records().remove(1);

    publish_articles(dir.path(), &[older, newer]).unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let listed = list_articles(dir.path()).unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].record.slug, "eagles-win-regional-title");
    assert_eq!(listed[1].filename, "older-story.json");
}

#[test]
fn test_duplicate_titles_get_unique_slugs() {
    let result = Newsprint::new().segment_text(FRONT_PAGE).unwrap();
    let mut articles = result.articles().to_vec();
    articles.push(articles[0].clone());

    let records = ArticleRecord::from_articles(&articles, &options());
    assert_eq!(records[2].slug, "local-pool-reopens-after-repairs-2");
    assert_eq!(records[2].id, records[2].slug);
}

#[test]
fn test_bad_date_rejected() {
    assert!(ExportOptions::new().with_date_str("June 6th").is_err());
    let options = ExportOptions::new().with_date_str("2024-06-06").unwrap();
    assert_eq!(options.date, NaiveDate::from_ymd_opt(2024, 6, 6).unwrap());
}

#[test]
fn test_update_then_delete_published_record() {
    let dir = TempDir::new().unwrap();
    publish_articles(dir.path(), &records()).unwrap();

    let patch = json!({"author": "D. Lee", "featured": false});
    let updated =
        update_article(dir.path(), "local-pool-reopens-after-repairs.json", &patch).unwrap();
    assert_eq!(updated.author, "D. Lee");
    assert!(!updated.featured);
    assert_eq!(updated.title, "Local Pool Reopens After Repairs");
    assert_eq!(updated.content, records()[0].content);

    let listed = list_articles(dir.path()).unwrap();
    let pool = listed
        .iter()
        .find(|a| a.filename == "local-pool-reopens-after-repairs.json")
        .unwrap();
    assert_eq!(pool.record, updated);

    let escaped = delete_article(dir.path(), "../local-pool-reopens-after-repairs.json");
    assert!(matches!(escaped, Err(Error::InvalidInput(_))));

    delete_article(dir.path(), "local-pool-reopens-after-repairs.json").unwrap();
    let remaining: Vec<String> = list_articles(dir.path())
        .unwrap()
        .into_iter()
        .map(|a| a.filename)
        .collect();
    assert_eq!(remaining, vec!["eagles-win-regional-title.json"]);
}
