//! newsprint CLI - split newspaper PDF text into articles

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use newsprint::export::to_json;
use newsprint::{
    delete_article, list_articles, publish_articles, update_article, ArticleRecord, ExportOptions,
    JsonFormat, PageLine, SegmentInput, SegmentOptions, Segmenter,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "newsprint")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Split newspaper PDF text into articles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract articles as JSON
    Extract {
        /// Input text files, or JSON files with `fullText` and `lines`
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// JSON array of page lines (single input only)
        #[arg(long, value_name = "FILE")]
        lines: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Split text into fixed-size chunks without headline detection
    Chunk {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Show segmentation statistics and the recovered articles
    Info {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// JSON array of page lines
        #[arg(long, value_name = "FILE")]
        lines: Option<PathBuf>,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Extract articles and write them as site records
    Publish {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory to write article JSON files to
        #[arg(short, long, value_name = "DIR")]
        dir: PathBuf,

        /// JSON array of page lines
        #[arg(long, value_name = "FILE")]
        lines: Option<PathBuf>,

        /// Publication date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Image path for every article
        #[arg(long)]
        image: Option<String>,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// List published articles, newest first
    List {
        /// Directory of article JSON files
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Merge a JSON patch into a published article
    Update {
        /// Article file name (e.g., local-pool-reopens.json)
        #[arg(value_name = "FILENAME")]
        filename: String,

        /// Directory of article JSON files
        #[arg(short, long, value_name = "DIR")]
        dir: PathBuf,

        /// JSON object with the fields to replace
        #[arg(long, value_name = "FILE")]
        patch: PathBuf,
    },

    /// Delete a published article
    Delete {
        /// Article file name (e.g., local-pool-reopens.json)
        #[arg(value_name = "FILENAME")]
        filename: String,

        /// Directory of article JSON files
        #[arg(short, long, value_name = "DIR")]
        dir: PathBuf,
    },

    /// Show version information
    Version,
}

/// Options shared by every segmenting command.
#[derive(Args, Default)]
struct SegmentArgs {
    /// JSON file with segmentation options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Author used when no byline is found
    #[arg(long, env = "NEWSPRINT_DEFAULT_AUTHOR")]
    author: Option<String>,

    /// Recurring section name (repeatable)
    #[arg(long = "section", value_name = "NAME")]
    sections: Vec<String>,

    /// File with one recurring section name per line
    #[arg(long, value_name = "FILE")]
    sections_file: Option<PathBuf>,

    /// Minimum article body length in characters
    #[arg(long, value_name = "N")]
    min_body: Option<usize>,

    /// Disable text normalization
    #[arg(long)]
    no_normalize: bool,
}

impl SegmentArgs {
    fn options(&self) -> CliResult<SegmentOptions> {
        let mut options = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?,
            None => SegmentOptions::default(),
        };

        if let Some(author) = &self.author {
            options = options.with_default_author(author);
        }
        for section in &self.sections {
            options = options.with_section_hint(section);
        }
        if let Some(path) = &self.sections_file {
            for name in read_sections(path)? {
                options = options.with_section_hint(name);
            }
        }
        if let Some(min_body) = self.min_body {
            options = options.with_min_body_chars(min_body);
        }
        if self.no_normalize {
            options = options.with_normalization(false);
        }

        Ok(options)
    }

    fn segmenter(&self) -> CliResult<Segmenter> {
        Ok(Segmenter::new(self.options()?)?)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            inputs,
            lines,
            output,
            compact,
            segment,
        } => cmd_extract(&inputs, lines.as_deref(), output.as_deref(), compact, &segment),
        Commands::Chunk {
            input,
            output,
            compact,
            segment,
        } => cmd_chunk(&input, output.as_deref(), compact, &segment),
        Commands::Info {
            input,
            lines,
            segment,
        } => cmd_info(&input, lines.as_deref(), &segment),
        Commands::Publish {
            input,
            dir,
            lines,
            date,
            image,
            segment,
        } => cmd_publish(
            &input,
            &dir,
            lines.as_deref(),
            date.as_deref(),
            image,
            &segment,
        ),
        Commands::List { dir } => cmd_list(&dir),
        Commands::Update {
            filename,
            dir,
            patch,
        } => cmd_update(&dir, &filename, &patch),
        Commands::Delete { filename, dir } => cmd_delete(&dir, &filename),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read an input file. `.json` files hold a `SegmentInput`; anything else is
/// plain text.
fn read_input(path: &Path, lines: Option<&Path>) -> CliResult<SegmentInput> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut input = if is_json {
        serde_json::from_str::<SegmentInput>(&content)
            .map_err(|e| format!("Invalid input {}: {}", path.display(), e))?
    } else {
        SegmentInput::from_text(content)
    };

    if let Some(lines_path) = lines {
        let lines: Vec<PageLine> = serde_json::from_str(&fs::read_to_string(lines_path)?)
            .map_err(|e| format!("Invalid lines {}: {}", lines_path.display(), e))?;
        input = input.with_lines(lines);
    }

    Ok(input)
}

fn read_sections(path: &Path) -> CliResult<Vec<String>> {
    Ok(fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_extract(
    inputs: &[PathBuf],
    lines: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
    args: &SegmentArgs,
) -> CliResult<()> {
    if inputs.len() > 1 && lines.is_some() {
        return Err("--lines can only be used with a single input".into());
    }

    let segmenter = args.segmenter()?;
    let documents = inputs
        .iter()
        .map(|path| read_input(path, lines))
        .collect::<CliResult<Vec<_>>>()?;

    let mut segmented = Vec::with_capacity(documents.len());
    for (path, result) in inputs.iter().zip(segmenter.segment_batch(&documents)) {
        let segmentation = result?;
        log::info!(
            "{}: {} articles (fallback: {})",
            path.display(),
            segmentation.len(),
            segmentation.stats.used_fallback
        );
        segmented.push((path, segmentation));
    }

    let json = match segmented.as_slice() {
        [(_, only)] => to_json(&only.articles, json_format(compact))?,
        many => {
            let files: Vec<serde_json::Value> = many
                .iter()
                .map(|(path, segmentation)| {
                    serde_json::json!({
                        "file": path.display().to_string(),
                        "articles": segmentation.articles,
                    })
                })
                .collect();
            to_json(&files, json_format(compact))?
        }
    };

    write_output(output, &json)
}

fn cmd_chunk(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &SegmentArgs,
) -> CliResult<()> {
    let document = read_input(input, None)?;
    let articles = args.segmenter()?.chunk(&document.full_text);
    write_output(output, &to_json(&articles, json_format(compact))?)
}

fn cmd_info(input: &Path, lines: Option<&Path>, args: &SegmentArgs) -> CliResult<()> {
    let document = read_input(input, lines)?;
    let segmentation = args.segmenter()?.segment(&document)?;
    let stats = &segmentation.stats;

    println!("{}", "Segmentation".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Characters".bold(), document.full_text.chars().count());
    println!("{}: {}", "Lines".bold(), stats.line_count);
    if stats.line_count > 0 {
        println!("{}: {}", "Unlocated lines".bold(), stats.unlocated_lines);
        println!("{}: {:.1}%", "Bold lines".bold(), stats.bold_fraction * 100.0);
    }
    for (detector, count) in &stats.detector_counts {
        println!("{}: {}", format!("Detector {}", detector).bold(), count);
    }
    println!("{}: {}", "Candidates accepted".bold(), stats.candidates_accepted);
    println!("{}: {}", "Candidates discarded".bold(), stats.candidates_discarded);
    println!(
        "{}: {}",
        "Fallback chunking".bold(),
        if stats.used_fallback { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Articles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if segmentation.is_empty() {
        println!("{}", "No articles".yellow());
    }
    for (i, article) in segmentation.articles.iter().enumerate() {
        let marker = if article.featured { "★" } else { " " };
        println!(
            "{} {:>2}. {} {}",
            marker.yellow(),
            i + 1,
            article.title.bold(),
            format!("[{}]", article.category).dimmed()
        );
        println!(
            "      {} {} · {} words",
            "by".dimmed(),
            article.author,
            article.word_count
        );
    }

    Ok(())
}

fn cmd_publish(
    input: &Path,
    dir: &Path,
    lines: Option<&Path>,
    date: Option<&str>,
    image: Option<String>,
    args: &SegmentArgs,
) -> CliResult<()> {
    let mut export = ExportOptions::new();
    if let Some(date) = date {
        export = export.with_date_str(date)?;
    }
    if let Some(image) = image {
        export = export.with_image(image);
    }

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading input...");
    let document = read_input(input, lines)?;
    let segmenter = args.segmenter()?;
    pb.inc(1);

    pb.set_message("Segmenting...");
    let segmentation = segmenter.segment(&document)?;
    pb.inc(1);

    pb.set_message("Building records...");
    let records = ArticleRecord::from_articles(&segmentation.articles, &export);
    pb.inc(1);

    pb.set_message("Writing files...");
    let report = publish_articles(dir, &records)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} article(s) to {}",
        "Published".green().bold(),
        report.published.len(),
        dir.display()
    );
    for (i, article) in report.published.iter().enumerate() {
        let branch = if i + 1 == report.published.len() && report.errors.is_empty() {
            "└─"
        } else {
            "├─"
        };
        println!("  {} {}.json", branch.dimmed(), article.slug);
    }
    for failure in &report.errors {
        println!(
            "  {} {}: {}",
            "✗".red(),
            failure.title,
            failure.error.red()
        );
    }
    if segmentation.stats.used_fallback {
        println!(
            "{}",
            "No headline structure found; articles are fixed-size chunks".yellow()
        );
    }

    Ok(())
}

fn cmd_list(dir: &Path) -> CliResult<()> {
    let articles = list_articles(dir)?;

    if articles.is_empty() {
        println!("{}", "No articles".yellow());
        return Ok(());
    }

    for stored in &articles {
        let record = &stored.record;
        println!(
            "{}  {}{}",
            record.date.to_string().dimmed(),
            record.title.bold(),
            if record.featured { " ★".yellow() } else { "".normal() }
        );
        println!(
            "            {} · {} · {}",
            record.author,
            record.category,
            stored.filename.dimmed()
        );
    }

    println!("\n{} {} article(s)", "Total:".green().bold(), articles.len());

    Ok(())
}

fn cmd_update(dir: &Path, filename: &str, patch: &Path) -> CliResult<()> {
    let patch: serde_json::Value = serde_json::from_str(&fs::read_to_string(patch)?)
        .map_err(|e| format!("Invalid patch {}: {}", patch.display(), e))?;
    let record = update_article(dir, filename, &patch)?;

    println!("{} {}", "Updated".green().bold(), filename);
    println!("  {} {}", "Title:".bold(), record.title);
    println!("  {} {} block(s)", "Content:".bold(), record.content.len());
    Ok(())
}

fn cmd_delete(dir: &Path, filename: &str) -> CliResult<()> {
    delete_article(dir, filename)?;
    println!("{} {}", "Deleted".green().bold(), filename);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "newsprint".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Newspaper article segmentation tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_plain_text_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issue.txt");
        fs::write(&path, "Some text").unwrap();

        let input = read_input(&path, None).unwrap();
        assert_eq!(input.full_text, "Some text");
        assert!(input.lines.is_empty());
    }

    #[test]
    fn test_read_json_input_with_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issue.json");
        fs::write(
            &path,
            r#"{"fullText": "Headline Here\nBody", "lines": [{"text": "Headline Here", "isBold": true, "page": 1, "y": 700}]}"#,
        )
        .unwrap();

        let input = read_input(&path, None).unwrap();
        assert_eq!(input.lines.len(), 1);
        assert!(input.lines[0].is_bold);
    }

    #[test]
    fn test_separate_lines_file() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("issue.txt");
        let lines = dir.path().join("lines.json");
        fs::write(&text, "Headline Here\nBody").unwrap();
        fs::write(&lines, r#"[{"text": "Headline Here", "page": 2, "verticalPosition": 5}]"#)
            .unwrap();

        let input = read_input(&text, Some(lines.as_path())).unwrap();
        assert_eq!(input.lines[0].page, 2);
    }

    #[test]
    fn test_sections_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sections.txt");
        fs::write(&path, "Mayor's Corner\n\n# comment\n  Police Blotter  \n").unwrap();

        assert_eq!(
            read_sections(&path).unwrap(),
            vec!["Mayor's Corner", "Police Blotter"]
        );
    }

    #[test]
    fn test_segment_args_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"defaultAuthor": "Desk", "minBodyChars": 80}"#).unwrap();

        let args = SegmentArgs {
            config: Some(config),
            author: Some("Staff".to_string()),
            sections: vec!["Police Blotter".to_string()],
            no_normalize: true,
            ..Default::default()
        };
        let options = args.options().unwrap();
        assert_eq!(options.default_author, "Staff");
        assert_eq!(options.min_body_chars, 80);
        assert_eq!(options.section_hints, vec!["Police Blotter"]);
        assert!(!options.normalize_text);
    }

    #[test]
    fn test_update_and_delete_commands() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("issue.txt");
        fs::write(
            &input,
            "Local Pool Reopens After Repairs\nBy Dana Lee\nThe township pool reopened Saturday \
             after a six-week repair to its filtration system. Officials said attendance \
             exceeded expectations on opening day.",
        )
        .unwrap();
        let store = dir.path().join("articles");
        cmd_publish(&input, &store, None, Some("2024-06-06"), None, &SegmentArgs::default())
            .unwrap();

        let patch = dir.path().join("patch.json");
        fs::write(&patch, r#"{"author": "Dana Lee-Smith", "content": ["Rewritten."]}"#).unwrap();
        let filename = "local-pool-reopens-after-repairs.json";
        cmd_update(&store, filename, &patch).unwrap();

        let listed = list_articles(&store).unwrap();
        assert_eq!(listed[0].record.author, "Dana Lee-Smith");
        assert_eq!(listed[0].record.content[0].text, "Rewritten.");

        assert!(cmd_delete(&store, "../issue.txt").is_err());
        assert!(input.exists());
        cmd_delete(&store, filename).unwrap();
        assert!(list_articles(&store).unwrap().is_empty());
    }

    #[test]
    fn test_cli_parses_update() {
        let cli = Cli::try_parse_from([
            "newsprint",
            "update",
            "story.json",
            "-d",
            "articles",
            "--patch",
            "patch.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Update { filename, .. } if filename == "story.json"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "newsprint",
            "extract",
            "a.txt",
            "b.txt",
            "--section",
            "Briefs",
            "--compact",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract {
                inputs,
                compact,
                segment,
                ..
            } => {
                assert_eq!(inputs.len(), 2);
                assert!(compact);
                assert_eq!(segment.sections, vec!["Briefs"]);
            }
            _ => panic!("expected extract"),
        }
    }
}
