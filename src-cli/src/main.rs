//! doc-export - export documents and inspect pagination from the command line

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use doc_model::{resolve_footer_on, resolve_header, DocumentContent, DocumentMetadata};
use layout_engine::Paginator;
use store::{DirectoryDownloads, ExportOutcome, ExportRequest, Exporter, SettingsManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "doc-export")]
#[command(version)]
#[command(about = "Export documents to DOC, DOCX, and PDF", long_about = None)]
struct Cli {
    /// Directory holding export-settings.json
    #[arg(long, value_name = "DIR", env = "DOC_EXPORT_SETTINGS_DIR", default_value = ".")]
    settings_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a document and save the download
    Export {
        /// Metadata JSON file
        #[arg(short, long, value_name = "FILE")]
        metadata: PathBuf,

        /// Content markup file
        #[arg(short, long, value_name = "FILE")]
        content: PathBuf,

        /// Target format (doc, docx, pdf)
        #[arg(short, long)]
        format: String,

        /// Download directory (overrides settings)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Estimate the page count of a content file
    Pages {
        /// Content markup file
        #[arg(value_name = "FILE")]
        content: PathBuf,

        /// Words per page (overrides settings)
        #[arg(long)]
        words_per_page: Option<usize>,
    },

    /// Print the resolved header and footer of each page
    Bands {
        /// Metadata JSON file
        #[arg(short, long, value_name = "FILE")]
        metadata: PathBuf,

        /// Number of pages to resolve
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },

    /// Show the effective export settings
    Settings,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = run(cli).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<String> {
    let mut settings_manager = SettingsManager::new(&cli.settings_dir);
    let settings = settings_manager
        .load()
        .await
        .with_context(|| format!("Failed to load settings from {}", cli.settings_dir.display()))?
        .clone();

    match cli.command {
        Commands::Export {
            metadata,
            content,
            format,
            output,
        } => {
            let metadata = read_metadata(&metadata)?;
            let content = read_content(&content)?;
            let mut settings = settings;
            if let Some(dir) = output {
                settings = settings.with_downloads_dir(dir);
            }

            let host = DirectoryDownloads::new(&settings.downloads_dir);
            let mut exporter = Exporter::new(settings, host);

            // The command line has no rendered view, so PDF export reports
            // a missing view.
            let outcome = exporter
                .export_document(ExportRequest::new(&metadata, &content, &format), None)
                .await
                .with_context(|| format!("Export of '{}' as {} failed", metadata.title, format))?;

            match outcome {
                ExportOutcome::Downloaded(receipt) => {
                    let path = exporter.host().target_path(&receipt.filename);
                    Ok(format!("Saved {} ({} bytes)", path.display(), receipt.size))
                }
                ExportOutcome::Pdf(document) => {
                    let receipt = exporter.download_pdf(document)?;
                    let path = exporter.host().target_path(&receipt.filename);
                    Ok(format!("Saved {} ({} bytes)", path.display(), receipt.size))
                }
            }
        }

        Commands::Pages {
            content,
            words_per_page,
        } => {
            let content = read_content(&content)?;
            let words_per_page = words_per_page.unwrap_or(settings.words_per_page);
            let mut paginator = Paginator::new(words_per_page, settings.page_height_px)?;
            let state = paginator.on_content_changed(&content.plain_text());
            Ok(format!(
                "{} page(s) at {} words per page",
                state.total_pages(),
                words_per_page
            ))
        }

        Commands::Bands { metadata, pages } => {
            let metadata = read_metadata(&metadata)?;
            let total = pages.max(1);
            let today = Local::now().date_naive();
            let lines: Vec<String> = (1..=total)
                .map(|page| {
                    format!(
                        "Page {}: header={:?} footer={:?}",
                        page,
                        resolve_header(&metadata, page, total),
                        resolve_footer_on(&metadata, page, total, today)
                    )
                })
                .collect();
            Ok(lines.join("\n"))
        }

        Commands::Settings => Ok(serde_json::to_string_pretty(&settings)?),
    }
}

fn read_metadata(path: &Path) -> Result<DocumentMetadata> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata file {}", path.display()))?;
    let metadata = DocumentMetadata::from_json(&json)
        .with_context(|| format!("Invalid metadata in {}", path.display()))?;
    Ok(metadata)
}

fn read_content(path: &Path) -> Result<DocumentContent> {
    let markup = fs::read_to_string(path)
        .with_context(|| format!("Failed to read content file {}", path.display()))?;
    Ok(DocumentContent::new(markup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
        let metadata = DocumentMetadata::new("Memo", "Ada").with_footer("[Page #]/[Total Pages]");
        let metadata_path = dir.join("memo.json");
        fs::write(&metadata_path, metadata.to_json().unwrap()).unwrap();
        let content_path = dir.join("memo.html");
        fs::write(&content_path, "<p>one two three</p>").unwrap();
        (metadata_path, content_path)
    }

    fn cli(dir: &Path, args: &[&str]) -> Cli {
        let settings_dir = dir.to_string_lossy().into_owned();
        let mut argv = vec!["doc-export", "--settings-dir", settings_dir.as_str()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_export_docx_to_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let (metadata, content) = write_inputs(temp_dir.path());
        let out = temp_dir.path().join("out");

        let message = run(cli(
            temp_dir.path(),
            &[
                "export",
                "-m",
                metadata.to_str().unwrap(),
                "-c",
                content.to_str().unwrap(),
                "-f",
                "docx",
                "-o",
                out.to_str().unwrap(),
            ],
        ))
        .await
        .unwrap();

        assert!(message.starts_with("Saved"));
        assert!(out.join("Memo.docx").exists());
    }

    #[tokio::test]
    async fn test_pdf_without_view_fails() {
        let temp_dir = TempDir::new().unwrap();
        let (metadata, content) = write_inputs(temp_dir.path());

        let err = run(cli(
            temp_dir.path(),
            &[
                "export",
                "-m",
                metadata.to_str().unwrap(),
                "-c",
                content.to_str().unwrap(),
                "-f",
                "pdf",
            ],
        ))
        .await
        .unwrap_err();

        let root = err.root_cause().to_string();
        assert!(root.contains("rendered view"));
    }

    #[tokio::test]
    async fn test_pages_and_bands() {
        let temp_dir = TempDir::new().unwrap();
        let (metadata, content) = write_inputs(temp_dir.path());

        let pages = run(cli(
            temp_dir.path(),
            &["pages", content.to_str().unwrap(), "--words-per-page", "2"],
        ))
        .await
        .unwrap();
        assert_eq!(pages, "2 page(s) at 2 words per page");

        let bands = run(cli(
            temp_dir.path(),
            &["bands", "-m", metadata.to_str().unwrap(), "-p", "2"],
        ))
        .await
        .unwrap();
        assert!(bands.contains("Page 2: header=\"\" footer=\"2/2\""));
    }
}
