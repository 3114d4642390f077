use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use super::ProgressReporter;
use crate::dataset::{
    Dataset, COL_LOCAL_FILENAME, COL_RAW_TEXT_CONTENT, COL_TEXT_CONTENT, COL_TEXT_VERSION,
};
use crate::download::{DownloadError, Downloader};
use crate::util::{clean_text, truncate_chars, ARCHIVE_TEXT_LIMIT, PROMPT_TEXT_LIMIT};
use crate::TARGET_PIPELINE;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    pub total: usize,
    pub valid: usize,
    pub failed_urls: Vec<String>,
}

fn archive_name(index: usize) -> String {
    format!("dataset_pdf_{}.txt", index)
}

/// Download every document of `dataset`, archive the valid ones under
/// `archive_dir` and return the table of valid rows with their text columns.
pub async fn rebuild_dataset(
    dataset: &Dataset,
    archive_dir: &Path,
    downloader: &Downloader,
    reporter: &dyn ProgressReporter,
) -> Result<(Dataset, RebuildSummary)> {
    if !dataset.has_column(COL_TEXT_VERSION) {
        anyhow::bail!("Input table has no '{}' column", COL_TEXT_VERSION);
    }
    tokio::fs::create_dir_all(archive_dir)
        .await
        .with_context(|| format!("Failed to create archive directory {}", archive_dir.display()))?;

    let urls: Vec<(usize, String)> = (0..dataset.len())
        .map(|row| (row, dataset.value(row, COL_TEXT_VERSION).unwrap_or("").to_string()))
        .collect();
    let results = downloader.download_all(urls, reporter).await;

    let mut local_filenames: Vec<Option<String>> = vec![None; dataset.len()];
    let mut text_contents: Vec<Option<String>> = vec![None; dataset.len()];
    let mut raw_text_contents: Vec<Option<String>> = vec![None; dataset.len()];
    let mut failed_urls = Vec::new();

    for result in results {
        let body = match result.body {
            Ok(body) => body,
            Err(_) => {
                failed_urls.push(result.url);
                continue;
            }
        };

        let filename = archive_name(result.index);
        let written = tokio::fs::write(archive_dir.join(&filename), &body)
            .await
            .map_err(DownloadError::from);
        if let Err(e) = written {
            warn!(target: TARGET_PIPELINE, "Skipping {}: {}", result.url, e);
            failed_urls.push(result.url);
            continue;
        }

        let with_url = clean_text(&format!("{}\n{}", result.url, body));
        text_contents[result.index] = Some(truncate_chars(&with_url, PROMPT_TEXT_LIMIT).to_string());
        raw_text_contents[result.index] =
            Some(truncate_chars(&clean_text(&body), ARCHIVE_TEXT_LIMIT).to_string());
        local_filenames[result.index] = Some(filename);
    }

    let mut valid = dataset.clone();
    valid.set_column(COL_LOCAL_FILENAME, &local_filenames);
    valid.set_column(COL_TEXT_CONTENT, &text_contents);
    valid.set_column(COL_RAW_TEXT_CONTENT, &raw_text_contents);
    valid.retain_rows(|row| local_filenames[row].is_some());

    let summary = RebuildSummary {
        total: dataset.len(),
        valid: valid.len(),
        failed_urls,
    };
    info!(
        target: TARGET_PIPELINE,
        "Valid entries: {} of {} ({} failed)",
        summary.valid,
        summary.total,
        summary.failed_urls.len()
    );
    Ok((valid, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::COL_DOC_ID;
    use crate::download::testing::serve;
    use crate::pipeline::tests::RecordingReporter;
    use std::time::Duration;

    #[tokio::test]
    async fn test_rebuild_keeps_only_valid_documents() {
        let body = "COMMUNE DE CHARS\n\n  Séance du   5 janvier 2024\n".repeat(20);
        let good = serve("200 OK", "text/plain; charset=utf-8", body.clone().into_bytes()).await;
        let short = serve("200 OK", "text/plain", b"vide".to_vec()).await;

        let mut input = Dataset::new(vec![COL_DOC_ID.to_string(), COL_TEXT_VERSION.to_string()]);
        input.push_row(vec!["d0".into(), short.clone()]);
        input.push_row(vec!["d1".into(), format!("{}/deliberation.txt", good)]);
        input.push_row(vec!["d2".into(), String::new()]);

        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new()
            .unwrap()
            .with_retry_delay(Duration::from_millis(1));
        let reporter = RecordingReporter::default();

        let (valid, summary) = rebuild_dataset(&input, dir.path(), &downloader, &reporter)
            .await
            .unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.failed_urls.len(), 2);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid.value(0, COL_DOC_ID), Some("d1"));
        assert_eq!(valid.value(0, COL_LOCAL_FILENAME), Some("dataset_pdf_1.txt"));

        let archived = std::fs::read_to_string(dir.path().join("dataset_pdf_1.txt")).unwrap();
        assert_eq!(archived, body);

        let text = valid.value(0, COL_TEXT_CONTENT).unwrap();
        assert!(text.starts_with(&format!("\"{}/deliberation.txt COMMUNE DE CHARS Séance du 5 janvier 2024", good)));
        let raw = valid.value(0, COL_RAW_TEXT_CONTENT).unwrap();
        assert!(raw.starts_with("\"COMMUNE DE CHARS Séance du 5 janvier 2024 COMMUNE"));
        assert!(raw.ends_with('"'));

        let events = reporter.events();
        assert_eq!(events.first().map(String::as_str), Some("start download 3"));
        assert_eq!(events.last().map(String::as_str), Some("finish download 3"));
    }

    #[tokio::test]
    async fn test_missing_url_column_is_fatal() {
        let input = Dataset::new(vec![COL_DOC_ID.to_string()]);
        let dir = tempfile::tempdir().unwrap();
        let downloader = Downloader::new().unwrap();
        let result = rebuild_dataset(&input, dir.path(), &downloader, &crate::pipeline::NullReporter).await;
        assert!(result.is_err());
    }
}
