// End-to-end processing of one document: load pages, reflow, write sentences, report

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::config::ReflowConfig;
use crate::loader::{LoaderConfig, PageLoader};
use crate::reflow::{ReflowPipeline, ReflowReport};
use crate::writer::{ensure_distinct_output, generate_output_path, write_sentences};

/// Options for one run beyond the reflow configuration
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub loader: LoaderConfig,
    /// Explicit output path; derived from the input path when absent
    pub output_path: Option<PathBuf>,
}

/// Per-run statistics written to the stats file
#[derive(Serialize, Debug, Clone)]
pub struct RunStats {
    pub input_path: String,
    pub output_path: String,
    pub bytes_read: u64,
    #[serde(flatten)]
    pub report: ReflowReport,
    /// Load time in milliseconds
    pub load_time_ms: u64,
    /// Reflow time in milliseconds (filter through segmentation)
    pub reflow_time_ms: u64,
    /// Write time in milliseconds
    pub write_time_ms: u64,
}

/// Load, reflow and persist one document.
/// Loader or writer failures abort the run; nothing partial is reported as success.
/// An output path that resolves to the input document is rejected before anything is read.
pub async fn process_document(
    input_path: &Path,
    config: &ReflowConfig,
    options: &ProcessOptions,
) -> Result<RunStats> {
    let pipeline = ReflowPipeline::new(config).context("Failed to build reflow pipeline")?;
    let output_path = options
        .output_path
        .clone()
        .unwrap_or_else(|| generate_output_path(input_path, &config.output_extension));
    ensure_distinct_output(input_path, &output_path)?;

    let load_start = Instant::now();
    let loader = PageLoader::new(options.loader.clone());
    let (pages, load_stats) = loader.load_pages(input_path).await?;
    let load_time_ms = load_start.elapsed().as_millis() as u64;

    let reflow_start = Instant::now();
    let output = pipeline.run(&pages);
    let reflow_time_ms = reflow_start.elapsed().as_millis() as u64;

    let write_start = Instant::now();
    write_sentences(&output_path, &output.sentences).await?;
    let write_time_ms = write_start.elapsed().as_millis() as u64;

    info!(
        "Processed {}: {} pages -> {} sentences in {}ms",
        input_path.display(),
        output.report.pages,
        output.report.sentences,
        load_time_ms + reflow_time_ms + write_time_ms
    );

    Ok(RunStats {
        input_path: input_path.display().to_string(),
        output_path: output_path.display().to_string(),
        bytes_read: load_stats.bytes_read,
        report: output.report,
        load_time_ms,
        reflow_time_ms,
        write_time_ms,
    })
}

/// Write run statistics as pretty JSON
pub async fn write_stats(stats_path: &Path, stats: &RunStats) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;
    if let Some(parent) = stats_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(stats_path, content)
        .await
        .with_context(|| format!("Failed to write stats file {}", stats_path.display()))?;
    Ok(())
}
