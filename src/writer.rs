// WHY: downstream chunkers expect one sentence per paragraph, so every sentence is
// followed by exactly one blank line

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::info;

/// Sentence file path for a source document: same location, extension replaced
pub fn generate_output_path(source_path: &Path, extension: &str) -> PathBuf {
    source_path.with_extension(extension)
}

/// Reject an output path that would overwrite the source document
pub fn ensure_distinct_output(source_path: &Path, output_path: &Path) -> Result<()> {
    let same = match (source_path.canonicalize(), output_path.canonicalize()) {
        (Ok(source), Ok(output)) => source == output,
        _ => source_path == output_path,
    };
    if same {
        bail!(
            "Output path {} is the input document; pass --output or choose another extension",
            output_path.display()
        );
    }
    Ok(())
}

/// Render sentences in the on-disk layout (`sentence\n\n` per sentence)
pub fn render_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    let capacity = sentences.iter().map(|s| s.as_ref().len() + 2).sum();
    let mut rendered = String::with_capacity(capacity);
    for sentence in sentences {
        rendered.push_str(sentence.as_ref());
        rendered.push_str("\n\n");
    }
    rendered
}

/// Sibling path the sentence file is staged in before being renamed into place
fn staging_path(output_path: &Path) -> PathBuf {
    let mut file_name = output_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    file_name.push(".partial");
    output_path.with_file_name(file_name)
}

/// Write sentences to `output_path` as UTF-8, replacing any existing file.
/// A failed write never leaves a partial file at `output_path`.
pub async fn write_sentences<S: AsRef<str>>(output_path: &Path, sentences: &[S]) -> Result<()> {
    let staging = staging_path(output_path);

    if let Err(e) = write_staged(&staging, &render_sentences(sentences)).await {
        // WHY: the staged file is incomplete; leaving it would look like output
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e);
    }

    if let Err(e) = tokio::fs::rename(&staging, output_path).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e).with_context(|| {
            format!("Failed to move output into place at {}", output_path.display())
        });
    }

    info!("Wrote {} sentences to {}", sentences.len(), output_path.display());
    Ok(())
}

async fn write_staged(staging: &Path, content: &str) -> Result<()> {
    let file = tokio::fs::File::create(staging)
        .await
        .with_context(|| format!("Failed to create output file {}", staging.display()))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .await
        .with_context(|| format!("Failed to write output file {}", staging.display()))?;
    writer
        .flush()
        .await
        .with_context(|| format!("Failed to flush output file {}", staging.display()))?;
    writer
        .get_mut()
        .sync_all()
        .await
        .with_context(|| format!("Failed to sync output file {}", staging.display()))?;
    Ok(())
}
