use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info};

/// Page separator emitted by pdftotext and similar extractors
pub const PAGE_SEPARATOR: char = '\u{000C}';

/// How a page sequence is encoded on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    /// Plain text with pages separated by form feeds
    FormFeed,
    /// JSON array of strings, one per page
    JsonArray,
}

impl PageFormat {
    /// `.json` files are page arrays; everything else is form-feed text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PageFormat::JsonArray,
            _ => PageFormat::FormFeed,
        }
    }
}

/// Configuration for page loading behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Use memory-mapped I/O instead of async buffered reads
    pub use_mmap: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            use_mmap: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one load
#[derive(Debug, Clone, Serialize)]
pub struct LoadStats {
    pub file_path: String,
    pub pages: usize,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Loads an ordered page sequence from an extracted document
pub struct PageLoader {
    config: LoaderConfig,
}

impl PageLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Read and split a document into pages.
    /// Missing files, unreadable files and invalid UTF-8 are errors; no partial result is returned.
    pub async fn load_pages<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<(Vec<String>, LoadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting page load of file: {}", path.display());

        let text = if self.config.use_mmap {
            read_mmap(path.to_path_buf()).await?
        } else {
            self.read_buffered(path).await?
        };

        let pages = match PageFormat::from_path(path) {
            PageFormat::FormFeed => split_form_feed_pages(&text),
            PageFormat::JsonArray => parse_json_pages(&text)
                .with_context(|| format!("Failed to parse page array in {}", path.display()))?,
        };

        let stats = LoadStats {
            file_path: path.display().to_string(),
            pages: pages.len(),
            bytes_read: text.len() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Loaded {}: {} pages, {} bytes in {}ms",
            path.display(),
            stats.pages,
            stats.bytes_read,
            stats.duration_ms
        );

        Ok((pages, stats))
    }

    async fn read_buffered(&self, path: &Path) -> Result<String> {
        let file = File::open(path)
            .await
            .with_context(|| format!("Failed to open file {}", path.display()))?;

        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .await
            .with_context(|| format!("Failed to read file {}", path.display()))?;

        String::from_utf8(bytes)
            .with_context(|| format!("UTF-8 decoding error in {}", path.display()))
    }
}

async fn read_mmap(path: PathBuf) -> Result<String> {
    tokio::task::spawn_blocking(move || -> Result<String> {
        let file = std::fs::File::open(&path)
            .with_context(|| format!("Failed to open file {}", path.display()))?;
        // Zero-length files cannot be mapped on every platform
        if file.metadata()?.len() == 0 {
            return Ok(String::new());
        }
        let mmap = unsafe { memmap2::MmapOptions::new().map(&file)? };
        let text = std::str::from_utf8(&mmap)
            .with_context(|| format!("UTF-8 decoding error in {}", path.display()))?;
        Ok(text.to_owned())
    })
    .await?
}

/// Split form-feed separated text into pages; a trailing separator does not add a page
pub fn split_form_feed_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_SEPARATOR).map(str::to_owned).collect();
    if pages.last().is_some_and(|page| page.is_empty()) {
        pages.pop();
    }
    pages
}

/// Parse a JSON array of page strings
pub fn parse_json_pages(text: &str) -> Result<Vec<String>> {
    let pages: Vec<String> = serde_json::from_str(text)?;
    Ok(pages)
}

/// Convenience function for loading pages with default configuration
pub async fn load_pages_async<P: AsRef<Path>>(file_path: P) -> Result<Vec<String>> {
    let loader = PageLoader::new(LoaderConfig::default());
    let (pages, _stats) = loader.load_pages(file_path).await?;
    Ok(pages)
}
