// WHY: two-phase pipeline; per-page classification is an order-preserving parallel map,
// everything after it runs sequentially over the whole document

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

pub mod boilerplate;
pub mod dehyphenate;
pub mod segmenter;
pub mod stitch;

pub use boilerplate::{BoilerplateFilter, FilterConfig, FilteredLine, FilteredPage, LineClass};
pub use dehyphenate::{Dehyphenated, Dehyphenator};
pub use segmenter::{
    BoundaryStrategy, PeriodCapitalBoundaries, SegmenterConfig, SentenceAccumulator,
    SentenceSegmenter, TERMINAL_PUNCTUATION,
};
pub use stitch::{stitch_lines, ParagraphSplitter, PARAGRAPH_MARKER};

use crate::config::ReflowConfig;

/// Non-fatal conditions observed while reflowing a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// No pages were supplied
    EmptyInput,
    /// Every line was boilerplate or blank
    NoContentAfterFiltering,
    /// At least one paragraph had no terminal punctuation and was emitted whole
    UnterminatedParagraph,
}

/// Per-stage counts for one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReflowReport {
    pub pages: usize,
    pub lines: usize,
    pub boilerplate_lines: usize,
    pub blank_lines: usize,
    pub content_lines: usize,
    pub paragraphs: usize,
    pub hyphen_joins: usize,
    pub unterminated_paragraphs: usize,
    pub merged_fragments: usize,
    pub sentences: usize,
    /// Total characters across all sentences
    pub sentence_chars: usize,
    pub conditions: Vec<Condition>,
}

/// Sentences in document order plus the run report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflowOutput {
    pub sentences: Vec<String>,
    pub report: ReflowReport,
}

/// Page text in, sentences out
pub struct ReflowPipeline {
    filter: BoilerplateFilter,
    splitter: ParagraphSplitter,
    dehyphenator: Dehyphenator,
    segmenter: SentenceSegmenter,
}

impl ReflowPipeline {
    pub fn new(config: &ReflowConfig) -> Result<Self> {
        Ok(Self {
            filter: BoilerplateFilter::new(&config.filter)?,
            splitter: ParagraphSplitter::new()?,
            dehyphenator: Dehyphenator::new()?,
            segmenter: SentenceSegmenter::new(config.segmenter.clone())?,
        })
    }

    pub fn with_default_config() -> Result<Self> {
        Self::new(&ReflowConfig::default())
    }

    /// Replace the sentence boundary strategy, keeping the merge rule and its config
    pub fn with_boundary_strategy(mut self, strategy: Box<dyn BoundaryStrategy>) -> Self {
        self.segmenter =
            SentenceSegmenter::with_strategy(self.segmenter.config().clone(), strategy);
        self
    }

    /// Classify all pages in parallel; the result is in page order
    pub fn filter_pages<'a, S>(&self, pages: &'a [S]) -> Vec<FilteredPage<'a>>
    where
        S: AsRef<str> + Sync,
    {
        pages
            .par_iter()
            .map(|page| self.filter.filter_page(page.as_ref()))
            .collect()
    }

    /// Run every stage over an ordered page sequence
    pub fn run<S>(&self, pages: &[S]) -> ReflowOutput
    where
        S: AsRef<str> + Sync,
    {
        let mut report = ReflowReport {
            pages: pages.len(),
            ..Default::default()
        };

        if pages.is_empty() {
            info!("No pages supplied, nothing to reflow");
            report.conditions.push(Condition::EmptyInput);
            return ReflowOutput { sentences: Vec::new(), report };
        }

        let filtered = self.filter_pages(pages);
        for page in &filtered {
            report.boilerplate_lines += page.boilerplate_lines;
            report.blank_lines += page.blank_lines();
            report.content_lines += page.content_lines();
        }
        report.lines = report.boilerplate_lines + report.blank_lines + report.content_lines;
        debug!(
            "Filtered {} lines: {} boilerplate, {} blank, {} content",
            report.lines, report.boilerplate_lines, report.blank_lines, report.content_lines
        );

        if report.content_lines == 0 {
            warn!("No content left after filtering {} pages", report.pages);
            report.conditions.push(Condition::NoContentAfterFiltering);
            return ReflowOutput { sentences: Vec::new(), report };
        }

        let stream = stitch_lines(filtered.iter().flat_map(|page| page.lines.iter().copied()));
        let paragraphs = self.splitter.split(&stream);
        report.paragraphs = paragraphs.len();

        let mut accumulator = SentenceAccumulator::new();
        for (index, paragraph) in paragraphs.into_iter().enumerate() {
            let repaired = self.dehyphenator.repair(paragraph);
            report.hyphen_joins += repaired.joins;

            if !repaired.text.contains(TERMINAL_PUNCTUATION) {
                debug!("Paragraph {} has no terminal punctuation, emitting as-is", index);
                report.unterminated_paragraphs += 1;
            }

            self.segmenter.segment_into(&repaired.text, &mut accumulator);
        }

        if report.unterminated_paragraphs > 0 {
            report.conditions.push(Condition::UnterminatedParagraph);
        }
        report.merged_fragments = accumulator.merged_fragments();

        let sentences = accumulator.into_sentences();
        report.sentences = sentences.len();
        report.sentence_chars = sentences.iter().map(|s| s.chars().count()).sum();

        info!(
            "Reflowed {} pages into {} paragraphs and {} sentences",
            report.pages, report.paragraphs, report.sentences
        );

        ReflowOutput { sentences, report }
    }
}
