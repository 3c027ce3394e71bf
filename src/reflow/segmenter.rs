// WHY: boundary detection and the short-fragment merge rule are separate so a different
// boundary strategy can be swapped in without touching the merge logic

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Characters that let a short fragment stand as its own sentence
pub const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?'];

/// Tunables for sentence segmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Unterminated fragments shorter than this (in chars) are merged into the previous sentence
    pub min_fragment_len: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { min_fragment_len: 3 }
    }
}

/// Finds sentence boundaries inside a paragraph
pub trait BoundaryStrategy: Send + Sync {
    /// Ascending byte offsets at which the paragraph is split
    fn boundaries(&self, paragraph: &str) -> Vec<usize>;
}

/// Splits after a period followed by whitespace and an upper-case ASCII letter,
/// or after a period that ends the paragraph.
///
/// Abbreviations followed by a capitalized name ("Mr. Bacon") are mis-split; decimals
/// and lower-case continuations are not.
pub struct PeriodCapitalBoundaries {
    pattern: Regex,
}

impl PeriodCapitalBoundaries {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"\.(?:\s+[A-Z]|$)")?,
        })
    }
}

impl BoundaryStrategy for PeriodCapitalBoundaries {
    fn boundaries(&self, paragraph: &str) -> Vec<usize> {
        self.pattern
            .find_iter(paragraph)
            .map(|found| found.start() + 1)
            .collect()
    }
}

/// Document-wide running output of the segmenter.
///
/// Threaded through every paragraph so the merge rule can reach the last sentence
/// emitted anywhere in the document, not just in the current paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceAccumulator {
    sentences: Vec<String>,
    merged_fragments: usize,
}

impl SentenceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one candidate fragment, applying the short-fragment merge rule
    pub fn push_fragment(&mut self, fragment: &str, min_fragment_len: usize) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }

        let is_short = fragment.chars().count() < min_fragment_len
            && !fragment.ends_with(TERMINAL_PUNCTUATION);

        match self.sentences.last_mut() {
            Some(previous) if is_short => {
                debug!("Merging short fragment {:?} into previous sentence", fragment);
                previous.push(' ');
                previous.push_str(fragment);
                self.merged_fragments += 1;
            }
            _ => self.sentences.push(fragment.to_string()),
        }
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Fragments appended to an earlier sentence instead of being emitted
    pub fn merged_fragments(&self) -> usize {
        self.merged_fragments
    }

    pub fn into_sentences(self) -> Vec<String> {
        self.sentences
    }
}

/// Paragraph-to-sentence segmenter with a pluggable boundary strategy
pub struct SentenceSegmenter {
    strategy: Box<dyn BoundaryStrategy>,
    config: SegmenterConfig,
}

impl SentenceSegmenter {
    /// Segmenter using [`PeriodCapitalBoundaries`]
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        Ok(Self::with_strategy(config, Box::new(PeriodCapitalBoundaries::new()?)))
    }

    pub fn with_default_config() -> Result<Self> {
        Self::new(SegmenterConfig::default())
    }

    pub fn with_strategy(config: SegmenterConfig, strategy: Box<dyn BoundaryStrategy>) -> Self {
        Self { strategy, config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Split a paragraph at the strategy's boundaries.
    /// Fragments are trimmed; empty ones are dropped. Offsets that are out of order, out of
    /// range or not on a char boundary are ignored.
    pub fn split_candidates<'a>(&self, paragraph: &'a str) -> Vec<&'a str> {
        let mut fragments = Vec::new();
        let mut start = 0;

        for offset in self.strategy.boundaries(paragraph) {
            if offset <= start || offset > paragraph.len() || !paragraph.is_char_boundary(offset) {
                continue;
            }
            push_candidate(&mut fragments, &paragraph[start..offset]);
            start = offset;
        }
        push_candidate(&mut fragments, &paragraph[start..]);

        fragments
    }

    /// Segment one paragraph into the running document output
    pub fn segment_into(&self, paragraph: &str, accumulator: &mut SentenceAccumulator) {
        for fragment in self.split_candidates(paragraph) {
            accumulator.push_fragment(fragment, self.config.min_fragment_len);
        }
    }

    /// Segment an ordered sequence of paragraphs with a fresh accumulator
    pub fn segment_document<'a, I>(&self, paragraphs: I) -> SentenceAccumulator
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut accumulator = SentenceAccumulator::new();
        for paragraph in paragraphs {
            self.segment_into(paragraph, &mut accumulator);
        }
        accumulator
    }
}

fn push_candidate<'a>(fragments: &mut Vec<&'a str>, fragment: &'a str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        fragments.push(fragment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    static SHARED_SEGMENTER: OnceLock<SentenceSegmenter> = OnceLock::new();

    fn get_segmenter() -> &'static SentenceSegmenter {
        SHARED_SEGMENTER.get_or_init(|| SentenceSegmenter::with_default_config().unwrap())
    }

    #[test]
    fn test_boundary_offsets() {
        let strategy = PeriodCapitalBoundaries::new().unwrap();
        let text = "Knowledge is power. It is also pleasure.";
        assert_eq!(strategy.boundaries(text), vec![19, text.len()]);
    }

    #[test]
    fn test_no_split_before_lower_case_or_digit() {
        let strategy = PeriodCapitalBoundaries::new().unwrap();
        assert!(strategy.boundaries("Worth 2.5 pounds, e.g. in London").is_empty());
        assert!(strategy.boundaries("See p. 12 for more").is_empty());
    }

    #[test]
    fn test_abbreviation_before_capital_is_split() {
        // Heuristic limitation: "Mr." followed by a name is treated as a boundary
        let segmenter = get_segmenter();
        let fragments = segmenter.split_candidates("Ask Mr. Bacon about it.");
        assert_eq!(fragments, vec!["Ask Mr.", "Bacon about it."]);
    }

    #[test]
    fn test_unterminated_paragraph_is_one_sentence() {
        let segmenter = get_segmenter();
        let sentences = segmenter.segment_document(["A heading without any terminal mark"]);
        assert_eq!(sentences.sentences(), ["A heading without any terminal mark"]);
    }

    #[test]
    fn test_question_and_exclamation_do_not_split() {
        let segmenter = get_segmenter();
        let fragments = segmenter.split_candidates("Is it so? Yes! It is. Done");
        assert_eq!(fragments, vec!["Is it so? Yes! It is.", "Done"]);
    }

    #[test]
    fn test_short_fragment_merges_across_paragraphs() {
        let segmenter = get_segmenter();
        let sentences = segmenter.segment_document(["Yes. No.", "Dr"]);
        assert_eq!(sentences.sentences(), ["Yes.", "No. Dr"]);
        assert_eq!(sentences.merged_fragments(), 1);
    }

    #[test]
    fn test_short_fragment_first_in_document_is_kept() {
        let segmenter = get_segmenter();
        let sentences = segmenter.segment_document(["IV", "The chapter begins."]);
        assert_eq!(sentences.sentences(), ["IV", "The chapter begins."]);
        assert_eq!(sentences.merged_fragments(), 0);
    }

    #[test]
    fn test_short_terminated_fragment_stands_alone() {
        let mut accumulator = SentenceAccumulator::new();
        accumulator.push_fragment("First.", 3);
        accumulator.push_fragment("I.", 3);
        accumulator.push_fragment("  ", 3);
        assert_eq!(accumulator.sentences(), ["First.", "I."]);
        assert_eq!(accumulator.len(), 2);
    }

    #[test]
    fn test_fragment_length_counts_chars() {
        let mut accumulator = SentenceAccumulator::new();
        accumulator.push_fragment("Before.", 3);
        // Three chars but more than three bytes
        accumulator.push_fragment("été", 3);
        assert_eq!(accumulator.sentences(), ["Before.", "été"]);
    }

    struct EveryComma;

    impl BoundaryStrategy for EveryComma {
        fn boundaries(&self, paragraph: &str) -> Vec<usize> {
            paragraph.match_indices(',').map(|(i, _)| i + 1).collect()
        }
    }

    #[test]
    fn test_custom_strategy_keeps_merge_rule() {
        let segmenter =
            SentenceSegmenter::with_strategy(SegmenterConfig::default(), Box::new(EveryComma));
        let sentences = segmenter.segment_document(["one, two, x"]);
        // "x" is short and unterminated, so it joins "two,"
        assert_eq!(sentences.sentences(), ["one,", "two, x"]);
    }

    struct FixedOffsets(Vec<usize>);

    impl BoundaryStrategy for FixedOffsets {
        fn boundaries(&self, _paragraph: &str) -> Vec<usize> {
            self.0.clone()
        }
    }

    fn fixed(offsets: &[usize]) -> SentenceSegmenter {
        SentenceSegmenter::with_strategy(
            SegmenterConfig::default(),
            Box::new(FixedOffsets(offsets.to_vec())),
        )
    }

    #[test]
    fn test_invalid_offsets_are_ignored() {
        // Out of order, zero and past-the-end offsets are skipped
        assert_eq!(fixed(&[5, 3, 0, 40]).split_candidates("abcdefgh"), vec!["abcde", "fgh"]);
        // Offset 1 falls inside the two-byte 'é'
        assert_eq!(fixed(&[1]).split_candidates("éab"), vec!["éab"]);
    }
}
