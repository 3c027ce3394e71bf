// WHY: page header/footer classification is a per-line pure function so pages can be
// classified independently and in parallel before stitching restores document order

use anyhow::Result;
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};

/// Tunables for header/footer detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Running-header phrases matched case-insensitively against upper-case lines
    pub header_phrases: Vec<String>,
    /// Lines shorter than this (in chars) are eligible for the short-line rules
    pub short_line_limit: usize,
    /// Upper-case short lines with at most this many words are boilerplate
    pub max_upper_case_words: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            // Corpus-specific; see config/advancement_of_learning.json for an example
            header_phrases: Vec::new(),
            short_line_limit: 30,
            max_upper_case_words: 5,
        }
    }
}

/// Classification of a single trimmed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Content,
    Boilerplate,
    Blank,
}

/// A line that survived filtering, borrowed from its page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilteredLine<'a> {
    /// Trimmed content text
    Content(&'a str),
    /// Paragraph marker
    Blank,
}

/// Output of filtering one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredPage<'a> {
    pub lines: Vec<FilteredLine<'a>>,
    pub boilerplate_lines: usize,
}

impl<'a> FilteredPage<'a> {
    pub fn blank_lines(&self) -> usize {
        self.lines.iter().filter(|line| matches!(line, FilteredLine::Blank)).count()
    }

    pub fn content_lines(&self) -> usize {
        self.lines.len() - self.blank_lines()
    }
}

/// Header/footer detector for extracted page text
pub struct BoilerplateFilter {
    /// Only digits, whitespace and square brackets, e.g. "12 [34]"
    page_number_only: Regex,
    /// Leading number followed by a bracketed group, e.g. "214 [III. 2]"
    numbered_bracket: Regex,
    /// Lower-cased, non-empty phrases
    header_phrases: Vec<String>,
    short_line_limit: usize,
    max_upper_case_words: usize,
}

impl BoilerplateFilter {
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let header_phrases = config
            .header_phrases
            .iter()
            .map(|phrase| phrase.trim().to_lowercase())
            .filter(|phrase| !phrase.is_empty())
            .collect();

        Ok(Self {
            page_number_only: Regex::new(r"^[\d\s\[\]]+$")?,
            numbered_bracket: Regex::new(r"^\d+\s*\[.*\]")?,
            header_phrases,
            short_line_limit: config.short_line_limit,
            max_upper_case_words: config.max_upper_case_words,
        })
    }

    pub fn with_default_config() -> Result<Self> {
        Self::new(&FilterConfig::default())
    }

    /// Returns true if an already-trimmed line is a page header or footer.
    /// Empty lines are never boilerplate.
    pub fn is_boilerplate(&self, line: &str) -> bool {
        if line.is_empty() {
            return false;
        }

        let upper = is_upper_case(line);

        if line.chars().count() < self.short_line_limit {
            if self.page_number_only.is_match(line) {
                return true;
            }
            if upper && line.split_whitespace().count() <= self.max_upper_case_words {
                return true;
            }
            if self.numbered_bracket.is_match(line) {
                return true;
            }
        }

        if upper {
            let lowered = line.to_lowercase();
            if self.header_phrases.iter().any(|phrase| lowered.contains(phrase.as_str())) {
                return true;
            }
            if self.numbered_bracket.is_match(line) {
                return true;
            }
        }

        false
    }

    /// Classify a raw line; surrounding whitespace is ignored
    pub fn classify(&self, raw_line: &str) -> LineClass {
        let line = raw_line.trim();
        if line.is_empty() {
            LineClass::Blank
        } else if self.is_boilerplate(line) {
            LineClass::Boilerplate
        } else {
            LineClass::Content
        }
    }

    /// Classify every line of a page and drop boilerplate, keeping blank markers.
    /// A page's final newline does not produce a blank line.
    pub fn filter_page<'a>(&self, page: &'a str) -> FilteredPage<'a> {
        let mut filtered = FilteredPage::default();

        for raw_line in page.lines() {
            match self.classify(raw_line) {
                LineClass::Blank => filtered.lines.push(FilteredLine::Blank),
                LineClass::Boilerplate => filtered.boilerplate_lines += 1,
                LineClass::Content => filtered.lines.push(FilteredLine::Content(raw_line.trim())),
            }
        }

        filtered
    }
}

/// At least one cased character and no lower-case characters
fn is_upper_case(text: &str) -> bool {
    let mut has_cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
