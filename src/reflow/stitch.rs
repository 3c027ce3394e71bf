// WHY: page breaks are not paragraph breaks; only blank lines observed before stitching are,
// so sentences physically split by a page break flow back together

use anyhow::Result;
use regex_automata::meta::Regex;

use super::boilerplate::FilteredLine;

/// Encodes a blank line in the stitched stream
pub const PARAGRAPH_MARKER: &str = "  ";

/// Join filtered lines into one stream.
/// Content lines are separated by a single space; each blank line contributes
/// [`PARAGRAPH_MARKER`]. The first content line of an empty stream gets no leading space.
pub fn stitch_lines<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = FilteredLine<'a>>,
{
    let mut stream = String::new();

    for line in lines {
        match line {
            FilteredLine::Blank => stream.push_str(PARAGRAPH_MARKER),
            FilteredLine::Content(text) => {
                if !stream.is_empty() {
                    stream.push(' ');
                }
                stream.push_str(text);
            }
        }
    }

    stream
}

/// Splits a stitched stream back into paragraphs on whitespace runs of length two or more
pub struct ParagraphSplitter {
    separator: Regex,
}

impl ParagraphSplitter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            separator: Regex::new(r"\s{2,}")?,
        })
    }

    /// Trimmed, non-empty paragraphs in stream order
    pub fn split<'a>(&self, stream: &'a str) -> Vec<&'a str> {
        let mut paragraphs = Vec::new();
        let mut start = 0;

        for separator in self.separator.find_iter(stream) {
            push_paragraph(&mut paragraphs, &stream[start..separator.start()]);
            start = separator.end();
        }
        push_paragraph(&mut paragraphs, &stream[start..]);

        paragraphs
    }
}

fn push_paragraph<'a>(paragraphs: &mut Vec<&'a str>, fragment: &'a str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        paragraphs.push(fragment);
    }
}
