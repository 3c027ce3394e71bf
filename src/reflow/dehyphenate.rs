use anyhow::Result;
use regex_automata::meta::Regex;

/// Paragraph text after line-wrap hyphen repair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dehyphenated {
    pub text: String,
    /// Number of hyphen-space joins performed
    pub joins: usize,
}

/// Rejoins words split by a justified line wrap ("com- memorations" -> "commemorations").
///
/// Every `word- word` sequence is joined, including genuine compounds that happened to
/// wrap at their hyphen. Matches are non-overlapping and found left to right in one pass.
pub struct Dehyphenator {
    pattern: Regex,
}

impl Dehyphenator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(r"\w+-\s+\w+")?,
        })
    }

    pub fn repair(&self, paragraph: &str) -> Dehyphenated {
        let mut text = String::with_capacity(paragraph.len());
        let mut copied_to = 0;
        let mut joins = 0;

        for found in self.pattern.find_iter(paragraph) {
            let matched = &paragraph[found.start()..found.end()];
            // \w never matches '-', so the first hyphen ends the leading word
            let Some(hyphen) = matched.find('-') else {
                continue;
            };
            let head = &matched[..hyphen];
            let tail = matched[hyphen + 1..].trim_start();

            text.push_str(&paragraph[copied_to..found.start()]);
            text.push_str(head);
            text.push_str(tail);
            copied_to = found.end();
            joins += 1;
        }
        text.push_str(&paragraph[copied_to..]);

        Dehyphenated { text, joins }
    }
}
