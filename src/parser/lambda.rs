//! Splitting the display lambda into page blocks.
//!
//! Pages are written as `if (page == N) {` blocks. The segmenter walks the
//! lambda line by line, tracking brace depth so that nested blocks inside a
//! page do not end it early. It does not parse C++; braces inside string
//! literals or comments are counted like any other.

// Allow intentional type casts for brace counting
#![allow(clippy::cast_possible_wrap)]

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Matches the page condition, capturing the page index.
static PAGE_CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"if \(page ==\s*(\d+)\s*\)").expect("page condition pattern is valid")
});

/// Candidate lines grouped by page index, in ascending page order.
pub type PageLines = BTreeMap<u32, Vec<String>>;

/// Result of recognizing a page-opening line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOpen {
    /// Not a page boundary
    No,
    /// Opens the page with this index
    Index(u32),
    /// Looks like a boundary but the index is unusable
    Invalid,
}

/// Checks whether a trimmed line opens a page block.
fn page_open(line: &str) -> PageOpen {
    if !line.ends_with('{') {
        return PageOpen::No;
    }
    match PAGE_CONDITION.captures(line) {
        Some(caps) => caps[1].parse().map_or(PageOpen::Invalid, PageOpen::Index),
        None => PageOpen::No,
    }
}

/// Net brace depth change of a line.
fn brace_delta(line: &str) -> i64 {
    let opens = line.matches('{').count() as i64;
    let closes = line.matches('}').count() as i64;
    opens - closes
}

/// Segmenter state for one pass over a lambda.
#[derive(Debug, Default)]
struct Segmenter {
    pages: PageLines,
    current_page: Option<u32>,
    depth: i64,
}

impl Segmenter {
    fn feed(&mut self, line: &str) {
        match page_open(line) {
            PageOpen::Index(index) => {
                debug!(page = index, "page block opened");
                self.pages.entry(index).or_default();
                self.current_page = Some(index);
                self.depth = 1;
                return;
            }
            PageOpen::Invalid => {
                debug!(line, "ignoring page block with unusable index");
                self.current_page = None;
                self.depth = 0;
                return;
            }
            PageOpen::No => {}
        }

        let Some(page) = self.current_page else {
            return;
        };

        self.depth += brace_delta(line);
        if self.depth <= 0 {
            debug!(page, "page block closed");
            self.current_page = None;
            self.depth = 0;
            return;
        }

        self.pages.entry(page).or_default().push(line.to_string());
    }
}

/// Groups the lines of a lambda into page blocks.
///
/// Every line inside a page block (other than the opening and closing lines)
/// is returned trimmed, in source order. Lines outside any page block are
/// dropped. Repeated page indices append to the same page.
#[must_use]
pub fn segment_pages<'a, I>(lines: I) -> PageLines
where
    I: IntoIterator<Item = &'a str>,
{
    let mut segmenter = Segmenter::default();
    for line in lines {
        segmenter.feed(line.trim());
    }
    segmenter.pages
}

/// Convenience wrapper over [`segment_pages`] for a whole lambda body.
#[must_use]
pub fn segment_lambda(source: &str) -> PageLines {
    segment_pages(source.lines())
}
