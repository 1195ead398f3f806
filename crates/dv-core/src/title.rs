//! Page titles
//!
//! A page title is a format string with two kinds of embedded markers:
//!
//! - `%m` stands for a missing value,
//! - `%p(n)` is a link to page `n` of the same dataset.
//!
//! Rendering turns the format into a sequence of [`TitleSegment`]s. The flat
//! text form is always derived from those segments so the two never disagree.
//! Malformed markers are never an error; they are kept as literal text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{PageError, PageId};

/// Text shown in place of a `%m` marker
pub const MISSING_MARKER: &str = "missing";

/// Matches the `(digits)` part following `%p`
static PAGE_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\((\d+)\)").expect("page reference pattern is valid"));

/// Resolves page numbers for title links
pub trait PageLookup {
    /// Bring a page into view; returns false if the page does not exist
    fn scroll_to_page(&self, page: PageId) -> bool;

    /// Whether the page is currently part of the dataset
    fn page_exists(&self, page: PageId) -> bool;
}

/// Lookup used by pages that do not belong to a dataset
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPages;

impl PageLookup for NoPages {
    fn scroll_to_page(&self, _page: PageId) -> bool {
        false
    }

    fn page_exists(&self, _page: PageId) -> bool {
        false
    }
}

/// Title of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTitle {
    /// Format string containing `%m` and `%p(n)` markers
    pub format: String,

    /// How the page was produced; shown as a tooltip
    pub provenance: String,
}

/// One piece of a rendered title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleSegment {
    Text(String),
    Missing,
    PageLink {
        page: PageId,
        /// Whether the page existed when the title was rendered
        live: bool,
    },
}

impl TitleSegment {
    /// Flat text for this segment
    pub fn text(&self) -> String {
        match self {
            TitleSegment::Text(text) => text.clone(),
            TitleSegment::Missing => MISSING_MARKER.to_string(),
            TitleSegment::PageLink { page, .. } => page.to_string(),
        }
    }
}

/// Result of rendering a [`PageTitle`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTitle {
    segments: Vec<TitleSegment>,
}

impl RenderedTitle {
    pub fn segments(&self) -> &[TitleSegment] {
        &self.segments
    }

    /// Flattened text, built from the segments
    pub fn text(&self) -> String {
        self.segments.iter().map(TitleSegment::text).collect()
    }

    /// Pages referenced by this title, in order of appearance
    pub fn links(&self) -> impl Iterator<Item = PageId> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            TitleSegment::PageLink { page, .. } => Some(*page),
            _ => None,
        })
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(TitleSegment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(TitleSegment::Text(text.to_string()));
        }
    }

    fn push(&mut self, segment: TitleSegment) {
        self.segments.push(segment);
    }
}

impl PageTitle {
    pub fn new(format: impl Into<String>, provenance: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            provenance: provenance.into(),
        }
    }

    /// Render the format string, resolving page links through `lookup`
    pub fn render(&self, lookup: &dyn PageLookup) -> RenderedTitle {
        let mut rendered = RenderedTitle::default();
        let mut rest = self.format.as_str();

        loop {
            let Some(pos) = rest.find('%') else {
                rendered.push_text(rest);
                break;
            };

            match rest[pos + 1..].chars().next() {
                Some('m') => {
                    rendered.push_text(&rest[..pos]);
                    rendered.push(TitleSegment::Missing);
                    rest = &rest[pos + 2..];
                }
                Some('p') => {
                    rendered.push_text(&rest[..pos]);
                    let after = &rest[pos + 2..];
                    match parse_page_reference(after) {
                        Some((page, consumed)) => {
                            rendered.push(TitleSegment::PageLink {
                                page,
                                live: lookup.page_exists(page),
                            });
                            rest = &after[consumed..];
                        }
                        None => {
                            rendered.push_text(&rest[pos..pos + 2]);
                            rest = after;
                        }
                    }
                }
                // Trailing `%` or an unknown marker: keep the tail as is.
                _ => {
                    rendered.push_text(rest);
                    break;
                }
            }
        }

        rendered
    }
}

/// Parse `(digits)` at the start of `text`, returning the id and bytes consumed
fn parse_page_reference(text: &str) -> Option<(PageId, usize)> {
    let captures = PAGE_REFERENCE.captures(text)?;
    let whole = captures.get(0)?;
    let page = captures.get(1)?.as_str().parse::<PageId>().ok()?;
    Some((page, whole.end()))
}

/// Follow a title link.
///
/// Returns [`PageError::StalePage`] when the page no longer exists; nothing is
/// navigated in that case.
pub fn follow_page_link(lookup: &dyn PageLookup, page: PageId) -> Result<(), PageError> {
    if lookup.scroll_to_page(page) {
        Ok(())
    } else {
        Err(PageError::StalePage(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Pages {
        existing: Vec<u32>,
        scrolled: RefCell<Vec<PageId>>,
    }

    impl Pages {
        fn with(existing: &[u32]) -> Self {
            Self {
                existing: existing.to_vec(),
                scrolled: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageLookup for Pages {
        fn scroll_to_page(&self, page: PageId) -> bool {
            if self.page_exists(page) {
                self.scrolled.borrow_mut().push(page);
                true
            } else {
                false
            }
        }

        fn page_exists(&self, page: PageId) -> bool {
            self.existing.contains(&page.get())
        }
    }

    fn text(s: &str) -> TitleSegment {
        TitleSegment::Text(s.to_string())
    }

    #[test]
    fn test_missing_marker() {
        let title = PageTitle::new("%m rows", "");
        let rendered = title.render(&NoPages);
        assert_eq!(rendered.segments(), &[TitleSegment::Missing, text(" rows")]);
        assert_eq!(rendered.text(), "missing rows");
    }

    #[test]
    fn test_page_link() {
        let pages = Pages::with(&[3]);
        let rendered = PageTitle::new("Filtered(%p(3))", "filter").render(&pages);
        assert_eq!(
            rendered.segments(),
            &[
                text("Filtered("),
                TitleSegment::PageLink { page: PageId::new(3), live: true },
                text(")"),
            ]
        );
        assert_eq!(rendered.text(), "Filtered(3)");
        assert_eq!(rendered.links().collect::<Vec<_>>(), vec![PageId::new(3)]);
    }

    #[test]
    fn test_follow_stale_link() {
        let pages = Pages::with(&[1]);
        let rendered = PageTitle::new("Filtered(%p(3))", "").render(&pages);
        assert!(matches!(
            rendered.segments()[1],
            TitleSegment::PageLink { live: false, .. }
        ));

        let err = follow_page_link(&pages, PageId::new(3)).unwrap_err();
        assert_eq!(err.to_string(), "Page 3 no longer exists");
        assert!(pages.scrolled.borrow().is_empty());

        assert!(follow_page_link(&pages, PageId::new(1)).is_ok());
        assert_eq!(*pages.scrolled.borrow(), vec![PageId::new(1)]);
    }

    #[test]
    fn test_flattened_text_replaces_markers() {
        let pages = Pages::with(&[]);
        let rendered = PageTitle::new("%p(12) vs %p(7): %m of %m", "").render(&pages);
        assert_eq!(rendered.text(), "12 vs 7: missing of missing");
        assert_eq!(rendered.segments().len(), 7);
    }

    #[test]
    fn test_malformed_tail_kept() {
        let rendered = PageTitle::new("100%", "").render(&NoPages);
        assert_eq!(rendered.segments(), &[text("100%")]);

        let rendered = PageTitle::new("a %m b %x %m", "").render(&NoPages);
        assert_eq!(
            rendered.segments(),
            &[text("a "), TitleSegment::Missing, text(" b %x %m")]
        );
    }

    #[test]
    fn test_malformed_page_reference_is_literal() {
        let rendered = PageTitle::new("see %p(x) and %m", "").render(&NoPages);
        assert_eq!(
            rendered.segments(),
            &[text("see %p(x) and "), TitleSegment::Missing]
        );

        let rendered = PageTitle::new("%p", "").render(&NoPages);
        assert_eq!(rendered.text(), "%p");

        let rendered = PageTitle::new("%p(99999999999)", "").render(&NoPages);
        assert_eq!(rendered.text(), "%p(99999999999)");
        assert_eq!(rendered.links().count(), 0);
    }

    #[test]
    fn test_render_is_idempotent() {
        let pages = Pages::with(&[2]);
        let title = PageTitle::new("%p(2) and %p(5) %m", "");
        assert_eq!(title.render(&pages), title.render(&pages));
    }

    #[test]
    fn test_plain_and_empty() {
        assert!(PageTitle::new("", "").render(&NoPages).segments().is_empty());
        assert_eq!(
            PageTitle::new("Histogram of age", "").render(&NoPages).segments(),
            &[text("Histogram of age")]
        );
    }

    #[test]
    fn test_multibyte_text() {
        let rendered = PageTitle::new("ε=%m · %p(4)é", "").render(&NoPages);
        assert_eq!(rendered.text(), "ε=missing · 4é");
    }
}
