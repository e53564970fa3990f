//! Markup node abstraction and the scraper-backed implementation

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Trait representing a markup element that can be queried with CSS selectors
pub trait MarkupNode: Sized {
    /// Select all descendant elements matching the CSS selector
    ///
    /// Returns an empty vector if no element matches or if the selector is invalid.
    fn select_all(&self, selector: &str) -> Vec<Self>;

    /// Select the first descendant element matching the CSS selector
    fn select_one(&self, selector: &str) -> Option<Self> {
        self.select_all(selector).into_iter().next()
    }

    /// Whether any descendant matches the CSS selector
    fn has(&self, selector: &str) -> bool {
        self.select_one(selector).is_some()
    }

    /// Get the value of an attribute
    ///
    /// Returns `None` if the attribute doesn't exist.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Get the value of an attribute, treating an empty value as absent
    fn attr_non_empty(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    /// All text of this element and its descendants, untouched
    fn full_text(&self) -> String;

    /// Text with runs of whitespace collapsed to single spaces and trimmed
    fn clean_text(&self) -> String {
        self.full_text().split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl<'a> MarkupNode for ElementRef<'a> {
    fn select_all(&self, selector: &str) -> Vec<Self> {
        match Selector::parse(selector) {
            Ok(selector) => self.select(&selector).collect(),
            Err(e) => {
                warn!("Invalid selector '{}': {:?}", selector, e);
                vec![]
            }
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn full_text(&self) -> String {
        ElementRef::text(self).collect()
    }
}

/// A parsed markup fragment
///
/// Holds the parsed tree; nodes borrowed from it via [`Fragment::root`] live
/// as long as the fragment.
pub struct Fragment {
    html: Html,
}

impl Fragment {
    /// Parse a fragment of markup
    ///
    /// The underlying parser accepts any input, so the only unusable fragment
    /// is one with no content at all. Returns `None` in that case.
    pub fn parse(markup: &str) -> Option<Self> {
        if markup.trim().is_empty() {
            return None;
        }
        Some(Self {
            html: Html::parse_fragment(markup),
        })
    }

    /// Parse a complete document (e.g. a profile page)
    pub fn parse_document(markup: &str) -> Option<Self> {
        if markup.trim().is_empty() {
            return None;
        }
        Some(Self {
            html: Html::parse_document(markup),
        })
    }

    /// Root element of the parsed tree
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Select all elements in the fragment matching the CSS selector
    pub fn select_all(&self, selector: &str) -> Vec<ElementRef<'_>> {
        self.root().select_all(selector)
    }

    /// Select the first element in the fragment matching the CSS selector
    pub fn select_one(&self, selector: &str) -> Option<ElementRef<'_>> {
        self.root().select_one(selector)
    }
}

impl std::fmt::Debug for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragment").finish_non_exhaustive()
    }
}
