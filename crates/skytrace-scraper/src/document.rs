//! Immutable, shareable page representation.
//!
//! A page is parsed with `scraper` once and flattened into a list of element
//! snapshots in document order. Text nodes are concatenated into one buffer and
//! each element records the byte range its subtree covers, so nested elements
//! don't repeat their descendants' text. Both are shared behind an `Arc`, so a
//! [`Document`] is cheap to clone and can be read from many tasks at once;
//! positions into it are tracked separately by [`crate::Cursor`].

use scraper::{ElementRef, Html};
use std::fmt;
use std::sync::Arc;

/// One element of a parsed page, as the cursor sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    text_start: usize,
    text_end: usize,
    href: Option<String>,
    src: Option<String>,
}

impl Element {
    /// Lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Class tokens, sorted and deduplicated.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Link or source attribute: `href`, falling back to `src`.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.href.as_deref().or(self.src.as_deref())
    }

    fn snapshot(element: &ElementRef<'_>, text_start: usize) -> Self {
        let value = element.value();

        let mut classes: Vec<String> = value.classes().map(str::to_string).collect();
        classes.sort_unstable();
        classes.dedup();

        Self {
            tag: value.name().to_ascii_lowercase(),
            classes,
            text_start,
            text_end: text_start,
            href: value.attr("href").map(|v| v.trim().to_string()),
            src: value.attr("src").map(|v| v.trim().to_string()),
        }
    }
}

/// Pending work while flattening the tree.
enum Step<N> {
    Enter(N),
    Exit(usize),
}

/// A parsed page: every element in document order.
#[derive(Clone)]
pub struct Document {
    elements: Arc<[Element]>,
    text: Arc<str>,
}

impl Document {
    /// Parse an HTML page.
    ///
    /// The `scraper` tree only lives for the duration of this call.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut elements: Vec<Element> = Vec::new();
        let mut text = String::new();
        let mut stack = vec![Step::Enter(*parsed.root_element())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Exit(index) => elements[index].text_end = text.len(),
                Step::Enter(node) => {
                    if let Some(fragment) = node.value().as_text() {
                        text.push_str(fragment);
                        continue;
                    }
                    let Some(element) = ElementRef::wrap(node) else {
                        continue;
                    };

                    stack.push(Step::Exit(elements.len()));
                    elements.push(Element::snapshot(&element, text.len()));

                    let mut child = node.last_child();
                    while let Some(next) = child {
                        stack.push(Step::Enter(next));
                        child = next.prev_sibling();
                    }
                }
            }
        }

        tracing::trace!(elements = elements.len(), text = text.len(), "parsed document");

        Self {
            elements: elements.into(),
            text: text.into(),
        }
    }

    /// Number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document has no elements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements, in document order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Text content of `element` and its descendants, whitespace-trimmed.
    ///
    /// `element` must come from this document.
    #[must_use]
    pub fn text(&self, element: &Element) -> &str {
        self.text
            .get(element.text_start..element.text_end)
            .unwrap_or_default()
            .trim()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements.len())
            .field("text_bytes", &self.text.len())
            .finish()
    }
}

/// A `(tag, class)` pair identifying the elements a cursor call looks for.
///
/// An empty `class` matches every element with the tag. Otherwise the
/// element's class tokens must equal the selector's tokens as a set, so
/// `hidden-xs hidden-sm` does not match `w40 hidden-xs hidden-sm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    tag: &'static str,
    class: &'static str,
}

impl Selector {
    /// Build a selector from a tag name and a space-separated class list.
    #[must_use]
    pub const fn new(tag: &'static str, class: &'static str) -> Self {
        Self { tag, class }
    }

    /// Whether `element` is selected.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        if !element.tag.eq_ignore_ascii_case(self.tag) {
            return false;
        }

        let mut wanted: Vec<&str> = self.class.split_whitespace().collect();
        if wanted.is_empty() {
            return true;
        }
        wanted.sort_unstable();
        wanted.dedup();

        wanted.len() == element.classes.len()
            && wanted
                .iter()
                .all(|class| element.classes.iter().any(|have| have == class))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        for class in self.class.split_whitespace() {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}
