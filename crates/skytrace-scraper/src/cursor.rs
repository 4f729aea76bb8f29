//! Forward-only extraction cursor.
//!
//! Fields of interest on the scraped pages share tags and classes with many
//! siblings and carry no identifiers. A [`Cursor`] reads them the way a person
//! would, top to bottom: every call searches forward from the current
//! position and moves the position past what it consumed. A sequence of calls
//! therefore reads as a small extraction grammar for one page layout.
//!
//! Extraction takes `&mut self`, so one cursor can never be advanced from two
//! tasks at once. Concurrent readers each take their own position with
//! [`Cursor::fork`]; the underlying [`Document`] is shared, not copied.

use crate::document::{Document, Element, Selector};
use crate::error::{Result, ScrapeError};

/// A position-tracking reader over one [`Document`].
#[derive(Debug)]
pub struct Cursor {
    document: Document,
    position: usize,
}

impl Cursor {
    /// Start reading `document` from the top.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            position: 0,
        }
    }

    /// Index of the first element not yet consumed.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of elements between the cursor and the end of the document.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.document.len() - self.position
    }

    /// Number of elements matching `selector` between the cursor and the end
    /// of the document. Does not move the cursor.
    #[must_use]
    pub fn count_remaining(&self, selector: Selector) -> usize {
        self.document.elements()[self.position..]
            .iter()
            .filter(|element| selector.matches(element))
            .count()
    }

    /// An independently positioned cursor over the same document.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            document: self.document.clone(),
            position: self.position,
        }
    }

    /// Collect the trimmed text of the next `count` elements matching `selector`.
    ///
    /// On success the cursor moves past the last match. If fewer than `count`
    /// matches remain the call fails with [`ScrapeError::NotFound`] and the
    /// cursor does not move.
    pub fn extract_text(&mut self, selector: Selector, count: usize) -> Result<Vec<String>> {
        let matched = self.consume(selector, count)?;
        Ok(matched
            .into_iter()
            .map(|index| self.document.text(self.element(index)).to_string())
            .collect())
    }

    /// Like [`Cursor::extract_text`] but returns the link/source attribute
    /// (`href`, else `src`) of each match. Matches without one yield `""`.
    pub fn extract_attribute(&mut self, selector: Selector, count: usize) -> Result<Vec<String>> {
        let matched = self.consume(selector, count)?;
        Ok(matched
            .into_iter()
            .map(|index| self.element(index).link().unwrap_or_default().to_string())
            .collect())
    }

    /// Text of the next single match.
    pub fn next_text(&mut self, selector: Selector) -> Result<String> {
        let matched = self.consume(selector, 1)?;
        Ok(self.document.text(self.element(matched[0])).to_string())
    }

    /// Link/source attribute of the next single match.
    pub fn next_attribute(&mut self, selector: Selector) -> Result<String> {
        let matched = self.consume(selector, 1)?;
        Ok(self.element(matched[0]).link().unwrap_or_default().to_string())
    }

    /// Move past the `occurrences`-th next match without extracting anything.
    pub fn skip(&mut self, selector: Selector, occurrences: usize) -> Result<()> {
        self.consume(selector, occurrences).map(|_| ())
    }

    /// Finish with the document.
    ///
    /// Dropping the cursor has the same effect, so early returns release too.
    pub fn release(self) {
        drop(self);
    }

    fn element(&self, index: usize) -> &Element {
        &self.document.elements()[index]
    }

    fn consume(&mut self, selector: Selector, count: usize) -> Result<Vec<usize>> {
        let matched: Vec<usize> = self.document.elements()[self.position..]
            .iter()
            .enumerate()
            .filter(|(_, element)| selector.matches(element))
            .map(|(offset, _)| self.position + offset)
            .take(count)
            .collect();

        if matched.len() < count {
            return Err(ScrapeError::NotFound {
                selector: selector.to_string(),
                requested: count,
                found: matched.len(),
            });
        }

        if let Some(last) = matched.last() {
            self.position = last + 1;
        }

        Ok(matched)
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        tracing::trace!(
            position = self.position,
            elements = self.document.len(),
            "cursor released"
        );
    }
}
