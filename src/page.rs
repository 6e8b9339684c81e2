//! Page views and sequential iteration.

use crate::document::Document;
use crate::error::Result;
use std::iter::FusedIterator;
use std::path::Path;

/// A single page of a [`Document`].
///
/// A page is a cheap view: the parent document plus a zero-based index.
/// It is only obtained through the document, which has already checked
/// the index.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    document: &'a Document,
    index: usize,
}

impl<'a> Page<'a> {
    pub(crate) fn new(document: &'a Document, index: usize) -> Self {
        Self { document, index }
    }

    /// Zero-based index of the page.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Page number (1-indexed).
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// The document this page belongs to.
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Render this page to an image file.
    ///
    /// ```no_run
    /// # let pdf = pdfslice::Slicer::new().create("document.pdf")?;
    /// pdf.page(0)?.export("image.jpg")?;
    /// # Ok::<(), pdfslice::Error>(())
    /// ```
    pub fn export<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        self.document.export(self.index, destination)
    }
}

/// Cursor over the pages of a document.
///
/// Besides being an [`Iterator`], the cursor exposes its position so
/// callers can step through pages manually. Moving past the last page
/// makes the cursor invalid; it never fails.
#[derive(Debug, Clone)]
pub struct PageCursor<'a> {
    document: &'a Document,
    position: usize,
}

impl<'a> PageCursor<'a> {
    pub(crate) fn new(document: &'a Document) -> Self {
        Self {
            document,
            position: 0,
        }
    }

    /// Page at the current position, if valid.
    pub fn current(&self) -> Option<Page<'a>> {
        self.is_valid()
            .then(|| Page::new(self.document, self.position))
    }

    /// Current zero-based position.
    pub fn key(&self) -> usize {
        self.position
    }

    /// Move to the next page.
    pub fn advance(&mut self) {
        self.position = self.position.saturating_add(1);
    }

    /// Move back to the first page.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Check if the cursor points at an existing page.
    pub fn is_valid(&self) -> bool {
        self.document.page_exists(self.position)
    }
}

impl<'a> Iterator for PageCursor<'a> {
    type Item = Page<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let page = self.current()?;
        self.advance();
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.document.page_count().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PageCursor<'_> {}

impl FusedIterator for PageCursor<'_> {}
