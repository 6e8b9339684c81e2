//! # pdfslice
//!
//! Treat a PDF as a collection of exportable page images.
//!
//! No PDF parsing happens in this crate. The page count comes from a
//! metadata tool (`pdfinfo`) and pages are rasterized by a conversion tool
//! (ImageMagick `convert`); both are run as child processes.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfslice::Slicer;
//!
//! fn main() -> pdfslice::Result<()> {
//!     let slicer = Slicer::new();
//!     let pdf = slicer.create("document.pdf")?;
//!
//!     println!("{} pages", pdf.page_count());
//!     for page in &pdf {
//!         page.export(format!("image_{}.png", page.index()))?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Tool locations
//!
//! The defaults are `/usr/bin/pdfinfo` and `/usr/bin/convert`. They can be
//! overridden with the [`Slicer`] builder, a named-options map
//! ([`Slicer::from_options`]) or a JSON document ([`Slicer::from_json`]).

pub mod config;
pub mod document;
pub mod error;
pub mod page;
pub mod selection;
pub mod tool;

// Re-export commonly used types
pub use config::{Slicer, SlicerConfig};
pub use document::{parse_page_count, Document};
pub use error::{Error, Result};
pub use page::{Page, PageCursor};
pub use selection::PageSelection;

use std::path::Path;

/// Open a PDF with the default tool locations.
///
/// # Example
///
/// ```no_run
/// let pdf = pdfslice::open("document.pdf").unwrap();
/// println!("Pages: {}", pdf.page_count());
/// ```
pub fn open<P: AsRef<Path>>(path: P) -> Result<Document> {
    Slicer::new().create(path)
}

/// Count the pages of a PDF with the default tool locations.
pub fn page_count<P: AsRef<Path>>(path: P) -> Result<usize> {
    Ok(open(path)?.page_count())
}
