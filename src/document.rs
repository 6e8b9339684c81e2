//! PDF document container.

use crate::config::SlicerConfig;
use crate::error::{Error, Result};
use crate::page::{Page, PageCursor};
use crate::selection::PageSelection;
use crate::tool;
use regex::Regex;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// A PDF file on disk together with its page count.
///
/// The page count is read once, when the document is opened, and never
/// changes afterwards. Pages are obtained by index or by iteration and
/// exported through the configured conversion tool.
///
/// ```no_run
/// use pdfslice::Slicer;
///
/// let pdf = Slicer::new().create("document.pdf")?;
/// println!("{} pages", pdf.page_count());
/// pdf.page(0)?.export("cover.png")?;
/// # Ok::<(), pdfslice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    config: Arc<SlicerConfig>,
    page_count: usize,
}

impl Document {
    /// Open the PDF at `path`.
    ///
    /// The file must exist; this is checked before any tool is run. The
    /// metadata tool is then run once to determine the page count.
    pub fn open<P: AsRef<Path>>(config: Arc<SlicerConfig>, path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let page_count = query_page_count(&config, path)?;
        log::debug!("Opened {} ({} pages)", path.display(), page_count);

        Ok(Self {
            path: path.to_path_buf(),
            config,
            page_count,
        })
    }

    /// Path of the source PDF.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tool configuration this document was opened with.
    pub fn config(&self) -> &SlicerConfig {
        &self.config
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Alias for [`page_count`](Self::page_count).
    pub fn len(&self) -> usize {
        self.page_count
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.page_count == 0
    }

    /// Check if a zero-based page index exists.
    pub fn page_exists(&self, index: usize) -> bool {
        index < self.page_count
    }

    /// Get the page at a zero-based index.
    pub fn page(&self, index: usize) -> Result<Page<'_>> {
        self.check_index(index)?;
        Ok(Page::new(self, index))
    }

    /// Iterate over all pages, starting from the first.
    ///
    /// Every call returns a fresh cursor.
    pub fn pages(&self) -> PageCursor<'_> {
        PageCursor::new(self)
    }

    /// Render the page at `index` to an image file at `destination`.
    ///
    /// The image format is inferred by the conversion tool from the
    /// destination extension. An existing file is overwritten.
    pub fn export<P: AsRef<Path>>(&self, index: usize, destination: P) -> Result<()> {
        self.check_index(index)?;
        let destination = destination.as_ref();

        // `file.pdf[3]` selects the fourth page
        let mut source = self.path.clone().into_os_string();
        source.push(format!("[{}]", index));

        let args = self
            .config
            .conversion_args()
            .iter()
            .map(OsString::from)
            .chain([source, destination.as_os_str().to_os_string()]);

        tool::run(self.config.conversion_tool(), args)?;
        log::debug!("Exported page {} to {}", index, destination.display());
        Ok(())
    }

    /// Export every selected page, naming each output with `name`.
    ///
    /// `selection` uses 1-indexed page numbers; numbers past the end of the
    /// document are skipped. Stops at the first failed export and returns
    /// the written paths otherwise.
    pub fn export_selection<F>(
        &self,
        selection: &PageSelection,
        mut name: F,
    ) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Page<'_>) -> PathBuf,
    {
        let mut written = Vec::new();
        for index in selection.indices(self.page_count) {
            let page = Page::new(self, index);
            let destination = name(&page);
            page.export(&destination)?;
            written.push(destination);
        }
        Ok(written)
    }

    /// Not supported: documents are read-only.
    pub fn set_page<P: AsRef<Path>>(&mut self, _index: usize, _image: P) -> Result<()> {
        Err(Error::Unsupported("modifying the PDF"))
    }

    /// Not supported: documents are read-only.
    pub fn remove_page(&mut self, _index: usize) -> Result<()> {
        Err(Error::Unsupported("modifying the PDF"))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if self.page_exists(index) {
            Ok(())
        } else {
            Err(Error::PageOutOfRange {
                index,
                count: self.page_count,
            })
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = Page<'a>;
    type IntoIter = PageCursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages()
    }
}

/// Extract the page count from metadata tool output.
///
/// Returns the number following the first `Pages:` label, or `None` if
/// there is no such line.
pub fn parse_page_count(text: &str) -> Option<usize> {
    static PAGES: OnceLock<Regex> = OnceLock::new();
    let re = PAGES.get_or_init(|| Regex::new(r"Pages:\s+([0-9]+)").unwrap());

    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn query_page_count(config: &SlicerConfig, path: &Path) -> Result<usize> {
    let args = config
        .metadata_args()
        .iter()
        .map(OsString::from)
        .chain([path.as_os_str().to_os_string()]);

    let output = tool::run(config.metadata_tool(), args)?;

    match parse_page_count(&output) {
        Some(count) => Ok(count),
        None => {
            log::warn!(
                "No page count reported for {}, assuming 0 pages",
                path.display()
            );
            Ok(0)
        }
    }
}
