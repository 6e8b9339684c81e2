//! Tool configuration and the document factory.

use crate::document::Document;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default location of the `pdfinfo` executable.
pub const DEFAULT_METADATA_TOOL: &str = "/usr/bin/pdfinfo";

/// Default location of the ImageMagick `convert` executable.
pub const DEFAULT_CONVERSION_TOOL: &str = "/usr/bin/convert";

/// Option key overriding the metadata tool path.
pub const METADATA_TOOL_PATH: &str = "metadata_tool_path";

/// Option key overriding the conversion tool path.
pub const CONVERSION_TOOL_PATH: &str = "conversion_tool_path";

/// Paths and leading arguments of the two external tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerConfig {
    #[serde(rename = "metadata_tool_path", alias = "pdfinfoPath")]
    metadata_tool: PathBuf,

    metadata_args: Vec<String>,

    #[serde(rename = "conversion_tool_path", alias = "convertPath")]
    conversion_tool: PathBuf,

    conversion_args: Vec<String>,
}

impl SlicerConfig {
    /// Path of the tool reporting the page count.
    pub fn metadata_tool(&self) -> &Path {
        &self.metadata_tool
    }

    /// Arguments placed before the source path when running the metadata tool.
    pub fn metadata_args(&self) -> &[String] {
        &self.metadata_args
    }

    /// Path of the tool rasterizing pages.
    pub fn conversion_tool(&self) -> &Path {
        &self.conversion_tool
    }

    /// Arguments placed before the page selector when running the conversion tool.
    pub fn conversion_args(&self) -> &[String] {
        &self.conversion_args
    }
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            metadata_tool: PathBuf::from(DEFAULT_METADATA_TOOL),
            metadata_args: Vec::new(),
            conversion_tool: PathBuf::from(DEFAULT_CONVERSION_TOOL),
            conversion_args: Vec::new(),
        }
    }
}

/// Configuration holder and factory for [`Document`]s.
///
/// The configuration is immutable once documents are created from it and
/// shared by all of them.
///
/// # Example
///
/// ```no_run
/// use pdfslice::Slicer;
///
/// let slicer = Slicer::new().with_conversion_args(["-density", "150"]);
/// let pdf = slicer.create("document.pdf")?;
/// for page in &pdf {
///     page.export(format!("image_{}.png", page.index()))?;
/// }
/// # Ok::<(), pdfslice::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Slicer {
    config: Arc<SlicerConfig>,
}

impl Slicer {
    /// Create a slicer using the default tool locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slicer from named options.
    ///
    /// Recognized keys are [`METADATA_TOOL_PATH`] and [`CONVERSION_TOOL_PATH`]
    /// (`pdfinfoPath` and `convertPath` are accepted as aliases). Unknown
    /// keys are ignored.
    pub fn from_options<I, K, V>(options: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<PathBuf>,
    {
        let mut config = SlicerConfig::default();
        for (key, value) in options {
            match key.as_ref() {
                METADATA_TOOL_PATH | "pdfinfoPath" => config.metadata_tool = value.into(),
                CONVERSION_TOOL_PATH | "convertPath" => config.conversion_tool = value.into(),
                other => log::debug!("Ignoring unknown option '{}'", other),
            }
        }
        Self {
            config: Arc::new(config),
        }
    }

    /// Load a slicer from a JSON object. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SlicerConfig = serde_json::from_str(json)?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Set the metadata tool path.
    pub fn with_metadata_tool(mut self, path: impl Into<PathBuf>) -> Self {
        Arc::make_mut(&mut self.config).metadata_tool = path.into();
        self
    }

    /// Set the conversion tool path.
    pub fn with_conversion_tool(mut self, path: impl Into<PathBuf>) -> Self {
        Arc::make_mut(&mut self.config).conversion_tool = path.into();
        self
    }

    /// Set arguments passed to the metadata tool before the source path.
    pub fn with_metadata_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::make_mut(&mut self.config).metadata_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set arguments passed to the conversion tool before the page selector
    /// (e.g. `["-density", "150"]`).
    pub fn with_conversion_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::make_mut(&mut self.config).conversion_args =
            args.into_iter().map(Into::into).collect();
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &SlicerConfig {
        &self.config
    }

    /// Path of the metadata tool.
    pub fn metadata_tool(&self) -> &Path {
        self.config.metadata_tool()
    }

    /// Path of the conversion tool.
    pub fn conversion_tool(&self) -> &Path {
        self.config.conversion_tool()
    }

    /// Open the PDF at `path` with this configuration.
    ///
    /// Fails if the file does not exist or the metadata tool fails.
    pub fn create<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        Document::open(Arc::clone(&self.config), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    #[test]
    fn test_default_tools() {
        let slicer = Slicer::new();
        assert_eq!(slicer.metadata_tool(), Path::new("/usr/bin/pdfinfo"));
        assert_eq!(slicer.conversion_tool(), Path::new("/usr/bin/convert"));
        assert!(slicer.config().metadata_args().is_empty());
        assert!(slicer.config().conversion_args().is_empty());
    }

    #[test]
    fn test_from_options() {
        let mut options = HashMap::new();
        options.insert("metadata_tool_path", "/opt/poppler/bin/pdfinfo");
        options.insert("conversion_tool_path", "/opt/magick/convert");
        options.insert("colour", "blue");

        let slicer = Slicer::from_options(options);
        assert_eq!(
            slicer.metadata_tool(),
            Path::new("/opt/poppler/bin/pdfinfo")
        );
        assert_eq!(slicer.conversion_tool(), Path::new("/opt/magick/convert"));
    }

    #[test]
    fn test_from_options_partial_and_aliases() {
        let slicer = Slicer::from_options([("convertPath", "/usr/local/bin/convert")]);
        assert_eq!(slicer.metadata_tool(), Path::new(DEFAULT_METADATA_TOOL));
        assert_eq!(
            slicer.conversion_tool(),
            Path::new("/usr/local/bin/convert")
        );
    }

    #[test]
    fn test_builder() {
        let slicer = Slicer::new()
            .with_metadata_tool("pdfinfo")
            .with_conversion_tool("magick")
            .with_conversion_args(["convert", "-density", "150"]);

        assert_eq!(slicer.metadata_tool(), Path::new("pdfinfo"));
        assert_eq!(slicer.conversion_tool(), Path::new("magick"));
        assert_eq!(
            slicer.config().conversion_args(),
            &["convert", "-density", "150"]
        );
    }

    #[test]
    fn test_builder_does_not_affect_clones() {
        let base = Slicer::new();
        let custom = base.clone().with_metadata_tool("/tmp/pdfinfo");
        assert_eq!(base.metadata_tool(), Path::new(DEFAULT_METADATA_TOOL));
        assert_eq!(custom.metadata_tool(), Path::new("/tmp/pdfinfo"));
    }

    #[test]
    fn test_from_json() {
        let slicer = Slicer::from_json(
            r#"{"metadata_tool_path": "/bin/pdfinfo", "conversion_args": ["-density", "72"]}"#,
        )
        .unwrap();
        assert_eq!(slicer.metadata_tool(), Path::new("/bin/pdfinfo"));
        assert_eq!(slicer.conversion_tool(), Path::new(DEFAULT_CONVERSION_TOOL));
        assert_eq!(slicer.config().conversion_args(), &["-density", "72"]);

        let slicer = Slicer::from_json(r#"{"pdfinfoPath": "/x/pdfinfo"}"#).unwrap();
        assert_eq!(slicer.metadata_tool(), Path::new("/x/pdfinfo"));
    }

    #[test]
    fn test_from_json_invalid() {
        let result = Slicer::from_json("not json");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_create_missing_file() {
        let result = Slicer::new().create("/definitely/not/here.pdf");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
