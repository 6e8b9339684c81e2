//! pdfslice CLI - export PDF pages as images

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfslice::{PageSelection, Slicer};

#[derive(Parser)]
#[command(name = "pdfslice")]
#[command(version)]
#[command(about = "Export PDF pages as images using pdfinfo and ImageMagick", long_about = None)]
struct Cli {
    /// Path to the pdfinfo executable
    #[arg(long, global = true, env = "PDFSLICE_PDFINFO", value_name = "PATH")]
    pdfinfo: Option<PathBuf>,

    /// Path to the ImageMagick convert executable
    #[arg(long, global = true, env = "PDFSLICE_CONVERT", value_name = "PATH")]
    convert: Option<PathBuf>,

    /// JSON file with tool configuration
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the page count of a PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export pages as images
    Export {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Image format, used as the file extension
        #[arg(short, long, default_value = "png")]
        format: String,

        /// File name prefix for exported images
        #[arg(long, default_value = "page")]
        prefix: String,

        /// Rasterization density in DPI
        #[arg(long)]
        density: Option<u32>,
    },

    /// Export a single page
    Page {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-indexed)
        #[arg(value_name = "NUMBER")]
        number: usize,

        /// Output image file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Rasterization density in DPI
        #[arg(long)]
        density: Option<u32>,
    },

    /// Show version information
    Version,
}

/// Tool overrides shared by every command.
struct ToolOptions {
    pdfinfo: Option<PathBuf>,
    convert: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let tools = ToolOptions {
        pdfinfo: cli.pdfinfo,
        convert: cli.convert,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::Info { input, json } => cmd_info(&tools, &input, json),
        Commands::Export {
            input,
            output,
            pages,
            format,
            prefix,
            density,
        } => cmd_export(
            &tools,
            &input,
            output.as_deref(),
            pages.as_deref(),
            &format,
            &prefix,
            density,
        ),
        Commands::Page {
            input,
            number,
            output,
            density,
        } => cmd_page(&tools, &input, number, &output, density),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_slicer(
    tools: &ToolOptions,
    density: Option<u32>,
) -> Result<Slicer, Box<dyn std::error::Error>> {
    let mut slicer = match tools.config {
        Some(ref path) => Slicer::from_json(&fs::read_to_string(path)?)?,
        None => Slicer::new(),
    };

    if let Some(ref pdfinfo) = tools.pdfinfo {
        slicer = slicer.with_metadata_tool(pdfinfo);
    }
    if let Some(ref convert) = tools.convert {
        slicer = slicer.with_conversion_tool(convert);
    }
    if let Some(dpi) = density {
        let mut args = slicer.config().conversion_args().to_vec();
        args.push("-density".to_string());
        args.push(dpi.to_string());
        slicer = slicer.with_conversion_args(args);
    }

    log::debug!("Using {:?}", slicer.config());
    Ok(slicer)
}

fn output_file_name(prefix: &str, number: usize, format: &str) -> String {
    format!("{}-{}.{}", prefix, number, format.trim_start_matches('.'))
}

fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}_pages", stem))
}

fn cmd_info(
    tools: &ToolOptions,
    input: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = build_slicer(tools, None)?.create(input)?;

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "pages": doc.page_count(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());

    Ok(())
}

fn cmd_export(
    tools: &ToolOptions,
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    format: &str,
    prefix: &str,
    density: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };

    let doc = build_slicer(tools, density)?.create(input)?;

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_dir(input));
    fs::create_dir_all(&output_dir)?;

    let total = selection.indices(doc.page_count()).len();
    if total == 0 {
        println!("{}", "No pages to export".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    // Called right before each page is exported, so the position counts
    // the pages already written.
    let mut started = 0u64;
    let written = doc.export_selection(&selection, |page| {
        let name = output_file_name(prefix, page.number(), format);
        pb.set_position(started);
        pb.set_message(name.clone());
        started += 1;
        output_dir.join(name)
    })?;
    pb.set_position(total as u64);

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Output directory:".green().bold(), output_dir.display());
    let last = written.len().saturating_sub(1);
    for (i, path) in written.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_page(
    tools: &ToolOptions,
    input: &Path,
    number: usize,
    output: &Path,
    density: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = number
        .checked_sub(1)
        .ok_or("Page numbers start at 1")?;

    let doc = build_slicer(tools, density)?.create(input)?;
    doc.page(index)?.export(output)?;

    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfslice".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Export PDF pages as images");
    println!();
    println!("Requires: pdfinfo (poppler-utils), convert (ImageMagick)");
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> ToolOptions {
        ToolOptions {
            pdfinfo: None,
            convert: None,
            config: None,
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("page", 3, "png"), "page-3.png");
        assert_eq!(output_file_name("scan", 12, ".jpg"), "scan-12.jpg");
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("docs/report.pdf")),
            PathBuf::from("report_pages")
        );
    }

    #[test]
    fn test_build_slicer_defaults() {
        let slicer = build_slicer(&no_overrides(), None).unwrap();
        assert_eq!(slicer.metadata_tool(), Path::new("/usr/bin/pdfinfo"));
        assert!(slicer.config().conversion_args().is_empty());
    }

    #[test]
    fn test_build_slicer_overrides() {
        let tools = ToolOptions {
            pdfinfo: Some(PathBuf::from("/opt/bin/pdfinfo")),
            convert: Some(PathBuf::from("/opt/bin/convert")),
            config: None,
        };
        let slicer = build_slicer(&tools, Some(150)).unwrap();
        assert_eq!(slicer.metadata_tool(), Path::new("/opt/bin/pdfinfo"));
        assert_eq!(slicer.conversion_tool(), Path::new("/opt/bin/convert"));
        assert_eq!(slicer.config().conversion_args(), &["-density", "150"]);
    }

    #[test]
    fn test_build_slicer_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdfslice.json");
        fs::write(
            &path,
            r#"{"conversion_tool_path": "/usr/local/bin/convert", "conversion_args": ["-quality", "90"]}"#,
        )
        .unwrap();

        let tools = ToolOptions {
            config: Some(path),
            ..no_overrides()
        };
        let slicer = build_slicer(&tools, Some(72)).unwrap();
        assert_eq!(
            slicer.conversion_tool(),
            Path::new("/usr/local/bin/convert")
        );
        assert_eq!(
            slicer.config().conversion_args(),
            &["-quality", "90", "-density", "72"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_cmd_export_writes_selected_pages() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        fs::write(&input, b"%PDF-1.4\n").unwrap();

        let config = serde_json::json!({
            "metadata_tool_path": "/bin/sh",
            "metadata_args": ["-c", "echo 'Pages: 3'", "pdfinfo"],
            "conversion_tool_path": "/bin/sh",
            "conversion_args": ["-c", "echo image > \"$2\"", "convert"],
        });
        let config_path = dir.path().join("pdfslice.json");
        fs::write(&config_path, config.to_string()).unwrap();

        let tools = ToolOptions {
            config: Some(config_path),
            ..no_overrides()
        };
        let out = dir.path().join("out");
        cmd_export(
            &tools,
            &input,
            Some(out.as_path()),
            Some("2-3"),
            "png",
            "scan",
            None,
        )
        .unwrap();

        assert!(!out.join("scan-1.png").exists());
        assert!(out.join("scan-2.png").exists());
        assert!(out.join("scan-3.png").exists());
    }
}
