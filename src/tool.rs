//! External tool invocation.
//!
//! Every call spawns one child process, blocks until it exits and returns
//! its captured output. No shell is involved: each argument reaches the
//! tool as a single argv entry, so paths never need quoting.

use crate::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

/// Run `program` with `args` and return its combined stdout and stderr.
///
/// A non-zero exit status, or a failure to spawn the program at all, is
/// reported as [`Error::ToolFailed`] carrying whatever text is available.
pub fn run<I, S>(program: &Path, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = args
        .into_iter()
        .map(|arg| arg.as_ref().to_os_string())
        .collect();

    log::debug!("Running {} {:?}", program.display(), args);

    let output = Command::new(program)
        .args(&args)
        .output()
        .map_err(|e| Error::ToolFailed {
            tool: tool_name(program),
            output: format!("failed to run {}: {}", program.display(), e),
        })?;

    let text = combine_output(&output.stdout, &output.stderr);

    if !output.status.success() {
        log::debug!("{} exited with {}", program.display(), output.status);
        return Err(Error::ToolFailed {
            tool: tool_name(program),
            output: text,
        });
    }

    Ok(text)
}

/// Short name of a tool for error messages (`/usr/bin/pdfinfo` -> `pdfinfo`).
pub fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);

    stdout
        .lines()
        .chain(stderr.lines())
        .collect::<Vec<_>>()
        .join("\n")
}
