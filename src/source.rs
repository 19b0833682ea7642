//! Line-oriented file access.
//!
//! Every pipeline stage works on logical lines, so reading strips the line
//! terminator (`\n` or `\r\n`) up front. All I/O is blocking and completes
//! before returning; the file handle is scoped to the call.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Read a text file into logical lines with terminators stripped.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let mut line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }

    debug!(path = %path.display(), lines = lines.len(), "read source file");
    Ok(lines)
}

/// Read only the first line of a file, terminator stripped.
///
/// Used by the play menu to show titles without loading whole plays.
pub fn read_first_line(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file.take(8 * 1024));

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Write text to a file, creating parent directories as needed.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
