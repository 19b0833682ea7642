//! Line normalization for raw play texts.
//!
//! Source texts arrive with verse lines soft-wrapped by the publisher: a
//! sentence continues on the next line starting with a lowercase letter.
//! Normalization merges those continuations back into their base line and
//! collapses long blank runs, producing the one-line-per-statement format
//! the play parser expects.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

use crate::source;

/// Three or more consecutive newlines, i.e. two or more blank lines.
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank run pattern"));

/// Suffix spliced into derived output filenames.
const OUTPUT_MARKER: &str = "folger_mod";

/// A continuation is a non-empty line whose first character is lowercase.
/// The first line of a document is never a continuation regardless of case.
fn is_continuation(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_lowercase)
}

/// Merge soft-wrapped continuation lines into their base line and collapse
/// runs of blank lines down to at most one.
///
/// A single forward pass: each continuation is appended, space-joined, to
/// the previous output line. The base line may itself be blank; merging
/// still happens and yields a line with a leading space, matching the
/// space-join contract. Normalization is idempotent.
pub fn normalize_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if index > 0 && is_continuation(line) {
            if let Some(base) = merged.last_mut() {
                base.push(' ');
                base.push_str(line);
                continue;
            }
        }
        merged.push(line.to_string());
    }

    if merged.is_empty() {
        return merged;
    }

    collapse_blank_runs(&merged.join("\n"))
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// Replace every run of three or more newlines with exactly two, leaving
/// shorter runs untouched.
pub fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

/// Normalize a whole file, returning the joined text for the caller to
/// write or print. The text carries no trailing newline.
pub fn normalize_path(input: &Path) -> Result<String> {
    let lines = source::read_lines(input)?;
    let normalized = normalize_lines(&lines);
    debug!(
        input = %input.display(),
        lines_in = lines.len(),
        lines_out = normalized.len(),
        "normalized source file"
    );
    Ok(normalized.join("\n"))
}

/// Derive the output filename for a normalized text.
///
/// The file stem is searched for the first `TXT` marker (ASCII case
/// insensitive). When present, everything from the marker onward is
/// replaced by `folger_mod` and the original extension (`.txt` when the
/// input had none): `hamlet_TXT_FolgerShakespeare.txt` becomes
/// `hamlet_folger_mod.txt`. Otherwise `_folger_mod` is appended to the
/// stem: `macbeth.txt` becomes `macbeth_folger_mod.txt`.
pub fn output_file_name(input_name: &str) -> String {
    let path = Path::new(input_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(input_name);
    let extension = path.extension().and_then(|e| e.to_str());

    match find_txt_marker(stem) {
        Some(pos) => {
            let extension = extension.map_or_else(|| ".txt".to_string(), |e| format!(".{e}"));
            format!("{}{OUTPUT_MARKER}{extension}", &stem[..pos])
        }
        None => {
            let extension = extension.map_or_else(String::new, |e| format!(".{e}"));
            format!("{stem}_{OUTPUT_MARKER}{extension}")
        }
    }
}

/// Byte offset of the first ASCII-case-insensitive `txt` within the stem.
fn find_txt_marker(stem: &str) -> Option<usize> {
    stem.as_bytes()
        .windows(3)
        .position(|window| window.eq_ignore_ascii_case(b"txt"))
}
