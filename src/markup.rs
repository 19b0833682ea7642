//! Line-level pattern predicates shared by the parser, the dialogue
//! segmenter, and the presentation shell.
//!
//! Everything here is pure pattern matching over a single line or text
//! block. The structural patterns (act/scene markers, separator rows) live
//! with their consumers; this module owns the two predicates both the
//! segmenter and the renderer need, plus the span finders the renderer uses
//! for inline styling.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// One or more all-caps tokens (2+ letters each, single-space separated),
/// optionally followed by further text on the same line.
static CHARACTER_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,}( [A-Z]{2,})*(\s.*)?$").expect("valid header pattern"));

/// A visual separator row: nothing but `=` characters.
static SEPARATOR_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^=+$").expect("valid separator pattern"));

/// A bracketed stage direction, possibly spanning line breaks.
static STAGE_DIRECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("valid stage direction pattern"));

/// A standalone all-caps word of 2+ letters.
static CAPS_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("valid caps word pattern"));

/// Returns true when the trimmed line announces a speaking character.
///
/// A speech header is one or more whitespace-separated tokens of two or
/// more consecutive uppercase letters, e.g. `HAMLET` or `FIRST CITIZEN`,
/// optionally followed by ordinary text (`MENENIUS Come, come, you are...`).
pub fn is_character_header(line: &str) -> bool {
    CHARACTER_HEADER.is_match(line.trim())
}

/// Returns true when the trimmed line is purely a run of `=` characters.
pub fn is_separator_row(line: &str) -> bool {
    SEPARATOR_ROW.is_match(line.trim())
}

/// Byte ranges of bracketed stage directions within `text`.
pub fn bracket_spans(text: &str) -> Vec<Range<usize>> {
    STAGE_DIRECTION.find_iter(text).map(|m| m.range()).collect()
}

/// Byte ranges of all-caps character names within `text`, excluding any
/// that fall inside a bracketed stage direction.
pub fn character_name_spans(text: &str) -> Vec<Range<usize>> {
    let brackets = bracket_spans(text);
    CAPS_WORD
        .find_iter(text)
        .map(|m| m.range())
        .filter(|r| !brackets.iter().any(|b| b.start <= r.start && r.end <= b.end))
        .collect()
}
