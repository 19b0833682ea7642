//! Terminal rendering of scenes and dialogue units.
//!
//! Styling follows the reading conventions for printed scripts: character
//! names in bold, bracketed stage directions in italic. Names inside a
//! stage direction take the direction's style, not their own.

use crossterm::style::Stylize;
use std::fmt::Write;
use std::ops::Range;

use crate::dialogue::DialogueUnit;
use crate::markup;
use crate::play::Play;

const PANEL_WIDTH: usize = 78;

enum SpanKind {
    Direction,
    Name,
}

/// Apply inline styling to a block of scene text.
pub fn styled_text(text: &str) -> String {
    let mut spans: Vec<(Range<usize>, SpanKind)> = markup::bracket_spans(text)
        .into_iter()
        .map(|r| (r, SpanKind::Direction))
        .collect();
    spans.extend(
        markup::character_name_spans(text)
            .into_iter()
            .map(|r| (r, SpanKind::Name)),
    );
    spans.sort_by_key(|(r, _)| r.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (range, kind) in spans {
        out.push_str(&text[cursor..range.start]);
        let segment = &text[range.clone()];
        match kind {
            SpanKind::Direction => {
                let _ = write!(out, "{}", segment.italic().magenta());
            }
            SpanKind::Name => {
                let _ = write!(out, "{}", segment.bold().dark_yellow());
            }
        }
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// A framed scene view: header rule, styled body, closing rule.
pub fn scene_panel(title: &str, act: u32, scene: u32, body: &str) -> String {
    let header = format!("{title} - Act {act}, Scene {scene}");
    let mut out = String::new();
    let _ = writeln!(out, "{}", top_rule(&header));
    for line in body.trim().split('\n') {
        let _ = writeln!(out, "  {}", styled_text(line));
    }
    let _ = write!(out, "{}", "─".repeat(PANEL_WIDTH).dark_cyan());
    out
}

/// One dialogue unit with a step counter and a left rule.
pub fn dialogue_frame(
    title: &str,
    act: u32,
    scene: u32,
    index: usize,
    total: usize,
    unit: &DialogueUnit,
) -> String {
    let header = format!(
        "{title} - Act {act}, Scene {scene} - Dialogue {}/{total}",
        index + 1
    );
    let mut out = String::new();
    let _ = writeln!(out, "{}", header.bold().cyan());
    for line in &unit.lines {
        let _ = writeln!(out, "{} {}", "│".cyan(), styled_text(line));
    }
    out
}

/// Notice for a scene address that does not exist, with the inventory of
/// scenes that do.
pub fn not_found(act: u32, scene: u32, play: &Play) -> String {
    format!(
        "{}\n{}",
        format!("Act {act}, Scene {scene} not found!").red().bold(),
        scene_inventory(play)
    )
}

/// Human-readable act and scene inventory.
pub fn scene_inventory(play: &Play) -> String {
    let mut out = String::from("Available scenes:\n");
    for (act, scenes) in play.acts() {
        let line = match (scenes.first(), scenes.last()) {
            (Some(first), Some(last)) if first != last => {
                format!("  Act {act}: Scenes {first}-{last}")
            }
            (Some(only), _) => format!("  Act {act}: Scene {only}"),
            _ => continue,
        };
        let _ = writeln!(out, "{line}");
    }
    out.trim_end().to_string()
}

/// Welcome banner shown after a play is selected.
pub fn banner(title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", top_rule(title));
    let _ = writeln!(out, "  {}", "Interactive Scene Reader".dim());
    let _ = writeln!(out);
    let _ = writeln!(out, "  Enter {} to read Act x, Scene y", "x.y".yellow());
    let _ = writeln!(out, "  Enter {} to see available scenes", "list".yellow());
    let _ = writeln!(out, "  Enter {} to toggle dialogue-by-dialogue mode", "mode".yellow());
    let _ = writeln!(out, "  Enter {} to choose another play", "home".yellow());
    let _ = writeln!(out, "  Enter {} or {} to leave", "quit".yellow(), "exit".yellow());
    let _ = write!(out, "{}", "─".repeat(PANEL_WIDTH).dark_cyan());
    out
}

fn top_rule(header: &str) -> String {
    let fill = PANEL_WIDTH.saturating_sub(header.chars().count() + 4);
    format!(
        "{} {} {}",
        "──".dark_cyan(),
        header.bold().cyan(),
        "─".repeat(fill).dark_cyan()
    )
}
