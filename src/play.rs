//! Play parsing: turning a normalized line stream into an addressable
//! act/scene structure.
//!
//! The format is forgiving by construction. `ACT <n>` and `Scene <n>`
//! marker lines open structural units, separator rows are dropped, and
//! every other line is verbatim scene content. Anything appearing before
//! the first act, or between an act marker and its first scene marker, is
//! front matter and is discarded. Malformed markers (a number too large to
//! represent, say) are not errors; the line is ordinary content.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::{markup, source};

static ACT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ACT (\d+)$").expect("valid act marker pattern"));

static SCENE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Scene (\d+)$").expect("valid scene marker pattern"));

/// Attribution suffix stripped from titles for display only.
const ATTRIBUTION_SUFFIX: &str = " by William Shakespeare";

/// Act and scene numbers addressing one scene.
pub type SceneKey = (u32, u32);

/// A parsed play: a title and the verbatim text of every scene, addressed
/// by `(act, scene)`. Built once at load time and immutable thereafter.
#[derive(Debug, Clone)]
pub struct Play {
    title: String,
    scenes: BTreeMap<SceneKey, String>,
}

impl Play {
    /// Load and parse a play file.
    pub fn load(path: &Path) -> Result<Self> {
        let lines = source::read_lines(path)?;
        let play = Self::from_lines(&lines);
        debug!(
            path = %path.display(),
            title = play.title(),
            scenes = play.scene_count(),
            "parsed play"
        );
        Ok(play)
    }

    /// Parse a play from its lines. The first line is the title; scenes are
    /// delimited by `ACT <n>` and `Scene <n>` marker lines.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let title = lines
            .first()
            .map(|l| l.as_ref().trim())
            .filter(|t| !t.is_empty())
            .unwrap_or("Unknown Play")
            .to_string();

        let mut scenes = BTreeMap::new();
        let mut current_act: Option<u32> = None;
        let mut open_scene: Option<SceneKey> = None;
        let mut content: Vec<&str> = Vec::new();

        for line in lines {
            let line = line.as_ref();
            let trimmed = line.trim();

            if let Some(act) = marker_number(&ACT_MARKER, trimmed) {
                flush(&mut scenes, open_scene.take(), &mut content);
                current_act = Some(act);
                continue;
            }

            if let Some(scene) = marker_number(&SCENE_MARKER, trimmed) {
                flush(&mut scenes, open_scene.take(), &mut content);
                if let Some(act) = current_act {
                    open_scene = Some((act, scene));
                }
                continue;
            }

            if open_scene.is_some() && !markup::is_separator_row(line) {
                content.push(line);
            }
        }

        flush(&mut scenes, open_scene, &mut content);

        Self { title, scenes }
    }

    /// The title as read from the file.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The title with any trailing attribution stripped. Cosmetic only;
    /// scene lookup is unaffected.
    pub fn display_title(&self) -> &str {
        self.title
            .strip_suffix(ATTRIBUTION_SUFFIX)
            .unwrap_or(&self.title)
    }

    /// The text of one scene. Absence is an expected outcome, not an error.
    pub fn scene(&self, act: u32, scene: u32) -> Option<&str> {
        self.scenes.get(&(act, scene)).map(String::as_str)
    }

    /// Number of scenes parsed.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// True when no scene was found at all.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene numbers grouped by act, both in ascending order.
    pub fn acts(&self) -> BTreeMap<u32, Vec<u32>> {
        let mut acts: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for (act, scene) in self.scenes.keys() {
            acts.entry(*act).or_default().push(*scene);
        }
        acts
    }
}

/// Parse the marker's number, or `None` when the line is not that marker.
/// A digit run that overflows the number type disqualifies the marker and
/// the line falls through to ordinary content.
fn marker_number(marker: &Regex, trimmed: &str) -> Option<u32> {
    marker
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Record the open scene's accumulated content, leaving the accumulator
/// empty for the next scene.
fn flush(scenes: &mut BTreeMap<SceneKey, String>, open_scene: Option<SceneKey>, content: &mut Vec<&str>) {
    if let Some(key) = open_scene {
        scenes.insert(key, content.join("\n"));
    }
    content.clear();
}
