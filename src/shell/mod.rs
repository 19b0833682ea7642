//! The interactive navigation shell.
//!
//! A blocking read-eval loop over a directory of normalized plays: pick a
//! play from a menu, then address scenes as `act.scene`, list the
//! inventory, toggle dialogue-by-dialogue stepping, or return home to pick
//! another play. The shell is purely a consumer of the parsed data model;
//! nothing here feeds back into parsing.

mod editor;
mod render;

pub use editor::{LineEditor, ReadResult, RustylineEditor};

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tracing::debug;

use crate::play::Play;
use crate::{dialogue, discovery, source};

static SCENE_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.(\d+)$").expect("valid scene address pattern"));

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Home,
    List,
    Mode,
    Help,
    Scene(u32, u32),
    Empty,
    Unknown(String),
}

/// Parse one line of input. Matching is case insensitive and whitespace
/// tolerant; a scene address out of numeric range is unknown input, not an
/// error.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" => Command::Empty,
        "q" | "quit" | "exit" => Command::Quit,
        "home" => Command::Home,
        "list" => Command::List,
        "mode" => Command::Mode,
        "help" => Command::Help,
        other => match SCENE_ADDRESS.captures(other) {
            Some(caps) => {
                let act = caps.get(1).and_then(|m| m.as_str().parse().ok());
                let scene = caps.get(2).and_then(|m| m.as_str().parse().ok());
                match (act, scene) {
                    (Some(act), Some(scene)) => Command::Scene(act, scene),
                    _ => Command::Unknown(other.to_string()),
                }
            }
            None => Command::Unknown(other.to_string()),
        },
    }
}

/// The interactive play reader.
pub struct Shell<E: LineEditor = RustylineEditor> {
    editor: E,
    plays_dir: PathBuf,
    dialogue_mode: bool,
}

impl Shell<RustylineEditor> {
    /// Creates a shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(plays_dir: PathBuf) -> Result<Self> {
        Ok(Self::with_editor(RustylineEditor::new()?, plays_dir))
    }
}

impl<E: LineEditor> Shell<E> {
    /// Creates a shell with the given editor.
    pub fn with_editor(editor: E, plays_dir: PathBuf) -> Self {
        Self {
            editor,
            plays_dir,
            dialogue_mode: false,
        }
    }

    /// Runs the shell until the user quits or no plays are available.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(play) = self.select_play()? else {
                break;
            };
            println!("\n{}\n", render::banner(play.display_title()));
            if !self.navigate(&play)? {
                break;
            }
        }
        println!("\nGoodbye!");
        Ok(())
    }

    /// Scene navigation for one play. Returns `Ok(true)` to go back to the
    /// play menu, `Ok(false)` to leave the shell.
    fn navigate(&mut self, play: &Play) -> Result<bool> {
        loop {
            let prompt = if self.dialogue_mode {
                "(dialogue mode) act.scene> "
            } else {
                "act.scene> "
            };
            let input = match self.editor.read_line(prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted | ReadResult::Eof => return Ok(false),
            };
            if !input.trim().is_empty() {
                self.editor.add_history(&input);
            }

            match parse_command(&input) {
                Command::Empty => {}
                Command::Quit => return Ok(false),
                Command::Home => return Ok(true),
                Command::List => println!("{}", render::scene_inventory(play)),
                Command::Mode => {
                    self.dialogue_mode = !self.dialogue_mode;
                    let status = if self.dialogue_mode { "enabled" } else { "disabled" };
                    println!("Dialogue-by-dialogue mode {status}");
                }
                Command::Help => println!("{}", render::banner(play.display_title())),
                Command::Scene(act, scene) => self.show_scene(play, act, scene)?,
                Command::Unknown(_) => {
                    println!("Invalid input. Enter a scene as x.y (e.g. 1.2 for Act 1, Scene 2)");
                }
            }
        }
    }

    fn show_scene(&mut self, play: &Play, act: u32, scene: u32) -> Result<()> {
        debug!(act, scene, dialogue_mode = self.dialogue_mode, "showing scene");
        let Some(text) = play.scene(act, scene) else {
            println!("{}", render::not_found(act, scene, play));
            return Ok(());
        };

        if self.dialogue_mode {
            self.walk_dialogues(play, act, scene, text)
        } else {
            println!("{}", render::scene_panel(play.display_title(), act, scene, text));
            Ok(())
        }
    }

    /// Step through a scene one speech at a time: `n` forward, `p` back,
    /// `q` out. Stepping past the last speech ends the walk.
    fn walk_dialogues(&mut self, play: &Play, act: u32, scene: u32, text: &str) -> Result<()> {
        let units = dialogue::segment(text);
        if units.is_empty() {
            println!("No dialogues found in this scene.");
            return Ok(());
        }

        let mut index = 0;
        loop {
            println!(
                "{}",
                render::dialogue_frame(play.display_title(), act, scene, index, units.len(), &units[index])
            );
            let action = match self.editor.read_line("(n/p/q)> ")? {
                ReadResult::Line(line) => line.trim().to_lowercase(),
                ReadResult::Interrupted | ReadResult::Eof => return Ok(()),
            };
            match action.as_str() {
                "n" => {
                    if index + 1 < units.len() {
                        index += 1;
                    } else {
                        println!("End of scene.");
                        return Ok(());
                    }
                }
                "p" => index = index.saturating_sub(1),
                "q" => return Ok(()),
                _ => {}
            }
        }
    }

    /// Play selection menu. Returns `Ok(None)` when the user quits or
    /// nothing is available to read.
    fn select_play(&mut self) -> Result<Option<Play>> {
        let files = discovery::find_text_files(&self.plays_dir)?;
        if files.is_empty() {
            println!("No plays found in {}", self.plays_dir.display());
            return Ok(None);
        }

        println!("Available Plays:");
        for (index, path) in files.iter().enumerate() {
            let title = source::read_first_line(path).unwrap_or_else(|_| {
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string())
            });
            println!("  {}: {title}", index + 1);
        }

        loop {
            let input = match self.editor.read_line("Select a play (number, or 'q' to quit)> ")? {
                ReadResult::Line(line) => line.trim().to_lowercase(),
                ReadResult::Interrupted => continue,
                ReadResult::Eof => return Ok(None),
            };
            match input.as_str() {
                "q" | "quit" | "exit" => return Ok(None),
                _ => {}
            }
            let Ok(selection) = input.parse::<usize>() else {
                println!("Invalid input.");
                continue;
            };
            if selection == 0 || selection > files.len() {
                println!("Invalid selection.");
                continue;
            }
            match Play::load(&files[selection - 1]) {
                Ok(play) => return Ok(Some(play)),
                Err(e) => println!("Could not load play: {e:#}"),
            }
        }
    }
}
