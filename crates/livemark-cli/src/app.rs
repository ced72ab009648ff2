use std::{
    io,
    path::PathBuf,
    process::{Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use livemark_engine::{
    Caret, ClickAction, Document, Editor, EditorHost, EditorOptions, Key, Motion, StyleRegistry,
    TextStats, serialize,
};
use ratatui::layout::Rect;

/// Receives editor notifications for the status bar.
#[derive(Debug, Default)]
pub struct StatusHost {
    pub stats: TextStats,
    pub caret: Caret,
    pub modified: bool,
    /// Text as last loaded or saved, to tell whether there are unsaved changes.
    saved: String,
}

impl EditorHost for StatusHost {
    fn text_changed(&mut self, doc: &Document) {
        let text = serialize(doc);
        self.stats = TextStats::of(&text);
        self.modified = text != self.saved;
    }

    fn caret_changed(&mut self, caret: Caret) {
        self.caret = caret;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub path: PathBuf,
    pub editor: Editor<StatusHost>,
    /// One-off message shown in the status bar until the next keystroke.
    pub message: Option<String>,
    /// First block shown in the editor pane.
    pub scroll: usize,
    /// Inner area of the editor pane from the last draw, for mouse hits.
    pub viewport: Rect,
}

impl App {
    pub fn new(path: PathBuf, registry: StyleRegistry, options: EditorOptions) -> Result<Self> {
        let mut editor = Editor::new(registry, options, StatusHost::default());

        let text = if path.exists() {
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        } else {
            String::new()
        };
        editor.host_mut().saved = text.clone();
        editor.set_plain_text(&text);
        editor.set_caret(Caret::default());

        Ok(Self {
            path,
            editor,
            message: None,
            scroll: 0,
            viewport: Rect::default(),
        })
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        self.message = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => return Flow::Quit,
                KeyCode::Char('s') => self.save(),
                KeyCode::Char('t') => {
                    let dark = !self.editor.registry().is_dark();
                    self.editor.apply_theme(dark);
                }
                _ => {}
            }
            return Flow::Continue;
        }

        if let Some(key) = map_key(key) {
            self.editor.handle_key(key);
        }
        Flow::Continue
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some((block, offset)) = self.hit_test(mouse.column, mouse.row) else {
            return;
        };
        let ctrl = mouse.modifiers.contains(KeyModifiers::CONTROL);

        match self.editor.click(block, offset, ctrl) {
            Some(ClickAction::OpenUrl(url)) => {
                self.message = Some(match open_url(&url) {
                    Ok(()) => format!("Opened {url}"),
                    Err(e) => format!("Could not open {url}: {e}"),
                });
            }
            Some(ClickAction::RevealSpoiler) | None => {}
        }
    }

    fn save(&mut self) {
        let text = self.editor.get_plain_text();
        match std::fs::write(&self.path, &text) {
            Ok(()) => {
                let host = self.editor.host_mut();
                host.saved = text;
                host.modified = false;
                self.message = Some(format!("Saved {}", self.path.display()));
            }
            Err(e) => self.message = Some(format!("Save failed: {e}")),
        }
    }

    /// Maps a terminal cell to (block index, byte offset) in the document.
    fn hit_test(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.viewport;
        if !(area.x..area.x + area.width).contains(&column)
            || !(area.y..area.y + area.height).contains(&row)
        {
            return None;
        }

        let index = self.scroll + usize::from(row - area.y);
        let lines = self.editor.render();
        let line = lines.get(index)?;
        let column = usize::from(column - area.x).checked_sub(crate::ui::prefix_width(line))?;

        let text: String = line.runs.iter().map(|r| r.text.as_str()).collect();
        let offset = text
            .char_indices()
            .nth(column)
            .map_or(text.len(), |(i, _)| i);
        Some((index, offset))
    }
}

/// Translates a terminal key into an editor key. Control chords are handled by
/// the app, not the editor.
pub fn map_key(key: KeyEvent) -> Option<Key> {
    let mapped = match key.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Move(Motion::Left),
        KeyCode::Right => Key::Move(Motion::Right),
        KeyCode::Up => Key::Move(Motion::Up),
        KeyCode::Down => Key::Move(Motion::Down),
        KeyCode::Home => Key::Move(Motion::Home),
        KeyCode::End => Key::Move(Motion::End),
        _ => return None,
    };
    Some(mapped)
}

fn open_url(url: &str) -> io::Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };
    launch(opener, url).map(|_| ())
}

/// Starts `program` detached from the terminal and waits for it on a
/// background thread so it never lingers as a zombie.
fn launch(program: &str, arg: &str) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(program)
        .arg(arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || child.wait()))
}
