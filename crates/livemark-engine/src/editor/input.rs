/// Caret position: block index plus byte offset into that block's visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caret {
    pub block: usize,
    pub offset: usize,
}

impl Caret {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// Keys the editor intercepts. Printable input arrives as [`Key::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Tab,
    /// Shift+Tab.
    BackTab,
    Backspace,
    Delete,
    Move(Motion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// Whether a rule claimed the key or it got default text-input behaviour.
///
/// The engine applies the effect either way; hosts that share the key with
/// other bindings can use this to decide whether to pass it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Claimed,
    Default,
}

impl KeyOutcome {
    pub fn is_claimed(self) -> bool {
        self == KeyOutcome::Claimed
    }
}

/// What a click asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    OpenUrl(String),
    RevealSpoiler,
}

/// Word and char counts of the canonical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub words: usize,
    pub chars: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            words: text.split_whitespace().count(),
            chars: text.chars().count(),
        }
    }
}
