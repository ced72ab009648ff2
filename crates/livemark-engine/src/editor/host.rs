use std::time::Duration;

use crate::{debounce::Debouncer, model::Document};

use super::Caret;

/// Receives the editor's notifications.
///
/// Both methods default to doing nothing so hosts only implement what they
/// display or persist.
pub trait EditorHost {
    /// The document text changed, either from input or from a styling pass.
    fn text_changed(&mut self, _doc: &Document) {}

    fn caret_changed(&mut self, _caret: Caret) {}
}

/// A host that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl EditorHost for NoopHost {}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Quiet period before an inline scan runs.
    pub debounce: Duration,
    /// Glyph drawn for bullet list items.
    pub bullet_glyph: char,
    /// Carry a Normal line's leading whitespace onto the next line on Enter.
    pub carry_indent: bool,
    /// Spaces added or removed by Tab / Shift+Tab on list items.
    pub list_indent: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            debounce: Debouncer::DEFAULT_INTERVAL,
            bullet_glyph: '•',
            carry_indent: true,
            list_indent: 2,
        }
    }
}
