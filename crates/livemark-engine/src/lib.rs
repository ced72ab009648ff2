//! # livemark-engine
//!
//! A live decoration engine for a small markdown-like markup. As the user
//! types, block markers (`# `, `- `, `1. `, `> `) and inline markers
//! (`**bold**`, `` `code` ``, `||spoiler||`, ...) are consumed and turned into
//! formatting, while the document keeps enough information to reproduce the
//! exact plain markup on demand.
//!
//! ## Data flow
//!
//! ```text
//! keystroke ─► triggers / continuation ─► Block model ─► debounce ─► inline scanner
//!                                              │
//!                                              ├─► render (StyleRegistry colors)
//!                                              └─► serializer ─► canonical text
//! ```
//!
//! ## Modules
//!
//! - **`model`**: `Document`, `Block`, `BlockKind`, `InlineSpan`, `StyleTag`
//! - **`syntax`**: block marker knowledge shared by triggers and serializer
//! - **`triggers`**: Space/Enter block-trigger detector
//! - **`continuation`**: what Enter does for each block kind
//! - **`inline`**: the inline-trigger scanner
//! - **`serializer`**: `Document` to canonical text and back
//! - **`debounce`**: reset-on-edit timer and injectable `Clock`
//! - **`style`**: `StyleRegistry` with dark and light palettes
//! - **`render`**: styled runs for hosts to draw
//! - **`editor`**: the `Editor` facade hosts talk to

pub mod continuation;
pub mod debounce;
pub mod editor;
pub mod inline;
pub mod model;
pub mod render;
pub mod serializer;
pub mod style;
pub mod syntax;
pub mod triggers;

pub use debounce::{Clock, Debouncer, ManualClock, SystemClock};
pub use editor::{
    Caret, ClickAction, Editor, EditorHost, EditorOptions, Key, KeyOutcome, Motion, NoopHost,
    TextStats,
};
pub use model::{Block, BlockId, BlockKind, Document, InlineSpan, StyleTag};
pub use render::{RenderedLine, RenderedRun};
pub use serializer::{parse, serialize};
pub use style::{ColorParseError, Palette, Rgb, Role, StyleRegistry};
