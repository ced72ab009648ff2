//! # Block-Trigger Detector
//!
//! One decision per Space or Enter keystroke. The text from the start of the
//! current line up to the caret is matched against the block markers in
//! [`crate::syntax`]; on a match the marker is stripped and the block is
//! re-tagged.
//!
//! | line start to caret      | resulting kind          |
//! |--------------------------|-------------------------|
//! | `#` x 1..=6              | `Header { level }`      |
//! | spaces + `-`, `*`, `+`   | `BulletList`            |
//! | spaces + digits + `.`    | `NumberedList`          |
//! | `>`                      | `Quote`                 |
//!
//! A fired Space is swallowed. Enter is never swallowed here: the editor
//! still performs the line break afterwards. No match is the ordinary "no
//! markup here" case and is silent.

use crate::{
    model::{Block, BlockKind},
    syntax::{self, Marker},
};

/// The keys that can fire a block trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKey {
    Space,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A rule fired and the block was re-tagged.
    Fired {
        marker: Marker,
        /// Whether the triggering key must be dropped instead of inserted.
        swallow_key: bool,
    },
    /// Nothing matched; the key passes through unmodified.
    NoMatch,
}

impl TriggerOutcome {
    pub fn fired(self) -> bool {
        matches!(self, TriggerOutcome::Fired { .. })
    }
}

/// Checks whether the text before `caret` in `block` is a block trigger.
///
/// Only `Normal` blocks can be re-tagged: a list or quote line already had its
/// marker consumed.
pub fn detect(block: &Block, caret: usize) -> Option<Marker> {
    if block.kind() != BlockKind::Normal {
        return None;
    }
    let text = block.text();
    let Some(prefix) = text.get(..caret) else {
        log::debug!("caret {caret} outside block text of len {}", text.len());
        return None;
    };
    syntax::match_trigger(prefix)
}

/// Runs the detector for `key` and applies a match to `block`.
///
/// On a match everything before the caret is removed, so the caret belongs
/// at offset 0 afterwards.
pub fn on_key(block: &mut Block, caret: usize, key: TriggerKey) -> TriggerOutcome {
    let Some(marker) = detect(block, caret) else {
        return TriggerOutcome::NoMatch;
    };

    block.remove_range(0, caret);
    block.set_kind(marker.kind);
    block.set_indent(marker.indent);
    log::debug!("block trigger {:?} on {key:?}", marker.kind);

    TriggerOutcome::Fired {
        marker,
        swallow_key: key == TriggerKey::Space,
    }
}
