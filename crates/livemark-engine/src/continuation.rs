//! # Block Continuation Controller
//!
//! Decides what Enter does for the current block when no block trigger fired
//! on the same keystroke. The decision is a pure function of the block; the
//! editor carries it out.

use crate::model::{Block, BlockKind};

/// What Enter should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterPlan {
    /// Split at the caret into a new block of this kind.
    Continue { kind: BlockKind, indent: usize },
    /// Split at the caret into a new `Normal` block (headers never continue).
    Fresh,
    /// Turn the current block back into `Normal`; no new block.
    BreakOut,
    /// Plain newline: split into a new `Normal` block, optionally carrying the
    /// current line's leading whitespace.
    Newline { carry_indent: bool },
}

impl EnterPlan {
    /// Whether the plan is special handling rather than a plain newline.
    pub fn is_claimed(self) -> bool {
        !matches!(self, EnterPlan::Newline { .. })
    }
}

pub fn plan(block: &Block) -> EnterPlan {
    match block.kind() {
        BlockKind::BulletList | BlockKind::NumberedList { .. } if block.is_blank() => {
            EnterPlan::Newline {
                carry_indent: false,
            }
        }
        BlockKind::BulletList => EnterPlan::Continue {
            kind: BlockKind::BulletList,
            indent: block.indent(),
        },
        // The ordinal is read from the current line, not a running counter, so
        // a list edited out of order continues from whatever this line shows.
        BlockKind::NumberedList { ordinal } => EnterPlan::Continue {
            kind: BlockKind::NumberedList {
                ordinal: ordinal.saturating_add(1),
            },
            indent: block.indent(),
        },
        BlockKind::Header { .. } => EnterPlan::Fresh,
        BlockKind::Quote if block.is_blank() => EnterPlan::BreakOut,
        BlockKind::Quote => EnterPlan::Continue {
            kind: BlockKind::Quote,
            indent: 0,
        },
        BlockKind::Normal => EnterPlan::Newline { carry_indent: true },
    }
}
