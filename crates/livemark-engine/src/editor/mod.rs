//! # Editor
//!
//! [`Editor`] owns a [`Document`], a [`Caret`] and the injected
//! [`StyleRegistry`]. Hosts feed it keystrokes and call [`Editor::tick`] from
//! their event loop; it answers with notifications through [`EditorHost`].
//!
//! ## Keystroke flow
//!
//! 1. Space and Enter go to the block-trigger detector first
//! 2. Enter without a trigger goes to the continuation planner
//! 3. Anything else is a raw edit
//! 4. Every edit marks the touched blocks dirty and restarts the debounce timer
//! 5. When the timer fires, `tick` rescans the dirty blocks and the caret block
//!
//! ## Single writer
//!
//! While a scan pass restyles blocks the `styling` flag is set. Text-change
//! notifications raised during that window reach the host but are not
//! treated as input: they neither mark blocks dirty nor restart the timer, so
//! a pass can never schedule another pass.
//!
//! ## Modules
//!
//! - **`input`**: `Key`, `Motion`, `Caret`, `KeyOutcome`, `ClickAction`, `TextStats`
//! - **`host`**: `EditorHost`, `NoopHost`, `EditorOptions`

mod host;
mod input;


use std::{collections::HashSet, time::Duration};

pub use host::{EditorHost, EditorOptions, NoopHost};
pub use input::{Caret, ClickAction, Key, KeyOutcome, Motion, TextStats};

use crate::{
    continuation::{self, EnterPlan},
    debounce::{Clock, Debouncer, SystemClock},
    inline,
    model::{Block, BlockId, BlockKind, Document, StyleTag},
    render::{self, RenderedLine},
    serializer,
    style::StyleRegistry,
    triggers::{self, TriggerKey, TriggerOutcome},
};

pub struct Editor<H: EditorHost = NoopHost> {
    doc: Document,
    caret: Caret,
    registry: StyleRegistry,
    options: EditorOptions,
    debounce: Debouncer,
    clock: Box<dyn Clock>,
    host: H,
    /// Blocks edited since the last scan pass.
    dirty: HashSet<BlockId>,
    styling: bool,
    /// Spoilers uncovered by a click, as (block, span index).
    revealed: HashSet<(BlockId, usize)>,
    scan_passes: u64,
}

impl Default for Editor<NoopHost> {
    fn default() -> Self {
        Editor::new(StyleRegistry::default(), EditorOptions::default(), NoopHost)
    }
}

impl<H: EditorHost> Editor<H> {
    pub fn new(registry: StyleRegistry, options: EditorOptions, host: H) -> Self {
        let debounce = Debouncer::new(options.debounce);
        Self {
            doc: Document::new(),
            caret: Caret::default(),
            registry,
            options,
            debounce,
            clock: Box::new(SystemClock),
            host,
            dirty: HashSet::new(),
            styling: false,
            revealed: HashSet::new(),
            scan_passes: 0,
        }
    }

    /// Replaces the clock the debounce timer reads.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Number of inline scan passes run so far.
    pub fn scan_passes(&self) -> u64 {
        self.scan_passes
    }

    pub fn is_scan_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// How long until the pending scan is due, if one is pending.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.debounce.remaining(self.clock.now())
    }

    /// Moves the caret, clamping it into the document.
    pub fn set_caret(&mut self, caret: Caret) {
        let block = caret.block.min(self.doc.len().saturating_sub(1));
        let offset = self
            .doc
            .block(block)
            .map_or(0, |b| b.clamp_offset(caret.offset));
        self.caret = Caret::new(block, offset);
        self.caret_moved();
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Space | Key::Char(' ') => self.space(),
            Key::Enter | Key::Char('\n') => self.enter(),
            Key::Tab | Key::Char('\t') => self.tab(),
            Key::BackTab => self.back_tab(),
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Char(c) => {
                let mut buf = [0; 4];
                self.insert_at_caret(c.encode_utf8(&mut buf));
                KeyOutcome::Default
            }
            Key::Move(motion) => {
                self.move_caret(motion);
                KeyOutcome::Default
            }
        }
    }

    /// Inserts text at the caret. Each `\n` acts as an Enter keystroke.
    pub fn insert_text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.enter();
            }
            self.insert_at_caret(line);
        }
    }

    /// Runs the inline scan if the debounce timer has fired. Returns whether a
    /// pass ran.
    pub fn tick(&mut self) -> bool {
        if self.styling || !self.debounce.poll(self.clock.now()) {
            return false;
        }
        self.scan_dirty();
        true
    }

    /// Runs a pending scan now instead of waiting for the timer.
    pub fn flush(&mut self) -> bool {
        if self.styling || !self.debounce.is_pending() {
            return false;
        }
        self.debounce.cancel();
        self.scan_dirty();
        true
    }

    /// Switches palette and restyles every block immediately.
    pub fn apply_theme(&mut self, is_dark: bool) {
        self.registry.set_dark(is_dark);
        self.debounce.cancel();
        self.dirty.clear();
        log::debug!("applying {} theme", if is_dark { "dark" } else { "light" });

        let all = self.doc.iter().map(Block::id).collect();
        self.scan_pass(all);
    }

    /// Canonical plain-markup text of the whole document.
    pub fn get_plain_text(&self) -> String {
        serializer::serialize(&self.doc)
    }

    /// Replaces the document wholesale. The caret moves to the end.
    pub fn set_plain_text(&mut self, text: &str) {
        self.doc = serializer::parse(text);
        self.dirty.clear();
        self.revealed.clear();
        self.debounce.cancel();

        let last = self.doc.len().saturating_sub(1);
        let end = self.doc.block(last).map_or(0, Block::text_len);
        self.caret = Caret::new(last, end);

        self.host.text_changed(&self.doc);
        self.caret_moved();
    }

    /// Places the caret at the click and reports what the click should do.
    ///
    /// Ctrl+click on a link opens it; any click on a covered spoiler reveals
    /// it until its block is restyled.
    pub fn click(&mut self, block: usize, offset: usize, ctrl: bool) -> Option<ClickAction> {
        self.set_caret(Caret::new(block, offset));

        let target = self.doc.block(self.caret.block)?;
        let (index, _) = target.span_at(self.caret.offset)?;
        let span = &target.spans()[index];
        match span.tag {
            Some(StyleTag::Url) if ctrl => Some(ClickAction::OpenUrl(span.text.clone())),
            Some(StyleTag::Spoiler) => self
                .revealed
                .insert((target.id(), index))
                .then_some(ClickAction::RevealSpoiler),
            _ => None,
        }
    }

    pub fn render(&self) -> Vec<RenderedLine> {
        render::render_document(
            &self.doc,
            &self.registry,
            self.options.bullet_glyph,
            &self.revealed,
        )
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.get_plain_text())
    }

    // Notifications

    fn text_changed(&mut self, touched: &[BlockId]) {
        self.host.text_changed(&self.doc);
        if self.styling {
            return;
        }
        self.dirty.extend(touched.iter().copied());
        // Span indices shift under edits, so reveals cannot follow them
        self.revealed.retain(|(b, _)| !touched.contains(b));
        self.debounce.touch(self.clock.now());
    }

    fn caret_moved(&mut self) {
        self.host.caret_changed(self.caret);
    }

    // Scanning

    fn scan_dirty(&mut self) {
        let mut targets: Vec<BlockId> = self.dirty.drain().collect();
        if let Some(id) = self.doc.block(self.caret.block).map(Block::id) {
            if !targets.contains(&id) {
                targets.push(id);
            }
        }
        self.scan_pass(targets);
    }

    fn scan_pass(&mut self, targets: Vec<BlockId>) {
        self.styling = true;
        let mut changed = Vec::new();
        for id in targets {
            let Some(index) = self.doc.position(id) else {
                log::trace!("block {id:?} was removed before its scan");
                continue;
            };
            if self.rescan(index) {
                changed.push(id);
            }
        }
        self.scan_passes += 1;
        log::debug!(
            "scan pass {} restyled {} block(s)",
            self.scan_passes,
            changed.len()
        );

        if !changed.is_empty() {
            self.text_changed(&changed);
            self.caret_moved();
        }
        self.styling = false;
    }

    /// Rescans one block, keeping the caret on the same character.
    fn rescan(&mut self, index: usize) -> bool {
        let holds_caret = self.caret.block == index;
        let Some(block) = self.doc.block_mut(index) else {
            return false;
        };
        let caret_markup = block.markup_offset(self.caret.offset);
        if !inline::scan_block(block) {
            return false;
        }
        if holds_caret {
            self.caret.offset = block.visible_offset(caret_markup);
        }
        let id = block.id();
        self.revealed.retain(|(b, _)| *b != id);
        true
    }

    // Edits

    fn insert_at_caret(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let Some(block) = self.doc.block_mut(self.caret.block) else {
            return;
        };
        let offset = block.clamp_offset(self.caret.offset);
        block.insert_str(offset, s);
        let id = block.id();

        self.caret.offset = offset + s.len();
        self.text_changed(&[id]);
        self.caret_moved();
    }

    fn space(&mut self) -> KeyOutcome {
        let Caret { block: index, offset } = self.caret;
        let Some(block) = self.doc.block_mut(index) else {
            return KeyOutcome::Default;
        };
        match triggers::on_key(block, offset, TriggerKey::Space) {
            TriggerOutcome::Fired { .. } => {
                let id = block.id();
                self.caret.offset = 0;
                self.text_changed(&[id]);
                self.caret_moved();
                KeyOutcome::Claimed
            }
            TriggerOutcome::NoMatch => {
                self.insert_at_caret(" ");
                KeyOutcome::Default
            }
        }
    }

    fn enter(&mut self) -> KeyOutcome {
        let Caret { block: index, offset } = self.caret;
        let Some(block) = self.doc.block_mut(index) else {
            return KeyOutcome::Default;
        };

        if triggers::on_key(block, offset, TriggerKey::Enter).fired() {
            let id = block.id();
            self.caret.offset = 0;
            self.text_changed(&[id]);
            self.split_line(BlockKind::Normal, 0, None);
            return KeyOutcome::Claimed;
        }

        let plan = continuation::plan(block);
        match plan {
            EnterPlan::Continue { kind, indent } => self.split_line(kind, indent, None),
            EnterPlan::Fresh => self.split_line(BlockKind::Normal, 0, None),
            EnterPlan::BreakOut => {
                block.set_kind(BlockKind::Normal);
                let id = block.id();
                self.text_changed(&[id]);
            }
            EnterPlan::Newline { carry_indent } => {
                // Whitespace after the caret already moves down with the tail
                let carry = (carry_indent && self.options.carry_indent)
                    .then(|| {
                        let mut ws = block.leading_whitespace();
                        ws.truncate(ws.len().min(offset));
                        ws
                    })
                    .filter(|ws| !ws.is_empty());
                self.split_line(BlockKind::Normal, 0, carry);
            }
        }

        if plan.is_claimed() {
            KeyOutcome::Claimed
        } else {
            KeyOutcome::Default
        }
    }

    /// Moves everything after the caret into a new block of `kind` below.
    fn split_line(&mut self, kind: BlockKind, indent: usize, carry: Option<String>) {
        let Caret { block: index, offset } = self.caret;
        let Some(current) = self.doc.block_mut(index) else {
            return;
        };
        let current_id = current.id();
        let tail = current.split_off(offset);

        let mut next = Block::from_spans(kind, tail).with_indent(indent);
        let mut caret_offset = 0;
        if let Some(ws) = carry {
            next.insert_str(0, &ws);
            caret_offset = ws.len();
        }
        let next_id = next.id();
        self.doc.insert(index + 1, next);

        self.caret = Caret::new(index + 1, caret_offset);
        self.text_changed(&[current_id, next_id]);
        self.caret_moved();
    }

    fn tab(&mut self) -> KeyOutcome {
        let step = self.options.list_indent;
        let Some(block) = self.doc.block_mut(self.caret.block) else {
            return KeyOutcome::Default;
        };
        if !block.kind().is_list() {
            self.insert_at_caret("\t");
            return KeyOutcome::Default;
        }
        let indent = block.indent() + step;
        block.set_indent(indent);
        let id = block.id();
        self.text_changed(&[id]);
        KeyOutcome::Claimed
    }

    fn back_tab(&mut self) -> KeyOutcome {
        let step = self.options.list_indent;
        let Some(block) = self.doc.block_mut(self.caret.block) else {
            return KeyOutcome::Default;
        };
        if !block.kind().is_list() || block.indent() == 0 {
            return KeyOutcome::Default;
        }
        let indent = block.indent().saturating_sub(step);
        block.set_indent(indent);
        let id = block.id();
        self.text_changed(&[id]);
        KeyOutcome::Claimed
    }

    fn backspace(&mut self) -> KeyOutcome {
        let Caret { block: index, offset } = self.caret;
        let Some(block) = self.doc.block_mut(index) else {
            return KeyOutcome::Default;
        };
        let id = block.id();

        if offset > 0 {
            let Some(len) = prev_char_len(block, offset) else {
                log::debug!("backspace at offset {offset} is not on a char boundary");
                return KeyOutcome::Default;
            };
            block.remove_range(offset - len, offset);
            self.caret.offset = offset - len;
            self.text_changed(&[id]);
            self.caret_moved();
            return KeyOutcome::Default;
        }

        // At the start of a tagged line, Backspace removes the block markup
        if block.kind() != BlockKind::Normal {
            block.set_kind(BlockKind::Normal);
            self.text_changed(&[id]);
            return KeyOutcome::Claimed;
        }

        if index > 0 {
            self.join_with_next(index - 1);
        }
        KeyOutcome::Default
    }

    fn delete(&mut self) -> KeyOutcome {
        let Caret { block: index, offset } = self.caret;
        let Some(block) = self.doc.block_mut(index) else {
            return KeyOutcome::Default;
        };
        match next_char_len(block, offset) {
            Some(len) => {
                block.remove_range(offset, offset + len);
                let id = block.id();
                self.text_changed(&[id]);
            }
            None => self.join_with_next(index),
        }
        KeyOutcome::Default
    }

    /// Appends block `index + 1` to block `index` and removes it. The caret
    /// lands on the join point.
    fn join_with_next(&mut self, index: usize) {
        if index + 1 >= self.doc.len() {
            return;
        }
        let Some(next) = self.doc.remove(index + 1) else {
            return;
        };
        let Some(block) = self.doc.block_mut(index) else {
            return;
        };
        let join_at = block.text_len();
        let next_id = next.id();
        block.append_spans(next.spans().iter().cloned());
        let id = block.id();

        self.dirty.remove(&next_id);
        self.revealed.retain(|(b, _)| *b != next_id);
        self.caret = Caret::new(index, join_at);
        self.text_changed(&[id]);
        self.caret_moved();
    }

    fn move_caret(&mut self, motion: Motion) {
        let Caret { block: index, offset } = self.caret;
        let Some(block) = self.doc.block(index) else {
            return;
        };
        let last = self.doc.len().saturating_sub(1);

        let target = match motion {
            Motion::Left => match prev_char_len(block, offset) {
                Some(len) => Caret::new(index, offset - len),
                None if index > 0 => {
                    let end = self.doc.block(index - 1).map_or(0, Block::text_len);
                    Caret::new(index - 1, end)
                }
                None => self.caret,
            },
            Motion::Right => match next_char_len(block, offset) {
                Some(len) => Caret::new(index, offset + len),
                None if index < last => Caret::new(index + 1, 0),
                None => self.caret,
            },
            Motion::Up => Caret::new(index.saturating_sub(1), offset),
            Motion::Down => Caret::new((index + 1).min(last), offset),
            Motion::Home => Caret::new(index, 0),
            Motion::End => Caret::new(index, block.text_len()),
        };
        self.set_caret(target);
    }
}

fn prev_char_len(block: &Block, offset: usize) -> Option<usize> {
    block
        .text()
        .get(..offset)?
        .chars()
        .next_back()
        .map(char::len_utf8)
}

fn next_char_len(block: &Block, offset: usize) -> Option<usize> {
    block
        .text()
        .get(offset..)?
        .chars()
        .next()
        .map(char::len_utf8)
}
