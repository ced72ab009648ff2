use uuid::Uuid;

use super::{
    kind::{BlockKind, RenderAttrs},
    span::{InlineSpan, StyleTag, normalize_spans},
};

/// Stable identity for a block that survives edits to its content and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

/// One logical line: a [`BlockKind`] plus its inline spans.
///
/// ## Offsets
///
/// Two coordinate systems address a block's content:
/// - **visible** offsets index the concatenated span texts (markers stripped);
///   the caret lives here
/// - **markup** offsets index the text with every span's delimiters put back,
///   which is what the inline scanner reads
///
/// All offsets are bytes. Out-of-range or mid-character offsets are clamped
/// rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: BlockId,
    kind: BlockKind,
    /// Leading spaces before a list marker. Always 0 for non-list kinds.
    indent: usize,
    spans: Vec<InlineSpan>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self::from_spans(kind, vec![])
    }

    pub fn with_text(kind: BlockKind, text: impl Into<String>) -> Self {
        Self::from_spans(kind, vec![InlineSpan::plain(text)])
    }

    pub fn from_spans(kind: BlockKind, mut spans: Vec<InlineSpan>) -> Self {
        normalize_spans(&mut spans);
        Self {
            id: BlockId::new(),
            kind,
            indent: 0,
            spans,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.set_indent(indent);
        self
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Replaces the kind. Span tags are left untouched; leaving a list kind
    /// drops the list indent.
    pub fn set_kind(&mut self, kind: BlockKind) {
        self.kind = kind;
        if !kind.is_list() {
            self.indent = 0;
        }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Sets the list indent. Ignored for non-list kinds.
    pub fn set_indent(&mut self, indent: usize) {
        if self.kind.is_list() {
            self.indent = indent;
        }
    }

    /// Render attributes for this block: the kind's attributes plus list nesting.
    pub fn render_attrs(&self) -> RenderAttrs {
        let mut attrs = self.kind.render_attrs();
        attrs.indent += self.indent;
        attrs
    }

    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    pub fn append_span(&mut self, span: InlineSpan) {
        self.spans.push(span);
        normalize_spans(&mut self.spans);
    }

    pub fn replace_spans(&mut self, spans: Vec<InlineSpan>) {
        self.spans = spans;
        normalize_spans(&mut self.spans);
    }

    /// Visible text (markers stripped).
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn text_len(&self) -> usize {
        self.spans.iter().map(|s| s.text.len()).sum()
    }

    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }

    /// Inline markup: every span's text wrapped in its delimiters.
    pub fn markup(&self) -> String {
        let mut out = String::with_capacity(self.spans.iter().map(InlineSpan::markup_len).sum());
        self.write_markup(&mut out);
        out
    }

    pub fn write_markup(&self, out: &mut String) {
        for span in &self.spans {
            span.write_markup(out);
        }
    }

    /// Leading whitespace of the visible text.
    pub fn leading_whitespace(&self) -> String {
        self.text()
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect()
    }

    /// Clamps `offset` into `0..=text_len()` and back to a char boundary.
    pub fn clamp_offset(&self, offset: usize) -> usize {
        let text = self.text();
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    /// Index of the span containing `offset` and the local offset inside it.
    ///
    /// An offset on a boundary belongs to the span that starts there.
    pub fn span_at(&self, offset: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (i, span) in self.spans.iter().enumerate() {
            let end = start + span.text.len();
            if offset >= start && offset < end {
                return Some((i, offset - start));
            }
            start = end;
        }
        None
    }

    /// Inserts `s` at a visible offset.
    ///
    /// Text typed inside a tagged span joins it; text typed at the edge of a
    /// tagged span goes into a neighbouring untagged span instead, so typing
    /// after `**bold**` does not extend the bold.
    pub fn insert_str(&mut self, offset: usize, s: &str) {
        if s.is_empty() {
            return;
        }
        let offset = self.clamp_offset(offset);

        let mut start = 0;
        let mut inside_tagged = None;
        let mut boundary_index = self.spans.len();
        for (i, span) in self.spans.iter().enumerate() {
            let end = start + span.text.len();
            if span.is_plain() && (start..=end).contains(&offset) {
                self.spans[i].text.insert_str(offset - start, s);
                normalize_spans(&mut self.spans);
                return;
            }
            if offset > start && offset < end {
                inside_tagged = Some((i, offset - start));
            }
            if offset == start && boundary_index == self.spans.len() {
                boundary_index = i;
            }
            start = end;
        }

        match inside_tagged {
            Some((i, local)) => self.spans[i].text.insert_str(local, s),
            None => self.spans.insert(boundary_index, InlineSpan::plain(s)),
        }
        normalize_spans(&mut self.spans);
    }

    /// Removes the visible byte range `start..end`. Returns false (and leaves
    /// the block untouched) when the range is empty or inverted.
    pub fn remove_range(&mut self, start: usize, end: usize) -> bool {
        let start = self.clamp_offset(start);
        let end = self.clamp_offset(end);
        if start >= end {
            return false;
        }

        let mut span_start = 0;
        for span in &mut self.spans {
            let span_end = span_start + span.text.len();
            let lo = start.max(span_start);
            let hi = end.min(span_end);
            if lo < hi {
                span.text.replace_range(lo - span_start..hi - span_start, "");
            }
            span_start = span_end;
        }
        normalize_spans(&mut self.spans);
        true
    }

    /// Splits the block at a visible offset, returning the spans after it.
    ///
    /// A tagged span cut in two keeps its tag on both halves.
    pub fn split_off(&mut self, offset: usize) -> Vec<InlineSpan> {
        let offset = self.clamp_offset(offset);
        let mut tail = Vec::new();
        let mut kept = Vec::new();

        let mut start = 0;
        for mut span in self.spans.drain(..) {
            let end = start + span.text.len();
            if end <= offset {
                kept.push(span);
            } else if start >= offset {
                tail.push(span);
            } else {
                let rest = span.text.split_off(offset - start);
                tail.push(InlineSpan {
                    text: rest,
                    tag: span.tag,
                });
                kept.push(span);
            }
            start = end;
        }

        self.spans = kept;
        normalize_spans(&mut self.spans);
        normalize_spans(&mut tail);
        tail
    }

    /// Appends spans to the end of this block (used when joining lines).
    pub fn append_spans(&mut self, spans: impl IntoIterator<Item = InlineSpan>) {
        self.spans.extend(spans);
        normalize_spans(&mut self.spans);
    }

    /// Maps a visible offset to a markup offset.
    ///
    /// The start of a tagged span maps before its opening delimiter; any other
    /// position inside or at the end maps inside the delimiters.
    pub fn markup_offset(&self, visible: usize) -> usize {
        let mut v = 0;
        let mut m = 0;
        for span in &self.spans {
            let len = span.text.len();
            if visible <= v + len {
                if visible == v {
                    return m;
                }
                return m + span.delimiter().len() + (visible - v);
            }
            v += len;
            m += span.markup_len();
        }
        m
    }

    /// Maps a markup offset back to a visible offset. Positions inside a
    /// delimiter snap to the nearest edge of the span's text.
    pub fn visible_offset(&self, markup: usize) -> usize {
        let mut v = 0;
        let mut m = 0;
        for span in &self.spans {
            let len = span.text.len();
            let full = span.markup_len();
            if markup <= m + full {
                let local = markup - m;
                return v + local.saturating_sub(span.delimiter().len()).min(len);
            }
            v += len;
            m += full;
        }
        v
    }

    /// The tag of the span under a visible offset, if any.
    pub fn tag_at(&self, offset: usize) -> Option<StyleTag> {
        self.span_at(offset).and_then(|(i, _)| self.spans[i].tag)
    }
}
