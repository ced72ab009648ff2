use crate::model::{Block, InlineSpan, StyleTag, span::normalize_spans};

use super::kinds;

/// Scans inline markup into spans.
///
/// Every [`StyleTag`] pattern runs once in priority order. A pattern only
/// looks inside spans that are still untagged, and only its first occurrence
/// (in reading order) is converted.
pub fn scan_markup(markup: &str) -> Vec<InlineSpan> {
    let mut spans = vec![InlineSpan::plain(markup)];
    for tag in StyleTag::PRIORITY {
        apply_pattern(&mut spans, tag);
    }
    normalize_spans(&mut spans);
    spans
}

/// Re-scans a block from its own markup. Returns whether the spans changed.
pub fn scan_block(block: &mut Block) -> bool {
    let spans = scan_markup(&block.markup());
    if spans.as_slice() == block.spans() {
        return false;
    }
    block.replace_spans(spans);
    true
}

fn apply_pattern(spans: &mut Vec<InlineSpan>, tag: StyleTag) {
    for i in 0..spans.len() {
        if !spans[i].is_plain() {
            continue;
        }
        let Some(m) = kinds::find(tag, &spans[i].text) else {
            continue;
        };

        let text = &spans[i].text;
        let pieces = (
            text.get(..m.full.start),
            text.get(m.inner.start..m.inner.end),
            text.get(m.full.end..),
        );
        let (Some(before), Some(inner), Some(after)) = pieces else {
            log::debug!("skipping {tag:?} match with unusable offsets {m:?}");
            return;
        };

        let replacement = [
            InlineSpan::plain(before),
            InlineSpan::tagged(inner, tag),
            InlineSpan::plain(after),
        ];
        spans.splice(i..=i, replacement);
        return;
    }
}
