use serde::Serialize;

use crate::inline::kinds;

/// The inline style carried by a span.
///
/// A tag drives the visual style and tells the serializer which delimiter to
/// put back around the span's text. Tags are single-valued: a span is never
/// bold and italic at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StyleTag {
    Bold,
    Italic,
    Strike,
    Underline,
    Code,
    Spoiler,
    /// A bare `http`/`https` token. Has no delimiter.
    Url,
}

impl StyleTag {
    /// Order in which the inline scanner tries patterns.
    ///
    /// Multi-character delimiters come before the single `*` of italic so a
    /// bold marker is never consumed as two italic markers.
    pub const PRIORITY: [StyleTag; 7] = [
        StyleTag::Bold,
        StyleTag::Italic,
        StyleTag::Strike,
        StyleTag::Underline,
        StyleTag::Code,
        StyleTag::Spoiler,
        StyleTag::Url,
    ];

    /// The delimiter written on both sides of a tagged span.
    pub fn delimiter(self) -> &'static str {
        match self {
            StyleTag::Bold => kinds::Bold::DELIM,
            StyleTag::Italic => kinds::Italic::DELIM,
            StyleTag::Strike => kinds::Strike::DELIM,
            StyleTag::Underline => kinds::Underline::DELIM,
            StyleTag::Code => kinds::Code::DELIM,
            StyleTag::Spoiler => kinds::Spoiler::DELIM,
            StyleTag::Url => "",
        }
    }

    pub fn span_style(self) -> SpanStyle {
        let base = SpanStyle::default();
        match self {
            StyleTag::Bold => SpanStyle { bold: true, ..base },
            StyleTag::Italic => SpanStyle {
                italic: true,
                ..base
            },
            StyleTag::Strike => SpanStyle {
                strike: true,
                ..base
            },
            StyleTag::Underline => SpanStyle {
                underline: true,
                ..base
            },
            StyleTag::Code => SpanStyle {
                monospace: true,
                ..base
            },
            StyleTag::Spoiler => SpanStyle {
                concealable: true,
                ..base
            },
            StyleTag::Url => SpanStyle {
                underline: true,
                link: true,
                ..base
            },
        }
    }
}

/// Visual flags derived from a [`StyleTag`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub underline: bool,
    pub monospace: bool,
    /// Drawn covered until revealed.
    pub concealable: bool,
    /// Clickable (Ctrl+click opens it).
    pub link: bool,
}

/// A run of text within a block sharing one optional style tag.
///
/// `text` never contains the tag's delimiters; they were stripped when the
/// span was produced and are re-inserted by [`InlineSpan::write_markup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineSpan {
    pub text: String,
    pub tag: Option<StyleTag>,
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    pub fn tagged(text: impl Into<String>, tag: StyleTag) -> Self {
        Self {
            text: text.into(),
            tag: Some(tag),
        }
    }

    pub fn is_plain(&self) -> bool {
        self.tag.is_none()
    }

    pub fn delimiter(&self) -> &'static str {
        self.tag.map(StyleTag::delimiter).unwrap_or("")
    }

    /// Length of this span in markup form (text plus both delimiters).
    pub fn markup_len(&self) -> usize {
        self.text.len() + 2 * self.delimiter().len()
    }

    pub fn write_markup(&self, out: &mut String) {
        let d = self.delimiter();
        out.push_str(d);
        out.push_str(&self.text);
        out.push_str(d);
    }
}

/// Drops empty spans, merges neighbouring untagged spans and guarantees at
/// least one span remains.
pub(crate) fn normalize_spans(spans: &mut Vec<InlineSpan>) {
    let mut out: Vec<InlineSpan> = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        if span.text.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(prev) if prev.is_plain() && span.is_plain() => prev.text.push_str(&span.text),
            _ => out.push(span),
        }
    }
    if out.is_empty() {
        out.push(InlineSpan::plain(""));
    }
    *spans = out;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn markup_wraps_text_in_delimiters() {
        let mut out = String::new();
        InlineSpan::tagged("bold", StyleTag::Bold).write_markup(&mut out);
        InlineSpan::plain(" and ").write_markup(&mut out);
        InlineSpan::tagged("secret", StyleTag::Spoiler).write_markup(&mut out);
        InlineSpan::tagged(" https://x.io", StyleTag::Url).write_markup(&mut out);
        assert_eq!(out, "**bold** and ||secret|| https://x.io");
    }

    #[test]
    fn markup_len_counts_delimiters() {
        assert_eq!(InlineSpan::tagged("ab", StyleTag::Strike).markup_len(), 6);
        assert_eq!(InlineSpan::tagged("ab", StyleTag::Italic).markup_len(), 4);
        assert_eq!(InlineSpan::plain("ab").markup_len(), 2);
    }

    #[test]
    fn normalize_merges_and_drops() {
        let mut spans = vec![
            InlineSpan::plain("a"),
            InlineSpan::plain(""),
            InlineSpan::plain("b"),
            InlineSpan::tagged("", StyleTag::Bold),
            InlineSpan::tagged("c", StyleTag::Code),
            InlineSpan::plain("d"),
        ];
        normalize_spans(&mut spans);
        assert_eq!(
            spans,
            vec![
                InlineSpan::plain("ab"),
                InlineSpan::tagged("c", StyleTag::Code),
                InlineSpan::plain("d"),
            ]
        );
    }

    #[test]
    fn normalize_never_leaves_block_without_span() {
        let mut spans = vec![];
        normalize_spans(&mut spans);
        assert_eq!(spans, vec![InlineSpan::plain("")]);
    }

    #[test]
    fn url_style_is_clickable() {
        let style = StyleTag::Url.span_style();
        assert!(style.link && style.underline);
        assert!(!StyleTag::Bold.span_style().link);
    }
}
