//! Resolves blocks into styled runs using the [`StyleRegistry`].
//!
//! The engine does not draw anything. Hosts turn each [`RenderedLine`] into
//! whatever their toolkit uses (terminal cells, rich-text runs, HTML).

use std::collections::HashSet;

use crate::{
    model::{Block, BlockId, Document, RenderAttrs, SpanStyle, StyleTag},
    style::{Rgb, Role, StyleRegistry},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRun {
    pub text: String,
    pub style: SpanStyle,
    pub fg: Rgb,
    pub bg: Option<Rgb>,
    /// A spoiler that has not been revealed; draw it covered.
    pub concealed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub block: BlockId,
    pub attrs: RenderAttrs,
    /// Decoration drawn before the text (`"• "`, `"3. "`).
    pub marker: Option<String>,
    pub marker_color: Rgb,
    pub runs: Vec<RenderedRun>,
}

pub fn render_block(
    block: &Block,
    registry: &StyleRegistry,
    bullet_glyph: char,
    is_revealed: impl Fn(usize) -> bool,
) -> RenderedLine {
    let attrs = block.render_attrs();
    let base_fg = if attrs.muted {
        registry.color(Role::Muted)
    } else {
        registry.color(Role::Text)
    };

    let runs = block
        .spans()
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let style = span.tag.map(StyleTag::span_style).unwrap_or_default();
            let mut run = RenderedRun {
                text: span.text.clone(),
                style,
                fg: base_fg,
                bg: None,
                concealed: false,
            };
            match span.tag {
                Some(StyleTag::Url) => run.fg = registry.color(Role::Link),
                Some(StyleTag::Code) => run.bg = Some(registry.color(Role::Code)),
                Some(StyleTag::Spoiler) if !is_revealed(i) => {
                    let cover = registry.color(Role::SpoilerCover);
                    run.fg = cover;
                    run.bg = Some(cover);
                    run.concealed = true;
                }
                _ => {}
            }
            run
        })
        .collect();

    RenderedLine {
        block: block.id(),
        attrs,
        marker: block.kind().marker_label(bullet_glyph),
        marker_color: registry.color(Role::Marker),
        runs,
    }
}

/// Renders every block. `revealed` holds `(block, span index)` pairs of
/// spoilers the user has uncovered.
pub fn render_document(
    doc: &Document,
    registry: &StyleRegistry,
    bullet_glyph: char,
    revealed: &HashSet<(BlockId, usize)>,
) -> Vec<RenderedLine> {
    doc.iter()
        .map(|block| {
            let id = block.id();
            render_block(block, registry, bullet_glyph, |i| revealed.contains(&(id, i)))
        })
        .collect()
}
