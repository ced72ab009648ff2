/// The block-level kind of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Normal,
    Header { level: u8 },
    BulletList,
    NumberedList { ordinal: u32 },
    Quote,
}

/// Render attributes derived from a [`BlockKind`].
///
/// Never stored on a block; always recomputed from the kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderAttrs {
    /// Font size multiplier relative to body text.
    pub font_scale: f32,
    pub bold: bool,
    pub italic: bool,
    /// Use the muted color instead of the text color.
    pub muted: bool,
    /// Indentation in columns.
    pub indent: usize,
}

impl RenderAttrs {
    pub const BODY: RenderAttrs = RenderAttrs {
        font_scale: 1.0,
        bold: false,
        italic: false,
        muted: false,
        indent: 0,
    };
}

impl BlockKind {
    pub const MAX_HEADER_LEVEL: u8 = 6;

    /// Indent applied to list and quote content, in columns.
    pub const CONTAINER_INDENT: usize = 2;

    /// Bar drawn in front of quoted lines.
    pub const QUOTE_BAR: char = '│';

    /// Builds a header kind, or `None` when `level` is outside `1..=6`.
    pub fn header(level: usize) -> Option<Self> {
        match u8::try_from(level) {
            Ok(level @ 1..=6) => Some(BlockKind::Header { level }),
            _ => None,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, BlockKind::BulletList | BlockKind::NumberedList { .. })
    }

    pub fn render_attrs(self) -> RenderAttrs {
        match self {
            BlockKind::Normal => RenderAttrs::BODY,
            BlockKind::Header { level } => RenderAttrs {
                font_scale: header_scale(level),
                bold: true,
                ..RenderAttrs::BODY
            },
            BlockKind::BulletList | BlockKind::NumberedList { .. } => RenderAttrs {
                indent: Self::CONTAINER_INDENT,
                ..RenderAttrs::BODY
            },
            BlockKind::Quote => RenderAttrs {
                italic: true,
                muted: true,
                indent: Self::CONTAINER_INDENT,
                ..RenderAttrs::BODY
            },
        }
    }

    /// The decoration drawn in place of the consumed list marker.
    pub fn marker_label(self, bullet_glyph: char) -> Option<String> {
        match self {
            BlockKind::BulletList => Some(format!("{bullet_glyph} ")),
            BlockKind::NumberedList { ordinal } => Some(format!("{ordinal}. ")),
            BlockKind::Quote => Some(format!("{} ", Self::QUOTE_BAR)),
            _ => None,
        }
    }
}

fn header_scale(level: u8) -> f32 {
    match level {
        1 => 2.0,
        2 => 1.6,
        3 => 1.35,
        4 => 1.2,
        5 => 1.1,
        _ => 1.0,
    }
}
