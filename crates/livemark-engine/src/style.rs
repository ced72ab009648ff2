//! # Style Registry
//!
//! Maps a logical [`Role`] to a renderable [`Rgb`] color. The registry holds a
//! dark and a light [`Palette`]; callers ask for a role and never need to know
//! which theme is active.
//!
//! The registry is a plain value injected into the editor. Switching theme is
//! `set_dark`, after which every lookup answers from the other palette.

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must have exactly 6 hex digits: {0:?}")]
    BadLength(String),
    #[error("color contains non-hex digits: {0:?}")]
    BadDigits(String),
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigits(s.to_string()));
        }

        // All ASCII hex at this point, so byte slicing and radix parsing can't fail
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or_default();
        Ok(Self::new(channel(0), channel(2), channel(4)))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Logical color roles used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Default body text.
    Text,
    /// Quote text and other de-emphasised content.
    Muted,
    /// URL spans.
    Link,
    /// List markers.
    Marker,
    /// Background tint behind code spans.
    Code,
    /// Fill drawn over a concealed spoiler.
    SpoilerCover,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Text,
        Role::Muted,
        Role::Link,
        Role::Marker,
        Role::Code,
        Role::SpoilerCover,
    ];
}

/// One color per [`Role`] for a single theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub text: Rgb,
    pub muted: Rgb,
    pub link: Rgb,
    pub marker: Rgb,
    pub code: Rgb,
    pub spoiler_cover: Rgb,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            text: Rgb::new(0xe6, 0xe6, 0xe6),
            muted: Rgb::new(0x9a, 0x9a, 0x9a),
            link: Rgb::new(0x6c, 0xb6, 0xff),
            marker: Rgb::new(0xc0, 0x8b, 0xff),
            code: Rgb::new(0x2d, 0x2f, 0x36),
            spoiler_cover: Rgb::new(0x44, 0x44, 0x44),
        }
    }

    pub fn light() -> Self {
        Self {
            text: Rgb::new(0x1f, 0x1f, 0x1f),
            muted: Rgb::new(0x6b, 0x6b, 0x6b),
            link: Rgb::new(0x00, 0x5f, 0xb8),
            marker: Rgb::new(0x7a, 0x3e, 0xc4),
            code: Rgb::new(0xee, 0xef, 0xf2),
            spoiler_cover: Rgb::new(0x3a, 0x3a, 0x3a),
        }
    }

    pub fn color(&self, role: Role) -> Rgb {
        match role {
            Role::Text => self.text,
            Role::Muted => self.muted,
            Role::Link => self.link,
            Role::Marker => self.marker,
            Role::Code => self.code,
            Role::SpoilerCover => self.spoiler_cover,
        }
    }

    pub fn set(&mut self, role: Role, color: Rgb) {
        let slot = match role {
            Role::Text => &mut self.text,
            Role::Muted => &mut self.muted,
            Role::Link => &mut self.link,
            Role::Marker => &mut self.marker,
            Role::Code => &mut self.code,
            Role::SpoilerCover => &mut self.spoiler_cover,
        };
        *slot = color;
    }
}

/// Dark and light palettes plus the current theme selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    dark: Palette,
    light: Palette,
    is_dark: bool,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new(Palette::dark(), Palette::light())
    }
}

impl StyleRegistry {
    /// Creates a registry with the light palette selected.
    pub fn new(dark: Palette, light: Palette) -> Self {
        Self {
            dark,
            light,
            is_dark: false,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn set_dark(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
    }

    /// The palette for the active theme.
    pub fn palette(&self) -> &Palette {
        if self.is_dark { &self.dark } else { &self.light }
    }

    /// Mutable access to either palette, e.g. for applying user overrides.
    pub fn palette_mut(&mut self, dark: bool) -> &mut Palette {
        if dark { &mut self.dark } else { &mut self.light }
    }

    pub fn color(&self, role: Role) -> Rgb {
        self.palette().color(role)
    }
}
