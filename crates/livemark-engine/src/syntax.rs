//! # Block Syntax
//!
//! All knowledge of block-level markers lives here: the `#` run of a header,
//! the `-`/`*`/`+` bullet, `N.` for numbered items and `>` for quotes. The
//! trigger detector and the serializer both go through this module so the
//! two can never disagree about what a marker looks like.

use crate::model::BlockKind;

pub const HEADER: u8 = b'#';
pub const QUOTE: u8 = b'>';
pub const BULLETS: [u8; 3] = [b'-', b'*', b'+'];
/// The bullet written by the serializer.
pub const CANONICAL_BULLET: char = '-';
pub const NUMBER_SUFFIX: u8 = b'.';

/// A block marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub kind: BlockKind,
    /// Leading spaces before a list marker.
    pub indent: usize,
    /// Byte length of indent plus marker (not including any following space).
    pub len: usize,
}

/// Scans for a block marker at the start of `s`.
fn scan_marker(s: &str) -> Option<Marker> {
    let b = s.as_bytes();

    let hashes = b.iter().take_while(|&&c| c == HEADER).count();
    if hashes > 0 {
        let kind = BlockKind::header(hashes)?;
        return Some(Marker {
            kind,
            indent: 0,
            len: hashes,
        });
    }

    if b.first() == Some(&QUOTE) {
        return Some(Marker {
            kind: BlockKind::Quote,
            indent: 0,
            len: 1,
        });
    }

    let indent = b.iter().take_while(|&&c| c == b' ').count();
    let rest = &b[indent..];
    match rest.first() {
        Some(c) if BULLETS.contains(c) => Some(Marker {
            kind: BlockKind::BulletList,
            indent,
            len: indent + 1,
        }),
        Some(c) if c.is_ascii_digit() => {
            let digits = rest.iter().take_while(|c| c.is_ascii_digit()).count();
            if rest.get(digits) != Some(&NUMBER_SUFFIX) {
                return None;
            }
            // Digits are ASCII, so this slice is on char boundaries
            let ordinal = match s[indent..indent + digits].parse::<u32>() {
                Ok(n) => n,
                Err(e) => {
                    log::debug!("numbered marker out of range: {e}");
                    return None;
                }
            };
            Some(Marker {
                kind: BlockKind::NumberedList { ordinal },
                indent,
                len: indent + digits + 1,
            })
        }
        _ => None,
    }
}

/// Matches a typed trigger: the whole of `prefix` (line start to caret) must
/// be a marker and nothing else.
pub fn match_trigger(prefix: &str) -> Option<Marker> {
    scan_marker(prefix).filter(|m| m.len == prefix.len())
}

/// Matches the block prefix of a canonical line: a marker followed by one
/// space. Returns the marker and the byte offset where content starts.
pub fn match_line_prefix(line: &str) -> Option<(Marker, usize)> {
    let marker = scan_marker(line)?;
    if line.as_bytes().get(marker.len) != Some(&b' ') {
        return None;
    }
    Some((marker, marker.len + 1))
}

/// The canonical prefix written before a block's content.
pub fn render_prefix(kind: BlockKind, indent: usize) -> String {
    match kind {
        BlockKind::Normal => String::new(),
        BlockKind::Header { level } => {
            let mut s = "#".repeat(usize::from(level));
            s.push(' ');
            s
        }
        BlockKind::BulletList => format!("{}{CANONICAL_BULLET} ", " ".repeat(indent)),
        BlockKind::NumberedList { ordinal } => format!("{}{ordinal}. ", " ".repeat(indent)),
        BlockKind::Quote => "> ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#", Some((BlockKind::Header { level: 1 }, 0)))]
    #[case("######", Some((BlockKind::Header { level: 6 }, 0)))]
    #[case("#######", None)]
    #[case("-", Some((BlockKind::BulletList, 0)))]
    #[case("*", Some((BlockKind::BulletList, 0)))]
    #[case("   +", Some((BlockKind::BulletList, 3)))]
    #[case("12.", Some((BlockKind::NumberedList { ordinal: 12 }, 0)))]
    #[case("  3.", Some((BlockKind::NumberedList { ordinal: 3 }, 2)))]
    #[case(">", Some((BlockKind::Quote, 0)))]
    #[case(" >", None)]
    #[case(" #", None)]
    #[case("#a", None)]
    #[case("-x", None)]
    #[case("1", None)]
    #[case("1.2", None)]
    #[case("99999999999.", None)]
    #[case("", None)]
    #[case("plain", None)]
    fn triggers(#[case] prefix: &str, #[case] expected: Option<(BlockKind, usize)>) {
        assert_eq!(
            match_trigger(prefix).map(|m| (m.kind, m.indent)),
            expected
        );
    }

    #[rstest]
    #[case("# Title", Some((BlockKind::Header { level: 1 }, 2)))]
    #[case("## ", Some((BlockKind::Header { level: 2 }, 3)))]
    #[case("- a", Some((BlockKind::BulletList, 2)))]
    #[case("  * a", Some((BlockKind::BulletList, 4)))]
    #[case("7. seven", Some((BlockKind::NumberedList { ordinal: 7 }, 3)))]
    #[case("> quoted", Some((BlockKind::Quote, 2)))]
    #[case("#Title", None)]
    #[case("-", None)]
    #[case(">", None)]
    #[case("**bold**", None)]
    fn line_prefixes(#[case] line: &str, #[case] expected: Option<(BlockKind, usize)>) {
        assert_eq!(
            match_line_prefix(line).map(|(m, content)| (m.kind, content)),
            expected
        );
    }

    #[test]
    fn prefixes_render_canonically() {
        assert_eq!(render_prefix(BlockKind::Normal, 0), "");
        assert_eq!(render_prefix(BlockKind::Header { level: 3 }, 0), "### ");
        assert_eq!(render_prefix(BlockKind::BulletList, 2), "  - ");
        assert_eq!(
            render_prefix(BlockKind::NumberedList { ordinal: 10 }, 0),
            "10. "
        );
        assert_eq!(render_prefix(BlockKind::Quote, 0), "> ");
    }
}
