//! # Serializer
//!
//! Converts between a [`Document`] and its canonical plain-markup text.
//!
//! ## Canonical form
//!
//! - blocks are joined with `\n`
//! - each block starts with its kind prefix: `"#"*level + " "`, `"- "`,
//!   `"{ordinal}. "`, `"> "` or nothing
//! - list prefixes are preceded by the block's indent in spaces
//! - each span is written with its delimiters around it
//!
//! `serialize(&parse(t)) == t` holds for any `t` written in canonical form.
//! `*`/`+` bullets parse as bullets but serialize as `-`, and leading zeros in
//! ordinals are not kept.
//!
//! `parse` is total: an unrecognised line is a `Normal` block.

use crate::{
    inline::scan_markup,
    model::{Block, BlockKind, Document},
    syntax,
};

pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    for (i, block) in doc.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_block(&mut out, block);
    }
    out
}

/// Canonical text of a single block (no line break).
pub fn serialize_block(block: &Block) -> String {
    let mut out = String::new();
    write_block(&mut out, block);
    out
}

fn write_block(out: &mut String, block: &Block) {
    out.push_str(&syntax::render_prefix(block.kind(), block.indent()));
    block.write_markup(out);
}

pub fn parse(text: &str) -> Document {
    text.split('\n').map(parse_line).collect()
}

/// Parses one line (without its line break) into a block.
pub fn parse_line(line: &str) -> Block {
    match syntax::match_line_prefix(line) {
        Some((marker, content_start)) => {
            Block::from_spans(marker.kind, scan_markup(&line[content_start..]))
                .with_indent(marker.indent)
        }
        None => Block::from_spans(BlockKind::Normal, scan_markup(line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InlineSpan, StyleTag};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("\n")]
    #[case("plain line")]
    #[case("# Title")]
    #[case("###### deep")]
    #[case("## ")]
    #[case("- a\n- b")]
    #[case("  - nested\n    - deeper")]
    #[case("1. one\n2. two\n10. ten")]
    #[case("> quoted **bold**\n> ")]
    #[case("**bold** *it* ~~s~~ __u__ `c` ||sp|| https://x.io")]
    #[case("#no-space\n-no-space\n>no-space\n1.no-space")]
    #[case("####### seven hashes")]
    #[case("trailing newline\n")]
    #[case("windows\r\nline endings\r\n")]
    #[case("   leading spaces kept")]
    #[case("unicode ✓ **日本** 🦀")]
    fn round_trip(#[case] text: &str) {
        assert_eq!(serialize(&parse(text)), text);
    }

    #[test]
    fn parse_assigns_kinds() {
        let doc = parse("# H\n- b\n3. n\n> q\nn");
        let kinds: Vec<BlockKind> = doc.iter().map(Block::kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Header { level: 1 },
                BlockKind::BulletList,
                BlockKind::NumberedList { ordinal: 3 },
                BlockKind::Quote,
                BlockKind::Normal,
            ]
        );
        assert_eq!(doc.blocks()[0].text(), "H");
    }

    #[test]
    fn parse_rebuilds_spans() {
        let doc = parse("- **x** y");
        assert_eq!(
            doc.blocks()[0].spans(),
            &[
                InlineSpan::tagged("x", StyleTag::Bold),
                InlineSpan::plain(" y")
            ]
        );
    }

    #[test]
    fn alternate_bullets_normalise() {
        assert_eq!(serialize(&parse("* a\n+ b")), "- a\n- b");
    }

    #[test]
    fn leading_zero_ordinals_normalise() {
        assert_eq!(serialize(&parse("007. bond")), "7. bond");
    }

    #[test]
    fn serialize_block_has_no_line_break() {
        let block = Block::with_text(BlockKind::Header { level: 2 }, "Sub");
        assert_eq!(serialize_block(&block), "## Sub");
    }
}
