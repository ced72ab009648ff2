use std::time::Duration;

use livemark_engine::{
    BlockKind, Editor, EditorOptions, InlineSpan, Key, ManualClock, NoopHost, StyleRegistry,
    StyleTag, inline::scan_block, parse, serialize,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const DEBOUNCE: Duration = Duration::from_millis(250);

fn editor() -> (Editor<NoopHost>, ManualClock) {
    let clock = ManualClock::new();
    let editor = Editor::new(StyleRegistry::default(), EditorOptions::default(), NoopHost)
        .with_clock(clock.clone());
    (editor, clock)
}

/// Types `s` one keystroke at a time; `\n` is Enter.
fn type_str(editor: &mut Editor<NoopHost>, s: &str) {
    for c in s.chars() {
        let key = match c {
            ' ' => Key::Space,
            '\n' => Key::Enter,
            c => Key::Char(c),
        };
        editor.handle_key(key);
    }
}

#[test]
fn typing_a_header() {
    let (mut ed, _) = editor();
    type_str(&mut ed, "# Title");

    let block = &ed.document().blocks()[0];
    assert_eq!(block.kind(), BlockKind::Header { level: 1 });
    assert_eq!(block.text(), "Title");
    assert_eq!(ed.get_plain_text(), "# Title");
}

#[test]
fn typing_a_bullet_list() {
    let (mut ed, _) = editor();
    type_str(&mut ed, "- a\nb");

    let kinds: Vec<_> = ed.document().iter().map(|b| b.kind()).collect();
    assert_eq!(kinds, vec![BlockKind::BulletList, BlockKind::BulletList]);
    assert_eq!(ed.get_plain_text(), "- a\n- b");
}

#[test]
fn typing_bold() {
    let (mut ed, clock) = editor();
    type_str(&mut ed, "**bold**");
    clock.advance(DEBOUNCE);
    assert!(ed.tick());

    assert_eq!(
        ed.document().blocks()[0].spans(),
        &[InlineSpan::tagged("bold", StyleTag::Bold)]
    );
    assert_eq!(ed.get_plain_text(), "**bold**");
}

#[test]
fn numbered_list_counts_from_the_current_line() {
    let (mut ed, _) = editor();
    ed.set_plain_text("1. one\n7. seven");
    ed.handle_key(Key::Enter);
    type_str(&mut ed, "next");
    assert_eq!(ed.get_plain_text(), "1. one\n7. seven\n8. next");
}

#[test]
fn quote_breaks_out_on_empty_line() {
    let (mut ed, _) = editor();
    type_str(&mut ed, "> said\n");
    assert_eq!(ed.get_plain_text(), "> said\n> ");

    ed.handle_key(Key::Enter);
    assert_eq!(ed.document().len(), 2);
    assert_eq!(ed.document().blocks()[1].kind(), BlockKind::Normal);
    assert_eq!(ed.get_plain_text(), "> said\n");
}

#[test]
fn block_trigger_swallows_space() {
    let (mut ed, _) = editor();
    type_str(&mut ed, "## ");
    let block = &ed.document().blocks()[0];
    assert_eq!(block.kind(), BlockKind::Header { level: 2 });
    assert_eq!(block.text(), "");
}

#[test]
fn debounce_coalesces_a_burst() {
    let (mut ed, clock) = editor();
    for c in "**a** and `b` and ~~c~~".chars() {
        ed.handle_key(Key::Char(c));
        clock.advance(Duration::from_millis(100));
        ed.tick();
    }
    assert_eq!(ed.scan_passes(), 0);

    clock.advance(DEBOUNCE);
    ed.tick();
    ed.tick();
    assert_eq!(ed.scan_passes(), 1);
}

#[test]
fn typed_session_round_trips() {
    let (mut ed, clock) = editor();
    // A second Enter on an empty list item leaves it in place and starts a
    // plain line; on an empty quote it turns the quote back into plain text.
    type_str(&mut ed, "# Plan\nintro **now**\n- one\ntwo\n\n1. a\nb\n\n> q\n\nend");
    clock.advance(DEBOUNCE);
    ed.tick();

    let text = ed.get_plain_text();
    assert_eq!(
        text,
        "# Plan\nintro **now**\n- one\n- two\n- \n1. a\n2. b\n3. \n> q\nend"
    );
    assert_eq!(serialize(&parse(&text)), text);
}

#[test]
fn fixture_round_trips() {
    let text = std::fs::read_to_string(format!(
        "{}/tests/fixtures/notes.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();
    assert_eq!(serialize(&parse(&text)), text);
}

#[rstest]
#[case("**a** *b* ~~c~~ __d__ `e` ||f|| https://g.h")]
#[case("***x*** and **y**")]
#[case("a * b ** c")]
#[case("||**nested**||")]
fn highlighting_is_idempotent(#[case] markup: &str) {
    let doc = parse(markup);
    let mut block = doc.blocks()[0].clone();
    let first = block.spans().to_vec();

    assert!(!scan_block(&mut block));
    assert_eq!(block.spans(), first.as_slice());
    assert_eq!(block.markup(), markup);
}

#[test]
fn set_plain_text_then_edit() {
    let (mut ed, _) = editor();
    ed.set_plain_text("- **bold** item");
    type_str(&mut ed, "\nnext");
    assert_eq!(ed.get_plain_text(), "- **bold** item\n- next");
}
