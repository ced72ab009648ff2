//! Non-interactive sub-commands.

use std::{fmt::Write, path::Path};

use anyhow::{Context, Result};
use livemark_engine::{Document, parse, serialize};

pub fn render(path: &Path) -> Result<()> {
    let text = read(path)?;
    print!("{}", describe(&parse(&text)));
    Ok(())
}

/// Checks that the file survives parse then serialize unchanged. Returns
/// whether it did.
pub fn roundtrip(path: &Path) -> Result<bool> {
    let text = read(path)?;
    let output = serialize(&parse(&text));
    if output == text {
        println!("{}: round trip ok", path.display());
        return Ok(true);
    }

    match first_difference(&text, &output) {
        Some((line, expected, actual)) => {
            println!("{}:{line}: round trip changed the line", path.display());
            println!("  before: {expected:?}");
            println!("  after:  {actual:?}");
        }
        None => println!("{}: round trip changed the text", path.display()),
    }
    Ok(false)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// One line per block: number, kind, list indent and tagged spans.
pub fn describe(doc: &Document) -> String {
    let mut out = String::new();
    for (i, block) in doc.iter().enumerate() {
        let _ = write!(out, "{:>4}  {:?}", i + 1, block.kind());
        if block.indent() > 0 {
            let _ = write!(out, " +{}", block.indent());
        }
        for span in block.spans() {
            match span.tag {
                Some(tag) => {
                    let _ = write!(out, " {tag:?}({:?})", span.text);
                }
                None => {
                    let _ = write!(out, " {:?}", span.text);
                }
            }
        }
        out.push('\n');
    }
    out
}

/// 1-based line number and the differing lines, if any line differs.
fn first_difference<'a>(before: &'a str, after: &'a str) -> Option<(usize, &'a str, &'a str)> {
    before
        .split('\n')
        .zip(after.split('\n'))
        .enumerate()
        .find(|(_, (a, b))| a != b)
        .map(|(i, (a, b))| (i + 1, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_lists_kinds_and_spans() {
        let doc = parse("## Head\n  - **b** x");
        assert_eq!(
            describe(&doc),
            "   1  Header { level: 2 } \"Head\"\n   2  BulletList +2 Bold(\"b\") \" x\"\n"
        );
    }

    #[test]
    fn first_difference_reports_line() {
        assert_eq!(first_difference("a\nb\nc", "a\nB\nc"), Some((2, "b", "B")));
        assert_eq!(first_difference("a", "a"), None);
    }
}
