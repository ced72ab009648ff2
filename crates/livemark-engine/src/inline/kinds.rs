//! Inline pattern kinds. Each kind owns its delimiter; the scanner and the
//! model ask here rather than hardcoding `**` or `||`.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::StyleTag;

/// A byte range `[start, end)` into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl From<regex::Match<'_>> for Span {
    fn from(m: regex::Match<'_>) -> Self {
        Span {
            start: m.start(),
            end: m.end(),
        }
    }
}

/// One pattern hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    /// Full span including delimiters.
    pub full: Span,
    /// Content between the delimiters.
    pub inner: Span,
}

pub struct Bold;
impl Bold {
    pub const DELIM: &'static str = "**";
}

/// Single `*`. A match may not touch another `*` on either side.
pub struct Italic;
impl Italic {
    pub const DELIM: &'static str = "*";
}

pub struct Strike;
impl Strike {
    pub const DELIM: &'static str = "~~";
}

pub struct Underline;
impl Underline {
    pub const DELIM: &'static str = "__";
}

/// Backtick code. Content may not contain a backtick.
pub struct Code;
impl Code {
    pub const DELIM: &'static str = "`";
}

pub struct Spoiler;
impl Spoiler {
    pub const DELIM: &'static str = "||";
}

/// Bare `http://` / `https://` tokens.
pub struct Url;
impl Url {
    /// Trailing characters that end a sentence rather than the URL.
    pub const TRAILING_PUNCT: [char; 9] = ['.', ',', ':', ';', '!', '?', ')', ']', '}'];
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Invalid inline pattern"))
}

fn regex_for(tag: StyleTag) -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static ITALIC: OnceLock<Regex> = OnceLock::new();
    static STRIKE: OnceLock<Regex> = OnceLock::new();
    static UNDERLINE: OnceLock<Regex> = OnceLock::new();
    static CODE: OnceLock<Regex> = OnceLock::new();
    static SPOILER: OnceLock<Regex> = OnceLock::new();
    static URL: OnceLock<Regex> = OnceLock::new();

    match tag {
        StyleTag::Bold => compiled(&BOLD, r"\*\*(.+?)\*\*"),
        StyleTag::Italic => compiled(&ITALIC, r"\*([^*]+)\*"),
        StyleTag::Strike => compiled(&STRIKE, r"~~(.+?)~~"),
        StyleTag::Underline => compiled(&UNDERLINE, r"__(.+?)__"),
        StyleTag::Code => compiled(&CODE, r"`([^`]+)`"),
        StyleTag::Spoiler => compiled(&SPOILER, r"\|\|(.+?)\|\|"),
        StyleTag::Url => compiled(&URL, r"https?://[^\s<>\[\]]+"),
    }
}

/// Finds the first occurrence of `tag`'s pattern in `s`.
pub fn find(tag: StyleTag, s: &str) -> Option<PatternMatch> {
    match tag {
        StyleTag::Italic => find_italic(s),
        StyleTag::Url => find_url(s),
        _ => {
            let caps = regex_for(tag).captures(s)?;
            Some(PatternMatch {
                full: caps.get(0)?.into(),
                inner: caps.get(1)?.into(),
            })
        }
    }
}

fn find_italic(s: &str) -> Option<PatternMatch> {
    let re = regex_for(StyleTag::Italic);
    let mut from = 0;
    while let Some(caps) = re.captures_at(s, from) {
        let full = caps.get(0)?;
        let touches_before = s[..full.start()].ends_with('*');
        let touches_after = s[full.end()..].starts_with('*');
        if !touches_before && !touches_after {
            return Some(PatternMatch {
                full: full.into(),
                inner: caps.get(1)?.into(),
            });
        }
        // `*` is one byte, so this stays on a char boundary
        from = full.start() + 1;
    }
    None
}

fn find_url(s: &str) -> Option<PatternMatch> {
    for m in regex_for(StyleTag::Url).find_iter(s) {
        let trimmed = m.as_str().trim_end_matches(Url::TRAILING_PUNCT);
        // A bare scheme like "https://" followed by punctuation only
        if trimmed.ends_with("//") {
            continue;
        }
        let span = Span {
            start: m.start(),
            end: m.start() + trimmed.len(),
        };
        return Some(PatternMatch {
            full: span,
            inner: span,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn inner_text(tag: StyleTag, s: &str) -> Option<&str> {
        find(tag, s).map(|m| &s[m.inner.start..m.inner.end])
    }

    #[rstest]
    #[case(StyleTag::Bold, "a **b** c", Some("b"))]
    #[case(StyleTag::Bold, "**a** **b**", Some("a"))]
    #[case(StyleTag::Bold, "**unclosed", None)]
    #[case(StyleTag::Italic, "an *em* word", Some("em"))]
    #[case(StyleTag::Italic, "**bold**", None)]
    #[case(StyleTag::Italic, "***x***", None)]
    #[case(StyleTag::Italic, "x**y *z*", Some("z"))]
    #[case(StyleTag::Strike, "~~gone~~", Some("gone"))]
    #[case(StyleTag::Underline, "__under__", Some("under"))]
    #[case(StyleTag::Code, "run `ls -la` now", Some("ls -la"))]
    #[case(StyleTag::Code, "``", None)]
    #[case(StyleTag::Spoiler, "||hidden||", Some("hidden"))]
    #[case(StyleTag::Spoiler, "|not|", None)]
    #[case(StyleTag::Url, "see https://example.com/a?b=1.", Some("https://example.com/a?b=1"))]
    #[case(StyleTag::Url, "http://x.io)", Some("http://x.io"))]
    #[case(StyleTag::Url, "ftp://x.io", None)]
    fn patterns(#[case] tag: StyleTag, #[case] s: &str, #[case] expected: Option<&str>) {
        assert_eq!(inner_text(tag, s), expected);
    }

    #[test]
    fn full_span_includes_delimiters() {
        let m = find(StyleTag::Spoiler, "x ||y||").unwrap();
        assert_eq!(m.full, Span { start: 2, end: 7 });
        assert_eq!(m.inner, Span { start: 4, end: 5 });
        assert_eq!(m.full.len(), 5);
    }

    #[test]
    fn url_has_no_delimiters() {
        let m = find(StyleTag::Url, "https://a.b").unwrap();
        assert_eq!(m.full, m.inner);
    }

    #[test]
    fn delimiters_match_tags() {
        for tag in StyleTag::PRIORITY {
            let d = tag.delimiter();
            if tag == StyleTag::Url {
                assert!(d.is_empty());
            } else {
                let s = format!("{d}x{d}");
                assert_eq!(inner_text(tag, &s), Some("x"), "{tag:?}");
            }
        }
    }
}
