//! # Inline-Trigger Scanner
//!
//! Turns inline markup (`**bold**`, `*italic*`, `~~strike~~`, `__underline__`,
//! `` `code` ``, `||spoiler||` and bare URLs) into tagged [`InlineSpan`]s with
//! the delimiters stripped.
//!
//! ## Pass
//!
//! 1. Flatten the block back to markup (span texts with delimiters re-inserted)
//! 2. Start from a single untagged span
//! 3. Try each pattern in [`StyleTag::PRIORITY`] order; each pattern matches at
//!    most once per pass, at its first occurrence inside an untagged span
//!
//! Because flattening is lossless, rescanning an already-scanned block yields
//! the same spans.
//!
//! ## Modules
//!
//! - **`kinds`**: delimiter constants and the matcher for each pattern
//! - **`scanner`**: `scan_markup()` and `scan_block()`
//!
//! [`InlineSpan`]: crate::model::InlineSpan
//! [`StyleTag::PRIORITY`]: crate::model::StyleTag::PRIORITY

pub mod kinds;
pub mod scanner;

pub use kinds::{PatternMatch, Span};
pub use scanner::{scan_block, scan_markup};
