//! # Block Model
//!
//! A [`Document`] is an ordered list of [`Block`]s. Each block carries a
//! [`BlockKind`] and a sequence of [`InlineSpan`]s; together they hold
//! everything the serializer needs to reproduce the line's canonical text.
//!
//! ## Modules
//!
//! - **`kind`**: `BlockKind` and the `RenderAttrs` derived from it
//! - **`span`**: `InlineSpan`, `StyleTag` and per-tag `SpanStyle`
//! - **`block`**: `Block` with span editing and visible/markup offset mapping
//! - **`document`**: `Document`, the never-empty block list

pub mod block;
pub mod document;
pub mod kind;
pub mod span;

pub use block::{Block, BlockId};
pub use document::Document;
pub use kind::{BlockKind, RenderAttrs};
pub use span::{InlineSpan, SpanStyle, StyleTag};
