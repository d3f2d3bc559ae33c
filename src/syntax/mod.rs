//! Incremental Go highlighting
//!
//! The core is a pure per-block transform: given a block's text and the
//! lexical state carried in from the previous block, produce categorized
//! spans and the state for the next block. `DocumentHighlighter` drives
//! the core across a whole document and owns the state side table.

mod document;
mod entry;
mod highlighter;
mod rules;
mod scanner;
mod style;
mod tokens;

pub use document::DocumentHighlighter;
pub use highlighter::{BlockHighlight, GoHighlighter};
pub use style::{Color, Style, Theme};
pub use tokens::{BlockState, Category, Span};
