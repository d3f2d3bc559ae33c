//! Semantic token categories and span output
//!
//! This module defines the data the highlighter core produces:
//! categories, per-block lexical state, and annotated spans.
//! Categories are purely semantic; mapping them to colors lives
//! in the style module.

/// Syntactic categories recognized by the Go rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Numeric literals (integer, float, hex, octal, imaginary)
    Number,
    /// Identifier followed by an opening parenthesis
    FunctionCall,
    /// Builtin type or function names (int, len, append, ...)
    BuiltinIdentifier,
    /// Reserved words (func, for, range, ...)
    Keyword,
    /// String literals, including raw back-quoted strings
    StringLiteral,
    /// // comments, including backslash continuations
    LineComment,
    /// /* */ comments
    BlockComment,
}

impl Category {
    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Category::Number => "number",
            Category::FunctionCall => "function",
            Category::BuiltinIdentifier => "builtin",
            Category::Keyword => "keyword",
            Category::StringLiteral => "string",
            Category::LineComment => "line-comment",
            Category::BlockComment => "block-comment",
        }
    }

    /// Parse a category from its name (for theme file loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "number" => Some(Category::Number),
            "function" => Some(Category::FunctionCall),
            "builtin" => Some(Category::BuiltinIdentifier),
            "keyword" => Some(Category::Keyword),
            "string" => Some(Category::StringLiteral),
            "line-comment" => Some(Category::LineComment),
            "block-comment" => Some(Category::BlockComment),
            _ => None,
        }
    }

    /// All categories, for theme iteration
    pub fn all() -> [Category; 7] {
        [
            Category::Number,
            Category::FunctionCall,
            Category::BuiltinIdentifier,
            Category::Keyword,
            Category::StringLiteral,
            Category::LineComment,
            Category::BlockComment,
        ]
    }
}

/// Lexical state carried from the end of one block to the start of the next
///
/// A block is one independently re-highlightable unit of text (one line).
/// Multi-line constructs are the only thing that crosses blocks, so four
/// states suffice. Unterminated single/double-quoted strings deliberately
/// do NOT propagate: those literals cannot span lines in Go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    /// No open construct
    #[default]
    Clean,
    /// Inside a back-quoted raw string
    InRawString,
    /// Inside a // comment continued by a trailing backslash
    InLineComment,
    /// Inside a /* */ comment
    InBlockComment,
}

impl BlockState {
    /// Check whether no multi-line construct is open
    pub fn is_clean(&self) -> bool {
        *self == BlockState::Clean
    }
}

/// A categorized span of text within a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Category of the spanned text
    pub category: Category,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, category: Category) -> Self {
        Self { start, end, category }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
