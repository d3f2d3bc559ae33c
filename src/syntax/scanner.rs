//! Quote and comment scanner
//!
//! Finds the next string or comment delimiter from a given offset and
//! classifies the region it opens. This is where block-crossing state
//! is decided: an unterminated back-quoted string or /* comment
//! propagates to the next block, an unterminated "..." or '...' does
//! not (those literals cannot span lines in Go), and a // comment
//! propagates only when the block ends with a backslash.

use regex::Regex;

use crate::error::Result;

use super::tokens::{BlockState, Category, Span};

/// Result of one scan step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStep {
    /// A terminated construct was consumed; continue scanning at `resume`
    Token { span: Span, resume: usize },
    /// Scanning is over for this block
    ///
    /// `span` covers an open construct running to the end of the block,
    /// or is `None` when no further delimiter was found. `exit` is the
    /// state the next block must enter with.
    Stop { span: Option<Span>, exit: BlockState },
}

/// Scans a block for string and comment regions
///
/// Holds only the compiled delimiter pattern; scanning itself is a pure
/// function of (text, offset).
pub struct Scanner {
    delimiter: Regex,
}

impl Scanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            delimiter: Regex::new(r#"//|"|'|`|/\*"#)?,
        })
    }

    /// Scan `text` from `from` for the next delimiter and resolve it
    pub fn scan(&self, text: &str, from: usize) -> ScanStep {
        let rest = match text.get(from..) {
            Some(rest) => rest,
            None => {
                return ScanStep::Stop {
                    span: None,
                    exit: BlockState::Clean,
                }
            }
        };

        let m = match self.delimiter.find(rest) {
            Some(m) => m,
            None => {
                return ScanStep::Stop {
                    span: None,
                    exit: BlockState::Clean,
                }
            }
        };
        let start = from + m.start();

        match m.as_str() {
            "//" => {
                // Everything after // belongs to the comment; a trailing
                // backslash continues it onto the next block.
                let exit = if text.ends_with('\\') {
                    BlockState::InLineComment
                } else {
                    BlockState::Clean
                };
                ScanStep::Stop {
                    span: Some(Span::new(start, text.len(), Category::LineComment)),
                    exit,
                }
            }
            "/*" => match text[start + 2..].find("*/") {
                Some(rel) => {
                    let close = start + 2 + rel + 2;
                    ScanStep::Token {
                        span: Span::new(start, close, Category::BlockComment),
                        resume: close,
                    }
                }
                None => ScanStep::Stop {
                    span: Some(Span::new(start, text.len(), Category::BlockComment)),
                    exit: BlockState::InBlockComment,
                },
            },
            quote => {
                let delim = quote.as_bytes()[0];
                // Backslash escapes apply inside "..." and '...' but
                // never inside raw back-quoted strings.
                let escapes = delim != b'`';
                match find_quote_end(text, start + 1, delim, escapes) {
                    Some(close) => ScanStep::Token {
                        span: Span::new(start, close + 1, Category::StringLiteral),
                        resume: close + 1,
                    },
                    None => {
                        let exit = if delim == b'`' {
                            BlockState::InRawString
                        } else {
                            BlockState::Clean
                        };
                        ScanStep::Stop {
                            span: Some(Span::new(start, text.len(), Category::StringLiteral)),
                            exit,
                        }
                    }
                }
            }
        }
    }
}

/// Find the closing delimiter of a quoted literal
///
/// Searches byte-wise from `from`; all delimiters are ASCII so this is
/// UTF-8 safe. When `escapes` is set, a backslash skips the following
/// byte. Returns the position of the closing delimiter itself.
pub fn find_quote_end(text: &str, from: usize, delim: u8, escapes: bool) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        if bytes[pos] == delim {
            return Some(pos);
        }
        if escapes && bytes[pos] == b'\\' {
            pos += 1;
        }
        pos += 1;
    }
    None
}
