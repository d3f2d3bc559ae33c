//! Block entry resolution
//!
//! Decides how to resume highlighting a block given the state carried
//! in from the previous block. A construct opened upstream either
//! closes somewhere in this block (resume normal scanning after it) or
//! swallows the whole block.

use super::scanner::find_quote_end;
use super::tokens::{BlockState, Category, Span};

/// How a block starts, given its entering state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Normal highlighting resumes at `offset`
    Resume { offset: usize, span: Option<Span> },
    /// The carried-in construct consumed the whole block
    Consumed { span: Option<Span>, exit: BlockState },
}

/// Resolve the entering state against the block's text
pub fn resolve_entry(entering: BlockState, text: &str) -> EntryOutcome {
    match entering {
        BlockState::Clean => EntryOutcome::Resume {
            offset: 0,
            span: None,
        },
        BlockState::InRawString => match find_quote_end(text, 0, b'`', false) {
            Some(close) => EntryOutcome::Resume {
                offset: close + 1,
                span: Some(Span::new(0, close + 1, Category::StringLiteral)),
            },
            None => EntryOutcome::Consumed {
                span: whole_block(text, Category::StringLiteral),
                exit: BlockState::InRawString,
            },
        },
        BlockState::InBlockComment => match text.find("*/") {
            Some(close) => EntryOutcome::Resume {
                offset: close + 2,
                span: Some(Span::new(0, close + 2, Category::BlockComment)),
            },
            None => EntryOutcome::Consumed {
                span: whole_block(text, Category::BlockComment),
                exit: BlockState::InBlockComment,
            },
        },
        BlockState::InLineComment => {
            let exit = if text.ends_with('\\') {
                BlockState::InLineComment
            } else {
                BlockState::Clean
            };
            EntryOutcome::Consumed {
                span: whole_block(text, Category::LineComment),
                exit,
            }
        }
    }
}

fn whole_block(text: &str, category: Category) -> Option<Span> {
    if text.is_empty() {
        None
    } else {
        Some(Span::new(0, text.len(), category))
    }
}
