//! Per-block highlight orchestration
//!
//! Composes entry resolution, the rule table, and the quote/comment
//! scanner into one pass over a block. All tagging goes through a
//! per-byte paint buffer so that later sources overwrite earlier ones
//! positionally (the scanner wins over rules, the keyword rule wins
//! over the builtin rule) and the returned spans are a minimal set of
//! non-overlapping runs.

use crate::error::Result;

use super::entry::{resolve_entry, EntryOutcome};
use super::rules::{rule_table, HighlightRule};
use super::scanner::{ScanStep, Scanner};
use super::tokens::{BlockState, Category, Span};

/// Output of highlighting one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHighlight {
    /// Non-overlapping spans in ascending offset order
    pub spans: Vec<Span>,
    /// State the next block must enter with
    pub exit: BlockState,
    /// Words matched by the rule table, for completion consumers
    pub words: Vec<String>,
}

/// The Go highlighter
///
/// Immutable after construction; `highlight_block` is a pure function
/// of (entering state, text), so independent blocks may be processed in
/// any order as long as each block enters with its predecessor's exit
/// state.
pub struct GoHighlighter {
    rules: Vec<HighlightRule>,
    scanner: Scanner,
}

impl GoHighlighter {
    /// Compile the rule table and delimiter pattern
    ///
    /// A malformed pattern fails here, at startup, never per block.
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: rule_table()?,
            scanner: Scanner::new()?,
        })
    }

    /// Highlight one block of text given its entering state
    pub fn highlight_block(&self, entering: BlockState, text: &str) -> BlockHighlight {
        let mut paint = PaintBuffer::new(text.len());
        let mut words = Vec::new();

        // 1. Resolve the carried-in state
        let resume = match resolve_entry(entering, text) {
            EntryOutcome::Consumed { span, exit } => {
                if let Some(span) = span {
                    paint.paint(span);
                }
                return BlockHighlight {
                    spans: paint.into_spans(),
                    exit,
                    words,
                };
            }
            EntryOutcome::Resume { offset, span } => {
                if let Some(span) = span {
                    paint.paint(span);
                }
                offset
            }
        };

        // 2. Apply the rule table over the remainder
        let mut rule_spans = Vec::new();
        for rule in &self.rules {
            rule.apply(text, resume, &mut rule_spans, &mut words);
        }
        for span in rule_spans {
            paint.paint(span);
        }

        // 3. Scan for strings and comments, overwriting rule tags
        let mut pos = resume;
        let exit = loop {
            match self.scanner.scan(text, pos) {
                ScanStep::Token { span, resume } => {
                    paint.paint(span);
                    pos = resume;
                }
                ScanStep::Stop { span, exit } => {
                    if let Some(span) = span {
                        paint.paint(span);
                    }
                    break exit;
                }
            }
        };

        BlockHighlight {
            spans: paint.into_spans(),
            exit,
            words,
        }
    }
}

/// Per-byte category buffer with last-wins painting
struct PaintBuffer {
    cells: Vec<Option<Category>>,
}

impl PaintBuffer {
    fn new(len: usize) -> Self {
        Self {
            cells: vec![None; len],
        }
    }

    fn paint(&mut self, span: Span) {
        let end = span.end.min(self.cells.len());
        let start = span.start.min(end);
        for cell in &mut self.cells[start..end] {
            *cell = Some(span.category);
        }
    }

    /// Coalesce painted bytes into minimal non-overlapping spans
    fn into_spans(self) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        for (pos, cell) in self.cells.into_iter().enumerate() {
            let category = match cell {
                Some(category) => category,
                None => continue,
            };
            match spans.last_mut() {
                Some(last) if last.end == pos && last.category == category => {
                    last.end = pos + 1;
                }
                _ => spans.push(Span::new(pos, pos + 1, category)),
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter() -> GoHighlighter {
        GoHighlighter::new().unwrap()
    }

    fn spans_of(entering: BlockState, text: &str) -> (Vec<Span>, BlockState) {
        let result = highlighter().highlight_block(entering, text);
        (result.spans, result.exit)
    }

    #[test]
    fn test_idempotent() {
        let hl = highlighter();
        let first = hl.highlight_block(BlockState::Clean, "x := `a // b /* c");
        let second = hl.highlight_block(BlockState::Clean, "x := `a // b /* c");
        assert_eq!(first, second);
    }

    #[test]
    fn test_line_comment_whole() {
        let (spans, exit) = spans_of(BlockState::Clean, "// hello");
        assert_eq!(spans, vec![Span::new(0, 8, Category::LineComment)]);
        assert_eq!(exit, BlockState::Clean);
    }

    #[test]
    fn test_line_comment_continuation() {
        let (spans, exit) = spans_of(BlockState::Clean, "// hello\\");
        assert_eq!(spans, vec![Span::new(0, 9, Category::LineComment)]);
        assert_eq!(exit, BlockState::InLineComment);
    }

    #[test]
    fn test_block_comment_open() {
        let (spans, exit) = spans_of(BlockState::Clean, "/* start");
        assert_eq!(spans, vec![Span::new(0, 8, Category::BlockComment)]);
        assert_eq!(exit, BlockState::InBlockComment);
    }

    #[test]
    fn test_raw_string_across_three_blocks() {
        let (spans, exit) = spans_of(BlockState::Clean, "x := `abc");
        assert_eq!(exit, BlockState::InRawString);
        assert!(spans.contains(&Span::new(5, 9, Category::StringLiteral)));

        let (spans, exit) = spans_of(BlockState::InRawString, "def");
        assert_eq!(spans, vec![Span::new(0, 3, Category::StringLiteral)]);
        assert_eq!(exit, BlockState::InRawString);

        let (spans, exit) = spans_of(BlockState::InRawString, "ghi`");
        assert_eq!(spans, vec![Span::new(0, 4, Category::StringLiteral)]);
        assert_eq!(exit, BlockState::Clean);
    }

    #[test]
    fn test_number_and_comment_do_not_overlap() {
        let text = "x := 5 // five";
        let (spans, exit) = spans_of(BlockState::Clean, text);
        assert_eq!(exit, BlockState::Clean);
        assert!(spans.contains(&Span::new(5, 6, Category::Number)));
        assert!(spans.contains(&Span::new(7, 14, Category::LineComment)));
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_comment_overrides_rule_tags() {
        // The number inside the comment is painted over
        let (spans, _) = spans_of(BlockState::Clean, "// 42");
        assert_eq!(spans, vec![Span::new(0, 5, Category::LineComment)]);
    }

    #[test]
    fn test_keyword_overrides_function_call() {
        // "func(" matches the function-call rule, but the keyword rule
        // is applied later and wins
        let text = "x := func(y int) int { return y }";
        let (spans, _) = spans_of(BlockState::Clean, text);
        assert!(spans.contains(&Span::new(5, 9, Category::Keyword)));
        assert!(!spans
            .iter()
            .any(|s| s.category == Category::FunctionCall && s.start == 5));
    }

    #[test]
    fn test_builtin_overrides_function_call() {
        let text = "n := len(xs)";
        let (spans, _) = spans_of(BlockState::Clean, text);
        assert!(spans.contains(&Span::new(5, 8, Category::BuiltinIdentifier)));
    }

    #[test]
    fn test_escaped_quote_in_string() {
        // "a\"b" is one literal closed at the final quote
        let text = r#"s := "a\"b""#;
        let (spans, exit) = spans_of(BlockState::Clean, text);
        assert_eq!(exit, BlockState::Clean);
        assert!(spans.contains(&Span::new(5, 11, Category::StringLiteral)));
    }

    #[test]
    fn test_backquote_does_not_honor_escapes() {
        // `a\` closes at the backtick right after the backslash
        let text = r"s := `a\`b";
        let (spans, exit) = spans_of(BlockState::Clean, text);
        assert_eq!(exit, BlockState::Clean);
        assert!(spans.contains(&Span::new(5, 9, Category::StringLiteral)));
    }

    #[test]
    fn test_unterminated_double_quote_exits_clean() {
        let (_, exit) = spans_of(BlockState::Clean, r#"s := "abc"#);
        assert_eq!(exit, BlockState::Clean);
    }

    #[test]
    fn test_multiple_constructs_one_block() {
        let text = r#"a("x") /* c */ + 7"#;
        let (spans, exit) = spans_of(BlockState::Clean, text);
        assert_eq!(exit, BlockState::Clean);
        assert!(spans.contains(&Span::new(2, 5, Category::StringLiteral)));
        assert!(spans.contains(&Span::new(7, 14, Category::BlockComment)));
        assert!(spans.contains(&Span::new(17, 18, Category::Number)));
    }

    #[test]
    fn test_resumed_block_comment_then_code() {
        let (spans, exit) = spans_of(BlockState::InBlockComment, "end */ y := 3");
        assert_eq!(exit, BlockState::Clean);
        assert!(spans.contains(&Span::new(0, 6, Category::BlockComment)));
        assert!(spans.contains(&Span::new(12, 13, Category::Number)));
    }

    #[test]
    fn test_consumed_block_skips_rules() {
        // A fully consumed block gets no rule tags at all
        let result = highlighter().highlight_block(BlockState::InLineComment, "var x = 1");
        assert_eq!(result.spans, vec![Span::new(0, 9, Category::LineComment)]);
        assert!(result.words.is_empty());
    }

    #[test]
    fn test_empty_block() {
        let (spans, exit) = spans_of(BlockState::Clean, "");
        assert!(spans.is_empty());
        assert_eq!(exit, BlockState::Clean);

        let (spans, exit) = spans_of(BlockState::InRawString, "");
        assert!(spans.is_empty());
        assert_eq!(exit, BlockState::InRawString);
    }

    #[test]
    fn test_words_collected() {
        let result = highlighter().highlight_block(BlockState::Clean, "n := len(xs) // len");
        assert!(result.words.iter().any(|w| w == "len"));
    }

    #[test]
    fn test_paint_buffer_last_wins() {
        let mut paint = PaintBuffer::new(10);
        paint.paint(Span::new(0, 10, Category::Number));
        paint.paint(Span::new(3, 6, Category::Keyword));
        let spans = paint.into_spans();
        assert_eq!(
            spans,
            vec![
                Span::new(0, 3, Category::Number),
                Span::new(3, 6, Category::Keyword),
                Span::new(6, 10, Category::Number),
            ]
        );
    }

    #[test]
    fn test_paint_buffer_clamps_out_of_range() {
        let mut paint = PaintBuffer::new(4);
        paint.paint(Span::new(2, 99, Category::Number));
        assert_eq!(paint.into_spans(), vec![Span::new(2, 4, Category::Number)]);
    }
}
