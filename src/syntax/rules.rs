//! The fixed Go rule table
//!
//! An ordered list of (pattern, category) rules applied to the
//! non-comment, non-resumed portion of each block. Order is priority:
//! later rules overwrite earlier ones where matches overlap, so the
//! keyword rule (applied last) wins over any other tag on the same
//! token. Patterns are compiled once at startup; a malformed pattern
//! is a fatal initialization error, never a per-block condition.

use regex::Regex;

use crate::error::Result;

use super::tokens::{Category, Span};

/// Builtin type and function names, `|`-separated for the pattern
const BUILTINS: &str = "bool|byte|complex64|complex128|float32|float64|int8|int16|int32|int64|\
                        string|uint8|uint16|uint32|uint64|int|uint|uintptr|true|false|iota|nil|\
                        append|cap|close|closed|complex|copy|imag|len|make|new|panic|print|\
                        println|real|recover";

/// Reserved words, `|`-separated for the pattern
const KEYWORDS: &str = "break|default|func|interface|select|case|defer|go|map|struct|chan|else|\
                        goto|package|switch|const|fallthrough|if|range|type|continue|for|import|\
                        return|var";

/// One immutable (pattern, category) rule
pub struct HighlightRule {
    /// Compiled pattern
    pattern: Regex,
    /// Category assigned to matches
    category: Category,
    /// Capture group to tag (0 = whole match)
    group: usize,
}

impl HighlightRule {
    fn new(pattern: &str, category: Category) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            category,
            group: 0,
        })
    }

    fn with_group(pattern: &str, category: Category, group: usize) -> Result<Self> {
        let mut rule = Self::new(pattern, category)?;
        rule.group = group;
        Ok(rule)
    }

    /// Apply this rule over `text[from..]`
    ///
    /// Finds every non-overlapping occurrence of the pattern and pushes
    /// a block-absolute span for the tagged capture group of each, plus
    /// the matched word for the discovered-word output.
    pub fn apply(&self, text: &str, from: usize, spans: &mut Vec<Span>, words: &mut Vec<String>) {
        for caps in self.pattern.captures_iter(&text[from..]) {
            let m = match caps.get(self.group) {
                Some(m) => m,
                None => continue,
            };
            if m.is_empty() {
                continue;
            }
            spans.push(Span::new(
                from + m.start(),
                from + m.end(),
                self.category,
            ));
            words.push(m.as_str().trim_end().to_string());
        }
    }
}

/// Build the rule table, in priority order (later overwrites earlier)
///
/// 1. numeric literals
/// 2. function calls (identifier before `(`; the paren is not tagged)
/// 3. builtin identifiers
/// 4. keywords
pub fn rule_table() -> Result<Vec<HighlightRule>> {
    Ok(vec![
        HighlightRule::new(
            r"(\b|\.)([0-9]+|0[xX][0-9a-fA-F]+|0[0-7]+)(\.[0-9]+)?([eE][+-]?[0-9]+i?)?\b",
            Category::Number,
        )?,
        // No lookahead in the regex crate: match the paren but tag
        // only the identifier capture.
        HighlightRule::with_group(
            r"\b([a-zA-Z_][a-zA-Z0-9_]+\s*)\(",
            Category::FunctionCall,
            1,
        )?,
        HighlightRule::new(&format!(r"\b({})\b", BUILTINS), Category::BuiltinIdentifier)?,
        HighlightRule::new(&format!(r"\b({})\b", KEYWORDS), Category::Keyword)?,
    ])
}

/// The closed builtin and keyword word lists
///
/// Used to seed the discovered-word set so completion consumers see the
/// full vocabulary even before any of these words appear in a file.
pub fn vocabulary() -> impl Iterator<Item = &'static str> {
    BUILTINS.split('|').chain(KEYWORDS.split('|'))
}
