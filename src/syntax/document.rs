//! Document-level highlight driving
//!
//! The per-block core is pure; something still has to own the side
//! table of block states and re-run blocks in order when an edit
//! changes an exit state upstream. This module is that owner: it keeps
//! per-line entry/exit states and cached spans, and on refresh
//! recomputes forward from the first invalid line, skipping every line
//! whose cached result is still valid for the state it enters with.

use std::collections::BTreeSet;

use crate::error::Result;

use super::highlighter::GoHighlighter;
use super::rules::vocabulary;
use super::tokens::{BlockState, Span};

/// Incremental highlighter for a whole document
pub struct DocumentHighlighter {
    highlighter: GoHighlighter,
    /// State each line was last highlighted with
    entry_states: Vec<BlockState>,
    /// State each line last produced
    exit_states: Vec<BlockState>,
    /// Cached spans per line (None = needs recomputation)
    cached: Vec<Option<Vec<Span>>>,
    /// First line that may be stale
    invalid_from: usize,
    /// Deduplicated words seen so far, seeded with the Go vocabulary
    words: BTreeSet<String>,
}

impl DocumentHighlighter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            highlighter: GoHighlighter::new()?,
            entry_states: Vec::new(),
            exit_states: Vec::new(),
            cached: Vec::new(),
            invalid_from: 0,
            words: vocabulary().map(str::to_string).collect(),
        })
    }

    /// Number of lines currently tracked
    pub fn line_count(&self) -> usize {
        self.cached.len()
    }

    /// Note that a line's text changed
    pub fn line_edited(&mut self, line: usize) {
        if let Some(slot) = self.cached.get_mut(line) {
            *slot = None;
        }
        self.invalid_from = self.invalid_from.min(line);
    }

    /// Note that a line was inserted before `line`
    pub fn line_inserted(&mut self, line: usize) {
        let line = line.min(self.cached.len());
        self.entry_states.insert(line, BlockState::Clean);
        self.exit_states.insert(line, BlockState::Clean);
        self.cached.insert(line, None);
        self.invalid_from = self.invalid_from.min(line);
    }

    /// Note that a line was removed
    pub fn line_removed(&mut self, line: usize) {
        if line >= self.cached.len() {
            return;
        }
        self.entry_states.remove(line);
        self.exit_states.remove(line);
        self.cached.remove(line);
        // The following line inherits a possibly different entry state
        self.invalid_from = self.invalid_from.min(line);
    }

    /// Bring the whole document up to date
    ///
    /// Walks forward from the first invalid line, recomputing only
    /// lines that are stale or whose entry state no longer matches
    /// what they were last highlighted with. A cascade therefore ends
    /// as soon as an edit stops changing exit states, and a later
    /// stale line is still picked up.
    pub fn refresh<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.resize(lines.len());

        let mut line = self.invalid_from;
        while line < lines.len() {
            let entry = if line == 0 {
                BlockState::Clean
            } else {
                self.exit_states[line - 1]
            };

            if self.cached[line].is_some() && self.entry_states[line] == entry {
                line += 1;
                continue;
            }

            let result = self.highlighter.highlight_block(entry, lines[line].as_ref());
            self.entry_states[line] = entry;
            self.exit_states[line] = result.exit;
            self.cached[line] = Some(result.spans);
            self.words.extend(result.words);
            line += 1;
        }

        self.invalid_from = lines.len();
    }

    /// Spans for a line, empty if never highlighted
    pub fn spans(&self, line: usize) -> &[Span] {
        self.cached
            .get(line)
            .and_then(|c| c.as_deref())
            .unwrap_or(&[])
    }

    /// Exit state of a line after its last highlighting pass
    pub fn exit_state(&self, line: usize) -> BlockState {
        self.exit_states.get(line).copied().unwrap_or_default()
    }

    /// All words discovered so far, in sorted order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    fn resize(&mut self, line_count: usize) {
        if line_count < self.cached.len() {
            self.entry_states.truncate(line_count);
            self.exit_states.truncate(line_count);
            self.cached.truncate(line_count);
        } else if line_count > self.cached.len() {
            self.invalid_from = self.invalid_from.min(self.cached.len());
            self.entry_states.resize(line_count, BlockState::Clean);
            self.exit_states.resize(line_count, BlockState::Clean);
            self.cached.resize(line_count, None);
        }
        self.invalid_from = self.invalid_from.min(line_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::Category;

    fn doc_with(lines: &[&str]) -> DocumentHighlighter {
        let mut doc = DocumentHighlighter::new().unwrap();
        doc.refresh(lines);
        doc
    }

    #[test]
    fn test_initial_refresh() {
        let doc = doc_with(&["package main", "", "// entry point"]);
        assert_eq!(doc.line_count(), 3);
        assert_eq!(
            doc.spans(0),
            &[Span::new(0, 7, Category::Keyword)]
        );
        assert!(doc.spans(1).is_empty());
        assert_eq!(doc.spans(2), &[Span::new(0, 14, Category::LineComment)]);
        assert_eq!(doc.exit_state(2), BlockState::Clean);
    }

    #[test]
    fn test_block_comment_cascades_forward() {
        let doc = doc_with(&["/* open", "x := 1", "still */ y := 2"]);
        assert_eq!(doc.exit_state(0), BlockState::InBlockComment);
        // Middle line is entirely comment despite looking like code
        assert_eq!(doc.spans(1), &[Span::new(0, 6, Category::BlockComment)]);
        assert_eq!(doc.exit_state(2), BlockState::Clean);
        assert!(doc.spans(2).contains(&Span::new(0, 8, Category::BlockComment)));
    }

    #[test]
    fn test_edit_reopens_downstream_lines() {
        let mut doc = doc_with(&["x := 1", "y := 2"]);
        assert!(doc.spans(1).contains(&Span::new(5, 6, Category::Number)));

        // Turn line 0 into an open block comment; line 1 must flip
        let lines = ["/* now open", "y := 2"];
        doc.line_edited(0);
        doc.refresh(&lines);
        assert_eq!(doc.exit_state(0), BlockState::InBlockComment);
        assert_eq!(doc.spans(1), &[Span::new(0, 6, Category::BlockComment)]);

        // And close it again
        let lines = ["/* closed */", "y := 2"];
        doc.line_edited(0);
        doc.refresh(&lines);
        assert_eq!(doc.exit_state(0), BlockState::Clean);
        assert!(doc.spans(1).contains(&Span::new(5, 6, Category::Number)));
    }

    #[test]
    fn test_cascade_stops_when_state_settles() {
        let mut doc = doc_with(&["a := 1", "b := 2", "c := 3"]);
        let before = doc.spans(2).to_vec();

        // Editing line 0 without changing its exit state must not
        // disturb the cached results of later lines
        let lines = ["a := 10", "b := 2", "c := 3"];
        doc.line_edited(0);
        doc.refresh(&lines);
        assert!(doc.spans(0).contains(&Span::new(5, 7, Category::Number)));
        assert_eq!(doc.spans(2), before.as_slice());
    }

    #[test]
    fn test_two_separate_edits_both_refresh() {
        let mut doc = doc_with(&["a := 1", "b := 2", "c := 3"]);

        let lines = ["a := 10", "b := 2", "c := 30"];
        doc.line_edited(2);
        doc.line_edited(0);
        doc.refresh(&lines);
        assert!(doc.spans(0).contains(&Span::new(5, 7, Category::Number)));
        assert!(doc.spans(2).contains(&Span::new(5, 7, Category::Number)));
    }

    #[test]
    fn test_line_insert_and_remove() {
        let mut doc = doc_with(&["x := `open", "tail` done"]);
        assert_eq!(doc.exit_state(0), BlockState::InRawString);

        // Insert a line inside the raw string
        let lines = ["x := `open", "middle", "tail` done"];
        doc.line_inserted(1);
        doc.refresh(&lines);
        assert_eq!(doc.spans(1), &[Span::new(0, 6, Category::StringLiteral)]);
        assert_eq!(doc.exit_state(1), BlockState::InRawString);
        assert_eq!(doc.exit_state(2), BlockState::Clean);

        // Remove it again
        let lines = ["x := `open", "tail` done"];
        doc.line_removed(1);
        doc.refresh(&lines);
        assert_eq!(doc.spans(1)[0], Span::new(0, 5, Category::StringLiteral));
    }

    #[test]
    fn test_document_shrinks() {
        let mut doc = doc_with(&["a := 1", "b := 2"]);
        doc.refresh(&["a := 1"]);
        assert_eq!(doc.line_count(), 1);
        assert!(doc.spans(1).is_empty());
        assert_eq!(doc.exit_state(1), BlockState::Clean);
    }

    #[test]
    fn test_words_accumulate() {
        let mut doc = doc_with(&["total := sum(parts)"]);
        // Seeded vocabulary plus discovered identifiers
        assert!(doc.words().any(|w| w == "fallthrough"));
        assert!(doc.words().any(|w| w == "sum"));

        doc.line_edited(0);
        doc.refresh(&["total := sum(parts) + scale(f)"]);
        assert!(doc.words().any(|w| w == "scale"));
    }
}
