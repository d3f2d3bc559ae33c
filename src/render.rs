//! Terminal rendering of highlighted lines
//!
//! Turns a line of text plus its categorized spans into styled output
//! on any writer, with an optional dim line-number gutter and
//! width-aware truncation for narrow terminals.

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, Span, Style, Theme};

/// Renders highlighted lines to a writer
pub struct Renderer {
    theme: Theme,
    color: bool,
    /// Gutter width in digits, None = no line numbers
    gutter_width: Option<usize>,
    /// Display-column budget per line, None = unlimited
    max_width: Option<usize>,
}

impl Renderer {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self {
            theme,
            color,
            gutter_width: None,
            max_width: None,
        }
    }

    /// Builder: show line numbers, sized for `line_count` lines
    pub fn with_line_numbers(mut self, line_count: usize) -> Self {
        self.gutter_width = Some(digits(line_count));
        self
    }

    /// Builder: truncate lines to a display width
    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Render one line (1-based number) with its spans, plus newline
    ///
    /// Spans must be non-overlapping and in ascending offset order, as
    /// produced by the highlighter.
    pub fn render_line<W: Write>(
        &self,
        out: &mut W,
        line_no: usize,
        text: &str,
        spans: &[Span],
    ) -> Result<()> {
        let mut budget = self.max_width;

        if let Some(width) = self.gutter_width {
            if self.color {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
            queue!(out, Print(format!("{:>width$} ", line_no, width = width)))?;
            if self.color {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
            if let Some(b) = budget.as_mut() {
                *b = b.saturating_sub(width + 1);
            }
        }

        let mut pos = 0;
        for span in spans {
            if span.start > pos {
                self.write_segment(out, &text[pos..span.start], None, &mut budget)?;
            }
            let style = self.theme.style(span.category);
            self.write_segment(out, &text[span.start..span.end], Some(style), &mut budget)?;
            pos = span.end;
        }
        if pos < text.len() {
            self.write_segment(out, &text[pos..], None, &mut budget)?;
        }

        queue!(out, Print('\n'))?;
        Ok(())
    }

    fn write_segment<W: Write>(
        &self,
        out: &mut W,
        text: &str,
        style: Option<Style>,
        budget: &mut Option<usize>,
    ) -> Result<()> {
        let text = clip(text, budget);
        if text.is_empty() {
            return Ok(());
        }

        let style = style.filter(|s| self.color && !s.is_default());
        match style {
            Some(style) => {
                if style.fg != Color::Default {
                    queue!(out, SetForegroundColor(term_color(style.fg)))?;
                }
                if style.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if style.italic {
                    queue!(out, SetAttribute(Attribute::Italic))?;
                }
                if style.underline {
                    queue!(out, SetAttribute(Attribute::Underlined))?;
                }
                queue!(out, Print(text), SetAttribute(Attribute::Reset))?;
            }
            None => queue!(out, Print(text))?,
        }
        Ok(())
    }
}

/// Clip a segment to the remaining display-width budget
fn clip<'a>(text: &'a str, budget: &mut Option<usize>) -> &'a str {
    let limit = match budget {
        Some(limit) => limit,
        None => return text,
    };

    let mut width = 0;
    let mut end = 0;
    for (i, ch) in text.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > *limit {
            break;
        }
        width += ch_width;
        end = i + ch.len_utf8();
    }

    *limit -= width;
    &text[..end]
}

fn digits(n: usize) -> usize {
    let mut n = n.max(1);
    let mut count = 0;
    while n > 0 {
        n /= 10;
        count += 1;
    }
    count
}

/// Map a palette color to its crossterm equivalent
fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}
