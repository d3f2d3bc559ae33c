//! Visual styles and themes
//!
//! Maps semantic categories to terminal presentation. The core never
//! consults this module; only the renderer does.

use crate::error::{GosynError, Result};

use super::tokens::Category;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color from its theme-file name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Color::Default),
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "bright-black" => Some(Color::BrightBlack),
            "bright-red" => Some(Color::BrightRed),
            "bright-green" => Some(Color::BrightGreen),
            "bright-yellow" => Some(Color::BrightYellow),
            "bright-blue" => Some(Color::BrightBlue),
            "bright-magenta" => Some(Color::BrightMagenta),
            "bright-cyan" => Some(Color::BrightCyan),
            "bright-white" => Some(Color::BrightWhite),
            _ => None,
        }
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
}

impl Style {
    /// Create a style with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Parse a style from a theme-file value such as "blue bold"
    ///
    /// The value is whitespace-separated: at most one color name,
    /// any number of attribute names (bold, italic, underline).
    pub fn parse(value: &str) -> Result<Self> {
        let mut style = Style::default();
        for word in value.split_whitespace() {
            match word {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                other => {
                    style.fg = Color::from_name(other).ok_or_else(|| {
                        GosynError::Theme(format!("unknown color or attribute: {}", other))
                    })?;
                }
            }
        }
        Ok(style)
    }
}

/// A mapping from category to terminal style
///
/// The default theme follows the reference palette: keywords and
/// builtins dark blue (keywords bold), function calls bright blue,
/// numbers magenta, strings green, comments cyan.
#[derive(Debug, Clone)]
pub struct Theme {
    styles: [(Category, Style); 7],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            styles: [
                (Category::Number, Style::fg(Color::Magenta)),
                (Category::FunctionCall, Style::fg(Color::BrightBlue)),
                (Category::BuiltinIdentifier, Style::fg(Color::Blue)),
                (Category::Keyword, Style::fg(Color::Blue).with_bold()),
                (Category::StringLiteral, Style::fg(Color::Green)),
                (Category::LineComment, Style::fg(Color::Cyan)),
                (Category::BlockComment, Style::fg(Color::Cyan)),
            ],
        }
    }
}

impl Theme {
    /// Get the style for a category
    pub fn style(&self, category: Category) -> Style {
        self.styles
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    /// Set the style for a category
    pub fn set_style(&mut self, category: Category, style: Style) {
        for entry in self.styles.iter_mut() {
            if entry.0 == category {
                entry.1 = style;
            }
        }
    }

    /// Load a theme from TOML text, starting from the default theme
    ///
    /// Keys are category names (see [`Category::name`]), values are
    /// strings such as `"green"` or `"blue bold"`. Unknown keys are
    /// rejected so typos do not silently fall back to defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| GosynError::Theme(e.to_string()))?;

        let mut theme = Theme::default();
        for (key, value) in &table {
            let category = Category::from_name(key)
                .ok_or_else(|| GosynError::Theme(format!("unknown category: {}", key)))?;
            let value = value
                .as_str()
                .ok_or_else(|| GosynError::Theme(format!("{}: expected a string value", key)))?;
            theme.set_style(category, Style::parse(value)?);
        }
        Ok(theme)
    }
}
