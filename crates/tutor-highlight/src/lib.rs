//! Terminal colors and syntax highlighting for tutor.
//!
//! Answers, topic listings and status reports are styled with a small set of [`Tone`]s.
//! Configuration and JSON output can additionally be syntax highlighted with
//! [`Highlighter`].

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Scores at or above this are shown as confident.
pub const HIGH_CONFIDENCE: f32 = 0.8;

/// Scores at or above this (and below [`HIGH_CONFIDENCE`]) are shown as tentative.
pub const MEDIUM_CONFIDENCE: f32 = 0.5;

/// Resets all terminal attributes.
const RESET: &str = "\x1b[0m";

/// Syntax highlighter for structured terminal output.
pub struct Highlighter {
    /// Language definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Lazily loaded themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Nord theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Nord,
        }
    }

    /// Highlights TOML.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights `content` as the language named by `syntax`, an extension or a name.
    ///
    /// Unknown languages are rendered as plain text.
    pub fn highlight(&self, content: &str, syntax: &str) -> String {
        let syntax = self.find_syntax(syntax);
        let mut lines = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        output.push_str(RESET);
        output
    }

    /// Resolves a syntax by extension, then by name, then falls back to plain text.
    fn find_syntax(&self, syntax: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_extension(syntax)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

/// Text styles used across the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Bold cyan, for section and topic headings.
    Header,
    /// Bold.
    Subheader,
    /// Faint, for secondary details.
    Dim,
    /// Green.
    Success,
    /// Yellow.
    Warning,
    /// Red.
    Error,
}

impl Tone {
    /// ANSI SGR sequence that starts this tone.
    pub fn code(self) -> &'static str {
        match self {
            Self::Header => "\x1b[1;36m",
            Self::Subheader => "\x1b[1m",
            Self::Dim => "\x1b[2m",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
        }
    }

    /// Wraps `text` in this tone.
    pub fn paint(self, text: &str) -> String {
        format!("{}{text}{RESET}", self.code())
    }
}

/// Formats a heading.
pub fn header(text: &str) -> String {
    Tone::Header.paint(text)
}

/// Formats a subheading.
pub fn subheader(text: &str) -> String {
    Tone::Subheader.paint(text)
}

/// Formats secondary text.
pub fn dim(text: &str) -> String {
    Tone::Dim.paint(text)
}

/// Formats a success message.
pub fn success(text: &str) -> String {
    Tone::Success.paint(text)
}

/// Formats a warning.
pub fn warning(text: &str) -> String {
    Tone::Warning.paint(text)
}

/// Formats an error.
pub fn error(text: &str) -> String {
    Tone::Error.paint(text)
}

/// Formats a match score with two decimals, colored by how confident it is.
pub fn confidence(score: f32) -> String {
    let tone = if score >= HIGH_CONFIDENCE {
        Tone::Success
    } else if score >= MEDIUM_CONFIDENCE {
        Tone::Warning
    } else {
        Tone::Error
    };
    tone.paint(&format!("{score:.2}"))
}

/// Indents every non-empty line of `content` by two spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_toml() {
        let hl = Highlighter::new();
        let output = hl.highlight_toml("[match]\nfuzzy_limit = 3\n");

        assert!(output.contains("\x1b[38;2;"));
        assert!(output.contains("fuzzy_limit"));
        assert!(output.ends_with(RESET));
    }

    #[test]
    fn test_highlight_json() {
        let hl = Highlighter::new();
        let output = hl.highlight_json("{\"type\": \"answer\"}\n");

        assert!(output.contains("\x1b[38;2;"));
        assert!(output.contains("answer"));
    }

    #[test]
    fn test_unknown_syntax_is_plain() {
        let hl = Highlighter::new();
        let output = hl.highlight("just words\n", "no-such-language");
        assert!(output.contains("just words"));
    }

    #[test]
    fn test_toml_and_json_syntaxes_available() {
        let syntaxes = extra_syntaxes();
        assert!(syntaxes.find_syntax_by_extension("toml").is_some());
        assert!(syntaxes.find_syntax_by_extension("json").is_some());
    }

    #[test]
    fn test_tones() {
        let h = header("Topics");
        assert!(h.starts_with(Tone::Header.code()));
        assert!(h.ends_with(RESET));
        assert!(h.contains("Topics"));

        assert_eq!(dim("x"), format!("{}x{RESET}", Tone::Dim.code()));
    }

    #[test]
    fn test_confidence_tone() {
        assert!(confidence(1.0).starts_with(Tone::Success.code()));
        assert!(confidence(0.8).contains("0.80"));
        assert!(confidence(0.6).starts_with(Tone::Warning.code()));
        assert!(confidence(0.31).starts_with(Tone::Error.code()));
    }

    #[test]
    fn test_indent_content() {
        assert_eq!(indent_content("a\n\nb"), "  a\n\n  b");
    }
}
