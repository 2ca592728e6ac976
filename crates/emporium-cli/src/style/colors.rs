//! Semantic color palette for terminal output.

use emporium_rbac::TriState;
use owo_colors::{OwoColorize, Style};

pub fn success_style() -> Style {
    Style::new().green().bold()
}

pub fn error_style() -> Style {
    Style::new().red().bold()
}

pub fn warning_style() -> Style {
    Style::new().yellow()
}

pub fn muted_style() -> Style {
    Style::new().dimmed()
}

pub fn header_style() -> Style {
    Style::new().bold()
}

/// Trait extension to apply semantic styles.
pub trait SemanticStyle: Sized {
    /// Green bold.
    fn success(&self) -> String;
    /// Red bold.
    fn error(&self) -> String;
    /// Yellow.
    fn warning(&self) -> String;
    /// Dimmed.
    fn muted(&self) -> String;
    /// Bold.
    fn header(&self) -> String;
}

fn styled<T: std::fmt::Display>(value: &T, style: Style) -> String {
    if super::no_color() {
        value.to_string()
    } else {
        value.style(style).to_string()
    }
}

impl<T: std::fmt::Display> SemanticStyle for T {
    fn success(&self) -> String {
        styled(self, success_style())
    }

    fn error(&self) -> String {
        styled(self, error_style())
    }

    fn warning(&self) -> String {
        styled(self, warning_style())
    }

    fn muted(&self) -> String {
        styled(self, muted_style())
    }

    fn header(&self) -> String {
        styled(self, header_style())
    }
}

/// Checkbox glyph for a category state.
pub fn tri_state_marker(state: TriState) -> String {
    match state {
        TriState::Full => "[x]".success(),
        TriState::Partial => "[-]".warning(),
        TriState::Empty => "[ ]".muted(),
    }
}
