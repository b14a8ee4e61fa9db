//! Formatting utilities used for CLI outputs.

use crate::utils::colors::color_enabled;
use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    if color_enabled() {
        format!("\x1b[1m{}\x1b[0m", s)
    } else {
        s.to_string()
    }
}

/// Left-align on the displayed width, so accents and emoji do not break
/// the columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(pad))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(pad), s)
}

pub fn taken_mark(taken: bool) -> &'static str {
    if taken { "✔ taken" } else { "○ pending" }
}
