/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Green for taken doses, yellow for pending ones still ahead, red for
/// pending ones already past.
pub fn color_for_dose(taken: bool, overdue: bool) -> &'static str {
    if taken {
        GREEN
    } else if overdue {
        RED
    } else {
        YELLOW
    }
}

/// Returns the value in grey when it is empty or "--".
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        paint(GREY, "--")
    } else {
        value.to_string()
    }
}

/// False when `NO_COLOR` is set (any value).
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// `text` wrapped in `color`, or plain when colours are off.
pub fn paint(color: &str, text: impl std::fmt::Display) -> String {
    if color_enabled() {
        format!("{}{}{}", color, text, RESET)
    } else {
        text.to_string()
    }
}
