//! Terminal output utilities: ANSI helpers, colour detection, notes on stderr.

use std::io::IsTerminal;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Whether stdout is an interactive colour terminal.
pub fn stdout_is_color_terminal() -> bool {
    std::io::stdout().is_terminal() && supports_color()
}

/// Whether stderr is an interactive colour terminal.
pub fn stderr_is_color_terminal() -> bool {
    std::io::stderr().is_terminal() && supports_color()
}

/// Print a formatted ERROR note to stderr.
pub fn note_error(msg: &str) {
    if stderr_is_color_terminal() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("{msg}");
    }
}

/// Print a formatted SUCCESS note to stderr.
pub fn note_success(msg: &str) {
    if stderr_is_color_terminal() {
        eprintln!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        eprintln!("OK: {msg}");
    }
}
