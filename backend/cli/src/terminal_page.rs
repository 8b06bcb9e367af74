//! `Page` backed by the terminal: the loader is a status line on stderr and
//! the result area is held until the command prints it.

use std::io::Write;

use prodsafe_upload::{Page, ResultContent};

use crate::terminal_output::{DIM, RESET};

const LOADER_TEXT: &str = "Analyzing image…";

pub struct TerminalPage<W: Write> {
    status: W,
    interactive: bool,
    loader_visible: bool,
    result: ResultContent,
}

impl<W: Write> TerminalPage<W> {
    /// `interactive` status lines are drawn in place and erased on hide;
    /// otherwise the loader is a single plain line.
    pub fn new(status: W, interactive: bool) -> Self {
        Self {
            status,
            interactive,
            loader_visible: false,
            result: ResultContent::Empty,
        }
    }

    #[cfg(test)]
    pub fn loader_visible(&self) -> bool {
        self.loader_visible
    }

    pub fn result(&self) -> &ResultContent {
        &self.result
    }

    #[cfg(test)]
    pub fn into_status(self) -> W {
        self.status
    }
}

impl<W: Write> Page for TerminalPage<W> {
    fn show_loader(&mut self) {
        self.loader_visible = true;
        // Status output is best effort; a closed stderr must not fail the submit.
        let _ = if self.interactive {
            write!(self.status, "{DIM}{LOADER_TEXT}{RESET}")
        } else {
            writeln!(self.status, "{LOADER_TEXT}")
        };
        let _ = self.status.flush();
    }

    fn hide_loader(&mut self) {
        if self.loader_visible && self.interactive {
            let _ = write!(self.status, "\r\x1b[2K");
            let _ = self.status.flush();
        }
        self.loader_visible = false;
    }

    fn clear_result(&mut self) {
        self.result = ResultContent::Empty;
    }

    fn set_result_text(&mut self, text: &str) {
        self.result = ResultContent::Text(text.to_string());
    }

    fn set_result_html(&mut self, html: &str) {
        self.result = ResultContent::Html(html.to_string());
    }
}
