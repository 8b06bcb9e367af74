//! The page a submit writes into: a loading indicator and a result area.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Display surface driven by [`UploadHandler`](crate::UploadHandler).
pub trait Page {
    fn show_loader(&mut self);
    fn hide_loader(&mut self);
    /// Empty the result area.
    fn clear_result(&mut self);
    /// Replace the result area with plain text (never interpreted as markup).
    fn set_result_text(&mut self, text: &str);
    /// Replace the result area with an HTML fragment.
    fn set_result_html(&mut self, html: &str);
}

/// What the result area currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultContent {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

/// One call made against a page, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOp {
    ShowLoader,
    HideLoader,
    Clear,
    Text(String),
    Html(String),
}

/// In-memory page that keeps its state and a log of every operation.
///
/// The loader flag is shared so code outside the submit (a server handling
/// the request, another task) can observe it while a request is in flight.
#[derive(Debug, Default)]
pub struct MemoryPage {
    loader: Arc<AtomicBool>,
    result: ResultContent,
    history: Vec<PageOp>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loader_visible(&self) -> bool {
        self.loader.load(Ordering::SeqCst)
    }

    /// Handle on the loader state that outlives borrows of the page.
    pub fn loader_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.loader)
    }

    pub fn result(&self) -> &ResultContent {
        &self.result
    }

    pub fn text(&self) -> Option<&str> {
        match &self.result {
            ResultContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn html(&self) -> Option<&str> {
        match &self.result {
            ResultContent::Html(html) => Some(html),
            _ => None,
        }
    }

    pub fn history(&self) -> &[PageOp] {
        &self.history
    }
}

impl Page for MemoryPage {
    fn show_loader(&mut self) {
        self.loader.store(true, Ordering::SeqCst);
        self.history.push(PageOp::ShowLoader);
    }

    fn hide_loader(&mut self) {
        self.loader.store(false, Ordering::SeqCst);
        self.history.push(PageOp::HideLoader);
    }

    fn clear_result(&mut self) {
        self.result = ResultContent::Empty;
        self.history.push(PageOp::Clear);
    }

    fn set_result_text(&mut self, text: &str) {
        self.result = ResultContent::Text(text.to_string());
        self.history.push(PageOp::Text(text.to_string()));
    }

    fn set_result_html(&mut self, html: &str) {
        self.result = ResultContent::Html(html.to_string());
        self.history.push(PageOp::Html(html.to_string()));
    }
}
