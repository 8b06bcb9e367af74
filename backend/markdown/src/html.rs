//! Markdown to HTML.

use pulldown_cmark::{html, Options, Parser};

/// Extensions enabled for every parse: the GFM subset a browser-side
/// renderer such as `marked` turns on by default. Raw HTML passes through.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render markdown to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
