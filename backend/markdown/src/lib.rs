//! Markdown rendering for analysis reports.
//!
//! Reports come back from the server as markdown. They are rendered to HTML
//! for the result area, or parsed into a small typed IR and rendered to plain
//! text or ANSI for terminal output.

pub mod html;
pub mod ir;
pub mod renderer;

pub use html::{markdown_options, to_html};
pub use ir::{IrParser, MarkdownNode};
pub use renderer::Renderer;
