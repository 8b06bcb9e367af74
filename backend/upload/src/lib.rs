//! `prodsafe-upload` — the form submit handler.
//!
//! A submit reads the form, rejects it locally when the key or file is
//! missing, and otherwise posts a multipart body to `/analyze` and writes the
//! rendered report (or `Error: <message>`) into a [`Page`].

pub mod client;
pub mod handler;
pub mod page;

#[cfg(test)]
mod test_server;

pub use client::{AnalyzeClient, ANALYZE_PATH};
pub use handler::{Outcome, UploadHandler};
pub use page::{MemoryPage, Page, PageOp, ResultContent};
