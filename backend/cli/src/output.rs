//! Turning a rendered report into what gets printed or saved.

use markdown::{IrParser, Renderer};
use prodsafe_config::OutputFormat;

/// Render a successful report for stdout.
///
/// `color` decides what `Auto` means.
pub fn render_report(format: OutputFormat, markdown: &str, html: &str, color: bool) -> String {
    match format {
        OutputFormat::Html => html.to_string(),
        OutputFormat::Ansi => Renderer::to_ansi(&IrParser::parse(markdown)),
        OutputFormat::Text => Renderer::to_plain_text(&IrParser::parse(markdown)),
        OutputFormat::Auto if color => Renderer::to_ansi(&IrParser::parse(markdown)),
        OutputFormat::Auto => Renderer::to_plain_text(&IrParser::parse(markdown)),
    }
}

/// Wrap a result fragment in a minimal standalone page.
pub fn html_document(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Product Safety Analysis</title>\n\
         </head>\n\
         <body>\n\
         <div id=\"result\">\n{fragment}</div>\n\
         </body>\n\
         </html>\n"
    )
}
