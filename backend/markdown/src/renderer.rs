//! Renderers for the Markdown IR
//!
//! Turns the AST into plain text or ANSI-styled terminal output.

use crate::ir::MarkdownNode;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const ITALIC: &str = "\x1b[3m";
const UNDERLINE: &str = "\x1b[4m";
const STRIKE: &str = "\x1b[9m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

/// Span kinds a styler may decorate.
#[derive(Clone, Copy)]
enum Span {
    Heading,
    Strong,
    Emphasis,
    Strike,
    Code,
    Link,
    Quote,
    Rule,
}

trait Styler {
    fn wrap(&self, span: Span, text: &str) -> String;
}

struct Plain;

impl Styler for Plain {
    fn wrap(&self, span: Span, text: &str) -> String {
        match span {
            Span::Rule => "---".to_string(),
            _ => text.to_string(),
        }
    }
}

struct Ansi;

impl Styler for Ansi {
    fn wrap(&self, span: Span, text: &str) -> String {
        let code = match span {
            Span::Heading => return format!("{BOLD}{CYAN}{text}{RESET}"),
            Span::Strong => BOLD,
            Span::Emphasis => ITALIC,
            Span::Strike => STRIKE,
            Span::Code => YELLOW,
            Span::Link => return format!("{UNDERLINE}{BLUE}{text}{RESET}"),
            Span::Quote => DIM,
            Span::Rule => return format!("{DIM}{}{RESET}", "─".repeat(40)),
        };
        format!("{code}{text}{RESET}")
    }
}

pub struct Renderer;

impl Renderer {
    /// Renders AST to plain text, stripping all formatting.
    pub fn to_plain_text(nodes: &[MarkdownNode]) -> String {
        finish(render_blocks(nodes, &Plain))
    }

    /// Renders AST with ANSI styling for a colour terminal.
    pub fn to_ansi(nodes: &[MarkdownNode]) -> String {
        finish(render_blocks(nodes, &Ansi))
    }
}

fn finish(mut out: String) -> String {
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Render a sequence of block nodes. Consecutive inline nodes (tight list
/// items) are gathered into a single line.
fn render_blocks(nodes: &[MarkdownNode], s: &dyn Styler) -> String {
    let mut out = String::new();
    let mut line: Vec<MarkdownNode> = Vec::new();

    for node in nodes {
        if node.is_inline() {
            line.push(node.clone());
            continue;
        }
        if !line.is_empty() {
            out.push_str(&render_inline(&line, s));
            out.push('\n');
            line.clear();
        }
        render_block(node, s, &mut out);
    }
    if !line.is_empty() {
        out.push_str(&render_inline(&line, s));
        out.push('\n');
    }
    out
}

fn render_block(node: &MarkdownNode, s: &dyn Styler, out: &mut String) {
    match node {
        MarkdownNode::Heading(_, children) => {
            out.push_str(&s.wrap(Span::Heading, &render_inline(children, s)));
            out.push_str("\n\n");
        }
        MarkdownNode::Paragraph(children) => {
            out.push_str(&render_inline(children, s));
            out.push_str("\n\n");
        }
        MarkdownNode::List(start, items) => {
            for (i, item) in items.iter().enumerate() {
                let marker = match start {
                    Some(n) => format!("{}. ", n + i as u64),
                    None => "- ".to_string(),
                };
                let body = match item {
                    MarkdownNode::ListItem(children) => render_blocks(children, s),
                    other => render_blocks(std::slice::from_ref(other), s),
                };
                let pad = " ".repeat(marker.chars().count());
                prefix_lines(body.trim_end(), &marker, &pad, out);
            }
            out.push('\n');
        }
        MarkdownNode::Blockquote(children) => {
            let body = render_blocks(children, s);
            let bar = s.wrap(Span::Quote, "> ");
            prefix_lines(body.trim_end(), &bar, &bar, out);
            out.push('\n');
        }
        MarkdownNode::CodeBlock(_, content) => {
            for line in content.lines() {
                out.push_str("    ");
                out.push_str(&s.wrap(Span::Code, line));
                out.push('\n');
            }
            out.push('\n');
        }
        MarkdownNode::Table(rows) => {
            for row in rows {
                let MarkdownNode::TableRow(cells) = row else { continue };
                let rendered: Vec<String> = cells
                    .iter()
                    .map(|cell| match cell {
                        MarkdownNode::TableCell(children) => render_inline(children, s),
                        other => render_inline(std::slice::from_ref(other), s),
                    })
                    .collect();
                out.push_str("| ");
                out.push_str(&rendered.join(" | "));
                out.push_str(" |\n");
            }
            out.push('\n');
        }
        MarkdownNode::Rule => {
            out.push_str(&s.wrap(Span::Rule, ""));
            out.push_str("\n\n");
        }
        MarkdownNode::Html(html) => {
            out.push_str(html.trim_end());
            out.push('\n');
        }
        // Stray rows or cells outside a table, or bare list items.
        MarkdownNode::ListItem(children)
        | MarkdownNode::TableRow(children)
        | MarkdownNode::TableCell(children) => out.push_str(&render_blocks(children, s)),
        inline => {
            out.push_str(&render_inline(std::slice::from_ref(inline), s));
            out.push('\n');
        }
    }
}

fn render_inline(nodes: &[MarkdownNode], s: &dyn Styler) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            MarkdownNode::Text(text) => out.push_str(text),
            MarkdownNode::Strong(c) => out.push_str(&s.wrap(Span::Strong, &render_inline(c, s))),
            MarkdownNode::Emphasis(c) => {
                out.push_str(&s.wrap(Span::Emphasis, &render_inline(c, s)))
            }
            MarkdownNode::Strikethrough(c) => {
                out.push_str(&s.wrap(Span::Strike, &render_inline(c, s)))
            }
            MarkdownNode::InlineCode(code) => out.push_str(&s.wrap(Span::Code, code)),
            MarkdownNode::Link(url, label) => {
                let text = render_inline(label, s);
                if MarkdownNode::text_content(label) == *url {
                    out.push_str(&s.wrap(Span::Link, &text));
                } else {
                    out.push_str(&format!("{} ({url})", s.wrap(Span::Link, &text)));
                }
            }
            MarkdownNode::Image(_, alt) => out.push_str(&format!("[image: {alt}]")),
            MarkdownNode::TaskMarker(true) => out.push_str("[x] "),
            MarkdownNode::TaskMarker(false) => out.push_str("[ ] "),
            MarkdownNode::SoftBreak => out.push(' '),
            MarkdownNode::HardBreak => out.push('\n'),
            MarkdownNode::Html(html) => out.push_str(html),
            block => out.push_str(render_blocks(std::slice::from_ref(block), s).trim_end()),
        }
    }
    out
}

/// Prefix the first line with `first` and every later non-empty line with `rest`.
fn prefix_lines(body: &str, first: &str, rest: &str, out: &mut String) {
    for (i, line) in body.lines().enumerate() {
        if i == 0 {
            out.push_str(first);
        } else if !line.is_empty() {
            out.push_str(rest);
        }
        out.push_str(line);
        out.push('\n');
    }
    if body.is_empty() {
        out.push_str(first.trim_end());
        out.push('\n');
    }
}
