//! Markdown Intermediate Representation
//!
//! Parses markdown into a strongly-typed tree so terminal renderers can walk
//! structure instead of re-scanning markup.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag};
use serde::{Deserialize, Serialize};

use crate::html::markdown_options;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MarkdownNode {
    Heading(u32, Vec<MarkdownNode>),
    Paragraph(Vec<MarkdownNode>),
    Text(String),
    Strong(Vec<MarkdownNode>),
    Emphasis(Vec<MarkdownNode>),
    Strikethrough(Vec<MarkdownNode>),
    InlineCode(String),
    CodeBlock(String, String), // language, content
    List(Option<u64>, Vec<MarkdownNode>), // start number for ordered lists
    ListItem(Vec<MarkdownNode>),
    TaskMarker(bool),
    Blockquote(Vec<MarkdownNode>),
    Link(String, Vec<MarkdownNode>), // url, label
    Image(String, String), // url, alt_text
    Table(Vec<MarkdownNode>),
    TableRow(Vec<MarkdownNode>),
    TableCell(Vec<MarkdownNode>),
    Html(String),
    SoftBreak,
    HardBreak,
    Rule,
}

impl MarkdownNode {
    /// Whether the node flows inside a line rather than starting a block.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Text(_)
                | Self::Strong(_)
                | Self::Emphasis(_)
                | Self::Strikethrough(_)
                | Self::InlineCode(_)
                | Self::Link(..)
                | Self::Image(..)
                | Self::TaskMarker(_)
                | Self::SoftBreak
                | Self::HardBreak
        )
    }

    /// Concatenated text content with all formatting dropped.
    pub fn text_content(nodes: &[MarkdownNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Self::Text(t) | Self::InlineCode(t) => out.push_str(t),
                Self::SoftBreak | Self::HardBreak => out.push(' '),
                Self::Image(_, alt) => out.push_str(alt),
                Self::CodeBlock(_, content) => out.push_str(content),
                Self::Heading(_, c)
                | Self::Paragraph(c)
                | Self::Strong(c)
                | Self::Emphasis(c)
                | Self::Strikethrough(c)
                | Self::List(_, c)
                | Self::ListItem(c)
                | Self::Blockquote(c)
                | Self::Link(_, c)
                | Self::Table(c)
                | Self::TableRow(c)
                | Self::TableCell(c) => out.push_str(&Self::text_content(c)),
                Self::TaskMarker(_) | Self::Html(_) | Self::Rule => {}
            }
        }
        out
    }
}

/// An open container while walking parser events.
enum Frame {
    Heading(u32),
    Paragraph,
    Strong,
    Emphasis,
    Strikethrough,
    CodeBlock(String),
    List(Option<u64>),
    Item,
    Blockquote,
    Link(String),
    Image(String),
    Table,
    TableRow,
    TableCell,
    /// Containers with no IR counterpart; children are spliced into the parent.
    Transparent,
}

impl Frame {
    fn open(tag: Tag<'_>) -> Self {
        match tag {
            Tag::Paragraph => Self::Paragraph,
            Tag::Heading(level, _, _) => Self::Heading(heading_depth(level)),
            Tag::BlockQuote => Self::Blockquote,
            Tag::CodeBlock(CodeBlockKind::Fenced(lang)) => Self::CodeBlock(lang.to_string()),
            Tag::CodeBlock(CodeBlockKind::Indented) => Self::CodeBlock(String::new()),
            Tag::List(start) => Self::List(start),
            Tag::Item => Self::Item,
            Tag::Table(_) => Self::Table,
            Tag::TableHead | Tag::TableRow => Self::TableRow,
            Tag::TableCell => Self::TableCell,
            Tag::Emphasis => Self::Emphasis,
            Tag::Strong => Self::Strong,
            Tag::Strikethrough => Self::Strikethrough,
            Tag::Link(_, url, _) => Self::Link(url.to_string()),
            Tag::Image(_, url, _) => Self::Image(url.to_string()),
            Tag::FootnoteDefinition(_) => Self::Transparent,
        }
    }

    fn close(self, children: Vec<MarkdownNode>) -> Vec<MarkdownNode> {
        let node = match self {
            Self::Heading(level) => MarkdownNode::Heading(level, children),
            Self::Paragraph => MarkdownNode::Paragraph(children),
            Self::Strong => MarkdownNode::Strong(children),
            Self::Emphasis => MarkdownNode::Emphasis(children),
            Self::Strikethrough => MarkdownNode::Strikethrough(children),
            Self::CodeBlock(lang) => {
                MarkdownNode::CodeBlock(lang, MarkdownNode::text_content(&children))
            }
            Self::List(start) => MarkdownNode::List(start, children),
            Self::Item => MarkdownNode::ListItem(children),
            Self::Blockquote => MarkdownNode::Blockquote(children),
            Self::Link(url) => MarkdownNode::Link(url, children),
            Self::Image(url) => MarkdownNode::Image(url, MarkdownNode::text_content(&children)),
            Self::Table => MarkdownNode::Table(children),
            Self::TableRow => MarkdownNode::TableRow(children),
            Self::TableCell => MarkdownNode::TableCell(children),
            Self::Transparent => return children,
        };
        vec![node]
    }
}

fn heading_depth(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Append a node, merging runs of text the parser split apart.
fn push_node(siblings: &mut Vec<MarkdownNode>, node: MarkdownNode) {
    if let MarkdownNode::Text(next) = &node {
        if let Some(MarkdownNode::Text(prev)) = siblings.last_mut() {
            prev.push_str(next);
            return;
        }
    }
    siblings.push(node);
}

pub struct IrParser;

impl IrParser {
    /// Parse markdown into a list of top-level block nodes.
    pub fn parse(markdown: &str) -> Vec<MarkdownNode> {
        let mut stack: Vec<(Frame, Vec<MarkdownNode>)> = Vec::new();
        let mut root: Vec<MarkdownNode> = Vec::new();

        for event in Parser::new_ext(markdown, markdown_options()) {
            let leaf = match event {
                Event::Start(tag) => {
                    stack.push((Frame::open(tag), Vec::new()));
                    continue;
                }
                Event::End(_) => {
                    let Some((frame, children)) = stack.pop() else { continue };
                    let siblings = match stack.last_mut() {
                        Some((_, parent)) => parent,
                        None => &mut root,
                    };
                    for node in frame.close(children) {
                        push_node(siblings, node);
                    }
                    continue;
                }
                Event::Text(text) => MarkdownNode::Text(text.to_string()),
                Event::Code(code) => MarkdownNode::InlineCode(code.to_string()),
                Event::Html(html) => MarkdownNode::Html(html.to_string()),
                Event::FootnoteReference(label) => MarkdownNode::Text(format!("[{label}]")),
                Event::SoftBreak => MarkdownNode::SoftBreak,
                Event::HardBreak => MarkdownNode::HardBreak,
                Event::Rule => MarkdownNode::Rule,
                Event::TaskListMarker(checked) => MarkdownNode::TaskMarker(checked),
            };
            let siblings = match stack.last_mut() {
                Some((_, children)) => children,
                None => &mut root,
            };
            push_node(siblings, leaf);
        }

        root
    }
}
