//! Structural normalization of a document for tests and host previews.
//!
//! Flattens the CST into serializable summaries: kind tag, span, and nested
//! children. Tests compare these instead of full CST values when only the
//! shape matters; preview layers can consume them as a read-only outline.

use serde::Serialize;

use crate::cst::{Block, Document, Inline};

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub span: (usize, usize),
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BlockSnap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inlines: Vec<InlineSnap>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct InlineSnap {
    pub kind: String,
    pub span: (usize, usize),
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<InlineSnap>,
}

/// Builds the structural summary of a document.
pub fn normalize(doc: &Document) -> Snap {
    Snap {
        blocks: doc.blocks.iter().map(block_snap).collect(),
    }
}

fn block_snap(block: &Block) -> BlockSnap {
    let span = block.span();
    let kind = match block {
        Block::Paragraph { .. } => "Paragraph".to_string(),
        Block::Heading { level, .. } => format!("Heading({level})"),
        Block::FencedCode { fence, info, .. } => {
            format!("FencedCode({:?}, {:?})", fence, info.trim())
        }
        Block::IndentedCode { .. } => "IndentedCode".to_string(),
        Block::ThematicBreak { marker, .. } => format!("ThematicBreak({marker})"),
        Block::Blockquote { .. } => "Blockquote".to_string(),
        Block::BulletList { marker, tight, .. } => format!("BulletList({marker}, tight={tight})"),
        Block::OrderedList { start, tight, .. } => {
            format!("OrderedList(start={start}, tight={tight})")
        }
        Block::HtmlBlock { .. } => "HtmlBlock".to_string(),
        Block::Table { aligns, .. } => format!("Table(cols={})", aligns.len()),
        Block::LinkRefDef { label, .. } => format!("LinkRefDef({label:?})"),
        Block::FootnoteDef { label, .. } => format!("FootnoteDef({label:?})"),
        Block::BlankLines { count, .. } => format!("BlankLines({count})"),
    };

    let children = match block {
        Block::Blockquote { children, .. } | Block::FootnoteDef { children, .. } => {
            children.iter().map(block_snap).collect()
        }
        Block::BulletList { items, .. } | Block::OrderedList { items, .. } => items
            .iter()
            .map(|item| BlockSnap {
                kind: match item.task {
                    Some(true) => "ListItem([x])".to_string(),
                    Some(false) => "ListItem([ ])".to_string(),
                    None => "ListItem".to_string(),
                },
                span: (item.span.start, item.span.end),
                children: item.children.iter().map(block_snap).collect(),
                inlines: Vec::new(),
            })
            .collect(),
        _ => Vec::new(),
    };

    let inlines = block
        .inlines()
        .map(|nodes| nodes.iter().map(inline_snap).collect())
        .unwrap_or_default();

    BlockSnap {
        kind,
        span: (span.start, span.end),
        children,
        inlines,
    }
}

fn inline_snap(node: &Inline) -> InlineSnap {
    let kind = match node {
        Inline::Text { text, .. } => format!("Text({text:?})"),
        Inline::Code { ticks, .. } => format!("Code(ticks={ticks})"),
        Inline::Emphasis { marker, .. } => format!("Emphasis({marker})"),
        Inline::Strong { marker, .. } => format!("Strong({marker})"),
        Inline::Strikethrough { .. } => "Strikethrough".to_string(),
        Inline::Link { dest, .. } => format!("Link({:?})", dest.url),
        Inline::RefLink { label, form, .. } => format!("RefLink({label:?}, {form:?})"),
        Inline::Autolink { url, email, .. } => format!("Autolink({url:?}, email={email})"),
        Inline::Image { dest, .. } => format!("Image({:?})", dest.url),
        Inline::RefImage { label, .. } => format!("RefImage({label:?})"),
        Inline::SoftBreak { .. } => "SoftBreak".to_string(),
        Inline::HardBreak { style, .. } => format!("HardBreak({style:?})"),
        Inline::HtmlInline { .. } => "HtmlInline".to_string(),
        Inline::FootnoteRef { label, .. } => format!("FootnoteRef({label:?})"),
    };
    InlineSnap {
        kind,
        span: (node.span().start, node.span().end),
        children: node
            .children()
            .map(|nodes| nodes.iter().map(inline_snap).collect())
            .unwrap_or_default(),
    }
}
