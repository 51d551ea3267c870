//! Lossless serialization.
//!
//! Emission is a depth-first walk producing logical lines; containers
//! prefix their children's lines (`> ` for quotes, marker/indent pairs for
//! list items and footnote definitions), and the document joins all lines
//! with `\n`, honoring the recorded trailing-newline state. With no options
//! active the output is byte-identical to the parsed source for the
//! supported subset; normalization switches title quotes, fence characters,
//! bullet markers, and hard-break style to canonical forms.

use crate::cst::{Block, Document, FenceKind, HardBreakStyle, Inline, ListItem, Title};
use crate::options::SerializeOptions;

/// Serializes a document back to Markdown.
pub fn serialize(doc: &Document, opts: &SerializeOptions) -> String {
    let mut lines = Vec::new();
    for block in &doc.blocks {
        block_lines(block, opts, &mut lines);
    }
    let mut out = lines.join("\n");
    if doc.trailing_newline {
        out.push('\n');
    }
    out
}

fn block_lines(block: &Block, opts: &SerializeOptions, out: &mut Vec<String>) {
    match block {
        Block::Paragraph { children, .. } => out.extend(inline_lines(children, opts)),
        Block::Heading {
            level, children, ..
        } => {
            let marker = "#".repeat(*level as usize);
            let content = inlines_to_string(children, opts);
            out.push(if content.is_empty() {
                marker
            } else {
                format!("{marker} {content}")
            });
        }
        Block::FencedCode {
            fence,
            fence_len,
            close_len,
            info,
            body,
            ..
        } => fenced_code_lines(*fence, *fence_len, *close_len, info, body, opts, out),
        Block::IndentedCode { literal, .. } | Block::HtmlBlock { literal, .. } => {
            out.extend(literal.split('\n').map(String::from));
        }
        Block::ThematicBreak { literal, .. } => out.push(literal.clone()),
        Block::Blockquote { children, .. } => {
            let mut inner = Vec::new();
            for child in children {
                block_lines(child, opts, &mut inner);
            }
            out.extend(inner.into_iter().map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            }));
        }
        Block::BulletList { marker, items, .. } => {
            let ch = opts.bullet().unwrap_or(*marker);
            for item in items {
                item_lines(item, &ch.to_string(), opts, out);
            }
        }
        Block::OrderedList {
            start,
            suffix,
            items,
            ..
        } => {
            for (idx, item) in items.iter().enumerate() {
                let ordinal = item.ordinal.unwrap_or(start + idx as u64);
                item_lines(item, &format!("{ordinal}{}", suffix.ch()), opts, out);
            }
        }
        Block::Table { raw_lines, .. } => out.extend(raw_lines.iter().cloned()),
        Block::LinkRefDef {
            raw,
            label,
            dest,
            title,
            ..
        } => out.push(ref_def_line(raw, label, dest, title.as_ref(), opts)),
        Block::FootnoteDef {
            label, children, ..
        } => {
            let mut inner = Vec::new();
            for child in children {
                block_lines(child, opts, &mut inner);
            }
            prefixed(inner, &format!("[^{label}]: "), "    ", out);
        }
        Block::BlankLines { count, .. } => {
            out.extend(std::iter::repeat(String::new()).take(*count));
        }
    }
}

fn fenced_code_lines(
    fence: FenceKind,
    fence_len: usize,
    close_len: Option<usize>,
    info: &str,
    body: &str,
    opts: &SerializeOptions,
    out: &mut Vec<String>,
) {
    let (ch, open_len, close_len) = match opts.fence_kind() {
        Some(kind) if kind != fence => {
            // switching the character may collide with runs in the body
            let needed = (longest_run(body, kind.ch()) + 1).max(3);
            (kind.ch(), needed, close_len.map(|_| needed))
        }
        _ => (fence.ch(), fence_len, close_len),
    };
    out.push(format!(
        "{}{}",
        ch.to_string().repeat(open_len),
        info
    ));
    if !body.is_empty() {
        let trimmed = body.strip_suffix('\n').unwrap_or(body);
        out.extend(trimmed.split('\n').map(String::from));
    }
    if let Some(len) = close_len {
        out.push(ch.to_string().repeat(len));
    }
}

fn longest_run(text: &str, ch: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == ch {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn item_lines(item: &ListItem, marker: &str, opts: &SerializeOptions, out: &mut Vec<String>) {
    let mut inner = Vec::new();
    for child in &item.children {
        block_lines(child, opts, &mut inner);
    }
    if let Some(checked) = item.task {
        let checkbox = if checked { "[x]" } else { "[ ]" };
        match inner.first_mut() {
            Some(first) if !first.is_empty() => {
                let rest = std::mem::take(first);
                *first = format!("{checkbox} {rest}");
            }
            Some(first) => *first = checkbox.to_string(),
            None => inner.push(checkbox.to_string()),
        }
    }
    let first_prefix = format!("{marker}{}", " ".repeat(item.pad));
    let rest_prefix = " ".repeat(marker.chars().count() + item.pad);
    prefixed(inner, &first_prefix, &rest_prefix, out);
}

/// Emits lines under a first-line/continuation prefix pair. Lines with no
/// content drop trailing prefix whitespace.
fn prefixed(inner: Vec<String>, first_prefix: &str, rest_prefix: &str, out: &mut Vec<String>) {
    if inner.is_empty() {
        out.push(first_prefix.trim_end().to_string());
        return;
    }
    for (idx, line) in inner.into_iter().enumerate() {
        let prefix = if idx == 0 { first_prefix } else { rest_prefix };
        if line.is_empty() {
            out.push(prefix.trim_end().to_string());
        } else {
            out.push(format!("{prefix}{line}"));
        }
    }
}

fn ref_def_line(
    raw: &str,
    label: &str,
    dest: &str,
    title: Option<&Title>,
    opts: &SerializeOptions,
) -> String {
    match (opts.quote_style(), title) {
        (Some(quote), Some(title)) => {
            let (open, close) = quote.delims();
            let dest = if dest.contains(' ') {
                format!("<{dest}>")
            } else {
                dest.to_string()
            };
            format!("[{label}]: {dest} {open}{}{close}", title.text)
        }
        _ => raw.to_string(),
    }
}

fn inline_lines(children: &[Inline], opts: &SerializeOptions) -> Vec<String> {
    inlines_to_string(children, opts)
        .split('\n')
        .map(String::from)
        .collect()
}

fn inlines_to_string(children: &[Inline], opts: &SerializeOptions) -> String {
    let mut out = String::new();
    for child in children {
        inline_text(child, opts, &mut out);
    }
    out
}

fn push_title(title: &Title, opts: &SerializeOptions, out: &mut String) {
    let quote = opts.quote_style().unwrap_or(title.quote);
    let (open, close) = quote.delims();
    out.push(open);
    out.push_str(&title.text);
    out.push(close);
}

fn push_dest(url: &str, angled: bool, out: &mut String) {
    if angled {
        out.push('<');
        out.push_str(url);
        out.push('>');
    } else {
        out.push_str(url);
    }
}

fn inline_text(node: &Inline, opts: &SerializeOptions, out: &mut String) {
    match node {
        Inline::Text { text, .. } => out.push_str(text),
        Inline::Code { ticks, text, .. } => {
            let fence = "`".repeat(*ticks);
            out.push_str(&fence);
            out.push_str(text);
            out.push_str(&fence);
        }
        Inline::Emphasis {
            marker, children, ..
        } => {
            out.push(*marker);
            out.push_str(&inlines_to_string(children, opts));
            out.push(*marker);
        }
        Inline::Strong {
            marker, children, ..
        } => {
            let wrap: String = std::iter::repeat(*marker).take(2).collect();
            out.push_str(&wrap);
            out.push_str(&inlines_to_string(children, opts));
            out.push_str(&wrap);
        }
        Inline::Strikethrough { children, .. } => {
            out.push_str("~~");
            out.push_str(&inlines_to_string(children, opts));
            out.push_str("~~");
        }
        Inline::Link {
            children,
            dest,
            title,
            ..
        } => {
            out.push('[');
            out.push_str(&inlines_to_string(children, opts));
            out.push_str("](");
            push_dest(&dest.url, dest.angled, out);
            if let Some(title) = title {
                out.push(' ');
                push_title(title, opts, out);
            }
            out.push(')');
        }
        Inline::RefLink {
            children,
            label,
            form,
            ..
        } => {
            out.push('[');
            out.push_str(&inlines_to_string(children, opts));
            out.push(']');
            push_ref_suffix(label, *form, out);
        }
        Inline::Autolink { url, .. } => {
            out.push('<');
            out.push_str(url);
            out.push('>');
        }
        Inline::Image {
            alt, dest, title, ..
        } => {
            out.push_str("![");
            out.push_str(alt);
            out.push_str("](");
            push_dest(&dest.url, dest.angled, out);
            if let Some(title) = title {
                out.push(' ');
                push_title(title, opts, out);
            }
            out.push(')');
        }
        Inline::RefImage {
            alt, label, form, ..
        } => {
            out.push_str("![");
            out.push_str(alt);
            out.push(']');
            push_ref_suffix(label, *form, out);
        }
        Inline::SoftBreak { .. } => out.push('\n'),
        Inline::HardBreak { style, .. } => {
            let style = opts.hard_break_style().unwrap_or(*style);
            match style {
                HardBreakStyle::Backslash => out.push_str("\\\n"),
                HardBreakStyle::Spaces { count } => {
                    out.push_str(&" ".repeat(count));
                    out.push('\n');
                }
            }
        }
        Inline::HtmlInline { raw, .. } => out.push_str(raw),
        Inline::FootnoteRef { label, .. } => {
            out.push_str("[^");
            out.push_str(label);
            out.push(']');
        }
    }
}

fn push_ref_suffix(label: &str, form: crate::cst::RefForm, out: &mut String) {
    use crate::cst::RefForm;
    match form {
        RefForm::Full => {
            out.push('[');
            out.push_str(label);
            out.push(']');
        }
        RefForm::Collapsed => out.push_str("[]"),
        RefForm::Shortcut => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ParseOptions, SerializeOptions};
    use crate::parse;
    use pretty_assertions::assert_eq;

    fn roundtrip(source: &str) {
        let doc = parse(source, ParseOptions::default());
        assert_eq!(serialize(&doc, &SerializeOptions::default()), source);
    }

    #[test]
    fn roundtrips_heading_and_paragraph() {
        roundtrip("# Hello\n\nWorld\n");
    }

    #[test]
    fn roundtrips_without_trailing_newline() {
        roundtrip("just one line");
    }

    #[test]
    fn roundtrips_fences() {
        roundtrip("```js\nconst x = 1;\n```\n");
        roundtrip("~~~~\ntildes\n~~~~~\n");
        roundtrip("```\nunterminated\n");
        roundtrip("```\n\n");
    }

    #[test]
    fn roundtrips_containers() {
        roundtrip("> quoted\n> more\n");
        roundtrip("> # h\n>\n> tail\n");
        roundtrip("- a\n- b\n  - c\n");
        roundtrip("1. one\n2. two\n");
        roundtrip("3) three\n4) four\n");
        roundtrip("- [x] done\n- [ ] open\n");
    }

    #[test]
    fn roundtrips_loose_list_blanks() {
        roundtrip("- a\n\n- b\n");
        roundtrip("- a\n\n  second para\n");
    }

    #[test]
    fn roundtrips_ordinals_verbatim() {
        roundtrip("1. a\n1. b\n1. c\n");
    }

    #[test]
    fn roundtrips_inline_styles() {
        roundtrip("*em* **strong** _u_ ~~gone~~ `code`\n");
        roundtrip("[x](u 'y') ![a](b) <https://e.com>\n");
        roundtrip("[a][ref] [b][] [c]\n\n[ref]: /u \"t\"\n");
        roundtrip("hard  \nbreak\\\nlines\n");
    }

    #[test]
    fn roundtrips_blank_runs() {
        roundtrip("a\n\n\n\nb\n");
        roundtrip("\n\n");
    }

    #[test]
    fn normalize_rewrites_title_quotes() {
        let doc = parse("[x](u 'y')\n", ParseOptions::default());
        let opts = SerializeOptions {
            normalize: true,
            ..Default::default()
        };
        assert_eq!(serialize(&doc, &opts), "[x](u \"y\")\n");
    }

    #[test]
    fn normalize_rewrites_bullets_and_fences() {
        let doc = parse("* a\n* b\n", ParseOptions::default());
        let opts = SerializeOptions {
            normalize: true,
            ..Default::default()
        };
        assert_eq!(serialize(&doc, &opts), "- a\n- b\n");

        let doc = parse("~~~\ncode\n~~~\n", ParseOptions::default());
        assert_eq!(serialize(&doc, &opts), "```\ncode\n```\n");
    }

    #[test]
    fn fence_normalization_avoids_body_collisions() {
        let doc = parse("~~~\n```\n~~~\n", ParseOptions::default());
        let opts = SerializeOptions {
            normalize: true,
            ..Default::default()
        };
        assert_eq!(serialize(&doc, &opts), "````\n```\n````\n");
    }

    #[test]
    fn normalize_rewrites_hard_breaks() {
        let doc = parse("a  \nb\n", ParseOptions::default());
        let opts = SerializeOptions {
            normalize: true,
            ..Default::default()
        };
        assert_eq!(serialize(&doc, &opts), "a\\\nb\n");
    }

    #[test]
    fn serialization_is_idempotent() {
        let source = "# T\n\n- a\n- b\n\n> q\n";
        let doc = parse(source, ParseOptions::default());
        let once = serialize(&doc, &SerializeOptions::default());
        let doc2 = parse(&once, ParseOptions::default());
        assert_eq!(serialize(&doc2, &SerializeOptions::default()), once);
    }
}
