//! Document-wide index of link reference definitions.

use std::collections::HashMap;

use crate::cst::{Block, ListItem};

/// A resolved reference target: destination URL plus optional title text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub dest: String,
    pub title: Option<String>,
}

/// Mapping from normalized reference label to destination and title.
///
/// Populated by walking the block sequence after a parse; read-only once the
/// owning [`Document`](crate::cst::Document) exists. Duplicate labels keep
/// the first definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkReferenceIndex {
    map: HashMap<String, LinkReference>,
}

/// Case-folds and whitespace-collapses a reference label.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl LinkReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index by walking a block sequence in source order,
    /// descending into containers. First definition of a label wins.
    pub fn collect(blocks: &[Block]) -> Self {
        let mut index = Self::new();
        index.walk(blocks);
        index
    }

    fn walk(&mut self, blocks: &[Block]) {
        for block in blocks {
            match block {
                Block::LinkRefDef {
                    label, dest, title, ..
                } => {
                    self.insert_first_wins(
                        label,
                        LinkReference {
                            dest: dest.clone(),
                            title: title.as_ref().map(|t| t.text.clone()),
                        },
                    );
                }
                Block::Blockquote { children, .. } | Block::FootnoteDef { children, .. } => {
                    self.walk(children);
                }
                Block::BulletList { items, .. } | Block::OrderedList { items, .. } => {
                    for ListItem { children, .. } in items {
                        self.walk(children);
                    }
                }
                _ => {}
            }
        }
    }

    fn insert_first_wins(&mut self, label: &str, reference: LinkReference) {
        self.map.entry(normalize_label(label)).or_insert(reference);
    }

    /// Looks up a label, applying normalization.
    pub fn get(&self, label: &str) -> Option<&LinkReference> {
        self.map.get(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::Span;

    fn def(label: &str, dest: &str) -> Block {
        Block::LinkRefDef {
            span: Span::new(0, 0),
            label: label.to_string(),
            dest: dest.to_string(),
            title: None,
            raw: format!("[{label}]: {dest}"),
        }
    }

    #[test]
    fn labels_are_case_folded_and_whitespace_collapsed() {
        assert_eq!(normalize_label("Foo  Bar"), "foo bar");
        assert_eq!(normalize_label("  REF\n x "), "ref x");
    }

    #[test]
    fn first_definition_wins() {
        let index = LinkReferenceIndex::collect(&[def("ref", "/first"), def("REF", "/second")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("Ref").unwrap().dest, "/first");
    }

    #[test]
    fn collects_from_nested_containers() {
        let quote = Block::Blockquote {
            span: Span::new(0, 0),
            children: vec![def("inner", "/nested")],
        };
        let index = LinkReferenceIndex::collect(&[quote]);
        assert_eq!(index.get("inner").unwrap().dest, "/nested");
    }

    #[test]
    fn missing_label_is_none() {
        let index = LinkReferenceIndex::collect(&[]);
        assert!(index.get("nope").is_none());
        assert!(index.is_empty());
    }
}
