//! Arena-backed document tree
//!
//! Nodes live in a flat arena addressed by [`NodeId`]. Removed subtrees leave
//! tombstones behind so that ids held elsewhere never alias a new node.

use crate::config::WriteOptions;
use crate::dom::node::{Attribute, Content, Node, NodeId};
use crate::dom::parser::Parser;
use crate::dom::writer;
use crate::error::Result;

/// Element tree with a distinguished, unnamed document node
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    nodes: Vec<Option<Node>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new("", None))],
        }
    }

    /// Parse markup with the default depth limit
    pub fn parse(input: &[u8]) -> Result<Self> {
        Parser::new(input).parse()
    }

    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live nodes, the document node included
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).map_or("", Node::name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Child elements of `id` in document order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).into_iter().flat_map(Node::child_ids)
    }

    /// Child elements of `id` named `name`, in document order
    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .filter(move |child| self.name(*child) == name)
    }

    /// The `which`-th child named `name`
    pub fn nth_child(&self, id: NodeId, name: &str, which: usize) -> Option<NodeId> {
        self.children_named(id, name).nth(which)
    }

    pub fn first_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.nth_child(id, name, 0)
    }

    pub fn count_children(&self, id: NodeId, name: &str) -> usize {
        self.children_named(id, name).count()
    }

    /// Append an empty element named `name` under `parent`
    ///
    /// Returns `None` when `parent` is not a live node.
    pub fn append_child(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        if !self.is_alive(parent) {
            return None;
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Some(Node::new(name, Some(parent))));
        if let Some(node) = self.node_mut(parent) {
            node.content.push(Content::Element(id));
        }
        Some(id)
    }

    /// Detach `child` from `parent` and drop its whole subtree
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.node_mut(parent) else {
            return false;
        };
        let Some(index) = node
            .content
            .iter()
            .position(|c| *c == Content::Element(child))
        else {
            return false;
        };
        node.content.remove(index);

        let mut pending = vec![child];
        while let Some(id) = pending.pop() {
            if let Some(slot) = self.nodes.get_mut(id.index()) {
                if let Some(removed) = slot.take() {
                    pending.extend(removed.child_ids());
                }
            }
        }
        true
    }

    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        self.node(id).map_or(&[][..], Node::attributes)
    }

    /// Value of the first attribute named `name`
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Update the first attribute named `name`, creating it when absent
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let value = value.into();
        match node.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => node.attributes.push(Attribute::new(name, value)),
        }
        true
    }

    /// Append an attribute without looking for an existing one
    pub fn append_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.attributes.push(Attribute::new(name, value));
        true
    }

    /// Remove the first attribute named `name`
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        match node.attributes.iter().position(|a| a.name == name) {
            Some(index) => {
                node.attributes.remove(index);
                true
            }
            None => false,
        }
    }

    /// First text run of `id`
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(Node::text)
    }

    /// Replace the first text run of `id`, appending one when there is none
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let value = value.into();
        let existing = node.content.iter_mut().find_map(|c| match c {
            Content::Text(text) => Some(text),
            Content::Element(_) => None,
        });
        match existing {
            Some(text) => *text = value,
            None => node.content.push(Content::Text(value)),
        }
        true
    }

    pub(crate) fn push_text(&mut self, id: NodeId, value: String) {
        if let Some(node) = self.node_mut(id) {
            node.content.push(Content::Text(value));
        }
    }

    /// Serialize the whole document
    pub fn to_xml_string(&self, options: &WriteOptions) -> String {
        writer::write_document(self, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let settings = doc.append_child(root, "settings").unwrap_or(root);
        for _ in 0..3 {
            doc.append_child(settings, "item");
        }
        doc.append_child(settings, "other");
        (doc, settings)
    }

    #[test]
    fn test_new_document_has_only_root() {
        let doc = Document::new();
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.name(doc.root()), "");
        assert_eq!(doc.parent(doc.root()), None);
    }

    #[test]
    fn test_ordinal_children() {
        let (doc, settings) = sample();
        assert_eq!(doc.count_children(settings, "item"), 3);
        assert_eq!(doc.count_children(settings, "other"), 1);
        assert_eq!(doc.count_children(settings, "missing"), 0);

        let second = doc.nth_child(settings, "item", 1);
        let all: Vec<_> = doc.children_named(settings, "item").collect();
        assert_eq!(second, all.get(1).copied());
        assert_eq!(doc.nth_child(settings, "item", 3), None);
    }

    #[test]
    fn test_remove_child_tombstones_subtree() {
        let (mut doc, settings) = sample();
        let first = doc.first_child(settings, "item").unwrap_or(settings);
        let nested = doc.append_child(first, "nested").unwrap_or(first);
        let before = doc.node_count();

        assert!(doc.remove_child(settings, first));
        assert!(!doc.is_alive(first));
        assert!(!doc.is_alive(nested));
        assert_eq!(doc.node_count(), before - 2);
        assert_eq!(doc.count_children(settings, "item"), 2);
        assert!(!doc.remove_child(settings, first));
        assert_eq!(doc.append_child(first, "x"), None);
    }

    #[test]
    fn test_attribute_upsert_and_append() {
        let (mut doc, settings) = sample();
        assert!(doc.set_attribute(settings, "id", "1"));
        assert!(doc.set_attribute(settings, "id", "2"));
        assert_eq!(doc.attributes(settings).len(), 1);
        assert_eq!(doc.attribute(settings, "id"), Some("2"));

        assert!(doc.append_attribute(settings, "id", "3"));
        assert_eq!(doc.attributes(settings).len(), 2);
        assert_eq!(doc.attribute(settings, "id"), Some("2"));

        assert!(doc.remove_attribute(settings, "id"));
        assert_eq!(doc.attribute(settings, "id"), Some("3"));
        assert!(doc.remove_attribute(settings, "id"));
        assert!(!doc.remove_attribute(settings, "id"));
    }

    #[test]
    fn test_set_text_replaces_first_run() {
        let (mut doc, settings) = sample();
        let other = doc.first_child(settings, "other").unwrap_or(settings);
        assert_eq!(doc.text(other), None);
        doc.set_text(other, "5");
        doc.set_text(other, "7");
        assert_eq!(doc.text(other), Some("7"));
        assert_eq!(doc.node(other).map(|n| n.content().len()), Some(1));
    }
}
