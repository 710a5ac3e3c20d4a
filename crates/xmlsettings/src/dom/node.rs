//! Arena node representation

use std::fmt;

/// Index of a node inside its [`Document`](super::Document) arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: Self = Self(0);

    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Named text slot on an element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Element content entry, in document order
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(NodeId),
    Text(String),
}

/// Element (or the document node itself, which has an empty name)
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) content: Vec<Content>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` only for the document node
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    /// Child element ids in document order
    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.content.iter().filter_map(|c| match c {
            Content::Element(id) => Some(*id),
            Content::Text(_) => None,
        })
    }

    /// First text run, if any
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|c| match c {
            Content::Text(text) => Some(text.as_str()),
            Content::Element(_) => None,
        })
    }

    pub fn has_element_children(&self) -> bool {
        self.content
            .iter()
            .any(|c| matches!(c, Content::Element(_)))
    }
}
