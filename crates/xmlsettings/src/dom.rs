//! In-memory element tree: storage, parsing and serialization

pub mod document;
pub mod node;
pub mod parser;
pub mod writer;

pub use document::Document;
pub use node::{Attribute, Content, Node, NodeId};
pub use parser::Parser;
