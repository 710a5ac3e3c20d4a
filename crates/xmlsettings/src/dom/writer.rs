//! Document serialization

use crate::config::WriteOptions;
use crate::dom::document::Document;
use crate::dom::node::{Content, NodeId};

const DECLARATION: &str = "<?xml version=\"1.0\"?>";

/// Serialize every top-level element of `doc`
///
/// Elements holding any text are written on one line, children included, so
/// text reads back exactly as stored.
pub fn write_document(doc: &Document, options: &WriteOptions) -> String {
    let mut output = String::new();
    let pretty = !options.indent.is_empty();

    if options.declaration {
        output.push_str(DECLARATION);
        if pretty {
            output.push('\n');
        }
    }

    let mut pending: Vec<Step<'_>> = doc
        .children(doc.root())
        .map(|id| Step::Open {
            id,
            depth: 0,
            inline: false,
        })
        .collect();
    pending.reverse();

    while let Some(step) = pending.pop() {
        match step {
            Step::Open { id, depth, inline } => {
                write_open(doc, id, depth, inline, options, &mut output, &mut pending);
            }
            Step::Text(text) => output.push_str(&escape_xml(text)),
            Step::Close {
                name,
                depth,
                inline,
                inner_inline,
            } => {
                if !inner_inline {
                    push_indent(&mut output, &options.indent, depth);
                }
                output.push_str("</");
                output.push_str(name);
                output.push('>');
                if pretty && !inline {
                    output.push('\n');
                }
            }
        }
    }
    output
}

/// Pending serialization work, innermost last
enum Step<'a> {
    Open {
        id: NodeId,
        depth: usize,
        inline: bool,
    },
    Text(&'a str),
    Close {
        name: &'a str,
        depth: usize,
        inline: bool,
        inner_inline: bool,
    },
}

fn write_open<'a>(
    doc: &'a Document,
    id: NodeId,
    depth: usize,
    inline: bool,
    options: &WriteOptions,
    output: &mut String,
    pending: &mut Vec<Step<'a>>,
) {
    let Some(node) = doc.node(id) else {
        return;
    };
    let pretty = !options.indent.is_empty();

    if !inline {
        push_indent(output, &options.indent, depth);
    }
    output.push('<');
    output.push_str(node.name());
    for attr in node.attributes() {
        output.push(' ');
        output.push_str(&attr.name);
        output.push_str("=\"");
        output.push_str(&escape_xml(&attr.value));
        output.push('"');
    }

    if node.content().is_empty() {
        output.push_str(" />");
        if pretty && !inline {
            output.push('\n');
        }
        return;
    }

    output.push('>');
    let inner_inline = inline
        || node
            .content()
            .iter()
            .any(|c| matches!(c, Content::Text(_)));
    if pretty && !inner_inline {
        output.push('\n');
    }

    pending.push(Step::Close {
        name: node.name(),
        depth,
        inline,
        inner_inline,
    });
    for entry in node.content().iter().rev() {
        pending.push(match entry {
            Content::Element(child) => Step::Open {
                id: *child,
                depth: depth + 1,
                inline: inner_inline,
            },
            Content::Text(text) => Step::Text(text),
        });
    }
}

fn push_indent(output: &mut String, indent: &str, depth: usize) {
    for _ in 0..depth {
        output.push_str(indent);
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
