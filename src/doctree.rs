//! Presentation nodes produced by directives.
//!
//! A directive returns a fresh tree of [`Node`]s per invocation; writers in
//! [`crate::writer`] serialize it.

use serde::Serialize;

/// Block-level document node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Section {
        ids: Vec<String>,
        children: Vec<Node>,
    },
    Title {
        text: String,
    },
    Paragraph {
        inlines: Vec<Inline>,
    },
    /// An object description: a signature line followed by content blocks.
    Desc {
        domain: String,
        objtype: String,
        signature: String,
        content: Vec<Node>,
    },
    Table(Table),
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Strong(String),
    /// Markup passed through to the output untouched.
    Raw { format: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Node {
    pub fn section(ids: Vec<String>) -> Self {
        Self::Section {
            ids,
            children: Vec::new(),
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::Title { text: text.into() }
    }

    pub fn paragraph(inlines: Vec<Inline>) -> Self {
        Self::Paragraph { inlines }
    }

    pub fn text_paragraph(text: impl Into<String>) -> Self {
        Self::paragraph(vec![Inline::Text(text.into())])
    }

    /// Append a child to a section or desc content. Other nodes ignore it.
    pub fn push(&mut self, child: Node) {
        match self {
            Self::Section { children, .. } => children.push(child),
            Self::Desc { content, .. } => content.push(child),
            _ => {}
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Section { children, .. } => children,
            Self::Desc { content, .. } => content,
            _ => &[],
        }
    }

    /// Concatenated plain text of this node and its descendants.
    pub fn text(&self) -> String {
        match self {
            Self::Title { text } => text.clone(),
            Self::Paragraph { inlines } => inlines.iter().map(Inline::text).collect(),
            Self::Desc {
                signature, content, ..
            } => {
                let mut out = signature.clone();
                for child in content {
                    out.push('\n');
                    out.push_str(&child.text());
                }
                out
            }
            Self::Section { children, .. } => children
                .iter()
                .map(Node::text)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Table(table) => table
                .rows
                .iter()
                .map(|r| r.join("\t"))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(s) | Self::Strong(s) => s,
            Self::Raw { content, .. } => content,
        }
    }
}
