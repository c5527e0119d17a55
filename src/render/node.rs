// src/render/node.rs
//! Structured markup output nodes.
//!
//! The renderer builds a tree of these nodes and hands it to the page
//! rendering layer; serialization to HTML text lives in `crate::output`
//! and never here.

use serde::Serialize;

/// One unit of the renderer's output tree.
///
/// Nodes serialize (for debugging dumps) but never deserialize: they
/// are derived, ephemeral output, and the static tag strings have no
/// owned form to parse back into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarkupNode {
    /// An element with tag, attributes and children.
    Element(Element),
    /// A text node; escaped at serialization time.
    Text(String),
    /// Pre-rendered markup from an external collaborator (e.g. a syntax
    /// highlighter). Passed through verbatim at serialization time.
    Raw(String),
}

impl MarkupNode {
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text(content.into())
    }

    pub fn raw(markup: impl Into<String>) -> Self {
        MarkupNode::Raw(markup.into())
    }

    /// The element payload, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text content of this subtree, ignoring markup.
    pub fn plain_text(&self) -> String {
        match self {
            MarkupNode::Text(text) => text.clone(),
            MarkupNode::Raw(_) => String::new(),
            MarkupNode::Element(el) => el.children.iter().map(MarkupNode::plain_text).collect(),
        }
    }
}

impl From<Element> for MarkupNode {
    fn from(el: Element) -> Self {
        MarkupNode::Element(el)
    }
}

/// An element node. Tags come from the fixed set the renderer emits,
/// so they are static strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<Attribute>,
    pub children: Vec<MarkupNode>,
}

/// An attribute; `value: None` is a boolean attribute such as `checked`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub value: Option<String>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute {
            name,
            value: Some(value.into()),
        });
        self
    }

    /// Adds a boolean attribute (present without a value).
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push(Attribute { name, value: None });
        self
    }

    pub fn child(mut self, node: impl Into<MarkupNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = MarkupNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(MarkupNode::Text(content.into()))
    }

    /// Looks up an attribute value by name.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }

    /// Whether a boolean attribute is present.
    pub fn has_flag(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name && a.value.is_none())
    }
}
