//! Generic markup node tree consumed by the renderer
//!
//! Nodes own their children outright. Element data is opaque: callers may
//! pre-compose a tag name and its attributes into one string (for example
//! `SYNC Start=1000`), which the renderer writes as-is.

use alloc::{string::String, vec::Vec};

/// Closed set of node kinds the renderer dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Unrenderable node; rendering it fails
    Error,
    /// Root container with no markup of its own
    Document,
    /// Opening tag plus children, never closed
    Element,
    /// Character data
    Text,
    /// `<!--data-->`
    Comment,
    /// `<!DOCTYPE data ...>`
    Doctype,
}

/// Attribute with an optional namespace prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAttribute {
    /// Namespace written as `ns:` before the key
    pub namespace: Option<String>,
    /// Attribute name
    pub key: String,
    /// Unescaped attribute value
    pub value: String,
}

impl NodeAttribute {
    /// Create attribute without a namespace
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create namespaced attribute
    #[must_use]
    pub fn namespaced(
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Markup tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupNode {
    /// Node kind
    pub kind: NodeKind,
    /// Tag data, text body, comment body or doctype name
    pub data: String,
    /// Attributes in output order
    pub attributes: Vec<NodeAttribute>,
    /// Owned children in output order
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    fn with_kind(kind: NodeKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Empty document root
    #[must_use]
    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, String::new())
    }

    /// Element whose opening tag writes `data` verbatim
    #[must_use]
    pub fn element(data: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Element, data)
    }

    /// Text node
    #[must_use]
    pub fn text(data: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text, data)
    }

    /// Comment node
    #[must_use]
    pub fn comment(data: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Comment, data)
    }

    /// Doctype node; `public`/`system` attributes become identifier clauses
    #[must_use]
    pub fn doctype(name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Doctype, name)
    }

    /// Error node
    #[must_use]
    pub fn error() -> Self {
        Self::with_kind(NodeKind::Error, String::new())
    }

    /// Add an attribute, builder style
    #[must_use]
    pub fn with_attribute(mut self, attribute: NodeAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a child, builder style
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child as the last one
    pub fn append_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// First child, if any
    #[must_use]
    pub fn first_child(&self) -> Option<&Self> {
        self.children.first()
    }

    /// Value of the first attribute named `key`
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.key == key)
            .map(|attribute| attribute.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_kind_and_data() {
        assert_eq!(MarkupNode::document().kind, NodeKind::Document);
        assert_eq!(MarkupNode::element("SYNC Start=0").data, "SYNC Start=0");
        assert_eq!(MarkupNode::text("hi").kind, NodeKind::Text);
        assert_eq!(MarkupNode::comment("c").kind, NodeKind::Comment);
        assert_eq!(MarkupNode::doctype("html").kind, NodeKind::Doctype);
        assert_eq!(MarkupNode::error().kind, NodeKind::Error);
    }

    #[test]
    fn children_keep_order() {
        let mut root = MarkupNode::document();
        root.append_child(MarkupNode::text("a"));
        root.append_child(MarkupNode::text("b"));
        let root = root.with_child(MarkupNode::text("c"));

        let data: Vec<&str> = root.children.iter().map(|c| c.data.as_str()).collect();
        assert_eq!(data, ["a", "b", "c"]);
        assert_eq!(root.first_child().map(|c| c.data.as_str()), Some("a"));
    }

    #[test]
    fn attribute_lookup() {
        let node = MarkupNode::doctype("html")
            .with_attribute(NodeAttribute::new("public", "-//W3C//DTD"))
            .with_attribute(NodeAttribute::namespaced("xml", "lang", "en"));
        assert_eq!(node.attr("public"), Some("-//W3C//DTD"));
        assert_eq!(node.attr("lang"), Some("en"));
        assert_eq!(node.attr("system"), None);
    }
}
