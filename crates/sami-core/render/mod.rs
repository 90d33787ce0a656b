//! SAMI markup renderer
//!
//! Serializes a [`MarkupNode`] tree depth-first. It behaves like a generic
//! markup serializer with two differences that SAMI requires:
//!
//! - closing tags are never written, since `SYNC` and `P` are not closed;
//! - text holding a legitimate literal (`&nbsp`, `i>`, `b>`) is written
//!   verbatim so the parser's re-emitted markup survives.
//!
//! # Example
//!
//! ```rust
//! use sami_core::render::{render_to_string, MarkupNode};
//!
//! let mut sync = MarkupNode::element("SYNC Start=1000");
//! sync.append_child(MarkupNode::element("P Class=ENCC").with_child(MarkupNode::text("<i>Hi</i>")));
//! let mut doc = MarkupNode::document();
//! doc.append_child(sync);
//!
//! assert_eq!(
//!     render_to_string(&doc)?,
//!     "<SYNC Start=1000><P Class=ENCC><i>Hi</i>"
//! );
//! # Ok::<(), sami_core::render::RenderError>(())
//! ```

use alloc::string::{String, ToString};
use std::io::{self, BufWriter, Write};

use thiserror::Error;

pub mod escape;
pub mod node;

pub use escape::{escape_string, has_legit_literal, write_quoted, LEGIT_LITERALS};
pub use node::{MarkupNode, NodeAttribute, NodeKind};

/// Elements whose direct text children are written unescaped
pub const RAW_TEXT_CONTAINERS: &[&str] = &[
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
    "script",
    "style",
    "xmp",
];

/// Elements that swallow a leading newline, so one is written back
pub const NEWLINE_ELEMENTS: &[&str] = &["pre", "listing", "textarea"];

/// Renderer failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// An error node reached the serializer
    #[error("cannot render an error node")]
    ErrorNode,

    /// The destination writer failed
    #[error("write failed: {0}")]
    Io(String),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Render `node` into `writer`
///
/// Output is buffered and flushed once the tree has been written.
///
/// # Errors
///
/// Returns [`RenderError::ErrorNode`] if the tree contains an error node and
/// [`RenderError::Io`] if the writer fails.
pub fn render<W: Write>(writer: W, node: &MarkupNode) -> Result<(), RenderError> {
    let mut buffered = BufWriter::new(writer);
    render_node(&mut buffered, node)?;
    buffered.flush()?;
    Ok(())
}

/// Render `node` into a string
///
/// # Errors
///
/// Returns [`RenderError::ErrorNode`] if the tree contains an error node.
pub fn render_to_string(node: &MarkupNode) -> Result<String, RenderError> {
    let mut out = Vec::new();
    render_node(&mut out, node)?;
    String::from_utf8(out).map_err(|e| RenderError::Io(e.to_string()))
}

fn render_node<W: Write + ?Sized>(w: &mut W, node: &MarkupNode) -> Result<(), RenderError> {
    match node.kind {
        NodeKind::Error => Err(RenderError::ErrorNode),
        NodeKind::Document => render_children(w, node, false),
        NodeKind::Text => {
            if has_legit_literal(&node.data) {
                w.write_all(node.data.as_bytes())?;
            } else {
                escape_string(w, &node.data)?;
            }
            Ok(())
        }
        NodeKind::Comment => {
            w.write_all(b"<!--")?;
            w.write_all(node.data.as_bytes())?;
            w.write_all(b"-->")?;
            Ok(())
        }
        NodeKind::Doctype => render_doctype(w, node),
        NodeKind::Element => render_element(w, node),
    }
}

fn render_doctype<W: Write + ?Sized>(w: &mut W, node: &MarkupNode) -> Result<(), RenderError> {
    w.write_all(b"<!DOCTYPE ")?;
    w.write_all(node.data.as_bytes())?;

    let public = node.attr("public").unwrap_or_default();
    let system = node.attr("system").unwrap_or_default();
    if !public.is_empty() {
        w.write_all(b" PUBLIC ")?;
        write_quoted(w, public)?;
        if !system.is_empty() {
            w.write_all(b" ")?;
            write_quoted(w, system)?;
        }
    } else if !system.is_empty() {
        w.write_all(b" SYSTEM ")?;
        write_quoted(w, system)?;
    }

    w.write_all(b">")?;
    Ok(())
}

fn render_element<W: Write + ?Sized>(w: &mut W, node: &MarkupNode) -> Result<(), RenderError> {
    w.write_all(b"<")?;
    w.write_all(node.data.as_bytes())?;
    for attribute in &node.attributes {
        w.write_all(b" ")?;
        if let Some(namespace) = attribute.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            w.write_all(namespace.as_bytes())?;
            w.write_all(b":")?;
        }
        w.write_all(attribute.key.as_bytes())?;
        w.write_all(b"=\"")?;
        escape_string(w, &attribute.value)?;
        w.write_all(b"\"")?;
    }
    w.write_all(b">")?;

    let leading_newline = node
        .first_child()
        .is_some_and(|child| child.kind == NodeKind::Text && child.data.starts_with('\n'));
    if leading_newline && NEWLINE_ELEMENTS.contains(&node.data.as_str()) {
        w.write_all(b"\n")?;
    }

    let raw_text = RAW_TEXT_CONTAINERS.contains(&node.data.as_str());
    render_children(w, node, raw_text)

    // No closing tag
}

fn render_children<W: Write + ?Sized>(
    w: &mut W,
    node: &MarkupNode,
    raw_text: bool,
) -> Result<(), RenderError> {
    for child in &node.children {
        if raw_text && child.kind == NodeKind::Text {
            w.write_all(child.data.as_bytes())?;
        } else {
            render_node(w, child)?;
        }
    }
    Ok(())
}
