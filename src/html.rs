//! The HTML node tree produced by conversion, and its renderer.
//!
//! A tree is built bottom-up and never mutated afterwards. Nodes hold
//! their tag, value and children as options so that a hand-built node can
//! violate its variant's invariant; [`HtmlNode::render`] reports that as an
//! error instead of producing broken markup.

use std::collections::BTreeMap;

use crate::block::{InlineKind, InlineRun};
use crate::error::{Error, Result};

/// Element attributes. Callers must not rely on the order they render in.
pub type Props = BTreeMap<String, String>;

/// A node holding text content directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    tag: Option<String>,
    value: Option<String>,
    props: Props,
}

/// A node owning an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    tag: Option<String>,
    children: Option<Vec<HtmlNode>>,
    props: Props,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl LeafNode {
    pub fn new(tag: Option<&str>, value: impl Into<String>) -> Self {
        Self::from_parts(tag.map(str::to_string), Some(value.into()), Props::new())
    }

    pub fn from_parts(tag: Option<String>, value: Option<String>, props: Props) -> Self {
        Self { tag, value, props }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        let value = self.value.as_deref().ok_or(Error::MissingValue)?;
        match &self.tag {
            None => out.push_str(value),
            Some(tag) => {
                open_tag(tag, &self.props, out);
                out.push_str(value);
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

impl ParentNode {
    pub fn new(tag: &str, children: Vec<HtmlNode>) -> Self {
        Self::from_parts(Some(tag.to_string()), Some(children), Props::new())
    }

    pub fn from_parts(
        tag: Option<String>,
        children: Option<Vec<HtmlNode>>,
        props: Props,
    ) -> Self {
        Self {
            tag,
            children,
            props,
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn children(&self) -> Option<&[HtmlNode]> {
        self.children.as_deref()
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        let tag = self.tag.as_deref().ok_or(Error::MissingTag)?;
        let children = self.children.as_deref().ok_or(Error::MissingChildren)?;

        open_tag(tag, &self.props, out);
        for child in children {
            child.render_into(out)?;
        }
        close_tag(tag, out);
        Ok(())
    }
}

impl HtmlNode {
    /// Untagged leaf, rendered as its bare value.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf(LeafNode::new(None, value))
    }

    pub fn leaf(tag: &str, value: impl Into<String>) -> Self {
        HtmlNode::Leaf(LeafNode::new(Some(tag), value))
    }

    pub fn parent(tag: &str, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent(ParentNode::new(tag, children))
    }

    pub fn with_prop(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            HtmlNode::Leaf(leaf) => HtmlNode::Leaf(leaf.with_prop(key, value)),
            HtmlNode::Parent(parent) => HtmlNode::Parent(parent.with_prop(key, value)),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.tag(),
            HtmlNode::Parent(parent) => parent.tag(),
        }
    }

    pub fn props(&self) -> &Props {
        match self {
            HtmlNode::Leaf(leaf) => leaf.props(),
            HtmlNode::Parent(parent) => parent.props(),
        }
    }

    /// Children of a parent node; a leaf has none.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf(_) => &[],
            HtmlNode::Parent(parent) => parent.children().unwrap_or_default(),
        }
    }

    /// Render this node and everything below it to markup.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.render_into(out),
            HtmlNode::Parent(parent) => parent.render_into(out),
        }
    }

    /// Indented one-node-per-line description of the tree, for inspection.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_into(0, &mut out);
        out
    }

    fn outline_into(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        match self {
            HtmlNode::Leaf(leaf) => {
                if let Some(tag) = leaf.tag() {
                    out.push_str(tag);
                    props_to_html(leaf.props(), out);
                    out.push(' ');
                }
                match leaf.value() {
                    Some(value) => out.push_str(&format!("{value:?}")),
                    None => out.push_str("<no value>"),
                }
                out.push('\n');
            }
            HtmlNode::Parent(parent) => {
                out.push_str(parent.tag().unwrap_or("<no tag>"));
                props_to_html(parent.props(), out);
                out.push('\n');
                for child in parent.children().unwrap_or_default() {
                    child.outline_into(depth + 1, out);
                }
            }
        }
    }
}

impl From<InlineRun> for HtmlNode {
    fn from(run: InlineRun) -> Self {
        let url = run.url.unwrap_or_default();
        match run.kind {
            InlineKind::Text => HtmlNode::text(run.text),
            InlineKind::Bold => HtmlNode::leaf("b", run.text),
            InlineKind::Italic => HtmlNode::leaf("i", run.text),
            InlineKind::Code => HtmlNode::leaf("code", run.text),
            InlineKind::Link => HtmlNode::leaf("a", run.text).with_prop("href", url),
            InlineKind::Image => HtmlNode::leaf("img", "")
                .with_prop("src", url)
                .with_prop("alt", run.text),
        }
    }
}

fn props_to_html(props: &Props, out: &mut String) {
    for (key, value) in props {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

fn open_tag(tag: &str, props: &Props, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    props_to_html(props, out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
