//! Content tree the search widget operates on.
//!
//! The tree is renderer-agnostic: structural elements, text leaves, and
//! match wrappers produced by the highlighter. A [`ContentRoot`] owns the
//! top-level children and only ever swaps them out wholesale, so readers
//! never observe a half-rebuilt tree.

pub mod highlight;
pub mod markup;

pub use highlight::{HighlightPass, TreeHighlighter};

/// A node of the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// Structural node with a tag, attributes and ordered children.
    Element(ElementNode),
    /// Plain text leaf.
    Text(String),
    /// Highlighted match produced by a search.
    Match(MatchSpan),
}

impl ContentNode {
    /// Convenience constructor for a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        ContentNode::Text(text.into())
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
            ContentNode::Text(text) => out.push_str(text),
            ContentNode::Match(span) => out.push_str(span.text()),
        }
    }

    /// Number of match wrappers in this subtree.
    pub fn match_count(&self) -> usize {
        match self {
            ContentNode::Element(el) => el.children.iter().map(ContentNode::match_count).sum(),
            ContentNode::Text(_) => 0,
            ContentNode::Match(_) => 1,
        }
    }

    fn collect_spans<'a>(&'a self, out: &mut Vec<&'a MatchSpan>) {
        match self {
            ContentNode::Element(el) => el.children.iter().for_each(|c| c.collect_spans(out)),
            ContentNode::Text(_) => {}
            ContentNode::Match(span) => out.push(span),
        }
    }

    fn collect_spans_mut<'a>(&'a mut self, out: &mut Vec<&'a mut MatchSpan>) {
        match self {
            ContentNode::Element(el) => el
                .children
                .iter_mut()
                .for_each(|c| c.collect_spans_mut(out)),
            ContentNode::Text(_) => {}
            ContentNode::Match(span) => out.push(span),
        }
    }
}

/// A structural node: tag, attributes and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNode {
    /// Tag name, e.g. `p` or `section`
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Ordered children
    pub children: Vec<ContentNode>,
}

impl ElementNode {
    /// Create an element without attributes.
    pub fn new(tag: impl Into<String>, children: Vec<ContentNode>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children,
        }
    }

    /// Add an attribute (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Copy tag and attributes but not children.
    pub fn shallow_clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<ElementNode> for ContentNode {
    fn from(el: ElementNode) -> Self {
        ContentNode::Element(el)
    }
}

/// A wrapped text region produced by the highlighter.
///
/// At most one span in a tree is marked current at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    text: String,
    current: bool,
}

impl MatchSpan {
    /// Wrap the exact matched substring.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            current: false,
        }
    }

    /// The matched text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this span is the current navigation target.
    pub fn is_current(&self) -> bool {
        self.current
    }

    pub(crate) fn set_current(&mut self, current: bool) {
        self.current = current;
    }
}

/// Owner of the content tree being searched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRoot {
    children: Vec<ContentNode>,
}

impl ContentRoot {
    /// Create a root owning the given top-level children.
    pub fn new(children: Vec<ContentNode>) -> Self {
        Self { children }
    }

    /// Build a root from markup source.
    pub fn from_markup(source: &str) -> Self {
        Self::new(markup::parse(source))
    }

    /// Top-level children.
    pub fn children(&self) -> &[ContentNode] {
        &self.children
    }

    /// Replace all children in a single assignment.
    pub fn replace(&mut self, children: Vec<ContentNode>) {
        self.children = children;
    }

    /// Concatenated text of the whole tree.
    pub fn text_content(&self) -> String {
        self.children.iter().map(ContentNode::text_content).collect()
    }

    /// Number of match wrappers in the tree.
    pub fn match_count(&self) -> usize {
        self.children.iter().map(ContentNode::match_count).sum()
    }

    /// Match wrappers in document order.
    pub fn match_spans(&self) -> Vec<&MatchSpan> {
        let mut out = Vec::new();
        self.children.iter().for_each(|c| c.collect_spans(&mut out));
        out
    }

    /// Mutable match wrappers in document order.
    pub fn match_spans_mut(&mut self) -> Vec<&mut MatchSpan> {
        let mut out = Vec::new();
        self.children
            .iter_mut()
            .for_each(|c| c.collect_spans_mut(&mut out));
        out
    }

    /// Unwrap every match back into plain text, merging it with adjacent
    /// text leaves.
    ///
    /// Returns the number of spans unwrapped.
    pub fn clear_matches(&mut self) -> usize {
        let count = self.match_count();
        if count > 0 {
            let children = std::mem::take(&mut self.children);
            self.children = unwrap_matches(children);
        }
        count
    }

    /// Render the tree back to markup.
    pub fn to_markup(&self) -> String {
        markup::render(&self.children)
    }
}

fn unwrap_matches(nodes: Vec<ContentNode>) -> Vec<ContentNode> {
    let mut out: Vec<ContentNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            ContentNode::Element(mut el) => {
                el.children = unwrap_matches(std::mem::take(&mut el.children));
                out.push(ContentNode::Element(el));
            }
            ContentNode::Text(text) => push_text(&mut out, &text),
            ContentNode::Match(span) => push_text(&mut out, &span.text),
        }
    }
    out
}

/// Append text, merging with a trailing text sibling.
pub(crate) fn push_text(out: &mut Vec<ContentNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(ContentNode::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(ContentNode::Text(text.to_string()));
    }
}

/// Decode the fixed entity set `&amp;`, `&gt;`, `&lt;` and `&nbsp;` in a
/// single left-to-right pass. Anything else is left untouched.
pub fn decode_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 4] = [
        ("&amp;", "&"),
        ("&gt;", ">"),
        ("&lt;", "<"),
        ("&nbsp;", "\u{00A0}"),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| tail.starts_with(entity)) {
            Some((entity, decoded)) => {
                out.push_str(decoded);
                rest = &tail[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
