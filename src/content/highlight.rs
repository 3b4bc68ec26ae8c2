//! Tree highlighter: rebuilds a content tree with matches wrapped.
//!
//! The input tree is never mutated. A parallel tree is built depth first
//! and handed back whole, so the caller can swap it in with a single
//! assignment.

use super::{ContentNode, MatchSpan, decode_entities, push_text};
use crate::search::CompiledMatcher;

/// Result of one highlight pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightPass {
    /// Rebuilt top-level children
    pub nodes: Vec<ContentNode>,
    /// Number of match wrappers created
    pub match_count: usize,
}

/// Applies a compiled matcher to every text leaf of a tree.
pub struct TreeHighlighter<'a> {
    matcher: &'a CompiledMatcher,
    match_count: usize,
}

impl<'a> TreeHighlighter<'a> {
    /// Create a highlighter for one pass.
    pub fn new(matcher: &'a CompiledMatcher) -> Self {
        Self {
            matcher,
            match_count: 0,
        }
    }

    /// Rebuild the given top-level nodes with matches wrapped.
    ///
    /// Top-level elements are always cloned. Below them, any node whose text
    /// trims to nothing is dropped.
    pub fn highlight(mut self, nodes: &[ContentNode]) -> HighlightPass {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                ContentNode::Element(el) => {
                    let mut clone = el.shallow_clone();
                    clone.children = self.rebuild(&el.children);
                    out.push(ContentNode::Element(clone));
                }
                ContentNode::Text(text) => {
                    if !text.trim().is_empty() {
                        self.highlight_text(text, &mut out);
                    }
                }
                ContentNode::Match(span) => self.highlight_text(span.text(), &mut out),
            }
        }

        log::debug!(
            "Highlight pass wrapped {} matches across {} top-level nodes",
            self.match_count,
            out.len()
        );
        HighlightPass {
            nodes: out,
            match_count: self.match_count,
        }
    }

    fn rebuild(&mut self, children: &[ContentNode]) -> Vec<ContentNode> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            if child.text_content().trim().is_empty() {
                log::trace!("Skipping blank node");
                continue;
            }
            match child {
                ContentNode::Element(el) => {
                    let mut clone = el.shallow_clone();
                    clone.children = self.rebuild(&el.children);
                    out.push(ContentNode::Element(clone));
                }
                ContentNode::Text(text) => self.highlight_text(text, &mut out),
                ContentNode::Match(span) => self.highlight_text(span.text(), &mut out),
            }
        }
        out
    }

    /// Split one text leaf into plain runs and match wrappers.
    ///
    /// Matches that trim to nothing stay as plain text.
    fn highlight_text(&mut self, raw: &str, out: &mut Vec<ContentNode>) {
        let matcher = self.matcher;
        let text = decode_entities(raw);
        let mut last = 0;
        for range in matcher.find_ranges(&text) {
            let matched = &text[range.clone()];
            if matched.trim().is_empty() {
                continue;
            }
            push_text(out, &text[last..range.start]);
            out.push(ContentNode::Match(MatchSpan::new(matched)));
            self.match_count += 1;
            last = range.end;
        }
        push_text(out, &text[last..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRoot, ElementNode};
    use crate::search::{PatternCompiler, Query};

    fn matcher(text: &str, match_case: bool, use_regex: bool) -> CompiledMatcher {
        PatternCompiler::new()
            .compile(&Query::new(text, match_case, use_regex))
            .unwrap()
    }

    fn paragraph(text: &str) -> ContentNode {
        ElementNode::new("p", vec![ContentNode::text(text)]).into()
    }

    #[test]
    fn test_wraps_exact_substring() {
        let m = matcher("qu", true, false);
        let pass = TreeHighlighter::new(&m).highlight(&[paragraph("The quick fox")]);

        assert_eq!(pass.match_count, 1);
        assert_eq!(
            pass.nodes,
            vec![ContentNode::Element(ElementNode::new(
                "p",
                vec![
                    ContentNode::text("The "),
                    ContentNode::Match(MatchSpan::new("qu")),
                    ContentNode::text("ick fox"),
                ]
            ))]
        );
    }

    #[test]
    fn test_multiple_matches_in_document_order() {
        let m = matcher("foo", false, false);
        let pass = TreeHighlighter::new(&m).highlight(&[paragraph("Foo foo FOO")]);
        let root = ContentRoot::new(pass.nodes);
        let texts: Vec<&str> = root.match_spans().iter().map(|s| s.text()).collect();
        assert_eq!(texts, vec!["Foo", "foo", "FOO"]);
    }

    #[test]
    fn test_nested_structure_preserved() {
        let tree = vec![ContentNode::Element(
            ElementNode::new(
                "section",
                vec![
                    ElementNode::new("h1", vec![ContentNode::text("Title cat")]).into(),
                    ElementNode::new(
                        "p",
                        vec![
                            ContentNode::text("a "),
                            ElementNode::new("em", vec![ContentNode::text("cat")])
                                .with_attribute("class", "x")
                                .into(),
                        ],
                    )
                    .into(),
                ],
            )
            .with_attribute("id", "main"),
        )];

        let m = matcher("cat", false, false);
        let pass = TreeHighlighter::new(&m).highlight(&tree);
        assert_eq!(pass.match_count, 2);

        let ContentNode::Element(section) = &pass.nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(section.attribute("id"), Some("main"));
        let ContentNode::Element(p) = &section.children[1] else {
            panic!("expected element");
        };
        let ContentNode::Element(em) = &p.children[1] else {
            panic!("expected element");
        };
        assert_eq!(em.attribute("class"), Some("x"));
        assert_eq!(em.children, vec![ContentNode::Match(MatchSpan::new("cat"))]);
    }

    #[test]
    fn test_blank_nodes_dropped() {
        let tree = vec![ContentNode::Element(ElementNode::new(
            "div",
            vec![
                ContentNode::text("   "),
                ElementNode::new("br", vec![]).into(),
                ContentNode::text("word"),
            ],
        ))];
        let m = matcher("word", false, false);
        let pass = TreeHighlighter::new(&m).highlight(&tree);
        assert_eq!(
            pass.nodes,
            vec![ContentNode::Element(ElementNode::new(
                "div",
                vec![ContentNode::Match(MatchSpan::new("word"))]
            ))]
        );
    }

    #[test]
    fn test_empty_top_level_element_still_cloned() {
        let tree = vec![ContentNode::Element(ElementNode::new("hr", vec![]))];
        let m = matcher("x", false, false);
        let pass = TreeHighlighter::new(&m).highlight(&tree);
        assert_eq!(pass.nodes, tree);
        assert_eq!(pass.match_count, 0);
    }

    #[test]
    fn test_whitespace_matches_left_unwrapped() {
        let m = matcher(r"\s+|b", false, true);
        let pass = TreeHighlighter::new(&m).highlight(&[paragraph("a b c")]);
        assert_eq!(pass.match_count, 1);
        assert_eq!(ContentRoot::new(pass.nodes).text_content(), "a b c");
    }

    #[test]
    fn test_empty_matches_ignored() {
        let m = matcher("x*", false, true);
        let pass = TreeHighlighter::new(&m).highlight(&[paragraph("axxb")]);
        assert_eq!(pass.match_count, 1);
        assert_eq!(
            ContentRoot::new(pass.nodes).match_spans()[0].text(),
            "xx"
        );
    }

    #[test]
    fn test_entities_decoded_before_matching() {
        let m = matcher("a&b", true, false);
        let pass = TreeHighlighter::new(&m).highlight(&[paragraph("x a&amp;b y")]);
        assert_eq!(pass.match_count, 1);
        assert_eq!(ContentRoot::new(pass.nodes).text_content(), "x a&b y");
    }

    #[test]
    fn test_input_tree_untouched() {
        let tree = vec![paragraph("hello")];
        let snapshot = tree.clone();
        let m = matcher("ell", false, false);
        let _ = TreeHighlighter::new(&m).highlight(&tree);
        assert_eq!(tree, snapshot);
    }
}
