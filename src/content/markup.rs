//! Markup adapter between rendered HTML-like source and [`ContentNode`]s.
//!
//! Parsing is built on `quick-xml` with end-name checks turned off, so it is
//! lenient like a browser: stray end tags are ignored, unclosed elements are
//! closed at end of input, and void elements such as `<br>` never take
//! children. Entities in text are decoded on parse and re-escaped on render.

use super::{ContentNode, ElementNode, decode_entities, push_text};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};

/// CSS class rendered on every match wrapper.
pub const HIGHLIGHT_CLASS: &str = "highlight";
/// Extra class rendered on the current match wrapper.
pub const CURRENT_CLASS: &str = "point";

/// Elements that never have children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Parse markup into top-level nodes.
///
/// Malformed input stops the parse at the offending position; everything
/// read up to there is kept.
pub fn parse(source: &str) -> Vec<ContentNode> {
    let mut reader = Reader::from_str(source);
    reader.check_end_names(false);

    let mut top: Vec<ContentNode> = Vec::new();
    let mut stack: Vec<ElementNode> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let element = element_from(e);
                if is_void(&element.tag) {
                    append(&mut top, &mut stack, ContentNode::Element(element));
                } else {
                    stack.push(element);
                }
            }
            Ok(Event::Empty(ref e)) => {
                append(&mut top, &mut stack, ContentNode::Element(element_from(e)));
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                close_element(&mut top, &mut stack, &name);
            }
            Ok(Event::Text(ref e)) => append_text(&mut top, &mut stack, &text_from(e)),
            Ok(Event::CData(ref e)) => {
                append_text(&mut top, &mut stack, &String::from_utf8_lossy(&**e));
            }
            Ok(Event::Eof) => break,
            // Comments, doctype, declarations and processing instructions
            Ok(_) => {}
            Err(e) => {
                log::warn!(
                    "Markup parse stopped at byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
        }
    }

    while let Some(element) = stack.pop() {
        append(&mut top, &mut stack, ContentNode::Element(element));
    }
    top
}

/// Build an element (without children) from a start tag.
fn element_from(start: &BytesStart<'_>) -> ElementNode {
    let attributes = start
        .html_attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
            let value = decode_entities(&String::from_utf8_lossy(&attr.value));
            (key, value)
        })
        .collect();
    ElementNode {
        tag: String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase(),
        attributes,
        children: Vec::new(),
    }
}

/// Decode a text event. HTML-only entities such as `&nbsp;` are resolved
/// too; text that still fails to unescape (a bare `&`) is decoded leniently.
fn text_from(text: &BytesText<'_>) -> String {
    text.unescape_with(|entity| match entity {
        "nbsp" => Some("\u{00A0}"),
        _ => None,
    })
    .map(|decoded| decoded.into_owned())
    .unwrap_or_else(|_| decode_entities(&String::from_utf8_lossy(&**text)))
}

fn append_text(top: &mut Vec<ContentNode>, stack: &mut [ElementNode], text: &str) {
    match stack.last_mut() {
        Some(parent) => push_text(&mut parent.children, text),
        None => push_text(top, text),
    }
}

fn append(top: &mut Vec<ContentNode>, stack: &mut [ElementNode], node: ContentNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top.push(node),
    }
}

fn close_element(top: &mut Vec<ContentNode>, stack: &mut Vec<ElementNode>, name: &str) {
    let Some(depth) = stack.iter().rposition(|el| el.tag == name) else {
        log::trace!("Ignoring stray end tag </{}>", name);
        return;
    };
    while stack.len() > depth {
        if let Some(element) = stack.pop() {
            append(top, stack, ContentNode::Element(element));
        }
    }
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Render nodes back to markup. Matches become `<span class="highlight">`,
/// with `point` added to the current one.
pub fn render(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    nodes.iter().for_each(|node| render_node(node, &mut out));
    out
}

fn render_node(node: &ContentNode, out: &mut String) {
    match node {
        ContentNode::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (key, value) in &el.attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape(value).replace('"', "&quot;"));
                out.push('"');
            }
            out.push('>');
            if is_void(&el.tag) && el.children.is_empty() {
                return;
            }
            el.children.iter().for_each(|c| render_node(c, out));
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
        ContentNode::Text(text) => out.push_str(&escape(text)),
        ContentNode::Match(span) => {
            out.push_str("<span class=\"");
            out.push_str(HIGHLIGHT_CLASS);
            if span.is_current() {
                out.push(' ');
                out.push_str(CURRENT_CLASS);
            }
            out.push_str("\">");
            out.push_str(&escape(span.text()));
            out.push_str("</span>");
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MatchSpan;

    #[test]
    fn test_parse_nested_elements() {
        let nodes = parse(r#"<div id="a"><p>Hello <b>world</b></p></div>"#);
        assert_eq!(
            nodes,
            vec![ContentNode::Element(
                ElementNode::new(
                    "div",
                    vec![
                        ElementNode::new(
                            "p",
                            vec![
                                ContentNode::text("Hello "),
                                ElementNode::new("b", vec![ContentNode::text("world")]).into(),
                            ]
                        )
                        .into()
                    ]
                )
                .with_attribute("id", "a")
            )]
        );
    }

    #[test]
    fn test_parse_attributes_variants() {
        let nodes = parse(r#"<input type=text value='a b' disabled data-x="1">"#);
        let ContentNode::Element(el) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(el.attribute("type"), Some("text"));
        assert_eq!(el.attribute("value"), Some("a b"));
        assert_eq!(el.attribute("disabled"), Some(""));
        assert_eq!(el.attribute("data-x"), Some("1"));
        assert!(el.children.is_empty());
    }

    #[test]
    fn test_parse_void_and_self_closing() {
        let nodes = parse("<p>a<br>b<img src=\"x\"/>c</p>");
        let ContentNode::Element(p) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(p.children.len(), 5);
        assert_eq!(nodes[0].text_content(), "abc");
    }

    #[test]
    fn test_parse_lenient() {
        let nodes = parse("</i><p>open <b>bold</p>tail");
        assert_eq!(
            nodes,
            vec![
                ElementNode::new(
                    "p",
                    vec![
                        ContentNode::text("open "),
                        ElementNode::new("b", vec![ContentNode::text("bold")]).into(),
                    ]
                )
                .into(),
                ContentNode::text("tail"),
            ]
        );
    }

    #[test]
    fn test_parse_unclosed_elements_closed_at_end() {
        let nodes = parse("<div><p>open");
        assert_eq!(
            nodes,
            vec![
                ElementNode::new(
                    "div",
                    vec![ElementNode::new("p", vec![ContentNode::text("open")]).into()]
                )
                .into()
            ]
        );
    }

    #[test]
    fn test_quoted_gt_stays_in_attribute() {
        let nodes = parse(r#"<p title="a>b">x</p>"#);
        let ContentNode::Element(p) = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(p.attribute("title"), Some("a>b"));
        assert_eq!(nodes[0].text_content(), "x");
        assert_eq!(render(&nodes), r#"<p title="a&gt;b">x</p>"#);
    }

    #[test]
    fn test_parse_html_entities_and_bare_ampersand() {
        let nodes = parse("<p>x&nbsp;y</p><p>a & b&nbsp;c</p>");
        assert_eq!(nodes[0].text_content(), "x\u{00A0}y");
        assert_eq!(nodes[1].text_content(), "a & b\u{00A0}c");
    }

    #[test]
    fn test_parse_skips_comments_and_doctype() {
        let nodes = parse("<!DOCTYPE html><!-- <p>x</p> --><p>y</p>");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), "y");
    }

    #[test]
    fn test_parse_decodes_entities() {
        let nodes = parse("<p>fish &amp; chips</p>");
        assert_eq!(nodes[0].text_content(), "fish & chips");
    }

    #[test]
    fn test_render_round_trip() {
        let source = r#"<div class="c"><p>x &amp; y</p><br></div>"#;
        assert_eq!(render(&parse(source)), source);
    }

    #[test]
    fn test_render_matches() {
        let mut current = MatchSpan::new("b");
        current.set_current(true);
        let nodes = vec![ContentNode::Element(ElementNode::new(
            "p",
            vec![
                ContentNode::Match(MatchSpan::new("a")),
                ContentNode::Match(current),
            ],
        ))];
        assert_eq!(
            render(&nodes),
            r#"<p><span class="highlight">a</span><span class="highlight point">b</span></p>"#
        );
    }
}
