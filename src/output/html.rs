// src/output/html.rs
//! HTML serialization of the markup tree.
//!
//! The renderer produces structure, not strings; this is the one place
//! markup turns into text. All escaping happens here, so upstream code
//! never has to think about `<` in a paragraph.

use crate::render::{Attribute, Element, MarkupNode};

/// Elements with no closing tag in HTML.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source", "wbr"];

/// Escapes text content for element bodies.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes an attribute value for double-quoted position.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serializes one markup node to HTML.
pub fn render_html(node: &MarkupNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Serializes a node sequence, e.g. an assembled document body.
pub fn render_fragment(nodes: &[MarkupNode]) -> String {
    let mut out = String::with_capacity(nodes.len() * crate::constants::CHARS_PER_BLOCK_ESTIMATE);
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &MarkupNode) {
    match node {
        MarkupNode::Text(text) => out.push_str(&escape_text(text)),
        MarkupNode::Raw(html) => out.push_str(html),
        MarkupNode::Element(element) => write_element(out, element),
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag);
    for attribute in &element.attrs {
        write_attribute(out, attribute);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag) {
        // Children on a void element are a renderer bug; drop them
        // rather than emit invalid markup.
        return;
    }

    for child in &element.children {
        write_node(out, child);
    }

    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
}

fn write_attribute(out: &mut String, attribute: &Attribute) {
    out.push(' ');
    out.push_str(attribute.name);
    if let Some(value) = &attribute.value {
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Element;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_nested_elements() {
        let node: MarkupNode = Element::new("p")
            .child(Element::new("strong").text("bold"))
            .text(" tail")
            .into();
        assert_eq!(render_html(&node), "<p><strong>bold</strong> tail</p>");
    }

    #[test]
    fn escapes_text_content() {
        let node = MarkupNode::text("a < b && c > d");
        assert_eq!(render_html(&node), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn escapes_attribute_values() {
        let node: MarkupNode = Element::new("a")
            .attr("href", "https://example.com/?a=1&b=\"x\"")
            .text("link")
            .into();
        assert_eq!(
            render_html(&node),
            "<a href=\"https://example.com/?a=1&amp;b=&quot;x&quot;\">link</a>"
        );
    }

    #[test]
    fn boolean_attributes_have_no_value() {
        let node: MarkupNode = Element::new("input")
            .attr("type", "checkbox")
            .flag("checked")
            .flag("disabled")
            .into();
        assert_eq!(
            render_html(&node),
            "<input type=\"checkbox\" checked disabled>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node: MarkupNode = Element::new("img").attr("src", "/pic.png").into();
        assert_eq!(render_html(&node), "<img src=\"/pic.png\">");
    }

    #[test]
    fn iframe_is_not_treated_as_void() {
        let node: MarkupNode = Element::new("iframe").attr("src", "https://e.com").into();
        assert_eq!(
            render_html(&node),
            "<iframe src=\"https://e.com\"></iframe>"
        );
    }

    #[test]
    fn fragment_concatenates_siblings() {
        let nodes = vec![
            MarkupNode::from(Element::new("h1").text("Title")),
            MarkupNode::from(Element::new("p").text("Body")),
        ];
        assert_eq!(render_fragment(&nodes), "<h1>Title</h1><p>Body</p>");
    }

    #[test]
    fn raw_nodes_pass_through_unescaped() {
        let node = MarkupNode::raw("<b>pre-rendered</b>");
        assert_eq!(render_html(&node), "<b>pre-rendered</b>");
    }
}
