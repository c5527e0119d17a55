// src/render/rich_text.rs
//! Rich text formatting — inline runs to nested inline markup.
//!
//! One output node per input run, order preserving. The mapping is a
//! pure function of its input: formatting the same runs twice yields
//! identical nodes.

use super::node::{Element, MarkupNode};
use crate::types::{RichTextItem, RichTextType};

/// Formats a sequence of inline runs into inline markup nodes.
pub fn format_rich_text(items: &[RichTextItem]) -> Vec<MarkupNode> {
    items.iter().map(format_run).collect()
}

/// Formats a single run.
///
/// Non-text variants (mentions, equations) degrade to their plain
/// display text; missing fields never fail the run. Active annotations
/// nest in a fixed order, innermost to outermost: code, strikethrough,
/// underline, italic, bold. A link wraps the fully styled content last
/// and opens as an external navigation.
fn format_run(item: &RichTextItem) -> MarkupNode {
    let RichTextType::Text { content, link } = &item.text_type else {
        return MarkupNode::text(&item.plain_text);
    };

    let mut node = MarkupNode::text(content);
    let style = &item.annotations;

    if style.code {
        node = Element::new("code").child(node).into();
    }
    if style.strikethrough {
        node = Element::new("s").child(node).into();
    }
    if style.underline {
        node = Element::new("u").child(node).into();
    }
    if style.italic {
        node = Element::new("em").child(node).into();
    }
    if style.bold {
        node = Element::new("strong").child(node).into();
    }

    // Only the run's own inline link wraps; the top-level `href` also
    // covers mention targets, which stay plain text here.
    if let Some(link) = link {
        node = Element::new("a")
            .attr("href", link.url.as_str())
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .child(node)
            .into();
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Annotations, EquationData};
    use pretty_assertions::assert_eq;

    fn tags_outside_in(node: &MarkupNode) -> Vec<&'static str> {
        let mut tags = Vec::new();
        let mut current = node;
        while let MarkupNode::Element(el) = current {
            tags.push(el.tag);
            current = &el.children[0];
        }
        tags
    }

    #[test]
    fn plain_run_is_bare_text() {
        let nodes = format_rich_text(&[RichTextItem::plain_text("hello")]);
        assert_eq!(nodes, vec![MarkupNode::text("hello")]);
    }

    #[test]
    fn one_node_per_run_in_order() {
        let nodes = format_rich_text(&[
            RichTextItem::plain_text("one"),
            RichTextItem::plain_text("two"),
            RichTextItem::plain_text("three"),
        ]);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[2], MarkupNode::text("three"));
    }

    #[test]
    fn all_annotations_nest_in_fixed_order() {
        let item = RichTextItem::styled(
            "x",
            Annotations {
                bold: true,
                italic: true,
                strikethrough: true,
                underline: true,
                code: true,
                ..Default::default()
            },
        );
        let nodes = format_rich_text(&[item]);
        // Outside in: bold, italic, underline, strikethrough, code.
        assert_eq!(
            tags_outside_in(&nodes[0]),
            vec!["strong", "em", "u", "s", "code"]
        );
        assert_eq!(nodes[0].plain_text(), "x");
    }

    #[test]
    fn partial_annotations_skip_unflagged_wrappers() {
        let item = RichTextItem::styled(
            "x",
            Annotations {
                bold: true,
                code: true,
                ..Default::default()
            },
        );
        let nodes = format_rich_text(&[item]);
        assert_eq!(tags_outside_in(&nodes[0]), vec!["strong", "code"]);
    }

    #[test]
    fn link_wraps_outside_all_styles() {
        let mut item = RichTextItem::linked("docs", "https://example.com/docs");
        item.annotations.bold = true;
        let nodes = format_rich_text(&[item]);

        assert_eq!(tags_outside_in(&nodes[0]), vec!["a", "strong"]);
        let anchor = nodes[0].as_element().unwrap();
        assert_eq!(anchor.attr_value("href"), Some("https://example.com/docs"));
        assert_eq!(anchor.attr_value("target"), Some("_blank"));
        assert_eq!(anchor.attr_value("rel"), Some("noopener noreferrer"));
    }

    #[test]
    fn href_without_inline_link_stays_unwrapped() {
        // Notion also surfaces a top-level `href` on some runs; only
        // the run's own link field produces an anchor.
        let item = RichTextItem {
            text_type: RichTextType::Text {
                content: "plain".to_string(),
                link: None,
            },
            annotations: Annotations::default(),
            plain_text: "plain".to_string(),
            href: Some("https://example.com/elsewhere".to_string()),
        };
        let nodes = format_rich_text(&[item]);
        assert_eq!(nodes, vec![MarkupNode::text("plain")]);
    }

    #[test]
    fn non_text_run_degrades_to_plain_text() {
        let item = RichTextItem {
            text_type: RichTextType::Equation(EquationData {
                expression: "E = mc^2".to_string(),
            }),
            annotations: Annotations {
                bold: true,
                ..Default::default()
            },
            plain_text: "E = mc^2".to_string(),
            href: None,
        };
        let nodes = format_rich_text(&[item]);
        assert_eq!(nodes, vec![MarkupNode::text("E = mc^2")]);
    }

    #[test]
    fn formatting_is_idempotent() {
        let items = vec![
            RichTextItem::styled(
                "styled",
                Annotations {
                    italic: true,
                    strikethrough: true,
                    ..Default::default()
                },
            ),
            RichTextItem::linked("link", "https://example.com"),
        ];
        assert_eq!(format_rich_text(&items), format_rich_text(&items));
    }
}
