// src/render/assemble.rs
//! Document assembly — list-run grouping over one sibling scope.
//!
//! The source API returns list items as loose siblings; well-formed
//! markup needs them inside `ul`/`ol` containers. The assembler scans
//! left to right, absorbing each maximal run of same-kind list items
//! into exactly one container and passing everything else through in
//! original order.

use super::block::{render_block, RenderContext};
use super::node::{Element, MarkupNode};
use crate::model::Block;

/// Which kind of list container a run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bulleted,
    Numbered,
}

impl ListKind {
    fn of(block: &Block) -> Option<Self> {
        match block {
            Block::BulletedListItem(_) => Some(ListKind::Bulleted),
            Block::NumberedListItem(_) => Some(ListKind::Numbered),
            _ => None,
        }
    }

    fn container_tag(self) -> &'static str {
        match self {
            ListKind::Bulleted => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

/// An open run of rendered same-kind list items.
struct ListRun {
    kind: ListKind,
    items: Vec<MarkupNode>,
}

impl ListRun {
    fn open(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    fn close(self) -> MarkupNode {
        Element::new(self.kind.container_tag())
            .children(self.items)
            .into()
    }
}

/// Assembles a sibling block sequence into document nodes.
///
/// Grouping happens only at this level; nested lists are handled by the
/// block renderer when it recurses into a list item's children.
pub fn assemble_document(blocks: &[Block], ctx: &RenderContext) -> Vec<MarkupNode> {
    let mut nodes = Vec::with_capacity(blocks.len());
    let mut open_run: Option<ListRun> = None;

    for block in blocks {
        match ListKind::of(block) {
            Some(kind) => {
                // A different-kind item closes the current run before
                // opening its own; the same kind extends it.
                if open_run.as_ref().map(|run| run.kind) != Some(kind) {
                    if let Some(run) = open_run.take() {
                        nodes.push(run.close());
                    }
                    open_run = Some(ListRun::open(kind));
                }
                if let Some(item) = render_block(block, ctx) {
                    if let Some(run) = open_run.as_mut() {
                        run.items.push(item);
                    }
                }
            }
            None => {
                // Any non-list block interrupts the run, even one that
                // renders to nothing.
                if let Some(run) = open_run.take() {
                    nodes.push(run.close());
                }
                if let Some(node) = render_block(block, ctx) {
                    nodes.push(node);
                }
            }
        }
    }

    if let Some(run) = open_run.take() {
        nodes.push(run.close());
    }

    nodes
}

/// Renders a full document: assembled top-level nodes inside one root
/// container, ready for the page-rendering layer to serialize.
pub fn render_document(blocks: &[Block], ctx: &RenderContext) -> MarkupNode {
    Element::new("article")
        .attr("class", "prose")
        .children(assemble_document(blocks, ctx))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::*;
    use crate::model::BlockCommon;
    use crate::types::RichTextItem;
    use pretty_assertions::assert_eq;

    fn bulleted(text: &str) -> Block {
        Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    fn numbered(text: &str) -> Block {
        Block::NumberedListItem(NumberedListItemBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    fn unsupported() -> Block {
        Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "breadcrumb".to_string(),
        })
    }

    fn tags(nodes: &[MarkupNode]) -> Vec<&'static str> {
        nodes
            .iter()
            .map(|n| n.as_element().map(|el| el.tag).unwrap_or("#text"))
            .collect()
    }

    #[test]
    fn kind_switch_splits_runs() {
        let blocks = vec![bulleted("a"), bulleted("b"), numbered("c"), bulleted("d")];
        let nodes = assemble_document(&blocks, &RenderContext::default());

        assert_eq!(tags(&nodes), vec!["ul", "ol", "ul"]);
        assert_eq!(nodes[0].as_element().unwrap().children.len(), 2);
        assert_eq!(nodes[1].as_element().unwrap().children.len(), 1);
        assert_eq!(nodes[2].as_element().unwrap().children.len(), 1);
        assert_eq!(nodes[2].plain_text(), "d");
    }

    #[test]
    fn non_list_blocks_interleave_in_original_order() {
        let blocks = vec![
            paragraph("intro"),
            bulleted("a"),
            bulleted("b"),
            paragraph("middle"),
            bulleted("c"),
        ];
        let nodes = assemble_document(&blocks, &RenderContext::default());

        assert_eq!(tags(&nodes), vec!["p", "ul", "p", "ul"]);
        assert_eq!(nodes[1].as_element().unwrap().children.len(), 2);
        assert_eq!(nodes[3].as_element().unwrap().children.len(), 1);
    }

    #[test]
    fn trailing_run_is_closed_at_end_of_input() {
        let blocks = vec![paragraph("p"), numbered("1"), numbered("2")];
        let nodes = assemble_document(&blocks, &RenderContext::default());

        assert_eq!(tags(&nodes), vec!["p", "ol"]);
        assert_eq!(nodes[1].as_element().unwrap().children.len(), 2);
    }

    #[test]
    fn dropped_block_still_interrupts_a_run() {
        // The unsupported block renders to nothing but it still ends the
        // sibling adjacency, so the bulleted items land in two containers.
        let blocks = vec![bulleted("a"), unsupported(), bulleted("b")];
        let nodes = assemble_document(&blocks, &RenderContext::default());

        assert_eq!(tags(&nodes), vec!["ul", "ul"]);
    }

    #[test]
    fn no_adjacent_same_kind_containers() {
        let blocks = vec![
            bulleted("a"),
            numbered("b"),
            numbered("c"),
            bulleted("d"),
            paragraph("x"),
            bulleted("e"),
        ];
        let nodes = assemble_document(&blocks, &RenderContext::default());
        let tags = tags(&nodes);

        for pair in tags.windows(2) {
            let both_lists = matches!(pair, ["ul", "ul"] | ["ol", "ol"]);
            assert!(!both_lists, "adjacent same-kind containers in {:?}", tags);
        }
    }

    #[test]
    fn document_root_wraps_assembled_nodes() {
        let blocks = vec![paragraph("only")];
        let root = render_document(&blocks, &RenderContext::default());
        let article = root.as_element().unwrap();
        assert_eq!(article.tag, "article");
        assert_eq!(article.children.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_document() {
        let nodes = assemble_document(&[], &RenderContext::default());
        assert!(nodes.is_empty());
    }
}
