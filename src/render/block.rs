// src/render/block.rs
//! Block rendering — one content block to one markup node.
//!
//! Dispatch is an exhaustive match on the block variant. Types outside
//! the closed set produce no node and never fail the surrounding
//! render.

use super::highlight::{
    map_language, IframeEmbedder, MediaEmbedder, PlainHighlighter, SyntaxHighlighter,
};
use super::node::{Element, MarkupNode};
use super::rich_text::format_rich_text;
use crate::model::{Block, Icon, TableRowBlock};
use crate::types::{plain_text_of, RichTextItem};

/// Icon shown for callouts whose block carries no emoji icon.
const CALLOUT_FALLBACK_ICON: &str = "💡";

/// Collaborators passed through the rendering pipeline.
pub struct RenderContext<'a> {
    pub highlighter: &'a dyn SyntaxHighlighter,
    pub embedder: &'a dyn MediaEmbedder,
}

impl Default for RenderContext<'static> {
    fn default() -> Self {
        Self {
            highlighter: &PlainHighlighter,
            embedder: &IframeEmbedder,
        }
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext").finish_non_exhaustive()
    }
}

/// Renders a single block to a markup node.
///
/// Returns `None` for unrecognized block types and for table rows
/// encountered outside a table; both are dropped silently.
pub fn render_block(block: &Block, ctx: &RenderContext) -> Option<MarkupNode> {
    let node = match block {
        Block::Paragraph(b) => render_paragraph(&b.content.rich_text),
        Block::Heading1(b) => heading("h1", &b.content.rich_text),
        Block::Heading2(b) => heading("h2", &b.content.rich_text),
        Block::Heading3(b) => heading("h3", &b.content.rich_text),

        Block::BulletedListItem(b) => {
            render_list_item(&b.content.rich_text, "ul", block.children(), ctx)
        }
        Block::NumberedListItem(b) => {
            render_list_item(&b.content.rich_text, "ol", block.children(), ctx)
        }

        Block::ToDo(b) => render_to_do(&b.content.rich_text, b.checked),
        Block::Toggle(b) => render_toggle(&b.content.rich_text, block.children(), ctx),
        Block::Code(b) => render_code(&b.content.rich_text, &b.language, ctx),
        Block::Image(b) => render_image(b.image.url(), &b.caption),
        Block::Video(b) => embed_media(b.video.url(), ctx),
        Block::Embed(b) => embed_media(&b.url, ctx),

        Block::Quote(b) => Element::new("blockquote")
            .children(format_rich_text(&b.content.rich_text))
            .into(),
        Block::Callout(b) => render_callout(b.icon.as_ref(), &b.content.rich_text),
        Block::Divider(_) => Element::new("hr").into(),
        Block::Bookmark(b) => render_bookmark(&b.url),
        Block::Table(b) => render_table(block.children(), b.has_column_header),

        // A table row only means something inside its table.
        Block::TableRow(_) => return None,
        Block::Unsupported(b) => {
            log::debug!("Dropping unsupported block type '{}'", b.block_type);
            return None;
        }
    };

    Some(node)
}

/// An empty paragraph becomes a non-collapsing placeholder so author
/// blank lines survive in the layout.
fn render_paragraph(rich_text: &[RichTextItem]) -> MarkupNode {
    if rich_text.is_empty() {
        return Element::new("p").text("\u{a0}").into();
    }
    Element::new("p").children(format_rich_text(rich_text)).into()
}

fn heading(tag: &'static str, rich_text: &[RichTextItem]) -> MarkupNode {
    Element::new(tag).children(format_rich_text(rich_text)).into()
}

/// A list item renders its own text plus, when children were resolved,
/// a same-kind nested list. Nesting here is independent of the
/// top-level grouper, which only sees one sibling scope.
fn render_list_item(
    rich_text: &[RichTextItem],
    list_tag: &'static str,
    children: &[Block],
    ctx: &RenderContext,
) -> MarkupNode {
    let mut item = Element::new("li").children(format_rich_text(rich_text));

    if !children.is_empty() {
        let nested = Element::new(list_tag)
            .children(children.iter().filter_map(|child| render_block(child, ctx)));
        item = item.child(nested);
    }

    item.into()
}

/// Read-only mirror of the checkbox state; checked labels are struck
/// through.
fn render_to_do(rich_text: &[RichTextItem], checked: bool) -> MarkupNode {
    let mut checkbox = Element::new("input").attr("type", "checkbox").flag("disabled");
    if checked {
        checkbox = checkbox.flag("checked");
    }

    let label: MarkupNode = if checked {
        Element::new("s").children(format_rich_text(rich_text)).into()
    } else {
        Element::new("span")
            .children(format_rich_text(rich_text))
            .into()
    };

    Element::new("div")
        .attr("class", "to-do")
        .child(checkbox)
        .child(label)
        .into()
}

/// A disclosure widget, collapsed initially: the toggle's own text is
/// the summary, its children form the body in order.
fn render_toggle(
    rich_text: &[RichTextItem],
    children: &[Block],
    ctx: &RenderContext,
) -> MarkupNode {
    let summary = Element::new("summary").children(format_rich_text(rich_text));
    let body = Element::new("div")
        .children(children.iter().filter_map(|child| render_block(child, ctx)));

    Element::new("details").child(summary).child(body).into()
}

fn render_code(rich_text: &[RichTextItem], language: &str, ctx: &RenderContext) -> MarkupNode {
    let code = plain_text_of(rich_text);
    let display_language = if language.is_empty() { "text" } else { language };
    let highlighted = ctx
        .highlighter
        .highlight(&code, map_language(display_language));

    Element::new("div")
        .attr("class", "code-block")
        .child(Element::new("span").attr("class", "code-language").text(display_language))
        .child(highlighted)
        .into()
}

fn render_image(url: &str, caption: &[RichTextItem]) -> MarkupNode {
    let caption_text = plain_text_of(caption);
    let alt = if caption_text.is_empty() {
        "Blog image"
    } else {
        &caption_text
    };

    let mut figure = Element::new("figure").child(Element::new("img").attr("src", url).attr("alt", alt));
    if !caption_text.is_empty() {
        figure = figure.child(Element::new("figcaption").text(caption_text.clone()));
    }
    figure.into()
}

fn embed_media(url: &str, ctx: &RenderContext) -> MarkupNode {
    Element::new("div")
        .attr("class", "media-embed")
        .child(ctx.embedder.embed(url))
        .into()
}

fn render_callout(icon: Option<&Icon>, rich_text: &[RichTextItem]) -> MarkupNode {
    let emoji = match icon {
        Some(Icon::Emoji { emoji }) => emoji.as_str(),
        _ => CALLOUT_FALLBACK_ICON,
    };

    Element::new("div")
        .attr("class", "callout")
        .child(Element::new("span").text(emoji))
        .child(Element::new("div").children(format_rich_text(rich_text)))
        .into()
}

fn render_bookmark(url: &str) -> MarkupNode {
    Element::new("a")
        .attr("class", "bookmark")
        .attr("href", url)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .child(Element::new("span").text(url))
        .into()
}

/// Rows come from child table_row blocks. Row 0 renders header cells
/// when the table declares a column header; each row keeps its own
/// cell count, so ragged tables pass through as-is.
fn render_table(children: &[Block], has_column_header: bool) -> MarkupNode {
    let rows = children.iter().filter_map(|child| match child {
        Block::TableRow(row) => Some(row),
        _ => None,
    });

    let body = Element::new("tbody").children(
        rows.enumerate()
            .map(|(index, row)| render_table_row(row, has_column_header && index == 0)),
    );

    Element::new("table").child(body).into()
}

fn render_table_row(row: &TableRowBlock, header: bool) -> MarkupNode {
    let cell_tag = if header { "th" } else { "td" };
    Element::new("tr")
        .children(row.cells.iter().map(|cell| {
            Element::new(cell_tag)
                .children(format_rich_text(cell))
                .into()
        }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::blocks::*;
    use crate::model::BlockCommon;
    use pretty_assertions::assert_eq;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    fn table_row(cells: Vec<Vec<RichTextItem>>) -> Block {
        Block::TableRow(TableRowBlock {
            common: BlockCommon::default(),
            cells,
        })
    }

    #[test]
    fn empty_paragraph_renders_placeholder() {
        let block = Block::Paragraph(ParagraphBlock::default());
        let node = render_block(&block, &RenderContext::default()).unwrap();
        // Distinguishable from a dropped block: a real node with NBSP.
        assert_eq!(node.plain_text(), "\u{a0}");
    }

    #[test]
    fn headings_use_three_fixed_levels() {
        let content = TextBlockContent::new(vec![RichTextItem::plain_text("title")]);
        let h1 = Block::Heading1(Heading1Block {
            common: BlockCommon::default(),
            content: content.clone(),
        });
        let h3 = Block::Heading3(Heading3Block {
            common: BlockCommon::default(),
            content,
        });
        let ctx = RenderContext::default();

        assert_eq!(render_block(&h1, &ctx).unwrap().as_element().unwrap().tag, "h1");
        assert_eq!(render_block(&h3, &ctx).unwrap().as_element().unwrap().tag, "h3");
    }

    #[test]
    fn list_item_nests_children_in_same_kind_container() {
        let child = Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("nested")]),
        });
        let parent = Block::BulletedListItem(BulletedListItemBlock {
            common: BlockCommon::default().with_children(vec![child]),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("outer")]),
        });

        let node = render_block(&parent, &RenderContext::default()).unwrap();
        let li = node.as_element().unwrap();
        assert_eq!(li.tag, "li");
        let nested = li.children.last().unwrap().as_element().unwrap();
        assert_eq!(nested.tag, "ul");
        assert_eq!(nested.children.len(), 1);
    }

    #[test]
    fn checked_to_do_strikes_label() {
        let block = Block::ToDo(ToDoBlock {
            common: BlockCommon::default(),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("done")]),
            checked: true,
        });
        let node = render_block(&block, &RenderContext::default()).unwrap();
        let wrapper = node.as_element().unwrap();

        let checkbox = wrapper.children[0].as_element().unwrap();
        assert!(checkbox.has_flag("checked"));
        assert!(checkbox.has_flag("disabled"));

        let label = wrapper.children[1].as_element().unwrap();
        assert_eq!(label.tag, "s");
    }

    #[test]
    fn toggle_renders_summary_and_ordered_body() {
        let block = Block::Toggle(ToggleBlock {
            common: BlockCommon::default()
                .with_children(vec![paragraph("first"), paragraph("second")]),
            content: TextBlockContent::new(vec![RichTextItem::plain_text("click me")]),
        });
        let node = render_block(&block, &RenderContext::default()).unwrap();
        let details = node.as_element().unwrap();
        assert_eq!(details.tag, "details");
        // Collapsed by default: no `open` flag.
        assert!(!details.has_flag("open"));

        let summary = details.children[0].as_element().unwrap();
        assert_eq!(summary.tag, "summary");
        assert_eq!(MarkupNode::Element(summary.clone()).plain_text(), "click me");

        let body = details.children[1].as_element().unwrap();
        assert_eq!(body.children.len(), 2);
        assert_eq!(body.children[0].plain_text(), "first");
    }

    #[test]
    fn code_block_concatenates_runs_and_maps_language() {
        let block = Block::Code(CodeBlock {
            common: BlockCommon::default(),
            language: "C++".to_string(),
            caption: vec![],
            content: TextBlockContent::new(vec![
                RichTextItem::plain_text("int main() "),
                RichTextItem::plain_text("{ return 0; }"),
            ]),
        });
        let node = render_block(&block, &RenderContext::default()).unwrap();
        assert_eq!(node.plain_text(), "C++int main() { return 0; }");

        let wrapper = node.as_element().unwrap();
        let pre = wrapper.children[1].as_element().unwrap();
        let code = pre.children[0].as_element().unwrap();
        assert_eq!(code.attr_value("class"), Some("language-cpp"));
    }

    #[test]
    fn image_resolves_external_variant_and_caption() {
        let block = Block::Image(ImageBlock {
            common: BlockCommon::default(),
            image: FileObject::External {
                external: ExternalFile {
                    url: "https://cdn.example.com/pic.png".to_string(),
                },
            },
            caption: vec![RichTextItem::plain_text("a diagram")],
        });
        let node = render_block(&block, &RenderContext::default()).unwrap();
        let figure = node.as_element().unwrap();
        let img = figure.children[0].as_element().unwrap();
        assert_eq!(img.attr_value("src"), Some("https://cdn.example.com/pic.png"));
        assert_eq!(img.attr_value("alt"), Some("a diagram"));
        let caption = figure.children[1].as_element().unwrap();
        assert_eq!(caption.tag, "figcaption");
    }

    #[test]
    fn callout_defaults_icon_when_absent() {
        let block = Block::Callout(CalloutBlock {
            common: BlockCommon::default(),
            icon: None,
            content: TextBlockContent::new(vec![RichTextItem::plain_text("note")]),
        });
        let node = render_block(&block, &RenderContext::default()).unwrap();
        assert!(node.plain_text().starts_with(CALLOUT_FALLBACK_ICON));
    }

    #[test]
    fn table_header_row_independent_of_cell_counts() {
        let header_cells = vec![
            vec![RichTextItem::plain_text("a")],
            vec![RichTextItem::plain_text("b")],
        ];
        // Ragged second row: three cells instead of two.
        let body_cells = vec![
            vec![RichTextItem::plain_text("1")],
            vec![RichTextItem::plain_text("2")],
            vec![RichTextItem::plain_text("3")],
        ];
        let block = Block::Table(TableBlock {
            common: BlockCommon::default()
                .with_children(vec![table_row(header_cells), table_row(body_cells)]),
            table_width: 2,
            has_column_header: true,
            has_row_header: false,
        });

        let node = render_block(&block, &RenderContext::default()).unwrap();
        let tbody = node.as_element().unwrap().children[0].as_element().unwrap();

        let first = tbody.children[0].as_element().unwrap();
        assert!(first
            .children
            .iter()
            .all(|cell| cell.as_element().unwrap().tag == "th"));

        let second = tbody.children[1].as_element().unwrap();
        assert_eq!(second.children.len(), 3);
        assert!(second
            .children
            .iter()
            .all(|cell| cell.as_element().unwrap().tag == "td"));
    }

    #[test]
    fn table_without_header_renders_only_body_cells() {
        let block = Block::Table(TableBlock {
            common: BlockCommon::default()
                .with_children(vec![table_row(vec![vec![RichTextItem::plain_text("x")]])]),
            table_width: 1,
            has_column_header: false,
            has_row_header: false,
        });
        let node = render_block(&block, &RenderContext::default()).unwrap();
        let tbody = node.as_element().unwrap().children[0].as_element().unwrap();
        let row = tbody.children[0].as_element().unwrap();
        assert_eq!(row.children[0].as_element().unwrap().tag, "td");
    }

    #[test]
    fn unsupported_and_stray_rows_produce_no_node() {
        let ctx = RenderContext::default();
        let unknown = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "synced_block".to_string(),
        });
        assert_eq!(render_block(&unknown, &ctx), None);

        let stray_row = table_row(vec![vec![RichTextItem::plain_text("x")]]);
        assert_eq!(render_block(&stray_row, &ctx), None);
    }
}
