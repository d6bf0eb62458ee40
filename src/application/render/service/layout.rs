//! Layout flattening for container blocks.
//!
//! Email clients cannot lay out tabs, columns or grids, so every container is
//! rewritten as a linear run of styled boxes. Children render one level deeper
//! through [`RenderContext::nested`], which keeps indentation and heading levels
//! structural.

use crate::domain::{
    blocks::{
        AccordionBlock, CalloutBlock, ColumnsBlock, ContentBlock, GridBlock, TabsBlock,
        ToggleBlock, non_empty,
    },
    types::AlertVariant,
};

use super::{
    blocks::render_blocks,
    context::RenderContext,
    node::{Element, Node},
    palette::alert_colors,
};

const EXPANDED_GLYPH: &str = "▼";

pub(crate) fn render_tabs(tabs: &TabsBlock, cx: &mut RenderContext<'_>) -> Node {
    let heading = cx.container_heading();
    let panels: Vec<Node> = tabs
        .tabs
        .iter()
        .enumerate()
        .map(|(index, tab)| {
            let margin = if index == 0 { 0 } else { 24 };
            let label = (!tab.label.trim().is_empty()).then(|| {
                Node::from(
                    Element::new(heading)
                        .style("margin: 0 0 12px; padding-bottom: 6px; border-bottom: 2px solid #e5e7eb; color: #111827;")
                        .text(tab.label.as_str()),
                )
            });
            Element::new("div")
                .style(format!("margin-top: {margin}px;"))
                .children(label)
                .children(nested_blocks(&tab.blocks, cx))
                .into()
        })
        .collect();

    Element::new("div")
        .style("margin: 16px 0;")
        .children(panels)
        .into()
}

pub(crate) fn render_columns(columns: &ColumnsBlock, cx: &mut RenderContext<'_>) -> Node {
    let stacked: Vec<Node> = columns
        .columns
        .iter()
        .map(|column| {
            Element::new("div")
                .style("margin-bottom: 16px;")
                .children(nested_blocks(&column.blocks, cx))
                .into()
        })
        .collect();

    Element::new("div")
        .style("margin: 16px 0;")
        .children(stacked)
        .into()
}

pub(crate) fn render_grid(grid: &GridBlock, cx: &mut RenderContext<'_>) -> Node {
    let cells: Vec<Node> = grid
        .cells
        .iter()
        .map(|cell| {
            Element::new("div")
                .style("margin-bottom: 12px; padding: 16px; background-color: #f9fafb; border: 1px solid #e5e7eb; border-radius: 8px;")
                .children(nested_blocks(&cell.blocks, cx))
                .into()
        })
        .collect();

    Element::new("div")
        .style("margin: 16px 0;")
        .children(cells)
        .into()
}

pub(crate) fn render_accordion(accordion: &AccordionBlock, cx: &mut RenderContext<'_>) -> Node {
    let heading = cx.container_heading();
    let items: Vec<Node> = accordion
        .items
        .iter()
        .map(|item| {
            Element::new("div")
                .style("margin-bottom: 16px; padding-bottom: 8px; border-bottom: 1px solid #e5e7eb;")
                .children(expanded_title(&item.title, heading, "margin: 0 0 8px; color: #111827;"))
                .children(nested_blocks(&item.blocks, cx))
                .into()
        })
        .collect();

    Element::new("div")
        .style("margin: 16px 0;")
        .children(items)
        .into()
}

pub(crate) fn render_callout(callout: &CalloutBlock, cx: &mut RenderContext<'_>) -> Node {
    let variant = AlertVariant::from(callout.variant);
    let colors = alert_colors(variant);

    let mut element = Element::new("div")
        .attr("data-variant", variant.as_str())
        .style(format!(
            "margin: 16px 0; padding: 16px; background-color: {}; border: 1px solid {}; border-left: 4px solid {}; border-radius: 6px; color: {};",
            colors.background, colors.border, colors.border, colors.text
        ));

    if let Some(title) = non_empty(&callout.title) {
        element = element.child(
            Element::new("p")
                .style("margin: 0 0 8px; font-weight: bold;")
                .text(title),
        );
    }

    element.children(nested_blocks(&callout.blocks, cx)).into()
}

pub(crate) fn render_toggle(toggle: &ToggleBlock, cx: &mut RenderContext<'_>) -> Node {
    Element::new("div")
        .style("margin: 16px 0; padding: 16px; border: 1px solid #d1d5db; border-radius: 6px;")
        .children(expanded_title(
            &toggle.title,
            "p",
            "margin: 0 0 8px; font-weight: bold;",
        ))
        .children(nested_blocks(&toggle.blocks, cx))
        .into()
}

/// Title line of an always-open disclosure, omitted when the title is blank.
fn expanded_title(title: &str, tag: &'static str, style: &'static str) -> Option<Node> {
    (!title.trim().is_empty()).then(|| {
        Element::new(tag)
            .style(style)
            .text(format!("{EXPANDED_GLYPH} {title}"))
            .into()
    })
}

fn nested_blocks(blocks: &[ContentBlock], cx: &mut RenderContext<'_>) -> Vec<Node> {
    cx.nested(|cx| render_blocks(blocks, cx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::{
        service::{config::build_rich_text_sanitizer, markdown::ComrakMarkdown, node::serialize},
        types::{RenderOptions, RenderStats},
    };
    use crate::domain::{
        blocks::{AccordionItem, BlockGroup, TabPanel, TextBlock},
        types::CalloutVariant,
    };

    fn text(content: &str) -> ContentBlock {
        ContentBlock::Text(TextBlock::markdown(content))
    }

    fn render(block: ContentBlock) -> (String, RenderStats) {
        let markdown = ComrakMarkdown::new();
        let sanitizer = build_rich_text_sanitizer();
        let options = RenderOptions::default();
        let mut cx = RenderContext::new(&options, &markdown, &sanitizer);
        let node = super::super::blocks::render_block(&block, &mut cx);
        (serialize(&[node]), cx.stats)
    }

    #[test]
    fn tabs_become_sequential_headed_sections() {
        let (html, _) = render(ContentBlock::Tabs(TabsBlock {
            tabs: vec![
                TabPanel {
                    label: "First".into(),
                    blocks: vec![text("one")],
                },
                TabPanel {
                    label: "Second".into(),
                    blocks: vec![text("two")],
                },
            ],
        }));

        let first = html.find(">First</h4>").expect("first heading");
        let second = html.find(">Second</h4>").expect("second heading");
        assert!(first < html.find("one").expect("first body"));
        assert!(second > html.find("one").expect("first body"));
        assert!(html.contains("margin-top: 0px;"));
        assert!(html.contains("margin-top: 24px;"));
    }

    #[test]
    fn columns_stack_in_order() {
        let (html, _) = render(ContentBlock::Columns(ColumnsBlock {
            columns: vec![
                BlockGroup {
                    blocks: vec![text("left")],
                },
                BlockGroup {
                    blocks: vec![text("right")],
                },
            ],
        }));
        assert!(html.find("left").expect("left") < html.find("right").expect("right"));
        assert_eq!(html.matches("margin-bottom: 16px;").count(), 2);
    }

    #[test]
    fn grid_cells_are_tinted_boxes() {
        let (html, _) = render(ContentBlock::Grid(GridBlock {
            cells: vec![BlockGroup::default(), BlockGroup::default()],
        }));
        assert_eq!(html.matches("background-color: #f9fafb;").count(), 2);
    }

    #[test]
    fn accordion_items_are_pre_expanded() {
        let (html, _) = render(ContentBlock::Accordion(AccordionBlock {
            items: vec![AccordionItem {
                title: "FAQ <1>".into(),
                blocks: vec![text("answer")],
            }],
        }));
        assert!(html.contains("▼ FAQ &lt;1&gt;"));
        assert!(html.contains("answer"));
    }

    #[test]
    fn blank_container_titles_are_omitted() {
        let (toggle, _) = render(ContentBlock::Toggle(ToggleBlock {
            title: " ".into(),
            blocks: vec![text("body")],
        }));
        let (accordion, _) = render(ContentBlock::Accordion(AccordionBlock {
            items: vec![AccordionItem {
                title: String::new(),
                blocks: vec![text("answer")],
            }],
        }));
        let (tabs, _) = render(ContentBlock::Tabs(TabsBlock {
            tabs: vec![TabPanel {
                label: String::new(),
                blocks: vec![text("panel")],
            }],
        }));

        for html in [&toggle, &accordion, &tabs] {
            assert!(!html.contains(EXPANDED_GLYPH), "{html}");
            assert!(!html.contains("<h4"), "{html}");
        }
        assert!(toggle.contains("body"));
        assert!(accordion.contains("answer"));
        assert!(tabs.contains("panel"));
    }

    #[test]
    fn callout_uses_alert_palette() {
        let (html, _) = render(ContentBlock::Callout(CalloutBlock {
            variant: CalloutVariant::Success,
            title: Some("Nice".into()),
            blocks: vec![text("inner")],
        }));
        assert!(html.contains("background-color: #f0fdf4"));
        assert!(html.contains(">Nice</p>"));
        assert!(html.contains("inner"));
    }

    #[test]
    fn nested_containers_indent_and_deepen_headings() {
        let (html, stats) = render(ContentBlock::Toggle(ToggleBlock {
            title: "More".into(),
            blocks: vec![ContentBlock::Tabs(TabsBlock {
                tabs: vec![TabPanel {
                    label: "Inner".into(),
                    blocks: vec![ContentBlock::Accordion(AccordionBlock {
                        items: vec![AccordionItem {
                            title: "Deep".into(),
                            blocks: vec![ContentBlock::Callout(CalloutBlock::default())],
                        }],
                    })],
                }],
            })],
        }));

        assert!(html.starts_with("<div"));
        assert!(html.contains("▼ More</p>"));
        assert!(html.contains(">Inner</h5>"));
        assert!(html.contains(">▼ Deep</h6>"));
        assert!(html.contains("\n  <div"));
        assert_eq!(stats.max_depth, 4);
        assert_eq!(stats.blocks_rendered, 4);
    }

    #[test]
    fn empty_containers_render_their_frame_only() {
        let (html, stats) = render(ContentBlock::Toggle(ToggleBlock::default()));
        assert!(html.contains("▼ </p>"));
        assert_eq!(stats.blocks_rendered, 1);
        assert_eq!(stats.max_depth, 1);
    }
}
