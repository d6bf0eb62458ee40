use crate::domain::{
    blocks::non_empty,
    resources::{Resource, ResourceSection, ResourceTab, TabLayout},
};

use super::{
    blocks::render_blocks,
    context::RenderContext,
    node::{Element, Node},
};

pub(crate) const EMPTY_DOCUMENT_TEXT: &str = "No content available";

/// Body nodes for a whole resource, in source order.
pub(crate) fn document_nodes(resource: &Resource, cx: &mut RenderContext<'_>) -> Vec<Node> {
    let tabs = &resource.content.tabs;
    if tabs.is_empty() {
        return vec![Element::new("p").text(EMPTY_DOCUMENT_TEXT).into()];
    }

    let mut nodes = Vec::new();

    if !resource.title.trim().is_empty() {
        nodes.push(
            Element::new("h1")
                .style("margin: 0 0 16px; font-size: 28px; line-height: 1.3; color: #111827;")
                .text(resource.title.as_str())
                .into(),
        );
    }

    if let Some(description) = non_empty(&resource.description) {
        nodes.push(
            Element::new("p")
                .style("margin: 0 0 24px; font-size: 16px; color: #4b5563;")
                .text(description)
                .into(),
        );
    }

    let show_tab_headings = tabs.len() > 1;
    for tab in tabs {
        render_tab(tab, show_tab_headings, &mut nodes, cx);
    }

    nodes
}

fn render_tab(
    tab: &ResourceTab,
    force_heading: bool,
    nodes: &mut Vec<Node>,
    cx: &mut RenderContext<'_>,
) {
    cx.stats.tabs += 1;

    if force_heading || !tab.has_default_title() {
        nodes.push(
            Element::new("h2")
                .style("margin: 32px 0 16px; padding-bottom: 8px; border-bottom: 2px solid #e5e7eb; font-size: 22px; color: #111827;")
                .text(tab.title.as_str())
                .into(),
        );
    }

    match &tab.layout {
        TabLayout::Direct { blocks } => nodes.extend(render_blocks(blocks, cx)),
        TabLayout::Sectioned { sections } => {
            for section in sections {
                render_section(section, nodes, cx);
            }
        }
    }
}

fn render_section(section: &ResourceSection, nodes: &mut Vec<Node>, cx: &mut RenderContext<'_>) {
    cx.stats.sections += 1;

    if let Some(title) = non_empty(&section.title) {
        nodes.push(
            Element::new("h3")
                .style("margin: 24px 0 12px; font-size: 18px; color: #1f2937;")
                .text(title)
                .into(),
        );
    }

    if let Some(description) = non_empty(&section.description) {
        nodes.push(
            Element::new("p")
                .style("margin: 0 0 12px; color: #6b7280;")
                .text(description)
                .into(),
        );
    }

    nodes.extend(render_blocks(&section.blocks, cx));
}
