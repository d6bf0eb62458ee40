//! Per-variant block rendering.
//!
//! Leaf blocks are formatted here; container blocks are handed to [`super::layout`].

use tracing::debug;

use crate::domain::blocks::{
    AlertBlock, ButtonBlock, ChecklistBlock, CodeBlock, ContentBlock, DividerBlock, EmbedBlock,
    FileBlock, ImageBlock, QuizBlock, QuoteBlock, TableBlock, TextBlock, TextBody,
    UnsupportedBlock, VideoBlock, non_empty,
};

use super::{
    context::RenderContext,
    layout,
    node::{Element, Node},
    palette::{alert_colors, button_colors},
    video::youtube_embed_url,
};

pub(crate) const UNSUPPORTED_BLOCK_TEXT: &str = "Unsupported block type";

pub(crate) fn render_blocks(blocks: &[ContentBlock], cx: &mut RenderContext<'_>) -> Vec<Node> {
    blocks.iter().map(|block| render_block(block, cx)).collect()
}

pub(crate) fn render_block(block: &ContentBlock, cx: &mut RenderContext<'_>) -> Node {
    cx.stats.blocks_rendered += 1;

    match block {
        ContentBlock::Text(text) => render_text(text, cx),
        ContentBlock::Image(image) => render_image(image),
        ContentBlock::Video(video) => render_video(video),
        ContentBlock::File(file) => render_file(file),
        ContentBlock::Table(table) => render_table(table),
        ContentBlock::Divider(divider) => render_divider(divider),
        ContentBlock::Code(code) => render_code(code),
        ContentBlock::Quote(quote) => render_quote(quote),
        ContentBlock::Button(button) => render_button(button),
        ContentBlock::Alert(alert) => render_alert(alert),
        ContentBlock::Checklist(checklist) => render_checklist(checklist),
        ContentBlock::Embed(embed) => render_embed(embed, cx),
        ContentBlock::Quiz(quiz) => render_quiz(quiz),
        ContentBlock::Tabs(tabs) => layout::render_tabs(tabs, cx),
        ContentBlock::Columns(columns) => layout::render_columns(columns, cx),
        ContentBlock::Grid(grid) => layout::render_grid(grid, cx),
        ContentBlock::Accordion(accordion) => layout::render_accordion(accordion, cx),
        ContentBlock::Callout(callout) => layout::render_callout(callout, cx),
        ContentBlock::Toggle(toggle) => layout::render_toggle(toggle, cx),
        ContentBlock::Unsupported(unsupported) => {
            render_unsupported(block.kind(), unsupported, cx)
        }
    }
}

fn render_text(text: &TextBlock, cx: &RenderContext<'_>) -> Node {
    let html = match text.body() {
        TextBody::RichText(html) => cx.rich_text(html),
        TextBody::Markdown(markdown) => cx.markdown.to_html(markdown),
    };

    let element = Element::new("div").style("margin: 16px 0;");
    if html.trim().is_empty() {
        return element.into();
    }
    element.raw(html).into()
}

fn render_image(image: &ImageBlock) -> Node {
    let img = Element::new("img")
        .attr("src", image.url.as_str())
        .attr("alt", image.alt.as_str())
        .style("display: block; max-width: 100%; height: auto; margin: 0 auto; border-radius: 8px;");

    let mut figure = Element::new("div")
        .style("margin: 16px 0; text-align: center;")
        .child(img);

    if let Some(caption) = non_empty(&image.caption) {
        figure = figure.child(
            Element::new("p")
                .style("margin: 8px 0 0; font-size: 14px; font-style: italic; color: #6b7280; text-align: center;")
                .text(caption),
        );
    }

    figure.into()
}

fn render_video(video: &VideoBlock) -> Node {
    if let Some(embed_url) = youtube_embed_url(video) {
        let title = non_empty(&video.title).unwrap_or("YouTube video");
        let frame = Element::new("iframe")
            .attr("src", embed_url)
            .attr("title", title)
            .attr("frameborder", "0")
            .attr("allowfullscreen", "")
            .style("position: absolute; top: 0; left: 0; width: 100%; height: 100%; border: 0;");

        return Element::new("div")
            .style("margin: 16px 0;")
            .child(
                Element::new("div")
                    .style("position: relative; padding-bottom: 56.25%; height: 0; overflow: hidden;")
                    .child(frame),
            )
            .into();
    }

    let label = non_empty(&video.title).unwrap_or(video.url.as_str());
    Element::new("p")
        .style("margin: 16px 0;")
        .child(
            Element::new("a")
                .attr("href", video.url.as_str())
                .style("color: #3b82f6; text-decoration: underline;")
                .text(format!("▶ {label}")),
        )
        .into()
}

fn render_file(file: &FileBlock) -> Node {
    Element::new("p")
        .style("margin: 16px 0;")
        .child(
            Element::new("a")
                .attr("href", file.url.as_str())
                .attr("download", file.filename.as_str())
                .style("display: inline-block; padding: 12px 16px; background-color: #f3f4f6; border: 1px solid #d1d5db; border-radius: 6px; color: #1f2937; text-decoration: none;")
                .text(format!("📎 {}", file.filename)),
        )
        .into()
}

fn render_table(table: &TableBlock) -> Node {
    const CELL_STYLE: &str = "padding: 8px 12px; border: 1px solid #e5e7eb; text-align: left;";

    let mut element = Element::new("table")
        .attr("cellpadding", "0")
        .attr("cellspacing", "0")
        .style("width: 100%; margin: 16px 0; border-collapse: collapse; border: 1px solid #e5e7eb;");

    if table.has_header && !table.headers.is_empty() {
        let header_row = Element::new("tr").children(table.headers.iter().map(|header| {
            Node::from(
                Element::new("th")
                    .style("padding: 8px 12px; border: 1px solid #e5e7eb; text-align: left; background-color: #f3f4f6; font-weight: bold;")
                    .text(header.as_str()),
            )
        }));
        element = element.child(Element::new("thead").child(header_row));
    }

    let body = Element::new("tbody").children(table.rows.iter().enumerate().map(|(index, row)| {
        let background = if index % 2 == 0 { "#ffffff" } else { "#f9fafb" };
        let cells = row
            .iter()
            .map(|cell| Node::from(Element::new("td").style(CELL_STYLE).text(cell.as_str())));
        Node::from(
            Element::new("tr")
                .style(format!("background-color: {background};"))
                .children(cells),
        )
    }));

    element.child(body).into()
}

fn render_divider(divider: &DividerBlock) -> Node {
    Element::new("hr")
        .style(format!(
            "border: none; border-top: {}px {} #e5e7eb; margin: 24px 0;",
            divider.style.thickness_px(),
            divider.style.border_style()
        ))
        .into()
}

fn render_code(code: &CodeBlock) -> Node {
    let mut element = Element::new("div")
        .style("margin: 16px 0; border-radius: 8px; overflow: hidden; background-color: #1f2937;");

    if let Some(filename) = non_empty(&code.filename) {
        element = element.child(
            Element::new("div")
                .style("padding: 8px 16px; background-color: #111827; color: #9ca3af; font-family: 'Courier New', monospace; font-size: 12px;")
                .text(filename),
        );
    }

    let mut pre = Element::new("pre").style("margin: 0; padding: 16px; overflow-x: auto;");
    if !code.language.trim().is_empty() {
        pre = pre.attr("data-language", code.language.trim());
    }

    element
        .child(
            pre.child(
                Element::new("code")
                    .style("color: #f9fafb; font-family: 'Courier New', monospace; font-size: 14px; white-space: pre;")
                    .text(code.code.as_str()),
            ),
        )
        .into()
}

fn render_quote(quote: &QuoteBlock) -> Node {
    let mut element = Element::new("blockquote")
        .style("margin: 16px 0; padding: 12px 20px; border-left: 4px solid #3b82f6; background-color: #f8fafc; color: #374151;")
        .child(
            Element::new("p")
                .style("margin: 0; font-size: 16px; font-style: italic;")
                .text(format!("“{}”", quote.text)),
        );

    let attribution = match (non_empty(&quote.author), non_empty(&quote.source)) {
        (Some(author), Some(source)) => Some(format!("— {author}, {source}")),
        (Some(author), None) => Some(format!("— {author}")),
        (None, Some(source)) => Some(format!("— {source}")),
        (None, None) => None,
    };

    if let Some(attribution) = attribution {
        element = element.child(
            Element::new("p")
                .style("margin: 8px 0 0; font-size: 14px; color: #6b7280;")
                .text(attribution),
        );
    }

    element.into()
}

fn render_button(button: &ButtonBlock) -> Node {
    let colors = button_colors(button.variant);
    Element::new("div")
        .style("margin: 16px 0; text-align: center;")
        .child(
            Element::new("a")
                .attr("href", button.url.as_str())
                .style(format!(
                    "display: inline-block; padding: 12px 24px; background-color: {}; color: {}; border: 2px solid {}; border-radius: 6px; font-weight: bold; text-decoration: none;",
                    colors.background, colors.text, colors.border
                ))
                .text(button.text.as_str()),
        )
        .into()
}

fn render_alert(alert: &AlertBlock) -> Node {
    let colors = alert_colors(alert.variant);
    let mut element = Element::new("div")
        .attr("data-variant", alert.variant.as_str())
        .style(format!(
            "margin: 16px 0; padding: 16px; background-color: {}; border-left: 4px solid {}; border-radius: 4px; color: {};",
            colors.background, colors.border, colors.text
        ));

    if let Some(title) = non_empty(&alert.title) {
        element = element.child(
            Element::new("p")
                .style("margin: 0 0 8px; font-weight: bold;")
                .text(title),
        );
    }

    element
        .child(Element::new("p").style("margin: 0;").text(alert.message.as_str()))
        .into()
}

fn render_checklist(checklist: &ChecklistBlock) -> Node {
    let mut element = Element::new("div").style("margin: 16px 0;");

    if let Some(title) = non_empty(&checklist.title) {
        element = element.child(
            Element::new("p")
                .style("margin: 0 0 8px; font-weight: bold;")
                .text(title),
        );
    }

    element
        .children(checklist.items.iter().map(|item| {
            let glyph = if item.checked { '☑' } else { '☐' };
            Node::from(
                Element::new("p")
                    .style("margin: 4px 0;")
                    .text(format!("{glyph} {}", item.text)),
            )
        }))
        .into()
}

fn render_embed(embed: &EmbedBlock, cx: &RenderContext<'_>) -> Node {
    let height = embed.height.unwrap_or(cx.options.embed_height);
    let title = non_empty(&embed.title).unwrap_or("Embedded content");

    Element::new("div")
        .style("margin: 16px 0;")
        .child(
            Element::new("iframe")
                .attr("src", embed.url.as_str())
                .attr("title", title)
                .attr("width", "100%")
                .attr("height", height.to_string())
                .attr("frameborder", "0")
                .style(format!("width: 100%; height: {height}px; border: 0;")),
        )
        .into()
}

fn render_quiz(quiz: &QuizBlock) -> Node {
    let count = quiz.questions.len();
    let noun = if count == 1 { "question" } else { "questions" };

    let title = (!quiz.title.trim().is_empty()).then(|| {
        Node::from(
            Element::new("p")
                .style("margin: 0 0 8px; font-size: 18px; font-weight: bold; color: #5b21b6;")
                .text(format!("📝 {}", quiz.title)),
        )
    });

    let mut element = Element::new("div")
        .style("margin: 16px 0; padding: 20px; background-color: #f5f3ff; border: 1px solid #c4b5fd; border-radius: 8px;")
        .children(title);

    if !quiz.description.trim().is_empty() {
        element = element.child(
            Element::new("p")
                .style("margin: 0 0 8px; color: #4b5563;")
                .text(quiz.description.as_str()),
        );
    }

    element
        .child(
            Element::new("p")
                .style("margin: 0; font-size: 14px; font-style: italic; color: #6b7280;")
                .text(format!(
                    "This quiz has {count} {noun}. Open the resource online to take it."
                )),
        )
        .into()
}

fn render_unsupported(
    kind: &str,
    block: &UnsupportedBlock,
    cx: &mut RenderContext<'_>,
) -> Node {
    cx.stats.unsupported_blocks += 1;
    debug!(
        target = "application::render::blocks",
        block_type = kind,
        reason = %block.reason,
        "rendering unsupported block placeholder"
    );

    Element::new("p")
        .style("margin: 16px 0; color: #9ca3af; font-style: italic;")
        .text(UNSUPPORTED_BLOCK_TEXT)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::{
        service::{config::build_rich_text_sanitizer, markdown::ComrakMarkdown, node::serialize},
        types::RenderOptions,
    };
    use crate::domain::{
        blocks::ChecklistItem,
        types::{AlertVariant, ButtonVariant, DividerStyle},
    };

    fn render(block: ContentBlock) -> String {
        render_with(block, &RenderOptions::default())
    }

    fn render_with(block: ContentBlock, options: &RenderOptions) -> String {
        let markdown = ComrakMarkdown::new();
        let sanitizer = build_rich_text_sanitizer();
        let mut cx = RenderContext::new(options, &markdown, &sanitizer);
        let node = render_block(&block, &mut cx);
        serialize(&[node])
    }

    #[test]
    fn markdown_text_is_converted_inside_a_div() {
        let html = render(ContentBlock::Text(TextBlock::markdown("**Hello**")));
        assert!(html.starts_with("<div"));
        assert!(html.contains("<strong>Hello</strong>"));
    }

    #[test]
    fn rich_text_is_inlined_as_is_by_default() {
        let html = render(ContentBlock::Text(TextBlock {
            content: String::new(),
            rich_text: Some("<p class=\"lead\">Rich</p>".into()),
        }));
        assert!(html.contains("<p class=\"lead\">Rich</p>"));
    }

    #[test]
    fn rich_text_can_be_sanitized() {
        let options = RenderOptions {
            sanitize_rich_text: true,
            ..RenderOptions::default()
        };
        let html = render_with(
            ContentBlock::Text(TextBlock {
                content: String::new(),
                rich_text: Some("<p>Rich<script>alert(1)</script></p>".into()),
            }),
            &options,
        );
        assert!(html.contains("<p>Rich</p>"));
        assert!(!html.contains("script"));
    }

    #[test]
    fn image_with_caption() {
        let html = render(ContentBlock::Image(ImageBlock {
            url: "https://x/y.png".into(),
            alt: "logo".into(),
            caption: Some("Our logo".into()),
        }));
        assert!(html.contains(r#"<img src="https://x/y.png" alt="logo""#));
        assert!(html.contains("font-style: italic"));
        assert!(html.contains(">Our logo</p>"));
    }

    #[test]
    fn image_without_caption_omits_paragraph() {
        let html = render(ContentBlock::Image(ImageBlock {
            url: "a.png".into(),
            alt: String::new(),
            caption: Some(" ".into()),
        }));
        assert!(!html.contains("<p"));
    }

    #[test]
    fn youtube_video_embeds_responsively() {
        let html = render(ContentBlock::Video(VideoBlock {
            platform: Some("youtube".into()),
            embed_id: Some("abc123".into()),
            url: String::new(),
            title: Some("Intro".into()),
        }));
        assert!(html.contains(r#"src="https://www.youtube.com/embed/abc123""#));
        assert!(html.contains("padding-bottom: 56.25%"));
    }

    #[test]
    fn other_videos_fall_back_to_a_link() {
        let html = render(ContentBlock::Video(VideoBlock {
            platform: Some("vimeo".into()),
            embed_id: Some("42".into()),
            url: "https://vimeo.com/42".into(),
            title: Some("Tour".into()),
        }));
        assert!(!html.contains("<iframe"));
        assert!(html.contains(r#"href="https://vimeo.com/42""#));
        assert!(html.contains("Tour</a>"));
    }

    #[test]
    fn file_links_download() {
        let html = render(ContentBlock::File(FileBlock {
            filename: "plan.pdf".into(),
            url: "https://files/plan.pdf".into(),
        }));
        assert!(html.contains(r#"download="plan.pdf""#));
        assert!(html.contains("📎 plan.pdf"));
    }

    #[test]
    fn table_header_and_zebra_rows() {
        let html = render(ContentBlock::Table(TableBlock {
            headers: vec!["Name".into()],
            rows: vec![vec!["a".into()], vec!["b".into()], vec!["c".into()]],
            has_header: true,
        }));
        assert!(html.contains("<thead>"));
        assert_eq!(html.matches("background-color: #ffffff;").count(), 2);
        assert_eq!(html.matches("background-color: #f9fafb;").count(), 1);
    }

    #[test]
    fn table_header_skipped_when_disabled_or_empty() {
        let disabled = render(ContentBlock::Table(TableBlock {
            headers: vec!["Name".into()],
            rows: vec![],
            has_header: false,
        }));
        let empty = render(ContentBlock::Table(TableBlock {
            headers: vec![],
            rows: vec![],
            has_header: true,
        }));
        assert!(!disabled.contains("<thead>"));
        assert!(!empty.contains("<thead>"));
    }

    #[test]
    fn divider_styles() {
        let thick = render(ContentBlock::Divider(DividerBlock {
            style: DividerStyle::Thick,
        }));
        let dotted = render(ContentBlock::Divider(DividerBlock {
            style: DividerStyle::Dotted,
        }));
        insta::assert_snapshot!(thick, @r#"<hr style="border: none; border-top: 3px solid #e5e7eb; margin: 24px 0;" />"#);
        assert!(dotted.contains("1px dotted"));
    }

    #[test]
    fn code_is_escaped_with_optional_filename() {
        let html = render(ContentBlock::Code(CodeBlock {
            code: "if a < b && c > d {}".into(),
            language: "rust".into(),
            filename: Some("main.rs".into()),
        }));
        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d {}"));
        assert!(html.contains(">main.rs</div>"));
        assert!(html.contains(r#"data-language="rust""#));
    }

    #[test]
    fn quote_attribution_variants() {
        let full = render(ContentBlock::Quote(QuoteBlock {
            text: "Ship it".into(),
            author: Some("Grace".into()),
            source: Some("Talk".into()),
        }));
        let author_only = render(ContentBlock::Quote(QuoteBlock {
            text: "Ship it".into(),
            author: Some("Grace".into()),
            source: None,
        }));
        let bare = render(ContentBlock::Quote(QuoteBlock {
            text: "Ship it".into(),
            author: None,
            source: None,
        }));

        assert!(full.contains("“Ship it”"));
        assert!(full.contains("— Grace, Talk"));
        assert!(author_only.contains("— Grace</p>"));
        assert!(!bare.contains("—"));
    }

    #[test]
    fn button_palette_follows_variant() {
        let outline = render(ContentBlock::Button(ButtonBlock {
            text: "Go".into(),
            url: "https://go".into(),
            variant: ButtonVariant::Outline,
        }));
        assert!(outline.contains("background-color: transparent; color: #3b82f6; border: 2px solid #3b82f6;"));
    }

    #[test]
    fn alert_escapes_injected_markup() {
        let html = render(ContentBlock::Alert(AlertBlock {
            variant: AlertVariant::Warning,
            title: Some("<script>x</script>".into()),
            message: "Do not do X".into(),
        }));
        assert!(html.contains("background-color: #fffbeb"));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn checklist_glyphs() {
        let html = render(ContentBlock::Checklist(ChecklistBlock {
            title: None,
            items: vec![
                ChecklistItem {
                    text: "done".into(),
                    checked: true,
                },
                ChecklistItem {
                    text: "todo".into(),
                    checked: false,
                },
            ],
        }));
        assert!(html.contains("☑ done"));
        assert!(html.contains("☐ todo"));
        assert!(!html.contains("font-weight: bold"));
    }

    #[test]
    fn embed_defaults() {
        let html = render(ContentBlock::Embed(EmbedBlock {
            url: "https://forms/x".into(),
            height: None,
            title: None,
        }));
        assert!(html.contains(r#"title="Embedded content""#));
        assert!(html.contains(r#"height="400""#));

        let tall = render(ContentBlock::Embed(EmbedBlock {
            url: "https://forms/x".into(),
            height: Some(720),
            title: Some("Signup".into()),
        }));
        assert!(tall.contains("height: 720px"));
        assert!(tall.contains(r#"title="Signup""#));
    }

    #[test]
    fn quiz_is_a_teaser_without_questions() {
        let html = render(ContentBlock::Quiz(QuizBlock {
            title: "Check-in".into(),
            description: "Quick recap".into(),
            questions: vec![
                serde_json::json!({ "question": "Secret answer one?" }),
                serde_json::json!({ "question": "Secret answer two?" }),
                serde_json::json!({ "question": "Secret answer three?" }),
            ],
        }));
        assert!(html.contains("3 questions"));
        assert!(!html.contains("Secret answer"));

        let single = render(ContentBlock::Quiz(QuizBlock {
            questions: vec![serde_json::json!({})],
            ..QuizBlock::default()
        }));
        assert!(single.contains("has 1 question."));
    }

    #[test]
    fn blank_quiz_title_is_omitted() {
        let html = render(ContentBlock::Quiz(QuizBlock {
            title: "   ".into(),
            questions: vec![serde_json::json!({})],
            ..QuizBlock::default()
        }));
        assert!(!html.contains("📝"));
        assert_eq!(html.matches("<p").count(), 1);
        assert!(html.contains("This quiz has 1 question."));
    }

    #[test]
    fn unsupported_block_renders_placeholder() {
        let markdown = ComrakMarkdown::new();
        let sanitizer = build_rich_text_sanitizer();
        let options = RenderOptions::default();
        let mut cx = RenderContext::new(&options, &markdown, &sanitizer);
        let node = render_block(
            &ContentBlock::Unsupported(UnsupportedBlock {
                block_type: Some("hologram".into()),
                reason: "unknown variant".into(),
            }),
            &mut cx,
        );

        assert!(serialize(&[node]).contains(UNSUPPORTED_BLOCK_TEXT));
        assert_eq!(cx.stats.unsupported_blocks, 1);
        assert_eq!(cx.stats.blocks_rendered, 1);
    }
}
