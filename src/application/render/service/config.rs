use std::{borrow::Cow, collections::HashSet};

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::Options;

/// Markdown options for email bodies: GFM tables and lists, no raw HTML passthrough.
pub(crate) fn markdown_options() -> Options<'static> {
    let mut options = Options::default();
    configure_extensions(&mut options);
    options
}

/// Allowlist for editor rich text destined for email clients.
pub(crate) fn build_rich_text_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "b",
        "blockquote",
        "br",
        "code",
        "del",
        "div",
        "em",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "hr",
        "i",
        "img",
        "ins",
        "li",
        "ol",
        "p",
        "pre",
        "s",
        "span",
        "strong",
        "sub",
        "sup",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "u",
        "ul",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from(["style", "title", "lang", "dir", "align"]);
    builder.generic_attributes(generic);

    builder.add_tag_attributes("a", &["target"]);
    builder.add_tag_attributes("img", &["width", "height", "alt"]);
    builder.add_tag_attributes("table", &["width", "border", "cellpadding", "cellspacing"]);
    builder.add_tag_attributes("th", &["colspan", "rowspan", "valign", "width"]);
    builder.add_tag_attributes("td", &["colspan", "rowspan", "valign", "width"]);

    builder.attribute_filter(|_element, attribute, value| {
        if attribute.eq_ignore_ascii_case("style") {
            sanitize_style_attribute(value).map(Cow::Owned)
        } else {
            Some(Cow::Borrowed(value))
        }
    });

    builder
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.tagfilter = true;

    let render = &mut options.render;
    render.r#unsafe = false;
    render.sourcepos = false;
}

fn sanitize_style_attribute(value: &str) -> Option<String> {
    let sanitized: Vec<&str> = value
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty() && is_safe_style_declaration(decl))
        .collect();

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized.join("; "))
    }
}

fn is_safe_style_declaration(decl: &str) -> bool {
    let lower = decl.to_ascii_lowercase();

    const FORBIDDEN_SUBSTRINGS: [&str; 7] = [
        "expression(",
        "javascript:",
        "vbscript:",
        "-moz-binding",
        "behavior:",
        "behaviour:",
        "@import",
    ];

    if FORBIDDEN_SUBSTRINGS
        .iter()
        .any(|needle| lower.contains(needle))
    {
        return false;
    }

    // Mail clients fetch background images eagerly; only plain https targets survive.
    !contains_non_https_url(&lower)
}

fn contains_non_https_url(lower_decl: &str) -> bool {
    let mut offset = 0;

    while let Some(start) = lower_decl[offset..].find("url(") {
        let open = offset + start + 4;
        let rest = &lower_decl[open..];
        let Some(close_rel) = rest.find(')') else {
            return true;
        };
        let close = open + close_rel;
        let target = lower_decl[open..close]
            .trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"');

        if !target.starts_with("https://") {
            return true;
        }
        offset = close + 1;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::{build_rich_text_sanitizer, contains_non_https_url, sanitize_style_attribute};

    #[test]
    fn sanitize_style_attribute_preserves_safe_rules() {
        let output = sanitize_style_attribute("color: red; padding: 4px;");
        assert_eq!(output.as_deref(), Some("color: red; padding: 4px"));
    }

    #[test]
    fn sanitize_style_attribute_drops_unsafe_rules() {
        let input = "color: red; background: url('javascript:alert(1)'); expression(test);";
        assert_eq!(sanitize_style_attribute(input).as_deref(), Some("color: red"));
    }

    #[test]
    fn sanitize_style_attribute_returns_none_when_only_unsafe() {
        let input = "background-image: url('http://tracker.example/p.gif');";
        assert!(sanitize_style_attribute(input).is_none());
    }

    #[test]
    fn only_https_urls_are_allowed() {
        assert!(contains_non_https_url("background:url(javascript:alert(1))"));
        assert!(contains_non_https_url("background:url('data:image/png;base64,aaaa')"));
        assert!(contains_non_https_url("background:url(https://a.example/x.png"));
        assert!(!contains_non_https_url(
            "background:url('https://example.com/bg.png')"
        ));
    }

    #[test]
    fn rich_text_sanitizer_strips_scripts_and_keeps_inline_styles() {
        let html = build_rich_text_sanitizer()
            .clean(
                "<p style=\"color: #111111;\">Hi<script>alert(1)</script></p>\
                 <iframe src=\"https://x\"></iframe>",
            )
            .to_string();

        assert!(html.contains("style=\"color: #111111\""));
        assert!(!html.contains("<script"));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn markdown_options_do_not_pass_raw_html() {
        let options = super::markdown_options();
        let html = comrak::markdown_to_html("<script>alert(1)</script>\n\n**ok**", &options);
        assert!(!html.contains("<script>"));
        assert!(html.contains("<strong>ok</strong>"));
    }
}
