use crate::application::render::types::EmailLayout;

use super::node::{Element, Node, serialize};

/// Wrap an already-rendered body in the default email shell.
pub fn wrap(body: &str) -> String {
    wrap_with(body, &EmailLayout::default())
}

/// Wrap an already-rendered body in a fixed-width shell using only inline styles.
pub fn wrap_with(body: &str, layout: &EmailLayout) -> String {
    let mut shell = shell(layout);
    if !body.trim().is_empty() {
        shell = shell.raw(body);
    }
    serialize(&[shell.into()])
}

pub(crate) fn wrap_nodes(nodes: Vec<Node>, layout: &EmailLayout) -> String {
    serialize(&[shell(layout).children(nodes).into()])
}

fn shell(layout: &EmailLayout) -> Element {
    Element::new("div").style(format!(
        "max-width: {}px; margin: 0 auto; font-family: {}; line-height: {}; color: {};",
        layout.max_width_px, layout.font_family, layout.line_height, layout.text_color
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_in_fixed_width_shell() {
        insta::assert_snapshot!(wrap("<p>No content available</p>"), @r#"
        <div style="max-width: 600px; margin: 0 auto; font-family: Arial, Helvetica, sans-serif; line-height: 1.6; color: #333333;">
          <p>No content available</p>
        </div>
        "#);
    }

    #[test]
    fn structural_and_string_wrapping_agree() {
        let layout = EmailLayout::default();
        let nodes = vec![Element::new("p").text("No content available").into()];
        assert_eq!(
            wrap_nodes(nodes, &layout),
            wrap("<p>No content available</p>")
        );
    }

    #[test]
    fn layout_values_are_escaped() {
        let layout = EmailLayout {
            font_family: "\"Inter\", sans-serif".into(),
            ..EmailLayout::default()
        };
        let html = wrap_with("", &layout);
        assert!(html.contains("font-family: &quot;Inter&quot;, sans-serif;"));
        assert!(html.ends_with("></div>"));
    }

    #[test]
    fn custom_width_is_applied() {
        let layout = EmailLayout {
            max_width_px: 640,
            ..EmailLayout::default()
        };
        assert!(wrap_with("<p>x</p>", &layout).starts_with("<div style=\"max-width: 640px;"));
    }
}
