//! Intermediate HTML tree and its serializer.
//!
//! Renderers build [`Node`]s; only [`serialize`] produces text. Text nodes and
//! attribute values are escaped here, and indentation is derived from tree depth
//! instead of being spliced into already-rendered strings.

use super::escape::escape_html;

const INDENT: &str = "  ";

/// Elements laid out inline: they never force their parent onto multiple lines.
const INLINE_TAGS: &[&str] = &[
    "a", "b", "br", "code", "em", "i", "img", "span", "strong", "u",
];

/// Elements written without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Elements whose content must be written exactly as-is.
const PREFORMATTED_TAGS: &[&str] = &["pre"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Element(Element),
    /// Untrusted text, escaped on output.
    Text(String),
    /// Trusted HTML written verbatim.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub(crate) fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub(crate) fn style(self, css: impl Into<String>) -> Self {
        self.attr("style", css)
    }

    pub(crate) fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub(crate) fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub(crate) fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub(crate) fn raw(self, html: impl Into<String>) -> Self {
        self.child(Node::Raw(html.into()))
    }

    fn is_inline(&self) -> bool {
        INLINE_TAGS.contains(&self.tag)
    }

    fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag)
    }

    /// Whether children go on their own indented lines.
    fn spans_lines(&self) -> bool {
        if PREFORMATTED_TAGS.contains(&self.tag) {
            return false;
        }
        self.children.iter().any(|child| match child {
            Node::Element(element) => !element.is_inline(),
            Node::Raw(_) => true,
            Node::Text(_) => false,
        })
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Serialize a run of sibling nodes, one block-level node per line.
pub(crate) fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_block(&mut out, node, 0);
    }
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_block(out: &mut String, node: &Node, depth: usize) {
    push_indent(out, depth);
    match node {
        Node::Element(element) if element.spans_lines() => {
            write_open_tag(out, element);
            out.push('\n');
            for child in &element.children {
                write_block(out, child, depth + 1);
            }
            push_indent(out, depth);
            write_close_tag(out, element);
        }
        Node::Raw(html) => out.push_str(html.trim()),
        other => write_inline(out, other),
    }
    out.push('\n');
}

fn write_inline(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Raw(html) => out.push_str(html),
        Node::Element(element) => {
            write_open_tag(out, element);
            if element.is_void() {
                return;
            }
            for child in &element.children {
                write_inline(out, child);
            }
            write_close_tag(out, element);
        }
    }
}

fn write_open_tag(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_html(value));
        out.push('"');
    }
    if element.is_void() {
        out.push_str(" />");
    } else {
        out.push('>');
    }
}

fn write_close_tag(out: &mut String, element: &Element) {
    if element.is_void() {
        return;
    }
    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_elements_stay_on_one_line() {
        let node: Node = Element::new("p")
            .style("margin: 0;")
            .text("Hello ")
            .child(Element::new("strong").text("world"))
            .into();
        assert_eq!(
            serialize(&[node]),
            r#"<p style="margin: 0;">Hello <strong>world</strong></p>"#
        );
    }

    #[test]
    fn nested_blocks_are_indented_by_depth() {
        let node: Node = Element::new("div")
            .child(Element::new("div").child(Element::new("p").text("deep")))
            .child(Element::new("hr"))
            .into();

        insta::assert_snapshot!(serialize(&[node]), @r"
        <div>
          <div>
            <p>deep</p>
          </div>
          <hr />
        </div>
        ");
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let node: Node = Element::new("a")
            .attr("href", "https://x/?a=1&b=\"2\"")
            .text("<script>alert('x')</script>")
            .into();
        let html = serialize(&[node]);
        assert_eq!(
            html,
            "<a href=\"https://x/?a=1&amp;b=&quot;2&quot;\">&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</a>"
        );
    }

    #[test]
    fn raw_html_is_written_verbatim() {
        let node: Node = Element::new("div")
            .raw("<p><strong>Hello</strong></p>\n")
            .into();
        assert_eq!(
            serialize(&[node]),
            "<div>\n  <p><strong>Hello</strong></p>\n</div>"
        );
    }

    #[test]
    fn preformatted_content_is_not_reindented() {
        let node: Node = Element::new("div")
            .child(
                Element::new("pre").child(Element::new("code").text("fn main() {\n    run();\n}")),
            )
            .into();
        assert_eq!(
            serialize(&[node]),
            "<div>\n  <pre><code>fn main() {\n    run();\n}</code></pre>\n</div>"
        );
    }

    #[test]
    fn void_elements_self_close() {
        let node: Node = Element::new("img")
            .attr("src", "a.png")
            .attr("alt", "")
            .into();
        assert_eq!(serialize(&[node]), r#"<img src="a.png" alt="" />"#);
    }
}
