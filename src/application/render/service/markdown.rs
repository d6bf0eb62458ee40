use comrak::{markdown_to_html, options::Options};

use super::config::markdown_options;

/// Converts markdown text blocks to HTML.
///
/// Output is inlined verbatim, so implementations own the escaping of any raw
/// HTML embedded in the markdown source.
pub trait MarkdownConverter: Send + Sync {
    fn to_html(&self, markdown: &str) -> String;
}

pub struct ComrakMarkdown {
    options: Options<'static>,
}

impl ComrakMarkdown {
    pub fn new() -> Self {
        Self {
            options: markdown_options(),
        }
    }
}

impl Default for ComrakMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter for ComrakMarkdown {
    fn to_html(&self, markdown: &str) -> String {
        markdown_to_html(markdown, &self.options)
    }
}
