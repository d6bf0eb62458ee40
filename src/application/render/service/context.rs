use ammonia::Builder as AmmoniaBuilder;

use crate::application::render::types::{RenderOptions, RenderStats};

use super::markdown::MarkdownConverter;

/// State threaded through one render call.
pub(crate) struct RenderContext<'a> {
    pub(crate) options: &'a RenderOptions,
    pub(crate) markdown: &'a dyn MarkdownConverter,
    pub(crate) sanitizer: &'a AmmoniaBuilder<'static>,
    pub(crate) stats: RenderStats,
    depth: u32,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        options: &'a RenderOptions,
        markdown: &'a dyn MarkdownConverter,
        sanitizer: &'a AmmoniaBuilder<'static>,
    ) -> Self {
        Self {
            options,
            markdown,
            sanitizer,
            stats: RenderStats::default(),
            depth: 0,
        }
    }

    /// Run `render` one container level deeper.
    pub(crate) fn nested<T>(&mut self, render: impl FnOnce(&mut Self) -> T) -> T {
        self.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        let result = render(self);
        self.depth -= 1;
        result
    }

    /// Heading tag for container labels, one level deeper per nesting level.
    pub(crate) fn container_heading(&self) -> &'static str {
        match self.depth {
            0 => "h4",
            1 => "h5",
            _ => "h6",
        }
    }

    pub(crate) fn rich_text(&self, html: &str) -> String {
        if self.options.sanitize_rich_text {
            self.sanitizer.clean(html).to_string()
        } else {
            html.to_string()
        }
    }
}
