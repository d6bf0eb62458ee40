use serde::Serialize;

use crate::config::RenderSettings;
use crate::domain::resources::Resource;

/// Fixed-width email shell applied around the rendered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailLayout {
    pub max_width_px: u32,
    pub font_family: String,
    pub line_height: String,
    pub text_color: String,
}

impl Default for EmailLayout {
    fn default() -> Self {
        Self {
            max_width_px: 600,
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            line_height: "1.6".to_string(),
            text_color: "#333333".to_string(),
        }
    }
}

/// Knobs for the email renderer. Defaults reproduce the stock newsletter look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub layout: EmailLayout,
    /// Height used for embeds that do not specify one.
    pub embed_height: u32,
    /// Clean editor rich text through the email allowlist before inlining it.
    pub sanitize_rich_text: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: EmailLayout::default(),
            embed_height: 400,
            sanitize_rich_text: false,
        }
    }
}

impl From<&RenderSettings> for RenderOptions {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            layout: EmailLayout {
                max_width_px: settings.max_width_px,
                font_family: settings.font_family.clone(),
                line_height: settings.line_height.clone(),
                text_color: settings.text_color.clone(),
            },
            embed_height: settings.embed_height,
            sanitize_rich_text: settings.sanitize_rich_text,
        }
    }
}

/// Counters gathered while walking the block tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RenderStats {
    pub tabs: u32,
    pub sections: u32,
    pub blocks_rendered: u32,
    pub unsupported_blocks: u32,
    /// Deepest container nesting reached; top-level blocks sit at depth 0.
    pub max_depth: u32,
}

/// Deterministic rendering result returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    /// Complete email-safe HTML, already wrapped in the layout shell.
    pub html: String,
    pub stats: RenderStats,
}

/// Implementations must be pure and deterministic: equal resources yield
/// byte-identical output. Rendering is total and never fails.
pub trait RenderService: Send + Sync {
    fn render(&self, resource: &Resource) -> RenderOutput;
}
