//! Content block tree authored by the resource editor.
//!
//! Blocks are decoded one at a time: a block with an unknown tag or a payload
//! that does not fit its tag becomes [`ContentBlock::Unsupported`] and decoding
//! carries on with its siblings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::types::{AlertVariant, ButtonVariant, CalloutVariant, DividerStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(TextBlock),
    Image(ImageBlock),
    Video(VideoBlock),
    File(FileBlock),
    Table(TableBlock),
    Divider(DividerBlock),
    Code(CodeBlock),
    Quote(QuoteBlock),
    Button(ButtonBlock),
    Alert(AlertBlock),
    Checklist(ChecklistBlock),
    Embed(EmbedBlock),
    Quiz(QuizBlock),
    Tabs(TabsBlock),
    Columns(ColumnsBlock),
    Grid(GridBlock),
    Accordion(AccordionBlock),
    Callout(CalloutBlock),
    Toggle(ToggleBlock),
    Unsupported(UnsupportedBlock),
}

impl ContentBlock {
    /// Tag name as written by the editor.
    pub fn kind(&self) -> &str {
        match self {
            ContentBlock::Text(_) => "text",
            ContentBlock::Image(_) => "image",
            ContentBlock::Video(_) => "video",
            ContentBlock::File(_) => "file",
            ContentBlock::Table(_) => "table",
            ContentBlock::Divider(_) => "divider",
            ContentBlock::Code(_) => "code",
            ContentBlock::Quote(_) => "quote",
            ContentBlock::Button(_) => "button",
            ContentBlock::Alert(_) => "alert",
            ContentBlock::Checklist(_) => "checklist",
            ContentBlock::Embed(_) => "embed",
            ContentBlock::Quiz(_) => "quiz",
            ContentBlock::Tabs(_) => "tabs",
            ContentBlock::Columns(_) => "columns",
            ContentBlock::Grid(_) => "grid",
            ContentBlock::Accordion(_) => "accordion",
            ContentBlock::Callout(_) => "callout",
            ContentBlock::Toggle(_) => "toggle",
            ContentBlock::Unsupported(block) => block.block_type.as_deref().unwrap_or("unknown"),
        }
    }

    /// Decode a single block from editor JSON, degrading instead of failing.
    pub fn from_value(value: Value) -> Self {
        let block_type = value
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_owned);

        match serde_json::from_value::<TaggedBlock>(value) {
            Ok(tagged) => tagged.into(),
            Err(err) => {
                debug!(
                    target = "domain::blocks",
                    block_type = block_type.as_deref().unwrap_or("<missing>"),
                    error = %err,
                    "block decoded as unsupported"
                );
                ContentBlock::Unsupported(UnsupportedBlock {
                    block_type,
                    reason: err.to_string(),
                })
            }
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(ContentBlock::from_value(value))
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedBlock {
    Text(TextBlock),
    Image(ImageBlock),
    Video(VideoBlock),
    File(FileBlock),
    Table(TableBlock),
    Divider(DividerBlock),
    Code(CodeBlock),
    Quote(QuoteBlock),
    Button(ButtonBlock),
    Alert(AlertBlock),
    Checklist(ChecklistBlock),
    Embed(EmbedBlock),
    Quiz(QuizBlock),
    Tabs(TabsBlock),
    Columns(ColumnsBlock),
    Grid(GridBlock),
    Accordion(AccordionBlock),
    Callout(CalloutBlock),
    Toggle(ToggleBlock),
}

impl From<TaggedBlock> for ContentBlock {
    fn from(tagged: TaggedBlock) -> Self {
        match tagged {
            TaggedBlock::Text(block) => ContentBlock::Text(block),
            TaggedBlock::Image(block) => ContentBlock::Image(block),
            TaggedBlock::Video(block) => ContentBlock::Video(block),
            TaggedBlock::File(block) => ContentBlock::File(block),
            TaggedBlock::Table(block) => ContentBlock::Table(block),
            TaggedBlock::Divider(block) => ContentBlock::Divider(block),
            TaggedBlock::Code(block) => ContentBlock::Code(block),
            TaggedBlock::Quote(block) => ContentBlock::Quote(block),
            TaggedBlock::Button(block) => ContentBlock::Button(block),
            TaggedBlock::Alert(block) => ContentBlock::Alert(block),
            TaggedBlock::Checklist(block) => ContentBlock::Checklist(block),
            TaggedBlock::Embed(block) => ContentBlock::Embed(block),
            TaggedBlock::Quiz(block) => ContentBlock::Quiz(block),
            TaggedBlock::Tabs(block) => ContentBlock::Tabs(block),
            TaggedBlock::Columns(block) => ContentBlock::Columns(block),
            TaggedBlock::Grid(block) => ContentBlock::Grid(block),
            TaggedBlock::Accordion(block) => ContentBlock::Accordion(block),
            TaggedBlock::Callout(block) => ContentBlock::Callout(block),
            TaggedBlock::Toggle(block) => ContentBlock::Toggle(block),
        }
    }
}

/// Text is either markdown or pre-rendered rich text; rich text wins when both are set.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    pub rich_text: Option<String>,
}

pub enum TextBody<'a> {
    Markdown(&'a str),
    RichText(&'a str),
}

impl TextBlock {
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            rich_text: None,
        }
    }

    pub fn body(&self) -> TextBody<'_> {
        match non_empty(&self.rich_text) {
            Some(html) => TextBody::RichText(html),
            None => TextBody::Markdown(self.content.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub alt: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoBlock {
    pub platform: Option<String>,
    pub embed_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub title: Option<String>,
}

impl VideoBlock {
    pub fn is_youtube(&self) -> bool {
        self.platform
            .as_deref()
            .is_some_and(|platform| platform.trim().eq_ignore_ascii_case("youtube"))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub headers: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub rows: Vec<Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_header: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub style: DividerStyle,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    pub author: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub variant: ButtonVariant,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub variant: AlertVariant,
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistBlock {
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistItem {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbedBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub height: Option<u32>,
    pub title: Option<String>,
}

/// Questions are carried opaquely; only their count is ever rendered.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub questions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabsBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub tabs: Vec<TabPanel>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TabPanel {
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub blocks: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnsBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub columns: Vec<BlockGroup>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub cells: Vec<BlockGroup>,
}

/// A column or grid cell: an untitled run of blocks.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub blocks: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<AccordionItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccordionItem {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub blocks: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalloutBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub variant: CalloutVariant,
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub blocks: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToggleBlock {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub blocks: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedBlock {
    /// The `type` tag as written, when there was one.
    pub block_type: Option<String>,
    pub reason: String,
}

/// Accept an explicit `null` wherever a field may be omitted.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat blank optional strings as absent.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|text| !text.trim().is_empty())
}
