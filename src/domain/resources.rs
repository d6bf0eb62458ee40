//! Resource documents and their normalisation.
//!
//! The editor stores a loosely-shaped JSON document (`Raw*` types). Rendering
//! only ever sees the normalised types, where every list is present and every
//! tab has a resolved display mode.
//!
//! Above the block level decoding is lenient as well: a tab, section or field
//! with the wrong shape is dropped or defaulted and only a document that is not
//! a JSON object fails to parse.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use super::{blocks::ContentBlock, error::DomainError, types::TabMode};

/// Placeholder title the editor gives a freshly created tab.
pub const DEFAULT_TAB_TITLE: &str = "Main Content";
pub const DEFAULT_CONTENT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub title: String,
    pub description: Option<String>,
    pub content: ResourceContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceContent {
    pub tabs: Vec<ResourceTab>,
    pub version: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTab {
    pub id: Option<String>,
    pub title: String,
    pub layout: TabLayout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabLayout {
    Direct { blocks: Vec<ContentBlock> },
    Sectioned { sections: Vec<ResourceSection> },
}

impl ResourceTab {
    pub fn mode(&self) -> TabMode {
        match self.layout {
            TabLayout::Direct { .. } => TabMode::Direct,
            TabLayout::Sectioned { .. } => TabMode::Sectioned,
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TAB_TITLE
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceSection {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub blocks: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawResource {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub content: Option<RawResourceContent>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawResourceContent {
    #[serde(deserialize_with = "lenient_items")]
    pub tabs: Option<Vec<RawResourceTab>>,
    #[serde(deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(deserialize_with = "lenient_items")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawResourceTab {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    /// `direct` or `sectioned`; anything else is inferred from the payload.
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub mode: Option<String>,
    #[serde(deserialize_with = "lenient_items")]
    pub blocks: Option<Vec<ContentBlock>>,
    #[serde(deserialize_with = "lenient_items")]
    pub sections: Option<Vec<ResourceSection>>,
}

/// Decode a field, falling back to its default when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        debug!(
            target = "domain::resources",
            error = %err,
            "malformed field replaced by its default"
        );
        T::default()
    }))
}

/// Decode a list entry by entry, dropping entries with the wrong shape.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => return Ok(None),
        other => {
            debug!(
                target = "domain::resources",
                found = %other,
                "expected a list, ignoring field"
            );
            return Ok(None);
        }
    };

    let decoded = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                debug!(
                    target = "domain::resources",
                    error = %err,
                    "malformed list entry dropped"
                );
                None
            }
        })
        .collect();
    Ok(Some(decoded))
}

impl RawResource {
    pub fn from_json(input: &str) -> Result<Self, DomainError> {
        serde_json::from_str(input).map_err(|err| DomainError::parse(err.to_string()))
    }

    pub fn normalize(self) -> Resource {
        Resource {
            title: self.title,
            description: self.description,
            content: normalize(self.content),
        }
    }
}

/// Fill every structurally required field so rendering never branches on absence.
pub fn normalize(content: Option<RawResourceContent>) -> ResourceContent {
    let Some(raw) = content else {
        return ResourceContent::empty();
    };

    let tabs = raw
        .tabs
        .unwrap_or_default()
        .into_iter()
        .map(normalize_tab)
        .collect();

    let version = raw
        .version
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT_VERSION.to_string());

    ResourceContent {
        tabs,
        version,
        tags: raw.tags.unwrap_or_default(),
    }
}

fn normalize_tab(raw: RawResourceTab) -> ResourceTab {
    let RawResourceTab {
        id,
        title,
        mode,
        blocks,
        sections,
    } = raw;

    let mode = mode
        .as_deref()
        .and_then(TabMode::parse)
        .unwrap_or(if sections.is_some() {
            TabMode::Sectioned
        } else {
            TabMode::Direct
        });

    let layout = match mode {
        TabMode::Direct => TabLayout::Direct {
            blocks: blocks.unwrap_or_default(),
        },
        TabMode::Sectioned => TabLayout::Sectioned {
            sections: sections.unwrap_or_default(),
        },
    };

    let title = title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TAB_TITLE.to_string());

    ResourceTab { id, title, layout }
}

/// Resource ids are opaque but must stay within `[A-Za-z0-9_-]`.
pub fn validate_resource_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::validation("resource id must not be empty"));
    }
    if let Some(invalid) = id
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '_'))
    {
        return Err(DomainError::validation(format!(
            "resource id contains invalid character `{invalid}`"
        )));
    }
    Ok(())
}

impl ResourceContent {
    pub fn empty() -> Self {
        Self {
            tabs: Vec::new(),
            version: DEFAULT_CONTENT_VERSION.to_string(),
            tags: Vec::new(),
        }
    }

    /// Turn normalised content back into its raw shape; re-normalising is a no-op.
    pub fn into_raw(self) -> RawResourceContent {
        let tabs = self
            .tabs
            .into_iter()
            .map(|tab| {
                let mode = Some(tab.mode().as_str().to_string());
                let (blocks, sections) = match tab.layout {
                    TabLayout::Direct { blocks } => (Some(blocks), None),
                    TabLayout::Sectioned { sections } => (None, Some(sections)),
                };
                RawResourceTab {
                    id: tab.id,
                    title: Some(tab.title),
                    mode,
                    blocks,
                    sections,
                }
            })
            .collect();

        RawResourceContent {
            tabs: Some(tabs),
            version: Some(self.version),
            tags: Some(self.tags),
        }
    }
}
