//! Closed enumerations carried by block payloads.
//!
//! Every enum here is lenient on input: an absent or unrecognised value resolves
//! to the `#[default]` variant (declared last, as `#[serde(other)]` requires) so a
//! typo in the editor never discards a whole block.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    Warning,
    Error,
    Success,
    #[default]
    #[serde(other)]
    Info,
}

impl AlertVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertVariant::Info => "info",
            AlertVariant::Warning => "warning",
            AlertVariant::Error => "error",
            AlertVariant::Success => "success",
        }
    }
}

/// Callouts share the alert palette but are authored with their own ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutVariant {
    Warning,
    Success,
    Error,
    #[default]
    #[serde(other)]
    Info,
}

impl From<CalloutVariant> for AlertVariant {
    fn from(variant: CalloutVariant) -> Self {
        match variant {
            CalloutVariant::Info => AlertVariant::Info,
            CalloutVariant::Warning => AlertVariant::Warning,
            CalloutVariant::Success => AlertVariant::Success,
            CalloutVariant::Error => AlertVariant::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    Secondary,
    Outline,
    #[default]
    #[serde(other)]
    Primary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    Dashed,
    Dotted,
    Thick,
    #[default]
    #[serde(other)]
    Solid,
}

impl DividerStyle {
    /// CSS `border-style` keyword for the rule.
    pub fn border_style(self) -> &'static str {
        match self {
            DividerStyle::Solid | DividerStyle::Thick => "solid",
            DividerStyle::Dashed => "dashed",
            DividerStyle::Dotted => "dotted",
        }
    }

    pub fn thickness_px(self) -> u32 {
        match self {
            DividerStyle::Thick => 3,
            _ => 1,
        }
    }
}

/// Display mode of a top-level resource tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabMode {
    Direct,
    Sectioned,
}

impl TabMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "direct" => Some(TabMode::Direct),
            "sectioned" => Some(TabMode::Sectioned),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabMode::Direct => "direct",
            TabMode::Sectioned => "sectioned",
        }
    }
}
