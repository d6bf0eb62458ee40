//! Fixed colour tables for variant-keyed blocks.

use crate::domain::types::{AlertVariant, ButtonVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AlertColors {
    pub(crate) background: &'static str,
    pub(crate) border: &'static str,
    pub(crate) text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ButtonColors {
    pub(crate) background: &'static str,
    pub(crate) text: &'static str,
    pub(crate) border: &'static str,
}

pub(crate) fn alert_colors(variant: AlertVariant) -> AlertColors {
    match variant {
        AlertVariant::Info => AlertColors {
            background: "#eff6ff",
            border: "#3b82f6",
            text: "#1e40af",
        },
        AlertVariant::Warning => AlertColors {
            background: "#fffbeb",
            border: "#f59e0b",
            text: "#92400e",
        },
        AlertVariant::Error => AlertColors {
            background: "#fef2f2",
            border: "#ef4444",
            text: "#991b1b",
        },
        AlertVariant::Success => AlertColors {
            background: "#f0fdf4",
            border: "#22c55e",
            text: "#166534",
        },
    }
}

pub(crate) fn button_colors(variant: ButtonVariant) -> ButtonColors {
    match variant {
        ButtonVariant::Primary => ButtonColors {
            background: "#3b82f6",
            text: "#ffffff",
            border: "#3b82f6",
        },
        ButtonVariant::Secondary => ButtonColors {
            background: "#6b7280",
            text: "#ffffff",
            border: "#6b7280",
        },
        ButtonVariant::Outline => ButtonColors {
            background: "transparent",
            text: "#3b82f6",
            border: "#3b82f6",
        },
    }
}
