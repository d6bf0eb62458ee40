//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub use cli::{
    CliArgs, Command, ComposeArgs, LoggingOverrides, RenderArgs, RenderOverrides,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "newsletter-render";
const ENV_PREFIX: &str = "NEWSLETTER_RENDER";
const DEFAULT_MAX_WIDTH_PX: u32 = 600;
const MIN_MAX_WIDTH_PX: u32 = 320;
const MAX_MAX_WIDTH_PX: u32 = 1200;
const DEFAULT_FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
const DEFAULT_LINE_HEIGHT: &str = "1.6";
const DEFAULT_TEXT_COLOR: &str = "#333333";
const DEFAULT_EMBED_HEIGHT: u32 = 400;
const MAX_EMBED_HEIGHT: u32 = 4000;
const DEFAULT_STORE_DIR: &str = "resources";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub render: RenderSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub max_width_px: u32,
    pub font_family: String,
    pub line_height: String,
    pub text_color: String,
    pub embed_height: u32,
    pub sanitize_rich_text: bool,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub directory: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_cli(cli);

    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    render: RawRenderSettings,
    store: RawStoreSettings,
}

impl RawSettings {
    fn apply_cli(&mut self, cli: &CliArgs) {
        self.apply_logging_overrides(&cli.logging);
        match &cli.command {
            Command::Render(args) => self.apply_render_overrides(&args.overrides),
            Command::Compose(args) => {
                self.apply_render_overrides(&args.overrides);
                if let Some(directory) = args.store_dir.as_ref() {
                    self.store.directory = Some(directory.clone());
                }
            }
        }
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_render_overrides(&mut self, overrides: &RenderOverrides) {
        if let Some(width) = overrides.max_width_px {
            self.render.max_width_px = Some(width);
        }
        if let Some(fonts) = overrides.font_family.as_ref() {
            self.render.font_family = Some(fonts.clone());
        }
        if let Some(height) = overrides.embed_height {
            self.render.embed_height = Some(height);
        }
        if let Some(sanitize) = overrides.sanitize_rich_text {
            self.render.sanitize_rich_text = Some(sanitize);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            render,
            store,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let render = build_render_settings(render)?;
        let store = build_store_settings(store)?;

        Ok(Self {
            logging,
            render,
            store,
        })
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_width_px: DEFAULT_MAX_WIDTH_PX,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            line_height: DEFAULT_LINE_HEIGHT.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            embed_height: DEFAULT_EMBED_HEIGHT,
            sanitize_rich_text: false,
        }
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_render_settings(render: RawRenderSettings) -> Result<RenderSettings, LoadError> {
    let max_width_px = render.max_width_px.unwrap_or(DEFAULT_MAX_WIDTH_PX);
    if !(MIN_MAX_WIDTH_PX..=MAX_MAX_WIDTH_PX).contains(&max_width_px) {
        return Err(LoadError::invalid(
            "render.max_width_px",
            format!("must be between {MIN_MAX_WIDTH_PX} and {MAX_MAX_WIDTH_PX}"),
        ));
    }

    let embed_height = render.embed_height.unwrap_or(DEFAULT_EMBED_HEIGHT);
    if embed_height == 0 || embed_height > MAX_EMBED_HEIGHT {
        return Err(LoadError::invalid(
            "render.embed_height",
            format!("must be between 1 and {MAX_EMBED_HEIGHT}"),
        ));
    }

    Ok(RenderSettings {
        max_width_px,
        font_family: css_value(render.font_family, DEFAULT_FONT_FAMILY, "render.font_family")?,
        line_height: css_value(render.line_height, DEFAULT_LINE_HEIGHT, "render.line_height")?,
        text_color: css_value(render.text_color, DEFAULT_TEXT_COLOR, "render.text_color")?,
        embed_height,
        sanitize_rich_text: render.sanitize_rich_text.unwrap_or(false),
    })
}

fn build_store_settings(store: RawStoreSettings) -> Result<StoreSettings, LoadError> {
    let directory = store
        .directory
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));
    if directory.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "store.directory",
            "path must not be empty",
        ));
    }

    Ok(StoreSettings { directory })
}

/// Values are interpolated into inline `style` attributes and must stay a single declaration value.
fn css_value(
    value: Option<String>,
    default: &str,
    key: &'static str,
) -> Result<String, LoadError> {
    let Some(value) = value else {
        return Ok(default.to_string());
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LoadError::invalid(key, "must not be empty"));
    }
    if let Some(ch) = trimmed.chars().find(|ch| matches!(ch, ';' | '{' | '}' | '<' | '>')) {
        return Err(LoadError::invalid(
            key,
            format!("character `{ch}` is not allowed in a style value"),
        ));
    }

    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawRenderSettings {
    max_width_px: Option<u32>,
    font_family: Option<String>,
    line_height: Option<String>,
    text_color: Option<String>,
    embed_height: Option<u32>,
    sanitize_rich_text: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawStoreSettings {
    directory: Option<PathBuf>,
}
