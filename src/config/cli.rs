use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the newsletter renderer.
#[derive(Debug, Parser)]
#[command(
    name = "newsletter-render",
    version,
    about = "Render editor resources into email-safe newsletter HTML"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "NEWSLETTER_RENDER_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a resource JSON file to HTML.
    Render(RenderArgs),
    /// Compose a newsletter draft from a stored resource and print it as JSON.
    Compose(ComposeArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Resource JSON document to render.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Emit the document body without the email shell.
    #[arg(long = "body-only", action = clap::ArgAction::SetTrue)]
    pub body_only: bool,

    /// Write the output to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Identifier of the resource in the store.
    #[arg(value_name = "ID")]
    pub resource_id: String,

    /// Override the directory holding `<id>.json` resources.
    #[arg(long = "store-dir", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub store_dir: Option<PathBuf>,

    /// Write the draft to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the maximum width of the email shell in pixels.
    #[arg(long = "render-max-width", value_name = "PX")]
    pub max_width_px: Option<u32>,

    /// Override the base font stack.
    #[arg(long = "render-font-family", value_name = "FONTS")]
    pub font_family: Option<String>,

    /// Override the height of embeds that do not set one.
    #[arg(long = "render-embed-height", value_name = "PX")]
    pub embed_height: Option<u32>,

    /// Clean rich text through the email allowlist before inlining it.
    #[arg(
        long = "render-sanitize-rich-text",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub sanitize_rich_text: Option<bool>,
}
