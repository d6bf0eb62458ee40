use std::{
    fs,
    io::{self, Write as _},
    path::Path,
    process::ExitCode,
    sync::Arc,
};

use newsletter_render::{
    application::{
        error::AppError,
        newsletter::NewsletterComposer,
        render::{RenderOptions, RenderService, configure_render_service, render_service},
    },
    config::{self, ComposeArgs, RenderArgs},
    domain::resources::RawResource,
    infra::{error::InfraError, store::FileResourceStore, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report_application_error(&error);
            ExitCode::from(error.exit_code())
        }
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    let log = || {
        error!(
            source = report.source,
            chain = ?report.messages,
            "{error}"
        );
    };

    if dispatcher::has_been_set() {
        log();
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, log);
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;
    configure_render_service(RenderOptions::from(&settings.render))?;

    match cli_args.command {
        config::Command::Render(args) => run_render(args),
        config::Command::Compose(args) => run_compose(args, settings),
    }
}

fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let json = fs::read_to_string(&args.file).map_err(InfraError::from)?;
    let resource = RawResource::from_json(&json)?.normalize();
    let service = render_service();

    let (html, stats) = if args.body_only {
        service.render_body(&resource)
    } else {
        let output = service.render(&resource);
        (output.html, output.stats)
    };

    info!(
        target = "newsletter_render::render",
        file = %args.file.display(),
        tabs = stats.tabs,
        blocks = stats.blocks_rendered,
        unsupported = stats.unsupported_blocks,
        "resource rendered"
    );

    write_output(args.output.as_deref(), &html)
}

fn run_compose(args: ComposeArgs, settings: config::Settings) -> Result<(), AppError> {
    let store = FileResourceStore::new(settings.store.directory);
    let renderer: Arc<dyn RenderService> = render_service();
    let composer = NewsletterComposer::new(Arc::new(store), renderer);

    let draft = composer.compose(&args.resource_id)?;
    let json = serde_json::to_string_pretty(&draft)
        .map_err(|err| AppError::unexpected(format!("failed to encode draft: {err}")))?;

    write_output(args.output.as_deref(), &json)
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), AppError> {
    match path {
        Some(path) => fs::write(path, contents).map_err(InfraError::from)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .map_err(InfraError::from)?;
        }
    }
    Ok(())
}
