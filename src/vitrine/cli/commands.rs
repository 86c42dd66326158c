//! # CLI Layer
//!
//! One UI client for vitrine. This is the only place that knows about the
//! terminal: it parses arguments, installs logging, drives the async runtime
//! and turns `CmdResult`s into text.
//!
//! ## Structure
//!
//! - `run()`: Entry point (called by `main.rs`)
//! - `init_context()`: Resolves the config dir, loads config, builds the API
//! - `handle_*()`: Per-command handlers that call the API and print output

use super::kiosk::run_session;
use super::render::{
    render_config, render_detail, render_item_list, render_messages, render_options,
};
use super::setup::{Cli, Commands, FilterArgs};
use clap::Parser;
use directories::ProjectDirs;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitrine::api::{ConfigAction, FilterSelection, KioskApi};
use vitrine::config::VitrineConfig;
use vitrine::error::{Result, VitrineError};
use vitrine::store::fs::FileSource;

const HOME_ENV: &str = "VITRINE_HOME";
const LOG_ENV: &str = "VITRINE_LOG";

struct AppContext {
    api: KioskApi<FileSource>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(dispatch(cli))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "vitrine=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { filters }) => handle_list(&ctx, filters).await,
        Some(Commands::Show { id, filters }) => handle_show(&ctx, &id, filters).await,
        Some(Commands::Options) => handle_options(&ctx).await,
        Some(Commands::Kiosk) => handle_kiosk(&ctx).await,
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, FilterArgs::default()).await,
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("org", "vitrine", "vitrine")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VitrineError::Config("Could not determine config dir".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir()?;
    let config = VitrineConfig::load(&config_dir)?;

    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| config.data_path(&config_dir));
    tracing::debug!(config_dir = %config_dir.display(), data = %data_path.display(), "context ready");

    let api = KioskApi::new(FileSource::new(data_path), &config, config_dir);
    Ok(AppContext { api })
}

async fn handle_list(ctx: &AppContext, filters: FilterArgs) -> Result<()> {
    ctx.api.apply_filters(&FilterSelection::from(filters));
    let result = ctx.api.list().await;
    print!("{}", render_item_list(&result.listed_items));
    print!("{}", render_messages(&result.messages));
    Ok(())
}

async fn handle_show(ctx: &AppContext, id: &str, filters: FilterArgs) -> Result<()> {
    ctx.api.apply_filters(&FilterSelection::from(filters));
    let result = ctx.api.show(id).await?;
    if let Some(detail) = &result.detail {
        print!("{}", render_detail(detail));
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

async fn handle_options(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.options().await;
    if let Some(options) = &result.options {
        print!("{}", render_options(options));
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

async fn handle_kiosk(ctx: &AppContext) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run_session(&ctx.api, stdin.lock(), &mut stdout).await?;
    stdout.flush()?;
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}
