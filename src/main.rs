use std::{net::SocketAddr, path::Path, path::PathBuf, sync::Mutex};

use anyhow::anyhow;
use clap::Parser;
use contact_sheet::{
    adapters::{
        config::{app_config::AppConfig, sheets_config::SheetBackendKind},
        http::{routes, state::AppState},
    },
    prettyprint::PrettyFormatter,
};
use tracing::{error, info, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Parser)]
#[command(name = "contact-sheet")]
#[command(about = "Edit a Google Sheet contact list and start the calling scenario")]
struct Args {
    /// Configuration file, `Config.*` in the working directory by default
    #[arg(long)]
    config: Option<String>,

    /// Address to bind the server to
    #[arg(long)]
    bind: Option<String>,

    /// Directory containing the editor UI build
    #[arg(long)]
    ui_dir: Option<PathBuf>,

    /// Keep contacts in process memory instead of Google Sheets
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config =
        AppConfig::load(args.config.as_deref()).map_err(|report| anyhow!("{report:?}"))?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(ui_dir) = args.ui_dir {
        config.server.ui_dir = Some(ui_dir);
    }
    if args.in_memory {
        config.sheets.backend = SheetBackendKind::Memory;
    }

    setup_tracing(&config.server.log_file)?;
    setup_panic_hook();

    serve(config).await.inspect_err(|e| error!("server failed: {:?}", e))
}

#[instrument(skip(config))]
async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!(?config, "starting contact-sheet");

    let state = AppState::from_config(&config).map_err(|report| anyhow!("{report:?}"))?;
    let app = routes::app(state, config.server.ui_dir.as_deref());

    let addr: SocketAddr = config.server.bind.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    }
}

fn setup_tracing(log_file: &Path) -> anyhow::Result<()> {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(Mutex::new(std::fs::File::create(log_file)?))
        .with_ansi(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contact_sheet=trace,tower_http=debug"));

    Registry::default()
        .with(filter)
        .with(log_file_layer)
        .with(stdout_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
