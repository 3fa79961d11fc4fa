//! # cartline Main Entry Point
//!
//! Terminal CRUD console for the grocery catalog API.

use anyhow::Result;
use cartline::cmd_args::CommandLineArgs;
use cartline::config::{self, IniProfileStore};
use cartline::console::{
    AppController, HttpTransport, TerminalLineSource, TerminalRenderStream, Transport,
};
use std::sync::Arc;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose())?;

    // Load profile from INI file by name specified in --profile argument.
    // A missing file or section falls back to the built-in defaults.
    let profile_path = config::get_profile_path();
    let store = IniProfileStore::new(&profile_path);
    tracing::debug!(
        "Loading profile '{}' from '{}'",
        cmd_args.profile(),
        store.path().display()
    );
    let profile = store.load(cmd_args.profile())?;
    tracing::debug!("Profile: {:?}", profile);

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(profile.base_url())?);
    let mut app = AppController::with_io_streams(
        &profile,
        &store.path().display().to_string(),
        cmd_args.entity(),
        transport,
        TerminalLineSource::new(),
        TerminalRenderStream::new(),
    )?;

    if cmd_args.print_only() {
        if !app.print_once().await? {
            anyhow::bail!("failed to load {}", cmd_args.entity());
        }
        return Ok(());
    }

    app.run().await
}

fn init_tracing_subscriber(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(config::LOG_FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level))
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("rustls=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}
