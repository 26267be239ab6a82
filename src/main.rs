//! # Mesto Main Entry Point
//!
//! Line-oriented client for the Mesto photo-sharing service.

use anyhow::Result;
use std::io::IsTerminal;

use mesto::cmd_args::CommandLineArgs;
use mesto::config::ServiceProfile;
use mesto::repl::{
    AppController, FileStore, HttpAuthClient, HttpContentClient, ReplController,
    SimpleEventBus, StdinLineSource, TextRenderer,
};
use tracing_subscriber::{filter::Directive, fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();
    init_tracing_subscriber(cmd_args.verbose());

    // Load profile from INI file by name specified in --profile argument
    // (default to "default"). A missing profile means the public servers.
    let profile_name = cmd_args.profile();
    let mut profile = ServiceProfile::load_named(profile_name)?;
    if let Some(storage) = cmd_args.storage() {
        profile.storage = storage.clone();
    }
    tracing::debug!("Profile '{}': {:?}", profile_name, profile);

    run_repl(profile).await
}

/// Wire the HTTP clients and token file into the REPL and run it on stdin
async fn run_repl(profile: ServiceProfile) -> Result<()> {
    let auth = HttpAuthClient::new(profile.auth_url.as_str())?;
    let content = HttpContentClient::new(profile.api_url.as_str(), profile.api_token.clone())?;
    let store = FileStore::new(profile.storage.clone());

    let mut app = AppController::new(auth, content, store);
    app.set_event_bus(Box::new(SimpleEventBus::with_tracing()));

    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let renderer = TextRenderer::new(stdout, color);

    let mut controller = ReplController::new(app, StdinLineSource::new(), renderer);
    controller.run().await
}

fn init_tracing_subscriber(verbose: bool) {
    let env_var = format!("{}_LOG_LEVEL", env!("CARGO_PKG_NAME").to_uppercase());
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(&env_var).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let filter = ["reqwest", "hyper", "hyper_util", "rustls", "tokio"]
        .iter()
        .filter_map(|target| format!("{target}=warn").parse::<Directive>().ok())
        .fold(filter, |filter, directive| filter.add_directive(directive));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init();
}
