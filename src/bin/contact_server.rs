use anyhow::{Context, Result};
use contact_book::config::Config;
use contact_book::logging::init_server_tracing;
use contact_book::server;
use contact_book::store::ContactStore;
use std::path::PathBuf;

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .map(|s| s.as_str())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match flag_value(&args, "--config") {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Config error: {:#}. Using defaults.", e);
            Config::default()
        }),
    };

    if let Some(host) = flag_value(&args, "--host") {
        config.server.host = host.to_string();
    }
    if let Some(port) = flag_value(&args, "--port") {
        config.server.port = port
            .parse()
            .with_context(|| format!("Invalid port '{}'", port))?;
    }
    if args.contains(&"--no-seed".to_string()) {
        config.store.seed_defaults = false;
    }

    init_server_tracing(&config.logging.level);

    let store = ContactStore::from_config(&config.store);
    tracing::info!(
        target: "server",
        "Starting with {} contacts (history depth: {})",
        store.len(),
        config
            .store
            .max_history_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unbounded".to_string())
    );

    server::serve(store, &config.server).await
}
