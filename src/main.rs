// Gateway binary entry point
//
// Reads configuration from the environment, probes the YouTube key when one
// is configured, and serves until ctrl-c.

use promptlist::config::Config;
use promptlist::server;
use promptlist::youtube::SearchClient;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::from_env();
    // Presence only; key material never hits the logs.
    log::info!(
        "YouTube key: {}, Gemini key: {}",
        presence(config.youtube_api_key.is_some()),
        presence(config.gemini_api_key.is_some()),
    );

    if let Some(key) = config.youtube_api_key.clone() {
        let probe = SearchClient::new(
            reqwest::Client::new(),
            key,
            config.youtube_api_base.clone(),
        );
        if probe.validate_key().await {
            log::info!("YouTube API key is valid");
        } else {
            log::warn!("YouTube API key failed validation; search requests will be rejected");
        }
    }

    let server = match server::start_server(config).await {
        Ok(server) => server,
        Err(e) => {
            log::error!("failed to start gateway: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("gateway listening on {}", server.addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", e);
    }
    log::info!("shutting down");
    let _ = server.shutdown_tx.send(());
}

fn presence(configured: bool) -> &'static str {
    if configured { "configured" } else { "missing" }
}
