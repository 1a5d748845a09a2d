//! `campuschat ask`: route one message and print the reply.

use campuschat_config::AppConfig;
use campuschat_router::{MessageRouter, Route};

pub async fn run(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let provider = campuschat_providers::build_from_config(&config)?;
    let router = MessageRouter::from_config(&config, provider);

    let routed = router.route(message).await;
    match routed.route {
        Route::Rule(name) => tracing::debug!(rule = name, "Matched static rule"),
        other => tracing::debug!(route = ?other, "Routed"),
    }

    println!("{}", routed.reply);
    Ok(())
}
