//! `campuschat serve`: start the HTTP chat endpoint.

use campuschat_config::AppConfig;

pub async fn run(
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(host) = host_override {
        config.gateway.host = host;
    }
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    // Fail here, before printing the banner, when no key is configured
    config.require_api_key()?;

    println!("CampusChat");
    println!("   Listening: {}", config.gateway.addr());
    println!("   Model:     {}", config.gemini.model);
    println!("   Endpoints: POST /chat, POST /api/chat, GET /health");

    campuschat_gateway::start(config).await?;

    Ok(())
}
