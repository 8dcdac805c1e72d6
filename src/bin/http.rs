#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use timeline_tool::{ConfiguratorConfig, http_api, logging};

    logging::init_cli_logger(false);

    let addr: SocketAddr = std::env::var("TIMELINE_TOOL_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;
    let config = match std::env::var("TIMELINE_TOOL_CONFIG") {
        Ok(path) => ConfiguratorConfig::load(path)?,
        Err(_) => ConfiguratorConfig::default(),
    };

    println!("timeline-tool HTTP API listening on http://{addr}");
    http_api::serve(addr, config).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
