use graph_paths::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let defaults = ServerConfig::default();
    let port = if args.len() > 1 {
        args[1].parse().unwrap_or(defaults.port)
    } else {
        defaults.port
    };

    let config = ServerConfig {
        port,
        ..defaults
    };

    println!("Starting graph paths web server...");
    println!("Configuration:");
    println!("   Port: {}", config.port);
    println!("   Static files: {}", config.static_dir);
    println!("   CORS enabled: {}", config.enable_cors);
    println!("   Max sessions: {}", config.max_sessions);
    println!();

    start_server_with_config(config).await?;

    Ok(())
}
