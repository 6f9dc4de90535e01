//! Archviz Web Server
//!
//! Serves repository analysis reports over HTTP.

use archviz_web::server::ArchvizServerBuilder;
use archviz_web::{init_logging, WebConfig};
use clap::Parser;

/// Archviz Web Server - repository structure and data model analysis over HTTP
#[derive(Parser)]
#[command(name = "archviz-web")]
#[command(about = "An HTTP interface for Archviz")]
#[command(version)]
struct Args {
    /// Server host to bind to (overrides ARCHVIZ_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on (overrides ARCHVIZ_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Analysis configuration file (overrides ARCHVIZ_CONFIG)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Load environment variables before reading any of them
    dotenvy::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var(
            "RUST_LOG",
            format!(
                "archviz_web={level},archviz_repo={level},tower_http=debug",
                level = args.log_level
            ),
        );
    }
    init_logging();

    let mut config = WebConfig::from_env();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = args.config {
        config.config_path = Some(path);
    }

    println!("Starting Archviz Web Server");
    println!("Server: http://{}:{}", config.host, config.port);
    if let Some(path) = &config.config_path {
        println!("Configuration: {}", path);
    }

    let server = match ArchvizServerBuilder::with_config(config).build() {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}
