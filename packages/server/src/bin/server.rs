//! Room list server for a wwebjs-api service.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin wwebjs-server -- --port 8080 --base-url http://localhost:3000
//! ```

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use wwebjs_client::{ClientConfig, cli::ApiArgs};
use wwebjs_server::ServerConfig;
use wwebjs_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "wwebjs-server", version, about = "WhatsApp room list server")]
struct Args {
    /// Address to bind
    #[arg(long, env = "WWEBJS_SERVER_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to bind
    #[arg(short = 'p', long, env = "WWEBJS_SERVER_PORT", default_value_t = 8080)]
    port: u16,

    #[command(flatten)]
    api: ApiArgs,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig {
        addr: SocketAddr::new(args.host, args.port),
        client: ClientConfig::from(args.api),
    };

    // Run the server
    if let Err(e) = wwebjs_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
