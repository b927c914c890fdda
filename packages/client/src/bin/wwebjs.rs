//! Console for a wwebjs-api service.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin wwebjs -- session status -s my-session
//! ```

use std::io;

use clap::Parser;
use wwebjs_client::{
    ClientConfig, WhatsAppClient,
    cli::{Cli, EXIT_ERROR, run},
};
use wwebjs_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_BIN_NAME"),
        if cli.verbose { "debug" } else { "warn" },
    );

    let client = match WhatsAppClient::from_config(ClientConfig::from(cli.api)) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create client: {}", e);
            eprintln!("Error: {e}");
            std::process::exit(EXIT_ERROR);
        }
    };

    let code = run(
        &client,
        &cli.command,
        cli.verbose,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await;
    std::process::exit(code);
}
