//! Line-oriented TCP chat relay.
//!
//! Clients pick a display name, receive the transcript so far and then
//! exchange newline-terminated messages with everyone else in the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! cargo run --bin irori-server -- 2525
//! cargo run --bin irori-server -- 2525 --host 0.0.0.0 --status-addr 127.0.0.1:8990
//! ```

use std::{num::NonZeroUsize, sync::Arc};

use clap::Parser;
use irori_server::{
    config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
    ui::{Server, StatusServer, shutdown_signal},
    usecase::ChatHub,
};
use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "irori-server")]
#[command(about = "Line-oriented TCP chat relay", long_about = None)]
struct Args {
    /// Port number to bind the chat listener to
    #[arg(value_name = "PORT")]
    port: Option<u16>,

    /// Host address to bind the chat listener to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Keep only the most recent N history records
    #[arg(long, value_name = "N")]
    history_limit: Option<NonZeroUsize>,

    /// Serve the read-only status API (e.g. 127.0.0.1:8990)
    #[arg(long, value_name = "ADDR")]
    status_addr: Option<String>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port.unwrap_or(DEFAULT_PORT),
            history_limit: args.history_limit,
            status_addr: args.status_addr,
        }
    }
}

#[tokio::main]
async fn main() {
    // Usage errors exit before anything is bound
    let config = ServerConfig::from(Args::parse());

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    // 1. Create the hub (registry + history)
    let hub = Arc::new(ChatHub::new(config.history_limit));

    // 2. Bind the chat listener
    let server = match Server::bind(&config, hub.clone()).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    };

    // 3. Optional status API
    if let Some(status_addr) = config.status_addr.as_deref() {
        match StatusServer::bind(status_addr, hub).await {
            Ok(status) => {
                tokio::spawn(async move {
                    if let Err(e) = status.run_until(shutdown_signal()).await {
                        tracing::error!("Status API error: {}", e);
                    }
                });
            }
            Err(e) => {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
    }

    // 4. Accept connections until Ctrl+C
    server.run().await;
}
