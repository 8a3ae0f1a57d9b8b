//! Interactive chat connection client.
//!
//! Opens a customer-support chat connection against a chat backend, or a
//! simulated handshake when no backend is given, and exposes slash commands
//! for inspecting and driving the connection lifecycle.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsunagi-client -- -u u-1001 -n Ann -e ann@example.com
//! cargo run --bin tsunagi-client -- -u u-1001 -n Ann -e ann@example.com \
//!     --api-url http://127.0.0.1:8080 --ws-url ws://127.0.0.1:8080/ws
//! ```

use std::sync::Arc;

use clap::Parser;

use tsunagi_core::domain::{RoomHandshake, UserId, UserIdentity, ValidationError};
use tsunagi_core::infrastructure::handshake::{SimulatedHandshake, WebSocketRoomHandshake};
use tsunagi_core::infrastructure::repository::InMemoryConnectionStore;
use tsunagi_core::infrastructure::watcher::ChannelWatcherHub;
use tsunagi_core::usecase::{ChatConnectionManager, ManagerConfig};
use tsunagi_shared::logger::setup_logger;
use tsunagi_shared::time::SystemClock;

#[derive(Parser, Debug)]
#[command(name = "tsunagi-client")]
#[command(about = "Terminal client for the Tsunagi chat connection manager", long_about = None)]
struct Args {
    /// User ID for the identity snapshot (must be non-empty)
    #[arg(short = 'u', long)]
    user_id: String,

    /// Display name
    #[arg(short = 'n', long)]
    user_name: String,

    /// Contact email
    #[arg(short = 'e', long)]
    user_email: String,

    /// Origin used when deriving shareable links
    #[arg(long, default_value = "https://shop.example.com")]
    origin: String,

    /// Chat backend REST base URL (enables the real handshake together with --ws-url)
    #[arg(long)]
    api_url: Option<String>,

    /// Chat backend WebSocket URL
    #[arg(long)]
    ws_url: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let identity = match build_identity(&args) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::error!("Invalid identity: {}", e);
            std::process::exit(2);
        }
    };

    let handshake: Arc<dyn RoomHandshake> = match (&args.api_url, &args.ws_url) {
        (Some(api_url), Some(ws_url)) => {
            Arc::new(WebSocketRoomHandshake::new(api_url.clone(), ws_url.clone()))
        }
        (None, None) => Arc::new(SimulatedHandshake::new()),
        _ => {
            tracing::error!("--api-url and --ws-url must be given together");
            std::process::exit(2);
        }
    };

    let manager = Arc::new(ChatConnectionManager::new(
        ManagerConfig::new(args.origin.clone()),
        Arc::new(InMemoryConnectionStore::new()),
        Arc::new(ChannelWatcherHub::new()),
        handshake,
        Arc::new(SystemClock),
    ));

    // Run the client
    if let Err(e) = tsunagi_client::run_client(manager, identity).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

fn build_identity(args: &Args) -> Result<UserIdentity, ValidationError> {
    let user_id = UserId::new(args.user_id.clone())?;
    Ok(UserIdentity::new(
        user_id,
        args.user_name.clone(),
        args.user_email.clone(),
    ))
}
