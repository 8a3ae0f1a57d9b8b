//! Client execution logic with reconnection support.
//!
//! Reconnection is deliberately a caller-side loop around the manager's
//! `connect`: the manager itself never retries.

use std::sync::Arc;
use std::time::Duration;

use tsunagi_core::domain::UserIdentity;
use tsunagi_core::usecase::ChatConnectionManager;

use super::domain::{should_attempt_reconnect, should_exit_immediately};
use super::error::ClientError;
use super::session::run_session;

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the client with reconnection logic
pub async fn run_client(
    manager: Arc<ChatConnectionManager>,
    identity: UserIdentity,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut attempt = 0;

    loop {
        tracing::info!(
            "Opening chat connection for '{}' (attempt {}/{})",
            identity.user_id.as_str(),
            attempt + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_session(manager.clone(), identity.clone()).await {
            Ok(()) => {
                tracing::info!("Session ended normally");
                // The user closed the session; don't reconnect
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}", e);
                    return Err(Box::new(ClientError::Aborted(e.to_string())));
                }

                tracing::warn!("Connection attempt failed: {}", e);
                attempt += 1;

                if !should_attempt_reconnect(&e, attempt, MAX_RECONNECT_ATTEMPTS) {
                    return Err(Box::new(ClientError::RetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    }));
                }

                tracing::info!(
                    "Retrying in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    attempt + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
