//! Interactive session driving the connection manager.

use std::sync::Arc;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

use tsunagi_core::domain::UserIdentity;
use tsunagi_core::usecase::{ChatConnectionManager, ConnectError, ConnectRequest};

use super::domain::{Command, parse_command};
use super::formatter::MessageFormatter;
use super::ui::{prompt, redisplay_prompt};

/// Run one interactive session: open a connection, then serve REPL commands
/// until the user closes it.
///
/// Connect failures are returned to the caller so the runner can decide
/// whether to retry.
pub async fn run_session(
    manager: Arc<ChatConnectionManager>,
    identity: UserIdentity,
) -> Result<(), ConnectError> {
    let record = manager
        .connect(ConnectRequest::new(identity.clone()))
        .await?;

    print!("{}", MessageFormatter::format_record(&record));
    println!("Type /help for commands. Press Ctrl+C to exit.\n");

    // Subscribe and print every broadcast notification
    let (subscription, mut notifications) = manager.subscribe().await;
    let user_for_watch = identity.user_id.as_str().to_string();
    let watch_task = tokio::spawn(async move {
        // Skip the initial snapshot; it duplicates the connect output above
        let _ = notifications.recv().await;
        while let Some(snapshot) = notifications.recv().await {
            print!("{}", MessageFormatter::format_notification(&snapshot));
            redisplay_prompt(&user_for_watch);
        }
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt_user = identity.user_id.as_str().to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt_text = prompt(&prompt_user);

        loop {
            match rl.readline(&prompt_text) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Serve commands until the user closes the session or input ends
    let connection_id = record.id.clone();
    while let Some(line) = input_rx.recv().await {
        match parse_command(&line) {
            Some(Command::Status) => match manager.active_connection().await {
                Some(active) => print!("{}", MessageFormatter::format_record(&active)),
                None => println!("(no active connection)"),
            },
            Some(Command::Connections) => {
                let records = manager.connections_for_user(&identity.user_id).await;
                print!("{}", MessageFormatter::format_connection_list(&records));
            }
            Some(Command::Link) => {
                let connection_url = manager.connection_url(&record.room_id);
                let chat_link = manager.chat_link(&record.room_id);
                print!(
                    "{}",
                    MessageFormatter::format_links(&connection_url, &chat_link)
                );
            }
            Some(Command::Touch) => {
                if let Err(e) = manager.refresh_activity(&connection_id).await {
                    tracing::warn!("Failed to refresh activity: {}", e);
                }
                println!("activity refreshed");
            }
            Some(Command::Close | Command::Quit) => {
                if let Err(e) = manager.close(&connection_id).await {
                    tracing::warn!("Failed to close connection: {}", e);
                }
                println!("connection closed");
                break;
            }
            Some(Command::Help) => {
                print!("{}", MessageFormatter::format_help());
            }
            Some(Command::Unknown(command)) => {
                println!(
                    "unknown command '{}', type /help for the command list",
                    command
                );
            }
            None => {
                // Plain text counts as activity; message delivery itself is
                // handled by the chat transport, not this client
                if let Err(e) = manager.refresh_activity(&connection_id).await {
                    tracing::warn!("Failed to refresh activity: {}", e);
                }
                println!("(messages are delivered by the chat widget; activity refreshed)");
            }
        }
    }

    // Input ended via Ctrl+C / Ctrl+D without an explicit close
    if manager
        .connection(&connection_id)
        .await
        .is_some_and(|r| !r.is_terminal())
    {
        if let Err(e) = manager.close(&connection_id).await {
            tracing::warn!("Failed to close connection: {}", e);
        }
    }

    watch_task.abort();
    subscription.unsubscribe().await;

    Ok(())
}
