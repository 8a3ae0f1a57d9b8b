//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement the client's
//! decisions (retry policy, command parsing) without side effects,
//! making them easy to test.

use tsunagi_core::usecase::ConnectError;

/// REPL commands accepted by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current active connection
    Status,
    /// List all connections for the current user, newest first
    Connections,
    /// Print the shareable links for the session room
    Link,
    /// Refresh the last-activity timestamp
    Touch,
    /// Close the connection and end the session
    Close,
    /// Print the command list
    Help,
    /// Close the connection and exit
    Quit,
    /// An unrecognized slash command
    Unknown(String),
}

/// Parse one line of user input into a command.
///
/// Returns `None` for plain text input (lines not starting with `/`).
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let command = match trimmed {
        "/status" => Command::Status,
        "/connections" => Command::Connections,
        "/link" => Command::Link,
        "/touch" => Command::Touch,
        "/close" => Command::Close,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}

/// Check if the client should exit immediately based on the error type.
///
/// # Arguments
///
/// * `error` - The connect error to check
///
/// # Returns
///
/// `true` if the error requires immediate exit (cancellation, store
/// failure), `false` otherwise
pub fn should_exit_immediately(error: &ConnectError) -> bool {
    matches!(error, ConnectError::Cancelled(_) | ConnectError::Store(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The connect error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ConnectError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsunagi_core::domain::{HandshakeError, StoreError};

    fn handshake_error() -> ConnectError {
        ConnectError::Handshake(HandshakeError::Transport("network error".to_string()))
    }

    #[test]
    fn test_should_exit_immediately_with_cancelled() {
        // テスト項目: Cancelled エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ConnectError::Cancelled("conn_1".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_store_error() {
        // テスト項目: Store エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = ConnectError::Store(StoreError::RecordNotFound("conn_1".to_string()));

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_handshake_error() {
        // テスト項目: ハンドシェイク失敗の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = handshake_error();

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_cancelled() {
        // テスト項目: Cancelled エラーの場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = ConnectError::Cancelled("conn_1".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = handshake_error();

        // when (操作):
        let result = should_attempt_reconnect(&error, 3, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = handshake_error();

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_one_before_limit() {
        // テスト項目: 上限の1回前の再接続試行では再接続すべきと判定される
        // given (前提条件):
        let error = handshake_error();

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_parse_command_recognizes_all_commands() {
        // テスト項目: 全てのスラッシュコマンドが正しく解釈される
        // given (前提条件):
        let cases = [
            ("/status", Command::Status),
            ("/connections", Command::Connections),
            ("/link", Command::Link),
            ("/touch", Command::Touch),
            ("/close", Command::Close),
            ("/help", Command::Help),
            ("/quit", Command::Quit),
            ("/exit", Command::Quit),
        ];

        for (input, expected) in cases {
            // when (操作):
            let result = parse_command(input);

            // then (期待する結果):
            assert_eq!(result, Some(expected), "input: {}", input);
        }
    }

    #[test]
    fn test_parse_command_with_unknown_slash_command() {
        // テスト項目: 未知のスラッシュコマンドは Unknown として返される
        // given (前提条件):
        let input = "/frobnicate";

        // when (操作):
        let result = parse_command(input);

        // then (期待する結果):
        assert_eq!(result, Some(Command::Unknown("/frobnicate".to_string())));
    }

    #[test]
    fn test_parse_command_with_plain_text() {
        // テスト項目: スラッシュで始まらない入力はコマンドではない
        // given (前提条件):
        let input = "hello there";

        // when (操作):
        let result = parse_command(input);

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[test]
    fn test_parse_command_trims_whitespace() {
        // テスト項目: 前後の空白を除いた上でコマンドが解釈される
        // given (前提条件):
        let input = "  /status  ";

        // when (操作):
        let result = parse_command(input);

        // then (期待する結果):
        assert_eq!(result, Some(Command::Status));
    }
}
