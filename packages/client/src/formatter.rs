//! Output formatting utilities for the terminal client.

use tsunagi_core::domain::{ConnectionRecord, ConnectionSnapshot};
use tsunagi_shared::time::timestamp_to_rfc3339;

/// Formatter for records and notifications shown in the terminal
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a full connection record block
    pub fn format_record(record: &ConnectionRecord) -> String {
        let mut output = String::new();
        output.push_str("\n============================================================\n");
        output.push_str(&format!("Connection: {}\n", record.id.as_str()));
        output.push_str(&format!(
            "User:       {} <{}>\n",
            record.identity.user_name, record.identity.user_email
        ));
        output.push_str(&format!("Status:     {}\n", record.status));
        output.push_str(&format!("Room:       {}\n", record.room_id.as_str()));
        output.push_str(&format!("Share URL:  {}\n", record.connection_url));
        output.push_str(&format!(
            "Created:    {}\n",
            timestamp_to_rfc3339(record.created_at.value())
        ));
        output.push_str(&format!(
            "Last seen:  {}\n",
            timestamp_to_rfc3339(record.last_activity.value())
        ));
        output.push_str("============================================================\n");
        output
    }

    /// Format a broadcast notification
    pub fn format_notification(snapshot: &ConnectionSnapshot) -> String {
        match snapshot {
            Some(record) => format!(
                "\n* connection {} is now {}\n",
                record.id.as_str(),
                record.status
            ),
            None => "\n* no active connection\n".to_string(),
        }
    }

    /// Format the per-user connection list
    pub fn format_connection_list(records: &[ConnectionRecord]) -> String {
        let mut output = String::new();
        output.push_str("\nConnections (newest first):\n");
        if records.is_empty() {
            output.push_str("(no connections)\n");
        } else {
            for record in records {
                output.push_str(&format!(
                    "{} [{}] - created at {}\n",
                    record.id.as_str(),
                    record.status,
                    timestamp_to_rfc3339(record.created_at.value())
                ));
            }
        }
        output
    }

    /// Format the shareable link block
    pub fn format_links(connection_url: &str, chat_link: &str) -> String {
        format!("\nDashboard: {}\nChat room: {}\n", connection_url, chat_link)
    }

    /// Format the command help
    pub fn format_help() -> String {
        "\nCommands:\n\
         /status       show the current active connection\n\
         /connections  list your connections, newest first\n\
         /link         print the shareable links for this room\n\
         /touch        refresh the last-activity timestamp\n\
         /close        close the connection and end the session\n\
         /quit         same as /close\n\
         /help         show this list\n"
            .to_string()
    }
}
