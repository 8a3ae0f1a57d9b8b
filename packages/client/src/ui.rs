//! UI utilities for the terminal client.

use std::io::Write;

/// Build the prompt shown before each input line
pub fn prompt(user_id: &str) -> String {
    format!("{}> ", user_id)
}

/// Redisplay the prompt after an asynchronous notification
pub fn redisplay_prompt(user_id: &str) {
    print!("{}", prompt(user_id));
    std::io::stdout().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_user_id() {
        // テスト項目: プロンプトにユーザー ID が含まれる
        // given (前提条件):
        let user_id = "alice";

        // when (操作):
        let result = prompt(user_id);

        // then (期待する結果):
        assert_eq!(result, "alice> ");
    }
}
