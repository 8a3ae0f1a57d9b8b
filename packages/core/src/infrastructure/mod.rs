//! Infrastructure 層
//!
//! ドメイン層が定義するポート（Store・ハンドシェイク・変更監視）の
//! 具体的な実装と、外部とやり取りする DTO を提供します。

pub mod dto;
pub mod handshake;
pub mod repository;
pub mod watcher;
