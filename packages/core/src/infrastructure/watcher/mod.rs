//! 変更監視（ブロードキャスト）実装

mod channel;

pub use channel::ChannelWatcherHub;
