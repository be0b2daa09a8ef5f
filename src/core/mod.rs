pub mod engine;
pub mod stores;
pub mod trie;
pub mod types;
