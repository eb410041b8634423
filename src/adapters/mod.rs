// Adapters layer: concrete implementations of the domain ports.

pub mod notion;
pub mod storage;

pub use notion::NotionClient;
pub use storage::LocalStorage;
