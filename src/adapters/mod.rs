// Adapters layer: concrete implementations for external systems (filesystem, CSV text).

pub mod csv_codec;
pub mod storage;

pub use storage::LocalStorage;
