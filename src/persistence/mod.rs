//! Persistence collaborators
//!
//! The engine only sees the `SaveStore` and `WorldDataSource` traits; the
//! JSON-backed implementations live here alongside an in-memory store.

pub mod save_store;
pub mod world_source;

pub use save_store::{
    format_date, format_playtime, parse_playtime, JsonSaveStore, MemorySaveStore, SaveStore,
};
pub use world_source::{JsonWorldSource, WorldDataSource};
