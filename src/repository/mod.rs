//! Repository Layer
//!
//! The item store gateway and its implementations.

mod db;
mod item_repo;
mod memory_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use db::{open_database, open_in_memory};
pub use item_repo::SqliteItemStore;
pub use memory_repo::MemoryItemStore;
pub use traits::ItemStore;
