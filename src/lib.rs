//! Market List
//!
//! Shopping-list manager core. Layered architecture:
//! - domain: Item model, stored records and patches
//! - repository: Item store gateway (SQLite and in-memory)
//! - engine: List view engine (mirror, derived views, validated writes)
//! - config / app: Configuration file and bootstrap

pub mod app;
pub mod config;
pub mod domain;
pub mod engine;
pub mod repository;

pub use app::bootstrap;
pub use config::AppConfig;
pub use domain::{DomainError, DomainResult, Item, ItemId, MarketPrice, MeasureUnit, Priority};
pub use engine::{EngineError, EngineResult, ListEngine, Mode};
pub use repository::{ItemStore, MemoryItemStore, SqliteItemStore};
