//! Domain Layer
//!
//! Entities, the persisted record shape and domain errors.
//! This layer has no I/O.

mod error;
mod item;
mod record;

pub use error::{DomainError, DomainResult};
pub use item::{format_price, same_market, Item, ItemId, MarketPrice, MeasureUnit, Priority};
pub use record::{item_from_document, order_key, Document, ItemPatch, ItemRecord};
