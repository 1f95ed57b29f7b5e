//! List View Engine
//!
//! In-memory mirror of the item collection, UI state, derived views and the
//! validated write paths.

mod cards;
mod cart;
mod error;
mod forms;
mod list_engine;
mod mode;
mod view;


pub use cards::{ItemCard, MarketCard, PlanningCard};
pub use cart::cart_total;
pub use error::{EngineError, EngineResult, Notice};
pub use forms::{
    parse_price, parse_quantity, CurrentPriceField, Field, FieldError, ItemEditForm, NewItemForm,
    PriceForm, PurchaseQuantityField,
};
pub use list_engine::{ListEngine, MARKET_NAME_REQUIRED};
pub use mode::Mode;
pub use view::{available_subcategories, compare_names, filter_and_sort, EmptyState};
