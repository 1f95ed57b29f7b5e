//! List Engine
//!
//! Owns the in-memory mirror of the item collection plus the UI state (mode,
//! current market, search, subcategory filter).
//!
//! Every write follows the same path: validate locally, write to the store,
//! then reload the whole collection. The mirror is never patched in place, so
//! what the views show is always the last successful reload.

use crate::domain::{DomainResult, Item, ItemId, ItemPatch};
use crate::repository::ItemStore;

use super::cards::ItemCard;
use super::cart;
use super::error::{EngineError, EngineResult, Notice};
use super::forms::{
    CurrentPriceField, Field, FieldError, ItemEditForm, NewItemForm, PriceForm,
    PurchaseQuantityField,
};
use super::mode::Mode;
use super::view::{self, EmptyState};

pub const MARKET_NAME_REQUIRED: &str = "Enter the market name to start shopping.";

pub struct ListEngine<S: ItemStore> {
    store: S,
    items: Vec<Item>,
    mode: Mode,
    current_market: Option<String>,
    search: String,
    subcategory_filter: Option<String>,
    notice: Option<Notice>,
}

impl<S: ItemStore> ListEngine<S> {
    /// Engine with an empty mirror; call `reload` to load the collection
    pub fn new(store: S) -> Self {
        Self {
            store,
            items: Vec::new(),
            mode: Mode::Planning,
            current_market: None,
            search: String::new(),
            subcategory_filter: None,
            notice: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The mirror, in store order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current_market(&self) -> Option<&str> {
        self.current_market.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn subcategory_filter(&self) -> Option<&str> {
        self.subcategory_filter.as_deref()
    }

    /// Notice from the last failed store call, if any
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Dismiss the current notice
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // ========================
    // Mirror
    // ========================

    /// Replace the mirror with the store's current contents
    pub async fn reload(&mut self) -> EngineResult<()> {
        let result = self.store.list_all().await;
        self.items = self.check("load items", result)?;
        log::debug!("Loaded {} items", self.items.len());
        Ok(())
    }

    /// Record a store failure as a notice; the mirror is left untouched
    fn check<T>(&mut self, action: &'static str, result: DomainResult<T>) -> EngineResult<T> {
        result.map_err(|e| {
            log::error!("Failed to {}: {}", action, e);
            self.notice = Some(Notice {
                action,
                message: e.to_string(),
            });
            EngineError::Store(e)
        })
    }

    fn find(&self, id: &ItemId) -> EngineResult<&Item> {
        self.item(id)
            .ok_or_else(|| EngineError::ItemNotFound(id.clone()))
    }

    fn require_mode(&self, required: Mode) -> EngineResult<()> {
        if self.mode == required {
            Ok(())
        } else {
            Err(EngineError::WrongMode { required })
        }
    }

    fn require_market(&self) -> EngineResult<String> {
        self.require_mode(Mode::Market)?;
        self.current_market
            .clone()
            .ok_or(EngineError::MarketNotSelected)
    }

    async fn update_and_reload(
        &mut self,
        action: &'static str,
        id: &ItemId,
        patch: ItemPatch,
    ) -> EngineResult<()> {
        let result = self.store.update(id, &patch).await;
        self.check(action, result)?;
        log::info!("Updated item {} ({})", id, action);
        self.reload().await
    }

    // ========================
    // Mode and filters
    // ========================

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::info!("Switching to {} mode", mode);
            self.mode = mode;
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Select a subcategory; `None` or an empty name shows every item
    pub fn set_subcategory_filter(&mut self, subcategory: Option<&str>) {
        self.subcategory_filter = subcategory
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }

    /// Start shopping at `market_name` (trimmed, must not be blank)
    pub fn set_current_market(&mut self, market_name: &str) -> EngineResult<()> {
        let market_name = market_name.trim();
        if market_name.is_empty() {
            return Err(EngineError::Validation(vec![FieldError::new(
                Field::CurrentMarket,
                MARKET_NAME_REQUIRED,
            )]));
        }
        log::info!("Shopping at {}", market_name);
        self.current_market = Some(market_name.to_string());
        Ok(())
    }

    /// Stop shopping: unset the market and empty the cart in one batch
    pub async fn clear_current_market(&mut self) -> EngineResult<()> {
        self.current_market = None;

        let updates: Vec<(ItemId, ItemPatch)> = self
            .items
            .iter()
            .filter(|item| item.is_in_cart)
            .map(|item| (item.id.clone(), ItemPatch::in_cart(false)))
            .collect();

        let result = self.store.batch_update(&updates).await;
        self.check("clear cart", result)?;
        log::info!("Cleared current market, {} items removed from cart", updates.len());
        self.reload().await
    }

    // ========================
    // Derived views
    // ========================

    /// Mirror filtered by search and subcategory, sorted by priority then name
    pub fn visible_items(&self) -> Vec<&Item> {
        view::filter_and_sort(&self.items, &self.search, self.subcategory_filter.as_deref())
    }

    /// View models for the visible items in the current mode
    pub fn cards(&self) -> Vec<ItemCard<'_>> {
        let market = self.current_market.as_deref();
        self.visible_items()
            .into_iter()
            .map(|item| ItemCard::new(item, self.mode, market))
            .collect()
    }

    /// Running total; only computed in market mode with a market selected
    pub fn cart_total(&self) -> Option<f64> {
        match (self.mode, self.current_market.as_deref()) {
            (Mode::Market, Some(market)) => Some(cart::cart_total(&self.items, market)),
            _ => None,
        }
    }

    pub fn available_subcategories(&self) -> Vec<String> {
        view::available_subcategories(&self.items)
    }

    /// Why nothing is visible, or `None` when items are shown
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible_items().is_empty() {
            return None;
        }
        if !self.search.trim().is_empty() || self.subcategory_filter.is_some() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::EmptyList)
        }
    }

    // ========================
    // Planning mode
    // ========================

    /// Create an item from the form; the form is reset on success
    pub async fn add_item(&mut self, form: &mut NewItemForm) -> EngineResult<ItemId> {
        self.require_mode(Mode::Planning)?;
        let record = form
            .validate()
            .ok_or_else(|| EngineError::Validation(form.errors.clone()))?;

        let result = self.store.create(&record).await;
        let id = self.check("add item", result)?;
        log::info!("Added item {} ({})", id, record.name);
        form.reset();

        self.reload().await?;
        Ok(id)
    }

    /// Save an inline edit of name, priority, quantity, unit and subcategory
    pub async fn edit_item(&mut self, id: &ItemId, form: &mut ItemEditForm) -> EngineResult<()> {
        self.require_mode(Mode::Planning)?;
        let patch = form
            .validate()
            .ok_or_else(|| EngineError::Validation(form.errors.clone()))?;

        self.update_and_reload("update item", id, patch).await
    }

    /// Record a price from the general price form (price must be `> 0`)
    pub async fn add_market_price(&mut self, id: &ItemId, form: &mut PriceForm) -> EngineResult<()> {
        self.require_mode(Mode::Planning)?;
        let (market_name, price) = form
            .validate()
            .ok_or_else(|| EngineError::Validation(form.errors.clone()))?;
        let markets = self.find(id)?.markets_with_price(&market_name, price);

        self.update_and_reload("update market price", id, ItemPatch::markets(markets))
            .await?;
        form.clear();
        Ok(())
    }

    /// Drop the price entry named exactly `market_name`
    pub async fn remove_market_price(&mut self, id: &ItemId, market_name: &str) -> EngineResult<()> {
        self.require_mode(Mode::Planning)?;
        let markets = self.find(id)?.markets_without(market_name);

        self.update_and_reload("remove market price", id, ItemPatch::markets(markets))
            .await
    }

    /// Delete permanently once `confirm` agrees
    pub async fn delete_item<F>(&mut self, id: &ItemId, confirm: F) -> EngineResult<()>
    where
        F: FnOnce(&Item) -> bool,
    {
        self.require_mode(Mode::Planning)?;
        if !confirm(self.find(id)?) {
            return Err(EngineError::Cancelled);
        }

        let result = self.store.delete(id).await;
        self.check("delete item", result)?;
        log::info!("Deleted item {}", id);
        self.reload().await
    }

    // ========================
    // Market mode
    // ========================

    /// Flip cart membership of one item
    pub async fn toggle_in_cart(&mut self, id: &ItemId) -> EngineResult<()> {
        self.require_mode(Mode::Market)?;
        let in_cart = !self.find(id)?.is_in_cart;

        self.update_and_reload("update cart", id, ItemPatch::in_cart(in_cart))
            .await
    }

    /// Overwrite the item quantity with the amount to buy
    pub async fn set_purchase_quantity(
        &mut self,
        id: &ItemId,
        field: &mut PurchaseQuantityField,
    ) -> EngineResult<()> {
        self.require_market()?;
        self.find(id)?;
        let quantity = field.validate().ok_or_else(|| {
            EngineError::Validation(field.error.iter().cloned().collect())
        })?;

        self.update_and_reload("update quantity", id, ItemPatch::quantity(quantity))
            .await
    }

    /// Record the price at the current market (zero allowed)
    pub async fn set_current_market_price(
        &mut self,
        id: &ItemId,
        field: &mut CurrentPriceField,
    ) -> EngineResult<()> {
        let market_name = self.require_market()?;
        let price = field.validate().ok_or_else(|| {
            EngineError::Validation(field.error.iter().cloned().collect())
        })?;
        let markets = self.find(id)?.markets_with_price(&market_name, price);

        self.update_and_reload("update market price", id, ItemPatch::markets(markets))
            .await
    }
}
