//! Input forms and validation
//!
//! Forms hold the user's raw text. Validation never clears it: a rejected
//! value stays in the form next to its error so it can be corrected.

use crate::domain::{format_price, Item, ItemPatch, ItemRecord, MeasureUnit, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Quantity,
    MarketName,
    Price,
    CurrentMarket,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.field, self.message)
    }
}

pub const NAME_REQUIRED: &str = "Item name is required.";
pub const QUANTITY_INVALID: &str = "Quantity must be a positive number.";
pub const MARKET_REQUIRED: &str = "Market is required.";
pub const PRICE_INVALID: &str = "Price must be a number greater than zero.";
pub const CURRENT_PRICE_INVALID: &str =
    "Price must be zero or positive (zero when the item is not found).";

/// Positive finite decimal
pub fn parse_quantity(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Finite decimal, `> 0`, or `>= 0` when `allow_zero`
pub fn parse_price(raw: &str, allow_zero: bool) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (*v > 0.0 || (allow_zero && *v == 0.0)))
}

/// Trimmed subcategory, `None` when blank
fn normalize_subcategory(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn find_error(errors: &[FieldError], field: Field) -> Option<&str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

// ========================
// Planning mode forms
// ========================

/// The add-item form
#[derive(Debug, Clone, PartialEq)]
pub struct NewItemForm {
    pub name: String,
    pub priority: Priority,
    pub quantity: String,
    pub unit: MeasureUnit,
    pub subcategory: String,
    pub errors: Vec<FieldError>,
}

impl Default for NewItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            priority: Priority::Medium,
            quantity: "1".to_string(),
            unit: MeasureUnit::Unit,
            subcategory: String::new(),
            errors: Vec::new(),
        }
    }
}

impl NewItemForm {
    /// Record to create, or `None` with `errors` filled in
    pub fn validate(&mut self) -> Option<ItemRecord> {
        self.errors.clear();

        let name = self.name.trim();
        if name.is_empty() {
            self.errors.push(FieldError::new(Field::Name, NAME_REQUIRED));
        }
        let quantity = parse_quantity(&self.quantity);
        if quantity.is_none() {
            self.errors.push(FieldError::new(Field::Quantity, QUANTITY_INVALID));
        }

        match (self.errors.is_empty(), quantity) {
            (true, Some(quantity)) => Some(ItemRecord::new(
                name.to_string(),
                self.priority,
                quantity,
                self.unit,
                normalize_subcategory(&self.subcategory),
            )),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        find_error(&self.errors, field)
    }
}

/// Inline edit of an existing item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEditForm {
    pub name: String,
    pub priority: Priority,
    pub quantity: String,
    pub unit: MeasureUnit,
    pub subcategory: String,
    pub errors: Vec<FieldError>,
}

impl ItemEditForm {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            priority: item.priority,
            quantity: item.quantity.to_string(),
            unit: item.unit,
            subcategory: item.subcategory.clone(),
            errors: Vec::new(),
        }
    }

    /// Patch writing every editable field, or `None` with `errors` filled in
    pub fn validate(&mut self) -> Option<ItemPatch> {
        self.errors.clear();

        let name = self.name.trim();
        if name.is_empty() {
            self.errors.push(FieldError::new(Field::Name, NAME_REQUIRED));
        }
        let quantity = parse_quantity(&self.quantity);
        if quantity.is_none() {
            self.errors.push(FieldError::new(Field::Quantity, QUANTITY_INVALID));
        }
        if !self.errors.is_empty() {
            return None;
        }

        Some(ItemPatch {
            name: Some(name.to_string()),
            priority: Some(self.priority),
            quantity,
            unit: Some(self.unit),
            subcategory: Some(normalize_subcategory(&self.subcategory)),
            ..Default::default()
        })
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        find_error(&self.errors, field)
    }
}

/// The general "add a price" form on a planning card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceForm {
    pub market_name: String,
    pub price: String,
    pub errors: Vec<FieldError>,
}

impl PriceForm {
    /// Trimmed market name and a price `> 0`
    pub fn validate(&mut self) -> Option<(String, f64)> {
        self.errors.clear();

        let market_name = self.market_name.trim();
        if market_name.is_empty() {
            self.errors.push(FieldError::new(Field::MarketName, MARKET_REQUIRED));
        }
        let price = parse_price(&self.price, false);
        if price.is_none() {
            self.errors.push(FieldError::new(Field::Price, PRICE_INVALID));
        }

        match (self.errors.is_empty(), price) {
            (true, Some(price)) => Some((market_name.to_string(), price)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        find_error(&self.errors, field)
    }
}

// ========================
// Market mode fields
// ========================

/// Amount to buy, entered on a market card
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseQuantityField {
    pub raw: String,
    pub error: Option<FieldError>,
}

impl PurchaseQuantityField {
    pub fn from_item(item: &Item) -> Self {
        Self {
            raw: item.quantity.to_string(),
            error: None,
        }
    }

    pub fn validate(&mut self) -> Option<f64> {
        let quantity = parse_quantity(&self.raw);
        self.error = match quantity {
            Some(_) => None,
            None => Some(FieldError::new(Field::Quantity, QUANTITY_INVALID)),
        };
        quantity
    }
}

/// Price at the current market, edited inline. Zero is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPriceField {
    pub raw: String,
    pub error: Option<FieldError>,
}

impl CurrentPriceField {
    /// Prefilled with the recorded price (two decimals), empty if none
    pub fn for_market(item: &Item, market_name: &str) -> Self {
        Self {
            raw: item
                .price_at(market_name)
                .map(|entry| format_price(entry.price))
                .unwrap_or_default(),
            error: None,
        }
    }

    pub fn validate(&mut self) -> Option<f64> {
        let price = parse_price(&self.raw, true);
        self.error = match price {
            Some(_) => None,
            None => Some(FieldError::new(Field::Price, CURRENT_PRICE_INVALID)),
        };
        price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemId, MarketPrice};

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2.5"), Some(2.5));
        assert_eq!(parse_quantity(" 3 "), Some(3.0));
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("-1"), None);
        assert_eq!(parse_quantity("abc"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("inf"), None);
        assert_eq!(parse_quantity("NaN"), None);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("0", false), None);
        assert_eq!(parse_price("0", true), Some(0.0));
        assert_eq!(parse_price("-0.01", true), None);
        assert_eq!(parse_price("4.99", false), Some(4.99));
    }

    #[test]
    fn test_new_item_form_defaults() {
        let form = NewItemForm::default();
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.quantity, "1");
        assert_eq!(form.unit, MeasureUnit::Unit);
    }

    #[test]
    fn test_new_item_form_trims() {
        let mut form = NewItemForm {
            name: "  Rice ".to_string(),
            subcategory: "  ".to_string(),
            ..Default::default()
        };
        let record = form.validate().unwrap();
        assert_eq!(record.name, "Rice");
        assert_eq!(record.subcategory, None);
        assert_eq!(record.quantity, 1.0);
        assert!(record.markets.is_empty());
        assert!(!record.is_in_cart);
    }

    #[test]
    fn test_new_item_form_reports_every_error() {
        let mut form = NewItemForm {
            name: "   ".to_string(),
            quantity: "zero".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_none());
        assert_eq!(form.error(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(form.error(Field::Quantity), Some(QUANTITY_INVALID));
        // Raw input kept for correction
        assert_eq!(form.quantity, "zero");
    }

    #[test]
    fn test_edit_form_round_trip() {
        let mut item = Item::new(ItemId::new("1"), "Cheese", Priority::Low);
        item.quantity = 0.5;
        item.subcategory = "Dairy".to_string();

        let mut form = ItemEditForm::from_item(&item);
        assert_eq!(form.quantity, "0.5");

        form.subcategory = " ".to_string();
        let patch = form.validate().unwrap();
        assert_eq!(patch.subcategory, Some(None));
        assert_eq!(patch.quantity, Some(0.5));
        assert!(patch.markets.is_none());
        assert!(patch.is_in_cart.is_none());
    }

    #[test]
    fn test_price_form_requires_positive_price() {
        let mut form = PriceForm {
            market_name: "Corner".to_string(),
            price: "0".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_none());
        assert_eq!(form.error(Field::Price), Some(PRICE_INVALID));
        assert!(form.error(Field::MarketName).is_none());
    }

    #[test]
    fn test_price_form_requires_market() {
        let mut form = PriceForm {
            market_name: " ".to_string(),
            price: "2".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_none());
        assert_eq!(form.error(Field::MarketName), Some(MARKET_REQUIRED));
    }

    #[test]
    fn test_current_price_field_prefill() {
        let mut item = Item::new(ItemId::new("1"), "Tea", Priority::High);
        item.markets.push(MarketPrice::new("Corner", 3.5));

        assert_eq!(CurrentPriceField::for_market(&item, "CORNER").raw, "3.50");
        assert_eq!(CurrentPriceField::for_market(&item, "Elsewhere").raw, "");
    }

    #[test]
    fn test_current_price_field_allows_zero() {
        let mut field = CurrentPriceField {
            raw: "0".to_string(),
            error: None,
        };
        assert_eq!(field.validate(), Some(0.0));
        assert!(field.error.is_none());

        field.raw = String::new();
        assert_eq!(field.validate(), None);
        assert!(field.error.is_some());
    }

    #[test]
    fn test_purchase_quantity_field() {
        let item = Item::new(ItemId::new("1"), "Tea", Priority::High);
        let mut field = PurchaseQuantityField::from_item(&item);
        assert_eq!(field.raw, "1");

        field.raw = "-2".to_string();
        assert_eq!(field.validate(), None);
        assert_eq!(field.raw, "-2");
        assert!(field.error.is_some());
    }
}
