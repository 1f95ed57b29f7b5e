//! Persisted Record Shape
//!
//! Items are stored as JSON documents:
//!
//! ```text
//! { name, priority, quantity, unit, subcategory, markets: [{marketName, price}], isInCart }
//! ```
//!
//! Reads fill in defaults for fields older documents lack. Updates merge only
//! the fields a patch sets, the way a document store does.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{DomainError, DomainResult};
use super::item::{Item, ItemId, MarketPrice, MeasureUnit, Priority};

/// A stored document body (top-level JSON object)
pub type Document = Map<String, Value>;

/// Full record written on creation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub name: String,
    pub priority: Priority,
    pub quantity: f64,
    pub unit: MeasureUnit,
    /// `None` is persisted as `null`
    pub subcategory: Option<String>,
    pub markets: Vec<MarketPrice>,
    pub is_in_cart: bool,
}

impl ItemRecord {
    /// New record with no prices and not in cart
    pub fn new(
        name: String,
        priority: Priority,
        quantity: f64,
        unit: MeasureUnit,
        subcategory: Option<String>,
    ) -> Self {
        Self {
            name,
            priority,
            quantity,
            unit,
            subcategory,
            markets: Vec::new(),
            is_in_cart: false,
        }
    }

    pub fn to_document(&self) -> DomainResult<Document> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(DomainError::Internal(format!("record is not an object: {}", other))),
        }
    }
}

/// Document as read back, with defaults for missing fields
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default = "default_quantity")]
    quantity: f64,
    #[serde(default)]
    unit: MeasureUnit,
    #[serde(default)]
    subcategory: Option<String>,
    #[serde(default)]
    markets: Vec<MarketPrice>,
    #[serde(default)]
    is_in_cart: bool,
}

fn default_quantity() -> f64 {
    1.0
}

/// Build the read model from a stored document.
///
/// A `null` or missing subcategory reads back as `""`.
pub fn item_from_document(id: ItemId, doc: &Document) -> DomainResult<Item> {
    let stored: StoredRecord = serde_json::from_value(Value::Object(doc.clone()))?;
    Ok(Item {
        id,
        name: stored.name,
        priority: stored.priority,
        quantity: stored.quantity,
        unit: stored.unit,
        subcategory: stored.subcategory.unwrap_or_default(),
        markets: stored.markets,
        is_in_cart: stored.is_in_cart,
    })
}

/// Store ordering: priority rank, then name
pub fn order_key(item: &Item) -> (u8, String) {
    (item.priority.rank(), item.name.clone())
}

/// Partial update; only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub priority: Option<Priority>,
    pub quantity: Option<f64>,
    pub unit: Option<MeasureUnit>,
    /// `Some(None)` clears the subcategory (stored as `null`)
    pub subcategory: Option<Option<String>>,
    pub markets: Option<Vec<MarketPrice>>,
    pub is_in_cart: Option<bool>,
}

impl ItemPatch {
    pub fn quantity(quantity: f64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    pub fn markets(markets: Vec<MarketPrice>) -> Self {
        Self {
            markets: Some(markets),
            ..Default::default()
        }
    }

    pub fn in_cart(is_in_cart: bool) -> Self {
        Self {
            is_in_cart: Some(is_in_cart),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The fields this patch sets, keyed by their document names
    pub fn to_fields(&self) -> DomainResult<Document> {
        let mut fields = Document::new();
        if let Some(name) = &self.name {
            fields.insert("name".into(), Value::String(name.clone()));
        }
        if let Some(priority) = &self.priority {
            fields.insert("priority".into(), serde_json::to_value(priority)?);
        }
        if let Some(quantity) = self.quantity {
            fields.insert("quantity".into(), serde_json::to_value(quantity)?);
        }
        if let Some(unit) = &self.unit {
            fields.insert("unit".into(), serde_json::to_value(unit)?);
        }
        if let Some(subcategory) = &self.subcategory {
            fields.insert("subcategory".into(), serde_json::to_value(subcategory)?);
        }
        if let Some(markets) = &self.markets {
            fields.insert("markets".into(), serde_json::to_value(markets)?);
        }
        if let Some(is_in_cart) = self.is_in_cart {
            fields.insert("isInCart".into(), Value::Bool(is_in_cart));
        }
        Ok(fields)
    }

    /// Merge into a stored document, leaving other fields untouched
    pub fn apply_to(&self, doc: &mut Document) -> DomainResult<()> {
        for (key, value) in self.to_fields()? {
            doc.insert(key, value);
        }
        Ok(())
    }
}
