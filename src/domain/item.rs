//! Item Entity
//!
//! A shopping-list entry with its recorded per-market prices.

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the store on creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Item priority. Sorts High first.
///
/// The Portuguese aliases are spellings written by earlier versions of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    #[serde(alias = "Alta")]
    High,
    #[default]
    #[serde(alias = "Média", alias = "Media")]
    Medium,
    #[serde(alias = "Baixa")]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank: High=1, Medium=2, Low=3
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Unit the quantity and the recorded prices refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasureUnit {
    #[default]
    #[serde(alias = "unidade")]
    Unit,
    #[serde(alias = "grama")]
    Gram,
    #[serde(alias = "quilo")]
    Kilogram,
}

impl MeasureUnit {
    pub const ALL: [MeasureUnit; 3] = [MeasureUnit::Unit, MeasureUnit::Gram, MeasureUnit::Kilogram];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureUnit::Unit => "unit",
            MeasureUnit::Gram => "gram",
            MeasureUnit::Kilogram => "kilogram",
        }
    }
}

/// Price recorded for one market, per unit of the item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPrice {
    pub market_name: String,
    /// Zero means "checked, not carried"
    pub price: f64,
}

impl MarketPrice {
    pub fn new(market_name: impl Into<String>, price: f64) -> Self {
        Self {
            market_name: market_name.into(),
            price,
        }
    }

    /// Case-insensitive market name comparison
    pub fn is_market(&self, market_name: &str) -> bool {
        same_market(&self.market_name, market_name)
    }
}

pub fn same_market(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Two-decimal rendering used for prices and totals
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

/// A shopping-list item as read back from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub priority: Priority,
    /// Total needed while planning, amount to buy while shopping
    pub quantity: f64,
    pub unit: MeasureUnit,
    /// Empty means no subcategory
    pub subcategory: String,
    pub markets: Vec<MarketPrice>,
    pub is_in_cart: bool,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            quantity: 1.0,
            unit: MeasureUnit::Unit,
            subcategory: String::new(),
            markets: Vec::new(),
            is_in_cart: false,
        }
    }

    pub fn subcategory(&self) -> Option<&str> {
        if self.subcategory.is_empty() {
            None
        } else {
            Some(&self.subcategory)
        }
    }

    /// Price entry for a market, matched case-insensitively
    pub fn price_at(&self, market_name: &str) -> Option<&MarketPrice> {
        self.markets.iter().find(|m| m.is_market(market_name))
    }

    /// Entry with the lowest price; the first one wins ties
    pub fn cheapest_market(&self) -> Option<&MarketPrice> {
        self.markets.iter().fold(None, |best: Option<&MarketPrice>, current| match best {
            Some(prev) if prev.price <= current.price => Some(prev),
            _ => Some(current),
        })
    }

    /// Markets list after recording `price` for `market_name`.
    ///
    /// An existing entry (case-insensitive) is overwritten in place and takes
    /// the new spelling; otherwise the entry is appended.
    pub fn markets_with_price(&self, market_name: &str, price: f64) -> Vec<MarketPrice> {
        let mut markets = self.markets.clone();
        match markets.iter_mut().find(|m| m.is_market(market_name)) {
            Some(existing) => {
                existing.market_name = market_name.to_string();
                existing.price = price;
            }
            None => markets.push(MarketPrice::new(market_name, price)),
        }
        markets
    }

    /// Markets list without the entry named exactly `market_name`
    pub fn markets_without(&self, market_name: &str) -> Vec<MarketPrice> {
        self.markets
            .iter()
            .filter(|m| m.market_name != market_name)
            .cloned()
            .collect()
    }
}
