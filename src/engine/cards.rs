//! Item view models
//!
//! One item renders differently per mode: planning cards edit the item and its
//! price list, market cards track the cart and the current market's price.

use crate::domain::{Item, MarketPrice};

use super::mode::Mode;

#[derive(Debug, Clone, PartialEq)]
pub enum ItemCard<'a> {
    Planning(PlanningCard<'a>),
    Market(MarketCard<'a>),
}

impl<'a> ItemCard<'a> {
    pub fn new(item: &'a Item, mode: Mode, current_market: Option<&'a str>) -> Self {
        match mode {
            Mode::Planning => ItemCard::Planning(PlanningCard::new(item)),
            Mode::Market => ItemCard::Market(MarketCard::new(item, current_market)),
        }
    }

    pub fn item(&self) -> &'a Item {
        match self {
            ItemCard::Planning(card) => card.item,
            ItemCard::Market(card) => card.item,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanningCard<'a> {
    pub item: &'a Item,
    pub cheapest: Option<&'a MarketPrice>,
}

impl<'a> PlanningCard<'a> {
    pub fn new(item: &'a Item) -> Self {
        Self {
            item,
            cheapest: item.cheapest_market(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketCard<'a> {
    pub item: &'a Item,
    pub current_market: Option<&'a str>,
    /// Price recorded for the current market
    pub current_price: Option<&'a MarketPrice>,
    /// Prices at every other market, for comparison
    pub other_markets: Vec<&'a MarketPrice>,
    /// Only set when the current market gives no price to show instead
    pub cheapest: Option<&'a MarketPrice>,
}

impl<'a> MarketCard<'a> {
    pub fn new(item: &'a Item, current_market: Option<&'a str>) -> Self {
        let current_price = current_market.and_then(|market| item.price_at(market));
        let other_markets = match current_market {
            Some(market) => item.markets.iter().filter(|m| !m.is_market(market)).collect(),
            None => Vec::new(),
        };
        let cheapest = match current_price {
            Some(_) => None,
            None => item.cheapest_market(),
        };
        Self {
            item,
            current_market,
            current_price,
            other_markets,
            cheapest,
        }
    }

    /// No market chosen yet: show the instruction instead of price controls
    pub fn needs_market(&self) -> bool {
        self.current_market.is_none()
    }
}
