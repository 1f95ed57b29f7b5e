//! Cart total for the current market

use crate::domain::Item;

/// Sum of `price * quantity` over in-cart items priced at `market_name`.
///
/// Items without a price for the market are skipped, as are non-positive
/// quantities.
pub fn cart_total(items: &[Item], market_name: &str) -> f64 {
    items
        .iter()
        .filter(|item| item.is_in_cart && item.quantity > 0.0)
        .filter_map(|item| {
            item.price_at(market_name)
                .filter(|entry| entry.price >= 0.0)
                .map(|entry| entry.price * item.quantity)
        })
        .sum()
}
