//! The shopping cart.
//!
//! [`Cart`] holds the in-session record of what a customer intends to
//! purchase: an insertion-ordered list of lines, at most one per product.
//! All mutation logic is synchronous and free of I/O; persistence is layered
//! on top by [`CartStore`](repository::CartStore) in [`repository`].
//!
//! The serialized form is the stable `{"items": [...]}` envelope stored
//! under the `cart-storage` session key - returning visitors keep their cart
//! across app versions.

pub mod repository;

pub use repository::{CartRepository, CartStore, MemoryCartRepository, SessionCartRepository};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dala_core::ProductId;

/// A single product line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    /// Unit price, snapshotted when the product is first added.
    pub price: Decimal,
    /// Display image URL.
    pub image: String,
    /// Always at least 1.
    pub qty: u32,
}

/// The cart: an insertion-ordered collection of lines keyed by product ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
}

impl Cart {
    /// Add a line to the cart.
    ///
    /// If a line with the same product ID already exists, its quantity is
    /// increased by the incoming quantity and every other field (including
    /// the price snapshot from the first add) is left as stored. Otherwise
    /// the line is appended.
    pub fn add(&mut self, line: CartLine) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == line.id) {
            existing.qty += line.qty;
        } else {
            self.items.push(line);
        }
    }

    /// Remove the line with the given product ID. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|i| i.id != *id);
    }

    /// Increase the quantity of the given line by one. No-op if absent.
    pub fn increment(&mut self, id: &ProductId) {
        if let Some(line) = self.items.iter_mut().find(|i| i.id == *id) {
            line.qty += 1;
        }
    }

    /// Decrease the quantity of the given line by one, floored at 1.
    /// No-op if absent.
    pub fn decrement(&mut self, id: &ProductId) {
        if let Some(line) = self.items.iter_mut().find(|i| i.id == *id) {
            line.qty = line.qty.saturating_sub(1).max(1);
        }
        // The floor above keeps qty at 1, so no line is dropped here today;
        // retained so a zero quantity can never be observed.
        self.items.retain(|i| i.qty > 0);
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * qty` over all lines; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|i| i.price * Decimal::from(i.qty))
            .sum()
    }

    /// Total units across all lines (not the number of distinct lines);
    /// zero for an empty cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn line(id: &str, price: Decimal, qty: u32) -> CartLine {
        CartLine {
            id: ProductId::new(id),
            name: format!("product {id}"),
            price,
            image: format!("https://cdn.example/{id}.jpg"),
            qty,
        }
    }

    #[test]
    fn test_add_appends_new_lines_in_order() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 1));
        cart.add(line("p2", Decimal::from(50), 1));
        cart.add(line("p3", Decimal::from(75), 1));

        let ids: Vec<&str> = cart.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_add_merges_by_id_summing_qty() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 1));
        cart.add(line("p1", Decimal::from(100), 2));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].qty, 3);
        assert_eq!(cart.total(), Decimal::from(300));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_add_keeps_first_price_snapshot() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 1));
        // The product's price changed between adds; the stored snapshot wins.
        cart.add(line("p1", Decimal::from(150), 1));

        assert_eq!(cart.items[0].price, Decimal::from(100));
        assert_eq!(cart.total(), Decimal::from(200));
    }

    #[test]
    fn test_merge_invariant_one_line_per_id() {
        let mut cart = Cart::default();
        for (id, qty) in [("p1", 1), ("p2", 2), ("p1", 3), ("p2", 1), ("p1", 1)] {
            cart.add(line(id, Decimal::from(10), qty));
        }

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].qty, 5); // p1: 1 + 3 + 1
        assert_eq!(cart.items[1].qty, 3); // p2: 2 + 1
    }

    #[test]
    fn test_remove_deletes_line() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 1));
        cart.add(line("p2", Decimal::from(50), 1));
        cart.remove(&ProductId::new("p1"));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].id.as_str(), "p2");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 1));
        cart.remove(&ProductId::new("missing"));

        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_increment() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 1));
        cart.increment(&ProductId::new("p1"));
        cart.increment(&ProductId::new("missing")); // no-op

        assert_eq!(cart.items[0].qty, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 1));
        cart.decrement(&ProductId::new("p1"));

        // Clamped, not removed
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].qty, 1);
    }

    #[test]
    fn test_decrement_reduces_qty() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 3));
        cart.decrement(&ProductId::new("p1"));

        assert_eq!(cart.items[0].qty, 2);
    }

    #[test]
    fn test_qty_never_below_one() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 2));
        for _ in 0..10 {
            cart.decrement(&ProductId::new("p1"));
        }
        cart.increment(&ProductId::new("p1"));
        for _ in 0..10 {
            cart.decrement(&ProductId::new("p1"));
        }

        assert!(cart.items.iter().all(|i| i.qty >= 1));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 2));
        cart.add(line("p2", Decimal::from(50), 1));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::from(0));
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::default();
        assert_eq!(cart.total(), Decimal::from(0));
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_total_and_count_over_mixed_lines() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 2));
        cart.add(line("p2", Decimal::new(495, 1), 3));

        assert_eq!(cart.total(), Decimal::new(3485, 1));
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_serialized_envelope_is_stable() {
        let mut cart = Cart::default();
        cart.add(line("p1", Decimal::from(100), 2));

        let json = serde_json::to_value(&cart).unwrap();
        // Returning sessions depend on this exact envelope shape.
        assert_eq!(
            json,
            serde_json::json!({
                "items": [{
                    "id": "p1",
                    "name": "product p1",
                    "price": "100",
                    "image": "https://cdn.example/p1.jpg",
                    "qty": 2
                }]
            })
        );

        let parsed: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, cart);
    }
}
