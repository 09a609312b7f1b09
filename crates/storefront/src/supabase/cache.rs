//! Cache value types for the catalog client.

use dala_core::{Page, Product};

/// Values stored in the catalog cache.
///
/// Boxed where large to keep the cache entry size uniform.
#[derive(Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Page<Product>),
}
