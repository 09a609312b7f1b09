//! Cart persistence.
//!
//! [`CartStore`] wraps the pure [`Cart`] mutations and writes the cart back
//! through a [`CartRepository`] after every change, so durable storage is
//! never out of date with what the customer sees. The production repository
//! keeps the cart in the `tower-sessions` session (`PostgreSQL`-backed);
//! [`MemoryCartRepository`] backs tests.

use std::sync::Mutex;

use tower_sessions::Session;

use dala_core::ProductId;

use super::{Cart, CartLine};

/// Fixed session key under which the cart envelope is stored.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Errors from loading or saving a cart.
#[derive(Debug, thiserror::Error)]
pub enum CartStoreError {
    /// The session backend failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Durable storage for one session's cart.
pub trait CartRepository {
    /// Load the cart, or an empty one if none has been stored yet.
    fn load(&self) -> impl Future<Output = Result<Cart, CartStoreError>> + Send;

    /// Persist the cart.
    fn save(&self, cart: &Cart) -> impl Future<Output = Result<(), CartStoreError>> + Send;
}

/// Session-backed repository: the cart lives under [`CART_STORAGE_KEY`] in
/// the visitor's session.
#[derive(Debug, Clone)]
pub struct SessionCartRepository {
    session: Session,
}

impl SessionCartRepository {
    /// Wrap a request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl CartRepository for SessionCartRepository {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        Ok(self
            .session
            .get::<Cart>(CART_STORAGE_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        self.session.insert(CART_STORAGE_KEY, cart).await?;
        Ok(())
    }
}

/// In-memory repository for tests and tooling.
#[derive(Debug, Default)]
pub struct MemoryCartRepository {
    cart: Mutex<Cart>,
}

impl MemoryCartRepository {
    /// A repository pre-seeded with a cart.
    #[must_use]
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart: Mutex::new(cart),
        }
    }

    /// The currently stored cart.
    #[must_use]
    pub fn stored(&self) -> Cart {
        self.cart
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl CartRepository for MemoryCartRepository {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        Ok(self.stored())
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        *self
            .cart
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = cart.clone();
        Ok(())
    }
}

impl<R: CartRepository + Sync> CartRepository for &R {
    async fn load(&self) -> Result<Cart, CartStoreError> {
        R::load(self).await
    }

    async fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        R::save(self, cart).await
    }
}

/// A session's cart together with its durable storage.
///
/// Every mutating operation applies the pure [`Cart`] change and then saves,
/// so the repository always holds the latest state.
#[derive(Debug)]
pub struct CartStore<R: CartRepository> {
    repo: R,
    cart: Cart,
}

impl<R: CartRepository> CartStore<R> {
    /// Load the cart from the repository (empty on first access).
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub async fn open(repo: R) -> Result<Self, CartStoreError> {
        let cart = repo.load().await?;
        Ok(Self { repo, cart })
    }

    /// Add a line (merging by product ID) and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be saved.
    pub async fn add(&mut self, line: CartLine) -> Result<(), CartStoreError> {
        self.cart.add(line);
        self.repo.save(&self.cart).await
    }

    /// Remove a line and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be saved.
    pub async fn remove(&mut self, id: &ProductId) -> Result<(), CartStoreError> {
        self.cart.remove(id);
        self.repo.save(&self.cart).await
    }

    /// Increment a line's quantity and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be saved.
    pub async fn increment(&mut self, id: &ProductId) -> Result<(), CartStoreError> {
        self.cart.increment(id);
        self.repo.save(&self.cart).await
    }

    /// Decrement a line's quantity (floored at 1) and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be saved.
    pub async fn decrement(&mut self, id: &ProductId) -> Result<(), CartStoreError> {
        self.cart.decrement(id);
        self.repo.save(&self.cart).await
    }

    /// Empty the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart cannot be saved.
    pub async fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();
        self.repo.save(&self.cart).await
    }

    /// The current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}
