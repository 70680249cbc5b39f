//! In-memory entity stores
//!
//! A store holds the last collection fetched for one entity type. Readers
//! either take a [`snapshot`](Store::snapshot) or [`subscribe`](Store::subscribe)
//! to be woken after each successful refresh.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::info;

use crate::models::{ProductWithInventory, Supplier};
use crate::services::{ProductService, SupplierService};

/// Where a store gets its collection from.
///
/// `None` means the load failed and has already been reported.
#[async_trait]
pub trait CollectionSource<T>: Send + Sync {
    async fn load(&self) -> Option<Vec<T>>;
}

/// The latest known collection of `T`
pub struct Store<T, S> {
    name: &'static str,
    source: S,
    items: watch::Sender<Vec<T>>,
}

pub type SupplierStore = Store<Supplier, SupplierService>;
pub type ProductStore = Store<ProductWithInventory, ProductService>;

impl<T, S> Store<T, S>
where
    T: Clone + Send + Sync,
    S: CollectionSource<T>,
{
    /// An empty store named `name` in logs
    pub fn new(name: &'static str, source: S) -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self {
            name,
            source,
            items,
        }
    }

    /// Loads the collection and replaces the held one.
    ///
    /// On failure the previous collection stays. Returns whether it was
    /// replaced. Overlapping refreshes are not serialised; the last to
    /// finish wins.
    pub async fn refresh(&self) -> bool {
        match self.source.load().await {
            Some(items) => {
                info!(store = self.name, len = items.len(), "store refreshed");
                self.items.send_replace(items);
                true
            }
            None => false,
        }
    }

    /// A copy of the current collection
    pub fn snapshot(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// A receiver that sees every replacement of the collection
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.items.subscribe()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}
