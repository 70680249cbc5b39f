//! Supabase Inventory Client Library
//!
//! The data layer of a small inventory application: products, suppliers and
//! stock levels stored in a Supabase project. Services translate between
//! application entities and table rows; stores keep the last fetched
//! collections for display. Failures are reported through a [`Notifier`]
//! and never escape as errors from the service operations.

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod remote;
pub mod services;
pub mod store;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use reqwest::Client;

use crate::config::InventoryConfig;
use crate::error::Result;
use crate::notify::Notifier;
use crate::remote::{PostgrestTables, TableApi};
use crate::services::{ProductService, SupplierService};
use crate::store::{ProductStore, Store, SupplierStore};

/// The main entry point for the inventory client
pub struct Inventory {
    products: ProductService,
    suppliers: SupplierService,
    product_store: ProductStore,
    supplier_store: SupplierStore,
}

impl Inventory {
    /// Create a new inventory client for a Supabase project
    ///
    /// # Arguments
    ///
    /// * `config` - Project URL, key and request options
    /// * `notifier` - Receives a notification for every failed operation
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use supabase_inventory::{config::InventoryConfig, notify::LogNotifier, Inventory};
    ///
    /// # async fn run() -> supabase_inventory::error::Result<()> {
    /// let config = InventoryConfig::new("https://your-project-url.supabase.co", "your-anon-key")?;
    /// let inventory = Inventory::new(config, Arc::new(LogNotifier))?;
    /// inventory.supplier_store().refresh().await;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: InventoryConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let tables = PostgrestTables::new(&config, http_client);
        Ok(Self::with_tables(Arc::new(tables), notifier))
    }

    /// Create a client from `SUPABASE_*` environment variables
    pub fn from_env(notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::new(InventoryConfig::from_env()?, notifier)
    }

    /// Create a client over any table backend
    pub fn with_tables(tables: Arc<dyn TableApi>, notifier: Arc<dyn Notifier>) -> Self {
        let products = ProductService::new(tables.clone(), notifier.clone());
        let suppliers = SupplierService::new(tables, notifier);

        Self {
            product_store: Store::new("products", products.clone()),
            supplier_store: Store::new("suppliers", suppliers.clone()),
            products,
            suppliers,
        }
    }

    pub fn products(&self) -> &ProductService {
        &self.products
    }

    pub fn suppliers(&self) -> &SupplierService {
        &self.suppliers
    }

    /// Products with stock levels, as last fetched
    pub fn product_store(&self) -> &ProductStore {
        &self.product_store
    }

    /// Suppliers, as last fetched
    pub fn supplier_store(&self) -> &SupplierStore {
        &self.supplier_store
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::InventoryConfig;
    pub use crate::error::{Error, RemoteError};
    pub use crate::models::{
        NewProduct, NewSupplier, Product, ProductWithInventory, Supplier, UpdateProduct,
        UpdateSupplier,
    };
    pub use crate::notify::{ChannelNotifier, LogNotifier, Notification, Notifier};
    pub use crate::Inventory;
}
