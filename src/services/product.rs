use std::sync::Arc;

use async_trait::async_trait;

use super::{decode_rows, inserted_row, report};
use crate::error::Result;
use crate::models::{
    NewProduct, NewProductRow, Product, ProductInventoryRow, ProductRow, ProductWithInventory,
    Table, UpdateProduct,
};
use crate::notify::{ErrorMessages, Notifier};
use crate::remote::{EqFilter, TableApi};
use crate::store::CollectionSource;

const FETCH_ALL: ErrorMessages = ErrorMessages::new(
    "Erro ao carregar produtos",
    "Ocorreu um erro ao carregar os produtos: ",
);
const FETCH_ONE: ErrorMessages = ErrorMessages::new(
    "Erro ao carregar produto",
    "Ocorreu um erro ao carregar o produto: ",
);
const CREATE: ErrorMessages = ErrorMessages::new(
    "Erro ao criar produto",
    "Ocorreu um erro ao criar o produto: ",
);
const UPDATE: ErrorMessages = ErrorMessages::new(
    "Erro ao atualizar produto",
    "Ocorreu um erro ao atualizar o produto: ",
);

/// Reads and writes the `products` table and its stock levels
#[derive(Clone)]
pub struct ProductService {
    tables: Arc<dyn TableApi>,
    notifier: Arc<dyn Notifier>,
}

impl ProductService {
    pub fn new(tables: Arc<dyn TableApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { tables, notifier }
    }

    /// Every product without stock levels
    pub async fn fetch_all(&self) -> Option<Vec<Product>> {
        report(self.notifier.as_ref(), &FETCH_ALL, self.try_fetch_all().await)
    }

    pub async fn try_fetch_all(&self) -> Result<Vec<Product>> {
        let rows = self
            .tables
            .select(ProductRow::table_name(), ProductRow::columns(), &[])
            .await?;
        Ok(decode_rows::<ProductRow>(rows)?
            .into_iter()
            .map(Product::from)
            .collect())
    }

    /// Every product joined with its stock level
    pub async fn fetch_all_with_inventory(&self) -> Option<Vec<ProductWithInventory>> {
        report(
            self.notifier.as_ref(),
            &FETCH_ALL,
            self.try_fetch_all_with_inventory().await,
        )
    }

    pub async fn try_fetch_all_with_inventory(&self) -> Result<Vec<ProductWithInventory>> {
        let rows = self
            .tables
            .select(ProductRow::table_name(), ProductInventoryRow::COLUMNS, &[])
            .await?;
        Ok(decode_rows::<ProductInventoryRow>(rows)?
            .into_iter()
            .map(ProductWithInventory::from)
            .collect())
    }

    pub async fn fetch_by_id(&self, id: i64) -> Option<Product> {
        report(self.notifier.as_ref(), &FETCH_ONE, self.try_fetch_by_id(id).await)
    }

    pub async fn try_fetch_by_id(&self, id: i64) -> Result<Product> {
        let row = self
            .tables
            .select_single(
                ProductRow::table_name(),
                ProductRow::columns(),
                &[EqFilter::new(ProductRow::primary_key(), id)],
            )
            .await?;
        Ok(serde_json::from_value::<ProductRow>(row)?.into())
    }

    /// Inserts a product and returns it with its assigned id
    pub async fn create(&self, product: &NewProduct) -> Option<Product> {
        report(self.notifier.as_ref(), &CREATE, self.try_create(product).await)
    }

    pub async fn try_create(&self, product: &NewProduct) -> Result<Product> {
        let row = serde_json::to_value(NewProductRow::from(product))?;
        let response = self.tables.insert(ProductRow::table_name(), row).await?;
        Ok(serde_json::from_value::<ProductRow>(inserted_row(response)?)?.into())
    }

    /// Overwrites every field of the product with the same id.
    ///
    /// Returns the product as written. Succeeds even when no row matched.
    pub async fn update(&self, product: &UpdateProduct) -> Option<Product> {
        report(self.notifier.as_ref(), &UPDATE, self.try_update(product).await)
    }

    pub async fn try_update(&self, product: &UpdateProduct) -> Result<Product> {
        let row = serde_json::to_value(ProductRow::from(product))?;
        self.tables
            .update(
                ProductRow::table_name(),
                row,
                &[EqFilter::new(ProductRow::primary_key(), product.id)],
            )
            .await?;
        Ok(product.clone())
    }
}

#[async_trait]
impl CollectionSource<ProductWithInventory> for ProductService {
    async fn load(&self) -> Option<Vec<ProductWithInventory>> {
        self.fetch_all_with_inventory().await
    }
}
