use std::sync::Arc;

use async_trait::async_trait;

use super::{decode_rows, inserted_row, report};
use crate::error::Result;
use crate::models::{NewSupplier, NewSupplierRow, Supplier, SupplierRow, Table, UpdateSupplier};
use crate::notify::{ErrorMessages, Notifier};
use crate::remote::{EqFilter, TableApi};
use crate::store::CollectionSource;

const FETCH_ALL: ErrorMessages = ErrorMessages::new(
    "Erro ao carregar fornecedores",
    "Ocorreu um erro ao carregar a lista de fornecedores: ",
);
const FETCH_ONE: ErrorMessages = ErrorMessages::new(
    "Erro ao carregar fornecedor",
    "Ocorreu um erro ao carregar o fornecedor: ",
);
const CREATE: ErrorMessages = ErrorMessages::new(
    "Erro ao criar fornecedor",
    "Ocorreu um erro ao criar o fornecedor: ",
);
const UPDATE: ErrorMessages = ErrorMessages::new(
    "Erro ao atualizar fornecedor",
    "Ocorreu um erro ao atualizar o fornecedor: ",
);

/// Reads and writes the `suppliers` table
#[derive(Clone)]
pub struct SupplierService {
    tables: Arc<dyn TableApi>,
    notifier: Arc<dyn Notifier>,
}

impl SupplierService {
    pub fn new(tables: Arc<dyn TableApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { tables, notifier }
    }

    /// Every supplier, in the order the remote returns them
    pub async fn fetch_all(&self) -> Option<Vec<Supplier>> {
        report(self.notifier.as_ref(), &FETCH_ALL, self.try_fetch_all().await)
    }

    pub async fn try_fetch_all(&self) -> Result<Vec<Supplier>> {
        let rows = self
            .tables
            .select(SupplierRow::table_name(), SupplierRow::columns(), &[])
            .await?;
        Ok(decode_rows::<SupplierRow>(rows)?
            .into_iter()
            .map(Supplier::from)
            .collect())
    }

    /// One supplier; a missing id is reported like any other failure
    pub async fn fetch_by_id(&self, id: i64) -> Option<Supplier> {
        report(self.notifier.as_ref(), &FETCH_ONE, self.try_fetch_by_id(id).await)
    }

    pub async fn try_fetch_by_id(&self, id: i64) -> Result<Supplier> {
        let row = self
            .tables
            .select_single(
                SupplierRow::table_name(),
                SupplierRow::columns(),
                &[EqFilter::new(SupplierRow::primary_key(), id)],
            )
            .await?;
        Ok(serde_json::from_value::<SupplierRow>(row)?.into())
    }

    /// Inserts a supplier and returns it with its assigned id
    pub async fn create(&self, supplier: &NewSupplier) -> Option<Supplier> {
        report(self.notifier.as_ref(), &CREATE, self.try_create(supplier).await)
    }

    pub async fn try_create(&self, supplier: &NewSupplier) -> Result<Supplier> {
        let row = serde_json::to_value(NewSupplierRow::from(supplier))?;
        let response = self.tables.insert(SupplierRow::table_name(), row).await?;
        Ok(serde_json::from_value::<SupplierRow>(inserted_row(response)?)?.into())
    }

    /// Overwrites every field of the supplier with the same id.
    ///
    /// Returns the supplier as written. Succeeds even when no row matched.
    pub async fn update(&self, supplier: &UpdateSupplier) -> Option<Supplier> {
        report(self.notifier.as_ref(), &UPDATE, self.try_update(supplier).await)
    }

    pub async fn try_update(&self, supplier: &UpdateSupplier) -> Result<Supplier> {
        let row = serde_json::to_value(SupplierRow::from(supplier))?;
        self.tables
            .update(
                SupplierRow::table_name(),
                row,
                &[EqFilter::new(SupplierRow::primary_key(), supplier.id)],
            )
            .await?;
        Ok(supplier.clone())
    }
}

#[async_trait]
impl CollectionSource<Supplier> for SupplierService {
    async fn load(&self) -> Option<Vec<Supplier>> {
        self.fetch_all().await
    }
}
