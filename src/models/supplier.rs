use serde::{Deserialize, Serialize};

use super::Table;

/// A supplier as the application sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_info: Option<String>,
}

/// Data for a supplier that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    pub contact_info: Option<String>,
}

/// Updates replace every field
pub type UpdateSupplier = Supplier;

/// `suppliers` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRow {
    pub supplier_id: i64,
    pub name: String,
    pub contact_info: Option<String>,
}

/// `suppliers` row for insertion; the key is assigned by the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplierRow {
    pub name: String,
    pub contact_info: Option<String>,
}

impl Table for SupplierRow {
    fn table_name() -> &'static str {
        "suppliers"
    }

    fn primary_key() -> &'static str {
        "supplier_id"
    }

    fn columns() -> &'static str {
        "supplier_id, name, contact_info"
    }
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Self {
            id: row.supplier_id,
            name: row.name,
            contact_info: row.contact_info,
        }
    }
}

impl From<&Supplier> for SupplierRow {
    fn from(supplier: &Supplier) -> Self {
        Self {
            supplier_id: supplier.id,
            name: supplier.name.clone(),
            contact_info: supplier.contact_info.clone(),
        }
    }
}

impl From<&NewSupplier> for NewSupplierRow {
    fn from(supplier: &NewSupplier) -> Self {
        Self {
            name: supplier.name.clone(),
            contact_info: supplier.contact_info.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_round_trip() {
        let supplier = Supplier {
            id: 9,
            name: "Acme".to_string(),
            contact_info: Some("+55 11 5555-0100".to_string()),
        };
        assert_eq!(Supplier::from(SupplierRow::from(&supplier)), supplier);
    }

    #[test]
    fn row_uses_column_names() {
        let row: SupplierRow =
            serde_json::from_value(json!({ "supplier_id": 1, "name": "Acme", "contact_info": null }))
                .unwrap();
        assert_eq!(
            Supplier::from(row),
            Supplier { id: 1, name: "Acme".to_string(), contact_info: None }
        );
    }

    #[test]
    fn insert_row_has_no_key_and_keeps_nulls() {
        let new = NewSupplier { name: "Acme".to_string(), contact_info: None };
        let value = serde_json::to_value(NewSupplierRow::from(&new)).unwrap();
        assert_eq!(value, json!({ "name": "Acme", "contact_info": null }));
    }

    #[test]
    fn entity_serializes_camel_case() {
        let supplier = Supplier { id: 1, name: "Acme".to_string(), contact_info: None };
        assert_eq!(
            serde_json::to_value(&supplier).unwrap(),
            json!({ "id": 1, "name": "Acme", "contactInfo": null })
        );
    }
}
