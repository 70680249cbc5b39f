use serde::{Deserialize, Serialize};

use super::Table;

/// A product as the application sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub purchase_price: f64,
    pub sale_price: f64,
}

/// Data for a product that does not exist yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub purchase_price: f64,
    pub sale_price: f64,
}

/// Updates replace every field
pub type UpdateProduct = Product;

/// A product with its stock level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithInventory {
    #[serde(flatten)]
    pub product: Product,
    pub inventory: f64,
}

/// `products` row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub product_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub purchase_price: f64,
    pub sale_price: f64,
}

/// `products` row for insertion; the key is assigned by the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProductRow {
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub purchase_price: f64,
    pub sale_price: f64,
}

/// `products` row joined with `inventory(quantity)`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductInventoryRow {
    #[serde(flatten)]
    pub product: ProductRow,
    #[serde(default)]
    pub inventory: Option<InventoryJoin>,
}

/// The embedded `inventory` resource.
///
/// PostgREST embeds a one-to-many relation as an array and a one-to-one
/// relation as an object (or null).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InventoryJoin {
    Many(Vec<InventoryQuantityRow>),
    One(InventoryQuantityRow),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryQuantityRow {
    pub quantity: Option<f64>,
}

impl ProductInventoryRow {
    /// Select list with the inventory join
    pub const COLUMNS: &'static str =
        "product_id, name, description, unit, purchase_price, sale_price, inventory(quantity)";
}

impl InventoryJoin {
    /// Quantity of the first inventory row
    fn quantity(&self) -> Option<f64> {
        match self {
            InventoryJoin::Many(rows) => rows.first().and_then(|row| row.quantity),
            InventoryJoin::One(row) => row.quantity,
        }
    }
}

impl Table for ProductRow {
    fn table_name() -> &'static str {
        "products"
    }

    fn primary_key() -> &'static str {
        "product_id"
    }

    fn columns() -> &'static str {
        "product_id, name, description, unit, purchase_price, sale_price"
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.product_id,
            name: row.name,
            description: row.description,
            unit: row.unit,
            purchase_price: row.purchase_price,
            sale_price: row.sale_price,
        }
    }
}

/// A product without inventory rows has a stock of zero
impl From<ProductInventoryRow> for ProductWithInventory {
    fn from(row: ProductInventoryRow) -> Self {
        let inventory = row
            .inventory
            .as_ref()
            .and_then(InventoryJoin::quantity)
            .unwrap_or(0.0);
        Self {
            product: Product::from(row.product),
            inventory,
        }
    }
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            unit: product.unit.clone(),
            purchase_price: product.purchase_price,
            sale_price: product.sale_price,
        }
    }
}

impl From<&NewProduct> for NewProductRow {
    fn from(product: &NewProduct) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            unit: product.unit.clone(),
            purchase_price: product.purchase_price,
            sale_price: product.sale_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget_row() -> serde_json::Value {
        json!({
            "product_id": 5,
            "name": "Widget",
            "description": null,
            "unit": "pc",
            "purchase_price": 1.5,
            "sale_price": 3
        })
    }

    #[test]
    fn row_round_trip() {
        let product = Product {
            id: 5,
            name: "Widget".to_string(),
            description: Some("Blue".to_string()),
            unit: None,
            purchase_price: 1.25,
            sale_price: 2.5,
        };
        assert_eq!(Product::from(ProductRow::from(&product)), product);
    }

    #[test]
    fn integer_prices_decode() {
        let row: ProductRow = serde_json::from_value(widget_row()).unwrap();
        let product = Product::from(row);
        assert_eq!(product.sale_price, 3.0);
        assert_eq!(product.unit.as_deref(), Some("pc"));
    }

    #[test]
    fn insert_row_has_no_key() {
        let new = NewProduct {
            name: "Widget".to_string(),
            description: None,
            unit: Some("pc".to_string()),
            purchase_price: 1.5,
            sale_price: 3.0,
        };
        let value = serde_json::to_value(NewProductRow::from(&new)).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Widget",
                "description": null,
                "unit": "pc",
                "purchase_price": 1.5,
                "sale_price": 3.0
            })
        );
        assert!(value.get("product_id").is_none());
    }

    #[test]
    fn inventory_uses_first_joined_row() {
        let mut row = widget_row();
        row["inventory"] = json!([{ "quantity": 12 }, { "quantity": 99 }]);
        let product: ProductWithInventory =
            serde_json::from_value::<ProductInventoryRow>(row).unwrap().into();
        assert_eq!(product.inventory, 12.0);
        assert_eq!(product.product.id, 5);
    }

    #[test]
    fn inventory_accepts_embedded_object() {
        let mut row = widget_row();
        row["inventory"] = json!({ "quantity": 4.5 });
        let product: ProductWithInventory =
            serde_json::from_value::<ProductInventoryRow>(row).unwrap().into();
        assert_eq!(product.inventory, 4.5);
    }

    #[test]
    fn missing_inventory_is_zero() {
        for join in [json!([]), json!(null)] {
            let mut row = widget_row();
            row["inventory"] = join;
            let product: ProductWithInventory =
                serde_json::from_value::<ProductInventoryRow>(row).unwrap().into();
            assert_eq!(product.inventory, 0.0);
        }

        let product: ProductWithInventory =
            serde_json::from_value::<ProductInventoryRow>(widget_row()).unwrap().into();
        assert_eq!(product.inventory, 0.0);
    }

    #[test]
    fn null_quantity_is_zero() {
        for join in [json!([{ "quantity": null }]), json!({ "quantity": null })] {
            let mut row = widget_row();
            row["inventory"] = join;
            let product: ProductWithInventory =
                serde_json::from_value::<ProductInventoryRow>(row).unwrap().into();
            assert_eq!(product.inventory, 0.0);
        }
    }

    #[test]
    fn with_inventory_serializes_flat() {
        let product = ProductWithInventory {
            product: Product {
                id: 1,
                name: "Widget".to_string(),
                description: None,
                unit: None,
                purchase_price: 1.0,
                sale_price: 2.0,
            },
            inventory: 7.0,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["salePrice"], 2.0);
        assert_eq!(value["inventory"], 7.0);
    }
}
