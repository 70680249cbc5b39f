#![cfg(feature = "integration-tests")]

// Runs against a real project. Expects SUPABASE_URL and SUPABASE_ANON_KEY
// (or a .env file) and the `products`, `inventory` and `suppliers` tables.

use std::sync::Arc;

use dotenv::dotenv;
use supabase_inventory::notify::ChannelNotifier;
use supabase_inventory::prelude::*;

fn create_inventory() -> (Inventory, tokio::sync::mpsc::UnboundedReceiver<Notification>) {
    dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let (notifier, rx) = ChannelNotifier::channel();
    let inventory = Inventory::from_env(Arc::new(notifier))
        .expect("SUPABASE_URL and SUPABASE_ANON_KEY must be set for integration tests");
    (inventory, rx)
}

#[tokio::test]
async fn test_refresh_stores() {
    let (inventory, mut rx) = create_inventory();

    let suppliers_ok = inventory.supplier_store().refresh().await;
    let products_ok = inventory.product_store().refresh().await;

    if let Ok(notification) = rx.try_recv() {
        panic!("{}: {}", notification.title, notification.description);
    }
    assert!(suppliers_ok && products_ok);
}

#[tokio::test]
async fn test_supplier_create_update_fetch() {
    let (inventory, mut rx) = create_inventory();
    let suppliers = inventory.suppliers();

    let created = suppliers
        .create(&NewSupplier {
            name: format!("integration-{}", std::process::id()),
            contact_info: None,
        })
        .await;
    let Some(created) = created else {
        panic!("create failed: {:?}", rx.try_recv());
    };

    let changed = Supplier {
        contact_info: Some("integration@example.com".to_string()),
        ..created.clone()
    };
    assert!(suppliers.update(&changed).await.is_some());

    let fetched = suppliers.fetch_by_id(created.id).await;
    assert_eq!(fetched, Some(changed));
}
