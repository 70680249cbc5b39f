//! Entity services
//!
//! Each service issues one remote call per operation. The plain operations
//! (`fetch_all`, `create`, ...) never fail: an error is logged, reported
//! through the [`Notifier`](crate::notify::Notifier) and turned into `None`.
//! The `try_` variants return the error instead and notify nobody.

mod product;
mod supplier;

pub use product::ProductService;
pub use supplier::SupplierService;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::notify::{ErrorMessages, Notifier};

/// Converts a failed operation into a notification and `None`
pub(crate) fn report<T>(
    notifier: &dyn Notifier,
    messages: &ErrorMessages,
    result: Result<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(title = messages.title, error = %err, "inventory operation failed");
            notifier.notify(messages.notification(&err));
            None
        }
    }
}

/// Decodes every row, keeping the order
pub(crate) fn decode_rows<R: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<R>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Error::from))
        .collect()
}

/// The inserted row from an insert response, which may be one object or an
/// array of rows
pub(crate) fn inserted_row(response: Value) -> Result<Value> {
    match response {
        Value::Array(rows) => rows
            .into_iter()
            .next()
            .ok_or_else(|| Error::remote("no row returned after insert")),
        Value::Null => Err(Error::remote("no row returned after insert")),
        row => Ok(row),
    }
}
