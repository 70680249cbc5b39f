//! Entities and their storage rows
//!
//! Entities are what the application works with; rows mirror the table
//! columns. Each direction has one `From` conversion.

mod product;
mod supplier;

pub use product::*;
pub use supplier::*;

/// A table an entity row is stored in
pub trait Table {
    /// The name of this table
    fn table_name() -> &'static str;

    /// Primary-key column
    fn primary_key() -> &'static str;

    /// Default projection, in the order the columns are selected
    fn columns() -> &'static str;
}
