//! Domain entities representing core business objects.

pub mod batch;
pub mod category;
pub mod money;
pub mod product;
pub mod sale;
pub mod token;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use batch::{ImportBatch, NewBatch};
pub use category::{Category, CategoryUpdate, NewCategory};
pub use money::MAX_UNIT_AMOUNT;
pub use product::{Product, ProductStatus};
pub use sale::{NewSale, NewSaleLine, SaleRecord, SalesInvoice, SalesInvoiceDetail};
pub use token::{Claims, JWT_ISSUER};
pub use user::WarehouseUser;
