//! MySQL implementations of the core repository traits.
//!
//! Every statement goes through [`crate::Database`] with `@name`
//! parameters. Multi-statement writes (batch receipt, sale) run inside one
//! transaction that is rolled back on any error.

mod batch;
mod category;
mod product;
mod row;
mod sales;

#[cfg(test)]
mod tests;

pub use batch::MySqlBatchRepository;
pub use category::MySqlCategoryRepository;
pub use product::MySqlProductRepository;
pub use sales::MySqlSalesRepository;
