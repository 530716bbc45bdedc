//! Repository interfaces for persistence, plus an in-memory implementation
//! used by tests and the `memory` storage backend.

pub mod batch;
pub mod category;
pub mod memory;
pub mod product;
pub mod sales;

pub use batch::BatchRepository;
pub use category::CategoryRepository;
pub use memory::InMemoryStore;
pub use product::ProductRepository;
pub use sales::SalesRepository;
