//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod dashboard;

// Re-export commonly used types
pub use auth_response::LoginResult;
pub use dashboard::{
    BatchStatus, BatchStock, BatchSummary, DashboardOverview, InventoryTotals, RevenuePoint,
    SaleLedgerEntry, SalesTotals,
};
