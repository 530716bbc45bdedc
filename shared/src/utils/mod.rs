//! Common utility functions

pub mod timezone;
pub mod validation;

pub use timezone::{business_date, business_day_bounds, date_window};
