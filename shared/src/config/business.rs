//! Business rules configuration

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Settings that shape how sales are grouped and reported
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// IANA timezone name used to derive business calendar dates
    pub timezone: String,

    /// Prefix for generated invoice numbers
    pub invoice_prefix: String,

    /// Prefix for generated batch codes
    pub batch_prefix: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            timezone: String::from("Asia/Ho_Chi_Minh"),
            invoice_prefix: String::from("HD"),
            batch_prefix: String::from("LO"),
        }
    }
}

impl BusinessConfig {
    /// Parse the configured timezone
    pub fn tz(&self) -> Result<Tz, String> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| format!("unknown timezone '{}': {}", self.timezone, e))
    }
}
