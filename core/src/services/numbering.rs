//! Generated document numbers.
//!
//! Both formats embed the business-calendar timestamp so staff can read the
//! day off a printed invoice, plus a short random suffix.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rand::Rng;

/// `{prefix}{yyMMdd}{HHmmss}{4 random digits}`, e.g. `HD2403151030450042`
pub fn invoice_number(prefix: &str, now: DateTime<Utc>, tz: Tz) -> String {
    let local = now.with_timezone(&tz);
    let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
    format!("{}{}{:04}", prefix, local.format("%y%m%d%H%M%S"), suffix)
}

/// `{prefix}{YYYYMMDD}-{HHMMSS}{3 random digits}`, e.g. `LO20240315-103045123`
pub fn batch_code(prefix: &str, now: DateTime<Utc>, tz: Tz) -> String {
    let local = now.with_timezone(&tz);
    let suffix: u16 = rand::thread_rng().gen_range(0..1_000);
    format!("{}{}{:03}", prefix, local.format("%Y%m%d-%H%M%S"), suffix)
}

/// Serial for the `index`-th unit (1-based) of a batch without IMEIs
pub fn unit_serial(batch_code: &str, index: usize) -> String {
    format!("{}-{:03}", batch_code, index)
}
