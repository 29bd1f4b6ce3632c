//! PayTrack payment engine library
//!
//! Exact installment splitting in integer cents and business-day anchors for
//! contract payment due dates.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::core::calendar;
pub use crate::core::money;
pub use crate::core::{AppError, Money, Result};
pub use modules::installments;
