pub mod models;
pub mod services;

pub use models::{Contract, DueDateRule, Installment, InstallmentStatus};
pub use services::{schedule_total, InstallmentCalculator};
