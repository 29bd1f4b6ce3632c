mod contract;
mod installment;

pub use contract::Contract;
pub use installment::{DueDateRule, Installment, InstallmentStatus};
