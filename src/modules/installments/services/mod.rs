mod installment_calculator;

pub use installment_calculator::{schedule_total, InstallmentCalculator};
