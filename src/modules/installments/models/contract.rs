use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// The slice of a contract record the installment planner needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub client_id: String,
    /// Contract value to be split across installments
    pub total_value: Decimal,
    /// Requested number of installments
    pub installment_count: i64,
    /// Month of the first installment
    pub start_date: NaiveDate,
}

impl Contract {
    pub fn new(
        id: impl Into<String>,
        client_id: impl Into<String>,
        total_value: Decimal,
        installment_count: i64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            total_value,
            installment_count,
            start_date,
        }
    }

    /// Validate the fields the planner relies on
    pub fn validate(&self, max_installments: i64) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::invalid_argument("Contract id cannot be empty"));
        }

        if self.total_value < Decimal::ZERO {
            return Err(AppError::invalid_argument(format!(
                "Contract {} total cannot be negative, got {}",
                self.id, self.total_value
            )));
        }

        if self.installment_count <= 0 || self.installment_count > max_installments {
            return Err(AppError::invalid_argument(format!(
                "Installment count must be between 1 and {}, got {}",
                max_installments, self.installment_count
            )));
        }

        Ok(())
    }
}
