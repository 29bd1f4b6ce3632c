use crate::core::money::DEFAULT_CURRENCY_SYMBOL;
use crate::core::{AppError, Result};
use crate::modules::installments::DueDateRule;
use serde::Deserialize;
use std::env;

/// Installment planning settings
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    pub currency_symbol: String,
    pub max_installments: i64,
    pub due_date_rule: DueDateRule,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            max_installments: 360,
            due_date_rule: DueDateRule::LastBusinessDayOfMonth,
        }
    }
}

impl BillingConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(BillingConfig {
            currency_symbol: env::var("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            max_installments: match env::var("MAX_INSTALLMENTS") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| AppError::Configuration("Invalid MAX_INSTALLMENTS".to_string()))?,
                Err(_) => defaults.max_installments,
            },
            due_date_rule: match env::var("DUE_DATE_RULE") {
                Ok(raw) => raw.parse().map_err(AppError::Configuration)?,
                Err(_) => defaults.due_date_rule,
            },
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_installments <= 0 {
            return Err(AppError::Configuration(
                "Max installments must be greater than 0".to_string(),
            ));
        }

        if self.currency_symbol.trim().is_empty() {
            return Err(AppError::Configuration(
                "Currency symbol cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
