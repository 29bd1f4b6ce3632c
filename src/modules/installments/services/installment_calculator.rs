use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::BillingConfig;
use crate::core::calendar;
use crate::core::money::{self, Money};
use crate::core::{AppError, Result};
use crate::modules::installments::models::{Contract, DueDateRule, Installment};

/// Builds installment schedules for contracts.
///
/// Amounts come from the exact cent split, due dates from the business
/// calendar; the two never influence each other.
#[derive(Debug, Clone)]
pub struct InstallmentCalculator {
    max_installments: i64,
    due_date_rule: DueDateRule,
}

impl Default for InstallmentCalculator {
    fn default() -> Self {
        Self::from_config(&BillingConfig::default())
    }
}

impl InstallmentCalculator {
    pub fn new(max_installments: i64, due_date_rule: DueDateRule) -> Self {
        Self {
            max_installments,
            due_date_rule,
        }
    }

    pub fn from_config(config: &BillingConfig) -> Self {
        Self::new(config.max_installments, config.due_date_rule)
    }

    pub fn due_date_rule(&self) -> DueDateRule {
        self.due_date_rule
    }

    /// Calculate the installment schedule for a contract
    ///
    /// The returned installments sum to the contract total in integer cents,
    /// with any extra cents on the trailing installments.
    ///
    /// # Errors
    /// `InvalidArgument` for a negative total or a count outside
    /// `1..=max_installments`; `InvalidDate` when a due date falls outside
    /// chrono's range.
    pub fn calculate_schedule(&self, contract: &Contract) -> Result<Vec<Installment>> {
        contract.validate(self.max_installments)?;

        info!(
            "Calculating {} installments for contract {} (total: {}, rule: {})",
            contract.installment_count, contract.id, contract.total_value, self.due_date_rule
        );

        let amounts =
            money::divide_into_installments(contract.total_value, contract.installment_count)?;

        let mut schedule = Vec::with_capacity(amounts.len());
        for (i, amount) in amounts.into_iter().enumerate() {
            let offset = u32::try_from(i)
                .map_err(|_| AppError::invalid_argument("Too many installments"))?;
            let due_date = self.due_date_for(contract.start_date, offset)?;

            debug!(
                installment = offset + 1,
                %amount,
                %due_date,
                "Scheduled installment for contract {}",
                contract.id
            );

            schedule.push(Installment::new(
                contract.id.clone(),
                offset + 1,
                amount,
                due_date,
            )?);
        }

        // Verify totals match exactly
        let expected = Money::from(contract.total_value);
        let distributed: Money = schedule.iter().map(|i| Money::from(i.amount)).sum();
        if distributed != expected {
            warn!(
                "Installment amount mismatch: distributed {} vs contract {}",
                distributed, expected
            );
            return Err(AppError::internal(format!(
                "Installment amounts ({}) do not sum to contract total ({})",
                distributed, expected
            )));
        }

        info!(
            "Successfully calculated {} installments for contract {} with exact total match",
            schedule.len(),
            contract.id
        );

        Ok(schedule)
    }

    /// Due date of the installment `offset` months after `start_date`
    pub fn due_date_for(&self, start_date: NaiveDate, offset: u32) -> Result<NaiveDate> {
        let month = start_date.checked_add_months(Months::new(offset)).ok_or_else(|| {
            AppError::invalid_date(format!(
                "{} plus {} months is outside the supported range",
                start_date, offset
            ))
        })?;

        match self.due_date_rule {
            DueDateRule::LastBusinessDayOfMonth => calendar::try_last_business_day_of_month(month),
            DueDateRule::SameDayOfMonth => {
                // A weekend 1st or 2nd stays in its own month
                let adjusted = calendar::business_day_on_or_before(month)?;
                if adjusted.month() == month.month() {
                    Ok(adjusted)
                } else {
                    calendar::business_day_on_or_after(month)
                }
            }
        }
    }
}

/// Sum of a schedule's amounts, computed in cents
pub fn schedule_total(schedule: &[Installment]) -> Decimal {
    schedule
        .iter()
        .map(|i| Money::from(i.amount))
        .sum::<Money>()
        .to_decimal()
}
