use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// One scheduled partial payment of a contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub contract_id: String,
    /// Sequential number (1, 2, 3...)
    pub installment_number: u32,
    /// Amount rounded to the cent
    pub amount: Decimal,
    /// Payment due date, always a business day when produced by the planner
    pub due_date: NaiveDate,
    pub status: InstallmentStatus,
}

/// Installment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Not yet paid
    Pending,
    /// Payment received
    Paid,
    /// Due date passed without payment
    Overdue,
}

/// How installment due dates are placed within each month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueDateRule {
    /// Last Monday-Friday day of the month
    #[serde(rename = "last_business_day")]
    LastBusinessDayOfMonth,
    /// Same day of month as the start date, pulled back off weekends unless
    /// that would leave the month, in which case pushed forward to Monday
    #[serde(rename = "same_day")]
    SameDayOfMonth,
}

impl DueDateRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastBusinessDayOfMonth => "last_business_day",
            Self::SameDayOfMonth => "same_day",
        }
    }
}

impl std::fmt::Display for DueDateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DueDateRule {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last_business_day" => Ok(Self::LastBusinessDayOfMonth),
            "same_day" => Ok(Self::SameDayOfMonth),
            _ => Err(format!("Invalid due date rule: {}", s)),
        }
    }
}

impl Installment {
    pub fn new(
        contract_id: String,
        installment_number: u32,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Self> {
        if installment_number == 0 {
            return Err(AppError::invalid_argument(
                "Installment number must start at 1",
            ));
        }

        if amount < Decimal::ZERO {
            return Err(AppError::invalid_argument(format!(
                "Installment {} amount cannot be negative",
                installment_number
            )));
        }

        Ok(Self {
            contract_id,
            installment_number,
            amount,
            due_date,
            status: InstallmentStatus::Pending,
        })
    }
}
