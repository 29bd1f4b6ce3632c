//! Exact monetary arithmetic in integer cents.
//!
//! Every amount crossing into this module is rounded once to the nearest cent
//! (half away from zero) and from then on lives as an `i64` count of minor
//! units. `Decimal` is only the boundary representation, so sums of parts
//! always reconstruct the whole.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

use crate::core::{AppError, Result};

/// Currency symbol used when the caller does not pass one
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// Minor units per major unit
const CENTS_PER_UNIT: i64 = 100;

/// Largest installment count a single split accepts
pub const MAX_SPLIT_COUNT: i64 = 1_000_000;

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// A monetary amount held as a whole number of cents.
///
/// Serializes as a decimal amount (`"33.33"`), never as raw cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds `amount` to the nearest cent.
    pub fn from_decimal(amount: Decimal) -> Self {
        Money(euros_to_cents(amount))
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn to_decimal(self) -> Decimal {
        cents_to_euros(self.0)
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiplies by `factor` and rounds the cent-domain product to the nearest cent.
    pub fn scale(self, factor: Decimal) -> Money {
        let product = Decimal::from(self.0)
            .checked_mul(factor)
            .map(|p| p.round_dp_with_strategy(0, ROUNDING));

        match product {
            Some(p) => Money(p.to_i64().unwrap_or_else(|| saturate(p.is_sign_negative()))),
            None => Money(saturate(self.is_negative() != factor.is_sign_negative())),
        }
    }

    /// Splits this amount into `count` installments whose cents add up exactly.
    ///
    /// Every installment receives `floor(T / count)` cents; the trailing
    /// `T mod count` installments receive one extra cent.
    pub fn split(self, count: i64) -> Result<Vec<Money>> {
        if count <= 0 {
            return Err(AppError::invalid_argument(format!(
                "Installment count must be greater than 0, got {}",
                count
            )));
        }

        if count > MAX_SPLIT_COUNT {
            return Err(AppError::invalid_argument(format!(
                "Installment count cannot exceed {}, got {}",
                MAX_SPLIT_COUNT, count
            )));
        }

        if self.is_negative() {
            return Err(AppError::invalid_argument(format!(
                "Installment total cannot be negative, got {}",
                self
            )));
        }

        let slots = count as usize;
        let base = self.0 / count;
        let remainder = (self.0 % count) as usize;
        let first_larger = slots - remainder;

        Ok((0..slots)
            .map(|i| {
                if i >= first_larger {
                    Money(base + 1)
                } else {
                    Money(base)
                }
            })
            .collect())
    }

    /// True when the amounts differ by at most one cent.
    pub fn approx_eq(self, other: Money) -> bool {
        (i128::from(self.0) - i128::from(other.0)).abs() <= 1
    }

    /// Renders `€ 1.234,50` style output: dot thousands separator, comma
    /// decimal separator, two fraction digits.
    pub fn format(self, currency_symbol: &str) -> String {
        let magnitude = self.0.unsigned_abs();
        let units = (magnitude / CENTS_PER_UNIT as u64).to_string();
        let fraction = magnitude % CENTS_PER_UNIT as u64;

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{} {}{},{:02}", currency_symbol, sign, grouped, fraction)
    }
}

fn saturate(negative: bool) -> i64 {
    if negative {
        i64::MIN
    } else {
        i64::MAX
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::from_decimal(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// Whole cents of `amount`, rounding half away from zero, or `None` when the
/// cent value does not fit in an `i64`.
pub fn try_euros_to_cents(amount: Decimal) -> Option<i64> {
    let rounded = amount.round_dp_with_strategy(2, ROUNDING);
    // round_dp never increases the scale, so scale <= 2 here
    let widen = 10i128.pow(2 - rounded.scale().min(2));

    rounded
        .mantissa()
        .checked_mul(widen)
        .and_then(|cents| i64::try_from(cents).ok())
}

/// Converts a decimal amount to whole cents, rounding half away from zero.
/// Amounts beyond the `i64` cent range saturate.
pub fn euros_to_cents(amount: Decimal) -> i64 {
    try_euros_to_cents(amount).unwrap_or_else(|| saturate(amount.is_sign_negative()))
}

/// Exact inverse of [`euros_to_cents`].
pub fn cents_to_euros(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Rounds to the nearest cent; idempotent.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, ROUNDING);
    rounded.rescale(2);
    rounded
}

pub fn sum_money_values(values: &[Decimal]) -> Decimal {
    values.iter().copied().map(Money::from).sum::<Money>().to_decimal()
}

pub fn subtract_money_values(a: Decimal, b: Decimal) -> Decimal {
    (Money::from(a) - Money::from(b)).to_decimal()
}

pub fn multiply_money_value(value: Decimal, factor: Decimal) -> Decimal {
    Money::from(value).scale(factor).to_decimal()
}

/// Splits `total` into `count` installment amounts that reconcile to the cent.
///
/// # Errors
/// `InvalidArgument` when `count` is outside `1..=MAX_SPLIT_COUNT`, when
/// `total < 0`, or when `total` has no exact `i64` cent value.
pub fn divide_into_installments(total: Decimal, count: i64) -> Result<Vec<Decimal>> {
    if total < Decimal::ZERO {
        return Err(AppError::invalid_argument(format!(
            "Installment total cannot be negative, got {}",
            total
        )));
    }

    let cents = try_euros_to_cents(total).ok_or_else(|| {
        AppError::invalid_argument(format!("Installment total {} is out of range", total))
    })?;

    Ok(Money::from_cents(cents)
        .split(count)?
        .into_iter()
        .map(Money::to_decimal)
        .collect())
}

pub fn are_money_values_equal(a: Decimal, b: Decimal) -> bool {
    Money::from(a).approx_eq(Money::from(b))
}

/// Presentation only; never feed the result back into arithmetic.
pub fn format_money(amount: Decimal, currency_symbol: Option<&str>) -> String {
    Money::from(amount).format(currency_symbol.unwrap_or(DEFAULT_CURRENCY_SYMBOL))
}
