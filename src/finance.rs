//! General functions related to finance: discounting and compounding.
use crate::units::{Dimensionless, Money};
use std::ops::Mul;

/// The compounding factor `(1 + rate)^periods`.
///
/// Used both for discounting (with the discount rate) and for inflation (with an inflation rate).
pub fn compound_factor(rate: Dimensionless, periods: u32) -> Dimensionless {
    let exponent = i32::try_from(periods).unwrap_or(i32::MAX);
    (Dimensionless(1.0) + rate).powi(exponent)
}

/// Discount a value occurring in the given year back to year 0.
pub fn present_value(value: Money, discount_rate: Dimensionless, year: u32) -> Money {
    value / compound_factor(discount_rate, year)
}

/// Multipliers `[1, (1+r), (1+r)^2, ...]` for a series of `years` values.
pub fn inflation_multipliers(rate: Dimensionless, years: u32) -> Vec<Dimensionless> {
    (0..years).map(|t| compound_factor(rate, t)).collect()
}

/// A series with compound growth: `[start, start*(1+r), ..., start*(1+r)^(years-1)]`.
///
/// Returns an empty series if `years` is zero.
pub fn make_inflation_series<T>(start_value: T, annual_rate: Dimensionless, years: u32) -> Vec<T>
where
    T: Copy + Mul<Dimensionless, Output = T>,
{
    inflation_multipliers(annual_rate, years)
        .into_iter()
        .map(|multiplier| start_value * multiplier)
        .collect()
}

/// Calculates the net present value of a series of cash flows.
///
/// The cash flow at index `t` is discounted by `(1 + discount_rate)^t`, so the first element
/// (year 0) is not discounted. With a discount rate of exactly zero, this is the plain sum.
pub fn npv(cashflows: &[Money], discount_rate: Dimensionless) -> Money {
    if discount_rate == Dimensionless(0.0) {
        return cashflows.iter().copied().sum();
    }

    (0u32..)
        .zip(cashflows)
        .map(|(t, cashflow)| present_value(*cashflow, discount_rate, t))
        .sum()
}
