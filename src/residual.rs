//! Residual (resale) value of a vehicle at the end of the ownership horizon.
use crate::finance::present_value;
use crate::parameters::GlobalParams;
use crate::units::{Dimensionless, Money};
use crate::vehicle::VehicleSpec;
use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// The year at which the residual-rate hint is defined
pub const ANCHOR_YEAR: u32 = 6;

/// Value retained over each two-year period beyond the anchor year
const RETENTION_PER_TWO_YEARS: f64 = 0.9;

/// A method for estimating residual value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResidualMethod {
    /// Anchored at 6 years: linear before the anchor, geometric decay of 10% per two years after
    #[default]
    Bfe2023,
}

impl ResidualMethod {
    /// The name used in input files
    pub fn name(self) -> &'static str {
        match self {
            Self::Bfe2023 => "bfe_2023",
        }
    }
}

/// Indicates that an unknown residual value method was requested
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedMethodError {
    method: String,
}

impl fmt::Display for UnsupportedMethodError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Unsupported residual value method: '{}'. Only '{}' is implemented.",
            self.method,
            ResidualMethod::Bfe2023.name()
        )
    }
}

impl Error for UnsupportedMethodError {}

impl FromStr for ResidualMethod {
    type Err = UnsupportedMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfe_2023" => Ok(Self::Bfe2023),
            _ => Err(UnsupportedMethodError { method: s.into() }),
        }
    }
}

impl<'de> Deserialize<'de> for ResidualMethod {
    fn deserialize<D>(deserialiser: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserialiser)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Calculate the residual value at the end of the horizon.
///
/// # Arguments
///
/// * `spec` - The vehicle, providing the purchase price and residual-rate hint
/// * `years` - The ownership horizon
/// * `params` - Global parameters, providing the discount rate and method
///
/// # Returns
///
/// A tuple of `(nominal, discounted)` residual values. The nominal value is clamped to
/// `[0, purchase_price]` and the discounted value is its present value at year 0.
pub fn residual_at_end(spec: &VehicleSpec, years: u32, params: &GlobalParams) -> (Money, Money) {
    let purchase_price = spec.purchase_price;
    if years == 0 {
        // No depreciation has elapsed
        return (purchase_price, purchase_price);
    }

    let nominal = match params.residual_method {
        ResidualMethod::Bfe2023 => anchored_residual(purchase_price, spec.residual_rate_hint, years),
    };
    let nominal = Money(nominal.0.min(purchase_price.0).max(0.0));
    let discounted = present_value(nominal, params.discount_rate, years);

    (nominal, discounted)
}

/// Residual value from a curve anchored at [`ANCHOR_YEAR`].
///
/// The hint is the fraction of the purchase price retained at the anchor year.
fn anchored_residual(purchase_price: Money, hint: Dimensionless, years: u32) -> Money {
    let value_at_anchor = purchase_price * hint;

    match years.cmp(&ANCHOR_YEAR) {
        Ordering::Less => {
            // Linear interpolation between the purchase price (year 0) and the anchor value
            let depreciation_to_anchor = purchase_price - value_at_anchor;
            let elapsed = Dimensionless(f64::from(years) / f64::from(ANCHOR_YEAR));
            purchase_price - depreciation_to_anchor * elapsed
        }
        Ordering::Equal => value_at_anchor,
        Ordering::Greater => {
            if value_at_anchor <= Money(0.0) {
                return Money(0.0);
            }

            // Exponent is continuous, so odd offsets get a partial decay step
            let periods = f64::from(years - ANCHOR_YEAR) / 2.0;
            value_at_anchor * Dimensionless(RETENTION_PER_TWO_YEARS).powf(periods)
        }
    }
}
