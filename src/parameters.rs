//! Defines the `GlobalParams` struct, which holds the parameters shared by every technology in a
//! comparison.
use crate::residual::ResidualMethod;
use crate::units::{Dimensionless, Distance, Money};
use anyhow::{Result, ensure};
use serde::Deserialize;

macro_rules! define_unit_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            <$type>::new($value)
        }
    };
}

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            $value
        }
    };
}

define_unit_param_default!(default_vehicle_care_annual, Money, 150.0);
define_unit_param_default!(default_charging_infrastructure, Money, 3040.0);
define_param_default!(default_apply_maint_7_over_6, bool, true);
define_param_default!(default_include_tires_x2, bool, true);

/// Parameters shared across all technologies in one comparison run.
///
/// Read from the `[parameters]` table of `scenario.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalParams {
    /// The ownership horizon in years
    pub years: u32,
    /// Distance driven each year
    pub km_per_year: Distance,
    /// The discount rate used for present values
    pub discount_rate: Dimensionless,
    /// Annual inflation of fuel and electricity prices
    #[serde(default)]
    pub energy_inflation: Dimensionless,
    /// Annual inflation of operating costs (maintenance, tyres, tax, vehicle care)
    #[serde(default)]
    pub opex_inflation: Dimensionless,
    /// Whether maintenance costs step up by 7/6 after the sixth year
    #[serde(default = "default_apply_maint_7_over_6")]
    pub apply_maint_7_over_6: bool,
    /// Whether the cost of each tyre replacement is doubled
    #[serde(default = "default_include_tires_x2")]
    pub include_tires_x2: bool,
    /// Flat annual cost of vehicle care (cleaning etc.)
    #[serde(default = "default_vehicle_care_annual")]
    pub vehicle_care_annual: Money,
    /// One-off cost of a home charger, paid in year 1 by electrified technologies
    #[serde(default = "default_charging_infrastructure")]
    pub charging_infrastructure: Money,
    /// The method used to estimate the residual value
    #[serde(default)]
    pub residual_method: ResidualMethod,
}

impl GlobalParams {
    /// The total distance driven over the horizon
    pub fn total_distance(&self) -> Distance {
        self.km_per_year * Dimensionless(f64::from(self.years))
    }

    /// Check that the parameters are valid
    pub fn validate(&self) -> Result<()> {
        check_distance(self.km_per_year)?;
        check_rate("discount_rate", self.discount_rate)?;
        check_rate("energy_inflation", self.energy_inflation)?;
        check_rate("opex_inflation", self.opex_inflation)?;
        check_money("vehicle_care_annual", self.vehicle_care_annual)?;
        check_money("charging_infrastructure", self.charging_infrastructure)?;

        Ok(())
    }
}

/// The largest annual distance accepted (km)
const MAX_KM_PER_YEAR: Distance = Distance(1_000_000.0);

/// Check that an annual distance is valid
fn check_distance(value: Distance) -> Result<()> {
    ensure!(
        value.is_finite() && value >= Distance(0.0),
        "km_per_year must be a finite number greater than or equal to zero"
    );
    ensure!(
        value <= MAX_KM_PER_YEAR,
        "km_per_year must not exceed {} km",
        MAX_KM_PER_YEAR.value()
    );

    Ok(())
}

/// Check that a rate (discount or inflation) is valid.
///
/// Negative rates are permitted, but a rate of -100% or lower makes compounding meaningless.
fn check_rate(name: &str, value: Dimensionless) -> Result<()> {
    ensure!(
        value.is_finite() && value > Dimensionless(-1.0),
        "{name} must be a finite number greater than -1"
    );

    Ok(())
}

/// Check that a monetary amount is valid
fn check_money(name: &str, value: Money) -> Result<()> {
    ensure!(
        value.is_finite() && value >= Money(0.0),
        "{name} must be a finite number greater than or equal to zero"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(toml_str: &str) -> GlobalParams {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_params_defaults() {
        let params = parse("years = 8\nkm_per_year = 15000\ndiscount_rate = 0.04");
        assert_eq!(
            params,
            GlobalParams {
                years: 8,
                km_per_year: Distance(15_000.0),
                discount_rate: Dimensionless(0.04),
                energy_inflation: Dimensionless(0.0),
                opex_inflation: Dimensionless(0.0),
                apply_maint_7_over_6: true,
                include_tires_x2: true,
                vehicle_care_annual: Money(150.0),
                charging_infrastructure: Money(3040.0),
                residual_method: ResidualMethod::Bfe2023,
            }
        );
        assert!(params.validate().is_ok());
        assert_eq!(params.total_distance(), Distance(120_000.0));
    }

    #[test]
    fn test_params_unknown_field() {
        let result: Result<GlobalParams, _> =
            toml::from_str("years = 8\nkm_per_year = 15000\ndiscount_rate = 0.04\nfoo = 1");
        assert!(result.is_err());
    }

    #[test]
    fn test_params_unsupported_residual_method() {
        let result: Result<GlobalParams, _> = toml::from_str(
            "years = 8\nkm_per_year = 15000\ndiscount_rate = 0.04\nresidual_method = \"linear\"",
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Unsupported residual value method"));
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(0.04, true)]
    #[case(-0.02, true)] // Deflation is allowed
    #[case(-1.0, false)]
    #[case(f64::INFINITY, false)]
    #[case(f64::NAN, false)]
    fn test_check_rate(#[case] value: f64, #[case] expected_valid: bool) {
        assert_eq!(
            check_rate("discount_rate", Dimensionless(value)).is_ok(),
            expected_valid
        );
    }

    #[rstest]
    #[case(0.0, true)] // Zero distance is handled by the model
    #[case(15_000.0, true)]
    #[case(1_000_000.0, true)]
    #[case(-1.0, false)]
    #[case(f64::NAN, false)]
    #[case(1e15, false)] // Implausibly far
    fn test_check_distance(#[case] value: f64, #[case] expected_valid: bool) {
        assert_eq!(check_distance(Distance(value)).is_ok(), expected_valid);
    }

    #[test]
    fn test_validate_negative_money() {
        let mut params = parse("years = 8\nkm_per_year = 15000\ndiscount_rate = 0.04");
        params.charging_infrastructure = Money(-1.0);
        assert_eq!(
            params.validate().unwrap_err().to_string(),
            "charging_infrastructure must be a finite number greater than or equal to zero"
        );
    }

    #[test]
    fn test_validate_implausible_distance() {
        let params = parse("years = 8\nkm_per_year = 1e15\ndiscount_rate = 0.04");
        assert_eq!(
            params.validate().unwrap_err().to_string(),
            "km_per_year must not exceed 1000000 km"
        );
    }
}
