//! Annual maintenance costs.
use crate::finance::compound_factor;
use crate::parameters::GlobalParams;
use crate::residual::ANCHOR_YEAR;
use crate::units::{Dimensionless, Money};
use crate::vehicle::VehicleSpec;

/// Cost multiplier for years after the sixth when the late-horizon step is enabled
const LATE_HORIZON_STEP: f64 = 7.0 / 6.0;

/// Maintenance cost for each year of the horizon.
///
/// The six-year cumulative cost is spread evenly over the first six years. Later years are
/// multiplied by 7/6 if `apply_maint_7_over_6` is set. Year `t` is then inflated by
/// `(1 + opex_inflation)^(t-1)`.
pub fn maintenance_series(spec: &VehicleSpec, params: &GlobalParams) -> Vec<Money> {
    let base = spec.maint_6y / Dimensionless(f64::from(ANCHOR_YEAR));

    (1..=params.years)
        .map(|year| {
            let step = if params.apply_maint_7_over_6 && year > ANCHOR_YEAR {
                LATE_HORIZON_STEP
            } else {
                1.0
            };
            base * Dimensionless(step) * compound_factor(params.opex_inflation, year - 1)
        })
        .collect()
}
