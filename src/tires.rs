//! Annual tyre replacement costs.
//!
//! Tyres are replaced after a fixed distance rather than a fixed number of years, so the years in
//! which a replacement falls depend on the annual distance.
use crate::finance::compound_factor;
use crate::parameters::GlobalParams;
use crate::units::{Dimensionless, Distance, Money};
use crate::vehicle::VehicleSpec;

/// Distance between tyre replacements (km)
pub const TIRE_REPLACEMENT_INTERVAL: Distance = Distance(40_000.0);

/// Tyre cost for each year of the horizon.
///
/// Replacement `k` falls in year `ceil(k * interval / km_per_year)` and is dropped if that is
/// beyond the horizon, so year `y` holds `floor(y * km / interval) - floor((y - 1) * km / interval)`
/// replacements. Each replacement costs `tires_base`, doubled if `include_tires_x2` is set,
/// inflated by `(1 + opex_inflation)^(year-1)`.
///
/// The series is all zeros if the annual distance is zero.
pub fn tires_series(spec: &VehicleSpec, params: &GlobalParams) -> Vec<Money> {
    let km_per_year = params.km_per_year;
    if km_per_year <= Distance(0.0) {
        return vec![Money(0.0); params.years as usize];
    }

    let factor = if params.include_tires_x2 { 2.0 } else { 1.0 };
    let cost_per_replacement = spec.tires_base * Dimensionless(factor);
    let replacements_by_end_of = |year: u32| {
        (km_per_year * Dimensionless(f64::from(year)) / TIRE_REPLACEMENT_INTERVAL)
            .value()
            .floor()
    };

    (1..=params.years)
        .map(|year| {
            let replacements = replacements_by_end_of(year) - replacements_by_end_of(year - 1);
            cost_per_replacement
                * Dimensionless(replacements)
                * compound_factor(params.opex_inflation, year - 1)
        })
        .collect()
}
