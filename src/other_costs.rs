//! Recurring costs other than energy, maintenance and tyres.
use crate::finance::compound_factor;
use crate::parameters::GlobalParams;
use crate::technology::Technology;
use crate::units::Money;
use crate::vehicle::VehicleSpec;

/// The other costs incurred in one year, itemised
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OtherCostsBreakdown {
    /// Cantonal vehicle tax, inflated with operating costs
    pub tax: Money,
    /// Insurance premium, constant over the horizon
    pub insurance: Money,
    /// Vehicle care, inflated with operating costs
    pub care: Money,
    /// Charging infrastructure, paid once in the first year by electrified technologies
    pub infrastructure: Money,
}

impl OtherCostsBreakdown {
    /// The sum of all items
    pub fn total(&self) -> Money {
        self.tax + self.insurance + self.care + self.infrastructure
    }
}

/// Itemised other costs for `year` (1-indexed)
pub fn annual_other_costs(
    technology: Technology,
    spec: &VehicleSpec,
    params: &GlobalParams,
    year: u32,
) -> OtherCostsBreakdown {
    let inflation = compound_factor(params.opex_inflation, year.saturating_sub(1));
    let infrastructure = if year == 1 && technology.is_electrified() {
        params.charging_infrastructure
    } else {
        Money(0.0)
    };

    OtherCostsBreakdown {
        tax: spec.annual_tax * inflation,
        insurance: spec.annual_insurance,
        care: params.vehicle_care_annual * inflation,
        infrastructure,
    }
}

/// Total other costs for each year of the horizon
pub fn other_costs_series(
    technology: Technology,
    spec: &VehicleSpec,
    params: &GlobalParams,
) -> Vec<Money> {
    (1..=params.years)
        .map(|year| annual_other_costs(technology, spec, params, year).total())
        .collect()
}
