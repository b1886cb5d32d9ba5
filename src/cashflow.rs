//! Composes the annual cost series of a vehicle into a discounted cash-flow table.
use crate::energy::{annual_energy_cost, build_energy_price_series};
use crate::finance::{npv, present_value};
use crate::maintenance::maintenance_series;
use crate::other_costs::other_costs_series;
use crate::parameters::GlobalParams;
use crate::residual::residual_at_end;
use crate::technology::Technology;
use crate::tires::tires_series;
use crate::units::{Distance, Money, MoneyPerDistance};
use crate::vehicle::VehicleSpec;
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// One year of the cash-flow table.
///
/// Costs are positive values. The cash flow is the net flow for the year, i.e. negative when money
/// is spent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualRow {
    /// Year index, starting at 1
    pub year: u32,
    /// Distance driven in this year
    pub distance: Distance,
    /// Cost of fuel and/or electricity
    pub energy: Money,
    /// Maintenance cost
    pub maintenance: Money,
    /// Tyre replacement cost
    pub tires: Money,
    /// Tax, insurance, care and charging infrastructure
    pub other: Money,
    /// The sum of all costs for the year
    pub operating_total: Money,
    /// Residual value realised this year (only non-zero in the final year)
    pub residual_value: Money,
    /// Net cash flow
    pub cashflow: Money,
    /// Net cash flow discounted to year 0
    pub discounted_cashflow: Money,
    /// Running NPV including the purchase outflow at year 0
    pub cumulative_npv: Money,
}

/// Information about the vehicle a table was computed for
#[derive(Debug, Clone, PartialEq)]
pub struct TableMetadata {
    /// Price paid at year 0
    pub purchase_price: Money,
    /// The vehicle's technology
    pub technology: Technology,
    /// The vehicle class
    pub vehicle_class: String,
}

/// The annual cash-flow table for one vehicle, with one row per year of the horizon
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualTable {
    rows: Vec<AnnualRow>,
    metadata: TableMetadata,
}

impl AnnualTable {
    /// The rows of the table, in year order
    pub fn rows(&self) -> &[AnnualRow] {
        &self.rows
    }

    /// Information about the vehicle
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }
}

/// The result of a TCO computation for one vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct TcoResult {
    /// The vehicle's technology
    pub technology: Technology,
    /// The vehicle class
    pub vehicle_class: String,
    /// Net present value of all cash flows (negative for a net cost)
    pub npv_total: Money,
    /// Absolute NPV divided by the total distance driven
    pub cost_per_km: MoneyPerDistance,
    /// Residual value at the end of the horizon
    pub residual_nominal: Money,
    /// Residual value discounted to year 0
    pub residual_discounted: Money,
    /// The annual cash-flow table
    pub annual_table: AnnualTable,
}

/// Compute the cash flows and NPV for a vehicle.
///
/// The purchase price is paid at year 0. Each following year incurs energy, maintenance, tyre and
/// other costs, and the residual value is received at the end of the final year. With a horizon of
/// zero years the residual value (the full purchase price) is received at year 0, so the NPV is
/// zero and the cost per km is infinite.
pub fn compute_tco_vehicle(params: &GlobalParams, spec: &VehicleSpec) -> TcoResult {
    let years = params.years;
    let discount_rate = params.discount_rate;
    let distance = params.km_per_year;

    let (fuel_prices, elec_prices) = build_energy_price_series(spec, params, years);
    let maintenance = maintenance_series(spec, params);
    let tires = tires_series(spec, params);
    let other = other_costs_series(spec.technology, spec, params);
    let (residual_nominal, residual_discounted) = residual_at_end(spec, years, params);

    let mut cashflows = vec![-spec.purchase_price];
    let mut cumulative_npv = -spec.purchase_price;
    let mut rows = Vec::with_capacity(years as usize);
    for (idx, year) in (1..=years).enumerate() {
        let energy = annual_energy_cost(spec, distance, fuel_prices[idx], elec_prices[idx]);
        let operating_total = energy + maintenance[idx] + tires[idx] + other[idx];
        let residual_value = if year == years {
            residual_nominal
        } else {
            Money(0.0)
        };
        let cashflow = residual_value - operating_total;
        let discounted_cashflow = present_value(cashflow, discount_rate, year);
        cumulative_npv += discounted_cashflow;

        cashflows.push(cashflow);
        rows.push(AnnualRow {
            year,
            distance,
            energy,
            maintenance: maintenance[idx],
            tires: tires[idx],
            other: other[idx],
            operating_total,
            residual_value,
            cashflow,
            discounted_cashflow,
            cumulative_npv,
        });
    }

    if years == 0 {
        // The vehicle is resold immediately
        if let Some(purchase) = cashflows.last_mut() {
            *purchase += residual_nominal;
        }
    }

    let npv_total = npv(&cashflows, discount_rate);
    let total_distance = params.total_distance();
    let cost_per_km = if total_distance > Distance(0.0) {
        npv_total.abs() / total_distance
    } else {
        MoneyPerDistance(f64::INFINITY)
    };

    debug!(
        "{} ({}): NPV {:.2}, cost per km {:.4}, residual value {:.2}",
        spec.technology,
        spec.vehicle_class,
        npv_total.value(),
        cost_per_km.value(),
        residual_nominal.value()
    );

    TcoResult {
        technology: spec.technology,
        vehicle_class: spec.vehicle_class.clone(),
        npv_total,
        cost_per_km,
        residual_nominal,
        residual_discounted,
        annual_table: AnnualTable {
            rows,
            metadata: TableMetadata {
                purchase_price: spec.purchase_price,
                technology: spec.technology,
                vehicle_class: spec.vehicle_class.clone(),
            },
        },
    }
}

/// Compute results for several vehicles, keyed by technology in the order given.
///
/// If more than one vehicle has the same technology, the last one wins.
pub fn compute_all_technologies(
    params: &GlobalParams,
    specs: &[VehicleSpec],
) -> IndexMap<Technology, TcoResult> {
    specs
        .iter()
        .map(|spec| (spec.technology, compute_tco_vehicle(params, spec)))
        .collect()
}
