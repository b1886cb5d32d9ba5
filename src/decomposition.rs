//! Splitting the NPV of a vehicle into cost categories and checking that the parts reconcile.
//!
//! Every category is re-derived from the annual table, independently of the NPV computed for the
//! result, so a successful [`check_decomposition`] confirms that the two agree.
use crate::cashflow::{AnnualRow, TcoResult};
use crate::finance::present_value;
use crate::parameters::GlobalParams;
use crate::technology::Technology;
use crate::units::Money;
use serde::Serialize;
use serde_string_enum::SerializeLabeledStringEnum;
use strum::{EnumIter, IntoEnumIterator};

/// The default absolute tolerance for the decomposition check
pub const DEFAULT_TOLERANCE: Money = Money(0.01);

/// A category of costs which together make up the NPV of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, SerializeLabeledStringEnum)]
pub enum CostCategory {
    /// Purchase price less the discounted residual value
    #[string = "net_acquisition"]
    NetAcquisition,
    /// Fuel and electricity
    #[string = "energy"]
    Energy,
    /// Maintenance
    #[string = "maintenance"]
    Maintenance,
    /// Tyre replacements
    #[string = "tires"]
    Tires,
    /// Tax, insurance, care and charging infrastructure
    #[string = "other"]
    Other,
}

impl CostCategory {
    /// A human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Self::NetAcquisition => "Net acquisition",
            Self::Energy => "Energy",
            Self::Maintenance => "Maintenance",
            Self::Tires => "Tires",
            Self::Other => "Other costs",
        }
    }

    /// The category's value in a row of the annual table.
    ///
    /// Net acquisition does not appear in the annual table and so is always zero.
    fn annual_cost(self, row: &AnnualRow) -> Money {
        match self {
            Self::NetAcquisition => Money(0.0),
            Self::Energy => row.energy,
            Self::Maintenance => row.maintenance,
            Self::Tires => row.tires,
            Self::Other => row.other,
        }
    }

    /// Categories whose costs are recorded year by year
    fn operating() -> impl Iterator<Item = Self> {
        Self::iter().filter(|category| *category != Self::NetAcquisition)
    }
}

/// The discounted cost of a vehicle by category
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    /// The vehicle's technology
    pub technology: Technology,
    /// Purchase price less the discounted residual value
    pub net_acquisition: Money,
    /// Discounted energy costs
    pub energy: Money,
    /// Discounted maintenance costs
    pub maintenance: Money,
    /// Discounted tyre costs
    pub tires: Money,
    /// Discounted other costs
    pub other: Money,
}

impl CostBreakdown {
    /// The amount for the given category
    pub fn get(&self, category: CostCategory) -> Money {
        match category {
            CostCategory::NetAcquisition => self.net_acquisition,
            CostCategory::Energy => self.energy,
            CostCategory::Maintenance => self.maintenance,
            CostCategory::Tires => self.tires,
            CostCategory::Other => self.other,
        }
    }

    /// Iterate over the categories and their amounts
    pub fn iter(&self) -> impl Iterator<Item = (CostCategory, Money)> + '_ {
        CostCategory::iter().map(|category| (category, self.get(category)))
    }

    /// The discounted operating costs (all categories except net acquisition)
    pub fn operating_total(&self) -> Money {
        self.energy + self.maintenance + self.tires + self.other
    }

    /// The sum of all categories
    pub fn total(&self) -> Money {
        self.net_acquisition + self.operating_total()
    }
}

/// Sum the discounted values of a category over the annual table
fn discounted_total(rows: &[AnnualRow], category: CostCategory, params: &GlobalParams) -> Money {
    rows.iter()
        .map(|row| present_value(category.annual_cost(row), params.discount_rate, row.year))
        .sum()
}

/// Break the cost of a vehicle down into discounted categories
pub fn decompose(result: &TcoResult, params: &GlobalParams) -> CostBreakdown {
    let rows = result.annual_table.rows();
    let purchase_price = result.annual_table.metadata().purchase_price;

    CostBreakdown {
        technology: result.technology,
        net_acquisition: purchase_price - result.residual_discounted,
        energy: discounted_total(rows, CostCategory::Energy, params),
        maintenance: discounted_total(rows, CostCategory::Maintenance, params),
        tires: discounted_total(rows, CostCategory::Tires, params),
        other: discounted_total(rows, CostCategory::Other, params),
    }
}

/// The outcome of reconciling a result's NPV with its cost breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionCheck {
    /// Whether the two agree within tolerance
    pub ok: bool,
    /// The absolute value of the NPV
    pub abs_npv: Money,
    /// Purchase price less the discounted residual value
    pub net_acquisition: Money,
    /// The sum of the discounted operating cost categories
    pub operating_discounted: Money,
    /// The absolute difference between the NPV and the breakdown total
    pub discrepancy: Money,
}

/// Check that `|NPV| = net acquisition + discounted operating costs` within `tolerance`.
///
/// A mismatch is reported in the returned value rather than as an error, so callers can decide
/// whether to warn or abort.
pub fn check_decomposition(
    result: &TcoResult,
    params: &GlobalParams,
    tolerance: Money,
) -> DecompositionCheck {
    let breakdown = decompose(result, params);
    let abs_npv = result.npv_total.abs();
    let discrepancy = (abs_npv - breakdown.total()).abs();

    DecompositionCheck {
        ok: discrepancy <= tolerance,
        abs_npv,
        net_acquisition: breakdown.net_acquisition,
        operating_discounted: breakdown.operating_total(),
        discrepancy,
    }
}

/// The nominal cost of one category in one year for one technology
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRow {
    /// Year index, starting at 1
    pub year: u32,
    /// The technology
    pub technology: Technology,
    /// The cost category
    pub category: CostCategory,
    /// Nominal cost
    pub amount: Money,
}

/// List the nominal operating costs of each result by year and category
pub fn expenses_by_category<'a, I>(results: I) -> Vec<ExpenseRow>
where
    I: IntoIterator<Item = &'a TcoResult>,
{
    let mut expenses = Vec::new();
    for result in results {
        for row in result.annual_table.rows() {
            for category in CostCategory::operating() {
                expenses.push(ExpenseRow {
                    year: row.year,
                    technology: result.technology,
                    category,
                    amount: category.annual_cost(row),
                });
            }
        }
    }

    expenses
}

/// The cumulative NPV of one technology at the end of a year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeNpvRow {
    /// Year index, where year 0 is the purchase
    pub year: u32,
    /// The technology
    pub technology: Technology,
    /// Cumulative discounted cash flow up to and including this year
    pub cumulative_npv: Money,
}

/// The cumulative NPV of each result from the purchase (year 0) to the end of the horizon.
///
/// With a zero horizon the vehicle is resold at year 0, so the only row is the total NPV.
pub fn cumulative_npv<'a, I>(results: I) -> Vec<CumulativeNpvRow>
where
    I: IntoIterator<Item = &'a TcoResult>,
{
    let mut series = Vec::new();
    for result in results {
        let rows = result.annual_table.rows();
        let at_purchase = if rows.is_empty() {
            result.npv_total
        } else {
            -result.annual_table.metadata().purchase_price
        };
        series.push(CumulativeNpvRow {
            year: 0,
            technology: result.technology,
            cumulative_npv: at_purchase,
        });
        series.extend(rows.iter().map(|row| CumulativeNpvRow {
            year: row.year,
            technology: result.technology,
            cumulative_npv: row.cumulative_npv,
        }));
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflow::{compute_all_technologies, compute_tco_vehicle};
    use crate::fixture::{bev_spec, ice_spec, phev_spec, simple_params};
    use crate::units::{Dimensionless, Distance};
    use crate::vehicle::VehicleSpec;
    use float_cmp::assert_approx_eq;
    use itertools::iproduct;
    use rstest::rstest;

    #[rstest]
    fn test_reference_breakdown(bev_spec: VehicleSpec, simple_params: GlobalParams) {
        let result = compute_tco_vehicle(&simple_params, &bev_spec);
        let breakdown = decompose(&result, &simple_params);

        // 40'000 less a residual of 30'666.67
        assert_approx_eq!(
            Money,
            breakdown.net_acquisition,
            Money(9333.333_333_333_332),
            epsilon = 1e-6
        );
        assert_approx_eq!(Money, breakdown.energy, Money(600.0), epsilon = 1e-9);
        assert_eq!(breakdown.maintenance, Money(0.0));
        assert_eq!(breakdown.tires, Money(0.0));
        assert_eq!(breakdown.other, Money(0.0));
        assert_approx_eq!(Money, breakdown.total(), result.npv_total.abs(), epsilon = 0.01);
        assert_eq!(breakdown.iter().count(), 5);
    }

    #[rstest]
    fn test_decomposition_holds(
        bev_spec: VehicleSpec,
        ice_spec: VehicleSpec,
        phev_spec: VehicleSpec,
        simple_params: GlobalParams,
    ) {
        let horizons = [0, 1, 5, 6, 7, 12, 20];
        let discount_rates = [0.0, 0.02, 0.07];
        let inflation_rates = [0.0, 0.015, -0.01];
        let distances = [0.0, 8_000.0, 15_000.0, 35_000.0];

        for (years, discount_rate, inflation, km_per_year) in
            iproduct!(horizons, discount_rates, inflation_rates, distances)
        {
            let params = GlobalParams {
                years,
                km_per_year: Distance(km_per_year),
                discount_rate: Dimensionless(discount_rate),
                energy_inflation: Dimensionless(inflation),
                opex_inflation: Dimensionless(inflation),
                vehicle_care_annual: Money(150.0),
                charging_infrastructure: Money(3040.0),
                ..simple_params.clone()
            };
            for spec in [&bev_spec, &ice_spec, &phev_spec] {
                let result = compute_tco_vehicle(&params, spec);
                let check = check_decomposition(&result, &params, DEFAULT_TOLERANCE);
                assert!(
                    check.ok,
                    "decomposition failed for {} with {params:?}: {check:?}",
                    spec.technology
                );
            }
        }
    }

    #[rstest]
    fn test_check_reports_mismatch(ice_spec: VehicleSpec, simple_params: GlobalParams) {
        let mut result = compute_tco_vehicle(&simple_params, &ice_spec);
        result.npv_total -= Money(5.0);

        let check = check_decomposition(&result, &simple_params, DEFAULT_TOLERANCE);
        assert!(!check.ok);
        assert_approx_eq!(Money, check.discrepancy, Money(5.0), epsilon = 1e-6);

        // A looser tolerance accepts the same result
        assert!(check_decomposition(&result, &simple_params, Money(10.0)).ok);
    }

    #[rstest]
    fn test_expenses_by_category(
        bev_spec: VehicleSpec,
        ice_spec: VehicleSpec,
        simple_params: GlobalParams,
    ) {
        let results = compute_all_technologies(&simple_params, &[bev_spec, ice_spec]);
        let expenses = expenses_by_category(results.values());

        // Two technologies, two years, four categories
        assert_eq!(expenses.len(), 16);
        assert!(
            expenses
                .iter()
                .all(|row| row.category != CostCategory::NetAcquisition)
        );

        let bev_energy: Money = expenses
            .iter()
            .filter(|row| {
                row.technology == Technology::Electric && row.category == CostCategory::Energy
            })
            .map(|row| row.amount)
            .sum();
        assert_approx_eq!(Money, bev_energy, Money(600.0), epsilon = 1e-9);
    }

    #[rstest]
    fn test_cumulative_npv(bev_spec: VehicleSpec, simple_params: GlobalParams) {
        let result = compute_tco_vehicle(&simple_params, &bev_spec);
        let series = cumulative_npv([&result]);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].year, 0);
        assert_eq!(series[0].cumulative_npv, Money(-40_000.0));
        assert_eq!(series[2].year, 2);
        assert_approx_eq!(
            Money,
            series[2].cumulative_npv,
            result.npv_total,
            epsilon = 1e-9
        );
    }

    #[rstest]
    fn test_zero_horizon_series(bev_spec: VehicleSpec, simple_params: GlobalParams) {
        let params = GlobalParams {
            years: 0,
            ..simple_params
        };
        let result = compute_tco_vehicle(&params, &bev_spec);
        assert!(expenses_by_category([&result]).is_empty());

        // The cumulative series ends at the same NPV as the result
        let series = cumulative_npv([&result]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].year, 0);
        assert_eq!(series[0].cumulative_npv, result.npv_total);
        assert_eq!(series[0].cumulative_npv, Money(0.0));
        assert!(check_decomposition(&result, &params, DEFAULT_TOLERANCE).ok);
    }
}
