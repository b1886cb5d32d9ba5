//! Energy prices and the annual cost of the energy a vehicle consumes.
use crate::finance::make_inflation_series;
use crate::parameters::GlobalParams;
use crate::technology::Technology;
use crate::units::{Consumption, Dimensionless, Distance, EnergyPrice, Money};
use crate::vehicle::VehicleSpec;

/// Calculate the electricity price weighted by where charging takes place.
///
/// Each weight is first clamped to `[0, 1]`. If every weight is then zero, all charging is assumed
/// to happen at home. Otherwise the weights are renormalised to sum to one.
pub fn weighted_electricity_price(
    price_home: EnergyPrice,
    price_work: EnergyPrice,
    price_public: EnergyPrice,
    w_home: Dimensionless,
    w_work: Dimensionless,
    w_public: Dimensionless,
) -> EnergyPrice {
    let weights = [w_home, w_work, w_public].map(Dimensionless::clamp_proportion);
    let total = weights.into_iter().fold(Dimensionless(0.0), |acc, w| acc + w);
    if total <= Dimensionless(0.0) {
        return price_home;
    }

    [price_home, price_work, price_public]
        .into_iter()
        .zip(weights)
        .map(|(price, weight)| price * (weight / total))
        .fold(EnergyPrice(0.0), |acc, price| acc + price)
}

/// The weighted electricity price for a vehicle's charging profile
pub fn vehicle_electricity_price(spec: &VehicleSpec) -> EnergyPrice {
    weighted_electricity_price(
        spec.elec_price_home,
        spec.elec_price_work,
        spec.elec_price_public,
        spec.w_home,
        spec.w_work,
        spec.w_public,
    )
}

/// Build the yearly fuel and electricity prices over the horizon.
///
/// Element `i` of each series is the base price inflated by `(1 + energy_inflation)^i`, so the
/// price in the first year is the base price.
///
/// # Returns
///
/// A tuple of `(fuel_prices, electricity_prices)`, each with `years` elements.
pub fn build_energy_price_series(
    spec: &VehicleSpec,
    params: &GlobalParams,
    years: u32,
) -> (Vec<EnergyPrice>, Vec<EnergyPrice>) {
    let fuel = make_inflation_series(spec.fuel_price, params.energy_inflation, years);
    let elec = make_inflation_series(
        vehicle_electricity_price(spec),
        params.energy_inflation,
        years,
    );

    (fuel, elec)
}

/// Annual fuel cost of a combustion vehicle
pub fn annual_energy_cost_ice(
    distance: Distance,
    l_per_100: Consumption,
    fuel_price: EnergyPrice,
) -> Money {
    (l_per_100 * distance) * fuel_price
}

/// Annual electricity cost of a battery-electric vehicle
pub fn annual_energy_cost_bev(
    distance: Distance,
    kwh_per_100: Consumption,
    elec_price: EnergyPrice,
) -> Money {
    (kwh_per_100 * distance) * elec_price
}

/// Annual energy cost of a plug-in hybrid.
///
/// The distance is split by `share_elec` (clamped to `[0, 1]`): the electric part is priced with
/// electricity and the rest with fuel.
pub fn annual_energy_cost_phev(
    distance: Distance,
    l_per_100: Consumption,
    kwh_per_100: Consumption,
    share_elec: Dimensionless,
    fuel_price: EnergyPrice,
    elec_price: EnergyPrice,
) -> Money {
    let share_elec = share_elec.clamp_proportion();
    let distance_elec = distance * share_elec;
    let distance_fuel = distance * (Dimensionless(1.0) - share_elec);

    annual_energy_cost_bev(distance_elec, kwh_per_100, elec_price)
        + annual_energy_cost_ice(distance_fuel, l_per_100, fuel_price)
}

/// Annual energy cost of a vehicle given the prices for that year
pub fn annual_energy_cost(
    spec: &VehicleSpec,
    distance: Distance,
    fuel_price: EnergyPrice,
    elec_price: EnergyPrice,
) -> Money {
    match spec.technology {
        Technology::Combustion => {
            annual_energy_cost_ice(distance, spec.consumption_fuel, fuel_price)
        }
        Technology::Electric => annual_energy_cost_bev(distance, spec.consumption_elec, elec_price),
        Technology::PluginHybrid => annual_energy_cost_phev(
            distance,
            spec.consumption_fuel,
            spec.consumption_elec,
            spec.phev_share_elec,
            fuel_price,
            elec_price,
        ),
    }
}
