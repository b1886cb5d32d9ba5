//! Fixtures for tests

use crate::defaults::VehicleDefaults;
use crate::parameters::GlobalParams;
use crate::residual::ResidualMethod;
use crate::technology::Technology;
use crate::units::{Consumption, Dimensionless, Distance, EnergyPrice, Money};
use crate::vehicle::VehicleSpec;
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Two years of 10'000 km with no discounting, inflation or flat costs
#[fixture]
pub fn simple_params() -> GlobalParams {
    GlobalParams {
        years: 2,
        km_per_year: Distance(10_000.0),
        discount_rate: Dimensionless(0.0),
        energy_inflation: Dimensionless(0.0),
        opex_inflation: Dimensionless(0.0),
        apply_maint_7_over_6: true,
        include_tires_x2: true,
        vehicle_care_annual: Money(0.0),
        charging_infrastructure: Money(0.0),
        residual_method: ResidualMethod::Bfe2023,
    }
}

/// A battery-electric vehicle with only energy and depreciation costs, charged at home
#[fixture]
pub fn bev_spec() -> VehicleSpec {
    VehicleSpec {
        technology: Technology::Electric,
        vehicle_class: "moyenne".into(),
        purchase_price: Money(40_000.0),
        residual_rate_hint: Dimensionless(0.3),
        consumption_fuel: Consumption(0.0),
        consumption_elec: Consumption(15.0),
        fuel_price: EnergyPrice(2.0),
        elec_price_home: EnergyPrice(0.20),
        elec_price_work: EnergyPrice(0.20),
        elec_price_public: EnergyPrice(0.50),
        w_home: Dimensionless(1.0),
        w_work: Dimensionless(0.0),
        w_public: Dimensionless(0.0),
        maint_6y: Money(0.0),
        tires_base: Money(0.0),
        annual_tax: Money(0.0),
        annual_insurance: Money(0.0),
        phev_share_elec: Dimensionless(0.0),
    }
}

#[fixture]
pub fn ice_spec() -> VehicleSpec {
    VehicleSpec {
        technology: Technology::Combustion,
        vehicle_class: "moyenne".into(),
        purchase_price: Money(38_000.0),
        residual_rate_hint: Dimensionless(0.38),
        consumption_fuel: Consumption(6.5),
        consumption_elec: Consumption(0.0),
        fuel_price: EnergyPrice(2.0),
        elec_price_home: EnergyPrice(0.20),
        elec_price_work: EnergyPrice(0.20),
        elec_price_public: EnergyPrice(0.50),
        w_home: Dimensionless(0.9),
        w_work: Dimensionless(0.05),
        w_public: Dimensionless(0.05),
        maint_6y: Money(5400.0),
        tires_base: Money(800.0),
        annual_tax: Money(350.0),
        annual_insurance: Money(1300.0),
        phev_share_elec: Dimensionless(0.0),
    }
}

#[fixture]
pub fn phev_spec() -> VehicleSpec {
    VehicleSpec {
        technology: Technology::PluginHybrid,
        vehicle_class: "moyenne".into(),
        purchase_price: Money(48_000.0),
        residual_rate_hint: Dimensionless(0.36),
        consumption_fuel: Consumption(6.0),
        consumption_elec: Consumption(19.0),
        fuel_price: EnergyPrice(2.0),
        elec_price_home: EnergyPrice(0.20),
        elec_price_work: EnergyPrice(0.20),
        elec_price_public: EnergyPrice(0.50),
        w_home: Dimensionless(0.9),
        w_work: Dimensionless(0.05),
        w_public: Dimensionless(0.05),
        maint_6y: Money(4900.0),
        tires_base: Money(850.0),
        annual_tax: Money(280.0),
        annual_insurance: Money(1450.0),
        phev_share_elec: Dimensionless(0.5),
    }
}

#[fixture]
pub fn vehicle_defaults() -> VehicleDefaults {
    VehicleDefaults {
        purchase_price: Money(45_000.0),
        residual_rate_hint: Dimensionless(0.40),
        consumption_fuel: Consumption(0.0),
        consumption_elec: Consumption(17.0),
        maint_6y: Money(3800.0),
        tires_base: Money(900.0),
        annual_tax: Money(160.0),
        annual_insurance: Money(1400.0),
    }
}
