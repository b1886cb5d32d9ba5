//! Vehicle specifications and the market inputs used to build them.
use crate::defaults::VehicleDefaults;
use crate::input::deserialise_proportion;
use crate::technology::Technology;
use crate::units::{Consumption, Dimensionless, EnergyPrice, Money};
use serde::Deserialize;

/// The full set of inputs describing one vehicle in a comparison.
///
/// Consumption for the energy carrier a technology does not use is expected to be zero (e.g. a BEV
/// has zero fuel consumption). This is not enforced here.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSpec {
    /// The powertrain technology
    pub technology: Technology,
    /// Key into the defaults table (e.g. "moyenne")
    pub vehicle_class: String,
    /// Price paid at year 0
    pub purchase_price: Money,
    /// Fraction of the purchase price retained at the six-year anchor
    pub residual_rate_hint: Dimensionless,
    /// Fuel consumption (L/100 km)
    pub consumption_fuel: Consumption,
    /// Electricity consumption (kWh/100 km)
    pub consumption_elec: Consumption,
    /// Base fuel price (per litre)
    pub fuel_price: EnergyPrice,
    /// Electricity price when charging at home (per kWh)
    pub elec_price_home: EnergyPrice,
    /// Electricity price when charging at work (per kWh)
    pub elec_price_work: EnergyPrice,
    /// Electricity price when charging at public stations (per kWh)
    pub elec_price_public: EnergyPrice,
    /// Share of charging done at home
    pub w_home: Dimensionless,
    /// Share of charging done at work
    pub w_work: Dimensionless,
    /// Share of charging done at public stations
    pub w_public: Dimensionless,
    /// Cumulative maintenance cost over the first six years
    pub maint_6y: Money,
    /// Cost of one set of replacement tyres
    pub tires_base: Money,
    /// Annual cantonal vehicle tax
    pub annual_tax: Money,
    /// Annual insurance premium
    pub annual_insurance: Money,
    /// Share of distance driven electrically (plug-in hybrids only)
    pub phev_share_elec: Dimensionless,
}

macro_rules! define_market_default {
    ($name:ident, $type: ty, $value: expr) => {
        fn $name() -> $type {
            <$type>::new($value)
        }
    };
}

define_market_default!(default_fuel_price, EnergyPrice, 2.00);
define_market_default!(default_elec_price_home, EnergyPrice, 0.20);
define_market_default!(default_elec_price_work, EnergyPrice, 0.20);
define_market_default!(default_elec_price_public, EnergyPrice, 0.50);
define_market_default!(default_w_home, Dimensionless, 0.90);
define_market_default!(default_w_work, Dimensionless, 0.05);
define_market_default!(default_w_public, Dimensionless, 0.05);
define_market_default!(default_phev_share_elec, Dimensionless, 0.50);

/// Energy prices and usage profile shared by all vehicles in a comparison.
///
/// Read from the `[market]` table of `scenario.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyMarket {
    /// Base fuel price (per litre)
    #[serde(default = "default_fuel_price")]
    pub fuel_price: EnergyPrice,
    /// Electricity price at home (per kWh)
    #[serde(default = "default_elec_price_home")]
    pub elec_price_home: EnergyPrice,
    /// Electricity price at work (per kWh)
    #[serde(default = "default_elec_price_work")]
    pub elec_price_work: EnergyPrice,
    /// Electricity price at public stations (per kWh)
    #[serde(default = "default_elec_price_public")]
    pub elec_price_public: EnergyPrice,
    /// Share of charging done at home
    #[serde(default = "default_w_home")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub w_home: Dimensionless,
    /// Share of charging done at work
    #[serde(default = "default_w_work")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub w_work: Dimensionless,
    /// Share of charging done at public stations
    #[serde(default = "default_w_public")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub w_public: Dimensionless,
    /// Share of distance a plug-in hybrid drives electrically
    #[serde(default = "default_phev_share_elec")]
    #[serde(deserialize_with = "deserialise_proportion")]
    pub phev_share_elec: Dimensionless,
}

impl Default for EnergyMarket {
    fn default() -> Self {
        Self {
            fuel_price: default_fuel_price(),
            elec_price_home: default_elec_price_home(),
            elec_price_work: default_elec_price_work(),
            elec_price_public: default_elec_price_public(),
            w_home: default_w_home(),
            w_work: default_w_work(),
            w_public: default_w_public(),
            phev_share_elec: default_phev_share_elec(),
        }
    }
}

/// User-supplied values replacing those from the defaults table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecOverrides {
    /// Replacement purchase price
    pub purchase_price: Option<Money>,
    /// Replacement fuel consumption (L/100 km)
    pub consumption_fuel: Option<Consumption>,
    /// Replacement electricity consumption (kWh/100 km)
    pub consumption_elec: Option<Consumption>,
}

impl VehicleSpec {
    /// Build a vehicle specification from a defaults record and market inputs.
    ///
    /// The electric share is only meaningful for plug-in hybrids and is set to zero otherwise.
    pub fn from_defaults(
        technology: Technology,
        vehicle_class: &str,
        defaults: &VehicleDefaults,
        market: &EnergyMarket,
        overrides: &SpecOverrides,
    ) -> Self {
        let phev_share_elec = match technology {
            Technology::PluginHybrid => market.phev_share_elec,
            Technology::Combustion | Technology::Electric => Dimensionless(0.0),
        };

        Self {
            technology,
            vehicle_class: vehicle_class.into(),
            purchase_price: overrides.purchase_price.unwrap_or(defaults.purchase_price),
            residual_rate_hint: defaults.residual_rate_hint,
            consumption_fuel: overrides
                .consumption_fuel
                .unwrap_or(defaults.consumption_fuel),
            consumption_elec: overrides
                .consumption_elec
                .unwrap_or(defaults.consumption_elec),
            fuel_price: market.fuel_price,
            elec_price_home: market.elec_price_home,
            elec_price_work: market.elec_price_work,
            elec_price_public: market.elec_price_public,
            w_home: market.w_home,
            w_work: market.w_work,
            w_public: market.w_public,
            maint_6y: defaults.maint_6y,
            tires_base: defaults.tires_base,
            annual_tax: defaults.annual_tax,
            annual_insurance: defaults.annual_insurance,
            phev_share_elec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::vehicle_defaults;
    use rstest::rstest;

    #[test]
    fn test_market_defaults_from_empty_toml() {
        let market: EnergyMarket = toml::from_str("").unwrap();
        assert_eq!(market, EnergyMarket::default());
    }

    #[test]
    fn test_market_share_out_of_range() {
        let result: Result<EnergyMarket, _> = toml::from_str("w_home = 1.5");
        assert!(result.is_err());
    }

    #[rstest]
    fn test_from_defaults(vehicle_defaults: VehicleDefaults) {
        let market = EnergyMarket::default();
        let spec = VehicleSpec::from_defaults(
            Technology::Electric,
            "moyenne",
            &vehicle_defaults,
            &market,
            &SpecOverrides::default(),
        );
        assert_eq!(spec.technology, Technology::Electric);
        assert_eq!(spec.vehicle_class, "moyenne");
        assert_eq!(spec.purchase_price, vehicle_defaults.purchase_price);
        assert_eq!(spec.maint_6y, vehicle_defaults.maint_6y);
        assert_eq!(spec.elec_price_public, market.elec_price_public);

        // Only meaningful for hybrids
        assert_eq!(spec.phev_share_elec, Dimensionless(0.0));
    }

    #[rstest]
    fn test_from_defaults_with_overrides(vehicle_defaults: VehicleDefaults) {
        let overrides = SpecOverrides {
            purchase_price: Some(Money(51_000.0)),
            consumption_fuel: None,
            consumption_elec: Some(Consumption(18.5)),
        };
        let spec = VehicleSpec::from_defaults(
            Technology::PluginHybrid,
            "moyenne",
            &vehicle_defaults,
            &EnergyMarket::default(),
            &overrides,
        );
        assert_eq!(spec.purchase_price, Money(51_000.0));
        assert_eq!(spec.consumption_fuel, vehicle_defaults.consumption_fuel);
        assert_eq!(spec.consumption_elec, Consumption(18.5));
        assert_eq!(spec.phev_share_elec, Dimensionless(0.5));
    }
}
