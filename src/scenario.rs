//! Loading of comparison scenarios from a directory.
//!
//! A scenario directory contains a `scenario.toml` file and, optionally, a
//! `defaults_by_class.csv` file replacing the built-in defaults table.
use crate::defaults::{
    BuiltinDefaultsSource, CsvDefaultsSource, DEFAULTS_FILE_NAME, DefaultsCache, DefaultsSource,
};
use crate::input::read_toml;
use crate::parameters::GlobalParams;
use crate::technology::{DISPLAY_ORDER, Technology};
use crate::units::Dimensionless;
use crate::vehicle::{EnergyMarket, SpecOverrides, VehicleSpec};
use anyhow::{Context, Result, ensure};
use float_cmp::approx_eq;
use itertools::Itertools;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The name of the scenario file
pub const SCENARIO_FILE_NAME: &str = "scenario.toml";

/// Represents the contents of `scenario.toml`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    vehicle_class: String,
    parameters: GlobalParams,
    #[serde(default)]
    market: EnergyMarket,
    #[serde(default)]
    overrides: HashMap<Technology, SpecOverrides>,
    technologies: Option<Vec<Technology>>,
}

/// A fully specified comparison, ready to be run
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// The directory the scenario was loaded from
    pub scenario_path: PathBuf,
    /// The vehicle class being compared
    pub vehicle_class: String,
    /// Parameters shared by all vehicles
    pub params: GlobalParams,
    /// One vehicle per technology, in the order they should be presented
    pub specs: Vec<VehicleSpec>,
}

impl Scenario {
    /// Load a scenario from the specified directory.
    ///
    /// Defaults are read from the scenario's own defaults file if it has one, otherwise from the
    /// built-in table.
    pub fn from_path<P: AsRef<Path>>(scenario_dir: P) -> Result<Self> {
        let scenario_dir = scenario_dir.as_ref();
        let defaults_path = scenario_dir.join(DEFAULTS_FILE_NAME);
        let source: Box<dyn DefaultsSource> = if defaults_path.is_file() {
            debug!("Reading defaults from {}", defaults_path.display());
            Box::new(CsvDefaultsSource::new(defaults_path))
        } else {
            Box::new(BuiltinDefaultsSource)
        };

        Self::from_path_with_defaults(scenario_dir, &DefaultsCache::new(source))
    }

    /// Load a scenario from the specified directory, looking up defaults in `defaults`
    pub fn from_path_with_defaults<S: DefaultsSource>(
        scenario_dir: &Path,
        defaults: &DefaultsCache<S>,
    ) -> Result<Self> {
        let file: ScenarioFile = read_toml(&scenario_dir.join(SCENARIO_FILE_NAME))?;
        file.parameters
            .validate()
            .context("Invalid scenario parameters")?;
        check_charging_shares(&file.market);

        let technologies = file
            .technologies
            .unwrap_or_else(|| DISPLAY_ORDER.to_vec());
        check_technologies(&technologies)?;

        let specs = technologies
            .into_iter()
            .map(|technology| {
                let vehicle_defaults = defaults.get_default(technology, &file.vehicle_class)?;
                let overrides = file.overrides.get(&technology).cloned().unwrap_or_default();
                Ok(VehicleSpec::from_defaults(
                    technology,
                    &file.vehicle_class,
                    vehicle_defaults,
                    &file.market,
                    &overrides,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        for technology in file.overrides.keys() {
            if !specs.iter().any(|spec| spec.technology == *technology) {
                warn!("Overrides given for {technology}, which is not being compared");
            }
        }

        Ok(Self {
            scenario_path: scenario_dir.to_path_buf(),
            vehicle_class: file.vehicle_class,
            params: file.parameters,
            specs,
        })
    }

    /// The technologies being compared
    pub fn technologies(&self) -> impl Iterator<Item = Technology> + '_ {
        self.specs.iter().map(|spec| spec.technology)
    }
}

/// Check the list of technologies to compare
fn check_technologies(technologies: &[Technology]) -> Result<()> {
    ensure!(
        !technologies.is_empty(),
        "At least one technology must be compared"
    );
    ensure!(
        technologies.iter().all_unique(),
        "Technologies to compare must be unique"
    );

    Ok(())
}

/// Warn the user if the charging shares will be adjusted
fn check_charging_shares(market: &EnergyMarket) {
    let total = market.w_home + market.w_work + market.w_public;
    if total <= Dimensionless(0.0) {
        warn!("All charging shares are zero; assuming all charging is done at home");
    } else if !approx_eq!(f64, total.value(), 1.0, epsilon = 1e-6) {
        warn!(
            "Charging shares sum to {}, not 1; they will be rescaled",
            total.value()
        );
    }
}
