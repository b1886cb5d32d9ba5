//! Total cost of ownership comparison of combustion, battery electric and plug-in hybrid vehicles.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cashflow;
pub mod cli;
pub mod comparison;
pub mod decomposition;
pub mod defaults;
pub mod energy;
pub mod finance;
pub mod input;
pub mod log;
pub mod maintenance;
pub mod other_costs;
pub mod output;
pub mod parameters;
pub mod residual;
pub mod scenario;
pub mod settings;
pub mod technology;
pub mod tires;
pub mod units;
pub mod vehicle;

#[cfg(test)]
mod fixture;

/// Get config dir for program.
///
/// Falls back to the current directory if no config dir exists on this platform.
pub fn get_vehicle_tco_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_default();
    path.push("vehicle_tco");
    path
}
