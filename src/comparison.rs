//! Running a comparison of vehicle technologies and writing the results.
use crate::cashflow::{TcoResult, compute_all_technologies};
use crate::decomposition::{
    DEFAULT_TOLERANCE, check_decomposition, cumulative_npv, decompose, expenses_by_category,
};
use crate::output::DataWriter;
use crate::scenario::Scenario;
use crate::technology::Technology;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{info, warn};
use std::path::Path;

/// Run a comparison for the given scenario, writing results to `output_path`.
///
/// # Arguments
///
/// * `scenario` - The scenario to run
/// * `output_path` - The folder to which output files will be written
/// * `debug_model` - Whether to write additional information (e.g. expenses by year) to file
///
/// # Returns
///
/// The result for each technology, in the order they appear in the scenario.
pub fn run(
    scenario: &Scenario,
    output_path: &Path,
    debug_model: bool,
) -> Result<IndexMap<Technology, TcoResult>> {
    let params = &scenario.params;
    info!(
        "Comparing {} vehicles over {} years ({} km/year, discount rate {})",
        scenario.vehicle_class,
        params.years,
        params.km_per_year.value(),
        params.discount_rate.value()
    );

    let results = compute_all_technologies(params, &scenario.specs);

    let mut writer = DataWriter::create(output_path, debug_model)
        .context("Failed to create output files.")?;
    for result in results.values() {
        let check = check_decomposition(result, params, DEFAULT_TOLERANCE);
        if !check.ok {
            warn!(
                "Cost breakdown for {} does not match its NPV (discrepancy: {:.4})",
                result.technology,
                check.discrepancy.value()
            );
        }

        writer.write_annual_table(result)?;
        writer.write_breakdown(&decompose(result, params))?;
        writer.write_summary(result, &check)?;
    }
    writer.write_debug_info(
        &expenses_by_category(results.values()),
        &cumulative_npv(results.values()),
    )?;
    writer.flush()?;

    log_summary(&results);

    Ok(results)
}

/// Write a summary table of the results to the log
fn log_summary(results: &IndexMap<Technology, TcoResult>) {
    info!("{:<6} {:>14} {:>10}", "Tech", "NPV", "TCO/km");
    for result in results.values() {
        info!(
            "{:<6} {:>14.2} {:>10.4}",
            result.technology.tag(),
            result.npv_total.value(),
            result.cost_per_km.value()
        );
    }

    // Lowest cost is the highest (least negative) NPV
    if let Some(best) = results
        .values()
        .max_by(|a, b| a.npv_total.value().total_cmp(&b.npv_total.value()))
    {
        info!(
            "Lowest total cost of ownership: {} ({})",
            best.technology.tag(),
            best.technology.description()
        );
    }
}
