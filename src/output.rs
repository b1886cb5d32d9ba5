//! The module responsible for writing output data to disk.
use crate::cashflow::TcoResult;
use crate::decomposition::{
    CostBreakdown, CostCategory, CumulativeNpvRow, DecompositionCheck, ExpenseRow,
};
use crate::technology::Technology;
use crate::units::{Money, MoneyPerDistance};
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;

/// The root folder in which scenario-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "vehicle_tco_results";

/// The output file name for the annual cash-flow tables
const ANNUAL_TABLE_FILE_NAME: &str = "annual_table.csv";

/// The output file name for the cost decomposition (long format)
const DECOMPOSITION_FILE_NAME: &str = "decomposition.csv";

/// The output file name for the cost breakdown (one row per technology)
const BREAKDOWN_FILE_NAME: &str = "breakdown.csv";

/// The output file name for the summary of results
const SUMMARY_FILE_NAME: &str = "summary.csv";

/// The output file name for nominal expenses by year and category
const EXPENSES_FILE_NAME: &str = "debug_expenses.csv";

/// The output file name for the cumulative NPV series
const CUMULATIVE_NPV_FILE_NAME: &str = "debug_cumulative_npv.csv";

/// Get the default output directory for the specified scenario directory
pub fn get_output_dir(scenario_dir: &Path) -> Result<PathBuf> {
    // Canonicalise in case the user has specified "."
    let scenario_dir = scenario_dir
        .canonicalize()
        .context("Could not resolve path to scenario")?;

    let scenario_name = scenario_dir
        .file_name()
        .context("Scenario cannot be in root folder")?
        .to_str()
        .context("Invalid chars in scenario dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, scenario_name].iter().collect())
}

/// Create a new output directory.
///
/// If the directory already exists and is not empty, its contents are deleted if
/// `allow_overwrite` is set and an error is returned otherwise.
///
/// # Returns
///
/// Whether an existing directory was overwritten
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwrite = if let Ok(mut entries) = fs::read_dir(output_dir) {
        if entries.next().is_none() {
            // Already exists and is empty
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Please delete the folder or pass the \
            --overwrite command-line option."
        );

        fs::remove_dir_all(output_dir)?;
        true
    } else {
        false
    };

    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Identifies the vehicle in rows of the annual table file.
///
/// This will be written along with an [`AnnualRow`](crate::cashflow::AnnualRow).
#[derive(Serialize, Debug, PartialEq)]
struct VehicleRow {
    technology: Technology,
    vehicle_class: String,
}

/// Represents a row in the decomposition CSV file
#[derive(Serialize, Debug, PartialEq)]
struct DecompositionRow {
    technology: Technology,
    category: CostCategory,
    amount: Money,
}

/// Represents a row in the breakdown CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct BreakdownRow {
    technology: Technology,
    net_acquisition: Money,
    energy: Money,
    maintenance: Money,
    tires: Money,
    other: Money,
    total: Money,
}

impl BreakdownRow {
    fn new(breakdown: &CostBreakdown) -> Self {
        Self {
            technology: breakdown.technology,
            net_acquisition: breakdown.net_acquisition,
            energy: breakdown.energy,
            maintenance: breakdown.maintenance,
            tires: breakdown.tires,
            other: breakdown.other,
            total: breakdown.total(),
        }
    }
}

/// Represents a row in the summary CSV file
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SummaryRow {
    technology: Technology,
    vehicle_class: String,
    npv_total: Money,
    cost_per_km: MoneyPerDistance,
    residual_nominal: Money,
    residual_discounted: Money,
    decomposition_ok: bool,
    discrepancy: Money,
}

impl SummaryRow {
    fn new(result: &TcoResult, check: &DecompositionCheck) -> Self {
        Self {
            technology: result.technology,
            vehicle_class: result.vehicle_class.clone(),
            npv_total: result.npv_total,
            cost_per_km: result.cost_per_km,
            residual_nominal: result.residual_nominal,
            residual_discounted: result.residual_discounted,
            decomposition_ok: check.ok,
            discrepancy: check.discrepancy,
        }
    }
}

/// Open a CSV writer for a file in `output_path`
fn new_writer(output_path: &Path, file_name: &str) -> Result<csv::Writer<File>> {
    let file_path = output_path.join(file_name);
    csv::Writer::from_path(&file_path)
        .with_context(|| format!("Could not create {}", file_path.display()))
}

/// For writing extra debug information about the comparison
struct DebugDataWriter {
    expenses_writer: csv::Writer<File>,
    cumulative_npv_writer: csv::Writer<File>,
}

impl DebugDataWriter {
    /// Open CSV files to write debug info to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    fn create(output_path: &Path) -> Result<Self> {
        Ok(Self {
            expenses_writer: new_writer(output_path, EXPENSES_FILE_NAME)?,
            cumulative_npv_writer: new_writer(output_path, CUMULATIVE_NPV_FILE_NAME)?,
        })
    }

    /// Write nominal expenses by year and category
    fn write_expenses(&mut self, expenses: &[ExpenseRow]) -> Result<()> {
        for row in expenses {
            self.expenses_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Write the cumulative NPV series
    fn write_cumulative_npv(&mut self, series: &[CumulativeNpvRow]) -> Result<()> {
        for row in series {
            self.cumulative_npv_writer.serialize(row)?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    fn flush(&mut self) -> Result<()> {
        self.expenses_writer.flush()?;
        self.cumulative_npv_writer.flush()?;

        Ok(())
    }
}

/// An object for writing comparison results to file
pub struct DataWriter {
    annual_writer: csv::Writer<File>,
    decomposition_writer: csv::Writer<File>,
    breakdown_writer: csv::Writer<File>,
    summary_writer: csv::Writer<File>,
    debug_writer: Option<DebugDataWriter>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    /// * `save_debug_info` - Whether to include extra CSV files for debugging
    pub fn create(output_path: &Path, save_debug_info: bool) -> Result<Self> {
        let debug_writer = if save_debug_info {
            // Create debug CSV files
            Some(DebugDataWriter::create(output_path)?)
        } else {
            None
        };

        Ok(Self {
            annual_writer: new_writer(output_path, ANNUAL_TABLE_FILE_NAME)?,
            decomposition_writer: new_writer(output_path, DECOMPOSITION_FILE_NAME)?,
            breakdown_writer: new_writer(output_path, BREAKDOWN_FILE_NAME)?,
            summary_writer: new_writer(output_path, SUMMARY_FILE_NAME)?,
            debug_writer,
        })
    }

    /// Write the annual cash-flow table of a result
    pub fn write_annual_table(&mut self, result: &TcoResult) -> Result<()> {
        let metadata = result.annual_table.metadata();
        for row in result.annual_table.rows() {
            let vehicle_row = VehicleRow {
                technology: metadata.technology,
                vehicle_class: metadata.vehicle_class.clone(),
            };
            self.annual_writer.serialize((vehicle_row, row))?;
        }

        Ok(())
    }

    /// Write a cost breakdown, both in long format and as a single row
    pub fn write_breakdown(&mut self, breakdown: &CostBreakdown) -> Result<()> {
        for (category, amount) in breakdown.iter() {
            self.decomposition_writer.serialize(DecompositionRow {
                technology: breakdown.technology,
                category,
                amount,
            })?;
        }
        self.breakdown_writer
            .serialize(BreakdownRow::new(breakdown))?;

        Ok(())
    }

    /// Write the summary of a result
    pub fn write_summary(&mut self, result: &TcoResult, check: &DecompositionCheck) -> Result<()> {
        self.summary_writer
            .serialize(SummaryRow::new(result, check))?;

        Ok(())
    }

    /// Write debug information to CSV files
    pub fn write_debug_info(
        &mut self,
        expenses: &[ExpenseRow],
        cumulative_npv: &[CumulativeNpvRow],
    ) -> Result<()> {
        if let Some(ref mut wtr) = self.debug_writer {
            wtr.write_expenses(expenses)?;
            wtr.write_cumulative_npv(cumulative_npv)?;
        }

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.annual_writer.flush()?;
        self.decomposition_writer.flush()?;
        self.breakdown_writer.flush()?;
        self.summary_writer.flush()?;
        if let Some(ref mut wtr) = self.debug_writer {
            wtr.flush()?;
        }

        Ok(())
    }
}
