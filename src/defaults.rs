//! Default vehicle values keyed by vehicle class and technology.
//!
//! The table is read once by a [`DefaultsCache`], which is owned by the caller and reused for every
//! lookup. Alternative data sources can be supplied by implementing [`DefaultsSource`].
use crate::input::{read_csv, read_csv_from_str};
use crate::technology::Technology;
use crate::units::{Consumption, Dimensionless, Money};
use anyhow::{Result, bail};
use indexmap::IndexMap;
use itertools::Itertools;
use serde::Deserialize;
use std::cell::OnceCell;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// The name of the optional defaults file in a scenario directory
pub const DEFAULTS_FILE_NAME: &str = "defaults_by_class.csv";

/// The defaults table shipped with the program
const BUILTIN_DEFAULTS: &str = include_str!("../data/defaults_by_class.csv");

/// Default values for one vehicle class and technology
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDefaults {
    /// Purchase price
    pub purchase_price: Money,
    /// Fraction of the purchase price retained after six years
    pub residual_rate_hint: Dimensionless,
    /// Fuel consumption (L/100 km)
    pub consumption_fuel: Consumption,
    /// Electricity consumption (kWh/100 km)
    pub consumption_elec: Consumption,
    /// Cumulative maintenance cost over six years
    pub maint_6y: Money,
    /// Cost of one set of tyres
    pub tires_base: Money,
    /// Annual cantonal tax
    pub annual_tax: Money,
    /// Annual insurance premium
    pub annual_insurance: Money,
}

/// Represents a row of the defaults CSV file
#[derive(Debug, Deserialize)]
struct DefaultsRecord {
    vehicle_class: String,
    technology: Technology,
    purchase_price: Money,
    residual_rate_hint: Dimensionless,
    consumption_fuel: Consumption,
    consumption_elec: Consumption,
    maint_6y: Money,
    tires_base: Money,
    annual_tax: Money,
    annual_insurance: Money,
}

impl DefaultsRecord {
    fn into_parts(self) -> (String, Technology, VehicleDefaults) {
        let defaults = VehicleDefaults {
            purchase_price: self.purchase_price,
            residual_rate_hint: self.residual_rate_hint,
            consumption_fuel: self.consumption_fuel,
            consumption_elec: self.consumption_elec,
            maint_6y: self.maint_6y,
            tires_base: self.tires_base,
            annual_tax: self.annual_tax,
            annual_insurance: self.annual_insurance,
        };
        (self.vehicle_class, self.technology, defaults)
    }
}

/// A failed lookup in the defaults table
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultsError {
    /// The vehicle class is not in the table
    UnknownVehicleClass {
        /// The class which was requested
        vehicle_class: String,
        /// The classes which are available
        valid: Vec<String>,
    },
    /// The class exists, but has no entry for the technology
    UnknownTechnology {
        /// The technology which was requested
        technology: Technology,
        /// The class which was requested
        vehicle_class: String,
        /// The technologies available for this class
        valid: Vec<Technology>,
    },
}

impl fmt::Display for DefaultsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownVehicleClass {
                vehicle_class,
                valid,
            } => write!(
                f,
                "Invalid vehicle class '{vehicle_class}'. Valid classes: {}",
                valid.join(", ")
            ),
            Self::UnknownTechnology {
                technology,
                vehicle_class,
                valid,
            } => write!(
                f,
                "Invalid technology '{technology}' for class '{vehicle_class}'. \
                Valid technologies: {}",
                valid.iter().join(", ")
            ),
        }
    }
}

impl Error for DefaultsError {}

/// Default values for every vehicle class and technology
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefaultsTable(IndexMap<String, IndexMap<Technology, VehicleDefaults>>);

impl DefaultsTable {
    /// Build the table from CSV records, rejecting duplicate entries
    fn from_records(records: Vec<DefaultsRecord>) -> Result<Self> {
        let mut table: IndexMap<String, IndexMap<Technology, VehicleDefaults>> = IndexMap::new();
        for record in records {
            let (vehicle_class, technology, defaults) = record.into_parts();
            let by_technology = table.entry(vehicle_class.clone()).or_default();
            if by_technology.insert(technology, defaults).is_some() {
                bail!(
                    "Duplicate defaults entry for class '{vehicle_class}' and technology \
                    {technology}"
                );
            }
        }

        Ok(Self(table))
    }

    /// Iterate over the vehicle classes in the order they were defined
    pub fn vehicle_classes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Look up the defaults for the given technology and vehicle class
    pub fn get(
        &self,
        technology: Technology,
        vehicle_class: &str,
    ) -> Result<&VehicleDefaults, DefaultsError> {
        let by_technology =
            self.0
                .get(vehicle_class)
                .ok_or_else(|| DefaultsError::UnknownVehicleClass {
                    vehicle_class: vehicle_class.into(),
                    valid: self.vehicle_classes().map(String::from).collect(),
                })?;

        by_technology
            .get(&technology)
            .ok_or_else(|| DefaultsError::UnknownTechnology {
                technology,
                vehicle_class: vehicle_class.into(),
                valid: by_technology.keys().copied().collect(),
            })
    }
}

/// Somewhere a defaults table can be loaded from
pub trait DefaultsSource {
    /// Read the full defaults table
    fn load(&self) -> Result<DefaultsTable>;
}

impl<S: DefaultsSource + ?Sized> DefaultsSource for Box<S> {
    fn load(&self) -> Result<DefaultsTable> {
        (**self).load()
    }
}

/// The defaults table embedded in the program
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDefaultsSource;

impl DefaultsSource for BuiltinDefaultsSource {
    fn load(&self) -> Result<DefaultsTable> {
        DefaultsTable::from_records(read_csv_from_str(BUILTIN_DEFAULTS)?)
    }
}

/// A defaults table read from a CSV file
#[derive(Debug, Clone)]
pub struct CsvDefaultsSource {
    file_path: PathBuf,
}

impl CsvDefaultsSource {
    /// Create a source for the CSV file at `file_path`
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

impl DefaultsSource for CsvDefaultsSource {
    fn load(&self) -> Result<DefaultsTable> {
        DefaultsTable::from_records(read_csv(&self.file_path)?)
    }
}

/// Loads a defaults table on first use and keeps it for the lifetime of the cache
pub struct DefaultsCache<S> {
    source: S,
    table: OnceCell<DefaultsTable>,
}

impl<S: DefaultsSource> DefaultsCache<S> {
    /// Create a cache which will read from `source` when first used
    pub fn new(source: S) -> Self {
        Self {
            source,
            table: OnceCell::new(),
        }
    }

    /// Get the defaults table, loading it if necessary
    pub fn table(&self) -> Result<&DefaultsTable> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let table = self.source.load()?;
        Ok(self.table.get_or_init(|| table))
    }

    /// Look up the defaults for the given technology and vehicle class.
    ///
    /// A failed lookup returns a [`DefaultsError`], which can be recovered from the returned
    /// error with `downcast_ref`.
    pub fn get_default(
        &self,
        technology: Technology,
        vehicle_class: &str,
    ) -> Result<&VehicleDefaults> {
        Ok(self.table()?.get(technology, vehicle_class)?)
    }
}

impl DefaultsCache<BuiltinDefaultsSource> {
    /// A cache for the defaults table embedded in the program
    pub fn builtin() -> Self {
        Self::new(BuiltinDefaultsSource)
    }
}
