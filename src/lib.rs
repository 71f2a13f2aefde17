/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/


#![deny(missing_docs)]

//! Estimates the annual energy yield of fixed, grid-tied PV systems.
//!
//! For each site, a year of weather is pushed through a chain of models:
//! solar position, extraterrestrial irradiance and air mass, irradiance on
//! the plane of the array, cell temperature, DC power and AC power. The AC
//! power is then integrated into energy, and the results of all sites are
//! collected in the order they were given.
//!
//! ```text
//! weather -> solar position -> air mass -> POA -> cell temp -> DC -> AC -> energy
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// Errors of a run, and of each site
pub mod error;
pub use error::{Error, SiteError, Stage};

/// Where a system is installed
pub mod site;
pub use site::Site;

/// A PV system installed at a site
pub mod site_system;
pub use site_system::{SimulationOptions, SiteSystem};

/// The chain of models applied to a weather series
pub mod pipeline;
pub use pipeline::SiteSimulation;

/// Integration of power into energy, and collection of results
pub mod energy;
pub use energy::{EnergyResult, EnergyResults, IntegrationMethod};

/// Runs several sites
pub mod run_simulation;
pub use run_simulation::{run, run_sites, simulate_site, RunReport, WeatherSource};

/// Run configuration files
pub mod config;
pub use config::{
    RunConfig, SiteConfig, SystemConfig, TemperatureModel, TemperaturePreset, WeatherFiles,
};

// Re-exports
pub use irradiance::{PlaneIrradiance, Surface, TranspositionModel};
pub use pvsystem::{
    ArrayTopology, Catalog, CatalogKind, ConfigurationError, DcPower, InverterSpec, LookupError,
    ModuleSpec, NumericDomainError, PvSystem, PvsystCell,
};
pub use solar::{AirMass, AirMassModel, SolarPosition};
pub use weather::{error_msgs, DataQualityError, WeatherSample, WeatherSeries};
