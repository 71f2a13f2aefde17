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


use std::fmt;

use pvsystem::{ConfigurationError, LookupError, NumericDomainError};
use weather::DataQualityError;

/// The parts of a site's simulation where things can go wrong.
///
/// Equipment is resolved once for the whole run, so a failed catalog
/// lookup is returned as [`Error::Lookup`] and has no stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking the site and system parameters
    Configuration,
    /// Loading and checking the weather
    Weather,
    /// Calculating the position of the sun
    SolarPosition,
    /// Calculating extraterrestrial irradiance and air mass
    AirMass,
    /// Transposing irradiance onto the plane of the array
    PlaneOfArray,
    /// Calculating the cell temperature
    CellTemperature,
    /// Calculating the DC power
    DcPower,
    /// Calculating the AC power
    AcPower,
    /// Integrating the AC power
    Energy,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configuration => "configuration",
            Stage::Weather => "weather",
            Stage::SolarPosition => "solar position",
            Stage::AirMass => "air mass",
            Stage::PlaneOfArray => "plane of array irradiance",
            Stage::CellTemperature => "cell temperature",
            Stage::DcPower => "DC power",
            Stage::AcPower => "AC power",
            Stage::Energy => "energy",
        };
        write!(f, "{}", name)
    }
}

/// Anything that can go wrong in a run
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid site or system parameters
    Configuration(ConfigurationError),
    /// Equipment could not be resolved
    Lookup(LookupError),
    /// Bad weather data
    DataQuality(DataQualityError),
    /// A model went out of its numeric domain
    NumericDomain(NumericDomainError),
    /// An input file could not be read or parsed
    Input(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Configuration(e) => write!(f, "configuration error: {}", e),
            Error::Lookup(e) => write!(f, "lookup error: {}", e),
            Error::DataQuality(e) => write!(f, "data quality error: {}", e),
            Error::NumericDomain(e) => write!(f, "numeric domain error: {}", e),
            Error::Input(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Configuration(e) => Some(e),
            Error::Lookup(e) => Some(e),
            Error::DataQuality(e) => Some(e),
            Error::NumericDomain(e) => Some(e),
            Error::Input(_) => None,
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(e: ConfigurationError) -> Self {
        Error::Configuration(e)
    }
}

impl From<LookupError> for Error {
    fn from(e: LookupError) -> Self {
        Error::Lookup(e)
    }
}

impl From<DataQualityError> for Error {
    fn from(e: DataQualityError) -> Self {
        Error::DataQuality(e)
    }
}

impl From<NumericDomainError> for Error {
    fn from(e: NumericDomainError) -> Self {
        Error::NumericDomain(e)
    }
}

/// An error that stopped the simulation of one site
#[derive(Debug, Clone, PartialEq)]
pub struct SiteError {
    /// The name of the site
    pub site: String,
    /// Where it happened
    pub stage: Stage,
    /// What happened
    pub error: Error,
}

impl SiteError {
    /// Tags an error with the site and stage it comes from
    pub fn new<E: Into<Error>>(site: &str, stage: Stage, error: E) -> Self {
        Self {
            site: site.to_string(),
            stage,
            error: error.into(),
        }
    }
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "site '{}' failed at stage '{}': {}",
            self.site, self.stage, self.error
        )
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
