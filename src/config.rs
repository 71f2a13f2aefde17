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


use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use pvsystem::{ArrayTopology, Catalog, ConfigurationError, PvSystem, PvsystCell};
use serde::{Deserialize, Serialize};
use weather::{DataQualityError, WeatherSeries};

use crate::{Error, Float, SimulationOptions, Site, WeatherSource};

/// Named sets of thermal parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperaturePreset {
    /// Air circulates freely around the modules
    Freestanding,
    /// The back of the modules is insulated
    Insulated,
}

/// The thermal model of the modules, given either as a preset
/// (e.g., `"insulated"`) or as explicit parameters
/// (e.g., `{"u_c": 25, "u_v": 1.2}`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemperatureModel {
    /// One of the presets
    Preset(TemperaturePreset),
    /// Explicit parameters
    Pvsyst(PvsystCell),
}

impl Default for TemperatureModel {
    fn default() -> Self {
        TemperatureModel::Preset(TemperaturePreset::Freestanding)
    }
}

impl TemperatureModel {
    /// The parameters of the model
    pub fn parameters(&self) -> PvsystCell {
        match self {
            TemperatureModel::Preset(TemperaturePreset::Freestanding) => {
                PvsystCell::freestanding()
            }
            TemperatureModel::Preset(TemperaturePreset::Insulated) => PvsystCell::insulated(),
            TemperatureModel::Pvsyst(p) => *p,
        }
    }
}

/// The equipment shared by every site of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Key of the module in the module catalog
    pub module: String,

    /// Key of the inverter in the inverter catalog
    pub inverter: String,

    /// Modules connected in series in each string
    pub modules_per_string: i64,

    /// Strings connected to each inverter
    pub strings_per_inverter: i64,

    /// Number of inverters
    pub inverter_count: i64,

    /// The thermal model of the modules
    #[serde(default)]
    pub temperature_model: TemperatureModel,
}

impl SystemConfig {
    /// Checks the topology and resolves the equipment
    pub fn build(&self, modules: &Catalog, inverters: &Catalog) -> Result<PvSystem, Error> {
        let topology = ArrayTopology::new(
            self.modules_per_string,
            self.strings_per_inverter,
            self.inverter_count,
        )?;
        let module = modules.module(&self.module)?;
        let inverter = inverters.inverter(&self.inverter)?;
        let system = PvSystem::new(
            module,
            inverter,
            topology,
            self.temperature_model.parameters(),
        )?;
        Ok(system)
    }
}

/// A site, as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// The name of the site
    pub name: String,

    /// Latitude, in degrees (North is positive)
    pub latitude: Float,

    /// Longitude, in degrees (East is positive)
    pub longitude: Float,

    /// Altitude, in meters
    #[serde(default)]
    pub altitude: Float,

    /// Offset from UTC, in hours
    #[serde(default)]
    pub timezone: Float,

    /// Tilt of the modules, in degrees. Defaults to the absolute
    /// value of the latitude.
    #[serde(default)]
    pub surface_tilt: Option<Float>,

    /// Azimuth of the modules, in degrees clockwise from North.
    /// Defaults to 180 (i.e., facing South).
    #[serde(default)]
    pub surface_azimuth: Option<Float>,

    /// The weather file of the site
    pub weather: PathBuf,

    /// Year given to every weather sample before the series is checked.
    /// Typical Meteorological Years (e.g., from PVGIS) need it, as their
    /// months are taken from different years.
    #[serde(default)]
    pub weather_year: Option<i32>,
}

impl SiteConfig {
    /// Builds and checks the site
    pub fn to_site(&self) -> Result<Site, ConfigurationError> {
        let mut site = Site::new(
            &self.name,
            self.latitude,
            self.longitude,
            self.altitude,
            self.timezone,
        )?;
        if let Some(tilt) = self.surface_tilt {
            site = site.with_tilt(tilt)?;
        }
        if let Some(azimuth) = self.surface_azimuth {
            site = site.with_azimuth(azimuth)?;
        }
        Ok(site)
    }
}

/// Everything needed to run a set of sites (apart from the catalogs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// The equipment
    pub system: SystemConfig,

    /// Choices of models
    #[serde(default)]
    pub options: SimulationOptions,

    /// The sites, in the order results are reported
    pub sites: Vec<SiteConfig>,
}

impl RunConfig {
    /// Parses a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json)
            .map_err(|e| Error::Input(format!("invalid configuration: {}", e)))
    }

    /// Reads a JSON configuration file. Relative weather paths are
    /// resolved from the directory of the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Input(format!("could not read '{}': {}", path.display(), e)))?;
        let mut config = Self::from_json(&json)?;
        if let Some(dir) = path.parent() {
            for site in config.sites.iter_mut() {
                if site.weather.is_relative() {
                    site.weather = dir.join(&site.weather);
                }
            }
        }
        Ok(config)
    }

    /// Checks that no two sites share a name
    pub fn check_site_names(&self) -> Result<(), ConfigurationError> {
        let mut names = HashSet::new();
        for site in self.sites.iter() {
            if !names.insert(site.name.as_str()) {
                return Err(ConfigurationError::DuplicateSite(site.name.clone()));
            }
        }
        Ok(())
    }

    /// The weather files of the sites
    pub fn weather_files(&self) -> WeatherFiles {
        WeatherFiles {
            files: self
                .sites
                .iter()
                .map(|s| (s.name.clone(), (s.weather.clone(), s.weather_year)))
                .collect(),
        }
    }
}

/// Reads the weather of each site from a CSV file
#[derive(Debug, Default, Clone)]
pub struct WeatherFiles {
    /// Path and, for Typical Meteorological Years, the year to move
    /// the samples into
    files: HashMap<String, (PathBuf, Option<i32>)>,
}

impl WeatherFiles {
    /// Assigns a file to a site
    pub fn insert(&mut self, site: &str, path: PathBuf, weather_year: Option<i32>) {
        self.files.insert(site.to_string(), (path, weather_year));
    }
}

impl WeatherSource for WeatherFiles {
    fn weather(&self, site: &Site) -> Result<WeatherSeries, DataQualityError> {
        let (path, year) = self.files.get(site.name()).ok_or_else(|| {
            DataQualityError::Io(format!("no weather file for site '{}'", site.name()))
        })?;
        match year {
            Some(year) => weather::reader::from_file_tmy(path, *year),
            None => weather::reader::from_file(path),
        }
    }
}
