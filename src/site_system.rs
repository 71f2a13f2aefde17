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


use crate::{Float, IntegrationMethod, Site};
use irradiance::{PlaneOfArray, TranspositionModel, DEFAULT_ALBEDO};
use pvsystem::{ConfigurationError, PvSystem};
use serde::{Deserialize, Serialize};
use solar::{AirMassModel, Solar};

fn default_albedo() -> Float {
    DEFAULT_ALBEDO
}

/// Choices of models, shared by every site of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// How the diffuse irradiance is spread over the plane of the array
    #[serde(default)]
    pub transposition: TranspositionModel,

    /// Reflectance of the ground (0 to 1)
    #[serde(default = "default_albedo")]
    pub albedo: Float,

    /// The relative air mass model
    #[serde(default)]
    pub air_mass_model: AirMassModel,

    /// How AC power is integrated into energy
    #[serde(default)]
    pub integration: IntegrationMethod,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            transposition: TranspositionModel::default(),
            albedo: DEFAULT_ALBEDO,
            air_mass_model: AirMassModel::default(),
            integration: IntegrationMethod::default(),
        }
    }
}

impl SimulationOptions {
    /// Checks the options
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::check_range("albedo", self.albedo, 0., 1.)
    }
}

/// A PV system installed at a specific site: everything needed to
/// simulate that site, except for the weather.
///
/// It is built once per site and never modified; the [`PvSystem`]
/// is borrowed, so all sites share the same equipment.
#[derive(Debug, Clone)]
pub struct SiteSystem<'a> {
    /// The site
    pub site: &'a Site,

    /// The equipment
    pub system: &'a PvSystem,

    /// Calculates the position of the sun at the site
    pub solar: Solar,

    /// Atmospheric pressure at the site, in Pa
    pub pressure: Float,

    /// Transposes irradiance onto the modules
    pub plane_of_array: PlaneOfArray,

    /// The relative air mass model
    pub air_mass_model: AirMassModel,

    /// How AC power is integrated into energy
    pub integration: IntegrationMethod,
}

impl<'a> SiteSystem<'a> {
    /// Puts together a site, a system and the options of a run
    pub fn new(
        site: &'a Site,
        system: &'a PvSystem,
        options: &SimulationOptions,
    ) -> Result<Self, ConfigurationError> {
        options.validate()?;
        system.temperature_model.validate()?;

        let pressure = site.pressure();
        if !pressure.is_finite() {
            return Err(ConfigurationError::OutOfRange {
                field: "altitude",
                value: site.altitude(),
                min: -500.,
                max: 9000.,
            });
        }

        Ok(Self {
            site,
            system,
            solar: Solar::new(site.latitude(), site.longitude()),
            pressure,
            plane_of_array: PlaneOfArray {
                surface: site.surface(),
                model: options.transposition,
                albedo: options.albedo,
            },
            air_mass_model: options.air_mass_model,
            integration: options.integration,
        })
    }
}
