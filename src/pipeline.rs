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


use chrono::{DateTime, Utc};
use irradiance::PlaneIrradiance;
use pvsystem::{DcPower, NumericDomainError};
use solar::{day_of_year, AirMass, SolarPosition};
use weather::WeatherSeries;

use crate::{EnergyResult, Float, SiteError, SiteSystem, Stage};

/// Everything calculated for a site. Every series has one element
/// per weather sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSimulation {
    /// The timestamps of the weather samples
    pub timestamps: Vec<DateTime<Utc>>,

    /// Position of the sun
    pub solar_position: Vec<SolarPosition>,

    /// Extraterrestrial irradiance and air mass
    pub air_mass: Vec<AirMass>,

    /// Irradiance on the plane of the array
    pub plane_irradiance: Vec<PlaneIrradiance>,

    /// Cell temperature, in C
    pub cell_temperature: Vec<Float>,

    /// DC power
    pub dc_power: Vec<DcPower>,

    /// AC power of the whole array, in W
    pub ac_power: Vec<Float>,

    /// Integrated energy
    pub energy: EnergyResult,
}

impl SiteSystem<'_> {
    fn name(&self) -> &str {
        self.site.name()
    }

    /// Fails if `value` is NaN or infinite
    fn check(
        &self,
        stage: Stage,
        quantity: &'static str,
        index: usize,
        value: Float,
    ) -> Result<Float, SiteError> {
        NumericDomainError::check(quantity, index, value)
            .map_err(|e| SiteError::new(self.name(), stage, e))
    }

    /// Position of the sun for every sample
    fn solar_position(
        &self,
        weather: &WeatherSeries,
    ) -> Result<Vec<SolarPosition>, SiteError> {
        weather
            .data()
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let p = self
                    .solar
                    .position(sample.timestamp, self.pressure, sample.temp_air);
                self.check(Stage::SolarPosition, "apparent zenith", i, p.apparent_zenith)?;
                self.check(Stage::SolarPosition, "azimuth", i, p.azimuth)?;
                Ok(p)
            })
            .collect()
    }

    /// Extraterrestrial irradiance and air mass for every sample
    fn air_mass(
        &self,
        weather: &WeatherSeries,
        positions: &[SolarPosition],
    ) -> Result<Vec<AirMass>, SiteError> {
        weather
            .data()
            .iter()
            .zip(positions.iter())
            .enumerate()
            .map(|(i, (sample, p))| {
                let n = day_of_year(sample.timestamp);
                let am = AirMass::new(self.air_mass_model, n, p.apparent_zenith, self.pressure);
                let dni_extra = am.dni_extra;
                self.check(Stage::AirMass, "extraterrestrial irradiance", i, dni_extra)?;
                Ok(am)
            })
            .collect()
    }

    /// Irradiance on the plane of the array for every sample
    fn plane_irradiance(
        &self,
        weather: &WeatherSeries,
        positions: &[SolarPosition],
        air_mass: &[AirMass],
    ) -> Result<Vec<PlaneIrradiance>, SiteError> {
        weather
            .data()
            .iter()
            .zip(positions.iter().zip(air_mass.iter()))
            .enumerate()
            .map(|(i, (sample, (p, am)))| {
                let poa = self.plane_of_array.irradiance(
                    p,
                    sample.dni,
                    sample.ghi,
                    sample.dhi,
                    am.dni_extra,
                );
                self.check(Stage::PlaneOfArray, "POA global irradiance", i, poa.poa_global)?;
                self.check(Stage::PlaneOfArray, "angle of incidence", i, poa.aoi)?;
                Ok(poa)
            })
            .collect()
    }

    /// Cell temperature for every sample
    fn cell_temperature(
        &self,
        weather: &WeatherSeries,
        poa: &[PlaneIrradiance],
    ) -> Result<Vec<Float>, SiteError> {
        weather
            .data()
            .iter()
            .zip(poa.iter())
            .enumerate()
            .map(|(i, (sample, poa))| {
                let t = self
                    .system
                    .cell_temperature(poa.poa_global, sample.temp_air, sample.wind_speed)
                    .map_err(|e| SiteError::new(self.name(), Stage::CellTemperature, e.at(i)))?;
                self.check(Stage::CellTemperature, "cell temperature", i, t)
            })
            .collect()
    }

    /// DC power for every sample
    fn dc_power(
        &self,
        poa: &[PlaneIrradiance],
        cell_temperature: &[Float],
    ) -> Result<Vec<DcPower>, SiteError> {
        poa.iter()
            .zip(cell_temperature.iter())
            .enumerate()
            .map(|(i, (poa, t))| {
                let dc = self.system.dc_power(poa.poa_global, *t);
                self.check(Stage::DcPower, "DC power", i, dc.array)?;
                Ok(dc)
            })
            .collect()
    }

    /// AC power of the array for every sample
    fn ac_power(&self, dc: &[DcPower]) -> Result<Vec<Float>, SiteError> {
        dc.iter()
            .enumerate()
            .map(|(i, dc)| {
                let ac = self.system.ac_power(dc);
                self.check(Stage::AcPower, "AC power", i, ac)
            })
            .collect()
    }

    /// Integrates the AC power into energy
    fn energy(&self, weather: &WeatherSeries, ac: &[Float]) -> Result<EnergyResult, SiteError> {
        let e = self.integration.integrate(ac, weather.interval_hours());
        if !e.is_finite() || e < 0. {
            return Err(SiteError::new(
                self.name(),
                Stage::Energy,
                NumericDomainError::new("annual energy", e),
            ));
        }
        Ok(EnergyResult {
            site: self.name().to_string(),
            annual_energy_wh: e,
        })
    }

    /// Pushes a weather series through every model. Every stage takes
    /// the series produced by the previous ones, so they stay aligned
    /// with the weather samples.
    pub fn simulate(&self, weather: &WeatherSeries) -> Result<SiteSimulation, SiteError> {
        let solar_position = self.solar_position(weather)?;
        let air_mass = self.air_mass(weather, &solar_position)?;
        let plane_irradiance = self.plane_irradiance(weather, &solar_position, &air_mass)?;
        let cell_temperature = self.cell_temperature(weather, &plane_irradiance)?;
        let dc_power = self.dc_power(&plane_irradiance, &cell_temperature)?;
        let ac_power = self.ac_power(&dc_power)?;
        let energy = self.energy(weather, &ac_power)?;

        Ok(SiteSimulation {
            timestamps: weather.timestamps().collect(),
            solar_position,
            air_mass,
            plane_irradiance,
            cell_temperature,
            dc_power,
            ac_power,
            energy,
        })
    }
}
