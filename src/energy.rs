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


use crate::Float;
use pvsystem::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Ways of turning a power series into energy
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    /// Each sample holds for a whole interval
    #[default]
    Rectangular,

    /// Power changes linearly between samples
    Trapezoidal,
}

impl IntegrationMethod {
    /// Integrates power (W) sampled every `interval_hours` into
    /// energy (Wh)
    pub fn integrate(&self, power: &[Float], interval_hours: Float) -> Float {
        match self {
            Self::Rectangular => power.iter().sum::<Float>() * interval_hours,
            Self::Trapezoidal => {
                power
                    .windows(2)
                    .map(|w| (w[0] + w[1]) / 2.)
                    .sum::<Float>()
                    * interval_hours
            }
        }
    }
}

/// The energy produced at a site over the simulated period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    /// The name of the site
    pub site: String,

    /// Energy, in Wh
    pub annual_energy_wh: Float,
}

/// The results of a run, by site, in the order the sites were given
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct EnergyResults {
    results: Vec<EnergyResult>,
}

impl EnergyResults {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a result. Sites cannot be added twice.
    pub fn insert(&mut self, result: EnergyResult) -> Result<(), ConfigurationError> {
        if self.get(&result.site).is_some() {
            return Err(ConfigurationError::DuplicateSite(result.site));
        }
        self.results.push(result);
        Ok(())
    }

    /// The energy of a site, in Wh
    pub fn get(&self, site: &str) -> Option<Float> {
        self.results
            .iter()
            .find(|r| r.site == site)
            .map(|r| r.annual_energy_wh)
    }

    /// Iterates over the results in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, EnergyResult> {
        self.results.iter()
    }

    /// Number of sites
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Checks whether there are no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Energy of all sites together, in Wh
    pub fn total(&self) -> Float {
        self.results.iter().map(|r| r.annual_energy_wh).sum()
    }

    /// Writes the results as a `site,annual_energy_wh` table
    pub fn write<T: std::io::Write>(&self, mut out: T) -> std::io::Result<()> {
        writeln!(out, "site,annual_energy_wh")?;
        for r in self.results.iter() {
            writeln!(out, "{},{}", r.site, r.annual_energy_wh)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a EnergyResults {
    type Item = &'a EnergyResult;
    type IntoIter = std::slice::Iter<'a, EnergyResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
