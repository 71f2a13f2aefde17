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

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use pvsystem::{Catalog, ConfigurationError, PvSystem};
use weather::{DataQualityError, WeatherSeries};

use crate::{
    EnergyResult, EnergyResults, Error, RunConfig, SimulationOptions, Site, SiteError,
    SiteSimulation, SiteSystem, Stage,
};

/// Something that provides the weather of a site
pub trait WeatherSource: Sync {
    /// Loads the weather of a site
    fn weather(&self, site: &Site) -> Result<WeatherSeries, DataQualityError>;
}

impl<F> WeatherSource for F
where
    F: Fn(&Site) -> Result<WeatherSeries, DataQualityError> + Sync,
{
    fn weather(&self, site: &Site) -> Result<WeatherSeries, DataQualityError> {
        self(site)
    }
}

/// The outcome of a run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunReport {
    /// Energy of the sites that were simulated, in input order
    pub results: EnergyResults,

    /// The sites that could not be simulated
    pub failures: Vec<SiteError>,
}

impl RunReport {
    /// Checks whether every site was simulated
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Simulates a single site, returning every intermediate series.
///
/// The configuration is checked before the weather is requested
/// from `source`.
pub fn simulate_site<S: WeatherSource + ?Sized>(
    site: &Site,
    system: &PvSystem,
    options: &SimulationOptions,
    source: &S,
) -> Result<SiteSimulation, SiteError> {
    let site_system = SiteSystem::new(site, system, options)
        .map_err(|e| SiteError::new(site.name(), Stage::Configuration, e))?;
    let weather = source
        .weather(site)
        .map_err(|e| SiteError::new(site.name(), Stage::Weather, e))?;
    site_system.simulate(&weather)
}

/// Simulates several sites sharing the same system.
///
/// Problems that affect every site (invalid options, repeated site
/// names) are returned as errors before any weather is read. Problems
/// of a single site are reported in [`RunReport::failures`], and do not
/// stop the other sites. With the `parallel` feature, sites are simulated
/// concurrently; results are always reported in input order.
pub fn run_sites<S: WeatherSource + ?Sized>(
    sites: &[Site],
    system: &PvSystem,
    options: &SimulationOptions,
    source: &S,
) -> Result<RunReport, ConfigurationError> {
    options.validate()?;
    system.temperature_model.validate()?;

    let mut names = HashSet::new();
    for site in sites {
        if !names.insert(site.name()) {
            return Err(ConfigurationError::DuplicateSite(site.name().to_string()));
        }
    }

    let energy = |site: &Site| -> Result<EnergyResult, SiteError> {
        simulate_site(site, system, options, source).map(|sim| sim.energy)
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<EnergyResult, SiteError>> = sites.iter().map(energy).collect();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<EnergyResult, SiteError>> = sites.par_iter().map(energy).collect();

    let mut report = RunReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(result) => report.results.insert(result)?,
            Err(e) => report.failures.push(e),
        }
    }
    Ok(report)
}

/// Runs a configuration.
///
/// The equipment is resolved from the catalogs first; if that fails,
/// nothing is simulated. Sites with invalid parameters are reported as
/// failures and skipped. Failures are listed in the order of the sites
/// in `config`, whatever the stage they failed at.
pub fn run<S: WeatherSource + ?Sized>(
    config: &RunConfig,
    modules: &Catalog,
    inverters: &Catalog,
    source: &S,
) -> Result<RunReport, Error> {
    config.check_site_names()?;
    let system = config.system.build(modules, inverters)?;

    let mut failures = Vec::new();
    let mut sites = Vec::with_capacity(config.sites.len());
    for site in config.sites.iter() {
        match site.to_site() {
            Ok(s) => sites.push(s),
            Err(e) => failures.push(SiteError::new(&site.name, Stage::Configuration, e)),
        }
    }

    let mut report = run_sites(&sites, &system, &config.options, source)?;
    report.failures.append(&mut failures);

    // Names are unique at this point
    let order: HashMap<&str, usize> = config
        .sites
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.as_str(), i))
        .collect();
    report
        .failures
        .sort_by_key(|f| order.get(f.site.as_str()).copied());
    Ok(report)
}
