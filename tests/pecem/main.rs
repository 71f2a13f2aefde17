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


use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, TimeZone, Utc};
use pvyield::*;
use validate::assert_close;

const MODULE: &str = "Chint New Energy Technology Co. Ltd. CHSM72M(DG)/F-BH-550";
const INVERTER: &str = "CSI Solar Co - Ltd : CSI-125K-T600GL02-U [600V]";
const MICRO_INVERTER: &str = "Generic Micro 500 [240V]";

fn catalogs() -> (Catalog, Catalog) {
    let modules = Catalog::from_file(CatalogKind::Module, "tests/pecem/modules.csv").unwrap();
    let inverters =
        Catalog::from_file(CatalogKind::Inverter, "tests/pecem/inverters.csv").unwrap();
    (modules, inverters)
}

fn pecem() -> Site {
    Site::new("ZPE Pecém", -3.57168, -38.84797, 26., -3.).unwrap()
}

fn system(inverter: &str, modules_per_string: i64, strings: i64, inverters: i64) -> PvSystem {
    let (module_catalog, inverter_catalog) = catalogs();
    PvSystem::new(
        module_catalog.module(MODULE).unwrap(),
        inverter_catalog.inverter(inverter).unwrap(),
        ArrayTopology::new(modules_per_string, strings, inverters).unwrap(),
        PvsystCell::freestanding(),
    )
    .unwrap()
}

/// 24 hours: dark between 21:00 and 08:00 UTC, sunny otherwise
fn equinox_day() -> WeatherSeries {
    weather::reader::from_file("tests/pecem/weather.csv").unwrap()
}

fn simulate(site: &Site, system: &PvSystem, weather: &WeatherSeries) -> SiteSimulation {
    SiteSystem::new(site, system, &SimulationOptions::default())
        .unwrap()
        .simulate(weather)
        .unwrap()
}

#[test]
fn night_and_day() {
    let site = pecem();
    let system = system(MICRO_INVERTER, 1, 1, 1);
    assert_eq!(system.module.gamma_pdc, -0.0034);

    let weather = equinox_day();
    let sim = simulate(&site, &system, &weather);

    let mut illuminated = 0.;
    for (i, sample) in weather.data().iter().enumerate() {
        if sample.ghi == 0. {
            assert_eq!(sim.ac_power[i], 0., "AC at night, index {}", i);
            assert_eq!(sim.dc_power[i].array, 0.);
        } else {
            assert!(sim.solar_position[i].is_sun_up(), "sun down at index {}", i);
            assert!(sim.ac_power[i] > 0., "no AC at index {}", i);
            illuminated += sim.ac_power[i];
        }
    }
    assert_close!(illuminated, sim.energy.annual_energy_wh, 1e-9);
    assert!(sim.energy.annual_energy_wh > 0.);
}

#[test]
fn poa_components_add_up() {
    let site = pecem();
    let system = system(INVERTER, 35, 10, 10);
    let sim = simulate(&site, &system, &equinox_day());
    for poa in sim.plane_irradiance.iter() {
        assert!((poa.poa_global - (poa.poa_direct + poa.poa_diffuse)).abs() < 1e-9);
        assert!(
            (poa.poa_diffuse - (poa.poa_sky_diffuse + poa.poa_ground_diffuse)).abs() < 1e-9
        );
    }
}

#[test]
fn darkness_produces_nothing() {
    let site = pecem();
    let system = system(INVERTER, 35, 10, 10);
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let data = (0..48)
        .map(|i| WeatherSample {
            timestamp: start + Duration::hours(i),
            temp_air: 24. + (i % 7) as Float,
            wind_speed: 2.,
            dni: 0.,
            ghi: 0.,
            dhi: 0.,
        })
        .collect();
    let weather = WeatherSeries::new(data).unwrap();
    let sim = simulate(&site, &system, &weather);

    for i in 0..weather.len() {
        assert_eq!(sim.plane_irradiance[i].poa_global, 0.);
        assert_eq!(sim.cell_temperature[i], weather.data()[i].temp_air);
        assert_eq!(sim.dc_power[i].array, 0.);
        assert_eq!(sim.ac_power[i], 0.);
    }
    assert_eq!(sim.energy.annual_energy_wh, 0.);
}

#[test]
fn twilight_diffuse_produces_nothing() {
    // Diffuse light reported before sunrise does not reach the modules
    let site = pecem();
    let system = system(MICRO_INVERTER, 1, 1, 1);
    let start = Utc.with_ymd_and_hms(2023, 3, 21, 6, 0, 0).unwrap();
    let data = (0..3)
        .map(|i| WeatherSample {
            timestamp: start + Duration::hours(i),
            temp_air: 25.,
            wind_speed: 2.,
            dni: 0.,
            ghi: 30.,
            dhi: 30.,
        })
        .collect();
    let weather = WeatherSeries::new(data).unwrap();
    let sim = simulate(&site, &system, &weather);

    for i in 0..weather.len() {
        assert!(sim.solar_position[i].apparent_zenith > 90.);
        assert_eq!(sim.plane_irradiance[i].poa_sky_diffuse, 0.);
        assert_eq!(sim.plane_irradiance[i].poa_ground_diffuse, 0.);
        assert_eq!(sim.plane_irradiance[i].poa_global, 0.);
        assert_eq!(sim.dc_power[i].array, 0.);
        assert_eq!(sim.ac_power[i], 0.);
    }
    assert_eq!(sim.energy.annual_energy_wh, 0.);
}

#[test]
fn dc_scales_with_topology() {
    let site = pecem();
    let weather = equinox_day();
    let one = simulate(&site, &system(INVERTER, 1, 1, 1), &weather);
    let many = simulate(&site, &system(INVERTER, 2, 3, 4), &weather);
    for (a, b) in one.dc_power.iter().zip(many.dc_power.iter()) {
        assert!((b.array - 24. * a.array).abs() < 1e-6);
        assert!((b.per_inverter - 6. * a.per_inverter).abs() < 1e-6);
    }
}

#[test]
fn ac_never_exceeds_the_inverters() {
    let site = pecem();
    let system = system(INVERTER, 35, 10, 10);
    let sim = simulate(&site, &system, &equinox_day());

    let rated = 10. * system.inverter.paco;
    let mut clipped = false;
    let mut last: Option<(Float, Float)> = None;
    for (dc, ac) in sim.dc_power.iter().zip(sim.ac_power.iter()) {
        assert!(*ac <= rated);
        assert!(*ac <= system.max_ac_power() + 1e-6);
        if (*ac - system.max_ac_power()).abs() < 1e-6 {
            clipped = true;
        }
        if let Some((last_dc, last_ac)) = last {
            if dc.array > last_dc {
                assert!(*ac >= last_ac);
            }
        }
        last = Some((dc.array, *ac));
    }
    // About 190 kW of modules per 125 kW inverter
    assert!(clipped);
}

#[test]
fn energy_is_interval_weighted() {
    let site = pecem();
    let system = system(MICRO_INVERTER, 1, 1, 1);
    let start = Utc.with_ymd_and_hms(2023, 3, 21, 0, 0, 0).unwrap();
    let data: Vec<WeatherSample> = (0..48)
        .map(|i| {
            let lit = (18..=41).contains(&i);
            WeatherSample {
                timestamp: start + Duration::minutes(30 * i),
                temp_air: 26.,
                wind_speed: 1.,
                dni: if lit { 650. } else { 0. },
                ghi: if lit { 750. } else { 0. },
                dhi: if lit { 120. } else { 0. },
            }
        })
        .collect();
    let weather = WeatherSeries::new(data).unwrap();
    assert_eq!(weather.interval_hours(), 0.5);

    let sim = simulate(&site, &system, &weather);
    let sum: Float = sim.ac_power.iter().sum();
    assert_close!(sum * 0.5, sim.energy.annual_energy_wh, 1e-9);

    let options = SimulationOptions {
        integration: IntegrationMethod::Trapezoidal,
        ..SimulationOptions::default()
    };
    let trapezoidal = SiteSystem::new(&site, &system, &options)
        .unwrap()
        .simulate(&weather)
        .unwrap();
    let expected: Float = sim
        .ac_power
        .windows(2)
        .map(|w| (w[0] + w[1]) / 2. * 0.5)
        .sum();
    assert!((trapezoidal.energy.annual_energy_wh - expected).abs() < 1e-6);
}

fn config(strings_per_inverter: i64, module: &str) -> RunConfig {
    let json = format!(
        r#"{{
            "system": {{
                "module": "{}",
                "inverter": "{}",
                "modules_per_string": 35,
                "strings_per_inverter": {},
                "inverter_count": 10
            }},
            "sites": [
                {{
                    "name": "ZPE Pecém",
                    "latitude": -3.57168,
                    "longitude": -38.84797,
                    "altitude": 26,
                    "timezone": -3,
                    "weather": "tests/pecem/weather.csv"
                }}
            ]
        }}"#,
        module, INVERTER, strings_per_inverter
    );
    RunConfig::from_json(&json).unwrap()
}

#[test]
fn zero_strings_fail_before_weather() {
    let (modules, inverters) = catalogs();
    let reads = AtomicUsize::new(0);
    let source = |_: &Site| -> Result<WeatherSeries, DataQualityError> {
        reads.fetch_add(1, Ordering::SeqCst);
        Ok(equinox_day())
    };

    match run(&config(0, MODULE), &modules, &inverters, &source) {
        Err(Error::Configuration(ConfigurationError::InvalidTopology { field, value })) => {
            assert_eq!(field, "strings_per_inverter");
            assert_eq!(value, 0);
        }
        other => panic!("expected a configuration error, found {:?}", other),
    }
    assert_eq!(reads.load(Ordering::SeqCst), 0);
}

#[test]
fn unknown_module_fails_before_weather() {
    let (modules, inverters) = catalogs();
    let reads = AtomicUsize::new(0);
    let source = |_: &Site| -> Result<WeatherSeries, DataQualityError> {
        reads.fetch_add(1, Ordering::SeqCst);
        Ok(equinox_day())
    };

    match run(&config(10, "Acme Solar XYZ-999"), &modules, &inverters, &source) {
        Err(Error::Lookup(LookupError::NotFound { catalog, key })) => {
            assert_eq!(catalog, CatalogKind::Module);
            assert_eq!(key, "Acme Solar XYZ-999");
        }
        other => panic!("expected a lookup error, found {:?}", other),
    }
    assert_eq!(reads.load(Ordering::SeqCst), 0);
}

#[test]
fn run_from_files() {
    let config = RunConfig::from_file("tests/pecem/run.json").unwrap();
    let (modules, inverters) = catalogs();
    let report = run(&config, &modules, &inverters, &config.weather_files()).unwrap();

    assert!(report.is_complete(), "{:?}", report.failures);
    let names: Vec<&str> = report.results.iter().map(|r| r.site.as_str()).collect();
    assert_eq!(names, vec!["ZPE Pecém", "Fortaleza"]);

    let pecem = report.results.get("ZPE Pecém").unwrap();
    let fortaleza = report.results.get("Fortaleza").unwrap();
    assert!(pecem > 0.);
    assert!(fortaleza > 0.);
    // 12 hours, never above the rating of the 10 inverters
    assert!(pecem < 12. * 10. * 125000.);

    let mut out: Vec<u8> = Vec::new();
    report.results.write(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("site,annual_energy_wh\nZPE Pecém,"));
}

#[test]
fn typical_year_from_pvgis() {
    // PVGIS puts together months of different years
    let mut config = RunConfig::from_file("tests/pecem/run.json").unwrap();
    config.sites[1].weather = "tests/pecem/tmy.csv".into();
    let (modules, inverters) = catalogs();
    let report = run(&config, &modules, &inverters, &config.weather_files()).unwrap();
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].site, "Fortaleza");
    assert_eq!(report.failures[0].stage, Stage::Weather);

    config.sites[1].weather_year = Some(2023);
    let report = run(&config, &modules, &inverters, &config.weather_files()).unwrap();
    assert!(report.is_complete(), "{:?}", report.failures);
    assert!(report.results.get("Fortaleza").unwrap() > 0.);
}

#[test]
fn bad_site_does_not_stop_the_others() {
    let mut config = RunConfig::from_file("tests/pecem/run.json").unwrap();
    config.sites[1].surface_tilt = Some(-10.);
    let (modules, inverters) = catalogs();
    let report = run(&config, &modules, &inverters, &config.weather_files()).unwrap();

    assert_eq!(report.results.len(), 1);
    assert!(report.results.get("ZPE Pecém").is_some());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].site, "Fortaleza");
    assert_eq!(report.failures[0].stage, Stage::Configuration);
}

#[test]
fn failures_follow_site_order() {
    let mut config = RunConfig::from_file("tests/pecem/run.json").unwrap();
    config.sites[0].weather = "tests/pecem/missing.csv".into();
    config.sites[1].surface_tilt = Some(-10.);
    let (modules, inverters) = catalogs();
    let report = run(&config, &modules, &inverters, &config.weather_files()).unwrap();

    assert!(report.results.is_empty());
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].site, "ZPE Pecém");
    assert_eq!(report.failures[0].stage, Stage::Weather);
    assert_eq!(report.failures[1].site, "Fortaleza");
    assert_eq!(report.failures[1].stage, Stage::Configuration);
}
