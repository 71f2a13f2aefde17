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


use crate::{b, Float};
use serde::{Deserialize, Serialize};

/// Pressure at sea level, in Pa
pub const STANDARD_PRESSURE: Float = 101325.;

/// Solar constant, in W/m2
pub const SOLAR_CONSTANT: Float = 1366.1;

/// The largest air mass reported. Some models diverge when
/// the sun approaches the horizon, so their results are capped.
pub const MAX_AIR_MASS: Float = 38.0;

/// Estimates the atmospheric pressure (Pa) from the altitude (m) using
/// the standard barometric formula.
pub fn alt2pres(altitude: Float) -> Float {
    100. * ((44331.514 - altitude) / 11880.516).powf(1. / 0.1902632)
}

/// Atmospheric refraction correction (degrees) to be added to the
/// geometric solar elevation, as used by NREL's Solar Position Algorithm.
///
/// Pressure is in Pa and temperature in C. No correction is applied when
/// the sun is completely below the horizon.
pub fn refraction_correction(elevation: Float, pressure: Float, temp_air: Float) -> Float {
    // sun radius + standard refraction at the horizon
    const HORIZON: Float = -(0.26667 + 0.5667);
    if elevation < HORIZON || temp_air <= -273. {
        return 0.0;
    }
    let millibars = pressure / 100.;
    (millibars / 1010.) * (283. / (273. + temp_air)) * 1.02
        / (60. * (elevation + 10.3 / (elevation + 5.11)).to_radians().tan())
}

/// Normal extraterrestrial radiation (Gon), in W/m2
/// Equation 1.4.1b from Duffie and Beckman (Spencer's series)
///
/// n should be in solar time, but this variable does not change daily so
/// it probably does not matter... let's just treat it as Float
pub fn extraterrestrial_normal_irradiance(n: Float) -> Float {
    let b = b(n);
    let aux = 1.000110
        + 0.034221 * b.cos()
        + 0.001280 * b.sin()
        + 0.000719 * (2.0 * b).cos()
        + 0.000077 * (2.0 * b).sin();
    SOLAR_CONSTANT * aux
}

/// Corrects a relative air mass by the site pressure (Pa)
pub fn absolute_air_mass(relative_air_mass: Float, pressure: Float) -> Float {
    relative_air_mass * pressure / STANDARD_PRESSURE
}

/// Empirical models of the relative air mass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirMassModel {
    /// Kasten and Young (1989)
    #[default]
    KastenYoung1989,

    /// Kasten (1966). This is the one used by Radiance.
    Kasten1966,

    /// The secant of the zenith. Diverges at the horizon.
    Simple,
}

impl AirMassModel {
    /// Calculates the relative air mass for an (apparent) zenith in degrees.
    ///
    /// Returns `None` when the sun is below the horizon, and a value
    /// capped at [`MAX_AIR_MASS`] otherwise.
    pub fn relative(&self, zenith: Float) -> Option<Float> {
        if !zenith.is_finite() || !(0. ..=90.).contains(&zenith) {
            return None;
        }
        let cos_zenith = zenith.to_radians().cos();
        let am = match self {
            Self::KastenYoung1989 => {
                1. / (cos_zenith + 0.50572 * (96.07995 - zenith).powf(-1.6364))
            }
            Self::Kasten1966 => 1. / (cos_zenith + 0.15 * (93.885 - zenith).powf(-1.253)),
            Self::Simple => 1. / cos_zenith,
        };
        if am.is_finite() {
            Some(am.min(MAX_AIR_MASS))
        } else {
            Some(MAX_AIR_MASS)
        }
    }
}

/// Extraterrestrial irradiance and air mass at one moment
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirMass {
    /// Extraterrestrial normal irradiance, in W/m2
    pub dni_extra: Float,

    /// Relative air mass. `None` when the sun is below the horizon.
    pub relative: Option<Float>,

    /// Relative air mass corrected by the site pressure
    pub absolute: Option<Float>,
}

impl AirMass {
    /// Evaluates the atmosphere for day of the year `n`, an apparent
    /// zenith (degrees) and a pressure (Pa)
    pub fn new(model: AirMassModel, n: Float, apparent_zenith: Float, pressure: Float) -> Self {
        let relative = model.relative(apparent_zenith);
        Self {
            dni_extra: extraterrestrial_normal_irradiance(n),
            relative,
            absolute: relative.map(|am| absolute_air_mass(am, pressure)),
        }
    }
}
