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

//! Solar position calculations. Based on Duffie and Beckman's excellent book.
//!
//! Everything is in international units. Timestamps are in UTC, and they are
//! transformed into solar time based on the longitude of the site and the
//! equation of time. Inputs and outputs of the public API are in degrees;
//! radians are used internally.
//!
//! Solar azimuth is measured clockwise from North (i.e., East is 90 degrees,
//! South is 180 and West is 270). Latitude is positive to the North and
//! Longitude is positive to the East.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Pressure, air mass and extraterrestrial radiation
pub mod atmosphere;
pub use atmosphere::{
    absolute_air_mass, alt2pres, extraterrestrial_normal_irradiance, refraction_correction,
    AirMass, AirMassModel, MAX_AIR_MASS, SOLAR_CONSTANT, STANDARD_PRESSURE,
};

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

#[cfg(feature = "float")]
const PI: Float = std::f32::consts::PI;

#[cfg(not(feature = "float"))]
const PI: Float = std::f64::consts::PI;

/// Transforms a timestamp into the (fractional) day of the year. January 1st
/// at 00:00 is `1.0`, and January 1st at 12:00 is `1.5`.
pub fn day_of_year(timestamp: DateTime<Utc>) -> Float {
    let seconds = timestamp.num_seconds_from_midnight() as Float;
    timestamp.ordinal() as Float + seconds / 86400.
}

/// Equation 1.4.2 in the Book.
///
/// n should be in solar time, but this variable does not change daily so
/// it probably does not matter... let's just treat it as Float
#[inline(always)]
pub(crate) fn b(n: Float) -> Float {
    (n - 1.0) * 2.0 * PI / 365.0
}

/// The position of the sun in the sky at a certain moment
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    /// Geometric zenith, in degrees (0 to 180)
    pub zenith: Float,

    /// Zenith corrected by atmospheric refraction, in degrees (0 to 180)
    pub apparent_zenith: Float,

    /// Elevation corrected by atmospheric refraction, in degrees
    pub apparent_elevation: Float,

    /// Azimuth, in degrees, clockwise from North (0 to 360)
    pub azimuth: Float,
}

impl SolarPosition {
    /// Checks whether the sun is above the horizon
    pub fn is_sun_up(&self) -> bool {
        self.apparent_zenith < 90.
    }
}

/// Calculates the position of the sun for a specific location
#[derive(Clone, Copy, Debug)]
pub struct Solar {
    /// Latitude in Radians. South is negative, North is positive.
    latitude: Float,

    /// Longitude in Radians. West is negative, East is positive.
    longitude: Float,
}

impl Solar {
    /// Builds a Solar object from a Latitude and a Longitude (in degrees).
    pub fn new(latitude: Float, longitude: Float) -> Self {
        Self {
            latitude: latitude.to_radians(),
            longitude: longitude.to_radians(),
        }
    }

    /// Returns the difference between the solar and the UTC time in minutes
    pub fn solar_utc_time_difference(&self, n: Float) -> Float {
        4.0 * self.longitude.to_degrees() + equation_of_time(n)
    }

    /// Transforms a day of the year in UTC into solar time
    pub fn solar_time(&self, n: Float) -> Float {
        let delta_minutes = self.solar_utc_time_difference(n);
        // the number of minutes divided by the number of minutes in a day
        n + delta_minutes / 24. / 60.
    }

    /// Returns the hour angle in Radians, based on a day of the
    /// year in solar time
    pub fn hour_angle(&self, solar_n: Float) -> Float {
        // Remove the day (keep the hour). Multiply by 24 hours
        let solar_hour = 24. * (solar_n % 1.);

        // 15 degrees per hour, zero at noon
        ((solar_hour - 12.) * 15.).to_radians()
    }

    /// Geometric zenith and azimuth (in degrees) for a day of
    /// the year in solar time.
    pub fn geometric_position(&self, solar_n: Float) -> (Float, Float) {
        let cos_phi = self.latitude.cos();
        let sin_phi = self.latitude.sin();

        let delta = declination(solar_n);
        let omega = self.hour_angle(solar_n);

        // Equation 1.6.5, for Zenith
        let cos_zenith =
            (cos_phi * delta.cos() * omega.cos() + sin_phi * delta.sin()).clamp(-1., 1.);
        let zenith = cos_zenith.acos().to_degrees();

        // Azimuth, from North. Equivalent to equation 1.6.6 plus 180 degrees.
        let azimuth = omega
            .sin()
            .atan2(omega.cos() * sin_phi - delta.tan() * cos_phi)
            .to_degrees()
            + 180.;

        (zenith, azimuth.rem_euclid(360.))
    }

    /// Calculates the position of the sun at a certain moment.
    ///
    /// The pressure (Pa) and the air temperature (C) are used to correct
    /// for atmospheric refraction. Positions are returned also when the sun
    /// is below the horizon (i.e., zenith > 90).
    pub fn position(
        &self,
        timestamp: DateTime<Utc>,
        pressure: Float,
        temp_air: Float,
    ) -> SolarPosition {
        let n = self.solar_time(day_of_year(timestamp));
        let (zenith, azimuth) = self.geometric_position(n);

        let elevation = 90. - zenith;
        let correction = refraction_correction(elevation, pressure, temp_air);

        SolarPosition {
            zenith,
            apparent_zenith: zenith - correction,
            apparent_elevation: elevation + correction,
            azimuth,
        }
    }
}

/// The Equation of Time (in minutes) based on the day of year (can have decimals)
///
/// n should be in solar time, but this variable does not change daily so
/// it probably does not matter... let's just treat it as Float
pub fn equation_of_time(n: Float) -> Float {
    let b = b(n);
    229.2
        * (0.000075 + 0.001868 * b.cos()
            - 0.032077 * b.sin()
            - 0.014615 * (2.0 * b).cos()
            - 0.04089 * (2.0 * b).sin())
}

/// Declination (in Radians), according to Equation 1.6.1B
///
/// n should be in solar time, but this variable does not change daily so
/// it probably does not matter... let's just treat it as Float
pub fn declination(n: Float) -> Float {
    let b = b(n);

    0.006918 - 0.399912 * b.cos() + 0.070257 * b.sin() - 0.006758 * (2. * b).cos()
        + 0.000907 * (2. * b).sin()
        - 0.002697 * (3. * b).cos()
        + 0.001480 * (3. * b).sin()
}
