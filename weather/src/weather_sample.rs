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
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The weather conditions at a specific moment.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// The moment this sample represents, in UTC
    pub timestamp: DateTime<Utc>,

    /// Ambient air temperature, in C
    pub temp_air: Float,

    /// Wind speed, in m/s
    pub wind_speed: Float,

    /// Direct normal irradiance, in W/m2
    pub dni: Float,

    /// Global horizontal irradiance, in W/m2
    pub ghi: Float,

    /// Diffuse horizontal irradiance, in W/m2
    pub dhi: Float,
}

impl WeatherSample {
    /// Returns the name of the first field that is NaN or infinite, if any
    pub(crate) fn first_non_finite_field(&self) -> Option<&'static str> {
        [
            ("temp_air", self.temp_air),
            ("wind_speed", self.wind_speed),
            ("dni", self.dni),
            ("ghi", self.ghi),
            ("dhi", self.dhi),
        ]
        .iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| *name)
    }

    /// Clamps irradiance and wind speed to be non-negative. Returns
    /// the number of values that were changed.
    pub(crate) fn clamp_to_physical_range(&mut self) -> usize {
        let mut count = 0;
        for v in [
            &mut self.wind_speed,
            &mut self.dni,
            &mut self.ghi,
            &mut self.dhi,
        ] {
            if *v < 0.0 {
                *v = 0.0;
                count += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_finite_field() {
        let mut s = WeatherSample::default();
        assert_eq!(s.first_non_finite_field(), None);
        s.wind_speed = Float::INFINITY;
        s.dhi = Float::NAN;
        assert_eq!(s.first_non_finite_field(), Some("wind_speed"));
    }

    #[test]
    fn test_clamp_leaves_temperature() {
        let mut s = WeatherSample {
            temp_air: -12.,
            dhi: -4.,
            ..WeatherSample::default()
        };
        assert_eq!(s.clamp_to_physical_range(), 1);
        assert_eq!(s.temp_air, -12.);
        assert_eq!(s.dhi, 0.);
    }
}
