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
use irradiance::Surface;
use pvsystem::ConfigurationError;
use serde::Serialize;

/// Azimuth of the modules when none is given (i.e., facing South)
pub const DEFAULT_SURFACE_AZIMUTH: Float = 180.;

/// A place where a PV system is installed, and the orientation of
/// its modules.
///
/// Sites are checked when built and cannot be modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    name: String,
    latitude: Float,
    longitude: Float,
    altitude: Float,
    timezone: Float,
    surface_tilt: Float,
    surface_azimuth: Float,
}

impl Site {
    /// Creates a site with modules tilted by the absolute value of the
    /// latitude and facing South.
    ///
    /// Latitude and longitude are in degrees (North and East are
    /// positive), altitude in meters and the timezone is the offset
    /// from UTC in hours.
    pub fn new(
        name: &str,
        latitude: Float,
        longitude: Float,
        altitude: Float,
        timezone: Float,
    ) -> Result<Self, ConfigurationError> {
        ConfigurationError::check_range("latitude", latitude, -90., 90.)?;
        ConfigurationError::check_range("longitude", longitude, -180., 180.)?;
        // The barometric formula breaks down long before 44 km
        ConfigurationError::check_range("altitude", altitude, -500., 9000.)?;
        ConfigurationError::check_range("timezone", timezone, -12., 14.)?;

        Ok(Self {
            name: name.to_string(),
            latitude,
            longitude,
            altitude,
            timezone,
            surface_tilt: latitude.abs(),
            surface_azimuth: DEFAULT_SURFACE_AZIMUTH,
        })
    }

    /// Sets the tilt of the modules, in degrees from the horizontal
    pub fn with_tilt(mut self, tilt: Float) -> Result<Self, ConfigurationError> {
        ConfigurationError::check_range("surface_tilt", tilt, 0., 180.)?;
        self.surface_tilt = tilt;
        Ok(self)
    }

    /// Sets the azimuth of the modules, in degrees clockwise from North
    pub fn with_azimuth(mut self, azimuth: Float) -> Result<Self, ConfigurationError> {
        if !(azimuth.is_finite() && (0. ..360.).contains(&azimuth)) {
            return Err(ConfigurationError::OutOfRange {
                field: "surface_azimuth",
                value: azimuth,
                min: 0.,
                max: 360.,
            });
        }
        self.surface_azimuth = azimuth;
        Ok(self)
    }

    /// The name of the site
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latitude, in degrees
    pub fn latitude(&self) -> Float {
        self.latitude
    }

    /// Longitude, in degrees
    pub fn longitude(&self) -> Float {
        self.longitude
    }

    /// Altitude, in meters
    pub fn altitude(&self) -> Float {
        self.altitude
    }

    /// Offset from UTC, in hours
    pub fn timezone(&self) -> Float {
        self.timezone
    }

    /// Tilt of the modules, in degrees
    pub fn surface_tilt(&self) -> Float {
        self.surface_tilt
    }

    /// Azimuth of the modules, in degrees
    pub fn surface_azimuth(&self) -> Float {
        self.surface_azimuth
    }

    /// The surface of the modules
    pub fn surface(&self) -> Surface {
        Surface {
            tilt: self.surface_tilt,
            azimuth: self.surface_azimuth,
        }
    }

    /// Atmospheric pressure at the site, in Pa
    pub fn pressure(&self) -> Float {
        solar::alt2pres(self.altitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tilt_is_absolute_latitude() {
        let site = Site::new("ZPE Pecém", -3.57168, -38.84797, 26., -3.).unwrap();
        assert_eq!(site.surface_tilt(), 3.57168);
        assert_eq!(site.surface_azimuth(), 180.);

        let site = Site::new("North", 40., 0., 0., 0.).unwrap();
        assert_eq!(site.surface_tilt(), 40.);
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        assert!(Site::new("a", 91., 0., 0., 0.).is_err());
        assert!(Site::new("a", 0., -181., 0., 0.).is_err());
        assert!(Site::new("a", Float::NAN, 0., 0., 0.).is_err());
        assert!(Site::new("a", 0., 0., Float::INFINITY, 0.).is_err());
        assert!(Site::new("a", 0., 0., 0., 15.).is_err());
    }

    #[test]
    fn test_rejects_bad_orientation() {
        let site = Site::new("a", 10., 10., 0., 0.).unwrap();
        assert!(site.clone().with_tilt(-5.).is_err());
        assert!(site.clone().with_tilt(181.).is_err());
        assert!(site.clone().with_azimuth(360.).is_err());
        assert!(site.clone().with_azimuth(-1.).is_err());

        let site = site.with_tilt(25.).unwrap().with_azimuth(0.).unwrap();
        assert_eq!(site.surface().tilt, 25.);
        assert_eq!(site.surface().azimuth, 0.);
    }

    #[test]
    fn test_pressure() {
        let low = Site::new("a", 0., 0., 0., 0.).unwrap();
        let high = Site::new("b", 0., 0., 2000., 0.).unwrap();
        assert!(high.pressure() < low.pressure());
    }
}
