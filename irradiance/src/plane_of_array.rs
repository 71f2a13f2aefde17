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


use crate::{Float, Surface, TranspositionModel};
use serde::{Deserialize, Serialize};
use solar::SolarPosition;

/// Albedo used when none is given. Typical of grass and open country.
pub const DEFAULT_ALBEDO: Float = 0.25;

/// Irradiance on the plane of the array, in W/m2.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneIrradiance {
    /// Angle of incidence, in degrees
    pub aoi: Float,

    /// Total irradiance on the plane (direct + diffuse)
    pub poa_global: Float,

    /// Beam irradiance on the plane
    pub poa_direct: Float,

    /// Diffuse irradiance on the plane (sky + ground)
    pub poa_diffuse: Float,

    /// Diffuse irradiance coming from the sky
    pub poa_sky_diffuse: Float,

    /// Irradiance reflected by the ground
    pub poa_ground_diffuse: Float,
}

/// Irradiance reflected by the ground onto a surface with a certain
/// tilt (in degrees), assuming the ground is an infinite, isotropic
/// reflector.
pub fn ground_diffuse(tilt: Float, ghi: Float, albedo: Float) -> Float {
    (ghi * albedo * (1. - tilt.to_radians().cos()) / 2.).max(0.)
}

/// Transposes horizontal irradiance onto a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneOfArray {
    /// The receiving surface
    pub surface: Surface,

    /// The model used for the sky diffuse irradiance
    pub model: TranspositionModel,

    /// Reflectance of the ground (0 to 1)
    pub albedo: Float,
}

impl PlaneOfArray {
    /// Builds a new transposition for a surface using the default model
    /// and albedo
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            model: TranspositionModel::default(),
            albedo: DEFAULT_ALBEDO,
        }
    }

    /// Calculates the irradiance on the plane of array.
    ///
    /// `dni_extra` is the extraterrestrial normal irradiance. Every
    /// component is zero when the sun is below the horizon, and the beam
    /// component is also zero when the sun is behind the surface.
    pub fn irradiance(
        &self,
        position: &SolarPosition,
        dni: Float,
        ghi: Float,
        dhi: Float,
        dni_extra: Float,
    ) -> PlaneIrradiance {
        let projection = self.surface.aoi_projection(position);
        let aoi = projection.acos().to_degrees();

        if !position.is_sun_up() {
            return PlaneIrradiance {
                aoi,
                ..PlaneIrradiance::default()
            };
        }

        let poa_direct = (dni * projection).max(0.);

        let sky = self
            .model
            .sky_diffuse(&self.surface, position, dni, dhi, dni_extra)
            .total();
        let ground = ground_diffuse(self.surface.tilt, ghi, self.albedo);
        let poa_diffuse = sky + ground;

        PlaneIrradiance {
            aoi,
            poa_global: poa_direct + poa_diffuse,
            poa_direct,
            poa_diffuse,
            poa_sky_diffuse: sky,
            poa_ground_diffuse: ground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validate::assert_close;

    fn position(zenith: Float, azimuth: Float) -> SolarPosition {
        SolarPosition {
            zenith,
            apparent_zenith: zenith,
            apparent_elevation: 90. - zenith,
            azimuth,
        }
    }

    const DNI_EXTRA: Float = 1400.;

    #[test]
    fn test_ground_diffuse() {
        assert_eq!(ground_diffuse(0., 800., 0.25), 0.);
        assert_close!(100., ground_diffuse(90., 800., 0.25), 1e-6);
        assert_eq!(ground_diffuse(30., 0., 0.25), 0.);
    }

    #[test]
    fn test_horizontal_matches_ghi() {
        let poa = PlaneOfArray::new(Surface {
            tilt: 0.,
            azimuth: 180.,
        });
        let zenith: Float = 35.;
        let dni = 750.;
        let dhi = 110.;
        let ghi = dni * zenith.to_radians().cos() + dhi;
        let irr = poa.irradiance(&position(zenith, 160.), dni, ghi, dhi, DNI_EXTRA);
        assert_close!(ghi, irr.poa_global, 1e-6);
        assert_eq!(irr.poa_ground_diffuse, 0.);
    }

    #[test]
    fn test_components_add_up() {
        for model in [TranspositionModel::Isotropic, TranspositionModel::HayDavies] {
            let poa = PlaneOfArray {
                surface: Surface {
                    tilt: 25.,
                    azimuth: 180.,
                },
                model,
                albedo: 0.2,
            };
            for (z, a) in [(10., 90.), (45., 180.), (70., 250.), (88., 300.), (120., 0.)] {
                let irr = poa.irradiance(&position(z, a), 600., 700., 150., DNI_EXTRA);
                assert!(
                    (irr.poa_global - (irr.poa_direct + irr.poa_diffuse)).abs() < 1e-9,
                    "{:?}",
                    irr
                );
                assert!(
                    (irr.poa_diffuse - (irr.poa_sky_diffuse + irr.poa_ground_diffuse)).abs()
                        < 1e-9
                );
                assert!(irr.poa_direct >= 0. && irr.poa_diffuse >= 0.);
            }
        }
    }

    #[test]
    fn test_zero_irradiance() {
        let poa = PlaneOfArray::new(Surface {
            tilt: 3.6,
            azimuth: 180.,
        });
        for (z, a) in [(20., 90.), (100., 180.), (170., 0.)] {
            let irr = poa.irradiance(&position(z, a), 0., 0., 0., DNI_EXTRA);
            assert_eq!(irr.poa_global, 0.);
            assert_eq!(irr.poa_direct, 0.);
            assert_eq!(irr.poa_diffuse, 0.);
            assert!(irr.aoi.is_finite());
        }
    }

    #[test]
    fn test_no_beam_below_horizon() {
        // Inconsistent data (beam radiation at night) does not leak into the plane
        let poa = PlaneOfArray::new(Surface {
            tilt: 30.,
            azimuth: 180.,
        });
        let irr = poa.irradiance(&position(100., 180.), 300., 0., 0., DNI_EXTRA);
        assert_eq!(irr.poa_direct, 0.);
        assert_eq!(irr.poa_global, 0.);
    }

    #[test]
    fn test_diffuse_is_zero_at_night() {
        // Twilight diffuse light in the data is not transposed
        for model in [TranspositionModel::HayDavies, TranspositionModel::Isotropic] {
            let poa = PlaneOfArray {
                surface: Surface {
                    tilt: 30.,
                    azimuth: 180.,
                },
                model,
                albedo: 0.25,
            };
            let irr = poa.irradiance(&position(95., 90.), 0., 30., 30., DNI_EXTRA);
            assert_eq!(irr.poa_sky_diffuse, 0.);
            assert_eq!(irr.poa_ground_diffuse, 0.);
            assert_eq!(irr.poa_diffuse, 0.);
            assert_eq!(irr.poa_global, 0.);
            assert!(irr.aoi.is_finite());
        }

        // Same data with the sun up does reach the plane
        let poa = PlaneOfArray::new(Surface {
            tilt: 30.,
            azimuth: 180.,
        });
        let irr = poa.irradiance(&position(85., 90.), 0., 30., 30., DNI_EXTRA);
        assert!(irr.poa_global > 0.);
    }
}
