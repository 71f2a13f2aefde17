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


use crate::{Float, Surface};
use serde::{Deserialize, Serialize};
use solar::SolarPosition;

/// Lowest cosine of the zenith used when projecting the circumsolar
/// irradiance (i.e., the cosine of 89 degrees). It prevents the projection
/// ratio from diverging when the sun is close to the horizon.
const MIN_COS_ZENITH: Float = 0.01745;

/// Sky diffuse irradiance on a surface, in W/m2
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyDiffuse {
    /// Diffuse irradiance coming uniformly from the whole sky dome
    pub isotropic: Float,

    /// Diffuse irradiance coming from the area around the sun
    pub circumsolar: Float,
}

impl SkyDiffuse {
    /// Total sky diffuse irradiance
    pub fn total(&self) -> Float {
        self.isotropic + self.circumsolar
    }
}

/// Models for distributing the diffuse horizontal irradiance over
/// a tilted surface
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranspositionModel {
    /// The whole sky is equally bright. The surface sees
    /// the fraction of the sky dome given by its view factor.
    Isotropic,

    /// Hay and Davies (1980). Part of the diffuse irradiance
    /// comes from the direction of the sun, in proportion to the
    /// anisotropy index (i.e., the transmittance of the atmosphere
    /// for beam radiation, `dni/dni_extra`).
    #[default]
    HayDavies,
}

impl TranspositionModel {
    /// Distributes the diffuse horizontal irradiance (`dhi`) over a
    /// surface.
    ///
    /// Both components are zero when the sun is below the horizon. The
    /// circumsolar component is also zero when the sun is behind the
    /// surface.
    pub fn sky_diffuse(
        &self,
        surface: &Surface,
        position: &SolarPosition,
        dni: Float,
        dhi: Float,
        dni_extra: Float,
    ) -> SkyDiffuse {
        if !position.is_sun_up() {
            return SkyDiffuse::default();
        }

        let view_factor = (1. + surface.tilt.to_radians().cos()) / 2.;
        match self {
            Self::Isotropic => SkyDiffuse {
                isotropic: (dhi * view_factor).max(0.),
                circumsolar: 0.,
            },
            Self::HayDavies => {
                let anisotropy_index = if dni_extra > 0. { dni / dni_extra } else { 0. };
                let isotropic = (dhi * (1. - anisotropy_index) * view_factor).max(0.);

                let cos_zenith = position
                    .apparent_zenith
                    .to_radians()
                    .cos()
                    .max(MIN_COS_ZENITH);
                let rb = surface.aoi_projection(position).max(0.) / cos_zenith;

                SkyDiffuse {
                    isotropic,
                    circumsolar: (dhi * anisotropy_index * rb).max(0.),
                }
            }
        }
    }
}
