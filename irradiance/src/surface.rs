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
use serde::{Deserialize, Serialize};
use solar::SolarPosition;

/// A fixed, flat surface. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Angle between the surface and the horizontal plane (0 is
    /// horizontal, facing up; 90 is vertical)
    pub tilt: Float,

    /// The direction the surface faces, clockwise from North (e.g.,
    /// 180 faces South)
    pub azimuth: Float,
}

impl Surface {
    /// Cosine of the angle of incidence of the beam radiation on the
    /// surface, clipped to `[-1, 1]`. Negative values mean that the sun is
    /// behind the surface.
    ///
    /// This is equation 1.6.3 of Duffie and Beckman, written in terms of
    /// the solar zenith and azimuth.
    pub fn aoi_projection(&self, position: &SolarPosition) -> Float {
        let tilt = self.tilt.to_radians();
        let zenith = position.apparent_zenith.to_radians();
        let delta_azimuth = (position.azimuth - self.azimuth).to_radians();

        let projection =
            tilt.cos() * zenith.cos() + tilt.sin() * zenith.sin() * delta_azimuth.cos();
        projection.clamp(-1., 1.)
    }

    /// The angle of incidence, in degrees (0 to 180)
    pub fn aoi(&self, position: &SolarPosition) -> Float {
        self.aoi_projection(position).acos().to_degrees()
    }
}
