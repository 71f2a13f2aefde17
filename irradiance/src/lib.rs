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

//! Transposition of horizontal irradiance (direct normal, global horizontal
//! and diffuse horizontal) into the plane of a tilted, fixed surface.
//!
//! The result is split into a direct (beam) component and a diffuse
//! component, the latter containing both the sky diffuse and the
//! ground-reflected irradiance. So, for every timestamp,
//! `poa_global == poa_direct + poa_diffuse`.

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

/// Orientation of the surface and the angle of incidence
pub mod surface;
pub use surface::Surface;

/// Models for distributing the diffuse horizontal irradiance
pub mod sky_diffuse;
pub use sky_diffuse::{SkyDiffuse, TranspositionModel};

/// Irradiance on the plane of array
pub mod plane_of_array;
pub use plane_of_array::{ground_diffuse, PlaneIrradiance, PlaneOfArray, DEFAULT_ALBEDO};
