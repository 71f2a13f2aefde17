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

//! Electrical models of a grid-tied PV system: equipment specifications
//! (read from catalogs), wiring topology, cell temperature, DC power of the
//! modules and AC power of the inverters.
//!
//! The DC model is PVWatts' (a linear function of the irradiance corrected
//! by temperature), the inverter model is PVWatts' efficiency curve, and the
//! cell temperature model is PVsyst's steady-state heat balance.

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

/// Configuration, lookup and numeric errors
pub mod error;
pub use error::{CatalogKind, ConfigurationError, LookupError, NumericDomainError};

/// Equipment catalogs
pub mod catalog;
pub use catalog::Catalog;

/// PV modules and their DC power
pub mod module;
pub use module::{pvwatts_dc, ModuleSpec, DEFAULT_GAMMA_PDC};

/// Inverters and their AC power
pub mod inverter;
pub use inverter::{pvwatts_ac, InverterSpec, DEFAULT_ETA_INV_NOM, DEFAULT_ETA_INV_REF};

/// Cell temperature models
pub mod temperature;
pub use temperature::PvsystCell;

/// How modules and inverters are wired together
pub mod topology;
pub use topology::ArrayTopology;

/// A whole PV system
pub mod system;
pub use system::{DcPower, PvSystem};
