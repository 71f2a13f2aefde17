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


use crate::error::{ConfigurationError, NumericDomainError};
use crate::Float;
use serde::{Deserialize, Serialize};

fn default_alpha_absorption() -> Float {
    0.9
}

fn default_module_efficiency() -> Float {
    0.1
}

/// PVsyst's cell temperature model.
///
/// The module is in thermal equilibrium: the absorbed irradiance that is
/// not converted into electricity is lost to the air through a heat loss
/// factor that may depend on the wind speed.
///
/// ```math
/// T_{cell} = T_{air} + \frac{\alpha E (1 - \eta_m)}{U_c + U_v v}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PvsystCell {
    /// Constant heat loss factor, in W/m2K
    pub u_c: Float,

    /// Wind-dependent heat loss factor, in W/m2K / (m/s)
    #[serde(default)]
    pub u_v: Float,

    /// Fraction of the incident irradiance absorbed by the module
    #[serde(default = "default_alpha_absorption")]
    pub alpha_absorption: Float,

    /// Fraction of the incident irradiance converted into electricity
    #[serde(default = "default_module_efficiency")]
    pub module_efficiency: Float,
}

impl Default for PvsystCell {
    fn default() -> Self {
        Self::freestanding()
    }
}

impl PvsystCell {
    /// Modules with air circulating freely around them
    pub fn freestanding() -> Self {
        Self {
            u_c: 29.,
            u_v: 0.,
            alpha_absorption: default_alpha_absorption(),
            module_efficiency: default_module_efficiency(),
        }
    }

    /// Modules with an insulated back (e.g., mounted on a roof)
    pub fn insulated() -> Self {
        Self {
            u_c: 15.,
            ..Self::freestanding()
        }
    }

    /// Checks the parameters
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.u_c.is_finite() && self.u_c > 0.) {
            return Err(ConfigurationError::OutOfRange {
                field: "u_c",
                value: self.u_c,
                min: Float::MIN_POSITIVE,
                max: Float::MAX,
            });
        }
        ConfigurationError::check_range("u_v", self.u_v, 0., Float::MAX)?;
        ConfigurationError::check_range("alpha_absorption", self.alpha_absorption, 0., 1.)?;
        ConfigurationError::check_range("module_efficiency", self.module_efficiency, 0., 1.)?;
        Ok(())
    }

    /// Cell temperature, in C
    pub fn cell_temperature(
        &self,
        poa_global: Float,
        temp_air: Float,
        wind_speed: Float,
    ) -> Result<Float, NumericDomainError> {
        let heat_loss = self.u_c + self.u_v * wind_speed;
        if !(heat_loss > 0.) {
            return Err(NumericDomainError::new("heat loss factor", heat_loss));
        }
        let absorbed = self.alpha_absorption * poa_global * (1. - self.module_efficiency);
        Ok(temp_air + absorbed / heat_loss)
    }
}
