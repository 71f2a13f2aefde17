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

/// Temperature coefficient of power used when a catalog does
/// not provide one, in 1/C
pub const DEFAULT_GAMMA_PDC: Float = -0.0034;

/// Irradiance at standard test conditions, in W/m2
const STC_IRRADIANCE: Float = 1000.;

/// Cell temperature at standard test conditions, in C
const STC_TEMPERATURE: Float = 25.;

/// DC power of a module following PVWatts, in W.
///
/// ```math
/// P = \frac{E}{1000} P_{stc} \left(1 + \gamma (T_{cell} - 25) \right)
/// ```
///
/// The result is never negative.
pub fn pvwatts_dc(
    poa_global: Float,
    cell_temperature: Float,
    stc_power: Float,
    gamma_pdc: Float,
) -> Float {
    let p = poa_global / STC_IRRADIANCE
        * stc_power
        * (1. + gamma_pdc * (cell_temperature - STC_TEMPERATURE));
    p.max(0.)
}

/// A PV module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// The name of the module in its catalog
    pub key: String,

    /// Power at standard test conditions, in W
    pub stc_power: Float,

    /// Temperature coefficient of power, in 1/C
    pub gamma_pdc: Float,
}

impl ModuleSpec {
    /// DC power of one module, in W
    pub fn dc_power(&self, poa_global: Float, cell_temperature: Float) -> Float {
        pvwatts_dc(poa_global, cell_temperature, self.stc_power, self.gamma_pdc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validate::assert_close;

    fn module() -> ModuleSpec {
        ModuleSpec {
            key: "test".to_string(),
            stc_power: 550.,
            gamma_pdc: DEFAULT_GAMMA_PDC,
        }
    }

    #[test]
    fn test_stc() {
        let m = module();
        assert_close!(550., m.dc_power(1000., 25.), 1e-9);
        assert_eq!(m.dc_power(0., 40.), 0.);
    }

    #[test]
    fn test_temperature_derate() {
        let m = module();
        // 20 degrees above STC
        let p = m.dc_power(1000., 45.);
        assert_close!(550. * (1. - 0.068), p, 1e-9);
        assert!(p < m.dc_power(1000., 30.));
    }

    #[test]
    fn test_linear_in_irradiance() {
        let m = module();
        let p400 = m.dc_power(400., 35.);
        let p800 = m.dc_power(800., 35.);
        assert_close!(2. * p400, p800, 1e-9);
    }

    #[test]
    fn test_never_negative() {
        // 1 + gamma*(t - 25) < 0 only at absurd temperatures
        assert_eq!(pvwatts_dc(1000., 400., 550., -0.0034), 0.);
    }
}
