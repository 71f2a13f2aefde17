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

/// Nominal inverter efficiency used when a catalog does not provide one
pub const DEFAULT_ETA_INV_NOM: Float = 0.96;

/// Reference inverter efficiency used when a catalog does not provide one.
/// PVWatts' efficiency curve was fit to an inverter with this efficiency.
pub const DEFAULT_ETA_INV_REF: Float = 0.9637;

/// AC power of one inverter following PVWatts, in W.
///
/// `pdc` is the DC power at the inverter's input and `pdc0` its DC power
/// limit (here, the rated AC power). The efficiency is
///
/// ```math
/// \eta = \frac{\eta_{nom}}{\eta_{ref}} \left( -0.0162 \zeta - \frac{0.0059}{\zeta} + 0.9858 \right)
/// ```
///
/// where $`\zeta = P_{dc}/P_{dc0}`$. The output is clipped at
/// $`\eta_{nom} P_{dc0}`$ and is never negative. Zero input gives
/// zero output, and NaN input gives NaN.
pub fn pvwatts_ac(pdc: Float, pdc0: Float, eta_inv_nom: Float, eta_inv_ref: Float) -> Float {
    if pdc.is_nan() {
        return pdc;
    }
    if pdc <= 0. || pdc0 <= 0. {
        return 0.;
    }
    let zeta = pdc / pdc0;
    let eta = eta_inv_nom / eta_inv_ref * (-0.0162 * zeta - 0.0059 / zeta + 0.9858);
    (eta * pdc).min(eta_inv_nom * pdc0).max(0.)
}

/// An inverter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InverterSpec {
    /// The name of the inverter in its catalog
    pub key: String,

    /// Rated AC power, in W
    pub paco: Float,

    /// Nominal efficiency
    pub eta_inv_nom: Float,

    /// Reference efficiency
    pub eta_inv_ref: Float,
}

impl InverterSpec {
    /// AC power of one inverter fed with `pdc` W
    pub fn ac_power(&self, pdc: Float) -> Float {
        pvwatts_ac(pdc, self.paco, self.eta_inv_nom, self.eta_inv_ref)
    }

    /// Highest AC power the inverter delivers, in W
    pub fn max_ac_power(&self) -> Float {
        self.eta_inv_nom * self.paco
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validate::assert_close;

    fn inverter() -> InverterSpec {
        InverterSpec {
            key: "test".to_string(),
            paco: 125000.,
            eta_inv_nom: DEFAULT_ETA_INV_NOM,
            eta_inv_ref: DEFAULT_ETA_INV_REF,
        }
    }

    #[test]
    fn test_zero_in_zero_out() {
        let inv = inverter();
        assert_eq!(inv.ac_power(0.), 0.);
        assert_eq!(inv.ac_power(-10.), 0.);
    }

    #[test]
    fn test_tiny_input_is_not_negative() {
        // The 0.0059/zeta term dominates
        assert_eq!(inverter().ac_power(1.), 0.);
    }

    #[test]
    fn test_efficiency_below_one() {
        let inv = inverter();
        for pdc in [5000., 30000., 62500., 100000., 124000.] {
            let ac = inv.ac_power(pdc);
            assert!(ac > 0.);
            assert!(ac < pdc);
        }
    }

    #[test]
    fn test_monotonic() {
        let inv = inverter();
        let mut last = 0.;
        let mut pdc = 1000.;
        while pdc < 200000. {
            let ac = inv.ac_power(pdc);
            assert!(ac >= last, "AC power dropped at pdc = {}", pdc);
            last = ac;
            pdc += 1000.;
        }
    }

    #[test]
    fn test_clipping() {
        let inv = inverter();
        let cap = inv.max_ac_power();
        assert_close!(cap, inv.ac_power(150000.), 1e-9);
        assert_close!(cap, inv.ac_power(1e7), 1e-9);
        assert!(inv.ac_power(100000.) < cap);
    }

    #[test]
    fn test_nan_is_not_clipped() {
        assert!(inverter().ac_power(Float::NAN).is_nan());
    }

    #[test]
    fn test_reference_efficiency() {
        // At zeta = 1 the curve gives eta_ref * (nom/ref) = 0.9858 - 0.0162 - 0.0059
        let ac = pvwatts_ac(1000., 1000., 0.9637, 0.9637);
        assert_close!(963.7, ac, 1e-9);
    }
}
