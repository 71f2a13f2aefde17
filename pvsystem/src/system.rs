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
use crate::{ArrayTopology, Float, InverterSpec, ModuleSpec, PvsystCell};

/// DC power of an array at one time step, in W
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DcPower {
    /// Power of a single module
    pub module: Float,

    /// Power at the input of each inverter
    pub per_inverter: Float,

    /// Power of the whole array
    pub array: Float,
}

/// The electrical side of a PV system: what is installed and how it is
/// wired. It holds no state, so a single instance can be shared by
/// every time step (and every thread).
#[derive(Debug, Clone, PartialEq)]
pub struct PvSystem {
    /// The modules
    pub module: ModuleSpec,

    /// The inverters
    pub inverter: InverterSpec,

    /// How modules and inverters are wired
    pub topology: ArrayTopology,

    /// The thermal model of the modules
    pub temperature_model: PvsystCell,
}

impl PvSystem {
    /// Puts a system together, checking the parameters of its
    /// thermal model
    pub fn new(
        module: ModuleSpec,
        inverter: InverterSpec,
        topology: ArrayTopology,
        temperature_model: PvsystCell,
    ) -> Result<Self, ConfigurationError> {
        temperature_model.validate()?;
        Ok(Self {
            module,
            inverter,
            topology,
            temperature_model,
        })
    }

    /// Cell temperature, in C
    pub fn cell_temperature(
        &self,
        poa_global: Float,
        temp_air: Float,
        wind_speed: Float,
    ) -> Result<Float, NumericDomainError> {
        self.temperature_model
            .cell_temperature(poa_global, temp_air, wind_speed)
    }

    /// DC power of the modules, per inverter and of the whole array
    pub fn dc_power(&self, poa_global: Float, cell_temperature: Float) -> DcPower {
        let module = self.module.dc_power(poa_global, cell_temperature);
        let per_inverter = module * self.topology.modules_per_inverter() as Float;
        DcPower {
            module,
            per_inverter,
            array: per_inverter * self.topology.inverter_count() as Float,
        }
    }

    /// AC power of the whole array, in W. Each inverter gets its share
    /// of the DC power.
    pub fn ac_power(&self, dc: &DcPower) -> Float {
        self.inverter.ac_power(dc.per_inverter) * self.topology.inverter_count() as Float
    }

    /// Highest AC power the array delivers, in W
    pub fn max_ac_power(&self) -> Float {
        self.inverter.max_ac_power() * self.topology.inverter_count() as Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEFAULT_ETA_INV_NOM, DEFAULT_ETA_INV_REF, DEFAULT_GAMMA_PDC};
    use validate::assert_close;

    fn system(strings: i64, inverters: i64) -> PvSystem {
        PvSystem::new(
            ModuleSpec {
                key: "module".to_string(),
                stc_power: 550.,
                gamma_pdc: DEFAULT_GAMMA_PDC,
            },
            InverterSpec {
                key: "inverter".to_string(),
                paco: 125000.,
                eta_inv_nom: DEFAULT_ETA_INV_NOM,
                eta_inv_ref: DEFAULT_ETA_INV_REF,
            },
            ArrayTopology::new(18, strings, inverters).unwrap(),
            PvsystCell::freestanding(),
        )
        .unwrap()
    }

    #[test]
    fn test_dc_scales_with_modules() {
        let s = system(12, 3);
        let dc = s.dc_power(900., 40.);
        assert_close!(216. * dc.module, dc.per_inverter, 1e-6);
        assert_close!(3. * dc.per_inverter, dc.array, 1e-6);
    }

    #[test]
    fn test_ac_scales_with_inverters() {
        let one = system(12, 1);
        let three = system(12, 3);
        let dc1 = one.dc_power(700., 35.);
        let dc3 = three.dc_power(700., 35.);
        assert_close!(3. * one.ac_power(&dc1), three.ac_power(&dc3), 1e-6);
    }

    #[test]
    fn test_ac_is_capped() {
        // 18 * 20 * 550 W = 198 kW per inverter at STC, well above the rating
        let s = system(20, 2);
        let dc = s.dc_power(1000., 25.);
        assert_close!(s.max_ac_power(), s.ac_power(&dc), 1e-6);
        assert!(s.ac_power(&dc) < dc.array);
    }

    #[test]
    fn test_night() {
        let s = system(12, 3);
        let dc = s.dc_power(0., 10.);
        assert_eq!(dc.array, 0.);
        assert_eq!(s.ac_power(&dc), 0.);
    }
}
