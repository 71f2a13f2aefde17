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


use crate::error::ConfigurationError;
use serde::Serialize;

/// How the modules of a PV array are wired.
///
/// Modules are connected in series to form strings; strings are
/// connected in parallel to an inverter; and the array has one
/// or more identical inverters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrayTopology {
    modules_per_string: usize,
    strings_per_inverter: usize,
    inverter_count: usize,
}

fn count(field: &'static str, value: i64) -> Result<usize, ConfigurationError> {
    match usize::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigurationError::InvalidTopology { field, value }),
    }
}

impl ArrayTopology {
    /// Creates a topology. All counts must be positive.
    pub fn new(
        modules_per_string: i64,
        strings_per_inverter: i64,
        inverter_count: i64,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            modules_per_string: count("modules_per_string", modules_per_string)?,
            strings_per_inverter: count("strings_per_inverter", strings_per_inverter)?,
            inverter_count: count("inverter_count", inverter_count)?,
        })
    }

    /// Modules connected in series in each string
    pub fn modules_per_string(&self) -> usize {
        self.modules_per_string
    }

    /// Strings connected to each inverter
    pub fn strings_per_inverter(&self) -> usize {
        self.strings_per_inverter
    }

    /// Number of inverters
    pub fn inverter_count(&self) -> usize {
        self.inverter_count
    }

    /// Modules feeding each inverter
    pub fn modules_per_inverter(&self) -> usize {
        self.modules_per_string * self.strings_per_inverter
    }

    /// Modules in the whole array
    pub fn total_modules(&self) -> usize {
        self.modules_per_inverter() * self.inverter_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let t = ArrayTopology::new(18, 12, 3).unwrap();
        assert_eq!(t.modules_per_inverter(), 216);
        assert_eq!(t.total_modules(), 648);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(
            ArrayTopology::new(18, 0, 3),
            Err(ConfigurationError::InvalidTopology {
                field: "strings_per_inverter",
                value: 0
            })
        );
        assert!(ArrayTopology::new(-2, 1, 1).is_err());
        assert!(ArrayTopology::new(1, 1, 0).is_err());
        assert!(ArrayTopology::new(1, 1, 1).is_ok());
    }
}
