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


use std::fmt;

use crate::Float;

/// The catalogs equipment can be looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// PV modules
    Module,
    /// Inverters
    Inverter,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Module => write!(f, "module"),
            CatalogKind::Inverter => write!(f, "inverter"),
        }
    }
}

/// A piece of equipment could not be resolved from a catalog
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The key is not in the catalog
    NotFound {
        /// The catalog searched
        catalog: CatalogKind,
        /// The key requested
        key: String,
    },

    /// The entry exists, but one of its fields is missing
    /// or cannot be used
    InvalidField {
        /// The catalog searched
        catalog: CatalogKind,
        /// The key requested
        key: String,
        /// The name of the column
        field: String,
        /// The text found (empty if missing)
        value: String,
    },

    /// The catalog could not be read
    Unreadable {
        /// The catalog being read
        catalog: CatalogKind,
        /// What went wrong
        message: String,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound { catalog, key } => {
                write!(f, "{} '{}' not found in catalog", catalog, key)
            }
            LookupError::InvalidField {
                catalog,
                key,
                field,
                value,
            } => write!(
                f,
                "{} '{}' has an invalid '{}' field ('{}')",
                catalog, key, field, value
            ),
            LookupError::Unreadable { catalog, message } => {
                write!(f, "could not read {} catalog: {}", catalog, message)
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Invalid system or site parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A topology count is zero or negative
    InvalidTopology {
        /// Name of the count
        field: &'static str,
        /// The value found
        value: i64,
    },

    /// A parameter is outside of its valid range (or is not finite)
    OutOfRange {
        /// Name of the parameter
        field: &'static str,
        /// The value found
        value: Float,
        /// Lowest valid value
        min: Float,
        /// Highest valid value
        max: Float,
    },

    /// Two sites share a name
    DuplicateSite(String),
}

impl ConfigurationError {
    /// Checks that `value` is finite and within `[min, max]`
    pub fn check_range(
        field: &'static str,
        value: Float,
        min: Float,
        max: Float,
    ) -> Result<(), Self> {
        if value.is_finite() && value >= min && value <= max {
            Ok(())
        } else {
            Err(ConfigurationError::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidTopology { field, value } => {
                write!(f, "'{}' must be a positive integer (found {})", field, value)
            }
            ConfigurationError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "'{}' must be within [{}, {}] (found {})",
                field, min, max, value
            ),
            ConfigurationError::DuplicateSite(name) => {
                write!(f, "site '{}' is defined more than once", name)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A model produced (or would produce) a value outside of
/// its domain, such as NaN or infinity
#[derive(Debug, Clone, PartialEq)]
pub struct NumericDomainError {
    /// The quantity being calculated
    pub quantity: &'static str,

    /// Index of the time step, when known
    pub index: Option<usize>,

    /// The offending value
    pub value: Float,
}

impl NumericDomainError {
    /// Creates an error with no time step attached
    pub fn new(quantity: &'static str, value: Float) -> Self {
        Self {
            quantity,
            index: None,
            value,
        }
    }

    /// Attaches the index of the time step to the error
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Returns an error if `value` is not finite
    pub fn check(quantity: &'static str, index: usize, value: Float) -> Result<Float, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::new(quantity, value).at(index))
        }
    }
}

impl fmt::Display for NumericDomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(
                f,
                "{} is out of its numeric domain at time step {} (value {})",
                self.quantity, i, self.value
            ),
            None => write!(
                f,
                "{} is out of its numeric domain (value {})",
                self.quantity, self.value
            ),
        }
    }
}

impl std::error::Error for NumericDomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        assert!(ConfigurationError::check_range("tilt", 0., 0., 90.).is_ok());
        assert!(ConfigurationError::check_range("tilt", 90., 0., 90.).is_ok());
        assert!(ConfigurationError::check_range("tilt", -1., 0., 90.).is_err());
        assert!(ConfigurationError::check_range("tilt", Float::NAN, 0., 90.).is_err());
    }

    #[test]
    fn test_numeric_check() {
        assert_eq!(NumericDomainError::check("dc", 3, 1.).unwrap(), 1.);
        let e = NumericDomainError::check("dc", 3, Float::INFINITY).unwrap_err();
        assert_eq!(e.index, Some(3));
        assert_eq!(e.quantity, "dc");
    }

    #[test]
    fn test_messages_name_the_key() {
        let e = LookupError::NotFound {
            catalog: CatalogKind::Module,
            key: "Acme 550".to_string(),
        };
        assert!(format!("{}", e).contains("Acme 550"));
    }
}
