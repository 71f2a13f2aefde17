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


use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{CatalogKind, LookupError};
use crate::{Float, InverterSpec, ModuleSpec};
use crate::{DEFAULT_ETA_INV_NOM, DEFAULT_ETA_INV_REF, DEFAULT_GAMMA_PDC};

/// A table of equipment, keyed by name.
///
/// The first column of the table holds the keys and the first row holds
/// the column names. Values are kept as text and only parsed when an entry
/// is looked up, so catalogs with thousands of entries (and columns this
/// library does not use) are cheap to load. If a key appears more than
/// once, the first entry wins.
#[derive(Debug, Clone)]
pub struct Catalog {
    kind: CatalogKind,
    columns: HashMap<String, usize>,
    rows: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Creates an empty catalog with the given columns (not counting
    /// the key column)
    pub fn new(kind: CatalogKind, columns: &[&str]) -> Self {
        let columns = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.to_string(), i))
            .collect();
        Self {
            kind,
            columns,
            rows: HashMap::new(),
        }
    }

    /// Adds an entry. Values follow the order of the columns
    /// given when creating the catalog.
    pub fn insert(&mut self, key: &str, values: &[&str]) {
        self.rows
            .entry(key.to_string())
            .or_insert_with(|| values.iter().map(|v| v.to_string()).collect());
    }

    /// Reads a catalog from CSV data
    pub fn from_reader<R: Read>(kind: CatalogKind, source: R) -> Result<Self, LookupError> {
        let unreadable = |e: csv::Error| LookupError::Unreadable {
            catalog: kind,
            message: e.to_string(),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);

        // Skip the key column
        let columns = reader
            .headers()
            .map_err(unreadable)?
            .iter()
            .skip(1)
            .enumerate()
            .map(|(i, c)| (c.to_string(), i))
            .collect();

        let mut rows = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(unreadable)?;
            let mut fields = record.iter();
            let key = match fields.next() {
                Some(k) if !k.is_empty() => k.to_string(),
                _ => continue,
            };
            rows.entry(key)
                .or_insert_with(|| fields.map(|v| v.to_string()).collect());
        }

        Ok(Self {
            kind,
            columns,
            rows,
        })
    }

    /// Reads a catalog from a CSV file
    pub fn from_file<P: AsRef<Path>>(kind: CatalogKind, path: P) -> Result<Self, LookupError> {
        let file = std::fs::File::open(path.as_ref()).map_err(|e| LookupError::Unreadable {
            catalog: kind,
            message: format!("{}: {}", path.as_ref().display(), e),
        })?;
        Self::from_reader(kind, file)
    }

    /// The kind of equipment in the catalog
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Checks whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks whether an entry exists
    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Gets the text of a field. Returns `Ok(None)` if the column does
    /// not exist or the cell is empty, and an error if the key is not
    /// in the catalog.
    pub fn field(&self, key: &str, column: &str) -> Result<Option<&str>, LookupError> {
        let row = self.rows.get(key).ok_or_else(|| LookupError::NotFound {
            catalog: self.kind,
            key: key.to_string(),
        })?;
        let value = self
            .columns
            .get(column)
            .and_then(|i| row.get(*i))
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty());
        Ok(value)
    }

    /// Parses a numeric field. Missing values are `Ok(None)`; values
    /// that are present but are not finite numbers are errors.
    fn number(&self, key: &str, column: &str) -> Result<Option<Float>, LookupError> {
        match self.field(key, column)? {
            None => Ok(None),
            Some(text) => match text.parse::<Float>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(self.invalid(key, column, text)),
            },
        }
    }

    /// Parses a numeric field that must exist and be positive
    fn positive(&self, key: &str, column: &str) -> Result<Float, LookupError> {
        match self.number(key, column)? {
            Some(v) if v > 0. => Ok(v),
            Some(v) => Err(self.invalid(key, column, &v.to_string())),
            None => Err(self.invalid(key, column, "")),
        }
    }

    fn invalid(&self, key: &str, column: &str, value: &str) -> LookupError {
        LookupError::InvalidField {
            catalog: self.kind,
            key: key.to_string(),
            field: column.to_string(),
            value: value.to_string(),
        }
    }

    /// Resolves a PV module.
    ///
    /// The `STC` column (power at standard test conditions, in W)
    /// is required. The `gamma_pdc` column (1/C) is optional.
    pub fn module(&self, key: &str) -> Result<ModuleSpec, LookupError> {
        let stc_power = self.positive(key, "STC")?;
        let gamma_pdc = self
            .number(key, "gamma_pdc")?
            .unwrap_or(DEFAULT_GAMMA_PDC);
        Ok(ModuleSpec {
            key: key.to_string(),
            stc_power,
            gamma_pdc,
        })
    }

    /// Resolves an inverter.
    ///
    /// The `Paco` column (rated AC power, in W) is required. The
    /// `eta_inv_nom` and `eta_inv_ref` columns are optional.
    pub fn inverter(&self, key: &str) -> Result<InverterSpec, LookupError> {
        let paco = self.positive(key, "Paco")?;
        let eta_inv_nom = match self.number(key, "eta_inv_nom")? {
            None => DEFAULT_ETA_INV_NOM,
            Some(v) if v > 0. && v <= 1. => v,
            Some(v) => return Err(self.invalid(key, "eta_inv_nom", &v.to_string())),
        };
        let eta_inv_ref = match self.number(key, "eta_inv_ref")? {
            None => DEFAULT_ETA_INV_REF,
            Some(v) if v > 0. && v <= 1. => v,
            Some(v) => return Err(self.invalid(key, "eta_inv_ref", &v.to_string())),
        };
        Ok(InverterSpec {
            key: key.to_string(),
            paco,
            eta_inv_nom,
            eta_inv_ref,
        })
    }
}
