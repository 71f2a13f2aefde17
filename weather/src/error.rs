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


use chrono::{DateTime, Utc};
use std::fmt;

use crate::Float;

/// Problems found in a weather series
#[derive(Debug, Clone, PartialEq)]
pub enum DataQualityError {
    /// The series has no samples
    Empty,

    /// A required column is not in the source
    MissingColumn(String),

    /// A timestamp could not be parsed
    InvalidTimestamp {
        /// Row of the source (counting data rows from 0)
        row: usize,
        /// The text found
        value: String,
    },

    /// A row could not be read or parsed
    InvalidRecord {
        /// Row of the source (counting data rows from 0)
        row: usize,
        /// What went wrong
        message: String,
    },

    /// The source could not be read at all
    Io(String),

    /// A timestamp is earlier than the one before it
    NonMonotonicTimestamp {
        /// Index of the offending sample
        index: usize,
        /// Timestamp of the sample before it
        previous: DateTime<Utc>,
        /// Timestamp of the sample
        current: DateTime<Utc>,
    },

    /// Two samples share a timestamp
    DuplicateTimestamp {
        /// Index of the second sample
        index: usize,
        /// The repeated timestamp
        timestamp: DateTime<Utc>,
    },

    /// A value is NaN or infinite
    NonFinite {
        /// Index of the offending sample
        index: usize,
        /// Name of the field
        field: &'static str,
    },

    /// A temperature is below absolute zero
    BelowAbsoluteZero {
        /// Index of the offending sample
        index: usize,
        /// The temperature found, in C
        value: Float,
    },
}

impl fmt::Display for DataQualityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityError::Empty => write!(f, "weather series is empty"),
            DataQualityError::MissingColumn(c) => write!(f, "missing required column '{}'", c),
            DataQualityError::InvalidTimestamp { row, value } => {
                write!(f, "invalid timestamp '{}' in row {}", value, row)
            }
            DataQualityError::InvalidRecord { row, message } => {
                write!(f, "invalid record in row {}: {}", row, message)
            }
            DataQualityError::Io(msg) => write!(f, "could not read weather data: {}", msg),
            DataQualityError::NonMonotonicTimestamp {
                index,
                previous,
                current,
            } => write!(
                f,
                "timestamp {} at index {} comes before the previous one ({})",
                current, index, previous
            ),
            DataQualityError::DuplicateTimestamp { index, timestamp } => {
                write!(f, "duplicate timestamp {} at index {}", timestamp, index)
            }
            DataQualityError::NonFinite { index, field } => {
                write!(f, "field '{}' is not finite at index {}", field, index)
            }
            DataQualityError::BelowAbsoluteZero { index, value } => write!(
                f,
                "air temperature {} C at index {} is below absolute zero",
                value, index
            ),
        }
    }
}

impl std::error::Error for DataQualityError {}
