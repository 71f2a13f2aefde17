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

//! Weather time series used as the input of PV yield calculations.
//!
//! A [`WeatherSeries`] is an ordered list of [`WeatherSample`], one per
//! timestamp (in UTC), covering one representative year. The series is
//! validated when it is built: timestamps must be strictly increasing and
//! every value must be finite. Physically impossible values that can be
//! attributed to sensor noise (e.g., slightly negative irradiance) are
//! clamped rather than rejected.

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

/// Warnings and errors printed to the user
pub mod error_msgs;

/// Errors found when validating weather data
pub mod error;
pub use crate::error::DataQualityError;

/// Data associated to the weather conditions at a particular moment
pub mod weather_sample;
pub use crate::weather_sample::WeatherSample;

/// Reads weather series from CSV files
pub mod reader;

use chrono::{DateTime, Utc};
use error_msgs::print_warning;
use serde::{Deserialize, Serialize};

/// Lowest temperature that makes physical sense, in C
pub const ABSOLUTE_ZERO: Float = -273.15;

/// An ordered, validated sequence of [`WeatherSample`]
///
/// It is (de)serialized as a plain list of samples. Deserializing goes
/// through [`WeatherSeries::new`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(try_from = "Vec<WeatherSample>", into = "Vec<WeatherSample>")]
pub struct WeatherSeries {
    /// The weather data, sorted by timestamp
    data: Vec<WeatherSample>,

    /// Number of values that were clamped into their physical
    /// range when building the series
    clamped_values: usize,
}

impl WeatherSeries {
    /// Builds a new series.
    ///
    /// Returns an error if the data is empty, if timestamps are not
    /// strictly increasing, if any value is not finite, or if a temperature
    /// is below absolute zero. Negative irradiance and wind speed values are
    /// clamped to zero.
    pub fn new(mut data: Vec<WeatherSample>) -> Result<Self, DataQualityError> {
        if data.is_empty() {
            return Err(DataQualityError::Empty);
        }

        for (index, pair) in data.windows(2).enumerate() {
            let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
            if current == previous {
                return Err(DataQualityError::DuplicateTimestamp {
                    index: index + 1,
                    timestamp: current,
                });
            }
            if current < previous {
                return Err(DataQualityError::NonMonotonicTimestamp {
                    index: index + 1,
                    previous,
                    current,
                });
            }
        }

        let mut clamped_values = 0;
        for (index, sample) in data.iter_mut().enumerate() {
            if let Some(field) = sample.first_non_finite_field() {
                return Err(DataQualityError::NonFinite { index, field });
            }
            if sample.temp_air < ABSOLUTE_ZERO {
                return Err(DataQualityError::BelowAbsoluteZero {
                    index,
                    value: sample.temp_air,
                });
            }
            clamped_values += sample.clamp_to_physical_range();
        }

        if clamped_values > 0 {
            print_warning(
                "weather",
                format!(
                    "{} negative irradiance or wind speed values were clamped to zero",
                    clamped_values
                ),
            );
        }

        Ok(Self {
            data,
            clamped_values,
        })
    }

    /// The samples in the series
    pub fn data(&self) -> &[WeatherSample] {
        &self.data
    }

    /// The number of samples in the series
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks whether the series has no samples. This is never the case for
    /// a series built through [`WeatherSeries::new`].
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of values that were clamped when building the series
    pub fn clamped_values(&self) -> usize {
        self.clamped_values
    }

    /// Iterates over the timestamps of the series
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.data.iter().map(|s| s.timestamp)
    }

    /// The sampling interval of the series, in hours.
    ///
    /// The series is assumed to be uniformly sampled, so this is the distance
    /// between the first two samples. A series with a single sample is
    /// assumed to be hourly.
    pub fn interval_hours(&self) -> Float {
        match (self.data.first(), self.data.get(1)) {
            (Some(first), Some(second)) => {
                let seconds = (second.timestamp - first.timestamp).num_seconds();
                seconds as Float / 3600.
            }
            _ => 1.0,
        }
    }
}

impl TryFrom<Vec<WeatherSample>> for WeatherSeries {
    type Error = DataQualityError;

    fn try_from(data: Vec<WeatherSample>) -> Result<Self, Self::Error> {
        Self::new(data)
    }
}

impl From<WeatherSeries> for Vec<WeatherSample> {
    fn from(series: WeatherSeries) -> Self {
        series.data
    }
}
