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


use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};

use crate::error_msgs::print_warning;
use crate::{DataQualityError, Float, WeatherSample, WeatherSeries};

/// The columns needed to build a [`WeatherSample`], together with the names
/// they are given by different sources. The first name is the canonical one
/// (pvlib's); the others are PVGIS's.
const COLUMNS: [(&str, &[&str]); 6] = [
    ("time", &["time", "utc_time", "time(UTC)", "timestamp"]),
    ("temp_air", &["temp_air", "T2m"]),
    ("wind_speed", &["wind_speed", "WS10m"]),
    ("dni", &["dni", "Gb(n)"]),
    ("ghi", &["ghi", "G(h)"]),
    ("dhi", &["dhi", "Gd(h)"]),
];

/// Parses a timestamp in UTC. It accepts RFC 3339 (e.g., `2005-01-01T10:00:00Z`),
/// the format written by pandas (`2005-01-01 10:00:00+00:00`), naive
/// datetimes (assumed to be UTC) and PVGIS's `20050101:1000`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = DateTime::parse_from_rfc3339(value) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(d.with_timezone(&Utc));
    }
    for fmt in ["%Y%m%d:%H%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(d) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(d.and_utc());
        }
    }
    None
}

fn column<'r>(
    record: &'r csv::StringRecord,
    indexes: &[usize; 6],
    i: usize,
    row: usize,
) -> Result<&'r str, DataQualityError> {
    record
        .get(indexes[i])
        .ok_or_else(|| DataQualityError::InvalidRecord {
            row,
            message: format!("column '{}' is missing", COLUMNS[i].0),
        })
}

fn number(
    record: &csv::StringRecord,
    indexes: &[usize; 6],
    i: usize,
    row: usize,
) -> Result<Float, DataQualityError> {
    let v = column(record, indexes, i, row)?;
    v.parse::<Float>()
        .map_err(|_| DataQualityError::InvalidRecord {
            row,
            message: format!("'{}' is not a number (column '{}')", v, COLUMNS[i].0),
        })
}

fn read_samples<R: Read>(source: R) -> Result<Vec<WeatherSample>, DataQualityError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| DataQualityError::Io(e.to_string()))?
        .clone();

    let mut indexes = [0; 6];
    for (i, (canonical, names)) in COLUMNS.iter().enumerate() {
        indexes[i] = headers
            .iter()
            .position(|h| names.contains(&h))
            .ok_or_else(|| DataQualityError::MissingColumn(canonical.to_string()))?;
    }

    let mut data = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| DataQualityError::InvalidRecord {
            row,
            message: e.to_string(),
        })?;

        let time = column(&record, &indexes, 0, row)?;
        let timestamp =
            parse_timestamp(time).ok_or_else(|| DataQualityError::InvalidTimestamp {
                row,
                value: time.to_string(),
            })?;

        data.push(WeatherSample {
            timestamp,
            temp_air: number(&record, &indexes, 1, row)?,
            wind_speed: number(&record, &indexes, 2, row)?,
            dni: number(&record, &indexes, 3, row)?,
            ghi: number(&record, &indexes, 4, row)?,
            dhi: number(&record, &indexes, 5, row)?,
        });
    }
    Ok(data)
}

fn open(path: &Path) -> Result<std::fs::File, DataQualityError> {
    std::fs::File::open(path)
        .map_err(|e| DataQualityError::Io(format!("{}: {}", path.display(), e)))
}

/// Moves every sample into `year`, keeping month, day and time.
///
/// Typical Meteorological Years (e.g., PVGIS's) put together months
/// taken from different years, so their timestamps are not increasing
/// until they share a year. Samples on February 29 are dropped when
/// `year` is not a leap year. Returns the number of dropped samples.
pub fn coerce_year(data: &mut Vec<WeatherSample>, year: i32) -> usize {
    let before = data.len();
    data.retain_mut(|sample| match sample.timestamp.with_year(year) {
        Some(timestamp) => {
            sample.timestamp = timestamp;
            true
        }
        None => false,
    });
    before - data.len()
}

/// Reads a [`WeatherSeries`] from CSV data with a header row.
///
/// Extra columns are ignored. The resulting series goes through
/// the same validation as [`WeatherSeries::new`].
pub fn from_reader<R: Read>(source: R) -> Result<WeatherSeries, DataQualityError> {
    WeatherSeries::new(read_samples(source)?)
}

/// Reads a Typical Meteorological Year from CSV data, moving every
/// sample into `year` (see [`coerce_year`]) before validating it.
pub fn from_reader_tmy<R: Read>(
    source: R,
    year: i32,
) -> Result<WeatherSeries, DataQualityError> {
    let mut data = read_samples(source)?;
    let dropped = coerce_year(&mut data, year);
    if dropped > 0 {
        print_warning(
            "weather",
            format!(
                "{} samples on February 29 were dropped because {} is not a leap year",
                dropped, year
            ),
        );
    }
    WeatherSeries::new(data)
}

/// Reads a [`WeatherSeries`] from a CSV file
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<WeatherSeries, DataQualityError> {
    from_reader(open(path.as_ref())?)
}

/// Reads a Typical Meteorological Year from a CSV file (see [`from_reader_tmy`])
pub fn from_file_tmy<P: AsRef<Path>>(
    path: P,
    year: i32,
) -> Result<WeatherSeries, DataQualityError> {
    from_reader_tmy(open(path.as_ref())?, year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use validate::assert_close;

    #[test]
    fn test_parse_timestamp() {
        let exp = Utc.with_ymd_and_hms(2005, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2005-01-01T10:00:00Z"), Some(exp));
        assert_eq!(parse_timestamp("2005-01-01T07:00:00-03:00"), Some(exp));
        assert_eq!(parse_timestamp("2005-01-01 10:00:00+00:00"), Some(exp));
        assert_eq!(parse_timestamp("2005-01-01 10:00:00"), Some(exp));
        assert_eq!(parse_timestamp("20050101:1000"), Some(exp));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_from_reader_pvlib_columns() {
        let src = "time,temp_air,wind_speed,dni,ghi,dhi,relative_humidity
2005-01-01T00:00:00Z,25.1,3.2,0,0,0,80
2005-01-01T01:00:00Z,24.9,3.0,0,0,0,81
2005-01-01T12:00:00Z,31.0,5.5,700,900,150,60";
        let series = from_reader(src.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        let s = series.data()[2];
        assert_close!(31.0, s.temp_air, 1e-6);
        assert_close!(5.5, s.wind_speed, 1e-6);
        assert_close!(700., s.dni, 1e-6);
        assert_close!(900., s.ghi, 1e-6);
        assert_close!(150., s.dhi, 1e-6);
    }

    #[test]
    fn test_from_reader_pvgis_columns() {
        let src = "time(UTC),T2m,RH,G(h),Gb(n),Gd(h),IR(h),WS10m,WD10m,SP
20050101:0000,26.05,79.1,0.0,0.0,0.0,391.6,6.36,110.0,101090.0
20050101:0100,25.93,79.6,0.0,0.0,0.0,390.5,6.29,111.0,101060.0";
        let series = from_reader(src.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        assert_close!(6.29, series.data()[1].wind_speed, 1e-6);
        assert_close!(26.05, series.data()[0].temp_air, 1e-6);
    }

    #[test]
    fn test_missing_column() {
        let src = "time,temp_air,wind_speed,dni,ghi
2005-01-01T00:00:00Z,25.1,3.2,0,0";
        assert_eq!(
            from_reader(src.as_bytes()),
            Err(DataQualityError::MissingColumn("dhi".to_string()))
        );
    }

    #[test]
    fn test_bad_number_and_timestamp() {
        let src = "time,temp_air,wind_speed,dni,ghi,dhi
2005-01-01T00:00:00Z,hot,3.2,0,0,0";
        assert!(matches!(
            from_reader(src.as_bytes()),
            Err(DataQualityError::InvalidRecord { row: 0, .. })
        ));

        let src = "time,temp_air,wind_speed,dni,ghi,dhi
2005-01-01T00:00:00Z,20,3.2,0,0,0
noon,20,3.2,0,0,0";
        assert!(matches!(
            from_reader(src.as_bytes()),
            Err(DataQualityError::InvalidTimestamp { row: 1, .. })
        ));
    }

    const TMY: &str = "time(UTC),T2m,RH,G(h),Gb(n),Gd(h),IR(h),WS10m,WD10m,SP
20070131:2200,26.1,80.2,0.0,0.0,0.0,390.1,6.1,110.0,101050.0
20070131:2300,26.0,80.5,0.0,0.0,0.0,389.7,6.0,111.0,101060.0
20120201:0000,25.8,81.0,0.0,0.0,0.0,389.2,5.9,112.0,101070.0
20120229:2300,25.9,79.8,0.0,0.0,0.0,391.0,5.5,100.0,101040.0
20060301:0000,25.7,80.1,0.0,0.0,0.0,390.4,5.4,101.0,101050.0
20060301:0100,25.6,80.3,0.0,0.0,0.0,390.0,5.3,102.0,101060.0";

    #[test]
    fn test_tmy_months_from_different_years() {
        // As written, March goes back in time after February
        assert!(matches!(
            from_reader(TMY.as_bytes()),
            Err(DataQualityError::NonMonotonicTimestamp { index: 4, .. })
        ));

        let series = from_reader_tmy(TMY.as_bytes(), 2024).unwrap();
        assert_eq!(series.len(), 6);
        assert!(series.timestamps().all(|t| t.year() == 2024));
        assert_eq!(
            series.data()[3].timestamp,
            Utc.with_ymd_and_hms(2024, 2, 29, 23, 0, 0).unwrap()
        );
        assert_eq!(
            series.data()[4].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert_close!(5.3, series.data()[5].wind_speed, 1e-6);
    }

    #[test]
    fn test_tmy_leap_day_is_dropped() {
        let series = from_reader_tmy(TMY.as_bytes(), 2023).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(
            series.data()[3].timestamp,
            Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            from_file("./this/file/does/not/exist.csv"),
            Err(DataQualityError::Io(_))
        ));
        assert!(matches!(
            from_file_tmy("./this/file/does/not/exist.csv", 2023),
            Err(DataQualityError::Io(_))
        ));
    }
}
