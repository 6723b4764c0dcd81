//! Typed views over the story's tables.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DataError, Row};

fn cell<'a>(dataset: &str, row_index: usize, row: &'a Row, column: &str) -> Result<&'a str, DataError> {
    row.get(column)
        .map(|s| s.trim())
        .ok_or_else(|| DataError::MissingColumn {
            dataset: dataset.to_string(),
            row: row_index,
            column: column.to_string(),
        })
}

fn number(dataset: &str, row_index: usize, row: &Row, column: &str) -> Result<f64, DataError> {
    let raw = cell(dataset, row_index, row, column)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::NotANumber {
            dataset: dataset.to_string(),
            row: row_index,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// Whole-number cells such as years. Fractions, overflow and negative
/// values for unsigned targets are errors, not truncated.
fn integer<T: FromStr>(dataset: &str, row_index: usize, row: &Row, column: &str) -> Result<T, DataError> {
    let raw = cell(dataset, row_index, row, column)?;
    raw.parse::<T>().map_err(|_| DataError::NotANumber {
        dataset: dataset.to_string(),
        row: row_index,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// One year of the temperature / emissions series. Values are standardized
/// differences from the series average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempEmissionRow {
    pub year: i32,
    pub temperature: f64,
    pub co2: f64,
    pub annual_emission_rate: f64,
}

impl TempEmissionRow {
    pub fn from_table(dataset: &str, rows: &[Row]) -> Result<Vec<Self>, DataError> {
        if rows.is_empty() {
            return Err(DataError::Empty(dataset.to_string()));
        }
        let mut out = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Ok(Self {
                    year: integer(dataset, i, row, "year")?,
                    temperature: number(dataset, i, row, "Value")?,
                    co2: number(dataset, i, row, "co2")?,
                    annual_emission_rate: number(dataset, i, row, "annual_emission_rate")?,
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;
        out.sort_by_key(|r| r.year);
        Ok(out)
    }
}

/// Generation of one energy source in one country and year, in TWh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRow {
    pub country: String,
    pub year: u16,
    pub generation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationTable {
    rows: Vec<GenerationRow>,
}

impl GenerationTable {
    pub fn from_table(dataset: &str, rows: &[Row]) -> Result<Self, DataError> {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Ok(GenerationRow {
                    country: cell(dataset, i, row, "country")?.to_string(),
                    year: integer(dataset, i, row, "year")?,
                    generation: number(dataset, i, row, "generation")?,
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;
        Ok(Self { rows })
    }

    pub fn for_year(&self, year: u16) -> impl Iterator<Item = &GenerationRow> {
        self.rows.iter().filter(move |r| r.year == year)
    }

    /// Largest generation over every year; the domain maximum of the
    /// circle-radius scale.
    pub fn max_generation(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.generation)
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// Country name to centroid, built from the geocoding table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoLookup {
    points: HashMap<String, GeoPoint>,
}

impl GeoLookup {
    pub fn from_table(dataset: &str, rows: &[Row]) -> Result<Self, DataError> {
        let mut points = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let country = cell(dataset, i, row, "country")?.to_string();
            let point = GeoPoint {
                lon: number(dataset, i, row, "LON")?,
                lat: number(dataset, i, row, "LAT")?,
            };
            points.insert(country, point);
        }
        Ok(Self { points })
    }

    pub fn get(&self, country: &str) -> Option<GeoPoint> {
        self.points.get(country).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A country's share of renewable generation in total consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCountry {
    pub country: String,
    pub ratio: f64,
}

impl RankedCountry {
    /// The ratios table is a single row with one column per country.
    /// Returned highest ratio first, i.e. in rank order.
    pub fn from_table(dataset: &str, rows: &[Row]) -> Result<Vec<Self>, DataError> {
        let Some(row) = rows.first() else {
            return Err(DataError::Empty(dataset.to_string()));
        };
        let mut ranked = row
            .keys()
            .map(|country| {
                Ok(Self {
                    country: country.clone(),
                    ratio: number(dataset, 0, row, country)?,
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;
        ranked.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
        Ok(ranked)
    }
}
