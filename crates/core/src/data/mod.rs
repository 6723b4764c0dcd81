//! Datasets held in memory for the session.
//!
//! The host's loader (d3's CSV reader in the browser, JSON files for the
//! terminal previewer) turns files into rows; this module stores them by
//! name and offers typed views over the tables the story needs.

pub mod records;
pub mod story_data;

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub use records::{GenerationRow, GenerationTable, GeoLookup, GeoPoint, RankedCountry, TempEmissionRow};
pub use story_data::{DATASETS, EnergyKind, LocatedGeneration, StoryData};

/// One table row as the host's CSV loader produces it: every cell a string.
pub type Row = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dataset {
    Table(Vec<Row>),
    /// Anything that is not a table of string cells, e.g. GeoJSON.
    Geo(serde_json::Value),
}

impl Dataset {
    pub fn as_table(&self) -> Option<&[Row]> {
        match self {
            Self::Table(rows) => Some(rows),
            Self::Geo(_) => None,
        }
    }

    pub fn as_geo(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Geo(value) => Some(value),
            Self::Table(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("dataset `{0}` was not loaded")]
    Missing(String),
    #[error("reading dataset `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("decoding dataset `{name}`: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset `{0}` is not a table")]
    NotATable(String),
    #[error("dataset `{0}` is not a JSON document")]
    NotGeo(String),
    #[error("dataset `{dataset}` row {row}: missing column `{column}`")]
    MissingColumn {
        dataset: String,
        row: usize,
        column: String,
    },
    #[error("dataset `{dataset}` row {row}: `{column}` is not a number: {value:?}")]
    NotANumber {
        dataset: String,
        row: usize,
        column: String,
        value: String,
    },
    #[error("dataset `{0}` is empty")]
    Empty(String),
}

/// Somewhere datasets can be loaded from by name.
pub trait DataSource {
    fn load(&self, name: &str) -> Result<Dataset, DataError>;
}

/// Reads `<dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DataSource for JsonDirSource {
    fn load(&self, name: &str) -> Result<Dataset, DataError> {
        let path = self.dir.join(format!("{name}.json"));
        let bytes = std::fs::read(&path).map_err(|source| DataError::Io {
            name: name.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| DataError::Json {
            name: name.to_string(),
            source,
        })
    }
}

/// Mapping from dataset name to content, filled once at startup.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    datasets: HashMap<String, Dataset>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every dataset in `names`. Stops at the first failure: the story
    /// must not start with part of its data missing.
    pub fn load_all<S: DataSource + ?Sized>(source: &S, names: &[&str]) -> Result<Self, DataError> {
        let mut store = Self::new();
        for &name in names {
            match source.load(name) {
                Ok(dataset) => {
                    debug!(name, "dataset loaded");
                    store.insert(name, dataset);
                }
                Err(e) => {
                    error!(name, error = %e, "dataset failed to load");
                    return Err(e);
                }
            }
        }
        Ok(store)
    }

    /// Parse a JSON object of `name -> dataset`, as a browser host sends it
    /// after fetching everything.
    pub fn from_json_bundle(text: &str) -> Result<Self, DataError> {
        let datasets: HashMap<String, Dataset> =
            serde_json::from_str(text).map_err(|source| DataError::Json {
                name: "bundle".to_string(),
                source,
            })?;
        Ok(Self { datasets })
    }

    pub fn insert(&mut self, name: impl Into<String>, dataset: Dataset) {
        self.datasets.insert(name.into(), dataset);
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&Dataset, DataError> {
        self.get(name)
            .ok_or_else(|| DataError::Missing(name.to_string()))
    }

    pub fn table(&self, name: &str) -> Result<&[Row], DataError> {
        self.require(name)?
            .as_table()
            .ok_or_else(|| DataError::NotATable(name.to_string()))
    }

    pub fn geo(&self, name: &str) -> Result<&serde_json::Value, DataError> {
        self.require(name)?
            .as_geo()
            .ok_or_else(|| DataError::NotGeo(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl DataSource for Fixed {
        fn load(&self, name: &str) -> Result<Dataset, DataError> {
            match name {
                "ok" => Ok(Dataset::Table(vec![Row::new()])),
                other => Err(DataError::Missing(other.to_string())),
            }
        }
    }

    #[test]
    fn untagged_dataset_shapes() {
        let table: Dataset = serde_json::from_str(r#"[{"year":"1990","Value":"0.3"}]"#).unwrap();
        assert_eq!(table.as_table().map(<[Row]>::len), Some(1));

        let geo: Dataset =
            serde_json::from_str(r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        assert!(geo.as_geo().is_some());

        // Numeric cells are not the loader's shape, so this is not a table.
        let numeric: Dataset = serde_json::from_str(r#"[{"year":1990}]"#).unwrap();
        assert!(numeric.as_table().is_none());
    }

    #[test]
    fn load_all_stops_on_first_failure() {
        let store = DatasetStore::load_all(&Fixed, &["ok"]).unwrap();
        assert_eq!(store.len(), 1);

        let err = DatasetStore::load_all(&Fixed, &["ok", "nope", "ok"]).unwrap_err();
        assert!(matches!(err, DataError::Missing(name) if name == "nope"));
    }

    #[test]
    fn typed_accessors_report_shape_errors() {
        let mut store = DatasetStore::new();
        store.insert("world", Dataset::Geo(serde_json::json!({"features": []})));
        store.insert("rows", Dataset::Table(Vec::new()));

        assert!(store.geo("world").is_ok());
        assert!(matches!(store.table("world"), Err(DataError::NotATable(_))));
        assert!(matches!(store.geo("rows"), Err(DataError::NotGeo(_))));
        assert!(matches!(store.table("absent"), Err(DataError::Missing(_))));
    }

    #[test]
    fn bundle_maps_names_to_datasets() {
        let store = DatasetStore::from_json_bundle(
            r#"{"geocoding":[{"country":"Chile","LON":"-71","LAT":"-35"}],"map2D":{"features":[]}}"#,
        )
        .unwrap();
        let mut names: Vec<_> = store.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["geocoding", "map2D"]);
    }

    #[test]
    fn json_dir_source_reports_missing_file() {
        let source = JsonDirSource::new("/nonexistent/scrollvis-data");
        assert!(matches!(source.load("geocoding"), Err(DataError::Io { .. })));
    }
}
