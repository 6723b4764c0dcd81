use serde::Serialize;

use super::records::{GenerationTable, GeoLookup, GeoPoint, RankedCountry, TempEmissionRow};
use super::{DataError, DataSource, DatasetStore, Row};

/// Every dataset the climate story loads, by name.
pub const DATASETS: [&str; 10] = [
    "annual_temp_emissions",
    "map2D",
    "geocoding",
    "solar_generation",
    "wind_generation",
    "hydro_generation",
    "carbon_generation",
    "renewables_generation",
    "top_countries_ratio",
    "regions_mapping",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnergyKind {
    Solar,
    Wind,
    Hydro,
    Carbon,
    Renewables,
}

impl EnergyKind {
    pub fn dataset(self) -> &'static str {
        match self {
            Self::Solar => "solar_generation",
            Self::Wind => "wind_generation",
            Self::Hydro => "hydro_generation",
            Self::Carbon => "carbon_generation",
            Self::Renewables => "renewables_generation",
        }
    }
}

impl std::fmt::Display for EnergyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solar => write!(f, "Solar"),
            Self::Wind => write!(f, "Wind"),
            Self::Hydro => write!(f, "Hydro"),
            Self::Carbon => write!(f, "Carbon"),
            Self::Renewables => write!(f, "Renewables"),
        }
    }
}

/// A generation value placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedGeneration {
    pub country: String,
    pub point: GeoPoint,
    pub generation: f64,
}

/// Validated, typed content of every dataset the story needs.
#[derive(Debug, Clone)]
pub struct StoryData {
    pub temp_emissions: Vec<TempEmissionRow>,
    /// World outline GeoJSON, drawn by the host.
    pub world: serde_json::Value,
    pub geo: GeoLookup,
    pub solar: GenerationTable,
    pub wind: GenerationTable,
    pub hydro: GenerationTable,
    pub carbon: GenerationTable,
    pub renewables: GenerationTable,
    pub top_countries: Vec<RankedCountry>,
    pub regions: Vec<Row>,
}

impl StoryData {
    /// Load all [`DATASETS`] from `source` and validate them.
    pub fn load<S: DataSource + ?Sized>(source: &S) -> Result<Self, DataError> {
        let store = DatasetStore::load_all(source, &DATASETS)?;
        Self::from_store(&store)
    }

    pub fn from_store(store: &DatasetStore) -> Result<Self, DataError> {
        let generation = |kind: EnergyKind| {
            GenerationTable::from_table(kind.dataset(), store.table(kind.dataset())?)
        };
        Ok(Self {
            temp_emissions: TempEmissionRow::from_table(
                "annual_temp_emissions",
                store.table("annual_temp_emissions")?,
            )?,
            world: store.geo("map2D")?.clone(),
            geo: GeoLookup::from_table("geocoding", store.table("geocoding")?)?,
            solar: generation(EnergyKind::Solar)?,
            wind: generation(EnergyKind::Wind)?,
            hydro: generation(EnergyKind::Hydro)?,
            carbon: generation(EnergyKind::Carbon)?,
            renewables: generation(EnergyKind::Renewables)?,
            top_countries: RankedCountry::from_table(
                "top_countries_ratio",
                store.table("top_countries_ratio")?,
            )?,
            regions: store.table("regions_mapping")?.to_vec(),
        })
    }

    pub fn generation(&self, kind: EnergyKind) -> &GenerationTable {
        match kind {
            EnergyKind::Solar => &self.solar,
            EnergyKind::Wind => &self.wind,
            EnergyKind::Hydro => &self.hydro,
            EnergyKind::Carbon => &self.carbon,
            EnergyKind::Renewables => &self.renewables,
        }
    }

    /// Rows of `kind` for `year` joined with their country's coordinates.
    /// Countries without a geocoding entry are left off the map.
    pub fn located_generation(&self, kind: EnergyKind, year: u16) -> Vec<LocatedGeneration> {
        self.generation(kind)
            .for_year(year)
            .filter_map(|row| {
                self.geo.get(&row.country).map(|point| LocatedGeneration {
                    country: row.country.clone(),
                    point,
                    generation: row.generation,
                })
            })
            .collect()
    }
}
