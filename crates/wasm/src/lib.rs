use scrollvis_core::data::{DatasetStore, EnergyKind};
use scrollvis_core::{
    Coordinator, Error, SECTION_NAMES, ScrollDriver, StepMarker, StoryConfig, StoryData,
    climate_story,
};
use scrollvis_protocol::VisualCommand;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// One story instance bound to a page. The page owns it and drops it when
/// the story unmounts, so several stories can live side by side.
#[wasm_bindgen]
pub struct ScrollVis {
    data: StoryData,
    driver: ScrollDriver,
}

#[wasm_bindgen]
impl ScrollVis {
    /// `datasets_json` is an object of dataset name to rows (or GeoJSON),
    /// `config_json` may be empty for defaults, `steps_json` is an array of
    /// `{top, height}` step measurements.
    #[wasm_bindgen(constructor)]
    pub fn new(datasets_json: &str, config_json: &str, steps_json: &str) -> Result<ScrollVis, JsError> {
        Self::build(datasets_json, config_json, steps_json).map_err(js_error)
    }

    /// Replace the step measurements after a resize.
    pub fn set_steps(&mut self, steps_json: &str) -> Result<(), JsError> {
        let steps = parse_steps(steps_json).map_err(js_error)?;
        self.driver.remeasure(steps).map_err(js_error)
    }

    /// Feed the container's scroll offset; returns commands as JSON.
    pub fn scroll_to(&mut self, scroll_top: f64) -> Result<String, JsError> {
        let commands = self.commands_for(scroll_top).map_err(js_error)?;
        to_json(&commands)
    }

    /// For pages running their own scroll observer.
    pub fn activate(&mut self, index: usize) -> Result<String, JsError> {
        let commands = self.driver.on_active_change(index).map_err(js_error)?;
        to_json(&commands)
    }

    pub fn update(&mut self, index: usize, progress: f64) -> Result<String, JsError> {
        let commands = self.driver.on_progress(index, progress).map_err(js_error)?;
        to_json(&commands)
    }

    /// Active section index, or `undefined` before the first activation.
    pub fn active_index(&self) -> Option<usize> {
        self.driver.active_index()
    }

    pub fn section_names(&self) -> Result<String, JsError> {
        to_json(&SECTION_NAMES)
    }

    /// Circles for one map layer: `[{country, point: {lon, lat}, generation}]`.
    pub fn map_points(&self, kind: &str, year: u16) -> Result<String, JsError> {
        let kind = parse_kind(kind)?;
        to_json(&self.data.located_generation(kind, year))
    }

    /// Largest generation of a layer over all years, for the radius scale.
    pub fn max_generation(&self, kind: &str) -> Result<f64, JsError> {
        let kind = parse_kind(kind)?;
        Ok(self.data.generation(kind).max_generation())
    }
}

impl ScrollVis {
    fn build(datasets_json: &str, config_json: &str, steps_json: &str) -> Result<Self, BridgeError> {
        let config = if config_json.trim().is_empty() {
            StoryConfig::default()
        } else {
            StoryConfig::from_json(config_json).map_err(Error::from)?
        };
        let store = DatasetStore::from_json_bundle(datasets_json).map_err(Error::from)?;
        let data = StoryData::from_store(&store).map_err(Error::from)?;
        let registry = climate_story(&data, &config).map_err(Error::from)?;
        let steps = parse_steps(steps_json)?;
        let driver =
            ScrollDriver::new(Coordinator::new(registry), steps, &config).map_err(Error::from)?;
        Ok(Self { data, driver })
    }

    fn commands_for(&mut self, scroll_top: f64) -> Result<Vec<VisualCommand>, BridgeError> {
        Ok(self.driver.scroll_to(scroll_top).map_err(Error::from)?)
    }
}

/// Errors are kept as Rust values until they cross into JS, so the bridge
/// logic runs on native targets too.
#[derive(Debug, thiserror::Error)]
enum BridgeError {
    #[error(transparent)]
    Story(#[from] Error),
    #[error("invalid step measurements: {0}")]
    Steps(#[source] serde_json::Error),
}

fn parse_steps(steps_json: &str) -> Result<Vec<StepMarker>, BridgeError> {
    serde_json::from_str(steps_json).map_err(BridgeError::Steps)
}

fn parse_kind(kind: &str) -> Result<EnergyKind, JsError> {
    match kind {
        "solar" => Ok(EnergyKind::Solar),
        "wind" => Ok(EnergyKind::Wind),
        "hydro" => Ok(EnergyKind::Hydro),
        "carbon" => Ok(EnergyKind::Carbon),
        "renewables" => Ok(EnergyKind::Renewables),
        _ => Err(JsError::new(&format!("unknown energy kind: {kind}"))),
    }
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(js_error)
}
