//! Scroll-driven activation of story sections.
//!
//! A host measures its step elements and reports scroll offsets; the
//! [`driver::ScrollDriver`] turns them into section activations and returns
//! the [`scrollvis_protocol::VisualCommand`]s the host should play.

pub mod config;
pub mod coordinator;
pub mod data;
pub mod driver;
pub mod panels;
pub mod scene;
pub mod section;
pub mod stage;
pub mod story;
pub mod tracker;

use thiserror::Error;

pub use config::{ConfigError, StoryConfig, Timing, TrackerConfig};
pub use coordinator::{ActivationPath, Coordinator, CoordinatorError, CoordinatorState, Direction};
pub use data::{DataError, DataSource, Dataset, DatasetStore, JsonDirSource, StoryData};
pub use driver::{DriverError, ScrollDriver};
pub use scene::{MarkState, Scene};
pub use section::{RegistryError, Section, SectionRegistry};
pub use stage::Stage;
pub use story::{SECTION_NAMES, StoryPanels, climate_story};
pub use tracker::{ScrollEvent, ScrollTracker, StepMarker, TrackerError};

/// Any error the story can raise while loading or running.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

/// Load the datasets, build the story and wire it to `steps`.
pub fn build_story<S: DataSource + ?Sized>(
    source: &S,
    config: &StoryConfig,
    steps: Vec<StepMarker>,
) -> Result<(StoryData, ScrollDriver), Error> {
    let data = StoryData::load(source)?;
    let registry = climate_story(&data, config)?;
    let driver = ScrollDriver::new(Coordinator::new(registry), steps, config)?;
    Ok((data, driver))
}
