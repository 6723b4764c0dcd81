//! Integration test: load the fixture datasets, build the climate story and
//! scroll through it, checking what the settled scene shows.

use std::path::PathBuf;

use scrollvis_core::data::{DATASETS, DataSource, Dataset, EnergyKind};
use scrollvis_core::{
    DataError, Error, JsonDirSource, SECTION_NAMES, Scene, ScrollDriver, StepMarker, StoryConfig,
    StoryData, StoryPanels, build_story,
};
use scrollvis_protocol::VisualCommand;

const STEP_HEIGHT: f64 = 100.0;

fn fixtures() -> JsonDirSource {
    JsonDirSource::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

fn story() -> (StoryData, ScrollDriver, StoryConfig) {
    let config = StoryConfig::default();
    let steps = StepMarker::uniform(SECTION_NAMES.len(), STEP_HEIGHT);
    let (data, driver) = build_story(&fixtures(), &config, steps).expect("fixture story builds");
    (data, driver, config)
}

/// Scroll offset that puts the trigger line inside step `index`.
fn offset_for(index: usize) -> f64 {
    index as f64 * STEP_HEIGHT + 50.0
}

fn assert_only_active_panels_visible(scene: &Scene, panels: &StoryPanels, active: usize) {
    let beats = panels.beats();
    let shown = beats[active].shown_roots();
    for root in panels.roots() {
        assert_eq!(
            scene.is_visible(root.as_str()),
            shown.contains(&root),
            "{root} visibility wrong with section {} active",
            SECTION_NAMES[active]
        );
    }
}

#[test]
fn fixtures_load_into_typed_tables() {
    let data = StoryData::load(&fixtures()).expect("fixtures load");

    assert_eq!(data.temp_emissions.len(), 5);
    assert_eq!(data.temp_emissions[0].year, 1990);
    assert_eq!(data.geo.len(), 3);
    assert_eq!(data.top_countries[0].country, "Iceland");
    assert_eq!(data.regions.len(), 3);
    assert!(data.world.get("features").is_some());

    // Atlantis has no coordinates and is left off the map.
    let hydro = data.located_generation(EnergyKind::Hydro, 2018);
    assert_eq!(hydro.len(), 3);
    assert!(hydro.iter().all(|g| g.country != "Atlantis"));
    assert_eq!(data.generation(EnergyKind::Carbon).max_generation(), 4732.0);
}

#[test]
fn any_scroll_sequence_leaves_only_the_active_section_visible() {
    let (data, mut driver, config) = story();
    let panels = StoryPanels::new(&data, &config);
    let mut scene = Scene::new();

    for target in [8, 0, 4, 3, 7, 5, 6, 1, 2, 8, 2] {
        let commands = driver.scroll_to(offset_for(target)).expect("scroll");
        scene.apply(&commands);
        assert_eq!(driver.active_index(), Some(target));
        assert_only_active_panels_visible(&scene, &panels, target);
    }
}

#[test]
fn jumping_to_the_end_walks_every_section() {
    let (_, mut driver, _) = story();
    let commands = driver.scroll_to(offset_for(8)).expect("scroll");
    let walked: Vec<usize> = commands
        .iter()
        .filter_map(|c| match c {
            VisualCommand::BeginSection { index, .. } => Some(*index),
            _ => None,
        })
        .collect();
    assert_eq!(walked, (0..=8).collect::<Vec<_>>());

    let back = driver.scroll_to(offset_for(6)).expect("scroll");
    let names: Vec<&str> = back
        .iter()
        .filter_map(|c| match c {
            VisualCommand::BeginSection { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["top-countries", "map-solar"]);
}

#[test]
fn reentering_a_line_section_replays_its_reveal() {
    let (_, mut driver, _) = story();
    let mut scene = Scene::new();

    for target in [1, 2, 1] {
        scene.apply(&driver.scroll_to(offset_for(target)).expect("scroll"));
    }

    let path = scene.get("#temp_path").expect("temperature path touched");
    assert_eq!(path.reveals, 2);
    assert_eq!(scene.get("#co2_path").map(|m| m.reveals), Some(1));
    assert!(scene.is_visible("#temp_path_text"));
    assert!(!scene.is_visible("#co2_path_text"));
}

#[test]
fn ranking_dots_settle_at_their_heights() {
    let (_, mut driver, _) = story();
    let mut scene = Scene::new();
    scene.apply(&driver.scroll_to(offset_for(7)).expect("scroll"));

    let first = scene.get(".dot:nth-of-type(1)").expect("first dot placed");
    assert_eq!(first.y_fraction, Some(1.0));
    let last = scene.get(".dot:nth-of-type(4)").expect("last dot placed");
    assert_eq!(last.y_fraction, Some(0.0));
    assert!(scene.is_visible(".dot:nth-of-type(4)"));

    // Leaving the section pulls every dot back up and hides it.
    scene.apply(&driver.scroll_to(offset_for(8)).expect("scroll"));
    assert!(!scene.is_visible(".dot:nth-of-type(1)"));
}

#[test]
fn map_title_is_set_when_the_map_appears() {
    let (_, mut driver, _) = story();
    let mut scene = Scene::new();
    scene.apply(&driver.scroll_to(offset_for(4)).expect("scroll"));
    let title = scene.get("#map-2d text").and_then(|m| m.text.clone());
    assert_eq!(
        title.as_deref(),
        Some("Countries and Renewable Energy Generation by Terawatt-hours")
    );
}

struct Without<'a> {
    inner: &'a JsonDirSource,
    missing: &'static str,
}

impl DataSource for Without<'_> {
    fn load(&self, name: &str) -> Result<Dataset, DataError> {
        if name == self.missing {
            return Err(DataError::Missing(name.to_string()));
        }
        self.inner.load(name)
    }
}

#[test]
fn a_missing_dataset_stops_the_story_from_starting() {
    let inner = fixtures();
    for missing in DATASETS {
        let source = Without {
            inner: &inner,
            missing,
        };
        let result = build_story(
            &source,
            &StoryConfig::default(),
            StepMarker::uniform(SECTION_NAMES.len(), STEP_HEIGHT),
        );
        assert!(
            matches!(result, Err(Error::Data(DataError::Missing(ref name))) if name == missing),
            "story started without {missing}"
        );
    }
}

#[test]
fn wrong_step_count_is_rejected() {
    let result = build_story(
        &fixtures(),
        &StoryConfig::default(),
        StepMarker::uniform(3, STEP_HEIGHT),
    );
    assert!(matches!(result, Err(Error::Driver(_))));
}
