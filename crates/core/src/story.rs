//! The climate story: nine sections from a parched globe to a green one.

use std::rc::Rc;

use scrollvis_protocol::Selector;

use crate::config::StoryConfig;
use crate::data::{EnergyKind, StoryData};
use crate::panels::{GlobePanel, LinePanel, MapFrame, MapLayer, Panel, RankingPanel, map::MAP_TITLE};
use crate::section::{RegistryError, Section, SectionRegistry};
use crate::stage::Stage;

/// Section names, in scroll order.
pub const SECTION_NAMES: [&str; 9] = [
    "dry-earth",
    "temperature",
    "co2",
    "co2-rate",
    "map-hydro",
    "map-wind",
    "map-solar",
    "top-countries",
    "rich-earth",
];

/// A section built from panels: on activation the neighbouring panels fade
/// out and this section's panels fade in.
pub struct Beat {
    name: &'static str,
    enter: Vec<Rc<dyn Panel>>,
    exit: Vec<Rc<dyn Panel>>,
}

impl Beat {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            enter: Vec::new(),
            exit: Vec::new(),
        }
    }

    pub fn show(mut self, panel: &Rc<dyn Panel>) -> Self {
        self.enter.push(Rc::clone(panel));
        self
    }

    pub fn hide(mut self, panel: &Rc<dyn Panel>) -> Self {
        self.exit.push(Rc::clone(panel));
        self
    }

    /// Roots of the panels this beat makes visible.
    pub fn shown_roots(&self) -> Vec<Selector> {
        self.enter.iter().map(|p| p.root().clone()).collect()
    }
}

impl Section for Beat {
    fn name(&self) -> &str {
        self.name
    }

    fn activate(&mut self, stage: &mut Stage) {
        for panel in &self.exit {
            panel.exit(stage);
        }
        for panel in &self.enter {
            panel.enter(stage);
        }
    }
}

/// Every panel of the story, shared between the beats that show and hide
/// them.
pub struct StoryPanels {
    pub dry_earth: Rc<dyn Panel>,
    pub temperature: Rc<dyn Panel>,
    pub co2: Rc<dyn Panel>,
    pub co2_rate: Rc<dyn Panel>,
    pub map: Rc<dyn Panel>,
    pub hydro: Rc<dyn Panel>,
    pub wind: Rc<dyn Panel>,
    pub solar: Rc<dyn Panel>,
    pub carbon: Rc<dyn Panel>,
    pub ranking: Rc<dyn Panel>,
    pub rich_earth: Rc<dyn Panel>,
}

impl StoryPanels {
    pub fn new(data: &StoryData, config: &StoryConfig) -> Self {
        let timing = &config.timing;
        Self {
            dry_earth: Rc::new(GlobePanel::dry(timing)),
            temperature: Rc::new(LinePanel::temperature(timing)),
            co2: Rc::new(LinePanel::co2(timing)),
            co2_rate: Rc::new(LinePanel::co2_rate(timing)),
            map: Rc::new(MapFrame::new(MAP_TITLE, timing)),
            hydro: Rc::new(MapLayer::new(EnergyKind::Hydro, timing)),
            wind: Rc::new(MapLayer::new(EnergyKind::Wind, timing)),
            solar: Rc::new(MapLayer::new(EnergyKind::Solar, timing)),
            carbon: Rc::new(MapLayer::new(EnergyKind::Carbon, timing)),
            ranking: Rc::new(RankingPanel::new(&data.top_countries, timing)),
            rich_earth: Rc::new(GlobePanel::rich(timing)),
        }
    }

    /// The root of every panel that belongs to some section.
    pub fn roots(&self) -> Vec<Selector> {
        [
            &self.dry_earth,
            &self.temperature,
            &self.co2,
            &self.co2_rate,
            &self.map,
            &self.hydro,
            &self.wind,
            &self.solar,
            &self.carbon,
            &self.ranking,
            &self.rich_earth,
        ]
        .into_iter()
        .map(|p| p.root().clone())
        .collect()
    }

    /// Each beat hides its immediate neighbours' panels, so a walk through
    /// consecutive beats leaves only the last one's panels visible.
    pub fn beats(&self) -> Vec<Beat> {
        let p = self;
        vec![
            Beat::new(SECTION_NAMES[0])
                .show(&p.dry_earth)
                .hide(&p.temperature),
            Beat::new(SECTION_NAMES[1])
                .hide(&p.dry_earth)
                .show(&p.temperature)
                .hide(&p.co2),
            Beat::new(SECTION_NAMES[2])
                .hide(&p.temperature)
                .show(&p.co2)
                .hide(&p.co2_rate),
            Beat::new(SECTION_NAMES[3])
                .hide(&p.co2)
                .show(&p.co2_rate)
                .hide(&p.map)
                .hide(&p.hydro),
            Beat::new(SECTION_NAMES[4])
                .hide(&p.co2_rate)
                .hide(&p.carbon)
                .show(&p.map)
                .show(&p.hydro)
                .hide(&p.wind),
            Beat::new(SECTION_NAMES[5])
                .hide(&p.hydro)
                .show(&p.map)
                .show(&p.wind)
                .hide(&p.solar),
            Beat::new(SECTION_NAMES[6])
                .hide(&p.wind)
                .show(&p.map)
                .show(&p.solar)
                .hide(&p.ranking),
            Beat::new(SECTION_NAMES[7])
                .hide(&p.solar)
                .hide(&p.map)
                .show(&p.ranking)
                .hide(&p.rich_earth),
            Beat::new(SECTION_NAMES[8])
                .hide(&p.ranking)
                .show(&p.rich_earth),
        ]
    }
}

/// Build the section registry for the climate story.
pub fn climate_story(data: &StoryData, config: &StoryConfig) -> Result<SectionRegistry, RegistryError> {
    let panels = StoryPanels::new(data, config);
    let mut builder = SectionRegistry::builder();
    for (ordinal, beat) in panels.beats().into_iter().enumerate() {
        builder.insert_boxed(ordinal, Box::new(beat));
    }
    builder.build()
}
