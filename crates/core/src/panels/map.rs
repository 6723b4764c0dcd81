use scrollvis_protocol::{Selector, Transition, VisualCommand};

use super::{Panel, hide, show};
use crate::config::Timing;
use crate::data::EnergyKind;
use crate::stage::Stage;

pub const MAP_TITLE: &str = "Countries and Renewable Energy Generation by Terawatt-hours";

/// The base world map and its title, shared by every map section.
#[derive(Debug, Clone)]
pub struct MapFrame {
    root: Selector,
    title_target: Selector,
    title: String,
    fade: Transition,
}

impl MapFrame {
    pub fn new(title: impl Into<String>, timing: &Timing) -> Self {
        let root = Selector::id("map-2d");
        Self {
            title_target: root.descendant("text"),
            root,
            title: title.into(),
            fade: Transition::new(timing.fade_ms),
        }
    }
}

impl Panel for MapFrame {
    fn root(&self) -> &Selector {
        &self.root
    }

    fn enter(&self, stage: &mut Stage) {
        stage.push(VisualCommand::SetText {
            target: self.title_target.clone(),
            text: self.title.clone(),
            transition: Some(self.fade),
        });
        stage.push(show(&self.root, self.fade));
    }

    fn exit(&self, stage: &mut Stage) {
        stage.push(hide(&self.root, self.fade));
    }
}

/// One layer of proportional circles on the map.
#[derive(Debug, Clone)]
pub struct MapLayer {
    kind: EnergyKind,
    root: Selector,
    fade: Transition,
}

impl MapLayer {
    pub fn new(kind: EnergyKind, timing: &Timing) -> Self {
        let group = match kind {
            EnergyKind::Solar => "map-2d-solar",
            EnergyKind::Wind => "map-2d-wind",
            EnergyKind::Hydro => "map-2d-hydro",
            EnergyKind::Carbon => "map-2d-carbon",
            EnergyKind::Renewables => "map-2d-renewables",
        };
        Self {
            kind,
            root: Selector::class(group).descendant("circle"),
            fade: Transition::new(timing.fade_ms),
        }
    }

    pub fn kind(&self) -> EnergyKind {
        self.kind
    }
}

impl Panel for MapLayer {
    fn root(&self) -> &Selector {
        &self.root
    }

    fn enter(&self, stage: &mut Stage) {
        stage.push(show(&self.root, self.fade));
    }

    fn exit(&self, stage: &mut Stage) {
        stage.push(hide(&self.root, self.fade));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_targets_circles_of_its_group() {
        let layer = MapLayer::new(EnergyKind::Hydro, &Timing::default());
        assert_eq!(layer.root(), &Selector::from(".map-2d-hydro circle"));
        assert_eq!(layer.kind(), EnergyKind::Hydro);
    }

    #[test]
    fn frame_sets_title_before_showing() {
        let frame = MapFrame::new(MAP_TITLE, &Timing::default());
        let mut stage = Stage::new();
        frame.enter(&mut stage);
        assert!(matches!(
            &stage.commands()[0],
            VisualCommand::SetText { target, text, .. }
                if target == &"#map-2d text" && text == MAP_TITLE
        ));
    }
}
