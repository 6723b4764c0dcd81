use scrollvis_protocol::{Selector, Transition};

use super::{Panel, fade_to, hide, show};
use crate::config::Timing;
use crate::stage::Stage;

const LAND_OPACITY: f64 = 0.6;

/// A rotating orthographic globe. Rotation is driven by the host's timer;
/// the panel only controls visibility.
#[derive(Debug, Clone)]
pub struct GlobePanel {
    root: Selector,
    land: Selector,
    graticule: Selector,
    fade: Transition,
}

impl GlobePanel {
    /// The opening globe, drawn in parched colours.
    pub fn dry(timing: &Timing) -> Self {
        Self::with_suffix("dry", timing)
    }

    /// The closing globe, drawn in green.
    pub fn rich(timing: &Timing) -> Self {
        Self::with_suffix("rich", timing)
    }

    fn with_suffix(suffix: &str, timing: &Timing) -> Self {
        Self {
            root: Selector::class(&format!("{suffix}_earth")),
            land: Selector::class(&format!("segment_{suffix}")),
            graticule: Selector::class(&format!("graticule_{suffix}")),
            fade: Transition::new(timing.fade_ms),
        }
    }
}

impl Panel for GlobePanel {
    fn root(&self) -> &Selector {
        &self.root
    }

    fn enter(&self, stage: &mut Stage) {
        stage.push(show(&self.root, self.fade));
        stage.push(fade_to(&self.land, LAND_OPACITY, self.fade));
        stage.push(fade_to(&self.graticule, 1.0, self.fade));
    }

    fn exit(&self, stage: &mut Stage) {
        stage.push(hide(&self.root, self.fade));
        stage.push(fade_to(&self.land, 0.0, self.fade));
        stage.push(fade_to(&self.graticule, 0.0, self.fade));
    }
}

#[cfg(test)]
mod tests {
    use scrollvis_protocol::VisualCommand;

    use super::*;

    #[test]
    fn selectors_follow_suffix() {
        let timing = Timing::default();
        assert_eq!(GlobePanel::dry(&timing).root(), &Selector::class("dry_earth"));
        assert_eq!(GlobePanel::rich(&timing).root(), &Selector::class("rich_earth"));
    }

    #[test]
    fn enter_dims_land_under_full_graticule() {
        let panel = GlobePanel::rich(&Timing::default());
        let mut stage = Stage::new();
        panel.enter(&mut stage);
        let land = stage.commands().iter().find_map(|c| match c {
            VisualCommand::Fade {
                target, opacity, ..
            } if target == &".segment_rich" => Some(*opacity),
            _ => None,
        });
        assert_eq!(land, Some(LAND_OPACITY));
    }
}
