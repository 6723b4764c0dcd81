use scrollvis_protocol::{Ease, PointerEvents, Selector, Tone, Transition, VisualCommand};

use super::{Panel, hide, hide_now, show};
use crate::config::Timing;
use crate::stage::Stage;

/// A line chart whose newest series is drawn in by a path reveal, followed by
/// a slowly fading-in label.
#[derive(Debug, Clone)]
pub struct LinePanel {
    root: Selector,
    path: Selector,
    label: Selector,
    stroke: Option<Tone>,
    fade: Transition,
    reveal: Transition,
    label_fade: Transition,
}

impl LinePanel {
    fn new(name: &str, stroke: Option<Tone>, timing: &Timing) -> Self {
        Self {
            root: Selector::class(&format!("{name}_plot")),
            path: Selector::id(&format!("{name}_path")),
            label: Selector::id(&format!("{name}_path_text")),
            stroke,
            fade: Transition::new(timing.fade_ms),
            reveal: Transition::new(timing.reveal_ms).with_ease(Ease::Exp),
            label_fade: Transition::new(timing.label_ms).with_ease(Ease::Exp),
        }
    }

    /// Global temperature anomaly; the stroke settles on a highlight colour
    /// as it is drawn.
    pub fn temperature(timing: &Timing) -> Self {
        Self::new("temp", Some(Tone::TemperatureHighlight), timing)
    }

    /// CO2 emissions over the temperature line.
    pub fn co2(timing: &Timing) -> Self {
        Self::new("co2", None, timing)
    }

    /// Annual CO2 emission rate over both earlier lines.
    pub fn co2_rate(timing: &Timing) -> Self {
        Self::new("co2_ratio", None, timing)
    }

    pub fn path(&self) -> &Selector {
        &self.path
    }

    pub fn label(&self) -> &Selector {
        &self.label
    }
}

impl Panel for LinePanel {
    fn root(&self) -> &Selector {
        &self.root
    }

    fn enter(&self, stage: &mut Stage) {
        stage.push(show(&self.root, self.fade));
        stage.push(VisualCommand::RevealPath {
            target: self.path.clone(),
            stroke: self.stroke,
            transition: self.reveal,
        });
        // The label restarts from transparent every time so it trails the
        // reveal again.
        stage.push(hide_now(&self.label));
        stage.push(VisualCommand::Fade {
            target: self.label.clone(),
            opacity: 1.0,
            pointer_events: Some(PointerEvents::All),
            transition: Some(self.label_fade),
        });
    }

    fn exit(&self, stage: &mut Stage) {
        stage.push(hide(&self.root, self.fade));
        stage.push(hide_now(&self.label));
    }
}
