use serde::{Deserialize, Serialize};

use crate::selector::Selector;
use crate::tone::Tone;
use crate::types::{PointerEvents, Transition};

/// A single visual instruction for the host.
///
/// Sections emit a `Vec<VisualCommand>` per activation. Hosts apply them in
/// order; every command carries all the data it needs. A command with a
/// `transition` starts an animation and returns immediately, one without it
/// applies at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum VisualCommand {
    /// Change the opacity (and optionally the pointer-event mode) of every
    /// mark matching `target`.
    Fade {
        target: Selector,
        opacity: f64,
        pointer_events: Option<PointerEvents>,
        transition: Option<Transition>,
    },

    /// Replace the text content of `target`.
    SetText {
        target: Selector,
        text: String,
        transition: Option<Transition>,
    },

    /// Replay a path-drawing reveal: reset the stroke dash offset to the
    /// path's full length, then transition it to zero. Hosts must reset on
    /// every occurrence so re-entering a section replays the animation.
    RevealPath {
        target: Selector,
        stroke: Option<Tone>,
        transition: Transition,
    },

    /// Move a mark to a normalized vertical position (0 = chart floor,
    /// 1 = chart ceiling) and set its opacity.
    PlaceMark {
        target: Selector,
        y_fraction: f64,
        opacity: f64,
        transition: Option<Transition>,
    },

    /// Start of the commands emitted by one section's activation.
    BeginSection { index: usize, name: String },

    /// End of the current section's commands.
    EndSection,
}

impl VisualCommand {
    /// The selector this command acts on, if any.
    pub fn target(&self) -> Option<&Selector> {
        match self {
            Self::Fade { target, .. }
            | Self::SetText { target, .. }
            | Self::RevealPath { target, .. }
            | Self::PlaceMark { target, .. } => Some(target),
            Self::BeginSection { .. } | Self::EndSection => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_json_shape() {
        let cmd = VisualCommand::Fade {
            target: Selector::class("temp_plot"),
            opacity: 1.0,
            pointer_events: Some(PointerEvents::All),
            transition: Some(Transition::new(600)),
        };
        let json = serde_json::to_value(&cmd).unwrap_or_default();
        assert_eq!(json["op"], "fade");
        assert_eq!(json["target"], ".temp_plot");
        assert_eq!(json["pointer_events"], "all");
        assert_eq!(json["transition"]["duration_ms"], 600);
    }

    #[test]
    fn section_markers_have_no_target() {
        let begin = VisualCommand::BeginSection {
            index: 3,
            name: "co2-rate".into(),
        };
        assert!(begin.target().is_none());
        assert!(VisualCommand::EndSection.target().is_none());

        let reveal = VisualCommand::RevealPath {
            target: Selector::id("co2_path"),
            stroke: None,
            transition: Transition::new(4000),
        };
        assert_eq!(reveal.target().map(Selector::as_str), Some("#co2_path"));
    }
}
