//! Visualization panels.
//!
//! A panel owns a group of marks the host has already drawn (hidden) and
//! knows how to bring them in and out. Panels never draw: they emit
//! [`VisualCommand`]s onto a [`Stage`] and return without waiting.

pub mod globe;
pub mod line;
pub mod map;
pub mod ranking;

use scrollvis_protocol::{PointerEvents, Selector, Transition, VisualCommand};

use crate::stage::Stage;

pub use globe::GlobePanel;
pub use line::LinePanel;
pub use map::{MapFrame, MapLayer};
pub use ranking::RankingPanel;

pub trait Panel {
    /// Selector of the group holding all of this panel's marks.
    fn root(&self) -> &Selector;

    /// Transition this panel's marks to visible. Must be safe to repeat and
    /// must restart any reveal animation from its beginning.
    fn enter(&self, stage: &mut Stage);

    /// Transition this panel's marks to invisible.
    fn exit(&self, stage: &mut Stage);
}

pub(crate) fn show(target: &Selector, fade: Transition) -> VisualCommand {
    VisualCommand::Fade {
        target: target.clone(),
        opacity: 1.0,
        pointer_events: Some(PointerEvents::All),
        transition: Some(fade),
    }
}

pub(crate) fn hide(target: &Selector, fade: Transition) -> VisualCommand {
    VisualCommand::Fade {
        target: target.clone(),
        opacity: 0.0,
        pointer_events: Some(PointerEvents::None),
        transition: Some(fade),
    }
}

/// Hide without a transition, for marks that must be gone before anything
/// else animates.
pub(crate) fn hide_now(target: &Selector) -> VisualCommand {
    VisualCommand::Fade {
        target: target.clone(),
        opacity: 0.0,
        pointer_events: Some(PointerEvents::None),
        transition: None,
    }
}

/// Change opacity only, leaving pointer events alone.
pub(crate) fn fade_to(target: &Selector, opacity: f64, fade: Transition) -> VisualCommand {
    VisualCommand::Fade {
        target: target.clone(),
        opacity,
        pointer_events: None,
        transition: Some(fade),
    }
}
