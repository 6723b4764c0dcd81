//! Glue between a scroll tracker and a coordinator for hosts that only
//! report raw scroll offsets.

use scrollvis_protocol::{Selector, VisualCommand};
use thiserror::Error;
use tracing::debug;

use crate::config::StoryConfig;
use crate::coordinator::{Coordinator, CoordinatorError};
use crate::stage::Stage;
use crate::tracker::{ScrollEvent, ScrollTracker, StepMarker, TrackerError};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{steps} step markers for {sections} sections")]
    StepCountMismatch { steps: usize, sections: usize },
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

/// Owns the tracker, the coordinator and the command buffer for one story
/// instance.
#[derive(Debug)]
pub struct ScrollDriver {
    tracker: ScrollTracker,
    coordinator: Coordinator,
    stage: Stage,
    steps: Selector,
    highlight_steps: bool,
    dimmed_opacity: f64,
    progress: Option<(usize, f64)>,
}

impl ScrollDriver {
    /// There must be exactly one step marker per section.
    pub fn new(
        coordinator: Coordinator,
        steps: Vec<StepMarker>,
        config: &StoryConfig,
    ) -> Result<Self, DriverError> {
        check_counts(steps.len(), coordinator.len())?;
        Ok(Self {
            tracker: ScrollTracker::new(steps, config.tracker.clone())?,
            coordinator,
            stage: Stage::new(),
            steps: Selector::class("step"),
            highlight_steps: config.highlight_steps,
            dimmed_opacity: config.dimmed_step_opacity,
            progress: None,
        })
    }

    pub fn active_index(&self) -> Option<usize> {
        self.coordinator.active_index()
    }

    /// Last progress reported, with the section it belongs to.
    pub fn progress(&self) -> Option<(usize, f64)> {
        self.progress
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    /// Feed a scroll offset and collect the commands it produced.
    pub fn scroll_to(&mut self, scroll_top: f64) -> Result<Vec<VisualCommand>, CoordinatorError> {
        for event in self.tracker.position(scroll_top) {
            match event {
                ScrollEvent::ActiveChanged(index) => self.change_active(index)?,
                ScrollEvent::Progress { index, progress } => self.dispatch(index, progress)?,
            }
        }
        Ok(self.stage.drain())
    }

    /// Entry point for hosts running their own scroll observer.
    pub fn on_active_change(&mut self, index: usize) -> Result<Vec<VisualCommand>, CoordinatorError> {
        self.change_active(index)?;
        Ok(self.stage.drain())
    }

    pub fn on_progress(
        &mut self,
        index: usize,
        progress: f64,
    ) -> Result<Vec<VisualCommand>, CoordinatorError> {
        self.dispatch(index, progress)?;
        Ok(self.stage.drain())
    }

    /// Swap in new step measurements after a resize.
    pub fn remeasure(&mut self, steps: Vec<StepMarker>) -> Result<(), DriverError> {
        check_counts(steps.len(), self.coordinator.len())?;
        self.tracker.remeasure(steps)?;
        debug!(steps = self.tracker.steps().len(), "step markers remeasured");
        Ok(())
    }

    fn dispatch(&mut self, index: usize, progress: f64) -> Result<(), CoordinatorError> {
        self.coordinator.update(index, progress, &mut self.stage)?;
        self.progress = Some((index, progress));
        Ok(())
    }

    fn change_active(&mut self, index: usize) -> Result<(), CoordinatorError> {
        self.coordinator.activate(index, &mut self.stage)?;
        if self.highlight_steps {
            for step in 0..self.coordinator.len() {
                let opacity = if step == index { 1.0 } else { self.dimmed_opacity };
                self.stage.push(VisualCommand::Fade {
                    target: self.steps.nth(step),
                    opacity,
                    pointer_events: None,
                    transition: None,
                });
            }
        }
        Ok(())
    }
}

fn check_counts(steps: usize, sections: usize) -> Result<(), DriverError> {
    if steps != sections {
        return Err(DriverError::StepCountMismatch { steps, sections });
    }
    Ok(())
}
