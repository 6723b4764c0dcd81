//! Maps a scroll position onto step markers.
//!
//! The tracker is the boundary to the host's layout engine: the host measures
//! each step's top and height (relative to the scrolling container) and feeds
//! scroll offsets in; the tracker answers with [`ScrollEvent`]s.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::TrackerConfig;

/// A measured step element, in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepMarker {
    pub top: f64,
    pub height: f64,
}

impl StepMarker {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// `count` back-to-back steps of equal height starting at 0.
    pub fn uniform(count: usize, height: f64) -> Vec<Self> {
        (0..count)
            .map(|i| Self::new(i as f64 * height, height))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    ActiveChanged(usize),
    Progress { index: usize, progress: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("no step markers")]
    NoSteps,
    #[error("step {index} does not start below the previous step")]
    Unordered { index: usize },
    #[error("step {index} has invalid height {height}")]
    InvalidHeight { index: usize, height: f64 },
}

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    steps: Vec<StepMarker>,
    config: TrackerConfig,
    current: Option<usize>,
}

impl ScrollTracker {
    pub fn new(steps: Vec<StepMarker>, config: TrackerConfig) -> Result<Self, TrackerError> {
        validate(&steps)?;
        Ok(Self {
            steps,
            config,
            current: None,
        })
    }

    /// Replace the measured steps after a layout change. The current index
    /// is kept so the next `position` only reports a change if one happened.
    pub fn remeasure(&mut self, steps: Vec<StepMarker>) -> Result<(), TrackerError> {
        validate(&steps)?;
        self.steps = steps;
        if let Some(current) = self.current
            && current >= self.steps.len()
        {
            self.current = None;
        }
        Ok(())
    }

    pub fn steps(&self) -> &[StepMarker] {
        &self.steps
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Feed a scroll offset (the container's scroll top).
    ///
    /// Emits `ActiveChanged` only when the step under the trigger line
    /// differs from the last one reported, then always one `Progress` for
    /// the active step. Above the first step, step 0 is active with progress
    /// 0; below the last, the last step is active with progress 1. A
    /// non-finite offset produces no events.
    pub fn position(&mut self, scroll_top: f64) -> Vec<ScrollEvent> {
        if !scroll_top.is_finite() {
            return Vec::new();
        }
        let pos = scroll_top - self.config.container_top + self.config.trigger_offset;
        let index = self
            .steps
            .partition_point(|s| s.top <= pos)
            .saturating_sub(1);

        let mut events = Vec::with_capacity(2);
        if self.current != Some(index) {
            debug!(from = ?self.current, to = index, scroll_top, "active step changed");
            self.current = Some(index);
            events.push(ScrollEvent::ActiveChanged(index));
        }

        let step = self.steps[index];
        let progress = ((pos - step.top) / step.height).clamp(0.0, 1.0);
        events.push(ScrollEvent::Progress { index, progress });
        events
    }
}

fn validate(steps: &[StepMarker]) -> Result<(), TrackerError> {
    if steps.is_empty() {
        return Err(TrackerError::NoSteps);
    }
    for (index, step) in steps.iter().enumerate() {
        if !(step.height.is_finite() && step.height > 0.0) {
            return Err(TrackerError::InvalidHeight {
                index,
                height: step.height,
            });
        }
        if step.top.is_nan() || (index > 0 && step.top <= steps[index - 1].top) {
            return Err(TrackerError::Unordered { index });
        }
    }
    Ok(())
}
