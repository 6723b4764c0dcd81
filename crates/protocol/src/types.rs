use serde::{Deserialize, Serialize};

/// Easing curve the host applies to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    Linear,
    /// The host library's default curve.
    #[default]
    CubicInOut,
    /// Exponential; used for path reveals and their labels.
    Exp,
}

/// Timing of a fire-and-forget transition.
///
/// The engine never waits for a transition to complete. A newer transition
/// on the same target supersedes one still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub duration_ms: u32,
    #[serde(default)]
    pub delay_ms: u32,
    #[serde(default)]
    pub ease: Ease,
}

impl Transition {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            delay_ms: 0,
            ease: Ease::default(),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Time until the transition settles, delay included.
    pub fn total_ms(&self) -> u32 {
        self.delay_ms.saturating_add(self.duration_ms)
    }
}

/// Whether a mark receives pointer input (hover, tooltips).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerEvents {
    All,
    None,
}
