//! Settled scene: what the host would show once every started transition
//! has finished.
//!
//! Commands are applied with their final values in order, so a later command
//! on the same target wins, the same way a newer transition supersedes one in
//! flight. Used by the terminal previewer and by tests that check no stale
//! panel is left visible.

use std::collections::HashMap;

use scrollvis_protocol::{PointerEvents, Selector, Tone, VisualCommand};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkState {
    /// Marks start hidden; the host draws everything at opacity 0.
    pub opacity: f64,
    pub pointer_events: Option<PointerEvents>,
    pub text: Option<String>,
    pub stroke: Option<Tone>,
    /// How many times a path reveal has been (re)started.
    pub reveals: u32,
    pub y_fraction: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    marks: HashMap<Selector, MarkState>,
    section: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, commands: &[VisualCommand]) {
        for command in commands {
            self.apply_one(command);
        }
    }

    fn apply_one(&mut self, command: &VisualCommand) {
        match command {
            VisualCommand::Fade {
                target,
                opacity,
                pointer_events,
                ..
            } => self.each_mut(target, |m| {
                m.opacity = *opacity;
                if pointer_events.is_some() {
                    m.pointer_events = *pointer_events;
                }
            }),
            VisualCommand::SetText { target, text, .. } => {
                self.each_mut(target, |m| m.text = Some(text.clone()));
            }
            VisualCommand::RevealPath { target, stroke, .. } => self.each_mut(target, |m| {
                m.reveals += 1;
                if stroke.is_some() {
                    m.stroke = *stroke;
                }
            }),
            VisualCommand::PlaceMark {
                target,
                y_fraction,
                opacity,
                ..
            } => self.each_mut(target, |m| {
                m.y_fraction = Some(*y_fraction);
                m.opacity = *opacity;
            }),
            VisualCommand::BeginSection { index, .. } => self.section = Some(*index),
            VisualCommand::EndSection => {}
        }
    }

    /// Apply `f` to `target` and to every already-known `nth` match of it,
    /// so a selector addressing a whole group also overrides per-item state.
    fn each_mut(&mut self, target: &Selector, f: impl Fn(&mut MarkState)) {
        let prefix = format!("{}:nth-of-type(", target.as_str());
        for (selector, mark) in &mut self.marks {
            if selector.as_str().starts_with(&prefix) {
                f(mark);
            }
        }
        f(self.marks.entry(target.clone()).or_default());
    }

    pub fn get(&self, target: &str) -> Option<&MarkState> {
        self.marks.get(target)
    }

    pub fn opacity(&self, target: &str) -> f64 {
        self.get(target).map_or(0.0, |m| m.opacity)
    }

    pub fn is_visible(&self, target: &str) -> bool {
        self.opacity(target) > 0.0
    }

    /// Selectors currently visible, sorted.
    pub fn visible(&self) -> Vec<&Selector> {
        let mut out: Vec<_> = self
            .marks
            .iter()
            .filter(|(_, m)| m.opacity > 0.0)
            .map(|(s, _)| s)
            .collect();
        out.sort();
        out
    }

    /// Index of the last section whose commands were applied.
    pub fn last_section(&self) -> Option<usize> {
        self.section
    }
}
