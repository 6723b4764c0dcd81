use scrollvis_protocol::{Selector, Transition, VisualCommand};

use super::{Panel, hide, show};
use crate::config::Timing;
use crate::data::RankedCountry;
use crate::stage::Stage;

const DOT_OPACITY: f64 = 0.8;

/// Dot strip of countries ranked by renewable share. Dots drop from the top
/// of the chart to their value, lowest rank first.
#[derive(Debug, Clone)]
pub struct RankingPanel {
    root: Selector,
    dots: Selector,
    heights: Vec<f64>,
    fade: Transition,
    drop: Transition,
    stagger_ms: u32,
}

impl RankingPanel {
    /// `ranked` must be in rank order, highest ratio first.
    pub fn new(ranked: &[RankedCountry], timing: &Timing) -> Self {
        Self {
            root: Selector::id("top_countries_ratio"),
            dots: Selector::class("dot"),
            heights: normalized_heights(ranked),
            fade: Transition::new(timing.fade_ms),
            drop: Transition::new(timing.fade_ms),
            stagger_ms: timing.dot_stagger_ms,
        }
    }

    /// Normalized height of each dot, in rank order.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    fn reset_dots(&self, stage: &mut Stage) {
        stage.push(VisualCommand::PlaceMark {
            target: self.dots.clone(),
            y_fraction: 1.0,
            opacity: 0.0,
            transition: None,
        });
    }
}

/// Linear map of each ratio onto `0..=1` between the smallest and largest
/// ratio. A single value (or all equal) sits at the top.
fn normalized_heights(ranked: &[RankedCountry]) -> Vec<f64> {
    let min = ranked.iter().map(|r| r.ratio).fold(f64::INFINITY, f64::min);
    let max = ranked
        .iter()
        .map(|r| r.ratio)
        .fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    ranked
        .iter()
        .map(|r| if span > 0.0 { (r.ratio - min) / span } else { 1.0 })
        .collect()
}

impl Panel for RankingPanel {
    fn root(&self) -> &Selector {
        &self.root
    }

    fn enter(&self, stage: &mut Stage) {
        stage.push(show(&self.root, self.fade));
        self.reset_dots(stage);
        let count = self.heights.len() as u32;
        for (rank, &height) in self.heights.iter().enumerate() {
            let delay = (count - rank as u32).saturating_mul(self.stagger_ms);
            stage.push(VisualCommand::PlaceMark {
                target: self.dots.nth(rank),
                y_fraction: height,
                opacity: DOT_OPACITY,
                transition: Some(self.drop.with_delay(delay)),
            });
        }
    }

    fn exit(&self, stage: &mut Stage) {
        stage.push(hide(&self.root, self.fade));
        self.reset_dots(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(ratios: &[f64]) -> Vec<RankedCountry> {
        ratios
            .iter()
            .enumerate()
            .map(|(i, &ratio)| RankedCountry {
                country: format!("c{i}"),
                ratio,
            })
            .collect()
    }

    #[test]
    fn heights_span_zero_to_one() {
        let panel = RankingPanel::new(&ranked(&[0.9, 0.5, 0.1]), &Timing::default());
        let h = panel.heights();
        assert_eq!(h[0], 1.0);
        assert!((h[1] - 0.5).abs() < 1e-12);
        assert_eq!(h[2], 0.0);
    }

    #[test]
    fn equal_ratios_sit_at_top() {
        let panel = RankingPanel::new(&ranked(&[0.4, 0.4]), &Timing::default());
        assert_eq!(panel.heights(), &[1.0, 1.0]);
    }

    #[test]
    fn lowest_rank_drops_first() {
        let panel = RankingPanel::new(&ranked(&[0.9, 0.5, 0.1]), &Timing::default());
        let mut stage = Stage::new();
        panel.enter(&mut stage);
        let delays: Vec<u32> = stage
            .commands()
            .iter()
            .filter_map(|c| match c {
                VisualCommand::PlaceMark {
                    transition: Some(t),
                    ..
                } => Some(t.delay_ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, vec![60, 40, 20]);
    }

    #[test]
    fn enter_resets_dots_before_dropping_them() {
        let panel = RankingPanel::new(&ranked(&[0.9, 0.1]), &Timing::default());
        let mut stage = Stage::new();
        panel.enter(&mut stage);
        let first_place = stage
            .commands()
            .iter()
            .position(|c| matches!(c, VisualCommand::PlaceMark { .. }));
        assert!(matches!(
            first_place.map(|i| &stage.commands()[i]),
            Some(VisualCommand::PlaceMark {
                transition: None,
                ..
            })
        ));
    }
}
