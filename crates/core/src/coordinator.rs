//! The scroll-to-section activation state machine.
//!
//! Scroll events can arrive faster than panel transitions finish. Activating
//! only the newly requested section would skip the hide/show pairing of every
//! section in between and leave stale panels on screen, so the coordinator
//! walks the whole path from the last active section to the new one.

use scrollvis_protocol::VisualCommand;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::section::SectionRegistry;
use crate::stage::Stage;

#[derive(Debug, Error, PartialEq)]
pub enum CoordinatorError {
    #[error("section index {index} out of range (registry has {len} sections)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("progress {progress} for section {index} is outside 0.0..=1.0")]
    ProgressOutOfRange { index: usize, progress: f64 },
}

/// Which way an activation path walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Ordered indices whose sections are activated for one transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivationPath {
    indices: Vec<usize>,
    direction: Option<Direction>,
}

impl ActivationPath {
    /// Path from `last` to `next`, exclusive of `last` and inclusive of
    /// `next`.
    ///
    /// `None` is the "before the first section" state. Because `next` is
    /// never negative, a path starting there always walks forward from 0.
    pub fn between(last: Option<usize>, next: usize) -> Self {
        match last {
            None => Self::forward(0..=next),
            Some(last) if next > last => Self::forward(last + 1..=next),
            Some(last) if next < last => Self {
                indices: (next..last).rev().collect(),
                direction: Some(Direction::Backward),
            },
            Some(_) => Self::default(),
        }
    }

    fn forward(range: std::ops::RangeInclusive<usize>) -> Self {
        Self {
            indices: range.collect(),
            direction: Some(Direction::Forward),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// `None` for the empty path.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

/// Scroll state owned by one coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinatorState {
    /// `None` until the first activation.
    pub last_active: Option<usize>,
}

/// Drives a [`SectionRegistry`] from "active section changed" and
/// "progress changed" signals.
#[derive(Debug)]
pub struct Coordinator {
    registry: SectionRegistry,
    state: CoordinatorState,
}

impl Coordinator {
    pub fn new(registry: SectionRegistry) -> Self {
        Self {
            registry,
            state: CoordinatorState::default(),
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn active_index(&self) -> Option<usize> {
        self.state.last_active
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Make `next` the active section, activating every section on the way
    /// there in path order.
    ///
    /// Returns the path that was walked; it is empty when `next` is already
    /// active. An out-of-range `next` leaves the state untouched and
    /// activates nothing.
    pub fn activate(
        &mut self,
        next: usize,
        stage: &mut Stage,
    ) -> Result<ActivationPath, CoordinatorError> {
        self.check_index(next)?;

        let path = ActivationPath::between(self.state.last_active, next);
        debug!(
            from = ?self.state.last_active,
            to = next,
            path = ?path.indices(),
            "activating sections"
        );

        let len = self.registry.len();
        for &index in path.indices() {
            let section = self
                .registry
                .get_mut(index)
                .ok_or(CoordinatorError::IndexOutOfRange { index, len })?;
            stage.push(VisualCommand::BeginSection {
                index,
                name: section.name().to_string(),
            });
            section.activate(stage);
            stage.push(VisualCommand::EndSection);
        }

        self.state.last_active = Some(next);
        Ok(path)
    }

    /// Forward `progress` to section `index`'s update handler.
    ///
    /// The caller is trusted to only report progress for the active section.
    pub fn update(
        &mut self,
        index: usize,
        progress: f64,
        stage: &mut Stage,
    ) -> Result<(), CoordinatorError> {
        self.check_index(index)?;
        if !(0.0..=1.0).contains(&progress) {
            warn!(index, progress, "rejecting progress outside 0..=1");
            return Err(CoordinatorError::ProgressOutOfRange { index, progress });
        }

        trace!(index, progress, "section progress");
        if let Some(section) = self.registry.get_mut(index) {
            section.update(progress, stage);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), CoordinatorError> {
        let len = self.registry.len();
        if index >= len {
            warn!(index, len, "section index out of range");
            return Err(CoordinatorError::IndexOutOfRange { index, len });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::section::Section;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Activate(usize),
        Update(usize, f64),
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    struct Recording {
        index: usize,
        log: Log,
    }

    impl Section for Recording {
        fn activate(&mut self, _stage: &mut Stage) {
            self.log.borrow_mut().push(Call::Activate(self.index));
        }

        fn update(&mut self, progress: f64, _stage: &mut Stage) {
            self.log.borrow_mut().push(Call::Update(self.index, progress));
        }
    }

    fn coordinator(n: usize) -> (Coordinator, Log) {
        let log: Log = Rc::default();
        let mut builder = SectionRegistry::builder();
        for index in 0..n {
            builder = builder.insert(
                index,
                Recording {
                    index,
                    log: Rc::clone(&log),
                },
            );
        }
        (Coordinator::new(builder.build().unwrap()), log)
    }

    fn activated(log: &Log) -> Vec<usize> {
        log.borrow_mut()
            .drain(..)
            .filter_map(|c| match c {
                Call::Activate(i) => Some(i),
                Call::Update(..) => None,
            })
            .collect()
    }

    #[test]
    fn path_between_covers_all_directions() {
        assert_eq!(ActivationPath::between(None, 0).indices(), &[0]);
        assert_eq!(ActivationPath::between(None, 3).indices(), &[0, 1, 2, 3]);
        assert_eq!(ActivationPath::between(Some(1), 4).indices(), &[2, 3, 4]);
        assert_eq!(ActivationPath::between(Some(4), 1).indices(), &[3, 2, 1]);
        assert!(ActivationPath::between(Some(2), 2).is_empty());
    }

    #[test]
    fn path_direction() {
        let forward = ActivationPath::between(Some(0), 1);
        assert_eq!(forward.direction(), Some(Direction::Forward));
        let backward = ActivationPath::between(Some(1), 0);
        assert_eq!(backward.direction(), Some(Direction::Backward));
        assert_eq!(ActivationPath::between(None, 0).direction(), Some(Direction::Forward));
        assert_eq!(ActivationPath::between(Some(3), 3).direction(), None);
    }

    #[test]
    fn scenario_forward_back_and_repeat() {
        let (mut coord, log) = coordinator(5);
        let mut stage = Stage::new();

        coord.activate(2, &mut stage).unwrap();
        assert_eq!(activated(&log), vec![0, 1, 2]);

        coord.activate(0, &mut stage).unwrap();
        assert_eq!(activated(&log), vec![1, 0]);

        coord.activate(0, &mut stage).unwrap();
        assert!(activated(&log).is_empty());
        assert_eq!(coord.active_index(), Some(0));
    }

    #[test]
    fn fast_forward_from_initial_state_fires_every_section() {
        let (mut coord, log) = coordinator(8);
        let mut stage = Stage::new();
        coord.activate(5, &mut stage).unwrap();
        assert_eq!(activated(&log), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn every_pair_walks_monotonically_and_once() {
        let n = 6;
        for last in 0..n {
            for next in 0..n {
                let (mut coord, log) = coordinator(n);
                let mut stage = Stage::new();
                coord.activate(last, &mut stage).unwrap();
                activated(&log);

                coord.activate(next, &mut stage).unwrap();
                let fired = activated(&log);
                let expected: Vec<usize> = if next > last {
                    (last + 1..=next).collect()
                } else {
                    (next..last).rev().collect()
                };
                assert_eq!(fired, expected, "last={last} next={next}");
                assert_eq!(coord.active_index(), Some(next));
            }
        }
    }

    #[test]
    fn activations_are_bracketed_by_section_markers() {
        let (mut coord, _log) = coordinator(3);
        let mut stage = Stage::new();
        coord.activate(1, &mut stage).unwrap();
        let cmds = stage.drain();
        assert_eq!(cmds.len(), 4);
        assert!(matches!(cmds[0], VisualCommand::BeginSection { index: 0, .. }));
        assert_eq!(cmds[1], VisualCommand::EndSection);
        assert!(matches!(cmds[2], VisualCommand::BeginSection { index: 1, .. }));
        assert_eq!(cmds[3], VisualCommand::EndSection);
    }

    #[test]
    fn out_of_range_activation_changes_nothing() {
        let (mut coord, log) = coordinator(3);
        let mut stage = Stage::new();
        coord.activate(1, &mut stage).unwrap();
        activated(&log);

        let err = coord.activate(3, &mut stage).unwrap_err();
        assert_eq!(err, CoordinatorError::IndexOutOfRange { index: 3, len: 3 });
        assert!(activated(&log).is_empty());
        assert_eq!(coord.active_index(), Some(1));
    }

    #[test]
    fn update_reaches_only_the_named_section() {
        let (mut coord, log) = coordinator(5);
        let mut stage = Stage::new();
        coord.activate(2, &mut stage).unwrap();
        log.borrow_mut().clear();

        coord.update(2, 0.35, &mut stage).unwrap();
        assert_eq!(*log.borrow(), vec![Call::Update(2, 0.35)]);
    }

    #[test]
    fn update_rejects_bad_input() {
        let (mut coord, log) = coordinator(2);
        let mut stage = Stage::new();
        assert!(matches!(
            coord.update(5, 0.5, &mut stage),
            Err(CoordinatorError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            coord.update(1, 1.5, &mut stage),
            Err(CoordinatorError::ProgressOutOfRange { index: 1, .. })
        ));
        assert!(coord.update(1, f64::NAN, &mut stage).is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn independent_coordinators_do_not_share_state() {
        let (mut a, _) = coordinator(4);
        let (b, _) = coordinator(4);
        let mut stage = Stage::new();
        a.activate(3, &mut stage).unwrap();
        assert_eq!(a.active_index(), Some(3));
        assert_eq!(b.state(), CoordinatorState::default());
    }
}
