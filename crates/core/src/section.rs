use std::collections::BTreeMap;

use thiserror::Error;

use crate::stage::Stage;

/// One scroll-triggered visualization state.
///
/// `activate` is called every time the coordinator's activation path passes
/// through this section, in either direction. Implementations must be safe
/// to call repeatedly.
pub trait Section {
    /// Short identifier used in logs and section markers.
    fn name(&self) -> &str {
        "section"
    }

    fn activate(&mut self, stage: &mut Stage);

    /// Continuous progress through the section, `0.0..=1.0`. Most sections
    /// have no continuous behaviour.
    fn update(&mut self, _progress: f64, _stage: &mut Stage) {}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no sections registered")]
    Empty,
    #[error("section {0} is not registered")]
    MissingSection(usize),
    #[error("section {0} registered twice")]
    DuplicateSection(usize),
}

/// Ordered, immutable list of sections.
///
/// Only a [`RegistryBuilder`] can produce one, so every ordinal
/// `0..len()` is guaranteed to have a section.
pub struct SectionRegistry {
    sections: Vec<Box<dyn Section>>,
}

impl SectionRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from sections already in ordinal order.
    pub fn from_sections(sections: Vec<Box<dyn Section>>) -> Result<Self, RegistryError> {
        if sections.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Section> {
        self.sections.get(index).map(|s| &**s)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Section + 'static)> {
        self.sections.get_mut(index).map(|s| &mut **s)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name())
    }
}

impl std::fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Collects sections by ordinal and validates the table on `build`.
#[derive(Default)]
pub struct RegistryBuilder {
    slots: BTreeMap<usize, Box<dyn Section>>,
    duplicate: Option<usize>,
}

impl RegistryBuilder {
    pub fn insert(mut self, ordinal: usize, section: impl Section + 'static) -> Self {
        self.insert_boxed(ordinal, Box::new(section));
        self
    }

    pub fn insert_boxed(&mut self, ordinal: usize, section: Box<dyn Section>) {
        if self.slots.insert(ordinal, section).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(ordinal);
        }
    }

    /// Fails on the first duplicate ordinal, or on the lowest ordinal left
    /// without a section.
    pub fn build(self) -> Result<SectionRegistry, RegistryError> {
        if let Some(ordinal) = self.duplicate {
            return Err(RegistryError::DuplicateSection(ordinal));
        }
        let mut sections = Vec::with_capacity(self.slots.len());
        for (expected, (ordinal, section)) in self.slots.into_iter().enumerate() {
            if ordinal != expected {
                return Err(RegistryError::MissingSection(expected));
            }
            sections.push(section);
        }
        SectionRegistry::from_sections(sections)
    }
}
