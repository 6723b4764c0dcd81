use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A reference-counted CSS-style selector naming the marks a command targets.
///
/// Selectors are resolved by the host (the browser's DOM, or the terminal
/// previewer's scene). Cloning is a refcount increment, which matters because
/// the same selectors are re-emitted on every activation.
#[derive(Debug, Clone, Eq)]
pub struct Selector(Arc<str>);

impl Selector {
    /// `.name`
    pub fn class(name: &str) -> Self {
        Selector(Arc::from(format!(".{name}")))
    }

    /// `#name`
    pub fn id(name: &str) -> Self {
        Selector(Arc::from(format!("#{name}")))
    }

    /// Marks matching `child` nested anywhere below this selector.
    pub fn descendant(&self, child: &str) -> Self {
        Selector(Arc::from(format!("{} {child}", self.0)))
    }

    /// The `index`-th (zero-based) match of this selector.
    pub fn nth(&self, index: usize) -> Self {
        Selector(Arc::from(format!("{}:nth-of-type({})", self.0, index + 1)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Selector {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl PartialEq<&str> for Selector {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Ord for Selector {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Selector {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::hash::Hash for Selector {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (*self.0).hash(state);
    }
}

impl std::borrow::Borrow<str> for Selector {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Selector {
    #[inline]
    fn from(s: &str) -> Self {
        Selector(Arc::from(s))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

// Hand-rolled so the protocol does not need serde's `rc` feature.

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Selector(Arc::from(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_and_id_prefixes() {
        assert_eq!(Selector::class("temp_plot"), ".temp_plot");
        assert_eq!(Selector::id("map-2d"), "#map-2d");
    }

    #[test]
    fn descendant_joins_with_space() {
        let layer = Selector::class("map-2d-hydro").descendant("circle");
        assert_eq!(layer, ".map-2d-hydro circle");
    }

    #[test]
    fn nth_is_one_based_in_css() {
        assert_eq!(Selector::class("step").nth(0), ".step:nth-of-type(1)");
        assert_eq!(Selector::class("dot").nth(4), ".dot:nth-of-type(5)");
    }

    #[test]
    fn hashmap_lookup_by_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(Selector::id("temp_path"), 1);
        assert_eq!(map.get("#temp_path"), Some(&1));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Selector::class("dot")).unwrap_or_default();
        assert_eq!(json, "\".dot\"");
        let back: Selector =
            serde_json::from_str(&json).unwrap_or_else(|_| Selector::from("broken"));
        assert_eq!(back, ".dot");
    }
}
