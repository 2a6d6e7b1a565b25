//! Rendered artifact text, keyed by output path.

use std::borrow::Cow;

/// Ordered mapping from artifact output key to rendered text.
///
/// Keys are `/`-separated paths relative to the output root, so content and
/// its signature are identical across platforms. Insertion order is the
/// registration order of the artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeContent {
    entries: Vec<(String, String)>,
}

impl CodeContent {
    /// Creates an empty content map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` under the key `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already present; keys derive from unique artifact
    /// names.
    pub fn insert<'a>(&mut self, name: impl Into<Cow<'a, str>>, text: String) {
        let key = name.into().into_owned();
        assert!(self.get(&key).is_none(), "artifact '{key}' rendered twice");
        self.entries.push((key, text));
    }

    /// Returns the text stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, text)| text.as_str())
    }

    /// Iterates `(key, text)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str()))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of artifacts.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no artifact was rendered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
