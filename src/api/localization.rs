use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

/// Resolves display text for profile ids shown above detail donuts.
pub trait Translator {
    fn translate(&self, id: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, id: &str) -> String {
        self(id)
    }
}

/// Echoes ids back unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, id: &str) -> String {
        id.to_owned()
    }
}

/// Static id -> text table loaded from a flat JSON object.
///
/// Unknown ids translate to themselves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: IndexMap<String, String>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_entry(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(id.into(), text.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Catalog {
    fn translate(&self, id: &str) -> String {
        self.entries
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_owned())
    }
}
