//! Compiled route table and direction-aware lookup.
//!
//! # Responsibilities
//! - Store compiled entries
//! - Look up an entry by culture and name, per direction
//! - Fall back from the requested culture to the culture-agnostic scope
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via one index per direction, queried with borrowed keys
//! - Indexes keep the first entry per key, same result as a linear scan
//! - Explicit unresolved (`None`) rather than silent default

use std::collections::HashMap;

use crate::routing::types::{Direction, RouteEntry, RouteName};

/// controller → action → entry index.
type Scope = HashMap<String, HashMap<String, usize>>;

/// Entry positions for one direction, split by culture scope so lookups
/// borrow their keys.
#[derive(Debug, Default)]
struct Index {
    agnostic: Scope,
    cultures: HashMap<String, Scope>,
}

impl Index {
    fn insert(&mut self, culture: Option<&str>, name: &RouteName, position: usize) {
        let scope = match culture {
            Some(culture) => self.cultures.entry(culture.to_string()).or_default(),
            None => &mut self.agnostic,
        };
        scope
            .entry(name.controller.clone())
            .or_default()
            .entry(name.action.clone())
            .or_insert(position);
    }

    fn get(&self, culture: Option<&str>, controller: &str, action: &str) -> Option<usize> {
        let scope = match culture {
            Some(culture) => self.cultures.get(culture)?,
            None => &self.agnostic,
        };
        scope.get(controller)?.get(action).copied()
    }
}

/// The installed, read-only route table.
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_original: Index,
    by_translated: Index,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        let mut by_original = Index::default();
        let mut by_translated = Index::default();

        for (i, entry) in entries.iter().enumerate() {
            let culture = entry.culture.as_deref();
            by_original.insert(culture, &entry.original, i);
            by_translated.insert(culture, &entry.translated, i);
        }

        Self {
            entries,
            by_original,
            by_translated,
        }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry in exactly this culture scope whose input side is
    /// `controller`/`action`.
    pub fn find(
        &self,
        direction: Direction,
        culture: Option<&str>,
        controller: &str,
        action: &str,
    ) -> Option<&RouteEntry> {
        let index = match direction {
            Direction::OriginalToTranslated => &self.by_original,
            Direction::TranslatedToOriginal => &self.by_translated,
        };
        index
            .get(culture, controller, action)
            .map(|i| &self.entries[i])
    }

    /// Resolve a name, trying the given culture first and then the
    /// culture-agnostic scope.
    pub fn resolve(
        &self,
        direction: Direction,
        culture: Option<&str>,
        controller: &str,
        action: &str,
    ) -> Option<&RouteName> {
        let entry = self
            .find(direction, culture, controller, action)
            .or_else(|| match culture {
                Some(_) => self.find(direction, None, controller, action),
                None => None,
            })?;

        Some(match direction {
            Direction::OriginalToTranslated => &entry.translated,
            Direction::TranslatedToOriginal => &entry.original,
        })
    }
}
