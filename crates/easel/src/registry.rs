use std::collections::HashMap;

use crate::client::ItemId;

/// Maps shape names to the identifiers the board assigned them.
///
/// Only successfully created shapes are registered. Registering a name that
/// is already present replaces its identifier.
#[derive(Debug, Default)]
pub struct NameRegistry {
    entries: HashMap<String, ItemId>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` under `name`, returning the identifier it replaced.
    pub fn register(&mut self, name: impl Into<String>, id: ItemId) -> Option<ItemId> {
        self.entries.insert(name.into(), id)
    }

    /// Looks up the identifier registered under `name`.
    pub fn resolve(&self, name: &str) -> Option<&ItemId> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
