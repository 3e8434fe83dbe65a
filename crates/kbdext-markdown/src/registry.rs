//! Name-keyed, priority-ordered registry.

/// Ordered collection of named items.
///
/// Items are evaluated from the highest priority down; entries with equal
/// priority keep their registration order. Names are unique: registering an
/// existing name replaces the previous entry instead of adding a second one,
/// so repeating a registration is harmless.
///
/// # Example
///
/// ```
/// use kbdext_markdown::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("low", "a", 10);
/// registry.register("high", "b", 20);
/// registry.register("again", "a", 10);
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.iter().copied().collect::<Vec<_>>(), ["high", "again"]);
/// ```
#[derive(Debug)]
pub struct Registry<T> {
    entries: Vec<Entry<T>>,
}

#[derive(Debug)]
struct Entry<T> {
    name: String,
    priority: u32,
    item: T,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `item` under `name` with `priority`.
    ///
    /// Returns the previously registered item if `name` was already taken.
    pub fn register(&mut self, item: T, name: impl Into<String>, priority: u32) -> Option<T> {
        let name = name.into();
        let replaced = self.deregister(&name);
        if replaced.is_some() {
            tracing::debug!(name = %name, priority, "Replacing registered item");
        }

        // Insert after every entry with priority >= ours to keep ties stable.
        let index = self
            .entries
            .iter()
            .position(|e| e.priority < priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            index,
            Entry {
                name,
                priority,
                item,
            },
        );

        replaced
    }

    /// Remove the item registered under `name`.
    pub fn deregister(&mut self, name: &str) -> Option<T> {
        let index = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(index).item)
    }

    /// Get the item registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.item)
    }

    /// Check whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Priority of the item registered under `name`.
    #[must_use]
    pub fn priority(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.priority)
    }

    /// Number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Items in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.item)
    }

    /// Names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
