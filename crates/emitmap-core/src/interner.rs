//! Insertion-ordered interning of source paths and symbol names

use indexmap::IndexSet;

/// Assigns stable 0-based indices to distinct strings in first-seen order
///
/// Indices are never reassigned or removed for the lifetime of the interner,
/// so the order of [`Interner::values`] is exactly the order the encoded
/// indices refer to.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    values: IndexSet<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `value`, interning it if unseen
    ///
    /// Returns None, without interning, when `value` is new and every index a
    /// map can express (0..=u32::MAX) is already taken.
    pub fn intern(&mut self, value: &str) -> Option<u32> {
        if let Some(index) = self.values.get_index_of(value) {
            return u32::try_from(index).ok();
        }
        let index = next_index(self.values.len())?;
        self.values.insert(value.to_owned());
        Some(index)
    }

    /// Whether `intern(value)` would succeed
    pub fn has_room_for(&self, value: &str) -> bool {
        self.values.contains(value) || next_index(self.values.len()).is_some()
    }

    /// Index of an already interned value
    pub fn index_of(&self, value: &str) -> Option<u32> {
        self.values
            .get_index_of(value)
            .and_then(|index| u32::try_from(index).ok())
    }

    /// Value interned at `index`
    pub fn get(&self, index: u32) -> Option<&str> {
        self.values.get_index(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All interned values in index order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.values.into_iter().collect()
    }
}

fn next_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}
