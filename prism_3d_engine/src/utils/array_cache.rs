/// Reusable per-frame scratch array.
///
/// Cleared (not reallocated) at the start of each frame. When a push would
/// exceed the current capacity, the capacity doubles. Capacity only shrinks
/// on an explicit `reset`.
///
/// # Example
///
/// ```ignore
/// let mut cache = ArrayCache::with_capacity(2);
/// cache.push(1);
/// cache.push(2);
/// cache.push(3);               // grows to 4
/// assert_eq!(cache.capacity(), 4);
/// cache.clear();                // keeps capacity 4
/// ```
pub struct ArrayCache<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> ArrayCache<T> {
    /// Create an empty cache able to hold `capacity` items before growing
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an item, doubling the capacity first if the cache is full
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.grow_to((self.capacity * 2).max(1));
        }
        self.items.push(item);
    }

    /// Drop all items, keep the storage
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the storage with a fresh one of exactly `capacity`
    pub fn reset(&mut self, capacity: usize) {
        self.items = Vec::with_capacity(capacity);
        self.capacity = capacity;
    }

    /// Double the capacity until it holds at least `required` items.
    ///
    /// Returns true when the storage grew.
    pub fn ensure_capacity(&mut self, required: usize) -> bool {
        if required <= self.capacity {
            return false;
        }
        let mut capacity = self.capacity.max(1);
        while capacity < required {
            capacity *= 2;
        }
        self.grow_to(capacity);
        true
    }

    fn grow_to(&mut self, capacity: usize) {
        self.items.reserve_exact(capacity - self.items.len());
        self.capacity = capacity;
    }

    // ===== ACCESSORS =====

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity (number of items storable before the next doubling)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a ArrayCache<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "array_cache_tests.rs"]
mod tests;
