//! Lazily rebuilt derived data.

/// A derived value that is rebuilt on read after being invalidated.
///
/// Owners call [`invalidate`](Self::invalidate) when the source data changes;
/// nothing is recomputed until the next [`get_or_rebuild`](Self::get_or_rebuild).
/// The rebuild closure receives the stale value so its buffers can be reused.
#[derive(Debug, Clone, Default)]
pub struct CachedDerived<T> {
    value: T,
    valid: bool,
}

impl<T> CachedDerived<T> {
    /// Wrap an initial value. The cache starts invalid.
    pub fn new(value: T) -> Self {
        Self {
            value,
            valid: false,
        }
    }

    /// Mark the cached value stale.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The cached value, if it is still valid.
    pub fn get(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    /// The value without a validity check. May be stale.
    pub fn peek(&self) -> &T {
        &self.value
    }

    /// Return the cached value, rebuilding it in place first if it is stale.
    pub fn get_or_rebuild(&mut self, rebuild: impl FnOnce(&mut T)) -> &T {
        if !self.valid {
            rebuild(&mut self.value);
            self.valid = true;
        }
        &self.value
    }

    /// Mutable access for settings changes that also require a rebuild.
    pub(crate) fn value_mut(&mut self) -> &mut T {
        self.valid = false;
        &mut self.value
    }
}
