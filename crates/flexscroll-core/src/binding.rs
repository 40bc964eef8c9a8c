//! Offset storage that is either owned by the component or by its parent
//!
//! A parent that wants to read or drive the scroll position (for example to
//! keep several views in sync) hands in a [`Binding`]. Without one the
//! component keeps the value itself. The choice is made once, at
//! construction, and every later access goes through [`OffsetCell`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared, lock-free `f64` cell
///
/// Clones refer to the same value.
#[derive(Debug, Clone, Default)]
pub struct Binding(Arc<AtomicU64>);

impl Binding {
    pub fn new(value: f64) -> Self {
        Self(Arc::new(AtomicU64::new(value.to_bits())))
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Uniform read/write access to an offset value
pub trait OffsetCell: Send + std::fmt::Debug {
    fn get(&self) -> f64;
    fn set(&mut self, value: f64);

    fn add(&mut self, delta: f64) {
        let value = self.get() + delta;
        self.set(value);
    }
}

/// Value held by the component itself
#[derive(Debug, Default)]
pub struct OwnedCell(f64);

impl OwnedCell {
    pub fn new(value: f64) -> Self {
        Self(value)
    }
}

impl OffsetCell for OwnedCell {
    #[inline]
    fn get(&self) -> f64 {
        self.0
    }

    #[inline]
    fn set(&mut self, value: f64) {
        self.0 = value;
    }
}

/// Value delegated to a caller-supplied binding
#[derive(Debug)]
pub struct BoundCell(Binding);

impl BoundCell {
    pub fn new(binding: Binding) -> Self {
        Self(binding)
    }
}

impl OffsetCell for BoundCell {
    #[inline]
    fn get(&self) -> f64 {
        self.0.get()
    }

    #[inline]
    fn set(&mut self, value: f64) {
        self.0.set(value);
    }
}

/// Pick the owner of a value: the binding when one is supplied, otherwise
/// an internal cell starting at zero
pub fn resolve(binding: Option<Binding>) -> Box<dyn OffsetCell> {
    match binding {
        Some(binding) => Box::new(BoundCell::new(binding)),
        None => Box::new(OwnedCell::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_clones_share_value() {
        let binding = Binding::new(12.5);
        let other = binding.clone();
        other.set(-3.0);
        assert_eq!(binding.get(), -3.0);
    }

    #[test]
    fn test_bound_cell_writes_through() {
        let binding = Binding::default();
        let mut cell = resolve(Some(binding.clone()));
        cell.set(500.0);
        cell.add(-150.0);
        assert_eq!(binding.get(), 350.0);
        assert_eq!(cell.get(), 350.0);
    }

    #[test]
    fn test_bound_cell_sees_external_writes() {
        let binding = Binding::new(10.0);
        let cell = resolve(Some(binding.clone()));
        binding.set(42.0);
        assert_eq!(cell.get(), 42.0);
    }

    #[test]
    fn test_owned_cell_starts_at_zero() {
        let mut cell = resolve(None);
        assert_eq!(cell.get(), 0.0);
        cell.set(7.0);
        assert_eq!(cell.get(), 7.0);
    }
}
