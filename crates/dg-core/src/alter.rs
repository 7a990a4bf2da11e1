//! Stacked value modifiers.
//!
//! An [`Alterable`] folds a base value through an ordered stack of
//! transformation layers. Gameplay code stacks difficulty or stat modifiers
//! on top of a base value and recomputes the effective value on demand,
//! adding and removing layers independently.

use core::fmt;

/// Handle identifying one layer, returned by [`Alterable::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlterHandle(u64);

struct Layer<T> {
    apply: Box<dyn Fn(T) -> T>,
    weight: i32,
    handle: AlterHandle,
}

/// A base value plus a weighted stack of transformations.
///
/// Layers apply in ascending weight order; layers of equal weight apply in
/// insertion order.
pub struct Alterable<T> {
    base: T,
    layers: Vec<Layer<T>>,
    next_handle: u64,
}

impl<T: Clone> Alterable<T> {
    pub fn new(base: T) -> Self {
        Self {
            base,
            layers: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn base(&self) -> &T {
        &self.base
    }

    pub fn set_base(&mut self, base: T) {
        self.base = base;
    }

    /// Insert a transformation layer. Negative weights are a programmer
    /// error.
    pub fn add<F>(&mut self, weight: i32, apply: F) -> AlterHandle
    where
        F: Fn(T) -> T + 'static,
    {
        debug_assert!(weight >= 0, "layer weights are non-negative");

        let handle = AlterHandle(self.next_handle);
        self.next_handle += 1;

        let index = self.layers.partition_point(|layer| layer.weight <= weight);
        self.layers.insert(
            index,
            Layer {
                apply: Box::new(apply),
                weight,
                handle,
            },
        );
        handle
    }

    /// Drop the layer behind `handle`. Returns false when the handle is
    /// unknown or already removed.
    pub fn remove(&mut self, handle: AlterHandle) -> bool {
        match self.layers.iter().position(|layer| layer.handle == handle) {
            Some(index) => {
                self.layers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The base value folded through every layer in order.
    pub fn value(&self) -> T {
        self.layers
            .iter()
            .fold(self.base.clone(), |value, layer| (layer.apply)(value))
    }
}

impl<T: fmt::Debug> fmt::Debug for Alterable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alterable")
            .field("base", &self.base)
            .field("layers", &self.layers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_without_layers_is_base() {
        let speed = Alterable::new(10);
        assert_eq!(speed.value(), 10);
    }

    #[test]
    fn test_layers_apply_in_weight_order() {
        let mut speed = Alterable::new(10);
        // Inserted out of order: the doubling layer (weight 0) applies
        // before the +5 layer (weight 10).
        speed.add(10, |v| v + 5);
        speed.add(0, |v| v * 2);
        assert_eq!(speed.value(), 25);
    }

    #[test]
    fn test_equal_weights_keep_insertion_order() {
        let mut text = Alterable::new(String::from("a"));
        text.add(1, |v| v + "b");
        text.add(1, |v| v + "c");
        assert_eq!(text.value(), "abc");
    }

    #[test]
    fn test_remove_layer() {
        let mut speed = Alterable::new(10);
        let boost = speed.add(0, |v| v * 3);
        assert_eq!(speed.value(), 30);

        assert!(speed.remove(boost));
        assert_eq!(speed.value(), 10);
        assert!(!speed.remove(boost));
    }

    #[test]
    fn test_set_base_recomputes() {
        let mut speed = Alterable::new(10);
        speed.add(0, |v| v + 1);
        speed.set_base(20);
        assert_eq!(speed.value(), 21);
        assert_eq!(*speed.base(), 20);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "non-negative")]
    fn test_negative_weight_is_rejected() {
        let mut speed = Alterable::new(10);
        speed.add(-1, |v| v);
    }
}
