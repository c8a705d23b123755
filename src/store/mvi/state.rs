//! Base trait for slice state.

/// Marker trait for state objects.
///
/// States should be:
/// - Cloneable (subscribers receive snapshots)
/// - Comparable (PartialEq for detecting changes)
/// - Defaultable (the initial, idle shape)
pub trait SliceState: Clone + PartialEq + Default + Send + 'static {}
