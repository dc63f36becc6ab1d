//! Set differences over small identifier collections.
//!
//! Owners and tags are loosely ordered collections on the remote side: the
//! service exposes add and remove endpoints rather than a replace call. This
//! module computes the deltas that bring a remote collection in line with the
//! desired one.

use std::fmt::Debug;

/// Elements of `a` that are not present in `b`.
///
/// `None` is treated as an empty collection. Order of `a` is kept and
/// duplicates in `a` are preserved in the output.
pub fn difference<T: PartialEq + Clone>(a: Option<&[T]>, b: Option<&[T]>) -> Vec<T> {
  let a = a.unwrap_or_default();
  let b = b.unwrap_or_default();

  a.iter().filter(|value| !b.contains(value)).cloned().collect()
}

/// Changes needed to turn one collection into another.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta<T> {
  /// Present remotely but not desired.
  pub to_remove: Vec<T>,
  /// Desired but not present remotely.
  pub to_add: Vec<T>,
}

impl<T: PartialEq + Clone + Debug> Delta<T> {
  /// Compute the delta from `current` to `desired`.
  pub fn between(current: Option<&[T]>, desired: Option<&[T]>) -> Self {
    Self {
      to_remove: difference(current, desired),
      to_add: difference(desired, current),
    }
  }

  /// Returns true if nothing needs to change.
  pub fn is_empty(&self) -> bool {
    self.to_remove.is_empty() && self.to_add.is_empty()
  }
}

/// Delta over owner user IDs.
pub type OwnerDelta = Delta<i64>;
