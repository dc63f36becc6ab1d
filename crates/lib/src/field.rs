//! Three-state attribute values.
//!
//! Local records distinguish between an attribute whose value is not known yet
//! (it will be computed by the server during apply), an attribute that is
//! explicitly null, and an attribute carrying a value. Collapsing these into
//! `Option<T>` or zero values would make it impossible to tell "omit this field"
//! from "send zero", so every optional attribute of a record is a [`Field`].
//!
//! # Persistence
//!
//! [`Field::Unknown`] only exists while planning. Serializing one is an error,
//! which keeps unresolved values out of persisted state. `null` and missing
//! keys deserialize to [`Field::Absent`].

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};

/// A record attribute that may be unknown, explicitly absent, or known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Field<T> {
  /// Not resolved yet. Only valid during planning.
  Unknown,
  /// Explicitly null.
  #[default]
  Absent,
  /// A concrete value.
  Known(T),
}

impl<T> Field<T> {
  pub fn is_unknown(&self) -> bool {
    matches!(self, Field::Unknown)
  }

  pub fn is_absent(&self) -> bool {
    matches!(self, Field::Absent)
  }

  pub fn is_known(&self) -> bool {
    matches!(self, Field::Known(_))
  }

  /// Borrow the value if it is known.
  pub fn known(&self) -> Option<&T> {
    match self {
      Field::Known(v) => Some(v),
      _ => None,
    }
  }

  /// Convert into an `Option`, folding `Unknown` and `Absent` into `None`.
  ///
  /// This is the outbound direction of the mapper: anything not known is
  /// omitted rather than sent as a zero value.
  pub fn into_option(self) -> Option<T> {
    match self {
      Field::Known(v) => Some(v),
      _ => None,
    }
  }

  pub fn as_ref(&self) -> Field<&T> {
    match self {
      Field::Unknown => Field::Unknown,
      Field::Absent => Field::Absent,
      Field::Known(v) => Field::Known(v),
    }
  }

  pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
    match self {
      Field::Unknown => Field::Unknown,
      Field::Absent => Field::Absent,
      Field::Known(v) => Field::Known(f(v)),
    }
  }

  /// Replace an `Unknown` with the prior value.
  ///
  /// `Absent` and `Known` are left untouched: a locally supplied null or value
  /// always wins over what was recorded before.
  pub fn or_prior(self, prior: &Field<T>) -> Field<T>
  where
    T: Clone,
  {
    match self {
      Field::Unknown => prior.clone(),
      other => other,
    }
  }

  /// Replace an `Unknown` or `Absent` with a static default.
  pub fn or_default_value(self, default: T) -> Field<T> {
    match self {
      Field::Known(v) => Field::Known(v),
      _ => Field::Known(default),
    }
  }
}

impl<T: Clone> Field<T> {
  /// Clone the value out of a known field.
  pub fn cloned(&self) -> Option<T> {
    self.known().cloned()
  }
}

impl<T: Copy + Default + PartialEq> Field<T> {
  /// Known and not the zero value.
  ///
  /// Numeric references use zero to mean "not applicable", so a `Known(0)`
  /// reference is treated the same as an absent one.
  pub fn non_zero(&self) -> Option<T> {
    match self {
      Field::Known(v) if *v != T::default() => Some(*v),
      _ => None,
    }
  }
}

impl<T> From<Option<T>> for Field<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(v) => Field::Known(v),
      None => Field::Absent,
    }
  }
}

impl<T: Serialize> Serialize for Field<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Field::Known(v) => serializer.serialize_some(v),
      Field::Absent => serializer.serialize_none(),
      Field::Unknown => Err(S::Error::custom("unknown value cannot be persisted")),
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Option::<T>::deserialize(deserializer).map(Field::from)
  }
}
