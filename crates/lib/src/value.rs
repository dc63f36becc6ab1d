//! Typed value codec.
//!
//! Feature states and multivariate options carry a value that is exactly one of
//! a string, an integer or a boolean, selected by a `type` discriminator
//! (`"unicode"`, `"int"`, `"bool"`). Three shapes are involved:
//!
//! - [`ValueRecord`]: the local, host-facing shape. One nullable field per
//!   branch plus the discriminator, each branch a [`Field`] so absent and
//!   unknown stay distinguishable from `""`, `0` and `false`.
//! - [`FeatureValue`]: the sum type the engine reasons about. Two branches can
//!   never be populated at once.
//! - [`FeatureStateValue`]: the remote shape, one optional pointer per branch.
//!
//! [`encode`] and [`decode`] convert between the local and remote shapes by
//! way of [`FeatureValue`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::FeatureStateValue;
use crate::field::Field;

/// Errors raised while encoding or decoding a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
  /// The discriminator is not one of `unicode`, `int` or `bool`.
  #[error("unsupported value type '{0}', expected one of unicode, int or bool")]
  UnsupportedKind(String),

  /// The branch selected by the discriminator carries no value.
  #[error("value of type '{0}' has no {0} branch set")]
  MissingValue(ValueKind),

  /// String values may not start or end with whitespace.
  #[error("leading and trailing whitespace is not allowed in string value {0:?}")]
  UntrimmedString(String),
}

/// The discriminator of a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
  Unicode,
  Int,
  Bool,
}

impl ValueKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ValueKind::Unicode => "unicode",
      ValueKind::Int => "int",
      ValueKind::Bool => "bool",
    }
  }
}

impl fmt::Display for ValueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ValueKind {
  type Err = ValueError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "unicode" => Ok(ValueKind::Unicode),
      "int" => Ok(ValueKind::Int),
      "bool" => Ok(ValueKind::Bool),
      other => Err(ValueError::UnsupportedKind(other.to_string())),
    }
  }
}

/// A resolved typed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureValue {
  Unicode(String),
  Int(i64),
  Bool(bool),
}

impl FeatureValue {
  pub fn kind(&self) -> ValueKind {
    match self {
      FeatureValue::Unicode(_) => ValueKind::Unicode,
      FeatureValue::Int(_) => ValueKind::Int,
      FeatureValue::Bool(_) => ValueKind::Bool,
    }
  }
}

impl fmt::Display for FeatureValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FeatureValue::Unicode(s) => write!(f, "{s:?}"),
      FeatureValue::Int(n) => write!(f, "{n}"),
      FeatureValue::Bool(b) => write!(f, "{b}"),
    }
  }
}

/// Local representation of a typed value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueRecord {
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default)]
  pub string_value: Field<String>,
  #[serde(default)]
  pub integer_value: Field<i64>,
  #[serde(default)]
  pub boolean_value: Field<bool>,
}

impl ValueRecord {
  pub fn unicode(value: impl Into<String>) -> Self {
    FeatureValue::Unicode(value.into()).into()
  }

  pub fn int(value: i64) -> Self {
    FeatureValue::Int(value).into()
  }

  pub fn bool(value: bool) -> Self {
    FeatureValue::Bool(value).into()
  }
}

impl TryFrom<&ValueRecord> for FeatureValue {
  type Error = ValueError;

  fn try_from(record: &ValueRecord) -> Result<Self, Self::Error> {
    let kind: ValueKind = record.kind.parse()?;
    match kind {
      ValueKind::Unicode => {
        let value = record.string_value.cloned().ok_or(ValueError::MissingValue(kind))?;
        if value.trim() != value {
          return Err(ValueError::UntrimmedString(value));
        }
        Ok(FeatureValue::Unicode(value))
      }
      ValueKind::Int => record
        .integer_value
        .known()
        .map(|v| FeatureValue::Int(*v))
        .ok_or(ValueError::MissingValue(kind)),
      ValueKind::Bool => record
        .boolean_value
        .known()
        .map(|v| FeatureValue::Bool(*v))
        .ok_or(ValueError::MissingValue(kind)),
    }
  }
}

impl From<FeatureValue> for ValueRecord {
  fn from(value: FeatureValue) -> Self {
    let kind = value.kind().as_str().to_string();
    match value {
      FeatureValue::Unicode(s) => ValueRecord {
        kind,
        string_value: Field::Known(s),
        integer_value: Field::Absent,
        boolean_value: Field::Absent,
      },
      FeatureValue::Int(n) => ValueRecord {
        kind,
        string_value: Field::Absent,
        integer_value: Field::Known(n),
        boolean_value: Field::Absent,
      },
      FeatureValue::Bool(b) => ValueRecord {
        kind,
        string_value: Field::Absent,
        integer_value: Field::Absent,
        boolean_value: Field::Known(b),
      },
    }
  }
}

impl TryFrom<&FeatureStateValue> for FeatureValue {
  type Error = ValueError;

  fn try_from(remote: &FeatureStateValue) -> Result<Self, Self::Error> {
    let kind: ValueKind = remote.kind.parse()?;
    match kind {
      // The server leaves the string unset for empty unicode values.
      ValueKind::Unicode => Ok(FeatureValue::Unicode(remote.string_value.clone().unwrap_or_default())),
      ValueKind::Int => remote
        .integer_value
        .map(FeatureValue::Int)
        .ok_or(ValueError::MissingValue(kind)),
      ValueKind::Bool => remote
        .boolean_value
        .map(FeatureValue::Bool)
        .ok_or(ValueError::MissingValue(kind)),
    }
  }
}

impl From<FeatureValue> for FeatureStateValue {
  fn from(value: FeatureValue) -> Self {
    let kind = value.kind().as_str().to_string();
    match value {
      FeatureValue::Unicode(s) => FeatureStateValue {
        kind,
        string_value: Some(s),
        ..Default::default()
      },
      FeatureValue::Int(n) => FeatureStateValue {
        kind,
        integer_value: Some(n),
        ..Default::default()
      },
      FeatureValue::Bool(b) => FeatureStateValue {
        kind,
        boolean_value: Some(b),
        ..Default::default()
      },
    }
  }
}

/// Encode a local value into its remote shape.
///
/// Only the branch selected by the discriminator is populated.
pub fn encode(local: &ValueRecord) -> Result<FeatureStateValue, ValueError> {
  FeatureValue::try_from(local).map(FeatureStateValue::from)
}

/// Decode a remote value into its local shape.
///
/// The two branches not selected by the discriminator are marked absent.
pub fn decode(remote: &FeatureStateValue) -> Result<ValueRecord, ValueError> {
  FeatureValue::try_from(remote).map(ValueRecord::from)
}
