//! Planning: merge a desired record with the prior observed record.
//!
//! The planner decides, per attribute, which value wins:
//!
//! 1. Static defaults fill defaulted attributes the user left unset.
//! 2. Server-computed attributes that are still unknown take the prior
//!    observed value, so a value the server computed is never replaced by
//!    absence.
//! 3. Attributes that cannot be changed in place force a replace.
//!
//! The outcome is classified as a [`PlannedAction`] alongside the merged
//! record the lifecycle should converge to.

use std::fmt;

/// What the lifecycle has to do to reach the planned record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
  /// Nothing exists yet.
  Create,
  /// Change the existing resource in place.
  Update,
  /// Delete the existing resource and create a new one.
  Replace {
    /// Attributes that forced the replacement.
    reasons: Vec<String>,
  },
  /// Planned record equals the prior record.
  NoOp,
  /// Nothing is desired any more. Never returned by [`plan`]; the reconcile
  /// driver reports it when it removes a resource.
  Delete,
}

impl fmt::Display for PlannedAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PlannedAction::Create => f.write_str("create"),
      PlannedAction::Update => f.write_str("update"),
      PlannedAction::Replace { reasons } => write!(f, "replace ({})", reasons.join(", ")),
      PlannedAction::NoOp => f.write_str("no-op"),
      PlannedAction::Delete => f.write_str("delete"),
    }
  }
}

/// A planned record and the action that produces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<R> {
  pub action: PlannedAction,
  pub record: R,
}

impl<R> Plan<R> {
  /// Returns true if applying this plan issues no remote calls.
  pub fn is_noop(&self) -> bool {
    self.action == PlannedAction::NoOp
  }
}

/// A record the planner knows how to merge.
pub trait Plannable: Clone + PartialEq {
  /// Fill defaulted attributes that are unknown or absent.
  fn apply_defaults(&mut self) {}

  /// Take the prior value for every server-computed attribute that is still
  /// unknown.
  fn merge_computed(&mut self, prior: &Self);

  /// Names of the replace-triggering attributes that differ from `prior`.
  fn replace_reasons(&self, _prior: &Self) -> Vec<String> {
    Vec::new()
  }
}

/// Plan the change from `prior` to `desired`.
///
/// With no prior record the plan is always [`PlannedAction::Create`]; the
/// returned record then still carries unknowns for every computed attribute.
pub fn plan<R: Plannable>(desired: &R, prior: Option<&R>) -> Plan<R> {
  let mut record = desired.clone();
  record.apply_defaults();

  let Some(prior) = prior else {
    return Plan {
      action: PlannedAction::Create,
      record,
    };
  };

  let reasons = record.replace_reasons(prior);
  if !reasons.is_empty() {
    // Computed attributes belong to the resource being replaced.
    return Plan {
      action: PlannedAction::Replace { reasons },
      record,
    };
  }

  record.merge_computed(prior);

  let action = if record == *prior {
    PlannedAction::NoOp
  } else {
    PlannedAction::Update
  };

  Plan { action, record }
}
