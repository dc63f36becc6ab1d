//! Lifecycle orchestration.
//!
//! A [`Session`] wraps a [`FlagsmithClient`] and hands out one lifecycle
//! handle per resource kind. Each handle implements [`Lifecycle`]: create,
//! read, update, delete and import, each a short sequence of remote calls
//! issued one after the other.
//!
//! Every remote call goes through [`Session::call`], which:
//!
//! - refuses to start when the session's [`CancelFlag`] is set
//! - logs the call with its [`Step`]
//! - tags any failure with the step that failed
//!
//! [`reconcile`] ties the pieces together: refresh the prior record, plan
//! against it, dispatch the planned action.

pub mod environment;
pub mod feature;
pub mod feature_state;
pub mod mv_option;
pub mod organisation;
pub mod project;
pub mod segment;
pub mod tag;

pub use environment::Environments;
pub use feature::Features;
pub use feature_state::FeatureStates;
pub use mv_option::MultivariateOptions;
pub use organisation::Organisations;
pub use project::Projects;
pub use segment::Segments;
pub use tag::Tags;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ClientError, ClientResult, FlagsmithClient};
use crate::consts::IMPORT_ID_SEPARATOR;
use crate::model::{ModelError, RemoteRecord, ResourceKind};
use crate::plan::{Plannable, PlannedAction, plan};

/// One remote call within a lifecycle operation, e.g. `feature.add_owners`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
  pub kind: ResourceKind,
  pub op: &'static str,
}

impl Step {
  pub const fn new(kind: ResourceKind, op: &'static str) -> Self {
    Self { kind, op }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.kind, self.op)
  }
}

/// Errors raised by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
  /// The resource to import does not exist remotely.
  #[error("{kind} '{id}' not found")]
  NotFound { kind: ResourceKind, id: String },

  /// A parent identifier needed to address the resource was never resolved.
  #[error("{kind} {field} was never resolved; create or read the {kind} first")]
  MissingParentId { kind: ResourceKind, field: &'static str },

  /// The resource's own identifier was never resolved.
  #[error("{kind} {field} was never resolved; create or read the {kind} first")]
  MissingId { kind: ResourceKind, field: &'static str },

  /// The remote service rejected a call. The client's message is kept intact.
  #[error("{step} failed: {source}")]
  Remote {
    step: Step,
    #[source]
    source: ClientError,
  },

  /// The session was cancelled before the call was issued.
  #[error("cancelled before {step}")]
  Cancelled { step: Step },

  #[error("invalid import identifier {id:?} for {kind}, expected {expected}")]
  InvalidImportId {
    kind: ResourceKind,
    id: String,
    expected: &'static str,
  },

  #[error(transparent)]
  Model(#[from] ModelError),
}

/// Shared cancellation signal. Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stop issuing remote calls. A call already in flight completes.
  pub fn cancel(&self) {
    self.0.store(true, Ordering::SeqCst);
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::SeqCst)
  }
}

/// A reconciliation session over one client.
pub struct Session<C> {
  client: C,
  cancel: CancelFlag,
}

impl<C: FlagsmithClient> Session<C> {
  pub fn new(client: C) -> Self {
    Self {
      client,
      cancel: CancelFlag::new(),
    }
  }

  /// Use an existing cancellation flag, typically one shared with the host.
  pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
    self.cancel = cancel;
    self
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  pub fn cancel_flag(&self) -> CancelFlag {
    self.cancel.clone()
  }

  pub fn features(&self) -> Features<'_, C> {
    Features::new(self)
  }

  pub fn feature_states(&self) -> FeatureStates<'_, C> {
    FeatureStates::new(self)
  }

  pub fn segments(&self) -> Segments<'_, C> {
    Segments::new(self)
  }

  pub fn multivariate_options(&self) -> MultivariateOptions<'_, C> {
    MultivariateOptions::new(self)
  }

  pub fn tags(&self) -> Tags<'_, C> {
    Tags::new(self)
  }

  pub fn projects(&self) -> Projects<'_, C> {
    Projects::new(self)
  }

  pub fn environments(&self) -> Environments<'_, C> {
    Environments::new(self)
  }

  pub fn organisations(&self) -> Organisations<'_, C> {
    Organisations::new(self)
  }

  /// Issue one remote call.
  pub(crate) fn call<T>(&self, step: Step, f: impl FnOnce(&C) -> ClientResult<T>) -> Result<T, ReconcileError> {
    if self.cancel.is_cancelled() {
      warn!(step = %step, "session cancelled, not issuing call");
      return Err(ReconcileError::Cancelled { step });
    }
    debug!(step = %step, "remote call");
    f(&self.client).map_err(|source| ReconcileError::Remote { step, source })
  }

  /// Issue a read. A not-found answer means the resource is gone.
  pub(crate) fn call_read<T>(
    &self,
    step: Step,
    f: impl FnOnce(&C) -> ClientResult<T>,
  ) -> Result<Option<T>, ReconcileError> {
    match self.call(step, f) {
      Ok(value) => Ok(Some(value)),
      Err(ReconcileError::Remote {
        source: ClientError::NotFound(message),
        ..
      }) => {
        warn!(step = %step, message = %message, "resource no longer exists");
        Ok(None)
      }
      Err(err) => Err(err),
    }
  }
}

/// Create, read, update, delete and import for one resource kind.
pub trait Lifecycle {
  type Record: Plannable + RemoteRecord;

  /// Create the planned record and return it as the server stored it.
  fn create(&self, planned: &Self::Record) -> Result<Self::Record, ReconcileError>;

  /// Refresh a previously observed record. `Ok(None)` means the resource no
  /// longer exists and local state should be cleared.
  fn read(&self, prior: &Self::Record) -> Result<Option<Self::Record>, ReconcileError>;

  /// Send the full planned record. `prior` is the last observed record.
  fn update(&self, planned: &Self::Record, prior: &Self::Record) -> Result<Self::Record, ReconcileError>;

  fn delete(&self, prior: &Self::Record) -> Result<(), ReconcileError>;

  /// A record carrying only the identity encoded in an import identifier.
  fn import_stub(&self, id: &str) -> Result<Self::Record, ReconcileError>;

  /// Adopt an existing remote resource.
  fn import(&self, id: &str) -> Result<Self::Record, ReconcileError> {
    let kind = <Self::Record as RemoteRecord>::KIND;
    let stub = self.import_stub(id)?;
    let record = self.read(&stub)?.ok_or_else(|| ReconcileError::NotFound {
      kind,
      id: id.to_string(),
    })?;
    info!(kind = %kind, id, "imported");
    Ok(record)
  }
}

/// Where a lifecycle ended up after [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
  Created,
  ReadNormalized,
  Updated,
  Deleted,
}

/// Result of a [`reconcile`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<R> {
  pub action: PlannedAction,
  pub state: LifecycleState,
  /// The observed record, `None` once deleted.
  pub record: Option<R>,
}

/// Converge one resource.
///
/// `desired` of `None` deletes the resource. `prior` is the last observed
/// record; it is refreshed with a read before planning, so a resource deleted
/// out of band is recreated rather than updated.
pub fn reconcile<L: Lifecycle>(
  lifecycle: &L,
  desired: Option<&L::Record>,
  prior: Option<&L::Record>,
) -> Result<Outcome<L::Record>, ReconcileError> {
  let kind = <L::Record as RemoteRecord>::KIND;
  let current = match prior {
    Some(prior) => lifecycle.read(prior)?,
    None => None,
  };

  let Some(desired) = desired else {
    if let Some(current) = &current {
      lifecycle.delete(current)?;
      info!(kind = %kind, "deleted");
    } else {
      debug!(kind = %kind, "nothing to delete");
    }
    return Ok(Outcome {
      action: PlannedAction::Delete,
      state: LifecycleState::Deleted,
      record: None,
    });
  };

  let plan = plan(desired, current.as_ref());
  info!(kind = %kind, action = %plan.action, "planned");

  let (state, record) = match (&plan.action, current) {
    (PlannedAction::NoOp, Some(current)) => (LifecycleState::ReadNormalized, current),
    (PlannedAction::Update, Some(current)) => (LifecycleState::Updated, lifecycle.update(&plan.record, &current)?),
    (PlannedAction::Replace { .. }, Some(current)) => {
      lifecycle.delete(&current)?;
      (LifecycleState::Created, lifecycle.create(&plan.record)?)
    }
    _ => (LifecycleState::Created, lifecycle.create(&plan.record)?),
  };

  Ok(Outcome {
    action: plan.action,
    state,
    record: Some(record),
  })
}

/// Split an import identifier into exactly `N` non-empty parts.
pub(crate) fn parse_import_id<const N: usize>(
  kind: ResourceKind,
  id: &str,
  expected: &'static str,
) -> Result<[String; N], ReconcileError> {
  let invalid = || ReconcileError::InvalidImportId {
    kind,
    id: id.to_string(),
    expected,
  };

  let parts: Vec<String> = id.split(IMPORT_ID_SEPARATOR).map(str::to_string).collect();
  if parts.iter().any(String::is_empty) {
    return Err(invalid());
  }
  parts.try_into().map_err(|_| invalid())
}
