//! flagsync-lib: reconciliation engine for Flagsmith resources
//!
//! This crate converges remote Flagsmith state towards a desired configuration:
//! - `Field`: three-state record attributes (unknown, absent, known)
//! - `value`: the typed value codec shared by feature states and options
//! - `model`: local records and their mapping to remote objects
//! - `plan`: merging desired and prior records into a planned action
//! - `reconcile`: create/read/update/delete/import sequencing over a client

pub mod api;
pub mod config;
pub mod consts;
pub mod diff;
pub mod field;
pub mod logging;
pub mod model;
pub mod plan;
pub mod reconcile;
pub mod value;

pub use api::{ClientError, ClientResult, FlagsmithClient};
pub use config::{ConfigError, ProviderConfig, ResolvedConfig};
pub use field::Field;
pub use model::{ModelError, RemoteRecord, ResourceKind};
pub use plan::{Plan, Plannable, PlannedAction, plan};
pub use reconcile::{CancelFlag, Lifecycle, LifecycleState, Outcome, ReconcileError, Session, Step, reconcile};
pub use value::{FeatureValue, ValueError, ValueKind, ValueRecord, decode, encode};
