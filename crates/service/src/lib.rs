//! Service layer for the phone-home instance registry.
//! - `instance`: the record callers report and the registry returns.
//! - `storage`: the backend store abstraction with volatile and Postgres realizations.
//! - `registry`: applies lifecycle events on top of a store.

pub mod errors;
pub mod instance;
pub mod metrics;
pub mod registry;
pub mod storage;

pub use instance::{EventName, InstanceRecord};
pub use registry::Registry;
