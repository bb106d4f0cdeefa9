//! Service layer: synchronization policy.
//!
//! [`SyncPolicy`] decides how a room's authoritative text changes and what
//! a late joiner is seeded with. [`LastWriteWins`] is the shipped policy.

pub mod sync_policy;

pub use sync_policy::{LastWriteWins, SyncPolicy};
