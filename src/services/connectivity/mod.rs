//! Connectivity signal types.
//!
//! Network reachability is reported by an external collaborator. The
//! controller consumes it only to tell buffering-because-offline apart from
//! normal buffering; it never probes the network itself.

/// Connectivity state types
pub mod types;

pub use types::*;
