//! Store orchestrator subsystem for aerokv
//!
//! Ties together the version chains, the prefix index and the expiration
//! queue behind two operations:
//! - `insert` - append a version, optionally with a TTL
//! - `scan_by_prefix` - latest live record of every field under a prefix
//!
//! Both sweep due expirations first, so they always observe a store in
//! which nothing visible has expired.

mod errors;
mod scan;
#[allow(clippy::module_inception)]
mod store;
mod sweep;

pub use errors::{StoreError, StoreResult};
pub use scan::ScanEntry;
pub use store::Store;
pub use sweep::SweepReport;
