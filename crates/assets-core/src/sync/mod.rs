//! Bulk upload and removal against object storage
//!
//! - **plan**: flatten settings trees into the uploads they describe
//! - **engine**: [`SyncEngine`], which performs the uploads or empties the
//!   target buckets

mod engine;
mod plan;

pub use engine::{SyncEngine, SyncReport};
pub use plan::{PlannedUpload, plan};
