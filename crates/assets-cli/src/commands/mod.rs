//! Command implementations for assets-cli

pub mod deploy;
pub mod plan;
pub mod remove;

pub use deploy::run_deploy;
pub use plan::run_plan;
pub use remove::{confirm_buckets, run_remove};
