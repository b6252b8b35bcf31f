//! CLI command implementations
//!
//! Each command returns its process exit code.

pub mod init;
pub mod report;
pub mod scan;
pub mod serve;
pub mod validate;
