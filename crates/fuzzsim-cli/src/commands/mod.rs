//! CLI command implementations.

pub mod compare;
pub mod infer;
pub mod init;
pub mod report;
