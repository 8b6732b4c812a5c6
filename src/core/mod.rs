//! Logging, build metadata and fatal error reporting

pub mod error_handling;
pub mod logging;
pub mod version;
