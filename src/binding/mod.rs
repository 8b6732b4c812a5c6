//! Binding of allocated parameters onto a typed object graph
//!
//! [`PropertyPath`] describes where a value goes, [`PropertyBinding`] pairs a
//! path with its [`ArgOption`](crate::option::ArgOption) and runs the bind
//! steps, and [`MappingResult`] collects the outcome flags.

pub mod binder;
pub mod error;
pub mod path;
pub mod result;

#[cfg(test)]
mod tests;

pub use binder::{BindContext, Binding, PropertyBinding};
pub use error::{ErrorLog, ErrorRecord, Phase};
pub use path::{Field, Member, Path, PathDefect, PropertyPath, TargetedProperty};
pub use result::MappingResult;
