//! The `optbind` inspection tool

pub mod cli;
pub mod inspect;
pub mod startup;
