//! Command line interface of the inspection tool

pub mod args;
pub mod display;
