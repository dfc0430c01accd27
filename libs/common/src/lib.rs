//! Common library for the Forum workspace
//!
//! This crate provides functionality shared by the Forum services, currently
//! the `tracing` subscriber setup used by every binary.

pub mod logging;
