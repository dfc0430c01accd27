//! Runtime and build configuration for the Forum web application
//!
//! The web application validates its environment once at startup ([`env`])
//! and then hands its bundler a static [`build_config::BuildConfig`].

pub mod build_config;
pub mod env;
pub mod error;
