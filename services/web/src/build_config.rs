//! Build configuration handed to the web application's bundler

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::env::{self, LoadedEnv, RuntimeEnv};
use crate::error::EnvResult;

/// Static configuration read once by the build tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// Workspace packages shipped as source that the pipeline must transpile
    pub transpile_packages: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            transpile_packages: vec![database::PACKAGE_NAME.to_string()],
        }
    }
}

impl BuildConfig {
    /// Render the configuration for the build tool
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Validate the environment, then produce the build configuration
///
/// The environment check runs first so a misconfigured production build
/// stops before the bundler starts.
pub fn bootstrap(runtime: RuntimeEnv) -> EnvResult<(LoadedEnv, BuildConfig)> {
    let env = env::init(runtime)?;
    let config = BuildConfig::default();

    info!(packages = ?config.transpile_packages, "Build configuration ready");
    Ok((env, config))
}
