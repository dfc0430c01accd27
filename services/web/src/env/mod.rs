//! Environment validation for the web application
//!
//! Variables are declared once in [`env_schema`], bound to the process
//! environment through [`RuntimeEnv`], and checked in a single synchronous
//! pass at startup. The outcome is an immutable [`Env`] that callers pass
//! along explicitly.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{EnvError, EnvIssue, EnvResult, IssueKind};

pub mod schema;

use schema::{EnvSchema, Resolved, Rule};

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const NODE_ENV: &str = "NODE_ENV";
pub const NEXT_PUBLIC_API_URL: &str = "NEXT_PUBLIC_API_URL";
pub const SKIP_ENV_VALIDATION: &str = "SKIP_ENV_VALIDATION";

/// Naming convention for client-exposed variables
pub const CLIENT_PREFIX: &str = "NEXT_PUBLIC_";

const NODE_ENV_VALUES: &[&str] = &["development", "test", "production"];

/// Variables the web application reads
///
/// Client names carry [`CLIENT_PREFIX`] by convention.
pub fn env_schema() -> EnvSchema {
    EnvSchema::new()
        .server(DATABASE_URL, Rule::Url)
        .server(
            NODE_ENV,
            Rule::OneOf {
                values: NODE_ENV_VALUES,
                default: Some("development"),
            },
        )
        .client(NEXT_PUBLIC_API_URL, Rule::OptionalUrl)
}

/// Runtime mode of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeEnv {
    #[default]
    Development,
    Test,
    Production,
}

impl NodeEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeEnv::Development => "development",
            NodeEnv::Test => "test",
            NodeEnv::Production => "production",
        }
    }
}

impl fmt::Display for NodeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeEnv {
    type Err = IssueKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(NodeEnv::Development),
            "test" => Ok(NodeEnv::Test),
            "production" => Ok(NodeEnv::Production),
            other => Err(IssueKind::NotAllowed {
                value: other.to_string(),
                allowed: NODE_ENV_VALUES,
            }),
        }
    }
}

/// Explicit binding of every declared variable to its process value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub database_url: Option<String>,
    pub node_env: Option<String>,
    pub next_public_api_url: Option<String>,
    /// Skip validation entirely
    pub skip_validation: bool,
}

impl RuntimeEnv {
    /// Read the mapping from the process environment
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: PostgreSQL connection URL (required)
    /// - `NODE_ENV`: `development`, `test` or `production` (default: `development`)
    /// - `NEXT_PUBLIC_API_URL`: backend API URL exposed to the browser (optional)
    /// - `SKIP_ENV_VALIDATION`: any truthy value disables validation
    pub fn from_process() -> Self {
        let var = |name: &str| std::env::var(name).ok();

        Self {
            database_url: var(DATABASE_URL),
            node_env: var(NODE_ENV),
            next_public_api_url: var(NEXT_PUBLIC_API_URL),
            skip_validation: is_truthy(var(SKIP_ENV_VALIDATION).as_deref()),
        }
    }

    /// Treat empty strings exactly like unset variables
    pub fn without_empty_strings(self) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());

        Self {
            database_url: present(self.database_url),
            node_env: present(self.node_env),
            next_public_api_url: present(self.next_public_api_url),
            skip_validation: self.skip_validation,
        }
    }

    /// Name-keyed view of the mapping, as the schema validates it
    pub fn mapping(&self) -> BTreeMap<&'static str, Option<&str>> {
        BTreeMap::from([
            (DATABASE_URL, self.database_url.as_deref()),
            (NODE_ENV, self.node_env.as_deref()),
            (NEXT_PUBLIC_API_URL, self.next_public_api_url.as_deref()),
        ])
    }
}

/// Dotenv files read at startup, highest priority first
pub const DOTENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load dotenv files into the process environment
///
/// Earlier files win over later ones and none of them override variables
/// that are already set. Returns the paths that were found and loaded.
pub fn load_dotenv_files<P: AsRef<Path>>(files: &[P]) -> Vec<PathBuf> {
    files
        .iter()
        .filter_map(|file| dotenvy::from_filename(file.as_ref()).ok())
        .collect()
}

/// Whether a flag value counts as set
///
/// Any non-empty value is set, including `0` and `false`.
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Server-only values; never serialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEnv {
    pub database_url: String,
    pub node_env: NodeEnv,
}

/// Values that may be bundled into client-delivered code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientEnv {
    #[serde(rename = "NEXT_PUBLIC_API_URL", skip_serializing_if = "Option::is_none")]
    pub next_public_api_url: Option<String>,
}

/// Validated environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env {
    pub server: ServerEnv,
    pub client: ClientEnv,
}

impl Env {
    /// Validate a runtime mapping
    ///
    /// Empty strings are treated as absent first. When the mapping carries
    /// the skip flag it is passed through unvalidated.
    pub fn load(runtime: RuntimeEnv) -> EnvResult<LoadedEnv> {
        let runtime = runtime.without_empty_strings();

        if runtime.skip_validation {
            return Ok(LoadedEnv::Unvalidated(runtime));
        }

        let resolved = env_schema().validate(&runtime.mapping())?;
        Env::from_resolved(resolved).map(LoadedEnv::Validated)
    }

    fn from_resolved(mut resolved: Resolved) -> EnvResult<Self> {
        let mut take = |name: &str| resolved.remove(name).flatten();

        let database_url = take(DATABASE_URL).ok_or_else(|| {
            EnvError::Invalid(vec![EnvIssue::new(DATABASE_URL, IssueKind::Missing)])
        })?;
        let node_env = take(NODE_ENV)
            .map(|v| v.parse::<NodeEnv>())
            .transpose()
            .map_err(|kind| EnvError::Invalid(vec![EnvIssue::new(NODE_ENV, kind)]))?
            .unwrap_or_default();
        let next_public_api_url = take(NEXT_PUBLIC_API_URL);

        Ok(Env {
            server: ServerEnv {
                database_url,
                node_env,
            },
            client: ClientEnv {
                next_public_api_url,
            },
        })
    }
}

/// Outcome of loading the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedEnv {
    Validated(Env),
    /// Validation was skipped or failed leniently; values are as supplied
    Unvalidated(RuntimeEnv),
}

impl LoadedEnv {
    pub fn is_validated(&self) -> bool {
        matches!(self, LoadedEnv::Validated(_))
    }

    pub fn validated(&self) -> Option<&Env> {
        match self {
            LoadedEnv::Validated(env) => Some(env),
            LoadedEnv::Unvalidated(_) => None,
        }
    }

    pub fn database_url(&self) -> Option<&str> {
        match self {
            LoadedEnv::Validated(env) => Some(&env.server.database_url),
            LoadedEnv::Unvalidated(raw) => raw.database_url.as_deref(),
        }
    }

    /// Mode in effect; `None` only when an unvalidated value is absent or unknown
    pub fn node_env(&self) -> Option<NodeEnv> {
        match self {
            LoadedEnv::Validated(env) => Some(env.server.node_env),
            LoadedEnv::Unvalidated(raw) => raw.node_env.as_deref().and_then(|v| v.parse().ok()),
        }
    }

    pub fn api_url(&self) -> Option<&str> {
        match self {
            LoadedEnv::Validated(env) => env.client.next_public_api_url.as_deref(),
            LoadedEnv::Unvalidated(raw) => raw.next_public_api_url.as_deref(),
        }
    }
}

/// What startup does when validation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log a warning and continue with the unvalidated mapping
    Warn,
    /// Stop startup with the error
    Halt,
}

/// Policy for a raw `NODE_ENV` value
///
/// Only development (including an unset mode) is lenient.
pub fn failure_policy(node_env: Option<&str>) -> FailurePolicy {
    match node_env.filter(|v| !v.is_empty()) {
        None | Some("development") => FailurePolicy::Warn,
        Some(_) => FailurePolicy::Halt,
    }
}

/// Validate the environment once at startup
///
/// Invalid values halt startup outside development. Schema
/// misconfiguration always halts.
pub fn init(runtime: RuntimeEnv) -> EnvResult<LoadedEnv> {
    let policy = failure_policy(runtime.node_env.as_deref());

    match Env::load(runtime.clone()) {
        Ok(loaded) => {
            if loaded.is_validated() {
                info!("Environment variables validated");
            } else {
                warn!("{} is set; environment validation skipped", SKIP_ENV_VALIDATION);
            }
            Ok(loaded)
        }
        Err(err @ EnvError::Invalid(_)) if policy == FailurePolicy::Warn => {
            warn!(error = %err, "Continuing in development with an invalid environment");
            Ok(LoadedEnv::Unvalidated(runtime.without_empty_strings()))
        }
        Err(err) => {
            error!(error = %err, "Environment validation failed");
            Err(err)
        }
    }
}
