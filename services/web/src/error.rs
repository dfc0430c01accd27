//! Error types for environment validation

use std::fmt;
use thiserror::Error;

/// What is wrong with a single variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Required but absent (or empty)
    Missing,
    /// Not a well-formed URL
    InvalidUrl(String),
    /// Outside the enumerated set of values
    NotAllowed {
        value: String,
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Missing => f.write_str("required but not set"),
            IssueKind::InvalidUrl(reason) => write!(f, "invalid url ({})", reason),
            IssueKind::NotAllowed { value, allowed } => write!(
                f,
                "expected one of {}, received `{}`",
                allowed.join(", "),
                value
            ),
        }
    }
}

/// A variable that failed its rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{name}: {kind}")]
pub struct EnvIssue {
    pub name: String,
    pub kind: IssueKind,
}

impl EnvIssue {
    pub fn new(name: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Custom error type for environment validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// One or more values failed validation
    #[error("Invalid environment variables: {}", join_issues(.0))]
    Invalid(Vec<EnvIssue>),

    /// A declared variable has no entry in the runtime mapping
    #[error("Environment variable {0} is declared but not mapped to the process environment")]
    Unmapped(String),

    /// A variable is declared more than once across the server and client groups
    #[error("Environment variable {0} is declared more than once")]
    Duplicate(String),
}

impl EnvError {
    /// Issues carried by an [`EnvError::Invalid`], empty otherwise
    pub fn issues(&self) -> &[EnvIssue] {
        match self {
            EnvError::Invalid(issues) => issues,
            _ => &[],
        }
    }
}

fn join_issues(issues: &[EnvIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Type alias for Result with EnvError
pub type EnvResult<T> = Result<T, EnvError>;
