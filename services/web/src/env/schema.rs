//! Declarative environment schema
//!
//! An [`EnvSchema`] lists every variable the application reads, split into a
//! server group and a client group, each with a [`Rule`]. Validation runs all
//! rules in one pass and reports every failing variable together.

use std::collections::{BTreeMap, BTreeSet};

use url::Url;

use crate::error::{EnvError, EnvIssue, EnvResult, IssueKind};

/// Values keyed by variable name after validation, with defaults applied
pub type Resolved = BTreeMap<&'static str, Option<String>>;

/// Validation rule for a single variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Required, well-formed URL
    Url,
    /// Well-formed URL when present
    OptionalUrl,
    /// One of `values`, resolving to `default` when absent
    OneOf {
        values: &'static [&'static str],
        default: Option<&'static str>,
    },
}

impl Rule {
    /// Check a value, returning what it resolves to
    pub fn check(&self, value: Option<&str>) -> Result<Option<String>, IssueKind> {
        match (*self, value) {
            (Rule::Url, None) => Err(IssueKind::Missing),
            (Rule::OptionalUrl, None) => Ok(None),
            (Rule::Url | Rule::OptionalUrl, Some(value)) => match Url::parse(value) {
                Ok(_) => Ok(Some(value.to_string())),
                Err(e) => Err(IssueKind::InvalidUrl(e.to_string())),
            },
            (Rule::OneOf { default, .. }, None) => default
                .map(|default| Some(default.to_string()))
                .ok_or(IssueKind::Missing),
            (Rule::OneOf { values, .. }, Some(value)) => {
                if values.iter().any(|allowed| *allowed == value) {
                    Ok(Some(value.to_string()))
                } else {
                    Err(IssueKind::NotAllowed {
                        value: value.to_string(),
                        allowed: values,
                    })
                }
            }
        }
    }
}

/// Which side of the process boundary may read a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    /// Only the backend process
    Server,
    /// Bundled into client-delivered code
    Client,
}

/// A declared variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    pub name: &'static str,
    pub exposure: Exposure,
    pub rule: Rule,
}

/// Server and client variable declarations
#[derive(Debug, Clone, Default)]
pub struct EnvSchema {
    variables: Vec<Variable>,
}

impl EnvSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a server-only variable
    pub fn server(self, name: &'static str, rule: Rule) -> Self {
        self.declare(name, Exposure::Server, rule)
    }

    /// Declare a client-exposed variable
    pub fn client(self, name: &'static str, rule: Rule) -> Self {
        self.declare(name, Exposure::Client, rule)
    }

    fn declare(mut self, name: &'static str, exposure: Exposure, rule: Rule) -> Self {
        self.variables.push(Variable {
            name,
            exposure,
            rule,
        });
        self
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Names declared with the given exposure, in declaration order
    pub fn names(&self, exposure: Exposure) -> Vec<&'static str> {
        self.variables
            .iter()
            .filter(|v| v.exposure == exposure)
            .map(|v| v.name)
            .collect()
    }

    /// Validate a runtime mapping against every declared rule
    ///
    /// Every declared variable must have an entry in `mapping`, even if the
    /// entry's value is absent. Values must already have empty strings
    /// turned into `None` if that is the desired treatment.
    pub fn validate(&self, mapping: &BTreeMap<&str, Option<&str>>) -> EnvResult<Resolved> {
        self.check_declarations(mapping)?;

        let mut resolved = Resolved::new();
        let mut issues = Vec::new();

        for variable in &self.variables {
            let value = mapping.get(variable.name).copied().flatten();
            match variable.rule.check(value) {
                Ok(value) => {
                    resolved.insert(variable.name, value);
                }
                Err(kind) => issues.push(EnvIssue::new(variable.name, kind)),
            }
        }

        if issues.is_empty() {
            Ok(resolved)
        } else {
            Err(EnvError::Invalid(issues))
        }
    }

    fn check_declarations(&self, mapping: &BTreeMap<&str, Option<&str>>) -> EnvResult<()> {
        let mut seen = BTreeSet::new();
        for variable in &self.variables {
            if !seen.insert(variable.name) {
                return Err(EnvError::Duplicate(variable.name.to_string()));
            }
            if !mapping.contains_key(variable.name) {
                return Err(EnvError::Unmapped(variable.name.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &[&str] = &["red", "green"];

    fn schema() -> EnvSchema {
        EnvSchema::new()
            .server("SERVICE_URL", Rule::Url)
            .server(
                "COLOR",
                Rule::OneOf {
                    values: COLORS,
                    default: Some("red"),
                },
            )
            .client("PUBLIC_URL", Rule::OptionalUrl)
    }

    fn mapping<'a>(
        entries: &[(&'a str, Option<&'a str>)],
    ) -> BTreeMap<&'a str, Option<&'a str>> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_groups_are_tracked_separately() {
        let schema = schema();
        assert_eq!(schema.names(Exposure::Server), ["SERVICE_URL", "COLOR"]);
        assert_eq!(schema.names(Exposure::Client), ["PUBLIC_URL"]);
    }

    #[test]
    fn test_valid_mapping_resolves_with_defaults() {
        let resolved = schema()
            .validate(&mapping(&[
                ("SERVICE_URL", Some("https://svc.example.com")),
                ("COLOR", None),
                ("PUBLIC_URL", None),
            ]))
            .unwrap();

        assert_eq!(
            resolved["SERVICE_URL"].as_deref(),
            Some("https://svc.example.com")
        );
        assert_eq!(resolved["COLOR"].as_deref(), Some("red"));
        assert_eq!(resolved["PUBLIC_URL"], None);
    }

    #[test]
    fn test_every_issue_is_reported() {
        let err = schema()
            .validate(&mapping(&[
                ("SERVICE_URL", None),
                ("COLOR", Some("blue")),
                ("PUBLIC_URL", Some("not a url")),
            ]))
            .unwrap_err();

        let names: Vec<_> = err.issues().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["SERVICE_URL", "COLOR", "PUBLIC_URL"]);
        assert_eq!(err.issues()[0].kind, IssueKind::Missing);
        assert!(matches!(
            err.issues()[1].kind,
            IssueKind::NotAllowed { ref value, .. } if value == "blue"
        ));
        assert!(matches!(err.issues()[2].kind, IssueKind::InvalidUrl(_)));
    }

    #[test]
    fn test_unmapped_variable_is_a_misconfiguration() {
        let err = schema()
            .validate(&mapping(&[
                ("SERVICE_URL", Some("https://svc.example.com")),
                ("COLOR", None),
            ]))
            .unwrap_err();

        assert_eq!(err, EnvError::Unmapped("PUBLIC_URL".to_string()));
    }

    #[test]
    fn test_groups_must_be_disjoint() {
        let err = EnvSchema::new()
            .server("SHARED", Rule::OptionalUrl)
            .client("SHARED", Rule::OptionalUrl)
            .validate(&mapping(&[("SHARED", None)]))
            .unwrap_err();

        assert_eq!(err, EnvError::Duplicate("SHARED".to_string()));
    }

    #[test]
    fn test_one_of_without_default_requires_value() {
        let rule = Rule::OneOf {
            values: COLORS,
            default: None,
        };
        assert_eq!(rule.check(None), Err(IssueKind::Missing));
        assert_eq!(rule.check(Some("green")), Ok(Some("green".to_string())));
    }

    #[test]
    fn test_url_rule_rejects_relative_paths() {
        assert!(matches!(
            Rule::Url.check(Some("/api")),
            Err(IssueKind::InvalidUrl(_))
        ));
        assert_eq!(
            Rule::Url.check(Some("postgres://u:p@h/db")),
            Ok(Some("postgres://u:p@h/db".to_string()))
        );
    }
}
