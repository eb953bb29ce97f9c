//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile a route pattern (`/tasks/:id/complete`) into segments
//! - Match a concrete request path against the compiled segments
//! - Extract named parameters on success
//!
//! # Design Decisions
//! - Literal segments match exactly (case-sensitive)
//! - Parameter segments (`:name`) match any single non-empty segment
//! - Segment counts must agree; no wildcards, no optional segments
//! - No match is `None`, never an error: the caller tries the next route

use std::fmt;
use thiserror::Error;

/// Prefix marking a parameter segment in a route pattern.
pub const PARAM_PREFIX: char = ':';

/// Errors raised while compiling a route pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// Patterns are absolute paths.
    #[error("route pattern must start with '/': {0}")]
    NotAbsolute(String),

    /// A `:` segment without a name.
    #[error("unnamed parameter in route pattern: {0}")]
    UnnamedParam(String),

    /// The same parameter name used twice.
    #[error("duplicate parameter '{name}' in route pattern: {pattern}")]
    DuplicateParam { pattern: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Parameters captured from a request path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: Vec<(String, String)>,
}

impl PathParams {
    /// Look up a captured parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern such as `/tasks/:id`.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        };

        let mut segments = Vec::new();
        for part in rest.split('/') {
            match part.strip_prefix(PARAM_PREFIX) {
                Some("") => return Err(PatternError::UnnamedParam(pattern.to_string())),
                Some(name) => {
                    let duplicate = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if duplicate {
                        return Err(PatternError::DuplicateParam {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written, e.g. for metric labels.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request path (without query string).
    /// Returns the captured parameters, or `None` if the path does not fit.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix('/')?;
        let mut parts = rest.split('/');
        let mut params = PathParams::default();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) => {
                    if part != literal {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.values.push((name.clone(), part.to_string()));
                }
            }
        }

        // Extra trailing segments mean a different path shape.
        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = PathPattern::parse("/tasks").unwrap();

        let params = pattern.match_path("/tasks").unwrap();
        assert!(params.is_empty());

        assert!(pattern.match_path("/tasks/").is_none());
        assert!(pattern.match_path("/task").is_none());
        assert!(pattern.match_path("/TASKS").is_none()); // Case sensitive
        assert!(pattern.match_path("/tasks/abc").is_none());
    }

    #[test]
    fn test_param_extraction() {
        let pattern = PathPattern::parse("/tasks/:id").unwrap();

        let params = pattern.match_path("/tasks/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.len(), 1);

        assert!(pattern.match_path("/tasks").is_none());
        assert!(pattern.match_path("/tasks/").is_none()); // Empty segment
        assert!(pattern.match_path("/tasks/42/complete").is_none());
    }

    #[test]
    fn test_compound_pattern() {
        let pattern = PathPattern::parse("/tasks/:id/complete").unwrap();

        let params = pattern
            .match_path("/tasks/7c9e6679-7425-40de-944b-e07fc1f90ae7/complete")
            .unwrap();
        assert_eq!(params.get("id"), Some("7c9e6679-7425-40de-944b-e07fc1f90ae7"));

        assert!(pattern.match_path("/tasks/1/completed").is_none());
        assert!(pattern.match_path("/tasks//complete").is_none());
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::parse("/users/:user/tasks/:task").unwrap();
        let params = pattern.match_path("/users/ana/tasks/9").unwrap();

        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("user", "ana"), ("task", "9")]);
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_invalid_patterns() {
        assert_eq!(
            PathPattern::parse("tasks"),
            Err(PatternError::NotAbsolute("tasks".into()))
        );
        assert_eq!(
            PathPattern::parse("/tasks/:"),
            Err(PatternError::UnnamedParam("/tasks/:".into()))
        );
        assert!(matches!(
            PathPattern::parse("/a/:id/b/:id"),
            Err(PatternError::DuplicateParam { .. })
        ));
    }

    #[test]
    fn test_display_round_trips_raw_pattern() {
        let pattern = PathPattern::parse("/tasks/:id/complete").unwrap();
        assert_eq!(pattern.to_string(), "/tasks/:id/complete");
        assert_eq!(pattern.as_str(), "/tasks/:id/complete");
    }
}
