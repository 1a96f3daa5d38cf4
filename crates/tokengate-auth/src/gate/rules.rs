//! Ordered path rules deciding what a request needs to be let through.

use std::fmt;

use tokengate_core::error::AppError;
use tokengate_core::result::AppResult;
use tokengate_entity::user::UserRole;

/// What a path demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, including anonymous callers.
    Public,
    /// Any authenticated principal.
    Authenticated,
    /// An authenticated principal holding this role.
    Role(UserRole),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Role(role) => write!(f, "role:{role}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Any,
}

/// A compiled path pattern.
///
/// Segments match literally, `*` matches exactly one segment, and a trailing
/// `/**` matches the prefix itself plus anything beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
    open_ended: bool,
}

impl PathPattern {
    /// Parses a pattern such as `/admin/**` or `/users/*/profile`.
    pub fn parse(pattern: &str) -> AppResult<Self> {
        if !pattern.starts_with('/') {
            return Err(AppError::configuration(format!(
                "Path pattern '{pattern}' must start with '/'"
            )));
        }

        let mut parts: Vec<&str> = split_path(pattern).collect();
        let open_ended = parts.last() == Some(&"**");
        if open_ended {
            parts.pop();
        }
        if parts.contains(&"**") {
            return Err(AppError::configuration(format!(
                "Path pattern '{pattern}' may only use '**' as its last segment"
            )));
        }

        let segments = parts
            .into_iter()
            .map(|part| match part {
                "*" => Segment::Any,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();

        Ok(Self {
            segments,
            open_ended,
        })
    }

    /// Whether `path` falls under this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = split_path(path).collect();
        let length_ok = if self.open_ended {
            parts.len() >= self.segments.len()
        } else {
            parts.len() == self.segments.len()
        };

        length_ok
            && self
                .segments
                .iter()
                .zip(&parts)
                .all(|(segment, part)| match segment {
                    Segment::Any => true,
                    Segment::Literal(literal) => literal.as_str() == *part,
                })
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// One `(pattern, requirement)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    /// Paths covered.
    pub pattern: PathPattern,
    /// Demand placed on callers.
    pub requirement: Requirement,
}

/// Ordered rule list; the first matching rule wins.
///
/// Paths matched by no rule require an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessRules {
    rules: Vec<AccessRule>,
}

impl AccessRules {
    /// An empty rule list, where every path needs authentication.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules the service ships with.
    pub fn defaults() -> AppResult<Self> {
        Self::new()
            .rule("/admin/**", Requirement::Role(UserRole::Admin))?
            .rule("/sign-in/**", Requirement::Public)?
            .rule("/sign-up/**", Requirement::Public)?
            .rule("/health", Requirement::Public)
    }

    /// Appends a rule after the existing ones.
    pub fn rule(mut self, pattern: &str, requirement: Requirement) -> AppResult<Self> {
        self.rules.push(AccessRule {
            pattern: PathPattern::parse(pattern)?,
            requirement,
        });
        Ok(self)
    }

    /// The requirement for `path`.
    pub fn requirement_for(&self, path: &str) -> Requirement {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map(|rule| rule.requirement)
            .unwrap_or(Requirement::Authenticated)
    }

    /// Rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &AccessRule> {
        self.rules.iter()
    }
}
