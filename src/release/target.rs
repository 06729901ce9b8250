//! Which release a pull request should go into.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

/// Release a pull request is added to, resolved once when the event is read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "Value")]
pub enum ReleaseTarget {
    /// Start a new release with a generated name.
    #[default]
    Next,
    /// Start a new release with this name.
    Named(String),
    /// Add to the open release with this pull request number.
    Existing(u64),
}

impl ReleaseTarget {
    /// Resolve a release identifier typed into a comment.
    ///
    /// Blank or `0` means the next release, a positive number an existing
    /// release, anything else a release name.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Next;
        };

        let digits = raw.strip_prefix('#').unwrap_or(raw);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return match digits.parse::<u64>() {
                Ok(0) => Self::Next,
                Ok(number) => Self::Existing(number),
                Err(_) => Self::Named(raw.to_string()),
            };
        }

        Self::Named(raw.to_string())
    }

    /// Whether the target starts a new release.
    #[must_use]
    pub fn is_new(&self) -> bool {
        !matches!(self, Self::Existing(_))
    }
}

impl TryFrom<Value> for ReleaseTarget {
    type Error = Error;

    /// JSON identifiers: `null`, `false`, `""` and `0` mean the next release,
    /// strings a named release, positive integers an existing release.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null | Value::Bool(false) => Ok(Self::Next),
            Value::String(name) if name.trim().is_empty() => Ok(Self::Next),
            Value::String(name) => Ok(Self::Named(name)),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(Self::Next),
                Some(number) => Ok(Self::Existing(number)),
                None => Err(Error::Validation(format!("invalid release number: {n}"))),
            },
            other => Err(Error::Validation(format!("invalid release identifier: {other}"))),
        }
    }
}
