//! Identity wrappers for repositories, pull requests, and tokens.

use super::error::IngestError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Validates that the owner is a single non-empty path segment.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidRepository` when the value is blank or
    /// contains a `/`.
    pub fn new(value: &str) -> Result<Self, IngestError> {
        validate_segment("repository owner", value).map(Self)
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Validates that the name is a single non-empty path segment.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidRepository` when the value is blank or
    /// contains a `/`.
    pub fn new(value: &str) -> Result<Self, IngestError> {
        validate_segment("repository name", value).map(Self)
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn validate_segment(label: &str, value: &str) -> Result<String, IngestError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IngestError::InvalidRepository {
            message: format!("{label} must not be empty"),
        });
    }
    if let Some(invalid) = trimmed.chars().find(|ch| !is_name_char(*ch)) {
        return Err(IngestError::InvalidRepository {
            message: format!("{label} contains invalid character '{invalid}': {trimmed}"),
        });
    }
    if matches!(trimmed, "." | "..") {
        return Err(IngestError::InvalidRepository {
            message: format!("{label} must not be '{trimmed}'"),
        });
    }
    Ok(trimmed.to_owned())
}

/// Characters GitHub accepts in owner and repository names.
const fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.')
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a positive pull request number.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::InvalidRecord` when the value is zero.
    pub fn new(value: u64) -> Result<Self, IngestError> {
        if value == 0 {
            return Err(IngestError::InvalidRecord {
                message: "pull request number must be a positive integer".to_owned(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `IngestError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, IngestError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IngestError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(<redacted>)")
    }
}
