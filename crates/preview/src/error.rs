// ABOUTME: Error types for the preview engine including ErrorCode enum and PreviewError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of preview failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Browser,
    Fetch,
    Timeout,
    Parse,
    Closed,
    NotFound,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Browser => "browser error",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Parse => "parse error",
            ErrorCode::Closed => "session closed",
            ErrorCode::NotFound => "not found",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for preview operations.
#[derive(Debug, thiserror::Error)]
pub struct PreviewError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "glimpse: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl PreviewError {
    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidUrl,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Browser error.
    pub fn browser(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Browser,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Fetch,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Timeout,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Parse error.
    pub fn parse(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Parse,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Closed error (the session was torn down before the call).
    pub fn closed(url: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Closed,
            url: url.into(),
            op: op.into(),
            source: None,
        }
    }

    /// Create a whole-preview NotFound error.
    pub fn not_found(url: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            url: url.into(),
            op: op.into(),
            source: None,
        }
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a Browser error.
    pub fn is_browser(&self) -> bool {
        self.code == ErrorCode::Browser
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        self.code == ErrorCode::Parse
    }

    /// Returns true if this is a Closed error.
    pub fn is_closed(&self) -> bool {
        self.code == ErrorCode::Closed
    }

    /// Returns true if this is a whole-preview NotFound error.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }
}
