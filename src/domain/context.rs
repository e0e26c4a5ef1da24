//! Error context extension trait
//!
//! Adds `.context()` and `.with_context()` to any `Result` whose error converts
//! into [`TexportError`], so library code can attach the texture set, path or
//! job it was working on without switching to `anyhow`.
//!
//! # Examples
//!
//! ```rust
//! use texport::domain::Result;
//! use texport::domain::context::ResultExt;
//!
//! fn read_metadata(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read metadata file: {path}"))
//! }
//! ```

use crate::domain::errors::TexportError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error (evaluated eagerly)
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context to an error, computing it only on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<TexportError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| wrap(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

/// Prefix the message while keeping the variant, so exit-code mapping still works
fn wrap(err: TexportError, context: impl std::fmt::Display) -> TexportError {
    match err {
        TexportError::Configuration(msg) => {
            TexportError::Configuration(format!("{context}: {msg}"))
        }
        TexportError::Filesystem(msg) => TexportError::Filesystem(format!("{context}: {msg}")),
        TexportError::Io(msg) => TexportError::Filesystem(format!("{context}: {msg}")),
        TexportError::Conversion(msg) => TexportError::Conversion(format!("{context}: {msg}")),
        other => TexportError::Other(format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::HostError;

    #[test]
    fn test_context_keeps_configuration_variant() {
        let result: Result<()> = Err(TexportError::Configuration("bad size".to_string()));
        let err = result.context("Failed to build export spec").unwrap_err();

        assert!(matches!(err, TexportError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Failed to build export spec: bad size"
        );
    }

    #[test]
    fn test_io_error_becomes_filesystem_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let result: std::result::Result<(), std::io::Error> = Err(io_error);
        let err = result.context("Failed to create /proj/TX").unwrap_err();

        assert!(matches!(err, TexportError::Filesystem(_)));
        assert!(err.to_string().contains("/proj/TX"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_with_context_is_lazy() {
        let called = std::cell::Cell::new(false);
        let result: Result<i32> = Ok(7);
        let value = result
            .with_context(|| {
                called.set(true);
                "unused"
            })
            .unwrap();

        assert_eq!(value, 7);
        assert!(!called.get());
    }

    #[test]
    fn test_host_error_with_context() {
        let result: std::result::Result<(), HostError> =
            Err(HostError::TextureSetNotFound("Body".to_string()));
        let err = result.context("Listing channels").unwrap_err();

        assert!(matches!(err, TexportError::Other(_)));
        assert!(err.to_string().contains("Listing channels"));
        assert!(err.to_string().contains("Body"));
    }
}
