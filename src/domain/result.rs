//! Result type alias for texport
//!
//! This module provides a convenient Result type alias that uses TexportError
//! as the error type.

use super::errors::TexportError;

/// Result type alias for texport operations
///
/// # Examples
///
/// ```
/// use texport::domain::result::Result;
/// use texport::domain::errors::TexportError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(TexportError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, TexportError>;
