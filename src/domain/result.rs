//! Result type alias for GraniteRegulate
//!
//! This module provides a convenient Result type alias that uses RegulateError
//! as the error type.

use super::errors::RegulateError;

/// Result type alias for GraniteRegulate operations
///
/// # Examples
///
/// ```
/// use granite_regulate::domain::result::Result;
/// use granite_regulate::domain::errors::RegulateError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RegulateError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RegulateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ExtractionError, RegulateError};

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(RegulateError::Validation("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> std::result::Result<i32, ExtractionError> {
            Ok(42)
        }

        // ExtractionError converts into RegulateError through `?`
        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
