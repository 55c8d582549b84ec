//! Result type alias for nad-ch

use super::errors::NadError;

/// Result type alias for nad-ch operations
///
/// # Examples
///
/// ```
/// use nad_ch::domain::result::Result;
/// use nad_ch::domain::errors::NadError;
///
/// fn failing_function() -> Result<()> {
///     Err(NadError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, NadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
