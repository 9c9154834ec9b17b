use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// Blank values are treated the same as an unset variable, so a `.env` file
/// containing `CHART_IMG_API_KEY=` does not count as configured.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}

/// Reads an optional environment variable.
///
/// Returns `None` when the variable is unset, blank, or not valid unicode.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    get_env_var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn missing_variable_reports_its_name() {
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_MISSING") };
        let err = get_env_var("SHARED_UTILS_TEST_MISSING").unwrap_err();
        assert_eq!(err.0, "SHARED_UTILS_TEST_MISSING");
        assert!(err.to_string().contains("SHARED_UTILS_TEST_MISSING"));
    }

    #[test]
    #[serial]
    fn blank_variable_is_treated_as_missing() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_BLANK", "   ") };
        assert!(get_env_var("SHARED_UTILS_TEST_BLANK").is_err());
        assert_eq!(get_optional_env_var("SHARED_UTILS_TEST_BLANK"), None);
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_BLANK") };
    }

    #[test]
    #[serial]
    fn present_variable_is_returned_verbatim() {
        unsafe { std::env::set_var("SHARED_UTILS_TEST_SET", "abc123") };
        assert_eq!(get_env_var("SHARED_UTILS_TEST_SET").unwrap(), "abc123");
        assert_eq!(
            get_optional_env_var("SHARED_UTILS_TEST_SET").as_deref(),
            Some("abc123")
        );
        unsafe { std::env::remove_var("SHARED_UTILS_TEST_SET") };
    }
}
