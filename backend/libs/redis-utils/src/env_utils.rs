//! Environment variable parsing utilities
//!
//! Small helpers used by [`crate::RedisConfig::from_env`] so that missing or
//! malformed variables fall back to defaults instead of panicking.

use std::str::FromStr;

/// Parse an environment variable with a default fallback
///
/// # Example
/// ```ignore
/// let port: u16 = parse_env_with_default("REDIS_PORT", 6379);
/// ```
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    parse_env_optional(key).unwrap_or(default)
}

/// Parse an environment variable, returning None if missing, blank or invalid
pub fn parse_env_optional<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_parse_env_with_default() {
        let result: u16 = parse_env_with_default("NONEXISTENT_REDIS_VAR_XYZ", 6379);
        assert_eq!(result, 6379);

        std::env::set_var("TEST_REDIS_PORT", "6380");
        let result: u16 = parse_env_with_default("TEST_REDIS_PORT", 6379);
        assert_eq!(result, 6380);
        std::env::remove_var("TEST_REDIS_PORT");
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_env_optional_invalid_and_blank() {
        std::env::set_var("TEST_REDIS_DB", "not_a_number");
        assert_eq!(parse_env_optional::<i64>("TEST_REDIS_DB"), None);

        std::env::set_var("TEST_REDIS_DB", "   ");
        assert_eq!(parse_env_optional::<String>("TEST_REDIS_DB"), None);

        std::env::set_var("TEST_REDIS_DB", " 3 ");
        assert_eq!(parse_env_optional::<i64>("TEST_REDIS_DB"), Some(3));
        std::env::remove_var("TEST_REDIS_DB");
    }
}
