//! Input validation utilities

/// Validate username
///
/// Only emptiness is checked. Any other string is a valid username and is
/// matched exactly, case included.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username(" ").is_ok());
        assert_eq!(
            validate_username(""),
            Err("Username is required".to_string())
        );
    }
}
