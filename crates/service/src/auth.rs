use crate::error::ProcessError;

/// Secret used when none is configured.
pub const DEFAULT_SECRET: &str = "admin";

/// Gate a request on a caller-supplied credential.
///
/// Stateless compare against the configured secret (falling back to
/// [`DEFAULT_SECRET`]); runs before any workbook is decoded. No hashing, no
/// sessions.
pub fn authorize(credential: Option<&str>, secret: Option<&str>) -> Result<(), ProcessError> {
    let secret = secret.unwrap_or(DEFAULT_SECRET);
    match credential {
        Some(c) if c == secret => Ok(()),
        _ => Err(ProcessError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_credential_passes() {
        assert!(authorize(Some("s3cret"), Some("s3cret")).is_ok());
    }

    #[test]
    fn unconfigured_secret_falls_back_to_default() {
        assert!(authorize(Some("admin"), None).is_ok());
        assert!(matches!(
            authorize(Some("other"), None),
            Err(ProcessError::Unauthorized)
        ));
    }

    #[test]
    fn absent_credential_is_rejected() {
        assert!(matches!(
            authorize(None, Some("s3cret")),
            Err(ProcessError::Unauthorized)
        ));
    }
}
