//! Pre-flight checks before any network call.
//!
//! Validates that the credential and configuration are usable so a run
//! fails at startup instead of midway.

use crate::config::{Credentials, Settings};
use crate::error::{Result, TldwError};

/// Run pre-flight checks on `api_key` and the settings, returning the
/// credential for the run.
pub fn check(settings: &Settings, api_key: Option<String>) -> Result<Credentials> {
    let credentials = Credentials::from_value(api_key)?;

    if settings.transcript.languages.iter().all(|l| l.trim().is_empty()) {
        return Err(TldwError::Config(
            "transcript.languages must name at least one language".to_string(),
        ));
    }
    if settings.summary.model.trim().is_empty() {
        return Err(TldwError::Config("summary.model is empty".to_string()));
    }

    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::API_KEY_ENV;

    #[test]
    fn test_missing_key_fails_before_anything_else() {
        let mut settings = Settings::default();
        settings.transcript.languages.clear();

        let err = check(&settings, None).unwrap_err();
        assert!(matches!(err, TldwError::Authentication(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_empty_language_list_is_rejected() {
        let mut settings = Settings::default();
        settings.transcript.languages = vec![" ".to_string()];

        let err = check(&settings, Some("sk-test".into())).unwrap_err();
        assert!(matches!(err, TldwError::Config(_)));
    }

    #[test]
    fn test_defaults_pass_with_key() {
        let creds = check(&Settings::default(), Some("sk-test".into())).unwrap();
        assert_eq!(creds.api_key(), "sk-test");
    }
}
