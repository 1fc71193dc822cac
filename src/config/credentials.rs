//! API credential loading.

use crate::error::{Result, TldwError};

/// Environment variable holding the language model API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Credential for the language model provider, read once at startup.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Read the API key from [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var(API_KEY_ENV).ok())
    }

    pub fn from_value(value: Option<String>) -> Result<Self> {
        match value {
            Some(key) if !key.trim().is_empty() => Ok(Self {
                api_key: key.trim().to_string(),
            }),
            Some(_) => Err(TldwError::Authentication(format!("{} is empty", API_KEY_ENV))),
            None => Err(TldwError::Authentication(format!("{} is not set", API_KEY_ENV))),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("api_key", &"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_key_is_authentication_error() {
        assert!(matches!(Credentials::from_value(None), Err(TldwError::Authentication(_))));
        assert!(matches!(
            Credentials::from_value(Some("   ".into())),
            Err(TldwError::Authentication(_))
        ));
    }

    #[test]
    fn test_key_is_trimmed_and_redacted() {
        let creds = Credentials::from_value(Some(" sk-test \n".into())).unwrap();
        assert_eq!(creds.api_key(), "sk-test");
        assert!(!format!("{:?}", creds).contains("sk-test"));
    }
}
