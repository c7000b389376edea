//! Jira site and credential configuration.

use super::ConfigError;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Environment variable holding the Jira site domain.
pub const DOMAIN_VAR: &str = "JIRA_DOMAIN";
/// Environment variable holding the account email.
pub const EMAIL_VAR: &str = "JIRA_EMAIL";
/// Environment variable holding the API token.
pub const API_TOKEN_VAR: &str = "JIRA_API_TOKEN";

/// Site and credentials used for every request.
#[derive(Clone)]
pub struct JiraConfig {
    base_url: Url,
    email: String,
    api_token: String,
    timeout: Option<Duration>,
}

impl JiraConfig {
    /// Creates a configuration from a domain and basic-auth credentials.
    ///
    /// `domain` is either a bare host (`acme.atlassian.net`, https is
    /// implied) or a full base URL such as `http://127.0.0.1:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingValue`] for blank values and
    /// [`ConfigError::InvalidDomain`] if the domain is not a usable URL.
    pub fn new(domain: &str, email: &str, api_token: &str) -> Result<Self, ConfigError> {
        let domain = require(DOMAIN_VAR, domain)?;
        let email = require(EMAIL_VAR, email)?;
        let api_token = require(API_TOKEN_VAR, api_token)?;

        Ok(Self {
            base_url: parse_base_url(&domain)?,
            email,
            api_token,
            timeout: None,
        })
    }

    /// Sets a per-request timeout. `None` keeps the transport default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the API token.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Returns the per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn require(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::MissingValue { name });
    }
    Ok(value.to_string())
}

fn parse_base_url(domain: &str) -> Result<Url, ConfigError> {
    let raw = if domain.contains("://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };

    let mut url = Url::parse(&raw).map_err(|e| ConfigError::InvalidDomain {
        domain: domain.to_string(),
        message: e.to_string(),
    })?;

    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidDomain {
            domain: domain.to_string(),
            message: "no host".to_string(),
        });
    }

    // Url::join drops the last path segment unless the base ends in '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_implies_https() {
        let config = JiraConfig::new("acme.atlassian.net", "me@acme.io", "token").unwrap();
        assert_eq!(config.base_url().as_str(), "https://acme.atlassian.net/");
    }

    #[test]
    fn full_url_is_kept_with_trailing_slash() {
        let config = JiraConfig::new("http://127.0.0.1:8080/jira", "me@acme.io", "token").unwrap();
        assert_eq!(config.base_url().as_str(), "http://127.0.0.1:8080/jira/");
    }

    #[test]
    fn blank_values_are_rejected() {
        let result = JiraConfig::new("acme.atlassian.net", "  ", "token");
        assert!(matches!(
            result,
            Err(ConfigError::MissingValue { name: EMAIL_VAR })
        ));

        let result = JiraConfig::new("", "me@acme.io", "token");
        assert!(matches!(
            result,
            Err(ConfigError::MissingValue { name: DOMAIN_VAR })
        ));
    }

    #[test]
    fn invalid_domain_is_rejected() {
        let result = JiraConfig::new("http://", "me@acme.io", "token");
        assert!(matches!(result, Err(ConfigError::InvalidDomain { .. })));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = JiraConfig::new("acme.atlassian.net", "me@acme.io", "s3cret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
    }
}
