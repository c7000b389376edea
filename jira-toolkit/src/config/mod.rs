//! Connection and tool configuration.
//!
//! [`JiraConfig`] carries the site and credentials taken from `JIRA_DOMAIN`,
//! `JIRA_EMAIL` and `JIRA_API_TOKEN`. [`Settings`] holds the optional
//! behaviour knobs read from a TOML file.

mod error;
mod jira;
mod settings;

pub use error::ConfigError;
pub use jira::{JiraConfig, API_TOKEN_VAR, DOMAIN_VAR, EMAIL_VAR};
pub use settings::Settings;
