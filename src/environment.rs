use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents the different deployment environments available for the CLI.
#[derive(Clone, Default, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development environment.
    Local,
    /// Staging environment for pre-production testing.
    Staging,
    /// Production environment.
    #[default]
    Production,
}

impl Environment {
    /// Picks the environment to run against: an explicit override (usually
    /// `FOODSHARE_ENVIRONMENT`) if it parses, then the one saved at login,
    /// then the default, Production.
    pub fn resolve(override_value: Option<&str>, saved: Option<Environment>) -> Environment {
        override_value
            .and_then(|value| value.parse().ok())
            .or(saved)
            .unwrap_or_default()
    }

    /// Returns the donation API base URL associated with the environment.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8787".to_string(),
            Environment::Staging => "https://staging.api.foodshare.app".to_string(),
            Environment::Production => "https://api.foodshare.app".to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Staging => write!(f, "Staging"),
            Environment::Production => write!(f, "Production"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("Staging".parse::<Environment>(), Ok(Environment::Staging));
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert!("moon".parse::<Environment>().is_err());
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            Environment::resolve(Some("staging"), Some(Environment::Local)),
            Environment::Staging
        );
        // An unparsable override is ignored
        assert_eq!(
            Environment::resolve(Some("moon"), Some(Environment::Local)),
            Environment::Local
        );
        assert_eq!(Environment::resolve(None, None), Environment::Production);
    }
}
