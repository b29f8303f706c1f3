//! Signed-in user identity.
//!
//! The session is resolved once at startup and passed explicitly to whatever
//! needs it. `None` always means an anonymous visitor.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Publishes surplus food.
    Donor,
    /// Claims donations (NGOs, hostels, individuals).
    Recipient,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "donor" => Ok(Role::Donor),
            "recipient" => Ok(Role::Recipient),
            other => Err(format!(
                "unknown role '{}', expected 'donor' or 'recipient'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub id: String,
    pub role: Role,
    pub display_name: Option<String>,
}

impl UserSession {
    pub fn new(id: impl Into<String>, role: Role, display_name: Option<String>) -> Self {
        Self {
            id: id.into(),
            role,
            display_name,
        }
    }

    pub fn is_donor(&self) -> bool {
        self.role == Role::Donor
    }

    /// Name shown in the welcome header.
    pub fn greeting_name(session: Option<&UserSession>) -> &str {
        session
            .and_then(|s| s.display_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or("Food Saver")
    }
}

/// Resolves the current session from the saved configuration, if any.
pub fn current_session(config: Option<&Config>) -> Option<UserSession> {
    let config = config?;
    if config.user_id.is_empty() {
        return None;
    }
    Some(UserSession::new(
        config.user_id.clone(),
        config.role,
        config.display_name.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;

    #[test]
    fn test_role_parse() {
        assert_eq!("Donor".parse::<Role>(), Ok(Role::Donor));
        assert_eq!("recipient".parse::<Role>(), Ok(Role::Recipient));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_current_session_requires_user_id() {
        assert_eq!(current_session(None), None);

        let anonymous = Config::new(String::new(), Role::Donor, None, Environment::Local);
        assert_eq!(current_session(Some(&anonymous)), None);

        let config = Config::new(
            "u-42".to_string(),
            Role::Recipient,
            Some("Asha".to_string()),
            Environment::Local,
        );
        let session = current_session(Some(&config)).unwrap();
        assert_eq!(session.id, "u-42");
        assert!(!session.is_donor());
    }

    #[test]
    fn test_greeting_name_falls_back() {
        assert_eq!(UserSession::greeting_name(None), "Food Saver");
        let unnamed = UserSession::new("u1", Role::Donor, Some(String::new()));
        assert_eq!(UserSession::greeting_name(Some(&unnamed)), "Food Saver");
        let named = UserSession::new("u1", Role::Donor, Some("Ravi".to_string()));
        assert_eq!(UserSession::greeting_name(Some(&named)), "Ravi");
    }
}
