use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::app::get_config_dir;
use crate::models::User;

/// Signed-in session that persists between runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Session {
    pub uid: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl Session {
    /// Get the path to the session file
    fn session_file() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("session.toml"))
    }

    /// Load session state from disk
    pub fn load() -> Result<Self> {
        let path = Self::session_file()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save session state to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::session_file()?;
        let content = toml::to_string_pretty(&self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Record the signed-in user
    pub fn set_user(&mut self, user: &User) {
        self.uid = Some(user.uid.clone());
        self.email = Some(user.email.clone());
        self.name = Some(user.name.clone());
    }

    /// Forget the signed-in user
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_signed_in(&self) -> bool {
        self.uid.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;

    #[test]
    fn test_set_and_clear_user() {
        let user = User {
            uid: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Role::Employee,
            approved: true,
            office_id: None,
            department_id: None,
            team_id: None,
            manager_id: None,
            active: true,
            created_at: Utc::now(),
            last_login: None,
        };

        let mut session = Session::default();
        assert!(!session.is_signed_in());

        session.set_user(&user);
        assert!(session.is_signed_in());
        assert_eq!(session.uid.as_deref(), Some("u1"));

        session.clear();
        assert!(!session.is_signed_in());
        assert_eq!(session.email, None);
    }
}
