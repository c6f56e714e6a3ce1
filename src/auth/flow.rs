use anyhow::Result;
use tracing::info;

use crate::backend::UserStore;
use crate::models::User;
use crate::utils::AttendifyError;

/// Where the app goes after the auth state is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// No signed-in user: show the auth surface
    Auth,
    /// Signed in but not yet approved by an admin
    PendingApproval,
    AdminDashboard,
    EmployeeDashboard,
}

/// Compute the destination for a signed-in user.
///
/// Approval is checked before role: an unapproved admin still lands on
/// the pending-approval surface.
pub fn route_for(user: &User) -> NavigationTarget {
    if !user.approved {
        NavigationTarget::PendingApproval
    } else if user.is_admin() {
        NavigationTarget::AdminDashboard
    } else {
        NavigationTarget::EmployeeDashboard
    }
}

/// Sign-in and registration against the user store
pub struct AuthFlow<'a> {
    users: &'a dyn UserStore,
}

impl<'a> AuthFlow<'a> {
    pub fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Sign in and resolve the navigation target for the account
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(User, NavigationTarget)> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AttendifyError::AuthError("Email and password are required".into()).into());
        }

        let user = self.users.login(email.trim(), password).await?;
        let target = route_for(&user);
        info!(uid = %user.uid, ?target, "signed in");
        Ok((user, target))
    }

    /// Register a new employee account; new accounts always land on the
    /// pending-approval surface.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        office_id: &str,
    ) -> Result<(User, NavigationTarget)> {
        if name.trim().is_empty()
            || email.trim().is_empty()
            || password.trim().is_empty()
            || office_id.trim().is_empty()
        {
            return Err(AttendifyError::AuthError("All fields are required".into()).into());
        }

        let user = self
            .users
            .register(name.trim(), email.trim(), password, office_id.trim())
            .await?;
        info!(uid = %user.uid, "registered, awaiting approval");
        Ok((user, NavigationTarget::PendingApproval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use async_trait::async_trait;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn user(role: Role, approved: bool) -> User {
        User {
            uid: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role,
            approved,
            office_id: Some("office-1".into()),
            department_id: None,
            team_id: None,
            manager_id: None,
            active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    /// Store that returns a fixed user for every call
    struct FixedStore(User);

    #[async_trait]
    impl UserStore for FixedStore {
        async fn login(&self, _email: &str, _password: &str) -> Result<User> {
            Ok(self.0.clone())
        }

        async fn register(
            &self,
            _name: &str,
            _email: &str,
            _password: &str,
            _office_id: &str,
        ) -> Result<User> {
            Ok(self.0.clone())
        }

        async fn get_profile(&self, _uid: &str) -> Result<User> {
            Ok(self.0.clone())
        }

        async fn list_employees(&self, _office_id: Option<&str>) -> Result<Vec<User>> {
            Ok(vec![self.0.clone()])
        }
    }

    #[test]
    fn test_routing_checks_approval_before_role() {
        assert_eq!(
            route_for(&user(Role::Admin, false)),
            NavigationTarget::PendingApproval
        );
        assert_eq!(
            route_for(&user(Role::Employee, false)),
            NavigationTarget::PendingApproval
        );
        assert_eq!(
            route_for(&user(Role::Admin, true)),
            NavigationTarget::AdminDashboard
        );
        assert_eq!(
            route_for(&user(Role::Employee, true)),
            NavigationTarget::EmployeeDashboard
        );
    }

    #[test]
    fn test_non_admin_roles_route_to_employee_dashboard() {
        assert_eq!(
            route_for(&user(Role::Manager, true)),
            NavigationTarget::EmployeeDashboard
        );
        assert_eq!(
            route_for(&user(Role::Supervisor, true)),
            NavigationTarget::EmployeeDashboard
        );
    }

    #[tokio::test]
    async fn test_sign_in_rejects_empty_credentials() {
        let store = FixedStore(user(Role::Employee, true));
        let flow = AuthFlow::new(&store);

        assert!(flow.sign_in("", "secret").await.is_err());
        assert!(flow.sign_in("ada@example.com", "  ").await.is_err());
    }

    #[tokio::test]
    async fn test_sign_in_routes_by_account_state() {
        let store = FixedStore(user(Role::Employee, true));
        let flow = AuthFlow::new(&store);

        let (signed_in, target) = flow.sign_in("ada@example.com", "secret").await.unwrap();
        assert_eq!(signed_in.uid, "u1");
        assert_eq!(target, NavigationTarget::EmployeeDashboard);
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        let store = FixedStore(user(Role::Employee, false));
        let flow = AuthFlow::new(&store);

        assert!(flow.register("Ada", "", "secret", "office-1").await.is_err());
        assert!(flow
            .register("Ada", "ada@example.com", "secret", "")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_register_lands_on_pending_approval() {
        let store = FixedStore(user(Role::Employee, false));
        let flow = AuthFlow::new(&store);

        let (_, target) = flow
            .register("Ada", "ada@example.com", "secret", "office-1")
            .await
            .unwrap();
        assert_eq!(target, NavigationTarget::PendingApproval);
    }
}
