// src/client/auth.rs
//
// Client-side auth state for admin screens. The identity check is async;
// until it settles the state is Loading and a guarded page must render a
// loading view instead of redirecting (redirecting while the check is
// still pending causes a flash-redirect on refresh).

use crate::client::payload::ItemEnvelope;
use crate::client::ClientError;
use crate::models::user::UserView;

#[derive(Debug, Clone)]
pub enum AuthState {
    Loading,
    Anonymous,
    Authenticated(UserView),
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    state: AuthState,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGate {
    pub fn new() -> Self {
        Self {
            state: AuthState::Loading,
        }
    }

    /// Feeds the `/api/auth/me` response body in. `data: null` settles the
    /// gate as anonymous.
    pub fn resolve(&mut self, body: &str) -> Result<(), ClientError> {
        let envelope: ItemEnvelope<Option<UserView>> = serde_json::from_str(body)?;
        self.state = match envelope {
            ItemEnvelope {
                success: true,
                data: Some(Some(user)),
                ..
            } => AuthState::Authenticated(user),
            ItemEnvelope { success: true, .. } => AuthState::Anonymous,
            ItemEnvelope { message, .. } => {
                return Err(ClientError::Api(
                    message.unwrap_or_else(|| "identity check failed".to_string()),
                ))
            }
        };
        Ok(())
    }

    /// A failed identity request (network error, 401) settles as anonymous
    /// rather than leaving the page stuck on the loading view.
    pub fn resolve_failed(&mut self) {
        self.state = AuthState::Anonymous;
    }

    pub fn logged_out(&mut self) {
        self.state = AuthState::Anonymous;
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, AuthState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserView> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Guarded pages redirect to the login route only once the check has
    /// settled anonymous — never while it is still pending.
    pub fn should_redirect_to_login(&self) -> bool {
        matches!(self.state, AuthState::Anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ME_USER: &str = r#"{"success":true,"data":{
        "id":1,"username":"admin","display_name":"Admin","role":"admin",
        "created_at":"2026-01-10T08:00:00","updated_at":"2026-01-10T08:00:00"
    }}"#;

    #[test]
    fn no_redirect_while_check_is_pending() {
        let gate = AuthGate::new();
        assert!(gate.is_loading());
        assert!(
            !gate.should_redirect_to_login(),
            "must not redirect before the identity check settles"
        );
    }

    #[test]
    fn anonymous_settles_and_redirects() {
        let mut gate = AuthGate::new();
        gate.resolve(r#"{"success":true,"data":null}"#).unwrap();
        assert!(!gate.is_loading());
        assert!(gate.should_redirect_to_login());
    }

    #[test]
    fn authenticated_exposes_the_user() {
        let mut gate = AuthGate::new();
        gate.resolve(ME_USER).unwrap();
        assert!(gate.is_authenticated());
        assert_eq!(gate.user().unwrap().username, "admin");
        assert!(!gate.should_redirect_to_login());
    }

    #[test]
    fn logout_returns_to_anonymous() {
        let mut gate = AuthGate::new();
        gate.resolve(ME_USER).unwrap();
        gate.logged_out();
        assert!(gate.should_redirect_to_login());
    }
}
