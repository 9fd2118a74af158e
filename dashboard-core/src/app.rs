use anyhow::Result;
use tracing::info;

use crate::{SessionStore, auth::AuthOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Unauthenticated,
    Authenticated,
}

/// Decides between the auth screen and the dashboard.
#[derive(Debug)]
pub struct AppRoot {
    state: AppState,
}

impl AppRoot {
    /// Looks at the session once; a stored token starts the app authenticated.
    pub fn start(session: &dyn SessionStore) -> Result<Self> {
        let state = if session.has_token()? {
            AppState::Authenticated
        } else {
            AppState::Unauthenticated
        };

        info!(?state, "app started");
        Ok(Self { state })
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AppState::Authenticated
    }

    /// Moves to the dashboard after a successful login. Other outcomes keep the auth screen.
    pub fn on_auth(&mut self, outcome: &AuthOutcome) {
        if *outcome == AuthOutcome::Authenticated {
            self.state = AppState::Authenticated;
        }
    }

    pub fn on_logout(&mut self) {
        self.state = AppState::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySessionStore;

    #[test]
    fn starts_from_session_presence() {
        let empty = MemorySessionStore::default();
        assert_eq!(AppRoot::start(&empty).unwrap().state(), AppState::Unauthenticated);

        let stored = MemorySessionStore::with_token("tok");
        assert_eq!(AppRoot::start(&stored).unwrap().state(), AppState::Authenticated);
    }

    #[test]
    fn only_login_authenticates() {
        let mut root = AppRoot::start(&MemorySessionStore::default()).unwrap();

        root.on_auth(&AuthOutcome::Registered);
        assert!(!root.is_authenticated());
        root.on_auth(&AuthOutcome::Rejected);
        assert!(!root.is_authenticated());

        root.on_auth(&AuthOutcome::Authenticated);
        assert!(root.is_authenticated());

        root.on_logout();
        assert_eq!(root.state(), AppState::Unauthenticated);
    }

    #[test]
    fn session_checked_once_at_start() {
        let session = MemorySessionStore::with_token("tok");
        let root = AppRoot::start(&session).unwrap();

        session.clear().unwrap();
        assert!(root.is_authenticated());
    }
}
