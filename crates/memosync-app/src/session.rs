// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication session: the token every keyed read is scoped to.

use memosync_core::AccessToken;
use tracing::info;

/// Coarse session phase, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    LoggedOut,
    Authenticating,
    LoggedIn,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::LoggedOut => write!(f, "logged out"),
            SessionPhase::Authenticating => write!(f, "authenticating"),
            SessionPhase::LoggedIn => write!(f, "logged in"),
        }
    }
}

/// The current token, if any, and whether a login attempt is running.
///
/// Holds no I/O. Cache keys derived while logged out are disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    token: Option<AccessToken>,
    is_loading: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, token: AccessToken) {
        info!(token = token.fingerprint(), "session started");
        self.token = Some(token);
    }

    /// Clears the token and returns it so its cache entries can be purged.
    pub fn logout(&mut self) -> Option<AccessToken> {
        let previous = self.token.take();
        if let Some(token) = &previous {
            info!(token = token.fingerprint(), "session ended");
        }
        previous
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn begin_attempt(&mut self) {
        self.is_loading = true;
    }

    pub fn finish_attempt(&mut self) {
        self.is_loading = false;
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.is_loading, &self.token) {
            (true, _) => SessionPhase::Authenticating,
            (false, Some(_)) => SessionPhase::LoggedIn,
            (false, None) => SessionPhase::LoggedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use memosync_core::generate_access_token;

    use super::*;

    #[test]
    fn starts_logged_out() {
        let session = SessionState::new();
        assert!(!session.is_logged_in());
        assert!(session.token().is_none());
        assert_eq!(session.phase(), SessionPhase::LoggedOut);
    }

    #[test]
    fn login_then_logout_returns_previous_token() {
        let mut session = SessionState::new();
        let token = generate_access_token();
        session.login(token.clone());
        assert!(session.is_logged_in());
        assert_eq!(session.token(), Some(&token));

        assert_eq!(session.logout(), Some(token));
        assert!(!session.is_logged_in());
        assert_eq!(session.logout(), None);
    }

    #[test]
    fn attempt_flag_drives_phase() {
        let mut session = SessionState::new();
        session.begin_attempt();
        assert!(session.is_loading());
        assert_eq!(session.phase(), SessionPhase::Authenticating);
        session.finish_attempt();
        session.login(generate_access_token());
        assert_eq!(session.phase().to_string(), "logged in");
    }
}
