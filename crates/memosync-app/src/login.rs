// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login form: token input, live format check, and the probing submit.

use memosync_core::{generate_access_token, is_valid_access_token, AccessToken, MemoError};
use tracing::{info, warn};

use crate::queries::Queries;
use crate::session::SessionState;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    input: String,
    is_token_valid: bool,
    submission_error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form prefilled with a freshly generated token.
    pub fn prefilled() -> Self {
        let mut form = Self::new();
        form.on_change(generate_access_token().as_str());
        form
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the input and re-validates it. Clears a previous submit error.
    pub fn on_change(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.is_token_valid = is_valid_access_token(&self.input);
        self.submission_error = None;
    }

    pub fn is_token_valid(&self) -> bool {
        self.is_token_valid
    }

    pub fn submission_error(&self) -> Option<&str> {
        self.submission_error.as_deref()
    }

    /// Validates the input, probes the backend with it, and logs in only if
    /// the probe succeeds. The probe's category list seeds the cache.
    pub async fn submit(
        &mut self,
        session: &mut SessionState,
        queries: &Queries,
    ) -> Result<AccessToken, MemoError> {
        let token = match AccessToken::parse(&self.input) {
            Ok(token) => token,
            Err(error) => {
                self.is_token_valid = false;
                self.submission_error = Some(error.user_message());
                return Err(error);
            }
        };

        session.begin_attempt();
        let probe = queries.api().list_categories(&token).await;
        session.finish_attempt();

        match probe {
            Ok(categories) => {
                info!(token = token.fingerprint(), categories = categories.len(), "login accepted");
                queries.seed_categories(&token, categories).await;
                session.login(token.clone());
                self.submission_error = None;
                Ok(token)
            }
            Err(error) => {
                warn!(token = token.fingerprint(), %error, "login rejected");
                self.submission_error = Some(error.user_message());
                Err(error)
            }
        }
    }
}
