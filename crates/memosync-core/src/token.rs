// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Access token validation.
//!
//! The backend identifies a user by a random UUID v4 sent in the
//! `X-ACCESS-TOKEN` header. Tokens are only constructed through
//! [`AccessToken::parse`], so holding one means the format was checked.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::MemoError;

/// Canonical UUID v4: version nibble `4`, variant nibble in `[89ab]`.
static UUID_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("UUID v4 pattern is valid")
});

const INVALID_FORMAT: &str = "access token must be a UUID v4 (xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx)";

/// Returns true if `candidate` is a UUID v4 in canonical hyphenated form.
pub fn is_valid_access_token(candidate: &str) -> bool {
    UUID_V4.is_match(candidate)
}

/// Generates a fresh random token, used to prefill the login input.
pub fn generate_access_token() -> AccessToken {
    AccessToken(uuid::Uuid::new_v4().hyphenated().to_string())
}

/// A validated access token.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates `candidate` and wraps it.
    pub fn parse(candidate: &str) -> Result<Self, MemoError> {
        if is_valid_access_token(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(MemoError::Validation(INVALID_FORMAT.to_string()))
        }
    }

    /// The raw header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First group of the token, enough to tell sessions apart in logs.
    pub fn fingerprint(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({}-[redacted])", self.fingerprint())
    }
}

impl std::str::FromStr for AccessToken {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_canonical_v4() {
        assert!(is_valid_access_token("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
    }

    #[test]
    fn rejects_wrong_version_nibble() {
        assert!(!is_valid_access_token("3fa85f64-5717-5562-b3fc-2c963f66afa6"));
    }

    #[test]
    fn rejects_wrong_variant_nibble() {
        assert!(!is_valid_access_token("3fa85f64-5717-4562-c3fc-2c963f66afa6"));
        assert!(!is_valid_access_token("3fa85f64-5717-4562-73fc-2c963f66afa6"));
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(!is_valid_access_token(""));
        assert!(!is_valid_access_token("3fa85f64-5717-4562-b3fc-2c963f66afa"));
        assert!(!is_valid_access_token("3fa85f64-5717-4562-b3fc-2c963f66afa66"));
        assert!(!is_valid_access_token("3fa85f6457174562b3fc2c963f66afa6"));
        assert!(!is_valid_access_token("3fa85f64-5717-4562-b3fc-2c963f66afg6"));
        assert!(!is_valid_access_token(" 3fa85f64-5717-4562-b3fc-2c963f66afa6"));
        assert!(!is_valid_access_token("{3fa85f64-5717-4562-b3fc-2c963f66afa6}"));
    }

    #[test]
    fn is_case_insensitive() {
        assert!(is_valid_access_token("3FA85F64-5717-4562-B3FC-2C963F66AFA6"));
    }

    #[test]
    fn parse_reports_validation_error() {
        let err = AccessToken::parse("not-a-token").unwrap_err();
        assert!(matches!(err, MemoError::Validation(_)));
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = AccessToken::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
        let debug = format!("{token:?}");
        assert_eq!(debug, "AccessToken(3fa85f64-[redacted])");
        assert!(!debug.contains("2c963f66afa6"));
    }

    #[test]
    fn generated_tokens_validate() {
        for _ in 0..32 {
            let token = generate_access_token();
            assert!(is_valid_access_token(token.as_str()), "{}", token.as_str());
        }
    }

    proptest! {
        #[test]
        fn any_v4_shaped_string_is_valid(
            a in "[0-9a-fA-F]{8}",
            b in "[0-9a-fA-F]{4}",
            c in "[0-9a-fA-F]{3}",
            v in "[89abAB]",
            d in "[0-9a-fA-F]{3}",
            e in "[0-9a-fA-F]{12}",
        ) {
            let token = format!("{a}-{b}-4{c}-{v}{d}-{e}");
            prop_assert!(is_valid_access_token(&token));
        }

        #[test]
        fn non_four_version_is_invalid(
            version in "[0-35-9a-f]",
            rest in "[0-9a-f]{3}",
        ) {
            let token = format!("3fa85f64-5717-{version}{rest}-b3fc-2c963f66afa6");
            prop_assert!(!is_valid_access_token(&token));
        }
    }
}
