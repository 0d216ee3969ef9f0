// SPDX-License-Identifier: MPL-2.0
//! Password gate in front of the album.
//!
//! This is a best-effort demo gate, not an access-control mechanism: the
//! secret ships in plaintext with the client configuration and is compared
//! with plain string equality. Anyone who can read the configuration can read
//! the secret. Attempts are unlimited and never locked out.

use std::fmt;

/// Outcome of a successful attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlock {
    /// This attempt flipped the gate open.
    Unlocked,
    /// The gate was already open; the input was not checked.
    AlreadyUnlocked,
}

/// Reason an attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    /// The input does not match the secret.
    Incorrect,
}

impl GateError {
    /// Returns the i18n message key for the inline error.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            GateError::Incorrect => "gate-error-incorrect",
        }
    }
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::Incorrect => write!(f, "Incorrect password"),
        }
    }
}

/// In-memory authentication flag guarded by a shared secret.
pub struct Gate {
    secret: String,
    authenticated: bool,
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("authenticated", &self.authenticated)
            .finish_non_exhaustive()
    }
}

impl Gate {
    /// Creates a closed gate.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            authenticated: false,
        }
    }

    /// Returns whether the gate has been opened during this session.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Compares `input` against the secret (exact, case-sensitive).
    ///
    /// Once open, the gate stays open: later attempts return
    /// [`Unlock::AlreadyUnlocked`] whatever the input.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Incorrect`] when the gate is closed and the input
    /// does not match.
    pub fn attempt(&mut self, input: &str) -> Result<Unlock, GateError> {
        if self.authenticated {
            return Ok(Unlock::AlreadyUnlocked);
        }

        if input == self.secret {
            self.authenticated = true;
            Ok(Unlock::Unlocked)
        } else {
            Err(GateError::Incorrect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_gate_is_closed() {
        assert!(!Gate::new("abc123").is_authenticated());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut gate = Gate::new("abc123");
        assert_eq!(gate.attempt("ABC123"), Err(GateError::Incorrect));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn correct_secret_unlocks_exactly_once() {
        let mut gate = Gate::new("abc123");
        assert_eq!(gate.attempt("abc123"), Ok(Unlock::Unlocked));
        assert_eq!(gate.attempt("abc123"), Ok(Unlock::AlreadyUnlocked));
        assert!(gate.is_authenticated());
    }

    #[test]
    fn wrong_input_after_unlock_does_not_revoke() {
        let mut gate = Gate::new("abc123");
        gate.attempt("abc123").unwrap();
        assert_eq!(gate.attempt("nope"), Ok(Unlock::AlreadyUnlocked));
        assert!(gate.is_authenticated());
    }

    #[test]
    fn retries_are_unlimited() {
        let mut gate = Gate::new("abc123");
        for _ in 0..1000 {
            assert!(gate.attempt("guess").is_err());
        }
        assert_eq!(gate.attempt("abc123"), Ok(Unlock::Unlocked));
    }

    #[test]
    fn error_and_debug_never_reveal_secret() {
        let mut gate = Gate::new("s3cr3t");
        let err = gate.attempt("x").unwrap_err();
        assert!(!format!("{err}").contains("s3cr3t"));
        assert!(!format!("{gate:?}").contains("s3cr3t"));
    }

    #[test]
    fn surrounding_whitespace_is_not_trimmed() {
        let mut gate = Gate::new("abc123");
        assert!(gate.attempt(" abc123").is_err());
    }
}
