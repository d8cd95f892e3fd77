use serde::{Deserialize, Serialize};
use strum::Display;

use super::UserIdentity;

/// Position of a client in the session bootstrap state machine.
///
/// `Uninitialized -> {Resuming | HandlingCallback} -> {Authenticated | Unauthenticated}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    /// Bootstrap has not run.
    #[default]
    Uninitialized,
    /// Looking for a stored session.
    Resuming,
    /// Exchanging a redirect token for an identity.
    HandlingCallback,
    /// A user is signed in.
    Authenticated,
    /// Settled with nobody signed in.
    Unauthenticated,
}

/// Process-wide authentication state.
///
/// `is_authenticated` is derived from the presence of a user, so the two can
/// never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    phase: SessionPhase,
    current_user: Option<UserIdentity>,
    is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}

impl AuthState {
    /// State before the bootstrap decision has been made.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            current_user: None,
            is_loading: true,
        }
    }

    /// Unauthenticated defaults, used once bootstrap has settled and after logout.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            phase: SessionPhase::Unauthenticated,
            current_user: None,
            is_loading: false,
        }
    }

    /// A redirect callback is being exchanged; loading is over, no user yet.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            phase: SessionPhase::HandlingCallback,
            current_user: None,
            is_loading: false,
        }
    }

    /// Settled state for a signed-in `user`.
    #[must_use]
    pub fn signed_in(user: UserIdentity) -> Self {
        Self {
            phase: SessionPhase::Authenticated,
            current_user: Some(user),
            is_loading: false,
        }
    }

    /// Current step of the session lifecycle.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Signed-in identity, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserIdentity> {
        self.current_user.as_ref()
    }

    /// Derived from [`AuthState::current_user`]; never stored separately.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// True only until bootstrap decides between callback and resume.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True while a redirect callback is being exchanged for an identity.
    ///
    /// UI must not treat this as "signed out": the exchange may still succeed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase == SessionPhase::HandlingCallback
    }

    /// Record the bootstrap decision. Loading ends here and never resumes.
    pub(crate) fn begin(&mut self, phase: SessionPhase) {
        self.phase = phase;
        self.is_loading = false;
    }

    pub(crate) fn authenticate(&mut self, user: UserIdentity) {
        *self = Self::signed_in(user);
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::signed_out();
    }
}

/// Authentication state plus whether the document service is ready, as
/// published to observers of a session context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Authentication state at the time of the change.
    pub auth: AuthState,
    /// Whether a document service handle is held.
    pub documents_ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserIdentity {
        UserIdentity::new("alice", "alice@example.com")
    }

    #[test]
    fn initial_state_is_loading_and_anonymous() {
        let state = AuthState::default();
        assert!(state.is_loading());
        assert!(!state.is_authenticated());
        assert_eq!(state.phase(), SessionPhase::Uninitialized);
    }

    #[test]
    fn begin_ends_loading() {
        let mut state = AuthState::initial();
        state.begin(SessionPhase::HandlingCallback);
        assert!(!state.is_loading());
        assert!(state.is_pending());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn authenticate_sets_user_and_flag_together() {
        let mut state = AuthState::initial();
        state.authenticate(alice());
        assert!(state.is_authenticated());
        assert_eq!(state.current_user(), Some(&alice()));
        assert_eq!(state.phase(), SessionPhase::Authenticated);
        assert!(!state.is_loading());
    }

    #[test]
    fn reset_returns_to_signed_out_defaults() {
        let mut state = AuthState::initial();
        state.authenticate(alice());
        state.reset();
        assert_eq!(state, AuthState::signed_out());
        assert!(!state.is_loading());
        assert!(state.current_user().is_none());
    }

    #[test]
    fn constructors_match_the_transitions_they_stand_for() {
        let mut pending = AuthState::initial();
        pending.begin(SessionPhase::HandlingCallback);
        assert_eq!(AuthState::pending(), pending);

        let mut signed_in = AuthState::initial();
        signed_in.authenticate(alice());
        assert_eq!(AuthState::signed_in(alice()), signed_in);
    }

    #[test]
    fn phase_display_is_snake_case() {
        assert_eq!(SessionPhase::HandlingCallback.to_string(), "handling_callback");
    }
}
