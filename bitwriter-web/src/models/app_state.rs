use shared::SessionSnapshot;
use yewdux::Store;

/// Global UI state. The session half is written only by the session context
/// observer.
#[derive(Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub session: SessionSnapshot,
}

impl AppState {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            session: snapshot.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_loading() {
        let state = AppState::default();
        assert!(state.session.auth.is_loading());
        assert!(!state.session.auth.is_authenticated());
        assert!(!state.session.documents_ready);
    }

    #[test]
    fn test_from_snapshot_copies_session() {
        let snapshot = SessionSnapshot::default();
        assert_eq!(AppState::from_snapshot(&snapshot).session, snapshot);
    }
}
