//! Data types shared by the session core and the UI.

/// Authentication state published to the UI.
pub mod auth_state;
/// Identities, tokens and persisted sessions.
pub mod identity;
/// The client's navigable location.
pub mod location;
/// Taskbar menus and editor commands.
pub mod menu;

pub use auth_state::{AuthState, SessionPhase, SessionSnapshot};
pub use identity::{AuthenticatedSession, SessionToken, UserIdentity};
pub use location::Location;
pub use menu::{EditorCommand, Menu, MenuState};
