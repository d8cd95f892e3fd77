mod callback;
mod editor;
mod login;

pub use callback::CallbackPage;
pub use editor::EditorPage;
pub use login::LoginPage;
