pub(crate) mod layout;
pub(crate) mod taskbar;
