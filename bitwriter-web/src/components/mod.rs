pub(crate) mod loading;
pub(crate) mod user_dropdown;
