use strum::{Display, EnumIter, IntoEnumIterator};

/// Menus that can be opened from the taskbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Menu {
    /// Bitcoin logo menu with About and Sign Out.
    App,
    /// Document commands.
    Writer,
    /// Slide-in menu on narrow screens.
    Mobile,
    /// Account badge in the header.
    UserDropdown,
}

/// Open/closed flags for every taskbar menu.
///
/// Each menu toggles independently; a click on the shared overlay closes all of
/// them at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    app: bool,
    writer: bool,
    mobile: bool,
    user_dropdown: bool,
}

impl MenuState {
    fn flag(&mut self, menu: Menu) -> &mut bool {
        match menu {
            Menu::App => &mut self.app,
            Menu::Writer => &mut self.writer,
            Menu::Mobile => &mut self.mobile,
            Menu::UserDropdown => &mut self.user_dropdown,
        }
    }

    /// Whether `menu` is currently open.
    #[must_use]
    pub const fn is_open(&self, menu: Menu) -> bool {
        match menu {
            Menu::App => self.app,
            Menu::Writer => self.writer,
            Menu::Mobile => self.mobile,
            Menu::UserDropdown => self.user_dropdown,
        }
    }

    /// Whether any menu is open, i.e. whether the dismiss overlay is shown.
    #[must_use]
    pub fn any_open(&self) -> bool {
        Menu::iter().any(|menu| self.is_open(menu))
    }

    /// Open `menu` if closed, close it if open. Other menus are untouched.
    pub fn toggle(&mut self, menu: Menu) {
        let flag = self.flag(menu);
        *flag = !*flag;
    }

    /// Close `menu`, leaving the others as they are.
    pub fn close(&mut self, menu: Menu) {
        *self.flag(menu) = false;
    }

    /// Close every menu.
    pub fn dismiss_all(&mut self) {
        *self = Self::default();
    }

    /// Copy of this state with `menu` toggled, convenient for `use_state` setters.
    #[must_use]
    pub fn toggled(mut self, menu: Menu) -> Self {
        self.toggle(menu);
        self
    }

    /// Copy of this state with `menu` closed.
    #[must_use]
    pub fn closed(mut self, menu: Menu) -> Self {
        self.close(menu);
        self
    }
}

/// Document actions offered by the writer menu and forwarded to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum EditorCommand {
    /// Open a stored document.
    Open,
    /// Save the current document.
    Save,
    /// Save under a new name.
    #[strum(to_string = "Save As")]
    SaveAs,
    /// Encrypt the document body.
    Encrypt,
    /// Decrypt the document body.
    Decrypt,
    /// Mint the document as a token.
    Tokenize,
    /// Put the document behind a paywall.
    Paywall,
    /// Publish the document on chain.
    Publish,
}

impl EditorCommand {
    /// Whether the editor handles this command today. Others are announced as
    /// upcoming instead of being forwarded.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(
            self,
            Self::Save | Self::Encrypt | Self::Decrypt | Self::Paywall | Self::Publish
        )
    }

    /// Commands after which the writer menu draws a separator.
    #[must_use]
    pub const fn ends_group(self) -> bool {
        matches!(self, Self::SaveAs | Self::Decrypt)
    }
}
