// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Presentation models of the sample application.
//!
//! Nothing is rendered here; the models hold exactly the state a UI toolkit
//! needs to draw the authenticate screen and the user passport table.

use bh_id_token::{PassportRow, UserPassport};

use crate::dispatch::{UiEvent, UiReceiver};

/// Title of the authenticate screen.
pub const AUTHENTICATE_TITLE: &str = "Authenticate";

/// Title of the user passport screen.
pub const PASSPORT_TITLE: &str = "User Passport";

/// A blocking alert with a single "OK" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Alert title.
    pub title: String,
    /// Alert message.
    pub message: String,
}

impl Alert {
    /// Creates an alert.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A button which replaces its title with a spinner while loading.
///
/// The button is disabled for as long as it is loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingButton {
    title: String,
    original_title: Option<String>,
}

impl LoadingButton {
    /// Creates an enabled button.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            original_title: None,
        }
    }

    /// Enters or leaves the loading state.
    pub fn set_loading(&mut self, loading: bool) {
        match (loading, self.original_title.take()) {
            (true, None) => {
                self.original_title = Some(std::mem::take(&mut self.title));
            }
            (false, Some(original_title)) => self.title = original_title,
            // already in the requested state
            (true, original_title @ Some(_)) => self.original_title = original_title,
            (false, None) => {}
        }
    }

    /// Whether the spinner is shown.
    pub fn is_loading(&self) -> bool {
        self.original_title.is_some()
    }

    /// Whether the button can be pressed.
    pub fn is_enabled(&self) -> bool {
        !self.is_loading()
    }

    /// The displayed title, empty while loading.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Table showing one row per passport entry, ordered by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassportTable {
    passport: UserPassport,
}

impl PassportTable {
    /// Creates the table for the `passport`.
    pub fn new(passport: UserPassport) -> Self {
        Self { passport }
    }

    /// Number of sections, always one.
    pub fn number_of_sections(&self) -> usize {
        1
    }

    /// Number of rows.
    pub fn number_of_rows(&self) -> usize {
        self.passport.len()
    }

    /// The cell at `row`.
    ///
    /// Out of range rows are logged and rendered as an empty cell.
    pub fn cell(&self, row: usize) -> PassportRow<'_> {
        self.passport.row(row).unwrap_or_else(|| {
            tracing::warn!(
                row,
                rows = self.number_of_rows(),
                "passport table has no such row"
            );
            PassportRow::default()
        })
    }

    /// The underlying passport.
    pub fn passport(&self) -> &UserPassport {
        &self.passport
    }
}

/// State of the authenticate screen and the passport screen pushed over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticateScreen {
    button: LoadingButton,
    alert: Option<Alert>,
    passport: Option<PassportTable>,
}

impl Default for AuthenticateScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthenticateScreen {
    /// Creates the screen with the button loading until the SDK is ready.
    pub fn new() -> Self {
        let mut button = LoadingButton::new(AUTHENTICATE_TITLE);
        button.set_loading(true);
        Self {
            button,
            alert: None,
            passport: None,
        }
    }

    /// Applies a single event.
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::SetLoading(loading) => self.button.set_loading(loading),
            UiEvent::ShowAlert(alert) => self.alert = Some(alert),
            UiEvent::ShowPassport(passport) => self.passport = Some(PassportTable::new(passport)),
            UiEvent::DismissPassport => self.passport = None,
        }
    }

    /// Applies every queued event and returns how many there were.
    pub fn drain(&mut self, receiver: &mut UiReceiver) -> usize {
        let mut applied = 0;
        while let Some(event) = receiver.try_next() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// The authenticate button.
    pub fn button(&self) -> &LoadingButton {
        &self.button
    }

    /// The alert currently presented.
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Dismisses the alert currently presented, via its "OK" action.
    pub fn dismiss_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    /// The passport table, if the passport screen is shown.
    pub fn passport(&self) -> Option<&PassportTable> {
        self.passport.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::UiDispatcher;

    #[test]
    fn test_loading_button() {
        let mut button = LoadingButton::new("Authenticate");
        assert!(button.is_enabled());

        button.set_loading(true);
        assert!(!button.is_enabled());
        assert_eq!(button.title(), "");

        // the original title survives repeated calls
        button.set_loading(true);
        button.set_loading(false);
        assert!(button.is_enabled());
        assert_eq!(button.title(), "Authenticate");

        button.set_loading(false);
        assert_eq!(button.title(), "Authenticate");
    }

    #[test]
    fn test_passport_table() {
        let table = PassportTable::new(UserPassport::from_iter([
            ("sub", "abc123"),
            ("email", "x@example.com"),
        ]));

        assert_eq!(table.number_of_sections(), 1);
        assert_eq!(table.number_of_rows(), 2);
        assert_eq!(table.cell(0).label, "email");
        assert_eq!(table.cell(1).value, "abc123");
        assert_eq!(table.cell(2), PassportRow::default());
    }

    #[test]
    fn test_screen_applies_events() {
        let (dispatcher, mut receiver) = UiDispatcher::channel();
        let mut screen = AuthenticateScreen::new();
        assert!(!screen.button().is_enabled());

        dispatcher.deliver(UiEvent::SetLoading(false));
        dispatcher.deliver(UiEvent::ShowAlert(Alert::new("Title", "Message")));
        dispatcher.deliver(UiEvent::ShowPassport(UserPassport::from_iter([(
            "sub", "abc123",
        )])));
        assert_eq!(screen.drain(&mut receiver), 3);

        assert!(screen.button().is_enabled());
        assert_eq!(screen.button().title(), AUTHENTICATE_TITLE);
        assert_eq!(screen.passport().unwrap().cell(0).value, "abc123");
        assert_eq!(
            screen.dismiss_alert(),
            Some(Alert::new("Title", "Message"))
        );
        assert_eq!(screen.alert(), None);

        screen.apply(UiEvent::DismissPassport);
        assert_eq!(screen.passport(), None);
    }
}
