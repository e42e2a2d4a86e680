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

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! This crate implements the application side of the [BindID][1] passwordless
//! authentication flow.
//!
//! The BindID SDK performs the whole OpenID Connect authorization code flow
//! with PKCE.  The application only initializes the SDK, asks it to
//! authenticate the user, hands the response back for the token exchange, and
//! finally validates the ID token and displays its claims as a "user
//! passport".
//!
//! [1]: https://developer.bindid.io
//!
//! # Details
//!
//! * [`BindIdConfig`] -- static configuration: environment, client ID and
//!   redirect URI.
//! * [`sdk`] -- the [`BindIdSdk`] trait abstracting the vendor SDK.
//! * [`flow`] -- the [`AuthenticationFlow`] state machine sequencing the SDK
//!   calls, validating the ID token and mapping failures to alerts.
//! * [`dispatch`] -- delivery of [`UiEvent`]s from the flow to the UI
//!   context.
//! * [`presentation`] -- models of the authenticate screen, its loading button
//!   and the passport table.
//!
//! The ID token handling itself lives in the [`bh_id_token`] crate.
//!
//! # Examples
//!
//! `examples/simulated_flow.rs` in the `bh-bindid` directory drives the whole
//! flow with a scripted SDK.

// Re-export the `bh-id-token` crate
pub use bh_id_token;

mod config;
mod error;
#[cfg(test)]
mod test_utils;

pub mod dispatch;
pub mod flow;
pub mod presentation;
pub mod sdk;

pub use config::{
    BindIdConfig, Environment, Scope, CLIENT_ID_PLACEHOLDER, REDIRECT_URI_PLACEHOLDER,
};
pub use dispatch::{UiDispatcher, UiEvent, UiReceiver};
pub use error::{
    ConfigError, FlowError, Result, APP_ERROR_TITLE, INITIALIZATION_ERROR_TITLE, SDK_ERROR_TITLE,
};
pub use flow::{AuthenticatedUser, AuthenticationFlow, FlowState};
pub use presentation::{Alert, AuthenticateScreen, LoadingButton, PassportTable};
pub use sdk::{
    AuthenticationRequest, AuthenticationResponse, BindIdSdk, ExchangeTokenRequest, SdkConfig,
    SdkError, SdkErrorCode, TokenResponse,
};
