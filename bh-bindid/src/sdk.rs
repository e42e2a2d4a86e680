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

//! Boundary of the BindID SDK.
//!
//! The SDK performs the whole PKCE authorization code flow; the
//! [`BindIdSdk`] trait only models the three calls the application makes, so
//! that the real SDK binding and test doubles can be swapped freely.

use std::future::Future;

use crate::config::{Environment, Scope};

/// Parameters for [`BindIdSdk::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// Server environment.
    pub environment: Environment,
    /// Client ID of the application.
    pub client_id: String,
}

/// Parameters for [`BindIdSdk::authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequest {
    /// Redirect URI registered for the client.
    pub redirect_uri: String,
    /// Whether the SDK should use PKCE ([RFC 7636]) to obtain the tokens.
    ///
    /// [RFC 7636]: https://datatracker.ietf.org/doc/html/rfc7636
    pub use_pkce: bool,
    /// Requested scopes.
    pub scopes: Vec<Scope>,
}

/// Authorization response returned by [`BindIdSdk::authenticate`].
///
/// It is opaque to the application and only handed back to the SDK for the
/// token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResponse {
    /// The authorization code.
    pub code: String,
    /// The `state` parameter echoed by the authorization server.
    pub state: Option<String>,
}

/// Parameters for [`BindIdSdk::exchange_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeTokenRequest {
    /// The response of a successful authentication.
    pub code_response: AuthenticationResponse,
}

impl From<AuthenticationResponse> for ExchangeTokenRequest {
    fn from(code_response: AuthenticationResponse) -> Self {
        Self { code_response }
    }
}

/// Tokens returned by [`BindIdSdk::exchange_token`].
#[derive(Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// The ID token in the JWS Compact Serialization.
    pub id_token: String,
    /// The access token.
    pub access_token: String,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("id_token", &"<redacted>")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Error codes reported by the SDK.
#[derive(strum_macros::Display, Debug, Clone, PartialEq, Eq)]
pub enum SdkErrorCode {
    /// The user canceled the authentication.
    #[strum(to_string = "user_canceled")]
    UserCanceled,
    /// There is no internet connection.
    #[strum(to_string = "internet_connection")]
    InternetConnection,
    /// The SDK was used before being initialized.
    #[strum(to_string = "sdk_not_initialized")]
    SdkNotInitialized,
    /// Any other error code, passed through verbatim.
    #[strum(to_string = "{0}")]
    Other(String),
}

/// Error reported by the SDK: a code and an optional message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkError {
    /// The error code.
    pub code: SdkErrorCode,
    /// Message attached by the SDK, if any.
    pub message: Option<String>,
}

impl SdkError {
    /// Creates an error without a message.
    pub fn new(code: SdkErrorCode) -> Self {
        Self {
            code,
            message: None,
        }
    }

    /// Attaches the SDK's `message` to the error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The message shown to the user for this error.
    ///
    /// Well-known codes have fixed messages, other codes show the SDK's message.
    pub fn user_message(&self) -> String {
        match self.code {
            SdkErrorCode::UserCanceled => "The user has canceled the authentication.".to_owned(),
            SdkErrorCode::InternetConnection => {
                "Authentication failed. Please check your internet connection and try again."
                    .to_owned()
            }
            SdkErrorCode::SdkNotInitialized => {
                "Authentication failed. The BindID SDK is not initialized.".to_owned()
            }
            SdkErrorCode::Other(_) => self.message.clone().unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for SdkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} ({message})", self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

impl bherror::BhError for SdkError {}

/// The BindID SDK operations used by the application.
///
/// The returned futures may complete on any thread; callers must not touch
/// presentation state from them directly.
pub trait BindIdSdk: Sync {
    /// Configures the SDK.  Must succeed before any other call.
    fn initialize(
        &self,
        config: &SdkConfig,
    ) -> impl Future<Output = bherror::Result<(), SdkError>> + Send;

    /// Authenticates the user and returns the authorization response.
    fn authenticate(
        &self,
        request: &AuthenticationRequest,
    ) -> impl Future<Output = bherror::Result<AuthenticationResponse, SdkError>> + Send;

    /// Exchanges the authorization response for the ID and access tokens.
    fn exchange_token(
        &self,
        request: &ExchangeTokenRequest,
    ) -> impl Future<Output = bherror::Result<TokenResponse, SdkError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            SdkError::new(SdkErrorCode::UserCanceled).user_message(),
            "The user has canceled the authentication."
        );
        assert_eq!(
            SdkError::new(SdkErrorCode::InternetConnection)
                .with_message("offline")
                .user_message(),
            "Authentication failed. Please check your internet connection and try again."
        );
        assert_eq!(
            SdkError::new(SdkErrorCode::SdkNotInitialized).user_message(),
            "Authentication failed. The BindID SDK is not initialized."
        );
        assert_eq!(
            SdkError::new(SdkErrorCode::Other("server_error".to_owned()))
                .with_message("Something went wrong")
                .user_message(),
            "Something went wrong"
        );
        assert_eq!(
            SdkError::new(SdkErrorCode::Other("server_error".to_owned())).user_message(),
            ""
        );
    }

    #[test]
    fn test_display() {
        let error = SdkError::new(SdkErrorCode::Other("server_error".to_owned()))
            .with_message("Something went wrong");

        assert_eq!(error.to_string(), "server_error (Something went wrong)");
        assert_eq!(
            SdkError::new(SdkErrorCode::UserCanceled).to_string(),
            "user_canceled"
        );
    }

    #[test]
    fn test_token_response_debug_is_redacted() {
        let tokens = TokenResponse {
            id_token: "secret.id.token".to_owned(),
            access_token: "secret-access-token".to_owned(),
        };

        assert!(!format!("{tokens:?}").contains("secret"));
    }
}
