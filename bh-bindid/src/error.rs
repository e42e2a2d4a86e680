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

use crate::{flow::FlowState, presentation::Alert, sdk::SdkError};

/// Error type defining possible configuration errors.
#[derive(strum_macros::Display, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Error when the configuration is not valid JSON.
    #[strum(to_string = "The BindID configuration is not valid JSON")]
    InvalidJson,

    /// Error when the client ID is missing or still the placeholder.
    #[strum(to_string = "The BindID client ID is not configured")]
    MissingClientId,

    /// Error when the redirect URI is missing or still the placeholder.
    #[strum(to_string = "The BindID redirect URI is not configured")]
    MissingRedirectUri,

    /// Error when the mandatory `openid` scope is not requested.
    #[strum(to_string = "The `openid` scope must be requested")]
    MissingOpenIdScope,
}

impl bherror::BhError for ConfigError {}

/// Error type defining possible errors of the authentication flow.
#[derive(strum_macros::Display, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Error when an action is triggered in a state which doesn't allow it.
    #[strum(to_string = "The authentication flow is not ready (state={0})")]
    NotReady(FlowState),

    /// Error when the configuration is unusable.
    #[strum(to_string = "Invalid configuration: {0}")]
    Configuration(ConfigError),

    /// Error when the SDK fails to initialize.
    #[strum(to_string = "Failed to initialize SDK: {0}")]
    InitializationFailed(SdkError),

    /// Error when the SDK fails to authenticate or exchange the token.
    #[strum(to_string = "BindID SDK error: {0}")]
    Sdk(SdkError),

    /// Error when the received ID token is not valid.
    #[strum(to_string = "Invalid ID token: {0}")]
    InvalidIdToken(String),
}

impl bherror::BhError for FlowError {}

impl FlowError {
    /// The alert to show to the user for this error.
    ///
    /// Rejected actions ([`FlowError::NotReady`]) are not shown.
    pub fn alert(&self) -> Option<Alert> {
        Some(match self {
            Self::NotReady(_) => return None,
            Self::Configuration(error) => Alert::new(APP_ERROR_TITLE, error.to_string()),
            Self::InitializationFailed(error) => Alert::new(
                INITIALIZATION_ERROR_TITLE,
                format!("Failed to initialize SDK: {}", error.code),
            ),
            Self::Sdk(error) => Alert::new(SDK_ERROR_TITLE, error.user_message()),
            Self::InvalidIdToken(message) => Alert::new(APP_ERROR_TITLE, message.clone()),
        })
    }
}

/// Title of alerts reporting SDK authentication errors.
pub const SDK_ERROR_TITLE: &str = "BindID Authentication Error";

/// Title of alerts reporting SDK initialization errors.
pub const INITIALIZATION_ERROR_TITLE: &str = "BindID Initialization Error";

/// Title of alerts reporting application errors.
pub const APP_ERROR_TITLE: &str = "Authentication Error";

/// Result type used across the crate.
pub type Result<T, E> = bherror::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::SdkErrorCode;

    #[test]
    fn test_alerts() {
        assert_eq!(FlowError::NotReady(FlowState::Uninitialized).alert(), None);
        assert_eq!(
            FlowError::Sdk(SdkError::new(SdkErrorCode::UserCanceled)).alert(),
            Some(Alert::new(
                SDK_ERROR_TITLE,
                "The user has canceled the authentication."
            ))
        );
        assert_eq!(
            FlowError::InitializationFailed(SdkError::new(SdkErrorCode::Other(
                "invalid_client".to_owned()
            )))
            .alert(),
            Some(Alert::new(
                INITIALIZATION_ERROR_TITLE,
                "Failed to initialize SDK: invalid_client"
            ))
        );
        assert_eq!(
            FlowError::Configuration(ConfigError::MissingClientId).alert(),
            Some(Alert::new(
                APP_ERROR_TITLE,
                "The BindID client ID is not configured"
            ))
        );
    }
}
