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

use bherror::{traits::ForeignError as _, Error};
use serde::{Deserialize, Serialize};

use crate::{
    sdk::{AuthenticationRequest, SdkConfig},
    ConfigError,
};

/// Placeholder client ID shipped with the sample configuration.
pub const CLIENT_ID_PLACEHOLDER: &str = "YOUR_BINDID_CLIENT_ID";

/// Placeholder redirect URI shipped with the sample configuration.
pub const REDIRECT_URI_PLACEHOLDER: &str = "YOUR_BINDID_REDIRECT_URI";

/// BindID server environment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// The sandbox environment, used during integration.
    #[default]
    Sandbox,
    /// The production environment.
    Production,
}

impl Environment {
    /// Host name of the BindID authorization server.
    pub fn host_name(&self) -> &'static str {
        match self {
            Self::Sandbox => "signin.bindid-sandbox.io",
            Self::Production => "signin.bindid.io",
        }
    }

    /// Issuer identifier of the ID tokens minted in this environment.
    pub fn issuer(&self) -> String {
        format!("https://{}", self.host_name())
    }
}

/// Scope requested during authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
pub enum Scope {
    /// Mandatory OpenID Connect scope.
    #[serde(rename = "openid")]
    #[strum(to_string = "openid")]
    OpenId,
    /// Information about the network and device used to authenticate.
    #[serde(rename = "bindid_network_info")]
    #[strum(to_string = "bindid_network_info")]
    NetworkInfo,
    /// The user's e-mail address.
    #[serde(rename = "email")]
    #[strum(to_string = "email")]
    Email,
    /// The user's phone number.
    #[serde(rename = "phone")]
    #[strum(to_string = "phone")]
    Phone,
}

fn default_scopes() -> Vec<Scope> {
    vec![Scope::OpenId, Scope::NetworkInfo, Scope::Email]
}

/// Static configuration of the BindID integration.
///
/// The configuration is passed to the
/// [`AuthenticationFlow`][crate::AuthenticationFlow] on construction and
/// never reloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindIdConfig {
    /// Server environment to authenticate against.
    #[serde(default)]
    pub environment: Environment,
    /// Client ID issued by the BindID admin portal.
    pub client_id: String,
    /// Redirect URI registered for the client.
    pub redirect_uri: String,
    /// Requested scopes, `openid`, `bindid_network_info` and `email` by default.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<Scope>,
}

impl BindIdConfig {
    /// Creates a configuration requesting the default scopes.
    pub fn new(
        environment: Environment,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            scopes: default_scopes(),
        }
    }

    /// Replaces the requested scopes.
    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.scopes = scopes.into_iter().collect();
        self
    }

    /// Parses the configuration from JSON and validates it.
    pub fn from_json(json: &str) -> crate::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).foreign_err(|| ConfigError::InvalidJson)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingClientId`] if the client ID is empty or the placeholder,
    /// - [`ConfigError::MissingRedirectUri`] if the redirect URI is empty or the placeholder,
    /// - [`ConfigError::MissingOpenIdScope`] if the `openid` scope is not requested.
    pub fn validate(&self) -> crate::Result<(), ConfigError> {
        if is_unset(&self.client_id, CLIENT_ID_PLACEHOLDER) {
            return Err(Error::root(ConfigError::MissingClientId));
        }
        if is_unset(&self.redirect_uri, REDIRECT_URI_PLACEHOLDER) {
            return Err(Error::root(ConfigError::MissingRedirectUri));
        }
        if !self.scopes.contains(&Scope::OpenId) {
            return Err(Error::root(ConfigError::MissingOpenIdScope));
        }
        Ok(())
    }

    /// The SDK initialization parameters.
    pub fn sdk_config(&self) -> SdkConfig {
        SdkConfig {
            environment: self.environment,
            client_id: self.client_id.clone(),
        }
    }

    /// The PKCE authentication request for this client.
    pub fn authentication_request(&self) -> AuthenticationRequest {
        AuthenticationRequest {
            redirect_uri: self.redirect_uri.clone(),
            use_pkce: true,
            scopes: self.scopes.clone(),
        }
    }
}

fn is_unset(value: &str, placeholder: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == placeholder
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config() -> BindIdConfig {
        BindIdConfig::new(
            Environment::Sandbox,
            "bid_demo_client",
            "bindidexample://login",
        )
    }

    #[test]
    fn test_environment_hosts() {
        assert_eq!(Environment::default(), Environment::Sandbox);
        assert_eq!(Environment::Sandbox.host_name(), "signin.bindid-sandbox.io");
        assert_eq!(Environment::Production.issuer(), "https://signin.bindid.io");
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());

        let mut unset = config();
        unset.client_id = CLIENT_ID_PLACEHOLDER.to_owned();
        assert_matches!(
            unset.validate().unwrap_err().error,
            ConfigError::MissingClientId
        );

        let mut unset = config();
        unset.redirect_uri = "  ".to_owned();
        assert_matches!(
            unset.validate().unwrap_err().error,
            ConfigError::MissingRedirectUri
        );

        let no_openid = config().with_scopes([Scope::Email]);
        assert_matches!(
            no_openid.validate().unwrap_err().error,
            ConfigError::MissingOpenIdScope
        );
    }

    #[test]
    fn test_from_json_defaults() {
        let config = BindIdConfig::from_json(
            r#"{ "client_id": "bid_demo_client", "redirect_uri": "bindidexample://login" }"#,
        )
        .unwrap();

        assert_eq!(config, self::config());
        assert_eq!(
            config.scopes,
            [Scope::OpenId, Scope::NetworkInfo, Scope::Email]
        );
    }

    #[test]
    fn test_from_json() {
        let config = BindIdConfig::from_json(
            r#"{
                "environment": "production",
                "client_id": "bid_demo_client",
                "redirect_uri": "bindidexample://login",
                "scopes": ["openid", "phone"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.scopes, [Scope::OpenId, Scope::Phone]);
    }

    #[test]
    fn test_from_json_errors() {
        assert_matches!(
            BindIdConfig::from_json("{").unwrap_err().error,
            ConfigError::InvalidJson
        );
        assert_matches!(
            BindIdConfig::from_json(r#"{ "client_id": "", "redirect_uri": "x://y" }"#)
                .unwrap_err()
                .error,
            ConfigError::MissingClientId
        );
    }

    #[test]
    fn test_authentication_request() {
        let request = config()
            .with_scopes([Scope::OpenId, Scope::Phone])
            .authentication_request();

        assert!(request.use_pkce);
        assert_eq!(request.redirect_uri, "bindidexample://login");
        assert_eq!(request.scopes, [Scope::OpenId, Scope::Phone]);
        assert_eq!(config().sdk_config().client_id, "bid_demo_client");
    }
}
