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

//! Minimal validation of ID tokens before their claims are displayed.

use serde_json::Value;

use crate::{decoder::decode_payload, JsonObject};

/// Message reported when a token is invalid but no specific reason is known.
pub const INVALID_ID_TOKEN_MESSAGE: &str =
    "The JWT (idToken) is not valid. Please check your configuration";

/// Outcome of validating an ID token.
///
/// Failures are reported through the message rather than as an error, since the
/// caller is expected to show them to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    valid: bool,
    message: Option<String>,
}

impl ValidationReport {
    /// A passing report.
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing report carrying a human-readable `message`.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    /// Whether the token passed validation.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The reason of the failure, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The message to show to the user for a failing report.
    ///
    /// Falls back to [`INVALID_ID_TOKEN_MESSAGE`] when no reason was given.
    /// Returns [`None`] for a passing report.
    pub fn into_failure_message(self) -> Option<String> {
        if self.valid {
            return None;
        }
        Some(self.message.unwrap_or_else(|| INVALID_ID_TOKEN_MESSAGE.to_owned()))
    }
}

/// Validates an ID token received from the token exchange.
pub trait IdTokenValidator {
    /// Validates the compact `id_token`.
    fn validate(&self, id_token: &str) -> ValidationReport;
}

impl<F> IdTokenValidator for F
where
    F: Fn(&str) -> ValidationReport,
{
    fn validate(&self, id_token: &str) -> ValidationReport {
        self(id_token)
    }
}

/// Validator checking that the token is a well-formed compact JWT with a
/// decodable payload.
///
/// Additional checks of the `aud`, `iss` and `exp` claims can be enabled.  The
/// signature is never verified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralValidator {
    audience: Option<String>,
    issuer: Option<String>,
    current_time: Option<u64>,
}

impl StructuralValidator {
    /// A validator performing the structural checks only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the `aud` claim to be, or to contain, the given `audience`.
    pub fn expecting_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    /// Requires the `iss` claim to equal the given `issuer`.
    pub fn expecting_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Requires the `exp` claim to be later than `current_time`, in seconds
    /// from the UNIX epoch.
    pub fn checking_expiry_at(mut self, current_time: u64) -> Self {
        self.current_time = Some(current_time);
        self
    }

    fn check_claims(&self, payload: &JsonObject) -> Result<(), String> {
        if let Some(audience) = &self.audience {
            let matches = match payload.get("aud") {
                Some(Value::String(aud)) => aud == audience,
                Some(Value::Array(auds)) => auds
                    .iter()
                    .any(|aud| aud.as_str() == Some(audience.as_str())),
                _ => false,
            };
            if !matches {
                return Err(format!(
                    "The JWT (idToken) audience does not match the client ID `{audience}`"
                ));
            }
        }

        if let Some(issuer) = &self.issuer {
            match payload.get("iss").and_then(Value::as_str) {
                Some(iss) if iss == issuer => {}
                Some(iss) => {
                    return Err(format!(
                        "The JWT (idToken) issuer `{iss}` does not match `{issuer}`"
                    ))
                }
                None => return Err("The JWT (idToken) has no `iss` claim".to_owned()),
            }
        }

        if let Some(current_time) = self.current_time {
            let Some(exp) = payload.get("exp").and_then(Value::as_u64) else {
                return Err("The JWT (idToken) has no valid `exp` claim".to_owned());
            };
            if exp <= current_time {
                return Err(format!(
                    "The JWT (idToken) expired at {exp} (current time {current_time})"
                ));
            }
        }

        Ok(())
    }
}

impl IdTokenValidator for StructuralValidator {
    fn validate(&self, id_token: &str) -> ValidationReport {
        let payload = match decode_payload(id_token) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(%error, "ID token could not be decoded");
                return ValidationReport::invalid(format!(
                    "The JWT (idToken) is malformed: {error}"
                ));
            }
        };

        match self.check_claims(&payload) {
            Ok(()) => ValidationReport::valid(),
            Err(message) => {
                tracing::warn!(%message, "ID token claims are not valid");
                ValidationReport::invalid(message)
            }
        }
    }
}
