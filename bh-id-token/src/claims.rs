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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{JsonObject, UserPassport};

/// Standard OpenID Connect claims which are displayed by default.
pub const STANDARD_CLAIMS: &[&str] = &[
    "sub",
    "iss",
    "aud",
    "exp",
    "iat",
    "auth_time",
    "nonce",
    "acr",
    "amr",
    "email",
    "email_verified",
    "phone_number",
    "phone_number_verified",
];

/// BindID specific claims which are displayed by default.
pub const BINDID_CLAIMS: &[&str] = &[
    "bindid_alias",
    "bindid_auth",
    "bindid_info",
    "bindid_network_info",
];

/// Table of the claims selected for display, each mapped to its label.
///
/// Claims of the decoded payload which are not in the table are ignored.
/// Deserializes from a JSON object mapping claim names to labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    labels: BTreeMap<String, String>,
}

impl Default for ClaimSet {
    fn default() -> Self {
        Self::bindid()
    }
}

impl ClaimSet {
    /// A table selecting the [`STANDARD_CLAIMS`] and the [`BINDID_CLAIMS`],
    /// each labelled with its own name.
    pub fn bindid() -> Self {
        STANDARD_CLAIMS
            .iter()
            .chain(BINDID_CLAIMS)
            .fold(Self::empty(), |claims, claim| claims.with_claim(*claim))
    }

    /// A table selecting nothing.
    pub fn empty() -> Self {
        Self {
            labels: BTreeMap::new(),
        }
    }

    /// Builds a table out of `(claim, label)` pairs.
    pub fn from_labels<C, L>(labels: impl IntoIterator<Item = (C, L)>) -> Self
    where
        C: Into<String>,
        L: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|(claim, label)| (claim.into(), label.into()))
                .collect(),
        }
    }

    /// Selects the `claim`, labelled with its own name.
    pub fn with_claim(self, claim: impl Into<String>) -> Self {
        let claim = claim.into();
        self.with_label(claim.clone(), claim)
    }

    /// Selects the `claim` and displays it under `label`.
    pub fn with_label(mut self, claim: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(claim.into(), label.into());
        self
    }

    /// Stops selecting the `claim`.
    pub fn without_claim(mut self, claim: &str) -> Self {
        self.labels.remove(claim);
        self
    }

    /// The label of the `claim`, if it is selected.
    pub fn label(&self, claim: &str) -> Option<&str> {
        self.labels.get(claim).map(String::as_str)
    }

    /// Maps the selected claims present in the `payload` into a [`UserPassport`].
    ///
    /// Missing claims, `null` values and values rendering to an empty string
    /// are left out.  If two claims share a label, the one whose claim name
    /// sorts last wins.
    pub fn parse(&self, payload: &JsonObject) -> UserPassport {
        let mut passport = UserPassport::new();

        for (claim, label) in &self.labels {
            if let Some(value) = payload.get(claim).and_then(display_value) {
                passport.insert(label.as_str(), value);
            }
        }

        passport
    }
}

/// Renders a claim value as displayed in the passport.
///
/// Strings are taken verbatim, everything else as compact JSON.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(string) => Some(string.clone()),
        other => Some(other.to_string()),
    }
}
