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

use serde::Serialize;

/// Display-ready flattening of ID token claims into label/value pairs.
///
/// Every entry has a non-empty value; empty values are dropped on insertion.
/// Entries are kept ordered by label, which gives the presentation layer a
/// stable row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserPassport(BTreeMap<String, String>);

/// A single row of a [`UserPassport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassportRow<'a> {
    /// Claim label.
    pub label: &'a str,
    /// Claim value rendered as a string.
    pub value: &'a str,
}

impl UserPassport {
    /// Creates an empty passport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the `value` under `label`, replacing any previous value.
    ///
    /// Empty values are not inserted; `false` is returned in that case.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.0.insert(label.into(), value);
        true
    }

    /// Returns the value displayed under `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the passport has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels sorted lexicographically, without duplicates.
    pub fn sorted_keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// The row at `index` in [`Self::sorted_keys`] order.
    pub fn row(&self, index: usize) -> Option<PassportRow<'_>> {
        self.rows().nth(index)
    }

    /// All rows in [`Self::sorted_keys`] order.
    pub fn rows(&self) -> impl Iterator<Item = PassportRow<'_>> + '_ {
        self.0.iter().map(|(label, value)| PassportRow { label, value })
    }
}

impl<L, V> FromIterator<(L, V)> for UserPassport
where
    L: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        let mut passport = Self::new();
        for (label, value) in iter {
            passport.insert(label, value);
        }
        passport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_keys() {
        let passport = UserPassport::from_iter([
            ("sub", "abc123"),
            ("email", "x@example.com"),
            ("bindid_alias", "alias"),
            ("Zeta", "upper case sorts first"),
        ]);

        let keys = passport.sorted_keys();
        assert_eq!(keys, ["Zeta", "bindid_alias", "email", "sub"]);
        assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let mut passport = UserPassport::new();

        assert!(!passport.insert("nonce", ""));
        assert!(passport.insert("sub", "abc123"));
        assert_eq!(passport.len(), 1);
        assert_eq!(passport.get("nonce"), None);
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut passport = UserPassport::new();
        passport.insert("email", "old@example.com");
        passport.insert("email", "new@example.com");

        assert_eq!(passport.sorted_keys(), ["email"]);
        assert_eq!(passport.get("email"), Some("new@example.com"));
    }

    #[test]
    fn test_rows() {
        let passport = UserPassport::from_iter([("sub", "abc123"), ("email", "x@example.com")]);

        assert_eq!(
            passport.row(0),
            Some(PassportRow {
                label: "email",
                value: "x@example.com"
            })
        );
        assert_eq!(passport.row(1).map(|row| row.value), Some("abc123"));
        assert_eq!(passport.row(2), None);
        assert_eq!(passport.rows().count(), passport.len());
    }

    #[test]
    fn test_serialize() {
        let passport = UserPassport::from_iter([("sub", "abc123")]);

        assert_eq!(
            serde_json::to_string(&passport).unwrap(),
            r#"{"sub":"abc123"}"#
        );
    }
}
