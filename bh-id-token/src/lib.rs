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

//! This crate turns OpenID Connect ID tokens into displayable claims.
//!
//! The ID token is received in the [JWS Compact Serialization][1], i.e. as
//! three `base64url`-encoded segments separated by `.`.  Only the payload is
//! of interest here: it is decoded, the token is checked for being
//! well-formed, and the selected claims are flattened into a [`UserPassport`]
//! of label/value string pairs.
//!
//! **Note:** signatures are *not* verified.  The decoding is meant for
//! displaying claims of a token obtained directly from the token endpoint, not
//! for making security decisions.
//!
//! [1]: https://datatracker.ietf.org/doc/html/rfc7515#section-7.1
//!
//! # Details
//!
//! * [`decoder`] -- splits the compact token and decodes its segments.
//! * [`validator`] -- the [`IdTokenValidator`] trait and the default
//!   [`StructuralValidator`].
//! * [`ClaimSet`] -- the configurable table of displayed claims.
//! * [`UserPassport`] -- the display-ready result, ordered by label.
//!
//! # Examples
//!
//! ```
//! use bh_id_token::{
//!     decode_payload, encode_unsigned, json_object, ClaimSet, IdTokenValidator,
//!     StructuralValidator,
//! };
//!
//! let id_token = encode_unsigned(
//!     &json_object!({ "alg": "ES256", "typ": "JWT" }),
//!     &json_object!({ "sub": "abc123", "email": "x@example.com", "foo": "bar" }),
//!     "c2lnbmF0dXJl",
//! );
//!
//! // Check the token before displaying anything
//! assert!(StructuralValidator::new().validate(&id_token).is_valid());
//!
//! let payload = decode_payload(&id_token).unwrap();
//! let passport = ClaimSet::bindid().parse(&payload);
//!
//! // Unknown claims are ignored, and the labels are sorted
//! assert_eq!(passport.sorted_keys(), ["email", "sub"]);
//! assert_eq!(passport.get("sub"), Some("abc123"));
//! ```

mod claims;
pub mod decoder;
mod encoding;
mod error;
mod passport;
pub mod validator;

pub use claims::{ClaimSet, BINDID_CLAIMS, STANDARD_CLAIMS};
pub use decoder::{decode_header, decode_payload, encode_unsigned, CompactToken};
pub use encoding::{base64_url_decode, base64_url_encode};
pub use error::{DecodingError, Result, Segment};
pub use passport::{PassportRow, UserPassport};
pub use validator::{IdTokenValidator, StructuralValidator, ValidationReport};

/// JSON object, i.e. the decoded header or payload of a token.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Helper macro with the same syntax as [`serde_json::json`] specialized for
/// constructing JSON objects.
///
/// It will construct a more specific type ([`JsonObject`]) than just
/// [`serde_json::Value`] when constructing an object, and panic if the syntax
/// is valid JSON but not an object.
#[macro_export]
macro_rules! json_object {
    ($stuff:tt) => {
        match ::serde_json::json!($stuff) {
            ::serde_json::Value::Object(o) => o,
            _ => unreachable!("JSON literal wasn't an object"),
        }
    };
}
