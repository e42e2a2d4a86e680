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

//! Display-only decoding of ID tokens in the JWS Compact Serialization.
//!
//! Nothing here verifies signatures, expiry or any other claim; the decoded
//! payload must not be used for authorization decisions.

use bherror::{traits::ForeignError as _, Error};
use serde_json::Value;

use crate::{
    encoding::{base64_url_decode, base64_url_encode},
    DecodingError, JsonObject, Result, Segment,
};

/// Character separating the segments of a compact token.
pub const SEGMENT_DELIMITER: char = '.';

/// An ID token split into its three compact segments.
///
/// Segments are borrowed from the original token and stay encoded until one
/// of the decoding methods is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactToken<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> CompactToken<'a> {
    /// Splits the `token` into its header, payload and signature segments.
    ///
    /// # Errors
    ///
    /// Returns [`DecodingError::MalformedToken`] if the token does not consist
    /// of exactly three `.`-separated segments.
    pub fn parse(token: &'a str) -> Result<Self> {
        let segments: Vec<&str> = token.split(SEGMENT_DELIMITER).collect();

        let [header, payload, signature] = segments[..] else {
            return Err(Error::root(DecodingError::MalformedToken(segments.len())));
        };

        Ok(Self {
            header,
            payload,
            signature,
        })
    }

    /// Decodes the JOSE header segment.
    pub fn header(&self) -> Result<JsonObject> {
        decode_segment(self.header, Segment::Header)
    }

    /// Decodes the claims payload segment.
    pub fn payload(&self) -> Result<JsonObject> {
        decode_segment(self.payload, Segment::Payload)
    }

    /// The still encoded signature segment.
    pub fn signature(&self) -> &'a str {
        self.signature
    }
}

fn decode_segment(segment: &str, kind: Segment) -> Result<JsonObject> {
    let bytes = base64_url_decode(segment).foreign_err(|| DecodingError::Decoding(kind))?;

    serde_json::from_slice(&bytes).foreign_err(|| DecodingError::PayloadParse(kind))
}

/// Decodes the claims payload of the compact `token`.
///
/// # Errors
///
/// - [`DecodingError::MalformedToken`] if the token doesn't have three segments,
/// - [`DecodingError::Decoding`] if the payload is not valid `base64url`,
/// - [`DecodingError::PayloadParse`] if the decoded payload is not a JSON object.
pub fn decode_payload(token: &str) -> Result<JsonObject> {
    CompactToken::parse(token)?.payload()
}

/// Decodes the JOSE header of the compact `token`.
///
/// The errors are the same as for [`decode_payload`], reported for the header
/// segment.
pub fn decode_header(token: &str) -> Result<JsonObject> {
    CompactToken::parse(token)?.header()
}

/// Assembles a compact token out of the `header` and `payload` objects and an
/// already encoded `signature` segment.
///
/// No signing takes place, the `signature` is used verbatim.
pub fn encode_unsigned(header: &JsonObject, payload: &JsonObject, signature: &str) -> String {
    format!(
        "{header}{SEGMENT_DELIMITER}{payload}{SEGMENT_DELIMITER}{signature}",
        header = encode_segment(header),
        payload = encode_segment(payload),
    )
}

fn encode_segment(object: &JsonObject) -> String {
    base64_url_encode(Value::Object(object.clone()).to_string())
}
