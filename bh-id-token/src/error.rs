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

/// Segment of a compact token that failed to decode.
#[derive(strum_macros::Display, Debug, PartialEq, Eq, Clone, Copy)]
#[strum(serialize_all = "lowercase")]
pub enum Segment {
    /// The JOSE header, i.e. the first segment.
    Header,
    /// The claims payload, i.e. the second segment.
    Payload,
}

/// Error type defining possible errors while decoding a compact ID token.
#[derive(strum_macros::Display, Debug, PartialEq, Eq, Clone)]
pub enum DecodingError {
    /// Error when the token does not consist of exactly three segments.
    #[strum(to_string = "Malformed token: expected 3 segments, found {0}")]
    MalformedToken(usize),

    /// Error when a segment is not valid `base64url`.
    #[strum(to_string = "Unable to base64url-decode the token {0}")]
    Decoding(Segment),

    /// Error when a decoded segment is not a JSON object.
    #[strum(to_string = "The token {0} is not a JSON object")]
    PayloadParse(Segment),
}

impl bherror::BhError for DecodingError {}

/// Result type used across the crate.
pub type Result<T> = bherror::Result<T, DecodingError>;
