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

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

/// `base64url` engine which never pads on encoding, and accepts both the
/// padded and the unpadded form on decoding.
///
/// Compact JWS segments are unpadded, but some issuers pad them anyway.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Returns the `base64url`-encoded string **without padding** of the given
/// `payload`.
pub fn base64_url_encode<T: AsRef<[u8]>>(payload: T) -> String {
    URL_SAFE_LENIENT.encode(payload)
}

/// Decodes the given `base64url`-encoded `payload` into bytes.
///
/// Trailing padding is optional, but if present it must be canonical.
pub fn base64_url_decode<T: AsRef<[u8]>>(payload: T) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_LENIENT.decode(payload)
}
