//! Helpers for the on-wire pieces of the Flask cookie format.
//!
//! Flask signs sessions with itsdangerous' `URLSafeTimedSerializer`. Every segment of the cookie is
//! URL-safe base64 without padding, and `.` is the only structural separator.

use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

/// Separates payload, timestamp and signature.
pub const SEPARATOR: char = '.';

/// Leading character marking a zlib-compressed payload.
pub const COMPRESSION_MARKER: char = '.';

/// Salt Flask's session interface hands to itsdangerous for key derivation.
pub const SALT: &[u8] = b"cookie-session";

/// Shortest input that can plausibly be a Flask cookie.
pub const MIN_COOKIE_LEN: usize = 10;

/// The timestamp is a packed `>Q`, so it never exceeds eight bytes.
pub const MAX_TIMESTAMP_BYTES: usize = 8;

/// URL-safe base64 without padding.
///
/// Decoding tolerates non-zero trailing bits, matching the lenient decoders that real-world cookie
/// tooling uses.
pub const URL_SAFE_NO_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

pub fn encode<T: AsRef<[u8]>>(input: T) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

pub fn decode<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Pack a timestamp the way itsdangerous does: big-endian with leading zero bytes stripped.
pub fn encode_timestamp(secs: u64) -> String {
    let bytes = secs.to_be_bytes();
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    encode(&bytes[start..])
}

/// Interpret up to eight big-endian bytes as an unsigned integer.
pub(crate) fn timestamp_from_bytes(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}
