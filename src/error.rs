use thiserror::Error;

/// Why a raw value is not a Flask session cookie.
///
/// Every variant means the same thing to a caller: this decoder does not claim the cookie. The
/// reason is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cookie is too short ({0} < {min})", min = crate::format::MIN_COOKIE_LEN)]
    TooShort(usize),

    #[error("expected 3 dot-separated components, found {0}")]
    ComponentCount(usize),

    #[error("timestamp is not url-safe base64: {0}")]
    TimestampEncoding(base64::DecodeError),

    #[error("timestamp is {0} bytes, more than fits in a u64")]
    TimestampTooLong(usize),

    #[error("signature is not url-safe base64: {0}")]
    SignatureEncoding(base64::DecodeError),

    #[error("no algorithm produces a {0}-byte signature")]
    UnknownSignatureLength(usize),
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload is not url-safe base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("payload is zlib-compressed")]
    Compressed,

    #[error("payload is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
