use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use subtle::ConstantTimeEq as _;
use time::OffsetDateTime;

use crate::{
    algorithm::Algorithm,
    error::{ParseError, PayloadError},
    format::{self, COMPRESSION_MARKER, MAX_TIMESTAMP_BYTES, MIN_COOKIE_LEN, SEPARATOR},
};

/// A parsed Flask session cookie.
///
/// Only [`FlaskCookie::parse`] builds one, and nothing mutates it afterwards, so the bytes that
/// were signed always agree with the components they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaskCookie {
    compressed: bool,
    payload: String,
    timestamp: String,
    timestamp_raw: Vec<u8>,
    signature: String,
    signature_raw: Vec<u8>,
    algorithm: Algorithm,
    to_be_signed: Vec<u8>,
}

impl FlaskCookie {
    /// Parse a raw cookie value.
    ///
    /// Any error means the value is not a Flask cookie; the variant only says which rule failed.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        if raw.len() < MIN_COOKIE_LEN {
            return Err(ParseError::TooShort(raw.len()));
        }

        let (compressed, rest) = match raw.strip_prefix(COMPRESSION_MARKER) {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let components: Vec<&str> = rest.split(SEPARATOR).collect();
        let [payload, timestamp, signature] = components[..] else {
            return Err(ParseError::ComponentCount(components.len()));
        };

        let timestamp_raw = format::decode(timestamp).map_err(ParseError::TimestampEncoding)?;
        if timestamp_raw.len() > MAX_TIMESTAMP_BYTES {
            return Err(ParseError::TimestampTooLong(timestamp_raw.len()));
        }

        let signature_raw = format::decode(signature).map_err(ParseError::SignatureEncoding)?;
        let algorithm = Algorithm::from_signature_len(signature_raw.len())
            .ok_or(ParseError::UnknownSignatureLength(signature_raw.len()))?;

        // The marker was stripped before splitting but it is part of what got signed.
        let mut to_be_signed = String::with_capacity(rest.len() + 1);
        if compressed {
            to_be_signed.push(COMPRESSION_MARKER);
        }
        to_be_signed.push_str(payload);
        to_be_signed.push(SEPARATOR);
        to_be_signed.push_str(timestamp);

        Ok(Self {
            compressed,
            payload: payload.to_owned(),
            timestamp: timestamp.to_owned(),
            timestamp_raw,
            signature: signature.to_owned(),
            signature_raw,
            algorithm,
            to_be_signed: to_be_signed.into_bytes(),
        })
    }

    /// Whether `secret` reproduces the embedded signature.
    pub fn verify(&self, secret: &[u8]) -> bool {
        let expected = self.algorithm.compute(secret, &self.to_be_signed);
        // `ct_eq` on slices of different lengths is false.
        expected.ct_eq(&self.signature_raw).into()
    }

    /// Sign `payload` with `secret`, keeping this cookie's timestamp and algorithm.
    ///
    /// The result never carries the compression marker since `payload` is encoded as given.
    pub fn resign(&self, payload: &str, secret: &[u8]) -> String {
        sign(self.algorithm, payload.as_bytes(), &self.timestamp, secret)
    }

    /// Like [`FlaskCookie::resign`], with a fresh timestamp.
    pub fn resign_with_timestamp(
        &self,
        payload: &str,
        secret: &[u8],
        issued_at: OffsetDateTime,
    ) -> String {
        let secs = u64::try_from(issued_at.unix_timestamp()).unwrap_or(0);
        let timestamp = format::encode_timestamp(secs);
        sign(self.algorithm, payload.as_bytes(), &timestamp, secret)
    }

    /// Serialize `value` as compact JSON, the way Flask's session serializer does, and resign.
    pub fn resign_json<T: Serialize + ?Sized>(
        &self,
        value: &T,
        secret: &[u8],
    ) -> Result<String, serde_json::Error> {
        let payload = serde_json::to_vec(value)?;
        Ok(sign(self.algorithm, &payload, &self.timestamp, secret))
    }

    /// The decoded payload. Still zlib-compressed when [`FlaskCookie::compressed`] is set.
    pub fn payload_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        Ok(format::decode(&self.payload)?)
    }

    /// Deserialize an uncompressed JSON payload.
    pub fn payload_json<T: DeserializeOwned>(&self) -> Result<T, PayloadError> {
        if self.compressed {
            return Err(PayloadError::Compressed);
        }
        let bytes = self.payload_bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn timestamp_raw(&self) -> &[u8] {
        &self.timestamp_raw
    }

    /// Seconds since the Unix epoch, as packed by itsdangerous.
    pub fn timestamp_secs(&self) -> u64 {
        format::timestamp_from_bytes(&self.timestamp_raw)
    }

    pub fn issued_at(&self) -> Option<OffsetDateTime> {
        let secs = i64::try_from(self.timestamp_secs()).ok()?;
        OffsetDateTime::from_unix_timestamp(secs).ok()
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn signature_raw(&self) -> &[u8] {
        &self.signature_raw
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn to_be_signed(&self) -> &[u8] {
        &self.to_be_signed
    }
}

impl fmt::Display for FlaskCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compressed: {}", self.compressed)?;
        writeln!(f, "Data: {}", self.payload)?;
        writeln!(f, "Timestamp: {}", self.timestamp)?;
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Algorithm: {}", self.algorithm)
    }
}

fn sign(algorithm: Algorithm, payload: &[u8], timestamp: &str, secret: &[u8]) -> String {
    let mut cookie = format::encode(payload);
    cookie.push(SEPARATOR);
    cookie.push_str(timestamp);

    let signature = algorithm.compute(secret, cookie.as_bytes());
    cookie.push(SEPARATOR);
    cookie.push_str(&format::encode(signature));
    cookie
}
