//! Decoders claim raw cookie values for a framework.
//!
//! A [`Cookie`] is run through a list of [`CookieDecoder`]s; the first one that recognizes the value
//! records itself and its parsed form. Later operations dispatch on the stored [`DecodedCookie`],
//! so there is no untyped lookup by decoder name.

use std::fmt::Debug;

use crate::cookie::FlaskCookie;

pub trait CookieDecoder: Debug + Send + Sync {
    /// Stable name recorded against a cookie this decoder claims.
    fn name(&self) -> &'static str;

    /// Claim `raw` if it is in this decoder's format.
    fn decode(&self, raw: &str) -> Option<DecodedCookie>;
}

/// Parsed form of a cookie, tagged by the decoder that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedCookie {
    Flask(FlaskCookie),
}

impl DecodedCookie {
    pub fn decoder_name(&self) -> &'static str {
        match self {
            Self::Flask(_) => FlaskDecoder::NAME,
        }
    }

    pub fn unsign(&self, secret: &[u8]) -> bool {
        match self {
            Self::Flask(cookie) => cookie.verify(secret),
        }
    }

    pub fn resign(&self, payload: &str, secret: &[u8]) -> String {
        match self {
            Self::Flask(cookie) => cookie.resign(payload, secret),
        }
    }

    pub fn as_flask(&self) -> Option<&FlaskCookie> {
        match self {
            Self::Flask(cookie) => Some(cookie),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlaskDecoder;

impl FlaskDecoder {
    pub const NAME: &'static str = "flask";
}

impl CookieDecoder for FlaskDecoder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn decode(&self, raw: &str) -> Option<DecodedCookie> {
        match FlaskCookie::parse(raw) {
            Ok(cookie) => Some(DecodedCookie::Flask(cookie)),
            Err(err) => {
                tracing::trace!(err = %err, "flask decoder rejected cookie");
                None
            }
        }
    }
}

/// A raw cookie value and the decoder that claimed it, if any.
#[derive(Debug, Clone)]
pub struct Cookie {
    raw: String,
    decoded: Option<DecodedCookie>,
}

impl Cookie {
    /// Run `raw` through `decoders` in order and keep the first claim.
    pub fn decode<R: Into<String>>(raw: R, decoders: &[&dyn CookieDecoder]) -> Self {
        let raw = raw.into();
        let decoded = decoders.iter().find_map(|decoder| {
            let decoded = decoder.decode(&raw)?;
            tracing::debug!(decoder = decoder.name(), "cookie decoded");
            Some(decoded)
        });

        Self { raw, decoded }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn decoded_by(&self) -> Option<&'static str> {
        self.decoded.as_ref().map(DecodedCookie::decoder_name)
    }

    pub fn parsed(&self) -> Option<&DecodedCookie> {
        self.decoded.as_ref()
    }

    /// `false` when no decoder claimed the cookie.
    pub fn unsign(&self, secret: &[u8]) -> bool {
        self.decoded
            .as_ref()
            .is_some_and(|decoded| decoded.unsign(secret))
    }

    pub fn resign(&self, payload: &str, secret: &[u8]) -> Option<String> {
        self.decoded
            .as_ref()
            .map(|decoded| decoded.resign(payload, secret))
    }
}
