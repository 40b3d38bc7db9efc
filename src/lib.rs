//! Parse, verify and forge Flask signed session cookies.
//!
//! Flask stores sessions client-side using itsdangerous' `URLSafeTimedSerializer`:
//!
//! ```text
//! [.]<payload>.<timestamp>.<signature>
//! ```
//!
//! Each segment is URL-safe base64 without padding. A leading `.` marks a zlib-compressed payload.
//! The signature is `HMAC(HMAC(secret, "cookie-session"), "[.]<payload>.<timestamp>")`, with the
//! digest picked from SHA-1, SHA-256, SHA-384 or SHA-512. The digest is recovered from the length
//! of the signature alone.
//!
//! ```
//! use flask_session_cookie::{Algorithm, FlaskCookie};
//!
//! let cookie = FlaskCookie::parse("eyJ1c2VyIjoiYWxpY2UifQ.ZVPxAA.64FjGVGKqiQC_LBQ0Ln1-5m8au0")?;
//! assert_eq!(cookie.algorithm(), Algorithm::Sha1);
//! assert!(cookie.verify(b"test-secret"));
//!
//! let forged = cookie.resign(r#"{"user":"admin"}"#, b"test-secret");
//! assert!(FlaskCookie::parse(&forged)?.verify(b"test-secret"));
//! # Ok::<(), flask_session_cookie::ParseError>(())
//! ```
//!
//! Payloads are never decompressed; [`FlaskCookie::compressed`] only reports that they were.
//!
//! With the `layer` feature (on by default), [`FlaskSessionLayer`] checks incoming cookies against a
//! list of known secrets and hands the outcome to the inner service as a [`SessionCookie`].

mod algorithm;
mod config;
mod cookie;
pub mod decoder;
mod error;
pub mod format;
#[cfg(feature = "layer")]
pub mod layer;

pub use crate::algorithm::Algorithm;
pub use crate::config::{DEFAULT_COOKIE_NAME, FlaskSessionConfig};
pub use crate::cookie::FlaskCookie;
pub use crate::decoder::{Cookie, CookieDecoder, DecodedCookie, FlaskDecoder};
pub use crate::error::{ParseError, PayloadError};

#[cfg(feature = "layer")]
pub use crate::layer::{FlaskSessionLayer, SessionCookie};
