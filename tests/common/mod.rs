#![allow(dead_code)]

// Shared helpers for integration tests.
//
// The cookies below were produced by itsdangerous' `URLSafeTimedSerializer` with salt
// "cookie-session", HMAC key derivation and a fixed timestamp of 1700000000.
use axum::body::Body;
use http::{HeaderMap, header};
use http_body_util::BodyExt as _;

pub const SECRET: &[u8] = b"test-secret";

pub const SHA1_COOKIE: &str = "eyJ1c2VyIjoiYWxpY2UifQ.ZVPxAA.64FjGVGKqiQC_LBQ0Ln1-5m8au0";
pub const SHA256_COOKIE: &str =
    "eyJ1c2VyIjoiYWxpY2UifQ.ZVPxAA.JWHJ_B4RedcTrljXc3vNI5RddwmDVIhSgNm99Mvi9gA";
pub const COMPRESSED_COOKIE: &str =
    ".eJyrViotTi1SslJKHCZAqRYAqxFPQg.ZVPxAA.VWGg9-CB3KZ4hbiUiAt5VheHZE4";

pub async fn body_string(body: Body) -> String {
    // Collect an Axum body into a UTF-8 string for assertions.
    let bytes = body
        .collect()
        .await
        .expect("body collects successfully")
        .to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn set_cookie_headers(headers: &HeaderMap) -> Vec<String> {
    // All `Set-Cookie` values, in order.
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| {
            value
                .to_str()
                .expect("set-cookie header is valid utf-8")
                .to_string()
        })
        .collect()
}
